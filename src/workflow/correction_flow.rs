//! 答卷批改流程 - 流程层
//!
//! 核心职责：管理一份答卷从提交到验证的完整生命周期
//!
//! 状态机：
//! Idle → Submitting → Graded → Validating → Validated
//! 失败回滚：Submitting → Idle, Validating → Graded
//! Graded 状态内允许任意次编辑（自环）
//!
//! 最强不变式：只有持久化被确认成功，流程才会进入 Validated。

use crate::clients::{GradingBackend, ResultStore};
use crate::error::{AppError, AppResult, WorkflowError};
use crate::models::session::GradingSession;
use crate::models::submission::SubmissionDocument;
use crate::services::edit_session::EditSession;
use crate::services::matcher;
use crate::services::validator::{self, ValidateOutcome};
use crate::workflow::liveness::Liveness;
use tracing::{info, warn};

/// 批改流程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// 等待提交答卷
    Idle,
    /// 评卷请求在途
    Submitting,
    /// 已批改，等待审阅/验证
    Graded,
    /// 验证请求在途
    Validating,
    /// 已验证（终态，会话只读）
    Validated,
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "Idle",
            FlowState::Submitting => "Submitting",
            FlowState::Graded => "Graded",
            FlowState::Validating => "Validating",
            FlowState::Validated => "Validated",
        }
    }
}

/// 提交批改的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 批改完成，会话进入 Graded
    Graded,
    /// 评卷服务没有返回可评分内容（可恢复条件，不是硬错误）
    NoGradableContent,
    /// 守卫在请求在途时脱离，响应被丢弃
    Aborted,
}

/// 答卷批改流程
///
/// - 编排完整的批改流程：提交 → 匹配 → 审阅编辑 → 验证
/// - 同一流程同时最多一个网络操作在途（状态机天然串行化）
/// - 不同流程之间没有共享可变状态，可以并发运行
pub struct CorrectionFlow<G, S> {
    grading: G,
    store: S,
    state: FlowState,
    session: Option<GradingSession>,
    edit: EditSession,
    liveness: Liveness,
}

impl<G: GradingBackend, S: ResultStore> CorrectionFlow<G, S> {
    /// 创建新的批改流程
    pub fn new(grading: G, store: S) -> Self {
        Self {
            grading,
            store,
            state: FlowState::Idle,
            session: None,
            edit: EditSession::new(),
            liveness: Liveness::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// 当前评卷会话（Graded 之后可用）
    pub fn session(&self) -> Option<&GradingSession> {
        self.session.as_ref()
    }

    /// 存活守卫句柄，宿主卸载时调用 detach()
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// 上游会话过期事件：中止在途操作，不拥有任何跳转策略
    pub fn on_unauthenticated(&self) {
        self.liveness.detach();
    }

    fn invalid_transition(&self, action: &'static str) -> AppError {
        WorkflowError::InvalidTransition {
            state: self.state.name(),
            action,
        }
        .into()
    }

    // ========== 提交批改 ==========

    /// 提交一份答卷文档进行批改
    ///
    /// 仅允许从 Idle 发起。评卷服务返回至少一条作答记录时，
    /// 运行答案匹配并构建新的评卷会话，进入 Graded；
    /// 空响应回到 Idle 并报告"无可评分内容"。
    pub async fn submit(&mut self, document: &SubmissionDocument) -> AppResult<SubmitOutcome> {
        if !self.liveness.is_attached() {
            return Err(WorkflowError::SessionDetached.into());
        }
        if self.state != FlowState::Idle {
            return Err(self.invalid_transition("submit"));
        }

        info!("📤 正在提交答卷批改: {}", document.file_name);
        self.state = FlowState::Submitting;

        let response = self.grading.correct_exam(document).await;

        // 宿主已卸载：丢弃迟到的响应
        if !self.liveness.is_attached() {
            warn!("⚠️ 会话已脱离宿主，丢弃批改响应: {}", document.file_name);
            self.state = FlowState::Idle;
            return Ok(SubmitOutcome::Aborted);
        }

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                self.state = FlowState::Idle;
                return Err(e);
            }
        };

        let meta = match response.data {
            Some(meta) if !response.items.is_empty() => meta,
            _ => {
                info!(
                    "⚠️ 无可评分内容 ({}): {}",
                    document.file_name, response.message
                );
                self.state = FlowState::Idle;
                return Ok(SubmitOutcome::NoGradableContent);
            }
        };
        let results = matcher::grade_submission(&response.items, &response.answer_key);
        let session = GradingSession::new(meta, results);

        // 服务端自带的 correct_count 只用于对账，本地求和是唯一权威值
        if let Some(server_count) = response.server_correct_count {
            let local_count = session.correct_count();
            if server_count != local_count {
                warn!(
                    "⚠️ 服务端 correct_count={} 与本地求和 {} 不一致，以本地为准",
                    server_count, local_count
                );
            }
        }

        info!(
            "✓ 批改完成: {} 题, 正确 {} ({}%)",
            session.total_count(),
            session.correct_count(),
            session.percentage()
        );

        self.session = Some(session);
        self.state = FlowState::Graded;
        Ok(SubmitOutcome::Graded)
    }

    // ========== 人工改分 ==========

    /// 打开某条结果的编辑会话，仅在 Graded 状态允许
    pub fn open_edit(&mut self, result_id: i64) -> AppResult<()> {
        let session = match (self.state, self.session.as_ref()) {
            (FlowState::Graded, Some(session)) => session,
            _ => return Err(self.invalid_transition("open_edit")),
        };
        self.edit.open(&session.results, result_id)
    }

    /// 修改当前编辑结果的分数
    pub fn update_edit_score(&mut self, new_score: u8) -> AppResult<()> {
        let session = match (self.state, self.session.as_mut()) {
            (FlowState::Graded, Some(session)) => session,
            _ => return Err(self.invalid_transition("update_edit_score")),
        };
        self.edit.update_score(&mut session.results, new_score)
    }

    /// 保存编辑并触发重新聚合
    pub fn save_edit(&mut self) -> AppResult<()> {
        let session = match (self.state, self.session.as_mut()) {
            (FlowState::Graded, Some(session)) => session,
            _ => return Err(self.invalid_transition("save_edit")),
        };
        let result_id = self.edit.save(&mut session.results)?;

        info!(
            "✓ 分数已更新 (结果 #{}): 当前 {}/{} ({}%)",
            result_id,
            session.correct_count(),
            session.total_count(),
            session.percentage()
        );
        Ok(())
    }

    /// 取消编辑，恢复原始分数
    pub fn cancel_edit(&mut self) -> AppResult<()> {
        let session = match (self.state, self.session.as_mut()) {
            (FlowState::Graded, Some(session)) => session,
            _ => return Err(self.invalid_transition("cancel_edit")),
        };
        self.edit.cancel(&mut session.results)
    }

    // ========== 提交验证 ==========

    /// 验证全部结果并持久化总分，仅在 Graded 状态允许
    ///
    /// 成功进入 Validated（终态）；失败回到 Graded，会话原封不动，
    /// 由审阅人决定是否重试。
    pub async fn validate_all(&mut self) -> AppResult<ValidateOutcome> {
        if !self.liveness.is_attached() {
            return Err(WorkflowError::SessionDetached.into());
        }
        let session = match (self.state, self.session.as_mut()) {
            (FlowState::Graded, Some(session)) => session,
            _ => return Err(self.invalid_transition("validate_all")),
        };
        self.state = FlowState::Validating;

        match validator::validate_session(&self.store, session, &self.liveness).await {
            Ok(ValidateOutcome::Validated { result_id }) => {
                // 会话转为只读，残留的编辑会话一并关闭
                self.edit.reset();
                self.state = FlowState::Validated;
                Ok(ValidateOutcome::Validated { result_id })
            }
            Ok(ValidateOutcome::Aborted) => {
                self.state = FlowState::Graded;
                Ok(ValidateOutcome::Aborted)
            }
            Err(e) => {
                self.state = FlowState::Graded;
                Err(e)
            }
        }
    }
}
