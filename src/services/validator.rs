//! 验证提交器
//!
//! 评卷会话的总分只能经由这里到达持久化存储，每个会话一次。
//! 持久化成功后一次性把全部结果置为已验证；失败则会话完全保持原状。

use crate::clients::ResultStore;
use crate::error::{AppResult, StoreError};
use crate::models::session::GradingSession;
use crate::workflow::liveness::Liveness;
use tracing::{info, warn};

/// 验证提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// 持久化成功，所有结果已置为已验证
    Validated { result_id: i64 },
    /// 守卫在请求在途时脱离，响应被丢弃，会话未被改动
    Aborted,
}

/// 提交一次评卷会话的验证
///
/// # 参数
/// - `store`: 结果存储
/// - `session`: 待验证的评卷会话
/// - `liveness`: 存活守卫，请求在途时宿主可能已卸载
///
/// # 返回
/// 成功返回存储端分配的结果 id。总分在调用时重新求和，不读任何缓存。
///
/// 失败不会自动重试。存储端若不按 (练习, 学生) 去重，
/// 审阅人手动重试可能产生重复记录，本系统不对此做幂等保证。
pub async fn validate_session<S: ResultStore>(
    store: &S,
    session: &mut GradingSession,
    liveness: &Liveness,
) -> AppResult<ValidateOutcome> {
    // 空会话直接拒绝，不发起网络请求
    if session.total_count() == 0 {
        return Err(StoreError::EmptySession.into());
    }

    // 宿主已卸载的会话不再发起新请求
    if !liveness.is_attached() {
        return Ok(ValidateOutcome::Aborted);
    }

    let score = session.correct_count();
    let total = session.total_count();

    info!(
        "📤 正在提交验证: 练习 #{} 学生 #{} 得分 {}/{}",
        session.exam_ref, session.student_ref, score, total
    );

    let result_id = store
        .save_result(score, session.exam_ref, session.student_ref)
        .await?;

    // 宿主已卸载：丢弃迟到的成功响应，会话保持原状
    if !liveness.is_attached() {
        warn!(
            "⚠️ 会话已脱离宿主，丢弃验证响应 (结果 id: {})",
            result_id
        );
        return Ok(ValidateOutcome::Aborted);
    }

    // 持久化确认成功后才翻转状态，单次同步修改，不存在部分验证的中间态
    session.results.mark_all_validated();

    info!(
        "✓ 验证成功: 得分 {}/{} 已保存，结果 id: {}",
        score, total, result_id
    );

    Ok(ValidateOutcome::Validated { result_id })
}
