//! 编辑会话 - 单题人工改分的状态机
//!
//! 审阅人在验证前可以覆盖某一题的自动评分。
//! 同一评卷会话同时最多只有一个编辑会话；打开时快照原始分数，
//! 取消即回滚。非法操作返回类型化错误，而不是静默覆盖状态。

use crate::error::{AppResult, EditError};
use crate::models::result::{ResultSet, ResultStatus};
use tracing::debug;

/// 编辑会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// 无进行中的编辑
    Closed,
    /// 正在编辑某条结果，保留打开时的分数用于取消回滚
    Editing { result_id: i64, original_score: u8 },
}

/// 编辑会话
///
/// 只操作所属评卷会话的内存结果，不发起任何网络请求
#[derive(Debug, Default)]
pub struct EditSession {
    state: Option<EditStateInner>,
}

#[derive(Debug)]
struct EditStateInner {
    result_id: i64,
    original_score: u8,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态
    pub fn state(&self) -> EditState {
        match &self.state {
            None => EditState::Closed,
            Some(inner) => EditState::Editing {
                result_id: inner.result_id,
                original_score: inner.original_score,
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// 正在编辑的结果 id
    pub fn active_result(&self) -> Option<i64> {
        self.state.as_ref().map(|s| s.result_id)
    }

    /// 打开编辑会话: Closed → Editing
    ///
    /// 已有编辑会话或结果不存在时拒绝，不影响现有状态
    pub fn open(&mut self, results: &ResultSet, result_id: i64) -> AppResult<()> {
        if let Some(inner) = &self.state {
            return Err(EditError::ConcurrentEdit {
                active_id: inner.result_id,
            }
            .into());
        }

        let result = results
            .get(result_id)
            .ok_or(EditError::ResultNotFound { result_id })?;

        self.state = Some(EditStateInner {
            result_id,
            original_score: result.score,
        });

        debug!("打开编辑会话: 结果 #{}", result_id);
        Ok(())
    }

    /// 修改分数，仅在 Editing 状态有效，可反复调整
    ///
    /// 分数只允许 0 或 1，越界输入拒绝且不影响会话
    pub fn update_score(&mut self, results: &mut ResultSet, new_score: u8) -> AppResult<()> {
        let inner = self.state.as_ref().ok_or(EditError::NoActiveEdit)?;

        if new_score > 1 {
            return Err(EditError::InvalidScore { score: new_score }.into());
        }

        let result = results
            .get_mut(inner.result_id)
            .ok_or(EditError::ResultNotFound {
                result_id: inner.result_id,
            })?;
        result.score = new_score;

        debug!("结果 #{} 分数修改为 {}", inner.result_id, new_score);
        Ok(())
    }

    /// 保存编辑: Editing → Closed
    ///
    /// 只是本地提交，重申结果状态为待验证；不联系外部存储。
    /// 返回被编辑结果的 id，方便调用方触发重新聚合与日志。
    pub fn save(&mut self, results: &mut ResultSet) -> AppResult<i64> {
        let inner = self.state.take().ok_or(EditError::NoActiveEdit)?;

        if let Some(result) = results.get_mut(inner.result_id) {
            result.status = ResultStatus::Pending;
        }

        debug!("保存编辑: 结果 #{}", inner.result_id);
        Ok(inner.result_id)
    }

    /// 取消编辑: Editing → Closed，恢复打开时的分数
    pub fn cancel(&mut self, results: &mut ResultSet) -> AppResult<()> {
        let inner = self.state.take().ok_or(EditError::NoActiveEdit)?;

        if let Some(result) = results.get_mut(inner.result_id) {
            result.score = inner.original_score;
        }

        debug!("取消编辑: 结果 #{}", inner.result_id);
        Ok(())
    }

    /// 强制关闭（验证成功后会话转为只读时使用），不回滚分数
    pub(crate) fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::result::GradedResult;

    fn result_set() -> ResultSet {
        ResultSet::new(vec![
            GradedResult {
                id: 1,
                question_ref: "q1".to_string(),
                full_question: "Question q1".to_string(),
                student_answer: "A".to_string(),
                correct_answer: "A".to_string(),
                correct_answer_text: "Réponse A".to_string(),
                score: 1,
                is_correct: true,
                status: ResultStatus::Pending,
            },
            GradedResult {
                id: 2,
                question_ref: "q2".to_string(),
                full_question: "Question q2".to_string(),
                student_answer: "C".to_string(),
                correct_answer: "B".to_string(),
                correct_answer_text: "Réponse B".to_string(),
                score: 0,
                is_correct: false,
                status: ResultStatus::Pending,
            },
        ])
    }

    #[test]
    fn test_open_update_save() {
        let mut results = result_set();
        let mut edit = EditSession::new();

        edit.open(&results, 2).unwrap();
        assert_eq!(edit.active_result(), Some(2));
        assert_eq!(
            edit.state(),
            EditState::Editing {
                result_id: 2,
                original_score: 0
            }
        );

        edit.update_score(&mut results, 1).unwrap();
        // 保存前可以反复调整
        edit.update_score(&mut results, 0).unwrap();
        edit.update_score(&mut results, 1).unwrap();

        let saved_id = edit.save(&mut results).unwrap();
        assert_eq!(saved_id, 2);
        assert!(!edit.is_open());
        assert_eq!(edit.state(), EditState::Closed);
        assert_eq!(results.get(2).unwrap().score, 1);
        assert_eq!(results.get(2).unwrap().status, ResultStatus::Pending);
        assert_eq!(results.correct_count(), 2);
    }

    #[test]
    fn test_cancel_restores_original_score() {
        let mut results = result_set();
        let mut edit = EditSession::new();

        edit.open(&results, 1).unwrap();
        edit.update_score(&mut results, 0).unwrap();
        assert_eq!(results.get(1).unwrap().score, 0);

        edit.cancel(&mut results).unwrap();
        assert_eq!(results.get(1).unwrap().score, 1);
        assert!(!edit.is_open());
        assert_eq!(results.correct_count(), 1);
    }

    #[test]
    fn test_concurrent_edit_rejected() {
        let mut results = result_set();
        let mut edit = EditSession::new();

        edit.open(&results, 1).unwrap();
        let err = edit.open(&results, 2).unwrap_err();
        assert!(matches!(
            err,
            AppError::Edit(EditError::ConcurrentEdit { active_id: 1 })
        ));

        // 被拒绝的 open 不影响进行中的会话
        assert_eq!(edit.active_result(), Some(1));
        edit.update_score(&mut results, 0).unwrap();
        edit.save(&mut results).unwrap();
    }

    #[test]
    fn test_invalid_score_rejected() {
        let mut results = result_set();
        let mut edit = EditSession::new();

        edit.open(&results, 2).unwrap();
        let err = edit.update_score(&mut results, 2).unwrap_err();
        assert!(matches!(
            err,
            AppError::Edit(EditError::InvalidScore { score: 2 })
        ));

        // 会话不受影响，分数未变
        assert!(edit.is_open());
        assert_eq!(results.get(2).unwrap().score, 0);
    }

    #[test]
    fn test_operations_require_open_session() {
        let mut results = result_set();
        let mut edit = EditSession::new();

        assert!(matches!(
            edit.update_score(&mut results, 1).unwrap_err(),
            AppError::Edit(EditError::NoActiveEdit)
        ));
        assert!(matches!(
            edit.save(&mut results).unwrap_err(),
            AppError::Edit(EditError::NoActiveEdit)
        ));
        assert!(matches!(
            edit.cancel(&mut results).unwrap_err(),
            AppError::Edit(EditError::NoActiveEdit)
        ));
    }

    #[test]
    fn test_open_unknown_result_rejected() {
        let results = result_set();
        let mut edit = EditSession::new();

        let err = edit.open(&results, 99).unwrap_err();
        assert!(matches!(
            err,
            AppError::Edit(EditError::ResultNotFound { result_id: 99 })
        ));
        assert!(!edit.is_open());
    }

    #[test]
    fn test_open_update_cancel_leaves_score_unchanged() {
        // open(id); updateScore(s); cancel() 之后分数与 open 之前一致
        let mut results = result_set();
        let before: Vec<u8> = results.all().iter().map(|r| r.score).collect();

        let mut edit = EditSession::new();
        edit.open(&results, 2).unwrap();
        edit.update_score(&mut results, 1).unwrap();
        edit.cancel(&mut results).unwrap();

        let after: Vec<u8> = results.all().iter().map(|r| r.score).collect();
        assert_eq!(before, after);
    }
}
