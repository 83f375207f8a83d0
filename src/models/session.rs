//! 评卷会话聚合根

use crate::models::result::{GradedResult, ResultSet};
use crate::models::submission::SubmissionMeta;

/// 一次答卷批改会话
///
/// 独占持有本次批改的全部结果；验证成功后只读，放弃批改则直接丢弃
#[derive(Debug, Clone)]
pub struct GradingSession {
    /// 练习（试卷）标识
    pub exam_ref: i64,
    /// 学生标识
    pub student_ref: i64,
    pub student_name: Option<String>,
    pub submission_date: Option<String>,
    pub results: ResultSet,
}

impl GradingSession {
    pub fn new(meta: SubmissionMeta, results: Vec<GradedResult>) -> Self {
        Self {
            exam_ref: meta.exam_ref,
            student_ref: meta.student_ref,
            student_name: meta.student_name,
            submission_date: meta.submission_date,
            results: ResultSet::new(results),
        }
    }

    pub fn correct_count(&self) -> u32 {
        self.results.correct_count()
    }

    pub fn total_count(&self) -> usize {
        self.results.total_count()
    }

    pub fn percentage(&self) -> u32 {
        self.results.percentage()
    }

    pub fn is_validated(&self) -> bool {
        self.results.all_validated()
    }

    /// 用于日志展示的学生名，缺失时兜底
    pub fn display_student_name(&self) -> &str {
        self.student_name.as_deref().unwrap_or("Inconnu")
    }
}

impl std::fmt::Display for GradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[练习 #{} 学生 #{}] {}/{} ({}%)",
            self.exam_ref,
            self.student_ref,
            self.correct_count(),
            self.total_count(),
            self.percentage()
        )
    }
}
