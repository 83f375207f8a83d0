//! 批改结果模型与聚合器
//!
//! `correct_count` 永远由逐题分数求和得到，不单独缓存，
//! 保证展示的总分不会与逐题分数漂移。

use serde::{Deserialize, Serialize};

/// 答案表中找不到对应条目时的兜底展示值
pub const UNKNOWN_ANSWER: &str = "Unknown";

/// 单题结果状态
///
/// 状态单调：同一会话内一旦 Validated 不会退回 Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    /// 等待验证
    #[serde(rename = "PENDING VALIDATION")]
    Pending,
    /// 已验证（终态，仅验证提交器可设置）
    #[serde(rename = "CORRECTED")]
    Validated,
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultStatus::Pending => write!(f, "PENDING VALIDATION"),
            ResultStatus::Validated => write!(f, "CORRECTED"),
        }
    }
}

/// 一条可供审阅人修改的批改结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedResult {
    /// 结果标识（等于答题项 id）
    pub id: i64,
    pub question_ref: String,
    pub full_question: String,
    pub student_answer: String,
    pub correct_answer: String,
    pub correct_answer_text: String,
    /// 本题得分，只能是 0 或 1；编辑后以 score 为准
    pub score: u8,
    /// 创建时的自动判定，仅供展示参考
    pub is_correct: bool,
    pub status: ResultStatus,
}

/// 结果集合聚合器
///
/// 所有统计量都是纯派生值，每次调用时重新计算
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<GradedResult>,
}

impl ResultSet {
    pub fn new(results: Vec<GradedResult>) -> Self {
        Self { results }
    }

    /// 按 id 替换已有结果，不存在则追加到末尾（保持提交顺序）
    pub fn add_or_replace(&mut self, result: GradedResult) {
        match self.results.iter_mut().find(|r| r.id == result.id) {
            Some(slot) => *slot = result,
            None => self.results.push(result),
        }
    }

    pub fn all(&self) -> &[GradedResult] {
        &self.results
    }

    pub fn get(&self, id: i64) -> Option<&GradedResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut GradedResult> {
        self.results.iter_mut().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 正确题数 = 逐题分数之和
    pub fn correct_count(&self) -> u32 {
        self.results.iter().map(|r| r.score as u32).sum()
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    /// 得分百分比，四舍五入到整数，空集合为 0
    pub fn percentage(&self) -> u32 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        ((self.correct_count() as f64 / total as f64) * 100.0).round() as u32
    }

    /// 将所有结果置为已验证（仅验证提交器在持久化成功后调用）
    pub(crate) fn mark_all_validated(&mut self) {
        for result in &mut self.results {
            result.status = ResultStatus::Validated;
        }
    }

    /// 是否所有结果都已验证
    pub fn all_validated(&self) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|r| r.status == ResultStatus::Validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i64, score: u8) -> GradedResult {
        GradedResult {
            id,
            question_ref: format!("q{}", id),
            full_question: format!("Question {}", id),
            student_answer: "A".to_string(),
            correct_answer: "A".to_string(),
            correct_answer_text: "Réponse".to_string(),
            score,
            is_correct: score == 1,
            status: ResultStatus::Pending,
        }
    }

    #[test]
    fn test_empty_set_is_valid() {
        let set = ResultSet::default();
        assert_eq!(set.correct_count(), 0);
        assert_eq!(set.total_count(), 0);
        assert_eq!(set.percentage(), 0);
    }

    #[test]
    fn test_correct_count_is_sum_of_scores() {
        let mut set = ResultSet::new(vec![result(1, 1), result(2, 0), result(3, 1)]);
        assert_eq!(set.correct_count(), 2);

        // 编辑一题后重新求和
        set.get_mut(2).unwrap().score = 1;
        assert_eq!(set.correct_count(), 3);
    }

    #[test]
    fn test_add_or_replace_keeps_order() {
        let mut set = ResultSet::new(vec![result(1, 0), result(2, 0)]);
        let mut edited = result(1, 1);
        edited.student_answer = "B".to_string();
        set.add_or_replace(edited);

        assert_eq!(set.total_count(), 2);
        assert_eq!(set.all()[0].id, 1);
        assert_eq!(set.all()[0].score, 1);

        set.add_or_replace(result(3, 1));
        assert_eq!(set.all()[2].id, 3);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1/3 = 33.33 -> 33
        let set = ResultSet::new(vec![result(1, 1), result(2, 0), result(3, 0)]);
        assert_eq!(set.percentage(), 33);

        // 2/3 = 66.67 -> 67
        let set = ResultSet::new(vec![result(1, 1), result(2, 1), result(3, 0)]);
        assert_eq!(set.percentage(), 67);

        // 1/8 = 12.5 -> 13（恰好一半向上取整）
        let mut results = vec![result(1, 1)];
        results.extend((2..=8).map(|i| result(i, 0)));
        let set = ResultSet::new(results);
        assert_eq!(set.percentage(), 13);
    }

    #[test]
    fn test_percentage_bounds() {
        let set = ResultSet::new(vec![result(1, 0), result(2, 0)]);
        assert_eq!(set.percentage(), 0);

        let set = ResultSet::new(vec![result(1, 1), result(2, 1)]);
        assert_eq!(set.percentage(), 100);
    }

    #[test]
    fn test_mark_all_validated() {
        let mut set = ResultSet::new(vec![result(1, 1), result(2, 0)]);
        assert!(!set.all_validated());

        set.mark_all_validated();
        assert!(set.all_validated());
        assert!(set.all().iter().all(|r| r.status == ResultStatus::Validated));
    }
}
