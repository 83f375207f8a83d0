//! 答案匹配服务
//!
//! 把评卷服务提取出的作答记录与标准答案逐条配对并判定对错。
//! 纯函数，无副作用，重复执行产生完全相同的结果。

use crate::models::result::{GradedResult, ResultStatus, UNKNOWN_ANSWER};
use crate::models::submission::{AnswerKeyEntry, SubmissionItem};

/// 批改一份答卷
///
/// # 参数
/// - `items`: 学生作答记录列表
/// - `answer_key`: 标准答案列表
///
/// # 返回
/// 每条作答记录对应一条结果，顺序与提交顺序一致。
/// 答案表中找不到对应题目时不报错，按"未知/错误"处理。
pub fn grade_submission(
    items: &[SubmissionItem],
    answer_key: &[AnswerKeyEntry],
) -> Vec<GradedResult> {
    items
        .iter()
        .map(|item| {
            let entry = answer_key
                .iter()
                .find(|a| a.question_ref == item.question_ref);

            // 字母比较区分大小写
            let is_correct = entry
                .map(|e| e.correct_letter == item.student_answer)
                .unwrap_or(false);

            GradedResult {
                id: item.id,
                question_ref: item.question_ref.clone(),
                full_question: entry
                    .map(|e| e.full_question_text.clone())
                    .unwrap_or_else(|| item.question_ref.clone()),
                student_answer: item.student_answer.clone(),
                correct_answer: entry
                    .map(|e| e.correct_letter.clone())
                    .unwrap_or_else(|| UNKNOWN_ANSWER.to_string()),
                correct_answer_text: entry
                    .map(|e| e.correct_answer_text.clone())
                    .unwrap_or_else(|| UNKNOWN_ANSWER.to_string()),
                score: if is_correct { 1 } else { 0 },
                is_correct,
                status: ResultStatus::Pending,
            }
        })
        .collect()
}
