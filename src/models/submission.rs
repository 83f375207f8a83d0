//! 答卷提交数据模型
//!
//! 字段名与评卷服务的响应保持一致（`submission_data` / `correct_answers`），
//! 评卷服务负责 OCR 与结构化，本系统只消费提取好的答题项。

use serde::{Deserialize, Serialize};

/// 待批改的答卷文档
///
/// 只携带文件名与字节内容，与上传组件、传输方式解耦
#[derive(Debug, Clone)]
pub struct SubmissionDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SubmissionDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// 一条学生作答记录（由评卷服务从文档中提取，收到后不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionItem {
    pub id: i64,
    /// 答案表中对应题目的标识
    #[serde(rename = "question", deserialize_with = "deserialize_ref")]
    pub question_ref: String,
    /// 学生作答（字母或原始文本）
    #[serde(rename = "answer")]
    pub student_answer: String,
}

/// 一条标准答案记录（与答题项同批返回，不可变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    #[serde(rename = "id_qcm", deserialize_with = "deserialize_ref")]
    pub question_ref: String,
    /// 正确选项字母
    #[serde(rename = "lettre")]
    pub correct_letter: String,
    /// 正确答案文本
    #[serde(rename = "correct_answer")]
    pub correct_answer_text: String,
    /// 完整题干
    #[serde(rename = "question")]
    pub full_question_text: String,
}

/// 答卷元信息
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionMeta {
    #[serde(rename = "id_exercice")]
    pub exam_ref: i64,
    #[serde(rename = "id_eleve")]
    pub student_ref: i64,
    #[serde(rename = "nom_eleve", default)]
    pub student_name: Option<String>,
    #[serde(rename = "date_soumission", default)]
    pub submission_date: Option<String>,
}

/// 评卷服务的完整响应
///
/// 服务端自带的 correct_count 只用于对账，本地求和才是权威值
#[derive(Debug, Clone, Deserialize)]
pub struct GradingResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<SubmissionMeta>,
    #[serde(rename = "correct_count", default)]
    pub server_correct_count: Option<u32>,
    #[serde(rename = "submission_data", default)]
    pub items: Vec<SubmissionItem>,
    #[serde(rename = "correct_answers", default)]
    pub answer_key: Vec<AnswerKeyEntry>,
}

impl GradingResponse {
    /// 是否包含可评分内容
    pub fn has_gradable_content(&self) -> bool {
        !self.items.is_empty() && self.data.is_some()
    }
}

// Helper function to deserialize question identifiers as either string or integer
fn deserialize_ref<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct RefVisitor;

    impl<'de> Visitor<'de> for RefVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer question identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(RefVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_grading_response() {
        let raw = r#"{
            "message": "Submission processed successfully",
            "data": {"id_exercice": 7, "id_eleve": 3, "nom_eleve": "Durand", "date_soumission": "2025-04-02"},
            "correct_count": 1,
            "submission_data": [{"id": 1, "question": "q1", "answer": "B"}],
            "correct_answers": [{"id_qcm": "q1", "lettre": "B", "correct_answer": "Paris", "question": "Quelle est la capitale ?"}]
        }"#;

        let resp: GradingResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.has_gradable_content());
        assert_eq!(resp.items[0].question_ref, "q1");
        assert_eq!(resp.answer_key[0].correct_letter, "B");
        assert_eq!(resp.server_correct_count, Some(1));
    }

    #[test]
    fn test_deserialize_ref_accepts_integers() {
        let raw = r#"{"id": 1, "question": 12, "answer": "A"}"#;
        let item: SubmissionItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.question_ref, "12");
    }

    #[test]
    fn test_failed_submission_has_no_content() {
        let raw = r#"{"message": "Submission failed"}"#;
        let resp: GradingResponse = serde_json::from_str(raw).unwrap();
        assert!(!resp.has_gradable_content());
        assert!(resp.items.is_empty());
    }
}
