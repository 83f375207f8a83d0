//! 能力层（Clients）- 外部协作方的 HTTP 客户端
//!
//! 评卷核心通过这里的 trait 消费外部服务：
//! - `GradingBackend` - 评卷服务（上传答卷 → 结构化批改数据）
//! - `ResultStore` - 结果存储（持久化最终总分）
//!
//! trait 作为测试接缝存在，工作流与验证提交器只依赖 trait，
//! 单元测试用内存桩实现替换真实 HTTP 客户端。
//!
//! 所有客户端共享同一个 `reqwest::Client`（内部是 Arc，克隆开销极小），
//! 超时策略配置在 Client 上，属于传输层而不是评卷核心。

pub mod grading_client;
pub mod profile_client;
pub mod recommendation_client;
pub mod result_store;

pub use grading_client::GradingClient;
pub use profile_client::{Profile, ProfileClient};
pub use recommendation_client::{Recommendation, RecommendationClient};
pub use result_store::ResultStoreClient;

use crate::error::{AppError, AppResult};
use crate::models::submission::{GradingResponse, SubmissionDocument};
use async_trait::async_trait;
use serde::Deserialize;

/// 评卷服务能力
#[async_trait]
pub trait GradingBackend: Send + Sync {
    /// 上传一份答卷文档并获取批改数据
    async fn correct_exam(&self, document: &SubmissionDocument) -> AppResult<GradingResponse>;
}

/// 结果存储能力
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// 持久化一次评卷会话的最终总分，成功返回存储端分配的结果 id
    async fn save_result(&self, score: u32, exam_ref: i64, student_ref: i64) -> AppResult<i64>;
}

// ========== 响应状态检查与错误展平 ==========

/// 错误响应体，detail 可能是字符串或校验错误列表
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<DetailField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailField {
    Text(String),
    Items(Vec<DetailItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// 把错误响应体中的 detail 字段展平为一条可展示的文本
///
/// detail 可能是字符串，也可能是 `[{loc, msg}]` 形式的校验错误列表；
/// 解析不出来时返回 None，由调用方决定兜底文案
pub(crate) fn flatten_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        DetailField::Text(text) => Some(text),
        DetailField::Items(items) => {
            if items.is_empty() {
                return None;
            }
            let parts: Vec<String> = items
                .iter()
                .map(|item| {
                    let loc: Vec<String> = item
                        .loc
                        .iter()
                        .map(|v| match v {
                            serde_json::Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect();
                    if loc.is_empty() {
                        item.msg.clone()
                    } else {
                        format!("{}: {}", loc.join("."), item.msg)
                    }
                })
                .collect();
            Some(parts.join("; "))
        }
        DetailField::Other(_) => None,
    }
}

/// 统一的响应状态检查
///
/// 401 映射为 UpstreamAuth 并原样向上传递；其余非 2xx 读取响应体，
/// 展平 detail 后包装为 BadResponse
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    endpoint: &str,
) -> AppResult<reqwest::Response> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AppError::upstream_auth(endpoint));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Api(crate::error::ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail: flatten_detail(&body),
        }));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_detail_string() {
        let body = r#"{"detail": "Résultat introuvable"}"#;
        assert_eq!(flatten_detail(body), Some("Résultat introuvable".to_string()));
    }

    #[test]
    fn test_flatten_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "score"], "msg": "value is not a valid integer"},
            {"loc": ["body", "exo_id"], "msg": "field required"}
        ]}"#;

        assert_eq!(
            flatten_detail(body),
            Some(
                "body.score: value is not a valid integer; body.exo_id: field required"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_flatten_detail_list_without_loc() {
        let body = r#"{"detail": [{"msg": "invalid payload"}]}"#;
        assert_eq!(flatten_detail(body), Some("invalid payload".to_string()));
    }

    #[test]
    fn test_flatten_detail_missing_or_garbage() {
        assert_eq!(flatten_detail(r#"{"message": "oops"}"#), None);
        assert_eq!(flatten_detail("not json at all"), None);
        assert_eq!(flatten_detail(r#"{"detail": {"weird": true}}"#), None);
    }
}
