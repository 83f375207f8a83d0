/// 结果存储客户端
///
/// 封装最终总分的持久化调用
use crate::clients::{flatten_detail, ResultStore};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// 保存结果的响应，message 字段仅供人读，这里只取 result_id
#[derive(Debug, Deserialize)]
struct SaveResultResponse {
    result_id: i64,
}

/// 结果存储客户端
#[derive(Clone)]
pub struct ResultStoreClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ResultStoreClient {
    /// 创建新的结果存储客户端
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }
}

#[async_trait]
impl ResultStore for ResultStoreClient {
    /// 持久化一次评卷会话的最终总分
    ///
    /// # 参数
    /// - `score`: 正确题数（调用方在调用时重新求和）
    /// - `exam_ref`: 练习标识
    /// - `student_ref`: 学生标识
    ///
    /// # 返回
    /// 返回存储端分配的结果 id。
    /// 请求体为表单编码；失败时展平 detail 作为可展示的原因
    async fn save_result(&self, score: u32, exam_ref: i64, student_ref: i64) -> AppResult<i64> {
        let endpoint = "/save-result/";
        let url = format!("{}{}", self.base_url, endpoint);

        let form = [
            ("score", score.to_string()),
            ("exo_id", exam_ref.to_string()),
            ("eleve_id", student_ref.to_string()),
        ];

        debug!(
            "保存结果: score={} exo_id={} eleve_id={}",
            score, exam_ref, student_ref
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::upstream_auth(endpoint));
        }

        if !status.is_success() {
            // 存储端的 detail 文案优先，缺失时用通用兜底
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::persist_failure(flatten_detail(&body)));
        }

        let saved: SaveResultResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::JsonParseFailed {
                    endpoint: endpoint.to_string(),
                    source: e,
                })?;

        debug!("结果已保存, result_id={}", saved.result_id);

        Ok(saved.result_id)
    }
}
