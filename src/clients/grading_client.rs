/// 评卷服务客户端
///
/// 封装所有与评卷服务相关的调用逻辑
use crate::clients::{ensure_success, GradingBackend};
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::submission::{GradingResponse, SubmissionDocument};
use async_trait::async_trait;
use reqwest::multipart;
use tracing::debug;

/// 评卷服务客户端
#[derive(Clone)]
pub struct GradingClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GradingClient {
    /// 创建新的评卷客户端
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }
}

#[async_trait]
impl GradingBackend for GradingClient {
    /// 上传答卷 PDF 并获取批改数据
    ///
    /// # 参数
    /// - `document`: 答卷文档（文件名 + 字节内容）
    ///
    /// # 返回
    /// 返回评卷服务的完整响应；"Submission failed" 或空 submission_data
    /// 由上层判定为无可评分内容，不在这里作为错误处理
    async fn correct_exam(&self, document: &SubmissionDocument) -> AppResult<GradingResponse> {
        let endpoint = "/correct-exam/";
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("上传答卷: {} ({} 字节)", document.file_name, document.bytes.len());

        let part = multipart::Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        let form = multipart::Form::new().part("pdf", part);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let response = ensure_success(response, endpoint).await?;

        let grading: GradingResponse =
            response
                .json()
                .await
                .map_err(|e| ApiError::JsonParseFailed {
                    endpoint: endpoint.to_string(),
                    source: e,
                })?;

        debug!(
            "评卷服务返回 {} 条作答记录, {} 条标准答案",
            grading.items.len(),
            grading.answer_key.len()
        );

        Ok(grading)
    }
}
