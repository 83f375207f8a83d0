/// 学习建议客户端
///
/// 建议内容由上游生成，这里只原样取回供展示，核心不解析其语义
use crate::clients::ensure_success;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use serde::Deserialize;

/// 针对某个学生的学习建议
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

/// 学习建议客户端
#[derive(Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RecommendationClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }

    /// 获取某个学生的学习建议
    ///
    /// # 参数
    /// - `student_ref`: 学生标识
    /// - `exam_ref`: 可选的练习标识，缺省则汇总全部练习
    pub async fn for_student(
        &self,
        student_ref: i64,
        exam_ref: Option<i64>,
    ) -> AppResult<Recommendation> {
        let endpoint = format!("/recommendations/student/{}", student_ref);
        let url = match exam_ref {
            Some(exam) => format!("{}{}?exercice_id={}", self.base_url, endpoint, exam),
            None => format!("{}{}", self.base_url, endpoint),
        };

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let response = ensure_success(response, &endpoint).await?;

        let recommendation: Recommendation =
            response
                .json()
                .await
                .map_err(|e| ApiError::JsonParseFailed {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;

        Ok(recommendation)
    }
}
