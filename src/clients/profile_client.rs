/// 用户资料客户端
///
/// 只用于获取当前审阅人的展示名；401 原样向上传递，
/// 会话管理不属于评卷核心
use crate::clients::ensure_success;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use serde::Deserialize;

/// 当前用户资料
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 用户资料客户端
#[derive(Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ProfileClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.auth_token.clone(),
        }
    }

    /// 获取当前用户资料
    pub async fn me(&self) -> AppResult<Profile> {
        let endpoint = "/me/";
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let response = ensure_success(response, endpoint).await?;

        let profile: Profile = response
            .json()
            .await
            .map_err(|e| ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        Ok(profile)
    }
}
