use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 基础地址
    pub api_base_url: String,
    /// Bearer 鉴权令牌
    pub auth_token: String,
    /// 待批改答卷 PDF 存放目录
    pub submissions_folder: String,
    /// 同时处理的答卷数量
    pub max_concurrent_submissions: usize,
    /// 批改完成后是否自动提交验证
    pub auto_validate: bool,
    /// 验证成功后是否拉取学习建议
    pub fetch_recommendations: bool,
    /// HTTP 请求超时（秒），超时策略属于传输层而不是评卷核心
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            auth_token: String::new(),
            submissions_folder: "submissions".to_string(),
            max_concurrent_submissions: 4,
            auto_validate: false,
            fetch_recommendations: false,
            request_timeout_secs: 60,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            auth_token: std::env::var("AUTH_TOKEN").unwrap_or(default.auth_token),
            submissions_folder: std::env::var("SUBMISSIONS_FOLDER").unwrap_or(default.submissions_folder),
            max_concurrent_submissions: std::env::var("MAX_CONCURRENT_SUBMISSIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_submissions),
            auto_validate: std::env::var("AUTO_VALIDATE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auto_validate),
            fetch_recommendations: std::env::var("FETCH_RECOMMENDATIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_recommendations),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从 TOML 文件加载配置，缺失字段取默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(config)
    }

    /// 加载配置：CONFIG_FILE 指定的 TOML 文件优先，否则读环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::from_env()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_concurrent_submissions, 4);
        assert!(!config.auto_validate);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_from_toml_partial() {
        let config: Config = toml::from_str(
            r#"
            api_base_url = "http://edu.example.com"
            auto_validate = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://edu.example.com");
        assert!(config.auto_validate);
        // 未指定的字段取默认值
        assert_eq!(config.submissions_folder, "submissions");
    }
}
