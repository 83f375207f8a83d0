use thiserror::Error;

/// 应用程序错误类型
///
/// 评卷服务返回空响应不在此列：那是可恢复条件，
/// 由工作流以 `SubmitOutcome::NoGradableContent` 报告并回到 Idle
#[derive(Error, Debug)]
pub enum AppError {
    /// 编辑会话相关错误
    #[error("编辑错误: {0}")]
    Edit(#[from] EditError),
    /// 结果存储相关错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 工作流状态机错误
    #[error("工作流错误: {0}")]
    Workflow(#[from] WorkflowError),
    /// HTTP 传输层错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 上游鉴权失败（401），原样向上传递，核心不做任何处理
    #[error("鉴权失败 (401): {endpoint}")]
    UpstreamAuth { endpoint: String },
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 编辑会话错误
#[derive(Error, Debug)]
pub enum EditError {
    /// 分数只允许 0 或 1
    #[error("无效分数 {score}: 每题分数只能是 0 或 1")]
    InvalidScore { score: u8 },
    /// 同一评卷会话同时只允许一个编辑会话
    #[error("已有进行中的编辑会话 (结果 #{active_id})")]
    ConcurrentEdit { active_id: i64 },
    /// 当前没有打开的编辑会话
    #[error("当前没有打开的编辑会话")]
    NoActiveEdit,
    /// 结果不存在
    #[error("结果 #{result_id} 不存在")]
    ResultNotFound { result_id: i64 },
}

/// 结果存储错误
#[derive(Error, Debug)]
pub enum StoreError {
    /// 空会话不允许提交验证，也不会发起任何网络请求
    #[error("评卷会话为空，无法提交验证")]
    EmptySession,
    /// 持久化请求失败，detail 为存储服务返回的可读原因
    #[error("保存结果失败: {detail}")]
    PersistFailure { detail: String },
}

/// 工作流状态机错误
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// 非法状态转换
    #[error("非法状态转换: 状态 {state} 不允许执行 {action}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    /// 宿主环境已卸载，会话不再接受任何状态更新
    #[error("会话已脱离宿主环境")]
    SessionDetached,
}

/// HTTP 传输层错误
#[derive(Error, Debug)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, detail={detail:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 解析配置文件失败
    #[error("解析配置文件失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建上游鉴权失败错误
    pub fn upstream_auth(endpoint: impl Into<String>) -> Self {
        AppError::UpstreamAuth {
            endpoint: endpoint.into(),
        }
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建持久化失败错误，detail 缺失时使用通用兜底文案
    pub fn persist_failure(detail: Option<String>) -> Self {
        AppError::Store(StoreError::PersistFailure {
            detail: detail.unwrap_or_else(|| "保存结果失败，请稍后重试".to_string()),
        })
    }

    /// 是否为上游鉴权失败（401）
    pub fn is_upstream_auth(&self) -> bool {
        matches!(self, AppError::UpstreamAuth { .. })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
