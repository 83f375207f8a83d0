//! # Correct Exam Submit
//!
//! 一个用于答卷批改与成绩验证的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 能力层（Clients）
//! - `clients/` - 外部协作方的 HTTP 客户端，只暴露能力
//! - `GradingClient` - 评卷服务（上传答卷 → 结构化批改数据）
//! - `ResultStoreClient` - 结果存储（持久化最终总分）
//! - `ProfileClient` / `RecommendationClient` - 审阅人资料 / 学习建议
//!
//! ### ② 业务层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个评卷会话
//! - `matcher` - 作答与标准答案的匹配判定（纯函数）
//! - `EditSession` - 单题人工改分的状态机
//! - `validator` - 总分验证提交（每个会话恰好一次）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份答卷"的完整生命周期
//! - `CorrectionFlow` - 状态机编排（提交 → 批改 → 编辑 → 验证）
//! - `SubmissionCtx` - 上下文封装（答卷索引 + 文件名）
//! - `Liveness` - 存活守卫（宿主卸载后丢弃迟到的响应）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 批量答卷处理器，管理资源和并发
//! - `orchestrator/submission_processor` - 单份答卷处理器
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GradingBackend, GradingClient, ResultStore, ResultStoreClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GradedResult, GradingSession, ResultSet, ResultStatus, SubmissionDocument};
pub use orchestrator::App;
pub use services::{EditSession, ValidateOutcome};
pub use workflow::{CorrectionFlow, FlowState, SubmissionCtx, SubmitOutcome};
