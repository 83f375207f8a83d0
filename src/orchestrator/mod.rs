//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 批量答卷处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 批量扫描待批改目录（Vec<PathBuf>）
//! - 控制并发数量（Semaphore）
//! - 构建并持有共享 HTTP 客户端与各服务客户端
//!
//! ### `submission_processor` - 单份答卷处理器
//! - 驱动单份答卷的完整批改流程
//! - 输出批改摘要与验证结果
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<PathBuf>)
//!     ↓
//! submission_processor (处理单份答卷)
//!     ↓
//! workflow::CorrectionFlow (状态机：提交 → 批改 → 验证)
//!     ↓
//! services (业务层：matcher / edit_session / validator)
//!     ↓
//! clients (能力层：评卷服务 / 结果存储 / 资料 / 建议)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管批量，submission_processor 管单份
//! 2. **资源所有者**：只有编排层构建 HTTP 客户端
//! 3. **向下委托**：编排层 → workflow → services → clients
//! 4. **无业务逻辑**：只做调度和统计，不做批改判断

pub mod app;
pub mod submission_processor;

// 重新导出主要类型
pub use app::App;
pub use submission_processor::{process_submission, SubmissionOutcome};
