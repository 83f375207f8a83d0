//! 答卷处理上下文
//!
//! 封装"我正在处理第几份答卷、哪个文件"这一信息

use std::fmt::Display;

/// 答卷处理上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 答卷索引（仅用于日志显示）
    pub submission_index: usize,

    /// 答卷文件名
    pub file_name: String,
}

impl SubmissionCtx {
    /// 创建新的答卷上下文
    pub fn new(submission_index: usize, file_name: impl Into<String>) -> Self {
        Self {
            submission_index,
            file_name: file_name.into(),
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[答卷 {} 文件#{}]", self.submission_index, self.file_name)
    }
}
