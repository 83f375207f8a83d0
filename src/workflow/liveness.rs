//! 会话存活守卫
//!
//! 宿主环境可能在网络请求还在途时被卸载（例如页面跳转、会话过期）。
//! 守卫一旦脱离，迟到的响应必须被丢弃，绝不能写入已失效的会话。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的存活守卫句柄
///
/// 克隆共享同一状态，宿主持有一个克隆即可在任意时刻脱离会话
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// 脱离会话：之后到达的任何响应都只能被丢弃
    pub fn detach(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_is_shared_across_clones() {
        let guard = Liveness::new();
        let handle = guard.clone();
        assert!(guard.is_attached());

        handle.detach();
        assert!(!guard.is_attached());
        assert!(!handle.is_attached());
    }
}
