use anyhow::{Context, Result};
use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 協作式取消標記
///
/// 根標記由中斷信號觸發；每個影片再以 [`CancelToken::child`] 衍生自己的子標記。
/// 取消子標記不會影響父標記或兄弟標記，父標記被取消時所有子標記都視為已取消。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    node: Arc<TokenNode>,
}

#[derive(Debug, Default)]
struct TokenNode {
    cancelled: AtomicBool,
    parent: Option<Arc<TokenNode>>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 衍生一個子標記
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            node: Arc::new(TokenNode {
                cancelled: AtomicBool::new(false),
                parent: Some(Arc::clone(&self.node)),
            }),
        }
    }

    pub fn cancel(&self) {
        self.node.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        let mut current = Some(&self.node);
        while let Some(node) = current {
            if node.cancelled.load(Ordering::SeqCst) {
                return true;
            }
            current = node.parent.as_ref();
        }
        false
    }
}

/// 註冊 Ctrl-C / SIGTERM 處理器，回傳整個程序共用的根取消標記
pub fn setup_shutdown_signal() -> Result<CancelToken> {
    let shutdown_signal = CancelToken::new();
    let signal_clone = shutdown_signal.clone();

    ctrlc::set_handler(move || {
        signal_clone.cancel();
        warn!("收到中斷信號，正在停止所有擷取任務...");
    })
    .context("無法設定 Ctrl-C 處理器")?;

    Ok(shutdown_signal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_follows_parent() {
        let root = CancelToken::new();
        let child = root.child();
        let grandchild = child.child();

        assert!(!grandchild.is_cancelled());
        root.cancel();
        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn test_child_cancel_does_not_leak() {
        let root = CancelToken::new();
        let first = root.child();
        let second = root.child();

        first.cancel();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!root.is_cancelled());
    }

    #[test]
    fn test_clone_shares_state() {
        let token = CancelToken::new();
        let cloned = token.clone();
        cloned.cancel();
        assert!(token.is_cancelled());
    }
}
