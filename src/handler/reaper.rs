//! Process-wide accounting of CGI children
//!
//! Every spawned child is registered until the invoker has waited on it.
//! Connection tasks are otherwise independent, so this counter is the only
//! state they share.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ChildRegistry {
    outstanding: Arc<AtomicUsize>,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly spawned child. The returned guard clears the entry
    /// when dropped, which must happen only after the child was reaped.
    pub fn register(&self, pid: Option<u32>) -> ChildGuard {
        let count = self.outstanding.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(?pid, outstanding = count, "Child registered");
        ChildGuard {
            outstanding: Arc::clone(&self.outstanding),
            pid,
        }
    }

    /// Number of children spawned but not yet reaped.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct ChildGuard {
    outstanding: Arc<AtomicUsize>,
    pid: Option<u32>,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let count = self.outstanding.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::trace!(pid = ?self.pid, outstanding = count, "Child reaped");
    }
}
