use std::sync::atomic::{AtomicBool, Ordering};

use crate::application::ports::StorageLiveness;

/// Reachability flag flipped at startup and shutdown; read on every request.
#[derive(Debug, Default)]
pub struct ConnectionLiveness {
    reachable: AtomicBool,
}

impl ConnectionLiveness {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
        }
    }

    pub fn mark_up(&self) {
        if !self.reachable.swap(true, Ordering::SeqCst) {
            tracing::info!("Storage marked reachable");
        }
    }

    pub fn mark_down(&self) {
        if self.reachable.swap(false, Ordering::SeqCst) {
            tracing::warn!("Storage marked unreachable");
        }
    }
}

impl StorageLiveness for ConnectionLiveness {
    fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }
}
