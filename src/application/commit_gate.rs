//! Cross-store commit gate.
//!
//! Each store serializes its own mutations, but a purchase touches three
//! stores in sequence. Writers that span stores hold the gate exclusively and
//! readers that join stores hold it shared, so a reader never sees a ticket
//! whose seat has not been taken yet.

use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle; clones guard the same gate.
#[derive(Debug, Clone, Default)]
pub struct CommitGate {
    inner: Arc<RwLock<()>>,
}

impl CommitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other commit or reader holds the gate.
    pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.inner.write().await
    }

    /// Waits until no commit is in flight.
    pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.inner.read().await
    }
}
