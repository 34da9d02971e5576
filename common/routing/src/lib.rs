use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod auth;
pub mod error;
pub mod metrics;
pub mod router;

pub use auth::{AuthState, PrincipalStore, TokenKeys, require_principal};

/// Shared async lock. Clones point at the same data.
#[derive(Debug, Clone, Default)]
pub struct ArwLock<T>(Arc<RwLock<T>>);
impl<T> ArwLock<T> {
    pub fn new(data: T) -> Self {
        Self(Arc::new(RwLock::new(data)))
    }
    pub async fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().await
    }
}
