use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TxError {
    #[error("transaction already completed")]
    Completed,

    /// Staged writes no longer fit the committed state; nothing was applied.
    #[error("transaction conflict: {0}")]
    Conflict(String),

    #[error("transaction backend: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Unit-of-work handle owned by whoever opened it.
///
/// Business cores and storage adapters only bind to a handle; committing or
/// rolling back stays with the layer that created it.
#[async_trait]
pub trait CommitRollbacker: Send + Sync + 'static {
    async fn commit(&self) -> Result<(), TxError>;

    async fn rollback(&self) -> Result<(), TxError>;

    /// Lets a storage adapter recover the concrete handle type it supports.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}
