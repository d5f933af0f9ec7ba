use std::sync::Arc;

use async_trait::async_trait;
use bus_sdk::{By, CommitRollbacker, Page, TxError};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::{
    filter::QueryFilter,
    model::{Email, User},
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    /// The adapter owns the email uniqueness constraint.
    #[error("email is not unique")]
    UniqueEmail,

    #[error("transaction: {0}")]
    Tx(#[from] TxError),

    #[error("storage: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the business core needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait Storer: Send + Sync {
    /// Return a store whose calls run inside `tx`, leaving `self` untouched.
    fn new_with_tx(&self, tx: Arc<dyn CommitRollbacker>) -> Result<Arc<dyn Storer>, StoreError>;

    async fn create(&self, usr: &User) -> Result<(), StoreError>;

    async fn update(&self, usr: &User) -> Result<(), StoreError>;

    async fn delete(&self, usr: &User) -> Result<(), StoreError>;

    async fn query(
        &self,
        filter: &QueryFilter,
        order_by: &By,
        page: Page,
    ) -> Result<Vec<User>, StoreError>;

    async fn count(&self, filter: &QueryFilter) -> Result<usize, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no user has this id.
    async fn query_by_id(&self, user_id: Uuid) -> Result<User, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no user has this email.
    async fn query_by_email(&self, email: &Email) -> Result<User, StoreError>;
}
