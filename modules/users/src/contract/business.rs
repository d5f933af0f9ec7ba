use std::sync::Arc;

use async_trait::async_trait;
use bus_sdk::{By, CommitRollbacker, Page};
use uuid::Uuid;

use crate::contract::{
    error::UserBusError,
    filter::QueryFilter,
    model::{Email, NewUser, UpdateUser, User},
};

/// Public API of the user business layer.
///
/// The core service implements it, and so does every plugin wrapped around
/// the core, so callers never know how many layers sit in front of the core.
#[async_trait]
pub trait Business: Send + Sync {
    /// Build an independent instance whose storage calls run inside `tx`.
    ///
    /// The caller keeps ownership of `tx` and decides whether to commit or roll back.
    fn new_with_tx(&self, tx: Arc<dyn CommitRollbacker>) -> Result<Arc<dyn Business>, UserBusError>;

    /// Create a user; id, timestamps and the password hash are assigned here.
    async fn create(&self, actor_id: Uuid, nu: NewUser) -> Result<User, UserBusError>;

    /// Merge the fields present in `uu` into the caller's snapshot `usr` and persist it.
    async fn update(&self, actor_id: Uuid, usr: User, uu: UpdateUser) -> Result<User, UserBusError>;

    /// Delete `usr` and notify the domains subscribed to user deletion.
    async fn delete(&self, actor_id: Uuid, usr: User) -> Result<(), UserBusError>;

    async fn query(
        &self,
        filter: QueryFilter,
        order_by: By,
        page: Page,
    ) -> Result<Vec<User>, UserBusError>;

    async fn count(&self, filter: QueryFilter) -> Result<usize, UserBusError>;

    async fn query_by_id(&self, user_id: Uuid) -> Result<User, UserBusError>;

    async fn query_by_email(&self, email: &Email) -> Result<User, UserBusError>;

    /// Check `password` against the stored hash for `email`.
    ///
    /// An unknown email and a wrong password fail identically with
    /// [`UserBusError::AuthenticationFailure`].
    async fn authenticate(&self, email: &Email, password: &str) -> Result<User, UserBusError>;
}

/// Wraps one `Business` layer in another.
pub type Plugin = Box<dyn FnOnce(Arc<dyn Business>) -> Arc<dyn Business> + Send>;

/// Box a closure as a [`Plugin`].
pub fn plugin<F>(f: F) -> Plugin
where
    F: FnOnce(Arc<dyn Business>) -> Arc<dyn Business> + Send + 'static,
{
    Box::new(f)
}
