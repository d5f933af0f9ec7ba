//! Shared fixtures for the users integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bus_sdk::{By, CommitRollbacker, Delegate, DelegateError, Page};
use parking_lot::Mutex;
use uuid::Uuid;

use users::contract::{Business, Email, NewUser, QueryFilter, Role, User};
use users::domain::events::UserDomainEvent;
use users::domain::ports::EventPublisher;
use users::domain::repo::{StoreError, Storer};
use users::infra::storage::InMemoryUserStore;

pub const ADA_PASSWORD: &str = "s3cret!";

pub fn email(s: &str) -> Email {
    Email::parse(s).expect("valid email")
}

pub fn new_user(name: &str, address: &str, password: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email(address),
        password: password.to_string(),
        roles: vec![Role::User],
        department: None,
    }
}

pub fn ada() -> NewUser {
    new_user("Ada", "ada@x.io", ADA_PASSWORD)
}

pub fn actor() -> Uuid {
    Uuid::new_v4()
}

/// Core business wired to a fresh in-memory store and delegate, no plugins.
pub struct Fixture {
    pub bus: Arc<dyn Business>,
    pub store: InMemoryUserStore,
    pub delegate: Arc<Delegate>,
}

pub fn fixture() -> Fixture {
    let store = InMemoryUserStore::new();
    let delegate = Arc::new(Delegate::new());
    let bus = users::new_business(delegate.clone(), Arc::new(store.clone()), []);
    Fixture {
        bus,
        store,
        delegate,
    }
}

/// Event port that always fails, standing in for a broken subscriber.
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher<UserDomainEvent> for FailingPublisher {
    async fn publish(&self, event: &UserDomainEvent) -> Result<(), DelegateError> {
        Err(DelegateError::Handler {
            domain: "product".to_string(),
            action: event.action().to_string(),
            source: anyhow::anyhow!("subscriber unavailable"),
        })
    }
}

/// Storage wrapper that appends `tag` to a shared log on every create.
pub struct LoggingStore {
    pub inner: Arc<dyn Storer>,
    pub log: Arc<Mutex<Vec<String>>>,
    pub tag: &'static str,
}

#[async_trait]
impl Storer for LoggingStore {
    fn new_with_tx(&self, tx: Arc<dyn CommitRollbacker>) -> Result<Arc<dyn Storer>, StoreError> {
        Ok(Arc::new(LoggingStore {
            inner: self.inner.new_with_tx(tx)?,
            log: self.log.clone(),
            tag: self.tag,
        }))
    }

    async fn create(&self, usr: &User) -> Result<(), StoreError> {
        self.log.lock().push(self.tag.to_string());
        self.inner.create(usr).await
    }

    async fn update(&self, usr: &User) -> Result<(), StoreError> {
        self.inner.update(usr).await
    }

    async fn delete(&self, usr: &User) -> Result<(), StoreError> {
        self.inner.delete(usr).await
    }

    async fn query(
        &self,
        filter: &QueryFilter,
        order_by: &By,
        page: Page,
    ) -> Result<Vec<User>, StoreError> {
        self.inner.query(filter, order_by, page).await
    }

    async fn count(&self, filter: &QueryFilter) -> Result<usize, StoreError> {
        self.inner.count(filter).await
    }

    async fn query_by_id(&self, user_id: Uuid) -> Result<User, StoreError> {
        self.inner.query_by_id(user_id).await
    }

    async fn query_by_email(&self, email: &Email) -> Result<User, StoreError> {
        self.inner.query_by_email(email).await
    }
}
