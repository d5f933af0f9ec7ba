use std::sync::Arc;

use async_trait::async_trait;
use bus_sdk::{By, CommitRollbacker, Page};
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::{
    business::Business,
    error::{LookupKey, UserBusError},
    filter::QueryFilter,
    model::{Email, NewUser, UpdateUser, User},
};
use crate::domain::events::{UserDomainEvent, ACTION_DELETED};
use crate::domain::password;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::Storer;

/// Core business service for user accounts.
/// Depends only on the storage and event ports, not on infra types, and holds
/// no state of its own between calls.
#[derive(Clone)]
pub struct Service {
    storer: Arc<dyn Storer>,
    events: Arc<dyn EventPublisher<UserDomainEvent>>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(storer: Arc<dyn Storer>, events: Arc<dyn EventPublisher<UserDomainEvent>>) -> Self {
        Self { storer, events }
    }
}

#[async_trait]
impl Business for Service {
    fn new_with_tx(&self, tx: Arc<dyn CommitRollbacker>) -> Result<Arc<dyn Business>, UserBusError> {
        let storer = self
            .storer
            .new_with_tx(tx)
            .map_err(|e| UserBusError::store("newwithtx", e))?;

        Ok(Arc::new(Self {
            storer,
            events: self.events.clone(),
        }))
    }

    #[instrument(
        name = "business.userbus.create",
        skip_all,
        fields(actor_id = %actor_id, email = %nu.email),
        err
    )]
    async fn create(&self, actor_id: Uuid, nu: NewUser) -> Result<User, UserBusError> {
        let hash = password::hash_password(&nu.password).map_err(UserBusError::Hashing)?;

        let now = Utc::now();
        let usr = User {
            id: Uuid::new_v4(),
            name: nu.name,
            email: nu.email,
            password_hash: hash,
            roles: nu.roles,
            department: nu.department,
            enabled: true,
            date_created: now,
            date_updated: now,
        };

        self.storer
            .create(&usr)
            .await
            .map_err(|e| UserBusError::store("create", e))?;

        info!(user_id = %usr.id, "user created");
        Ok(usr)
    }

    #[instrument(
        name = "business.userbus.update",
        skip_all,
        fields(actor_id = %actor_id, user_id = %usr.id),
        err
    )]
    async fn update(&self, actor_id: Uuid, mut usr: User, uu: UpdateUser) -> Result<User, UserBusError> {
        if let Some(name) = uu.name {
            usr.name = name;
        }

        if let Some(email) = uu.email {
            usr.email = email;
        }

        if let Some(roles) = uu.roles {
            usr.roles = roles;
        }

        if let Some(password) = uu.password {
            usr.password_hash =
                password::hash_password(&password).map_err(UserBusError::Hashing)?;
        }

        if let Some(department) = uu.department {
            usr.department = Some(department);
        }

        if let Some(enabled) = uu.enabled {
            usr.enabled = enabled;
        }

        usr.date_updated = Utc::now();

        self.storer
            .update(&usr)
            .await
            .map_err(|e| UserBusError::store("update", e))?;

        info!("user updated");
        Ok(usr)
    }

    #[instrument(
        name = "business.userbus.delete",
        skip_all,
        fields(actor_id = %actor_id, user_id = %usr.id),
        err
    )]
    async fn delete(&self, actor_id: Uuid, usr: User) -> Result<(), UserBusError> {
        self.storer
            .delete(&usr)
            .await
            .map_err(|e| UserBusError::store("delete", e))?;

        // Deletion is complete only once subscribed domains have reacted. The
        // storage delete above stays applied if they fail; callers needing
        // atomicity run this through `new_with_tx` and roll back.
        let event = UserDomainEvent::Deleted {
            id: usr.id,
            at: Utc::now(),
        };
        self.events
            .publish(&event)
            .await
            .map_err(|source| UserBusError::Notification {
                action: ACTION_DELETED,
                source,
            })?;

        info!("user deleted");
        Ok(())
    }

    #[instrument(
        name = "business.userbus.query",
        skip_all,
        fields(order_by = %order_by, page = page.number(), rows = page.rows_per_page()),
        err
    )]
    async fn query(
        &self,
        filter: QueryFilter,
        order_by: By,
        page: Page,
    ) -> Result<Vec<User>, UserBusError> {
        let users = self
            .storer
            .query(&filter, &order_by, page)
            .await
            .map_err(|e| UserBusError::store("query", e))?;

        debug!("queried {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "business.userbus.count", skip_all, err)]
    async fn count(&self, filter: QueryFilter) -> Result<usize, UserBusError> {
        self.storer
            .count(&filter)
            .await
            .map_err(|e| UserBusError::store("count", e))
    }

    #[instrument(name = "business.userbus.querybyid", skip_all, fields(user_id = %user_id), err)]
    async fn query_by_id(&self, user_id: Uuid) -> Result<User, UserBusError> {
        self.storer
            .query_by_id(user_id)
            .await
            .map_err(|e| UserBusError::lookup(LookupKey::Id(user_id), e))
    }

    #[instrument(name = "business.userbus.querybyemail", skip_all, fields(email = %email), err)]
    async fn query_by_email(&self, email: &Email) -> Result<User, UserBusError> {
        self.storer
            .query_by_email(email)
            .await
            .map_err(|e| UserBusError::lookup(LookupKey::Email(email.clone()), e))
    }

    #[instrument(
        name = "business.userbus.authenticate",
        skip_all,
        fields(email = %email),
        err
    )]
    async fn authenticate(&self, email: &Email, password: &str) -> Result<User, UserBusError> {
        let usr = match self.query_by_email(email).await {
            Ok(usr) => usr,
            Err(e) if e.is_not_found() => {
                debug!("unknown email");
                // Same bcrypt work as a mismatch, so timing does not reveal the miss.
                password::verify_dummy(password);
                return Err(UserBusError::AuthenticationFailure);
            }
            Err(e) => return Err(e),
        };

        if !password::verify_password(password, &usr.password_hash) {
            debug!("password mismatch");
            return Err(UserBusError::AuthenticationFailure);
        }

        Ok(usr)
    }
}
