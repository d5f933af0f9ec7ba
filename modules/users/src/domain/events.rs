//! Events the user domain announces to other domains.

use bus_sdk::{Data, DelegateError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DOMAIN_NAME: &str = "user";

pub const ACTION_DELETED: &str = "deleted";

/// Parameters carried by the `deleted` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDeletedParams {
    pub user_id: Uuid,
}

impl ActionDeletedParams {
    /// Decode the params of a `deleted` action received by a subscriber.
    pub fn from_data(data: &Data) -> Result<Self, DelegateError> {
        Ok(serde_json::from_value(data.raw_params.clone())?)
    }
}

/// Delegate payload announcing that `user_id` was deleted.
pub fn action_deleted_data(user_id: Uuid) -> Data {
    Data {
        domain: DOMAIN_NAME.to_string(),
        action: ACTION_DELETED.to_string(),
        raw_params: serde_json::json!({ "user_id": user_id }),
    }
}

/// Transport-agnostic domain event.
#[derive(Debug, Clone)]
pub enum UserDomainEvent {
    Deleted { id: Uuid, at: DateTime<Utc> },
}

impl UserDomainEvent {
    pub fn action(&self) -> &'static str {
        match self {
            UserDomainEvent::Deleted { .. } => ACTION_DELETED,
        }
    }

    pub fn to_delegate_data(&self) -> Data {
        match self {
            UserDomainEvent::Deleted { id, .. } => action_deleted_data(*id),
        }
    }
}
