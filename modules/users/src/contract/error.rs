use std::fmt;

use bus_sdk::DelegateError;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::Email;
use crate::domain::repo::StoreError;

/// Which lookup failed, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(Uuid),
    Email(Email),
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "userID[{id}]"),
            LookupKey::Email(email) => write!(f, "email[{email}]"),
        }
    }
}

/// Stable classification of a [`UserBusError`], independent of how many
/// layers wrapped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    UniqueEmail,
    AuthenticationFailure,
    Hashing,
    Notification,
    Storage,
}

/// Errors returned by every `Business` operation.
///
/// Messages carry a short operation prefix; callers branch on [`UserBusError::kind`].
#[derive(Error, Debug)]
pub enum UserBusError {
    #[error("query: {key}: user not found")]
    NotFound { key: LookupKey },

    #[error("{op}: email is not unique")]
    UniqueEmail { op: &'static str },

    #[error("authentication failed")]
    AuthenticationFailure,

    #[error("generatefrompassword: {0}")]
    Hashing(#[source] bcrypt::BcryptError),

    #[error("failed to execute `{action}` action: {source}")]
    Notification {
        action: &'static str,
        #[source]
        source: DelegateError,
    },

    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl UserBusError {
    /// Wrap a storage failure for operation `op`.
    pub fn store(op: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::UniqueEmail => Self::UniqueEmail { op },
            source => Self::Storage { op, source },
        }
    }

    /// Wrap a failed single-user lookup, keeping the key that missed.
    pub fn lookup(key: LookupKey, source: StoreError) -> Self {
        match source {
            StoreError::NotFound => Self::NotFound { key },
            source => Self::store("query", source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UniqueEmail { .. } => ErrorKind::UniqueEmail,
            Self::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            Self::Hashing(_) => ErrorKind::Hashing,
            Self::Notification { .. } => ErrorKind::Notification,
            Self::Storage {
                source: StoreError::NotFound,
                ..
            } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
