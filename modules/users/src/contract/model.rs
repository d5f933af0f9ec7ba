use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Persisted user account. Carries the password hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub department: Option<String>,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Data for creating a new user. Id and timestamps are assigned by the business core.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub roles: Vec<Role>,
    pub department: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("roles", &self.roles)
            .field("department", &self.department)
            .finish()
    }
}

/// Partial update for a user; `None` leaves the field untouched.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub roles: Option<Vec<Role>>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub enabled: Option<bool>,
}

impl fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .field("department", &self.department)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid email address: '{0}'")]
pub struct EmailError(pub String);

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Email(String);

impl Email {
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();

        // The syntax check alone accepts single-label domains such as `localhost`.
        let dotted = s
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'));
        if !dotted || !s.validate_email() {
            return Err(EmailError(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: '{0}'")]
pub struct RoleError(pub String);

/// Role tag consulted by authorization layers above the business core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn parse(s: &str) -> Result<Self, RoleError> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(RoleError(other.to_string())),
        }
    }

    /// Parse a list of role names, failing on the first unknown one.
    pub fn parse_many<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<Self>, RoleError> {
        names.into_iter().map(Self::parse).collect()
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
