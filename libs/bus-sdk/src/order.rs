//! Ordering value object handed through to storage adapters.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Result<Self, OrderError> {
        match s.trim() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            other => Err(OrderError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("unknown order: {0}")]
    UnknownField(String),

    #[error("unknown direction: {0}")]
    UnknownDirection(String),
}

/// A single sort key: the storage field name plus a direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct By {
    pub field: String,
    pub direction: Direction,
}

impl By {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parse `"field"` or `"field,DESC"` coming from a request.
    ///
    /// `mappings` translates the externally visible name into the field name the
    /// storage adapter understands; names without a mapping are rejected.
    /// Blank input yields `default`.
    pub fn parse(mappings: &[(&str, &str)], order_by: &str, default: By) -> Result<Self, OrderError> {
        if order_by.trim().is_empty() {
            return Ok(default);
        }

        let parts: Vec<&str> = order_by.split(',').collect();
        let requested = parts[0].trim();
        let field = mappings
            .iter()
            .find(|(name, _)| *name == requested)
            .map(|(_, field)| *field)
            .ok_or_else(|| OrderError::UnknownField(requested.to_string()))?;

        match parts.len() {
            1 => Ok(By::new(field, Direction::Asc)),
            2 => Ok(By::new(field, Direction::parse(parts[1])?)),
            _ => Err(OrderError::UnknownField(order_by.to_string())),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}
