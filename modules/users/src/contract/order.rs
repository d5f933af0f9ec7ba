//! Order fields understood by user storage adapters.

use bus_sdk::order::{By, Direction};

pub const ORDER_BY_ID: &str = "user_id";
pub const ORDER_BY_NAME: &str = "name";
pub const ORDER_BY_EMAIL: &str = "email";
pub const ORDER_BY_ROLES: &str = "roles";
pub const ORDER_BY_ENABLED: &str = "enabled";

/// Externally visible order names and the field each maps to, for `By::parse`.
pub const ORDER_BY_FIELDS: &[(&str, &str)] = &[
    (ORDER_BY_ID, ORDER_BY_ID),
    (ORDER_BY_NAME, ORDER_BY_NAME),
    (ORDER_BY_EMAIL, ORDER_BY_EMAIL),
    (ORDER_BY_ROLES, ORDER_BY_ROLES),
    (ORDER_BY_ENABLED, ORDER_BY_ENABLED),
];

pub fn default_order_by() -> By {
    By::new(ORDER_BY_ID, Direction::Asc)
}
