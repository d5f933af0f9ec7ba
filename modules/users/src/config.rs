use bus_sdk::{By, OrderError, Page, PageError};
use serde::{Deserialize, Serialize};

use crate::contract::order::{default_order_by, ORDER_BY_FIELDS};

/// Configuration for the users module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    #[serde(default = "default_rows_per_page")]
    pub default_rows_per_page: u32,
    #[serde(default = "default_max_rows_per_page")]
    pub max_rows_per_page: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_rows_per_page: default_rows_per_page(),
            max_rows_per_page: default_max_rows_per_page(),
        }
    }
}

impl UsersConfig {
    /// Build a `Page` from raw request values within the configured limits.
    pub fn page(&self, page: &str, rows: &str) -> Result<Page, PageError> {
        Page::parse(page, rows, self.default_rows_per_page, self.max_rows_per_page)
    }

    /// Build an order from a raw `"field[,DIRECTION]"` request value.
    pub fn order_by(&self, order_by: &str) -> Result<By, OrderError> {
        By::parse(ORDER_BY_FIELDS, order_by, default_order_by())
    }
}

fn default_rows_per_page() -> u32 {
    10
}

fn default_max_rows_per_page() -> u32 {
    100
}
