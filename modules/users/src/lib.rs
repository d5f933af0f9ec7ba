// === PUBLIC CONTRACT ===
// Other domains and the transport layer consume the `contract` module.
pub mod contract;

pub use contract::{business, error, filter, model, order};

pub mod config;

// === DOMAIN ===
// Core service, plugin composition and the ports it depends on.
pub mod domain;

pub use domain::plugin::new_business;

// === ADAPTERS ===
pub mod infra;
