pub mod events;
pub mod password;
pub mod plugin;
pub mod ports;
pub mod repo;
pub mod service;
