pub mod business;
pub mod error;
pub mod filter;
pub mod model;
pub mod order;

pub use business::{plugin, Business, Plugin};
pub use error::{ErrorKind, LookupKey, UserBusError};
pub use filter::QueryFilter;
pub use model::{Email, EmailError, NewUser, Role, RoleError, UpdateUser, User};
