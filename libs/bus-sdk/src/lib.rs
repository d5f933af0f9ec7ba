//! Value objects and helpers shared by the business domains.
//!
//! Nothing in here knows about a particular domain: ordering and paging are
//! handed to storage adapters untouched, the delegate lets one domain react to
//! another domain's events, and `tx` describes the unit-of-work handle that a
//! layer above the business core owns.

pub mod delegate;
pub mod order;
pub mod page;
pub mod tx;

pub use delegate::{Data, Delegate, DelegateError};
pub use order::{By, Direction, OrderError};
pub use page::{Page, PageError};
pub use tx::{CommitRollbacker, TxError};

#[cfg(test)]
mod tests;
