use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Predicates for `Query`/`Count`. The business core passes this through to
/// the storage port untouched; only storage adapters interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub id: Option<Uuid>,
    /// Substring match on the display name.
    pub name: Option<String>,
    /// Substring match on the email address.
    pub email: Option<String>,
    /// Inclusive lower bound on `date_created`.
    pub start_created_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date_created`.
    pub end_created_date: Option<DateTime<Utc>>,
}
