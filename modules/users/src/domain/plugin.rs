//! Assembly of the business chain: core service wrapped by plugins.

use std::sync::Arc;

use crate::contract::business::{Business, Plugin};
use crate::domain::events::UserDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::Storer;
use crate::domain::service::Service;

/// Construct the user business API with `plugins` wrapped around the core.
///
/// The first listed plugin ends up outermost: it runs first on the way in and
/// last on the way out. `None` entries are skipped.
pub fn new_business(
    events: Arc<dyn EventPublisher<UserDomainEvent>>,
    storer: Arc<dyn Storer>,
    plugins: impl IntoIterator<Item = Option<Plugin>>,
) -> Arc<dyn Business> {
    let core: Arc<dyn Business> = Arc::new(Service::new(storer, events));
    wrap(core, plugins)
}

/// Fold `plugins` right to left over `inner`.
pub fn wrap(
    inner: Arc<dyn Business>,
    plugins: impl IntoIterator<Item = Option<Plugin>>,
) -> Arc<dyn Business> {
    let plugins: Vec<Option<Plugin>> = plugins.into_iter().collect();

    plugins
        .into_iter()
        .rev()
        .flatten()
        .fold(inner, |inner, plugin| plugin(inner))
}
