use async_trait::async_trait;
use bus_sdk::DelegateError;

/// Output port: publish domain events to subscribed domains (no knowledge of transport).
///
/// Returns once every subscriber has handled the event; a subscriber failure is
/// returned to the publisher.
#[async_trait]
pub trait EventPublisher<E>: Send + Sync + 'static
where
    E: Send + Sync + 'static,
{
    async fn publish(&self, event: &E) -> Result<(), DelegateError>;
}
