//! Event port backed by the in-process delegate.

use async_trait::async_trait;
use bus_sdk::{Delegate, DelegateError};

use crate::domain::events::UserDomainEvent;
use crate::domain::ports::EventPublisher;

#[async_trait]
impl EventPublisher<UserDomainEvent> for Delegate {
    async fn publish(&self, event: &UserDomainEvent) -> Result<(), DelegateError> {
        self.call(event.to_delegate_data()).await
    }
}
