//! In-process dispatcher that lets domains react to each other's actions
//! without importing each other.
//!
//! A domain registers a handler for `(domain, action)`; the owning domain calls
//! [`Delegate::call`] with a [`Data`] value and every registered handler runs,
//! in registration order, before the call returns.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Payload handed to every handler registered for `domain`/`action`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub domain: String,
    pub action: String,
    pub raw_params: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum DelegateError {
    #[error("action: {action} for domain: {domain} failed: {source}")]
    Handler {
        domain: String,
        action: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("action params: {0}")]
    Params(#[from] serde_json::Error),
}

type Handler = Arc<dyn Fn(Data) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Registry of handlers keyed by domain, then action.
#[derive(Default)]
pub struct Delegate {
    funcs: RwLock<HashMap<String, HashMap<String, Vec<Handler>>>>,
}

impl Delegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` to run whenever `domain` calls `action`.
    pub fn register<F, Fut>(&self, domain: &str, action: &str, f: F)
    where
        F: Fn(Data) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |data| f(data).boxed());
        self.funcs
            .write()
            .entry(domain.to_string())
            .or_default()
            .entry(action.to_string())
            .or_default()
            .push(handler);
    }

    /// Run every handler registered for `data.domain`/`data.action`.
    ///
    /// The first failing handler stops the call; later handlers do not run.
    pub async fn call(&self, data: Data) -> Result<(), DelegateError> {
        // The lock must not be held across the handler awaits.
        let handlers: Vec<Handler> = self
            .funcs
            .read()
            .get(&data.domain)
            .and_then(|actions| actions.get(&data.action))
            .cloned()
            .unwrap_or_default();

        debug!(
            domain = %data.domain,
            action = %data.action,
            handlers = handlers.len(),
            "delegate call"
        );

        for handler in handlers {
            handler(data.clone())
                .await
                .map_err(|source| DelegateError::Handler {
                    domain: data.domain.clone(),
                    action: data.action.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}
