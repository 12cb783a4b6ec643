// ABOUTME: Routes verified webhook payloads to registered handlers on the worker pool
// ABOUTME: Exact event-type handlers win over the default handler; dispatch never waits for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Webhook dispatch
//!
//! The dispatcher holds the signing secret, a handler per event type, and an
//! optional default handler. [`WebhookDispatcher::dispatch`] parses a body and
//! hands the payload to the matching handler on the worker pool, returning as
//! soon as the job is queued. Payloads that cannot be parsed or have no
//! handler are logged and discarded.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use terra_core::constants::env_config;
use terra_core::{TerraError, TerraResult};
use tracing::{debug, info, warn};

use super::payload::WebhookPayload;
use super::signature::SignatureVerifier;
use crate::pool::WorkerPool;

/// Callback invoked with each dispatched payload
pub type EventHandler = Arc<dyn Fn(WebhookPayload) + Send + Sync>;

/// What happened to a dispatched body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler was queued on the worker pool
    Queued {
        /// Event type the handler was chosen for
        event_type: String,
    },
    /// The body was dropped without running any handler
    Discarded(DiscardReason),
}

/// Why a body was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Signature header did not verify
    BadSignature,
    /// Body was not JSON or had no `type`
    Malformed,
    /// No handler for the type and no default handler
    NoHandler,
}

/// Verifies, parses, and routes inbound webhooks
pub struct WebhookDispatcher {
    verifier: SignatureVerifier,
    handlers: DashMap<String, EventHandler>,
    default_handler: RwLock<Option<EventHandler>>,
    pool: Arc<WorkerPool>,
}

impl WebhookDispatcher {
    /// Create a dispatcher with its own default-sized worker pool
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolStart`] if the worker pool cannot start
    pub fn new(secret: &str) -> TerraResult<Self> {
        Ok(Self::with_pool(
            secret,
            Arc::new(WorkerPool::with_default_size()?),
        ))
    }

    /// Create a dispatcher that runs handlers on an existing pool
    #[must_use]
    pub fn with_pool(secret: &str, pool: Arc<WorkerPool>) -> Self {
        Self {
            verifier: SignatureVerifier::new(secret),
            handlers: DashMap::new(),
            default_handler: RwLock::new(None),
            pool,
        }
    }

    /// Create a dispatcher with the secret in `TERRA_WEBHOOK_SECRET`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::ConfigMissing`] when the variable is unset or empty
    pub fn from_env() -> TerraResult<Self> {
        let secret = env::var(env_config::WEBHOOK_SECRET)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(TerraError::ConfigMissing {
                key: env_config::WEBHOOK_SECRET,
            })?;
        Self::new(&secret)
    }

    /// Register the handler for one event type, replacing any earlier one
    pub fn register_handler<F>(&self, event_type: impl Into<String>, handler: F) -> &Self
    where
        F: Fn(WebhookPayload) + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        debug!(event_type = %event_type, "Registered webhook handler");
        self.handlers.insert(event_type, Arc::new(handler));
        self
    }

    /// Register the handler for event types without their own handler
    pub fn register_default_handler<F>(&self, handler: F) -> &Self
    where
        F: Fn(WebhookPayload) + Send + Sync + 'static,
    {
        *self
            .default_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
        debug!("Registered default webhook handler");
        self
    }

    /// Whether `header` signs `body` under this dispatcher's secret
    #[must_use]
    pub fn verify_signature(&self, header: &str, body: &[u8]) -> bool {
        self.verifier.verify(header, body)
    }

    /// Parse a body without dispatching it
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PayloadMalformed`] or [`TerraError::PayloadMissingType`]
    pub fn parse_payload(&self, body: &[u8]) -> TerraResult<WebhookPayload> {
        WebhookPayload::from_slice(body)
    }

    /// Parse `body` and queue the matching handler
    ///
    /// Returns once the handler is queued; it never waits for the handler
    /// to run. The signature is not checked here, see
    /// [`WebhookDispatcher::verify_and_dispatch`].
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`] after [`WebhookDispatcher::shutdown`]
    pub fn dispatch(&self, body: &[u8]) -> TerraResult<DispatchOutcome> {
        let payload = match WebhookPayload::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "Discarding webhook payload that could not be parsed");
                return Ok(DispatchOutcome::Discarded(DiscardReason::Malformed));
            }
        };

        let event_type = payload.event_type().to_owned();
        let Some(handler) = self.handler_for(&event_type) else {
            debug!(event_type = %event_type, "No handler registered for webhook event");
            return Ok(DispatchOutcome::Discarded(DiscardReason::NoHandler));
        };

        self.pool.execute(move || handler(payload))?;
        debug!(event_type = %event_type, "Queued webhook handler");
        Ok(DispatchOutcome::Queued { event_type })
    }

    /// Verify the signature, then dispatch
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`] after [`WebhookDispatcher::shutdown`]
    pub fn verify_and_dispatch(&self, header: &str, body: &[u8]) -> TerraResult<DispatchOutcome> {
        if !self.verify_signature(header, body) {
            warn!("Discarding webhook with invalid signature");
            return Ok(DispatchOutcome::Discarded(DiscardReason::BadSignature));
        }
        self.dispatch(body)
    }

    /// Worker pool running the handlers
    #[must_use]
    pub const fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Stop running handlers; later dispatches fail with `PoolShutDown`
    ///
    /// Returns `false` if the pool was already shut down.
    pub fn shutdown(&self) -> bool {
        let first = self.pool.shutdown();
        if first {
            info!("Webhook dispatcher shut down");
        }
        first
    }

    fn handler_for(&self, event_type: &str) -> Option<EventHandler> {
        if let Some(handler) = self.handlers.get(event_type) {
            return Some(Arc::clone(handler.value()));
        }
        self.default_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for WebhookDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<String> = self.handlers.iter().map(|e| e.key().clone()).collect();
        events.sort_unstable();
        f.debug_struct("WebhookDispatcher")
            .field("handlers", &events)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
