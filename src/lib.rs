// ABOUTME: Main library entry point for the Terra health API client
// ABOUTME: Async API calls with response normalization, plus webhook verification and dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Terra Client
//!
//! Client for the Terra health data API and its webhooks.
//!
//! ## Features
//!
//! - **Async calls**: every endpoint returns a [`PendingCall`] that can be awaited,
//!   waited on from synchronous code, polled, or cancelled
//! - **Response normalization**: bodies become an [`ApiResult`] holding the raw JSON
//!   tree and the typed records, skipping individual records that do not parse
//! - **Webhooks**: HMAC signature verification and routing of payloads to handlers
//!   on a bounded worker pool
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use terra_client::{TerraClient, TerraConfig};
//!
//! fn main() -> terra_client::TerraResult<()> {
//!     let client = TerraClient::new(TerraConfig::new("api-key", "dev-id"))?;
//!     let user = client.user_from_id("a1b2c3");
//!
//!     let call = client.get_sleep_default(&user, Utc::now() - Duration::days(7), None)?;
//!     let result = call.blocking_wait()?;
//!     if let Some(nights) = result.parsed_data() {
//!         println!("{} nights of sleep", nights.len());
//!     }
//!
//!     client.shutdown();
//!     Ok(())
//! }
//! ```

/// Pending call handles
pub mod call;

/// Terra REST API client
pub mod client;

/// Environment and per-request configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Bounded worker pool
pub mod pool;

/// Response normalization and API results
pub mod response;

/// Webhook signatures, payloads, and dispatch
pub mod webhook;

pub use call::PendingCall;
pub use client::{ApiCall, TerraClient, WidgetSessionRequest};
pub use config::{RequestConfig, Samples, TerraConfig};
pub use pool::WorkerPool;
pub use response::{ApiResult, RawResponse, ResponseShape};
pub use terra_core::{constants, models, TerraError, TerraResult};
pub use webhook::{
    sign_payload, verify_signature, DiscardReason, DispatchOutcome, WebhookDispatcher,
    WebhookPayload,
};
