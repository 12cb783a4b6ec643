// ABOUTME: Inbound Terra webhook handling
// ABOUTME: Signature verification, payload parsing, and handler dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra webhooks
//!
//! Terra pushes data to a developer endpoint as signed JSON. A typical
//! receiver reads the `terra-signature` header and the raw body, then calls
//! [`WebhookDispatcher::verify_and_dispatch`]. Event types:
//!
//! - `auth`, `deauth`, `user_reauth` - connection lifecycle
//! - `athlete` - profile updates
//! - `activity`, `body`, `daily`, `menstruation`, `nutrition`, `sleep` - data
//! - `request_processing` - a large request is being delivered in parts

/// Event routing to registered handlers
pub mod dispatcher;

/// Parsed payloads and typed accessors
pub mod payload;

/// HMAC signature verification
pub mod signature;

pub use dispatcher::{DiscardReason, DispatchOutcome, EventHandler, WebhookDispatcher};
pub use payload::WebhookPayload;
pub use signature::{sign_payload, verify_signature, SignatureVerifier};
