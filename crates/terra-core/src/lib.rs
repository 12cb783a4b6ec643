// ABOUTME: Core types and constants for the Terra API client
// ABOUTME: Foundation crate with error taxonomy, protocol constants, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Terra Core
//!
//! Foundation crate providing shared types for the Terra client. It changes
//! infrequently, so the client crate rebuilds without recompiling the models.
//!
//! ## Modules
//!
//! - **errors**: `TerraError` and `TerraResult`
//! - **constants**: API paths, extraction keys, webhook event types, env var names
//! - **models**: typed records for responses and webhook payloads

/// Error taxonomy for calls, normalization, and webhooks
pub mod errors;

/// Protocol constants organized by concern
pub mod constants;

/// Terra data models
pub mod models;

pub use errors::{TerraError, TerraResult};
