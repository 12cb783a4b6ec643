// ABOUTME: Typed Terra records used as parse targets for API responses and webhooks
// ABOUTME: Re-exports user, data, event, and response models under one namespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra data models
//!
//! These mirror Terra's JSON schemas. They are opaque targets for the response
//! normalizer and the webhook payload accessors; no behavior lives here beyond
//! deserialization.

/// Sub-structures shared by data records
pub mod common;
/// Activity, body, daily, menstruation, nutrition, and sleep records
pub mod data;
/// Webhook lifecycle event records
pub mod events;
/// Account and authentication endpoint records
pub mod responses;
/// Users and user handles
pub mod user;

pub use data::{Activity, Body, Daily, Menstruation, Nutrition, Sleep};
pub use events::{AuthData, DeauthData, ReauthData, RequestProcessing};
pub use responses::{Athlete, AuthenticationResponse, ProvidersResponse, WidgetSession};
pub use user::{PartialUser, User};
