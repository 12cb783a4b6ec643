// ABOUTME: Webhook-only records for connection lifecycle and async processing events
// ABOUTME: Auth, deauth, reauth, and request_processing payload shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::user::User;

/// Sent when a user finishes (or fails) the authentication flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Connected user, absent when authentication failed
    pub user: Option<User>,
    /// "success" or "error"
    pub status: Option<String>,
    /// Your reference ID for the user
    pub reference_id: Option<String>,
    /// Widget session the user authenticated through
    pub widget_session_id: Option<String>,
    /// Failure message
    pub message: Option<String>,
    /// Failure reason code
    pub reason: Option<String>,
}

/// Sent when a user disconnects or access is revoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeauthData {
    /// User that was disconnected
    pub user: Option<User>,
    /// Status of the event
    pub status: Option<String>,
    /// Explanation from Terra
    pub message: Option<String>,
}

/// Sent when a user authenticates again and receives a new Terra user ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReauthData {
    /// Previous user, no longer valid
    pub old_user: User,
    /// Replacement user
    pub new_user: User,
}

/// Sent when a large data request will be delivered in multiple webhooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestProcessing {
    /// User the data belongs to
    pub user: Option<User>,
    /// Explanation from Terra
    pub message: Option<String>,
    /// Status of the request
    pub status: Option<String>,
    /// Terra's reference for the request, repeated on each delivery
    pub reference: Option<String>,
}
