// ABOUTME: Constants for the Terra REST API and webhook protocol
// ABOUTME: Defines base URL, auth headers, extraction keys, event type literals, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra API constants
//!
//! Reference: <https://docs.tryterra.co/reference>

// =============================================================================
// API
// =============================================================================

/// Base URL for Terra API v2
pub const TERRA_API_BASE_URL: &str = "https://api.tryterra.co/v2";

/// Header carrying the developer API key
pub const HEADER_API_KEY: &str = "X-API-Key";

/// Header carrying the developer ID
pub const HEADER_DEV_ID: &str = "dev-id";

/// Header carrying the webhook signature
pub const HEADER_SIGNATURE: &str = "terra-signature";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Worker pool threads per available CPU
pub const POOL_THREADS_PER_CPU: usize = 4;

/// Endpoint paths relative to the base URL
pub mod paths {
    /// All users registered under the developer ID
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    /// Single user lookup
    pub const USER_INFO: &str = "userInfo";
    /// Deauthenticate a user
    pub const DEAUTHENTICATE_USER: &str = "auth/deauthenticateUser";
    /// Widget session generation
    pub const GENERATE_WIDGET_SESSION: &str = "auth/generateWidgetSession";
    /// Direct authentication URL generation
    pub const AUTHENTICATE_USER: &str = "auth/authenticateUser";
    /// Supported provider listing
    pub const INTEGRATIONS: &str = "integrations";
    /// Athlete profile
    pub const ATHLETE: &str = "athlete";
    /// Activity data
    pub const ACTIVITY: &str = "activity";
    /// Body data
    pub const BODY: &str = "body";
    /// Daily data
    pub const DAILY: &str = "daily";
    /// Menstruation data
    pub const MENSTRUATION: &str = "menstruation";
    /// Nutrition data
    pub const NUTRITION: &str = "nutrition";
    /// Sleep data
    pub const SLEEP: &str = "sleep";
}

/// JSON fields under which endpoints nest their records
pub mod keys {
    /// Records for data endpoints
    pub const DATA: &str = "data";
    /// User list for `/subscriptions`
    pub const USERS: &str = "users";
    /// Single user for `/userInfo` and embedded users
    pub const USER: &str = "user";
    /// Athlete profile
    pub const ATHLETE: &str = "athlete";
    /// Webhook discriminator
    pub const TYPE: &str = "type";
    /// Human-readable status message
    pub const MESSAGE: &str = "message";
    /// Previous user on reauthentication
    pub const OLD_USER: &str = "old_user";
    /// Replacement user on reauthentication
    pub const NEW_USER: &str = "new_user";
}

// =============================================================================
// Webhook event types
// Reference: https://docs.tryterra.co/reference/webhooks#list-of-event-types
// =============================================================================

/// Webhook `type` literals
pub mod events {
    /// User connected through the widget
    pub const AUTH: &str = "auth";
    /// User disconnected
    pub const DEAUTH: &str = "deauth";
    /// User re-authenticated, replacing an older Terra user
    pub const USER_REAUTH: &str = "user_reauth";
    /// Athlete profile update
    pub const ATHLETE: &str = "athlete";
    /// Activity data
    pub const ACTIVITY: &str = "activity";
    /// Body data
    pub const BODY: &str = "body";
    /// Daily data
    pub const DAILY: &str = "daily";
    /// Menstruation data
    pub const MENSTRUATION: &str = "menstruation";
    /// Nutrition data
    pub const NUTRITION: &str = "nutrition";
    /// Sleep data
    pub const SLEEP: &str = "sleep";
    /// Large request accepted and being processed asynchronously
    pub const REQUEST_PROCESSING: &str = "request_processing";
}

// =============================================================================
// Environment variables
// =============================================================================

/// Environment variable names read by `from_env` constructors
pub mod env_config {
    /// Developer API key
    pub const API_KEY: &str = "TERRA_API_KEY";
    /// Developer ID
    pub const DEV_ID: &str = "TERRA_DEV_ID";
    /// Base URL override
    pub const API_BASE_URL: &str = "TERRA_API_BASE_URL";
    /// Request timeout override in seconds
    pub const TIMEOUT_SECS: &str = "TERRA_TIMEOUT_SECS";
    /// Worker pool size override
    pub const POOL_SIZE: &str = "TERRA_POOL_SIZE";
    /// Webhook signing secret
    pub const WEBHOOK_SECRET: &str = "TERRA_WEBHOOK_SECRET";
}
