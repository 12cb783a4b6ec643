// ABOUTME: Records returned by Terra's account and authentication endpoints
// ABOUTME: Athlete profile, provider listing, widget session, and authentication URL responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Athlete profile as reported by the user's provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Gender
    pub gender: Option<String>,
    /// Sex
    pub sex: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<String>,
    /// Free-text biography
    pub bio: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Age in years
    pub age: Option<i32>,
}

/// Providers supported by Terra
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersResponse {
    /// Status of the request
    pub status: Option<String>,
    /// Providers connectable through the REST API
    pub providers: Option<Vec<String>>,
    /// Providers only connectable through the mobile SDKs
    pub sdk_providers: Option<Vec<String>>,
}

/// Authentication widget session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSession {
    /// Status of the request
    pub status: Option<String>,
    /// Session ID
    pub session_id: Option<String>,
    /// URL to send the user to
    pub url: Option<String>,
    /// Seconds until the session expires
    pub expires_in: Option<u64>,
}

/// Direct authentication URL for a single provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    /// Status of the request
    pub status: Option<String>,
    /// URL to send the user to
    pub auth_url: Option<String>,
    /// Terra user ID assigned to the pending connection
    pub user_id: Option<String>,
}
