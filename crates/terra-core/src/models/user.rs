// ABOUTME: Terra user records and lightweight user handles
// ABOUTME: Accepts both flat user objects and objects wrapping the user under a "user" field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A Terra user connected under your developer ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserRepr")]
pub struct User {
    /// Terra's user ID
    pub user_id: String,
    /// Provider the user connected (e.g. "GARMIN", "OURA")
    pub provider: Option<String>,
    /// Time of the last webhook Terra sent for this user
    pub last_webhook_update: Option<DateTime<FixedOffset>>,
    /// Scopes granted by the user, comma separated
    pub scopes: Option<String>,
    /// Your own identifier for the user, set when generating the auth session
    pub reference_id: Option<String>,
}

#[derive(Deserialize)]
struct UserFields {
    user_id: String,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    last_webhook_update: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    scopes: Option<String>,
    #[serde(default)]
    reference_id: Option<String>,
}

/// Terra sends users either flat or wrapped as `{"user": {...}}`
#[derive(Deserialize)]
#[serde(untagged)]
enum UserRepr {
    Flat(UserFields),
    Wrapped { user: UserFields },
}

impl From<UserRepr> for User {
    fn from(repr: UserRepr) -> Self {
        let (UserRepr::Flat(fields) | UserRepr::Wrapped { user: fields }) = repr;
        Self {
            user_id: fields.user_id,
            provider: fields.provider,
            last_webhook_update: fields.last_webhook_update,
            scopes: fields.scopes,
            reference_id: fields.reference_id,
        }
    }
}

/// Handle for a user known only by ID
///
/// Data requests only need the user ID, so a handle avoids a round trip to `/userInfo`.
/// Provider and last-update fields are filled in from users embedded in later responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUser {
    id: String,
    provider: Option<String>,
    last_webhook_update: Option<DateTime<FixedOffset>>,
}

impl PartialUser {
    /// Create a handle for the given Terra user ID
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider: None,
            last_webhook_update: None,
        }
    }

    /// Terra user ID
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Provider, once known
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Last webhook update, once known
    #[must_use]
    pub const fn last_webhook_update(&self) -> Option<DateTime<FixedOffset>> {
        self.last_webhook_update
    }

    /// Refresh provider metadata from a user embedded in a response
    ///
    /// Returns `false` without changes when the user belongs to someone else.
    pub fn refresh_from(&mut self, user: &User) -> bool {
        if user.user_id != self.id {
            return false;
        }
        if user.provider.is_some() {
            self.provider.clone_from(&user.provider);
        }
        if user.last_webhook_update.is_some() {
            self.last_webhook_update = user.last_webhook_update;
        }
        true
    }
}

impl From<&User> for PartialUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.clone(),
            provider: user.provider.clone(),
            last_webhook_update: user.last_webhook_update,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_user() {
        let user: User = serde_json::from_value(json!({
            "user_id": "foo",
            "provider": "bar",
            "last_webhook_update": "2022-01-01T00:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(user.user_id, "foo");
        assert_eq!(user.provider.as_deref(), Some("bar"));
        assert_eq!(
            user.last_webhook_update.map(|t| t.timestamp()),
            Some(1_640_995_200)
        );
    }

    #[test]
    fn test_wrapped_user() {
        let user: User = serde_json::from_value(json!({
            "status": "success",
            "user": {"user_id": "foo", "provider": "bar", "last_webhook_update": null}
        }))
        .unwrap();
        assert_eq!(user.user_id, "foo");
        assert!(user.last_webhook_update.is_none());
    }

    #[test]
    fn test_refresh_ignores_other_user() {
        let mut handle = PartialUser::new("abc");
        let other = User {
            user_id: "xyz".to_owned(),
            provider: Some("OURA".to_owned()),
            last_webhook_update: None,
            scopes: None,
            reference_id: None,
        };
        assert!(!handle.refresh_from(&other));
        assert!(handle.provider().is_none());
    }
}
