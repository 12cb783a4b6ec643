// ABOUTME: Parsed webhook payload with its event type and typed accessors per event
// ABOUTME: Rejects payloads without a type; accessors return None for non-matching events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;
use terra_core::constants::{events, keys};
use terra_core::models::{
    Activity, Athlete, AuthData, Body, Daily, DeauthData, Menstruation, Nutrition, ReauthData,
    RequestProcessing, Sleep, User,
};
use terra_core::{TerraError, TerraResult};
use tracing::debug;

/// An inbound webhook body
///
/// Every payload carries a non-empty `type`. The typed accessors return
/// `None` unless the type matches theirs; list accessors on a matching type
/// return every element that parses, which may be none.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookPayload {
    event_type: String,
    raw: Value,
}

impl WebhookPayload {
    /// Parse a payload from raw request bytes
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PayloadMalformed`] for invalid JSON and
    /// [`TerraError::PayloadMissingType`] when `type` is absent or empty
    pub fn from_slice(body: &[u8]) -> TerraResult<Self> {
        let raw = serde_json::from_slice(body)
            .map_err(|source| TerraError::PayloadMalformed { source })?;
        Self::from_value(raw)
    }

    /// Wrap an already decoded JSON tree
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PayloadMissingType`] when `type` is absent, empty,
    /// or not a string
    pub fn from_value(raw: Value) -> TerraResult<Self> {
        let event_type = raw
            .get(keys::TYPE)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(TerraError::PayloadMissingType)?
            .to_owned();
        Ok(Self { event_type, raw })
    }

    /// Event type literal, e.g. `"sleep"`
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Entire decoded body
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Take ownership of the decoded body
    #[must_use]
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// User the event concerns, if present and parseable
    #[must_use]
    pub fn user(&self) -> Option<User> {
        parse_lenient(self.raw.get(keys::USER)?)
    }

    /// `auth` event
    #[must_use]
    pub fn as_auth(&self) -> Option<AuthData> {
        self.whole(events::AUTH)
    }

    /// `deauth` event
    #[must_use]
    pub fn as_deauth(&self) -> Option<DeauthData> {
        self.whole(events::DEAUTH)
    }

    /// `user_reauth` event; `None` unless both users parse
    #[must_use]
    pub fn as_reauth(&self) -> Option<ReauthData> {
        self.whole(events::USER_REAUTH)
    }

    /// `request_processing` event
    #[must_use]
    pub fn as_request_processing(&self) -> Option<RequestProcessing> {
        self.whole(events::REQUEST_PROCESSING)
    }

    /// `athlete` event
    #[must_use]
    pub fn as_athlete(&self) -> Option<Athlete> {
        if !self.is(events::ATHLETE) {
            return None;
        }
        parse_lenient(self.raw.get(keys::ATHLETE)?)
    }

    /// `activity` event records
    #[must_use]
    pub fn as_activity(&self) -> Option<Vec<Activity>> {
        self.records(events::ACTIVITY)
    }

    /// `body` event records
    #[must_use]
    pub fn as_body(&self) -> Option<Vec<Body>> {
        self.records(events::BODY)
    }

    /// `daily` event records
    #[must_use]
    pub fn as_daily(&self) -> Option<Vec<Daily>> {
        self.records(events::DAILY)
    }

    /// `menstruation` event records
    #[must_use]
    pub fn as_menstruation(&self) -> Option<Vec<Menstruation>> {
        self.records(events::MENSTRUATION)
    }

    /// `nutrition` event records
    #[must_use]
    pub fn as_nutrition(&self) -> Option<Vec<Nutrition>> {
        self.records(events::NUTRITION)
    }

    /// `sleep` event records
    #[must_use]
    pub fn as_sleep(&self) -> Option<Vec<Sleep>> {
        self.records(events::SLEEP)
    }

    fn is(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }

    fn whole<T: DeserializeOwned>(&self, event_type: &str) -> Option<T> {
        if !self.is(event_type) {
            return None;
        }
        parse_lenient(&self.raw)
    }

    fn records<T: DeserializeOwned>(&self, event_type: &str) -> Option<Vec<T>> {
        if !self.is(event_type) {
            return None;
        }
        let Some(Value::Array(items)) = self.raw.get(keys::DATA) else {
            return Some(Vec::new());
        };
        Some(items.iter().filter_map(parse_lenient).collect())
    }
}

impl FromStr for WebhookPayload {
    type Err = TerraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

impl TryFrom<Value> for WebhookPayload {
    type Error = TerraError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::from_value(raw)
    }
}

fn parse_lenient<T: DeserializeOwned>(node: &Value) -> Option<T> {
    match T::deserialize(node) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Could not parse webhook node into record");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_type_rejected() {
        let err = WebhookPayload::from_value(json!({"user": {"user_id": "u"}})).unwrap_err();
        assert!(matches!(err, TerraError::PayloadMissingType));
        let err = WebhookPayload::from_value(json!({"type": ""})).unwrap_err();
        assert!(matches!(err, TerraError::PayloadMissingType));
        let err = WebhookPayload::from_value(json!({"type": 5})).unwrap_err();
        assert!(matches!(err, TerraError::PayloadMissingType));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = WebhookPayload::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, TerraError::PayloadMalformed { .. }));
    }

    #[test]
    fn test_list_accessor_on_matching_type_without_data() {
        let payload: WebhookPayload = r#"{"type": "sleep"}"#.parse().unwrap();
        assert_eq!(payload.as_sleep(), Some(Vec::new()));
        assert!(payload.as_activity().is_none());
    }

    #[test]
    fn test_reauth_requires_both_users() {
        let payload = WebhookPayload::from_value(json!({
            "type": "user_reauth",
            "old_user": {"user_id": "old"},
            "new_user": {"user_id": "new", "provider": "OURA"}
        }))
        .unwrap();
        let reauth = payload.as_reauth().unwrap();
        assert_eq!(reauth.old_user.user_id, "old");
        assert_eq!(reauth.new_user.provider.as_deref(), Some("OURA"));

        let partial =
            WebhookPayload::from_value(json!({"type": "user_reauth", "old_user": {"user_id": "old"}}))
                .unwrap();
        assert!(partial.as_reauth().is_none());
    }
}
