// ABOUTME: Result of one completed Terra API call
// ABOUTME: Status, raw JSON tree, typed records, and the user embedded in the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::DeserializeOwned;
use serde_json::Value;
use terra_core::constants::keys;
use terra_core::models::{PartialUser, User};
use terra_core::TerraResult;

use super::normalize::{normalize, Normalized, RawResponse, ResponseShape};

/// Outcome of an API call that returned a body
///
/// Non-2xx responses still produce an `ApiResult`: check
/// [`ApiResult::is_successful`] and read the error payload from
/// [`ApiResult::raw_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    status_code: u16,
    raw_body: Value,
    parsed: Option<Vec<T>>,
    user: Option<User>,
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// Normalize a raw response into a result
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`normalize`]
    pub fn from_response(
        response: RawResponse,
        shape: ResponseShape,
        user_context: Option<&PartialUser>,
    ) -> TerraResult<Self> {
        let status_code = response.status();
        let Normalized {
            raw_body,
            parsed,
            user,
        } = normalize(response, shape, user_context)?;
        Ok(Self {
            status_code,
            raw_body,
            parsed,
            user,
        })
    }
}

impl<T> ApiResult<T> {
    /// HTTP status code
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.status_code >= 200 && self.status_code < 300
    }

    /// Entire decoded body
    #[must_use]
    pub const fn raw_body(&self) -> &Value {
        &self.raw_body
    }

    /// Typed records
    ///
    /// `None` for non-2xx responses and when the extraction key was absent.
    /// `Some(&[])` when the key held an empty array.
    #[must_use]
    pub fn parsed_data(&self) -> Option<&[T]> {
        self.parsed.as_deref()
    }

    /// Take ownership of the typed records
    #[must_use]
    pub fn into_parsed_data(self) -> Option<Vec<T>> {
        self.parsed
    }

    /// First typed record, for endpoints that return exactly one
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.parsed.as_ref().and_then(|records| records.first())
    }

    /// User embedded in the response
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The body's `type` field, if any
    #[must_use]
    pub fn response_type(&self) -> Option<&str> {
        self.raw_body.get(keys::TYPE).and_then(Value::as_str)
    }

    /// The body's `message` field, usually set on errors
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.raw_body.get(keys::MESSAGE).and_then(Value::as_str)
    }
}
