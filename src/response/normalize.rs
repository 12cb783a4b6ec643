// ABOUTME: Turns a raw HTTP response into a JSON tree plus a typed list of records
// ABOUTME: Tolerates per-element parse failures in arrays and extracts any embedded user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::any::type_name;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use terra_core::constants::keys;
use terra_core::models::{PartialUser, User};
use terra_core::{TerraError, TerraResult};
use tracing::debug;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Option<Bytes>,
}

impl RawResponse {
    /// Build from a status code and optional body
    #[must_use]
    pub const fn new(status: u16, body: Option<Bytes>) -> Self {
        Self { status, body }
    }

    /// Build from a status code and JSON text
    #[must_use]
    pub fn json(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, Some(body.into()))
    }

    /// Read status and body off a `reqwest` response
    ///
    /// An empty body is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::Transport`] if reading the body fails
    pub async fn read(response: reqwest::Response) -> TerraResult<Self> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(Self::new(status, (!body.is_empty()).then_some(body)))
    }

    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Where an endpoint's records live in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Records sit under this top-level key, as an array or a single object
    Field(&'static str),
    /// The whole body is one record
    WholeBody,
    /// The endpoint returns no records; only the raw tree is kept
    NoContent,
}

/// Output of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    /// Entire decoded body
    pub raw_body: Value,
    /// Typed records, absent for non-2xx responses or a missing key
    pub parsed: Option<Vec<T>>,
    /// User embedded at the top level, when a user context was supplied
    pub user: Option<User>,
}

/// Decode and extract typed records from a response
///
/// The whole body is always decoded into a JSON tree. Typed extraction and
/// the embedded user only happen for 2xx responses that expect content.
/// Under [`ResponseShape::Field`], an array yields every element that parses
/// (the rest are skipped and logged at debug), a single object yields one
/// record or fails, and a missing or null key yields no records at all.
///
/// # Errors
///
/// - [`TerraError::BodyMissing`] when there is no body
/// - [`TerraError::BodyMalformed`] when the body is not JSON
/// - [`TerraError::BodyParsing`] when a singular record does not fit `T`
pub fn normalize<T: DeserializeOwned>(
    response: RawResponse,
    shape: ResponseShape,
    user_context: Option<&PartialUser>,
) -> TerraResult<Normalized<T>> {
    let success = response.is_success();
    let body = response.body.ok_or(TerraError::BodyMissing)?;
    let raw_body: Value =
        serde_json::from_slice(&body).map_err(|source| TerraError::BodyMalformed { source })?;

    if !success || shape == ResponseShape::NoContent {
        return Ok(Normalized {
            raw_body,
            parsed: None,
            user: None,
        });
    }

    let user = user_context.and_then(|_| embedded_user(&raw_body));

    let parsed = match shape {
        ResponseShape::NoContent => None,
        ResponseShape::WholeBody => Some(vec![parse_single(&raw_body)?]),
        ResponseShape::Field(key) => match raw_body.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(parse_tolerant(items)),
            Some(node) => Some(vec![parse_single(node)?]),
        },
    };

    Ok(Normalized {
        raw_body,
        parsed,
        user,
    })
}

fn parse_single<T: DeserializeOwned>(node: &Value) -> TerraResult<T> {
    T::deserialize(node).map_err(|source| TerraError::BodyParsing {
        target: short_type_name::<T>(),
        source,
    })
}

fn parse_tolerant<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(
                    index,
                    target = short_type_name::<T>(),
                    error = %e,
                    "Skipping array element that does not match record type"
                );
                None
            }
        })
        .collect()
}

fn embedded_user(raw_body: &Value) -> Option<User> {
    let node = raw_body.get(keys::USER)?;
    match User::deserialize(node) {
        Ok(user) => Some(user),
        Err(e) => {
            debug!(error = %e, "Ignoring embedded user that does not parse");
            None
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
