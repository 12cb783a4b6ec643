// ABOUTME: Error taxonomy for Terra API calls, response normalization, and webhook handling
// ABOUTME: Structured thiserror variants that separate fatal shape errors from local skips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra client errors
//!
//! Only conditions that break a caller's explicit request surface here. Per-item
//! problems (a malformed array element, an unknown webhook type, a missing handler)
//! are absorbed where they happen and logged instead.

use std::time::Duration;

/// Result alias used throughout the Terra client
pub type TerraResult<T> = Result<T, TerraError>;

/// Errors produced by the Terra client
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TerraError {
    /// The underlying HTTP call failed before a response was received
    #[cfg(feature = "transport-errors")]
    #[error("Transport error: {source}")]
    Transport {
        /// Underlying HTTP client error
        #[from]
        source: reqwest::Error,
    },

    /// The response carried no body
    #[error("No body returned in response")]
    BodyMissing,

    /// The response body was not valid JSON
    #[error("Response body is not valid JSON")]
    BodyMalformed {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A singular object under the extraction key could not be parsed into the target type
    #[error("Failed to parse response body into {target}")]
    BodyParsing {
        /// Name of the target record type
        target: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Inbound webhook bytes were not valid JSON
    #[error("Webhook payload is not valid JSON")]
    PayloadMalformed {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Inbound webhook payload has no usable `type` field
    #[error("Webhook payload is missing the 'type' field")]
    PayloadMissingType,

    /// The pending call was cancelled before it resolved
    #[error("Call was cancelled")]
    Cancelled,

    /// Waiting on a pending call exceeded the caller's deadline
    #[error("Timed out after {after:?} waiting for call")]
    Timeout {
        /// How long the caller waited
        after: Duration,
    },

    /// The worker pool could not start its threads
    #[error("Failed to start worker pool: {source}")]
    PoolStart {
        /// Underlying I/O error from the runtime builder
        #[source]
        source: std::io::Error,
    },

    /// The task driving a call ended without producing a result
    #[error("Call ended without producing a result")]
    Abandoned,

    /// The worker pool has been shut down and accepts no more work
    #[error("Worker pool has been shut down")]
    PoolShutDown,

    /// The result of a pending call was already taken by an earlier wait
    #[error("Call result was already consumed")]
    ResultConsumed,

    /// A required configuration value is missing
    #[error("Missing configuration: {key}")]
    ConfigMissing {
        /// Environment variable or setting name
        key: &'static str,
    },

    /// A configuration value could not be interpreted
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid {
        /// Environment variable or setting name
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Endpoint URL could not be built from the configured base URL
    #[error("Invalid endpoint URL: {source}")]
    InvalidUrl {
        /// Underlying URL parse error
        #[from]
        source: url::ParseError,
    },
}

impl TerraError {
    /// Whether the same request might succeed if issued again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "transport-errors")]
            Self::Transport { .. } => true,
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Whether this error reflects a cancelled call
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
