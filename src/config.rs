// ABOUTME: Client configuration loaded from code or environment variables
// ABOUTME: Credentials, base URL, timeouts, pool size, and per-request data options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration
//!
//! Configuration is environment-only: [`TerraConfig::from_env`] reads the
//! `TERRA_*` variables, and every field can also be set in code.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use terra_core::constants::{
    env_config, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, TERRA_API_BASE_URL,
};
use terra_core::{TerraError, TerraResult};

use crate::pool::WorkerPool;

/// Connection settings for [`TerraClient`](crate::TerraClient)
#[derive(Clone)]
pub struct TerraConfig {
    /// Developer API key, sent as `X-API-Key`
    pub api_key: String,
    /// Developer ID, sent as `dev-id`
    pub dev_id: String,
    /// API root without a trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Worker pool size
    pub pool_size: usize,
    /// Options applied by the `*_default` data requests
    pub request_defaults: RequestConfig,
}

impl TerraConfig {
    /// Configuration with default base URL, timeouts, and pool size
    #[must_use]
    pub fn new(api_key: impl Into<String>, dev_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            dev_id: dev_id.into(),
            base_url: TERRA_API_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            pool_size: WorkerPool::default_size(),
            request_defaults: RequestConfig::default(),
        }
    }

    /// Load from `TERRA_API_KEY`, `TERRA_DEV_ID`, and the optional
    /// `TERRA_API_BASE_URL`, `TERRA_TIMEOUT_SECS`, `TERRA_POOL_SIZE`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::ConfigMissing`] when a credential is unset and
    /// [`TerraError::ConfigInvalid`] when an optional value does not parse
    pub fn from_env() -> TerraResult<Self> {
        let mut config = Self::new(
            required_var(env_config::API_KEY)?,
            required_var(env_config::DEV_ID)?,
        );
        if let Ok(base_url) = env::var(env_config::API_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = parsed_var::<u64>(env_config::TIMEOUT_SECS)? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(size) = parsed_var::<usize>(env_config::POOL_SIZE)? {
            if size == 0 {
                return Err(TerraError::ConfigInvalid {
                    key: env_config::POOL_SIZE,
                    reason: "must be at least 1".to_owned(),
                });
            }
            config.pool_size = size;
        }
        Ok(config)
    }

    /// Point the client at another API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the worker pool size
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Override the options used by the `*_default` data requests
    #[must_use]
    pub const fn with_request_defaults(mut self, defaults: RequestConfig) -> Self {
        self.request_defaults = defaults;
        self
    }
}

impl std::fmt::Debug for TerraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerraConfig")
            .field("api_key", &"[REDACTED]")
            .field("dev_id", &self.dev_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("pool_size", &self.pool_size)
            .field("request_defaults", &self.request_defaults)
            .finish()
    }
}

/// Whether data requests should carry sample series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Samples {
    /// Ask for samples
    Include,
    /// Ask for summaries only
    Exclude,
    /// Leave it to the developer account setting
    #[default]
    AccountDefault,
}

/// Per-request options for data endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestConfig {
    /// Deliver the data to the webhook instead of the response body
    pub to_webhook: bool,
    /// Sample series preference
    pub with_samples: Samples,
    /// Let Terra retry against the provider when rate limited
    pub retry_if_rate_limited: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            to_webhook: true,
            with_samples: Samples::AccountDefault,
            retry_if_rate_limited: false,
        }
    }
}

impl RequestConfig {
    /// Set webhook delivery
    #[must_use]
    pub const fn with_to_webhook(mut self, to_webhook: bool) -> Self {
        self.to_webhook = to_webhook;
        self
    }

    /// Set the sample series preference
    #[must_use]
    pub const fn with_samples(mut self, samples: Samples) -> Self {
        self.with_samples = samples;
        self
    }

    /// Set provider rate-limit retries
    #[must_use]
    pub const fn with_retry_if_rate_limited(mut self, retry: bool) -> Self {
        self.retry_if_rate_limited = retry;
        self
    }

    /// Query parameters for these options
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("to_webhook", self.to_webhook.to_string()),
            (
                "retry_if_rate_limited",
                self.retry_if_rate_limited.to_string(),
            ),
        ];
        match self.with_samples {
            Samples::Include => pairs.push(("with_samples", "true".to_owned())),
            Samples::Exclude => pairs.push(("with_samples", "false".to_owned())),
            Samples::AccountDefault => {}
        }
        pairs
    }
}

fn required_var(key: &'static str) -> TerraResult<String> {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(TerraError::ConfigMissing { key })
}

fn parsed_var<T>(key: &'static str) -> TerraResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env::var(key)
        .ok()
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| TerraError::ConfigInvalid {
                    key,
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = TerraConfig::new("key", "dev").with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_default_request_config_pairs() {
        let pairs = RequestConfig::default().query_pairs();
        assert!(pairs.contains(&("to_webhook", "true".to_owned())));
        assert!(pairs.contains(&("retry_if_rate_limited", "false".to_owned())));
        assert!(!pairs.iter().any(|(k, _)| *k == "with_samples"));
    }

    #[test]
    fn test_samples_included_when_explicit() {
        let pairs = RequestConfig::default()
            .with_samples(Samples::Exclude)
            .query_pairs();
        assert!(pairs.contains(&("with_samples", "false".to_owned())));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", TerraConfig::new("secret-key", "dev"));
        assert!(!rendered.contains("secret-key"));
    }
}
