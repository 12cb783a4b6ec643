// ABOUTME: Terra REST API client returning pending calls for every endpoint
// ABOUTME: Sends auth headers, builds data query parameters, and normalizes responses on the worker pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Terra REST API client
//!
//! Every endpoint method returns immediately with a [`PendingCall`]. The HTTP
//! exchange runs on the client's [`WorkerPool`] and the response is normalized
//! into an [`ApiResult`] there as well. The outer `Result` only reports
//! failures that happen before anything is sent, such as a shut-down pool.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use terra_core::constants::{keys, paths, HEADER_API_KEY, HEADER_DEV_ID};
use terra_core::models::{
    Activity, Athlete, AuthenticationResponse, Body, Daily, Menstruation, Nutrition, PartialUser,
    ProvidersResponse, Sleep, User, WidgetSession,
};
use terra_core::TerraResult;
use tracing::{debug, info};
use url::Url;

use crate::call::PendingCall;
use crate::config::{RequestConfig, TerraConfig};
use crate::pool::WorkerPool;
use crate::response::{ApiResult, RawResponse, ResponseShape};

/// Handle to a call that resolves into an [`ApiResult`]
pub type ApiCall<T> = PendingCall<ApiResult<T>>;

/// Options for an authentication widget session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetSessionRequest {
    /// Providers to offer, e.g. `["GARMIN", "OURA"]`; empty offers all
    pub providers: Vec<String>,
    /// Your identifier for the user
    pub reference_id: Option<String>,
    /// Redirect after a successful connection
    pub auth_success_redirect_url: Option<String>,
    /// Redirect after a failed connection
    pub auth_failure_redirect_url: Option<String>,
    /// Widget language
    pub language: Option<String>,
    /// Show a disconnect button for already connected providers
    pub show_disconnect: bool,
}

impl WidgetSessionRequest {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if !self.providers.is_empty() {
            pairs.push(("providers", self.providers.join(",")));
        }
        push_opt(&mut pairs, "reference_id", self.reference_id.as_deref());
        push_opt(
            &mut pairs,
            "auth_success_redirect_url",
            self.auth_success_redirect_url.as_deref(),
        );
        push_opt(
            &mut pairs,
            "auth_failure_redirect_url",
            self.auth_failure_redirect_url.as_deref(),
        );
        push_opt(&mut pairs, "language", self.language.as_deref());
        pairs.push(("show_disconnect", self.show_disconnect.to_string()));
        pairs
    }
}

/// Client for Terra's REST API
pub struct TerraClient {
    config: TerraConfig,
    http: Client,
    pool: Arc<WorkerPool>,
}

impl TerraClient {
    /// Create a client with its own worker pool
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the worker pool cannot be built
    pub fn new(config: TerraConfig) -> TerraResult<Self> {
        let pool = Arc::new(WorkerPool::new(config.pool_size)?);
        Self::with_pool(config, pool)
    }

    /// Create a client that shares an existing worker pool
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_pool(config: TerraConfig, pool: Arc<WorkerPool>) -> TerraResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        info!(base_url = %config.base_url, workers = pool.size(), "Created Terra API client");
        Ok(Self { config, http, pool })
    }

    /// Create a client configured from `TERRA_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or invalid
    pub fn from_env() -> TerraResult<Self> {
        Self::new(TerraConfig::from_env()?)
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &TerraConfig {
        &self.config
    }

    /// Worker pool running this client's calls
    #[must_use]
    pub const fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Handle for a user known only by ID; no request is made
    #[must_use]
    pub fn user_from_id(&self, user_id: impl Into<String>) -> PartialUser {
        PartialUser::new(user_id)
    }

    /// All users registered under the developer ID
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_all_users(&self) -> TerraResult<ApiCall<User>> {
        let request = self.request(Method::GET, paths::SUBSCRIPTIONS)?;
        self.issue(request, ResponseShape::Field(keys::USERS), None)
    }

    /// A single user by Terra user ID
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_user(&self, user_id: &str) -> TerraResult<ApiCall<User>> {
        let request = self
            .request(Method::GET, paths::USER_INFO)?
            .query(&[("user_id", user_id)]);
        self.issue(request, ResponseShape::Field(keys::USER), None)
    }

    /// Disconnect a user from Terra
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn deauthenticate_user(&self, user: &PartialUser) -> TerraResult<ApiCall<()>> {
        let request = self
            .request(Method::DELETE, paths::DEAUTHENTICATE_USER)?
            .query(&[("user_id", user.id())]);
        self.issue(request, ResponseShape::NoContent, None)
    }

    /// Create an authentication widget session
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn generate_widget_session(
        &self,
        session: &WidgetSessionRequest,
    ) -> TerraResult<ApiCall<WidgetSession>> {
        let request = self
            .request(Method::POST, paths::GENERATE_WIDGET_SESSION)?
            .query(&session.query_pairs())
            .body(Vec::<u8>::new());
        self.issue(request, ResponseShape::WholeBody, None)
    }

    /// Create a direct authentication URL for one provider
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn generate_authentication_url(
        &self,
        resource: &str,
        reference_id: Option<&str>,
        auth_success_redirect_url: Option<&str>,
        auth_failure_redirect_url: Option<&str>,
    ) -> TerraResult<ApiCall<AuthenticationResponse>> {
        let mut pairs = vec![("resource", resource.to_owned())];
        push_opt(&mut pairs, "reference_id", reference_id);
        push_opt(&mut pairs, "auth_success_redirect_url", auth_success_redirect_url);
        push_opt(&mut pairs, "auth_failure_redirect_url", auth_failure_redirect_url);
        let request = self
            .request(Method::POST, paths::AUTHENTICATE_USER)?
            .query(&pairs)
            .body(Vec::<u8>::new());
        self.issue(request, ResponseShape::WholeBody, None)
    }

    /// Providers supported by Terra
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn list_providers(&self) -> TerraResult<ApiCall<ProvidersResponse>> {
        let request = self.request(Method::GET, paths::INTEGRATIONS)?;
        self.issue(request, ResponseShape::WholeBody, None)
    }

    /// Athlete profile for a user
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_athlete(
        &self,
        user: &PartialUser,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Athlete>> {
        let request = self.request(Method::GET, paths::ATHLETE)?.query(&[
            ("user_id", user.id().to_owned()),
            ("to_webhook", options.to_webhook.to_string()),
        ]);
        self.issue(request, ResponseShape::Field(keys::ATHLETE), Some(user))
    }

    /// Athlete profile using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_athlete_default(&self, user: &PartialUser) -> TerraResult<ApiCall<Athlete>> {
        self.get_athlete(user, &self.config.request_defaults)
    }

    /// Activity records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_activity(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Activity>> {
        self.data_request(paths::ACTIVITY, user, start, end, options)
    }

    /// Body records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_body(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Body>> {
        self.data_request(paths::BODY, user, start, end, options)
    }

    /// Daily records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_daily(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Daily>> {
        self.data_request(paths::DAILY, user, start, end, options)
    }

    /// Menstruation records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_menstruation(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Menstruation>> {
        self.data_request(paths::MENSTRUATION, user, start, end, options)
    }

    /// Nutrition records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_nutrition(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Nutrition>> {
        self.data_request(paths::NUTRITION, user, start, end, options)
    }

    /// Sleep records between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_sleep(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<Sleep>> {
        self.data_request(paths::SLEEP, user, start, end, options)
    }

    /// Activity records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_activity_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Activity>> {
        self.get_activity(user, start, end, &self.config.request_defaults)
    }

    /// Body records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_body_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Body>> {
        self.get_body(user, start, end, &self.config.request_defaults)
    }

    /// Daily records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_daily_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Daily>> {
        self.get_daily(user, start, end, &self.config.request_defaults)
    }

    /// Menstruation records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_menstruation_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Menstruation>> {
        self.get_menstruation(user, start, end, &self.config.request_defaults)
    }

    /// Nutrition records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_nutrition_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Nutrition>> {
        self.get_nutrition(user, start, end, &self.config.request_defaults)
    }

    /// Sleep records using the client's default request options
    ///
    /// # Errors
    ///
    /// Returns [`TerraError::PoolShutDown`](terra_core::TerraError::PoolShutDown) after shutdown
    pub fn get_sleep_default(
        &self,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TerraResult<ApiCall<Sleep>> {
        self.get_sleep(user, start, end, &self.config.request_defaults)
    }

    /// Shut the worker pool down; later calls fail with `PoolShutDown`
    ///
    /// Returns `false` if the pool was already shut down.
    pub fn shutdown(&self) -> bool {
        self.pool.shutdown()
    }

    fn data_request<T>(
        &self,
        path: &'static str,
        user: &PartialUser,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        options: &RequestConfig,
    ) -> TerraResult<ApiCall<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut pairs = vec![
            ("user_id", user.id().to_owned()),
            ("start_date", start.timestamp().to_string()),
        ];
        if let Some(end) = end {
            pairs.push(("end_date", end.timestamp().to_string()));
        }
        pairs.extend(options.query_pairs());

        let request = self.request(Method::GET, path)?.query(&pairs);
        self.issue(request, ResponseShape::Field(keys::DATA), Some(user))
    }

    fn endpoint(&self, path: &str) -> TerraResult<Url> {
        Ok(Url::parse(&format!("{}/{path}", self.config.base_url))?)
    }

    fn request(&self, method: Method, path: &str) -> TerraResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self
            .http
            .request(method, url)
            .header(HEADER_API_KEY, &self.config.api_key)
            .header(HEADER_DEV_ID, &self.config.dev_id))
    }

    fn issue<T>(
        &self,
        request: RequestBuilder,
        shape: ResponseShape,
        user: Option<&PartialUser>,
    ) -> TerraResult<ApiCall<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let limiter = self.pool.limiter();
        let user = user.cloned();
        PendingCall::spawn(&self.pool, async move {
            let response = request.send().await?;
            let raw = RawResponse::read(response).await?;
            debug!(status = raw.status(), ?shape, "Received Terra API response");
            limiter
                .run(|| ApiResult::from_response(raw, shape, user.as_ref()))
                .await?
        })
    }
}

impl std::fmt::Debug for TerraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerraClient")
            .field("config", &self.config)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((key, value.to_owned()));
    }
}
