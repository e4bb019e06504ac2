//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod config;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

pub use config::{Config, KEY_ENV, SECRET_ENV};

use crate::domain::{
    ApiKey, ApiSecret, CountryCode, NumberRequest, SearchNumbers, SendSms, SendSmsResponse,
    UpdateSettings, ValidationError,
};

const DEFAULT_REST_ENDPOINT: &str = "https://rest.nexmo.com";
/// `sms/json` is served over plain HTTP by default, unlike every other route.
const DEFAULT_SMS_ENDPOINT: &str = "http://rest.nexmo.com";
const ACCEPT_JSON: (&str, &str) = ("Accept", "application/json");

type BoxError = Box<dyn StdError + Send + Sync>;
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
            };
            let mut builder = self.client.request(method, &request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// API key and secret, percent-encoded once at construction.
///
/// The secret only changes through [`Credentials::replace_secret`], which
/// [`NexmoClient::update_settings`] calls after a successful rotation.
pub struct Credentials {
    key: ApiKey,
    secret: ApiSecret,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            key: ApiKey::new(key)?,
            secret: ApiSecret::new(secret)?,
        })
    }

    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    pub fn secret(&self) -> &ApiSecret {
        &self.secret
    }

    /// Swap in a new secret for subsequent requests.
    pub fn replace_secret(&mut self, secret: impl Into<ApiSecret>) {
        self.secret = secret.into();
    }
}

impl TryFrom<Config> for Credentials {
    type Error = NexmoError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Self::new(
            config.key.unwrap_or_default(),
            config.secret.unwrap_or_default(),
        )
        .map_err(NexmoError::InvalidConfig)
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`NexmoClient`].
///
/// Argument and configuration problems are caught by the domain constructors before any
/// request is issued; the remaining variants come from the request itself.
pub enum NexmoError {
    /// Missing or empty `key` / `secret`.
    #[error("invalid config: {0}")]
    InvalidConfig(#[source] ValidationError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Status other than `200`, or an empty body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Route used by [`NexmoClient::cancel_number`].
pub enum CancelRoute {
    /// `number/buy`, which is what the service has historically been sent for cancellations.
    #[default]
    Buy,
    /// `number/cancel`.
    Cancel,
}

#[derive(Debug, Clone)]
/// Builder for [`NexmoClient`].
///
/// Use this when you need to customize endpoints, the cancel route, timeout, or user-agent.
pub struct NexmoClientBuilder {
    credentials: Credentials,
    rest_endpoint: String,
    sms_endpoint: String,
    cancel_route: CancelRoute,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NexmoClientBuilder {
    /// Create a builder with the default endpoints and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            rest_endpoint: DEFAULT_REST_ENDPOINT.to_owned(),
            sms_endpoint: DEFAULT_SMS_ENDPOINT.to_owned(),
            cancel_route: CancelRoute::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL of the account and number routes.
    pub fn rest_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rest_endpoint = trim_base(endpoint.into());
        self
    }

    /// Override the base URL of `sms/json`, e.g. to force HTTPS.
    pub fn sms_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sms_endpoint = trim_base(endpoint.into());
        self
    }

    pub fn cancel_route(mut self, route: CancelRoute) -> Self {
        self.cancel_route = route;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`NexmoClient`].
    pub fn build(self) -> Result<NexmoClient, NexmoError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NexmoError::Transport(Box::new(err)))?;

        Ok(NexmoClient {
            credentials: self.credentials,
            rest_endpoint: self.rest_endpoint,
            sms_endpoint: self.sms_endpoint,
            cancel_route: self.cancel_route,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn trim_base(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_owned()
}

#[derive(Clone)]
/// High-level Nexmo client.
///
/// Every operation issues exactly one request with `Accept: application/json` and runs the
/// response through the same checks: transport error, then status `200` with a non-empty
/// body, then JSON parsing.
///
/// By default it uses:
/// - `https://rest.nexmo.com` for account and number routes
/// - `http://rest.nexmo.com` for `sms/json`
///
/// Read-only operations take `&self` and may run concurrently. [`NexmoClient::update_settings`]
/// takes `&mut self`; clones made before a secret rotation keep the secret they were cloned
/// with.
pub struct NexmoClient {
    credentials: Credentials,
    rest_endpoint: String,
    sms_endpoint: String,
    cancel_route: CancelRoute,
    http: Arc<dyn HttpTransport>,
}

impl NexmoClient {
    /// Create a client using the default endpoints.
    ///
    /// For more customization, use [`NexmoClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            rest_endpoint: DEFAULT_REST_ENDPOINT.to_owned(),
            sms_endpoint: DEFAULT_SMS_ENDPOINT.to_owned(),
            cancel_route: CancelRoute::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Create a client from raw configuration.
    ///
    /// Errors:
    /// - [`NexmoError::InvalidConfig`] when `key` or `secret` is missing or empty.
    pub fn from_config(config: Config) -> Result<Self, NexmoError> {
        Ok(Self::new(Credentials::try_from(config)?))
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> NexmoClientBuilder {
        NexmoClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetch the account balance (`account/get-balance`).
    #[tracing::instrument(skip_all, fields(operation = "get_balance"))]
    pub async fn get_balance(&self) -> Result<Value, NexmoError> {
        let url = crate::transport::get_balance_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
        );
        self.request_json(HttpMethod::Get, url).await
    }

    /// Fetch outbound pricing for a country (`account/get-pricing/outbound`).
    #[tracing::instrument(skip_all, fields(operation = "get_pricing", country = %country_code.as_str()))]
    pub async fn get_pricing(&self, country_code: &CountryCode) -> Result<Value, NexmoError> {
        let url = crate::transport::get_pricing_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            country_code,
        );
        self.request_json(HttpMethod::Get, url).await
    }

    /// Update account settings (`account/settings`).
    ///
    /// Accepts a bare [`NewSecret`](crate::domain::NewSecret) or a full [`UpdateSettings`].
    /// When the request carries a new secret and the call succeeds, the client switches to
    /// that secret for every later request. On any error the secret is left untouched.
    #[tracing::instrument(skip_all, fields(operation = "update_settings"))]
    pub async fn update_settings(
        &mut self,
        request: impl Into<UpdateSettings>,
    ) -> Result<Value, NexmoError> {
        let request = request.into();
        let url = crate::transport::update_settings_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            &request,
        );
        let value = self.request_json(HttpMethod::Post, url).await?;

        if let Some(new_secret) = request.new_secret {
            self.credentials.replace_secret(new_secret);
            tracing::debug!("api secret rotated");
        }
        Ok(value)
    }

    /// List numbers owned by the account (`account/numbers`).
    #[tracing::instrument(skip_all, fields(operation = "get_numbers"))]
    pub async fn get_numbers(&self) -> Result<Value, NexmoError> {
        let url = crate::transport::get_numbers_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
        );
        self.request_json(HttpMethod::Get, url).await
    }

    /// Search numbers available for purchase (`number/search`).
    ///
    /// Accepts a bare [`CountryCode`] or a [`SearchNumbers`] with an optional pattern.
    #[tracing::instrument(skip_all, fields(operation = "search_numbers"))]
    pub async fn search_numbers(
        &self,
        request: impl Into<SearchNumbers>,
    ) -> Result<Value, NexmoError> {
        let request = request.into();
        let url = crate::transport::search_numbers_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            &request,
        );
        self.request_json(HttpMethod::Get, url).await
    }

    /// Buy a number (`number/buy`).
    #[tracing::instrument(skip_all, fields(operation = "buy_number", country = %request.country_code().as_str()))]
    pub async fn buy_number(&self, request: &NumberRequest) -> Result<Value, NexmoError> {
        let url = crate::transport::buy_number_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            request,
        );
        self.request_json(HttpMethod::Post, url).await
    }

    /// Cancel a number.
    ///
    /// With the default [`CancelRoute::Buy`] this posts to `number/buy`, exactly like
    /// [`NexmoClient::buy_number`]. Select [`CancelRoute::Cancel`] on the builder to post to
    /// `number/cancel` instead.
    #[tracing::instrument(skip_all, fields(operation = "cancel_number", country = %request.country_code().as_str()))]
    pub async fn cancel_number(&self, request: &NumberRequest) -> Result<Value, NexmoError> {
        let build_url = match self.cancel_route {
            CancelRoute::Buy => crate::transport::buy_number_url,
            CancelRoute::Cancel => crate::transport::cancel_number_url,
        };
        let url = build_url(
            &self.rest_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            request,
        );
        self.request_json(HttpMethod::Post, url).await
    }

    /// Send a message through `sms/json`.
    ///
    /// Errors:
    /// - [`NexmoError::Transport`] when the request could not be sent,
    /// - [`NexmoError::HttpStatus`] for a status other than `200` or an empty body,
    /// - [`NexmoError::Parse`] when the body is not valid JSON.
    ///
    /// A body that is valid JSON but not shaped like an `sms/json` response still succeeds,
    /// with [`SendSmsResponse::report`] returning `None`. Per-message rejections are reported
    /// in [`SendSmsReport::messages`](crate::domain::SendSmsReport::messages), not as errors.
    #[tracing::instrument(skip_all, fields(operation = "send", message_type = ?request.message_type()))]
    pub async fn send(&self, request: SendSms) -> Result<SendSmsResponse, NexmoError> {
        let url = crate::transport::send_sms_url(
            &self.sms_endpoint,
            self.credentials.key(),
            self.credentials.secret(),
            &request,
        );
        let response = self.execute(HttpMethod::Post, url).await;
        let body = successful_body(response)?;
        let raw = parse_json_body(&body)?;

        let report = match crate::transport::decode_send_sms_json_response(&body) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::debug!(error = %err, "sms/json body has an unexpected shape");
                None
            }
        };
        for message in report
            .iter()
            .flat_map(|it| &it.messages)
            .filter(|it| !it.status.is_success())
        {
            tracing::warn!(
                status = message.status.as_i32(),
                kind = ?message.status.known().map(|it| it.kind()),
                "message rejected"
            );
        }
        Ok(SendSmsResponse::new(raw, report))
    }

    async fn execute(&self, method: HttpMethod, url: String) -> Result<HttpResponse, BoxError> {
        let request = HttpRequest {
            method,
            url,
            headers: vec![ACCEPT_JSON],
        };
        let response = self.http.execute(request).await;
        match &response {
            Ok(response) => tracing::debug!(status = response.status, "response received"),
            Err(err) => tracing::warn!(error = %err, "request failed"),
        }
        response
    }

    async fn request_json(&self, method: HttpMethod, url: String) -> Result<Value, NexmoError> {
        let response = self.execute(method, url).await;
        decode_json_response(response)
    }
}

/// Accept only a `200` response with a non-empty body.
fn successful_body(response: Result<HttpResponse, BoxError>) -> Result<String, NexmoError> {
    let response = response.map_err(NexmoError::Transport)?;

    if response.status != 200 || response.body.is_empty() {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(NexmoError::HttpStatus {
            status: response.status,
            body,
        });
    }

    Ok(response.body)
}

/// Uniform response handling shared by every operation.
fn decode_json_response(response: Result<HttpResponse, BoxError>) -> Result<Value, NexmoError> {
    let body = successful_body(response)?;
    parse_json_body(&body)
}

fn parse_json_body(body: &str) -> Result<Value, NexmoError> {
    serde_json::from_str(body).map_err(|err| {
        tracing::warn!(error = %err, "response body is not valid JSON");
        NexmoError::Parse(Box::new(err))
    })
}
