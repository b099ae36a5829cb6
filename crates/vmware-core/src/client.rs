//! HTTP client configuration, retry policy, and the generic request executor.
//!
//! Every operation in the service crates is a declarative [`Endpoint`] plus a
//! set of [`RequestParts`]; [`ServiceClient::invoke`] is the single place
//! where those become an HTTP exchange.

use crate::auth::Authenticator;
use crate::error::{Error, RawResponse, Result};
use crate::request::{Endpoint, RequestParts};
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, CONTENT_ENCODING, RETRY_AFTER, USER_AGENT,
};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Retry settings

/// Default maximum number of retry attempts once retries are enabled
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Default maximum retry delay in milliseconds (for exponential backoff)
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 30_000;

const DEFAULT_USER_AGENT: &str = concat!("vmware-core/", env!("CARGO_PKG_VERSION"));

/// Retry policy with exponential backoff.
///
/// Configures how HTTP requests should be retried on failure, using exponential
/// backoff to avoid overwhelming failing services. Transport failures, `429`
/// and every `5xx` except `501` are retried; everything else is returned as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial delay before first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential backoff and `Retry-After`)
    pub max_delay: Duration,

    /// Backoff multiplier (typically 2 for exponential backoff)
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
        }
    }

    /// Create a retry policy with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1,
        }
    }

    /// Retry policy for `max_retries` attempts capped at `max_interval`.
    ///
    /// Zero values select the defaults (4 retries, 30 second cap).
    #[must_use]
    pub fn enabled(max_retries: u32, max_interval: Duration) -> Self {
        let mut policy = Self::new();
        if max_retries > 0 {
            policy.max_retries = max_retries;
        }
        if !max_interval.is_zero() {
            policy.max_delay = max_interval;
        }
        policy
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate delay for a given attempt number.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt-1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let initial_ms = u64::try_from(self.initial_delay.as_millis()).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(initial_ms.saturating_mul(u64::from(multiplier)));

        std::cmp::min(delay, self.max_delay)
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }

    /// Whether a response with `status` should be retried.
    #[must_use]
    pub fn is_retryable_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
            || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client configuration.
///
/// Configures HTTP client behavior including timeouts, retries, connection
/// pooling and request body compression. Retries are off unless enabled.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Retry policy
    pub retry_policy: RetryPolicy,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Gzip-compress request bodies
    pub enable_gzip_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            retry_policy: RetryPolicy::no_retry(),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_gzip_compression: false,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Disable retries.
    #[must_use]
    pub const fn without_retries(mut self) -> Self {
        self.retry_policy = RetryPolicy::no_retry();
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub const fn with_gzip_compression(mut self, enabled: bool) -> Self {
        self.enable_gzip_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful operation outcome: status, headers and the decoded result.
///
/// `result` is `None` when the service answered with an empty body.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded body, if any
    pub result: Option<T>,
}

impl<T> DetailedResponse<T> {
    /// HTTP status code as an integer.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Borrow the decoded result.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Take the decoded result.
    #[must_use]
    pub fn into_result(self) -> Option<T> {
        self.result
    }

    /// Look up a response header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Builder for [`ServiceClient`].
#[derive(Clone)]
pub struct ServiceClientBuilder {
    service_name: String,
    base_url: String,
    http_config: ClientConfig,
    user_agent: String,
    authenticator: Option<Arc<dyn Authenticator>>,
    default_headers: HashMap<String, String>,
    tls_verify: bool,
}

impl ServiceClientBuilder {
    /// Create a builder for `service_name` at `base_url`.
    ///
    /// An empty URL is accepted; requests then fail with
    /// [`Error::ServiceUrlMissing`] until one is set.
    #[must_use]
    pub fn new(service_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            base_url: base_url.into(),
            http_config: ClientConfig::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            authenticator: None,
            default_headers: HashMap::new(),
            tls_verify: true,
        }
    }

    /// Set the authenticator used for every request.
    #[must_use]
    pub fn with_authenticator<A>(mut self, authenticator: A) -> Self
    where
        A: Authenticator + 'static,
    {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Set an authenticator shared with other clients.
    #[must_use]
    pub fn with_shared_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Override the base service URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.http_config.retry_policy = retry;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Headers added to every request that does not already carry them.
    #[must_use]
    pub fn with_default_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub fn with_gzip_compression(mut self, enabled: bool) -> Self {
        self.http_config.enable_gzip_compression = enabled;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no authenticator is set or it fails validation, if
    /// the base URL is malformed, or if the HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let authenticator = self.authenticator.ok_or_else(|| {
            Error::ConfigError(format!(
                "An authenticator is required for the `{}` service",
                self.service_name
            ))
        })?;
        authenticator.validate()?;

        let base_url = parse_service_url(&self.base_url)?;
        let default_headers = to_header_map(&self.default_headers)?;

        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .cookie_store(true);

        if !self.tls_verify {
            warn!(service = %self.service_name, "TLS verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!(
                "Failed to build HTTP client for `{}`: {err}",
                self.service_name
            ))
        })?;

        Ok(ServiceClient {
            http,
            service_name: self.service_name,
            base_url,
            user_agent: self.user_agent,
            authenticator,
            default_headers,
            retry_policy: self.http_config.retry_policy,
            gzip_compression: self.http_config.enable_gzip_compression,
            deadline: None,
        })
    }
}

impl fmt::Debug for ServiceClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClientBuilder")
            .field("service_name", &self.service_name)
            .field("base_url", &self.base_url)
            .field("http_config", &self.http_config)
            .field("user_agent", &self.user_agent)
            .field(
                "auth_type",
                &self.authenticator.as_ref().map(|auth| auth.auth_type()),
            )
            .field("tls_verify", &self.tls_verify)
            .finish_non_exhaustive()
    }
}

/// Generic executor shared by every operation of a service.
///
/// Cloning is cheap; clones share the connection pool and authenticator but
/// have independent settings.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    service_name: String,
    base_url: Option<Url>,
    user_agent: String,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    retry_policy: RetryPolicy,
    gzip_compression: bool,
    deadline: Option<Duration>,
}

impl ServiceClient {
    /// Start a builder.
    #[must_use]
    pub fn builder(
        service_name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> ServiceClientBuilder {
        ServiceClientBuilder::new(service_name, base_url)
    }

    /// The service name this client was built for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Return the base URL, if one is configured.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// The base service URL as a string; empty when unset.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.base_url.as_ref().map_or("", Url::as_str)
    }

    /// Replace the base service URL. An empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is non-empty and malformed.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.base_url = parse_service_url(url)?;
        Ok(())
    }

    /// Replace the client-level default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is not valid HTTP.
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> Result<()> {
        self.default_headers = to_header_map(headers)?;
        Ok(())
    }

    /// The authenticator attached to this client.
    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Current retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Enable retries; zero values select the defaults (4 retries, 30 second cap).
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.retry_policy = RetryPolicy::enabled(max_retries, max_interval);
    }

    /// Disable retries.
    pub fn disable_retries(&mut self) {
        self.retry_policy = RetryPolicy::no_retry();
    }

    /// Enable or disable gzip compression of request bodies.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.gzip_compression = enabled;
    }

    /// Whether request bodies are gzip-compressed.
    #[must_use]
    pub fn gzip_compression_enabled(&self) -> bool {
        self.gzip_compression
    }

    /// A handle whose calls fail with [`Error::Timeout`] unless they complete
    /// within `deadline`, retries included.
    #[must_use]
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        let mut client = self.clone();
        client.deadline = Some(deadline);
        client
    }

    /// The call deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Execute one operation and decode its JSON result.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport, decode or service error; see [`Error`].
    pub async fn invoke<R>(
        &self,
        endpoint: &Endpoint,
        parts: RequestParts,
    ) -> Result<DetailedResponse<R>>
    where
        R: DeserializeOwned,
    {
        let result = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.execute(endpoint, &parts))
                .await
                .unwrap_or_else(|_| {
                    Err(Error::Timeout(format!(
                        "{} did not complete within {}ms: deadline exceeded",
                        endpoint.operation_id,
                        deadline.as_millis()
                    )))
                }),
            None => self.execute(endpoint, &parts).await,
        };

        if let Err(err) = &result {
            if err.should_log() {
                warn!(
                    operation = endpoint.operation_id,
                    code = err.error_code(),
                    error = %err,
                    "Request failed"
                );
            } else {
                debug!(
                    operation = endpoint.operation_id,
                    code = err.error_code(),
                    error = %err,
                    "Request failed"
                );
            }
        }
        result
    }

    async fn execute<R>(&self, endpoint: &Endpoint, parts: &RequestParts) -> Result<DetailedResponse<R>>
    where
        R: DeserializeOwned,
    {
        let base_url = self.base_url.as_ref().ok_or(Error::ServiceUrlMissing)?;
        let mut url = endpoint.resolve_url(base_url, &parts.path_params)?;
        parts.query.apply_to(&mut url);

        let mut headers = parts.header_map(endpoint)?;
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent).map_err(|_| {
                Error::ConfigError(format!("Invalid User-Agent `{}`", self.user_agent))
            })?,
        );
        for (name, value) in &self.default_headers {
            if !headers.contains_key(name) {
                headers.insert(name.clone(), value.clone());
            }
        }

        let body = match &parts.body {
            Some(value) => {
                let bytes = serde_json::to_vec(value)?;
                if self.gzip_compression {
                    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                    Some(gzip(&bytes)?)
                } else {
                    Some(bytes)
                }
            }
            None => None,
        };

        let mut attempt = 0;

        loop {
            let mut request_headers = headers.clone();
            self.authenticator.authenticate(&mut request_headers).await?;

            let mut request = self
                .http
                .request(endpoint.method.clone(), url.clone())
                .headers(request_headers);
            if let Some(bytes) = &body {
                request = request.body(bytes.clone());
            }

            info!(
                operation = endpoint.operation_id,
                method = %endpoint.method,
                url = %url,
                attempt,
                "Sending request"
            );

            let (error, retry_after) = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let response_headers = response.headers().clone();
                    let bytes = response.bytes().await?;
                    debug!(
                        operation = endpoint.operation_id,
                        status = status.as_u16(),
                        length = bytes.len(),
                        "Received response"
                    );

                    if status.is_success() {
                        return decode(status, response_headers, &bytes);
                    }

                    let raw = RawResponse::new(status, &response_headers, &bytes);
                    let error = Error::from_service_response(raw);
                    if !RetryPolicy::is_retryable_status(status) {
                        return Err(error);
                    }
                    (error, retry_after(&response_headers))
                }
                Err(err) if err.is_builder() => return Err(Error::from(err)),
                Err(err) => (Error::from(err), None),
            };

            if attempt >= self.retry_policy.max_retries {
                return Err(error);
            }
            attempt += 1;

            let delay = retry_after.map_or_else(
                || self.retry_policy.delay_for_attempt(attempt),
                |delay| delay.min(self.retry_policy.max_delay),
            );
            warn!(
                operation = endpoint.operation_id,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Retrying request"
            );
            sleep(delay).await;
        }
    }
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service_name", &self.service_name)
            .field("base_url", &self.service_url())
            .field("auth_type", &self.authenticator.auth_type())
            .field("retry_policy", &self.retry_policy)
            .field("gzip_compression", &self.gzip_compression)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

fn parse_service_url(url: &str) -> Result<Option<Url>> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('{')
        || trimmed.ends_with('}')
        || trimmed.starts_with('"')
        || trimmed.ends_with('"')
    {
        return Err(Error::InvalidEndpoint(format!(
            "The service URL `{trimmed}` must not be enclosed in brackets or quotes"
        )));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|err| Error::InvalidEndpoint(format!("Invalid service URL `{trimmed}`: {err}")))?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidEndpoint(format!(
            "`{trimmed}` cannot be used as a service URL"
        )));
    }
    Ok(Some(parsed))
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Error::ConfigError(format!("Invalid header name `{name}`: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| Error::ConfigError(format!("Invalid value for header `{name}`: {err}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn decode<R>(status: StatusCode, headers: HeaderMap, bytes: &[u8]) -> Result<DetailedResponse<R>>
where
    R: DeserializeOwned,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DetailedResponse {
            status,
            headers,
            result: None,
        });
    }

    // A literal `null` body decodes to no result.
    match serde_json::from_slice::<Option<R>>(bytes) {
        Ok(result) => Ok(DetailedResponse {
            status,
            headers,
            result,
        }),
        Err(err) => Err(Error::DecodeError {
            message: err.to_string(),
            response: Box::new(RawResponse::new(status, &headers, bytes)),
        }),
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .and_then(|()| encoder.finish())
        .map_err(|err| Error::SerializationError(format!("Failed to compress request body: {err}")))
}
