//! Pluggable authenticators.
//!
//! An [`Authenticator`] attaches credentials to each outgoing request. The
//! executor calls it after all operation headers are assembled, once per
//! attempt.

use crate::client::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Default IAM token service URL.
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const IAM_TOKEN_PATH: &str = "identity/token";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Supported authentication schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    /// No credentials are sent
    NoAuth,
    /// HTTP basic authentication
    Basic,
    /// A caller-managed bearer token
    BearerToken,
    /// IBM Cloud IAM API key exchanged for bearer tokens
    Iam,
}

impl AuthType {
    /// Returns the configuration name of this scheme.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoAuth => "noAuth",
            Self::Basic => "basic",
            Self::BearerToken => "bearerToken",
            Self::Iam => "iam",
        }
    }
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "noauth" => Ok(Self::NoAuth),
            "basic" => Ok(Self::Basic),
            "bearertoken" => Ok(Self::BearerToken),
            "iam" => Ok(Self::Iam),
            _ => Err(Error::ConfigError(format!(
                "Unrecognized authentication type: {s}"
            ))),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attaches credentials to outgoing requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The scheme implemented by this authenticator.
    fn auth_type(&self) -> AuthType;

    /// Check that the authenticator is usable; called when a client is built.
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the missing credential.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Add credentials to `headers`.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be obtained.
    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()>;
}

/// Sends requests without credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }

    async fn authenticate(&self, _headers: &mut HeaderMap) -> Result<()> {
        Ok(())
    }
}

/// HTTP basic authentication.
#[derive(Debug)]
pub struct BasicAuthenticator {
    username: String,
    password: SecretString,
}

impl BasicAuthenticator {
    /// Create a basic authenticator.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(Error::ConfigError(
                "basic authentication requires a username and password".to_string(),
            ));
        }
        if has_brackets_or_quotes(&self.username) || has_brackets_or_quotes(self.password.expose_secret()) {
            return Err(Error::ConfigError(
                "basic credentials must not be enclosed in brackets or quotes".to_string(),
            ));
        }
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let value = format!("Basic {}", BASE64.encode(credentials));
        headers.insert(AUTHORIZATION, sensitive_value(&value)?);
        Ok(())
    }
}

/// A bearer token supplied and refreshed by the caller.
#[derive(Debug)]
pub struct BearerTokenAuthenticator {
    token: SecretString,
}

impl BearerTokenAuthenticator {
    /// Create a bearer token authenticator.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }

    fn validate(&self) -> Result<()> {
        if self.token.expose_secret().is_empty() {
            return Err(Error::ConfigError(
                "bearer token authentication requires a token".to_string(),
            ));
        }
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let value = format!("Bearer {}", self.token.expose_secret());
        headers.insert(AUTHORIZATION, sensitive_value(&value)?);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: SecretString,
    refresh_at: Instant,
}

/// Exchanges an IBM Cloud API key for IAM bearer tokens.
///
/// Tokens are cached and refreshed once 80% of their lifetime has elapsed.
/// Concurrent callers share a single refresh.
pub struct IamAuthenticator {
    apikey: SecretString,
    url: String,
    timeout: Duration,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    /// Create an IAM authenticator using the default token service.
    #[must_use]
    pub fn new(apikey: impl Into<String>) -> Self {
        Self {
            apikey: SecretString::from(apikey.into()),
            url: DEFAULT_IAM_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    /// Override the IAM token service URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Bound each token request; defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The token service URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let endpoint = format!("{}/{IAM_TOKEN_PATH}", self.url.trim_end_matches('/'));
        info!(url = %endpoint, "Requesting IAM access token");

        let response = self
            .http
            .post(&endpoint)
            .timeout(self.timeout)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", IAM_GRANT_TYPE),
                ("apikey", self.apikey.expose_secret()),
                ("response_type", "cloud_iam"),
            ])
            .send()
            .await
            .map_err(|err| Error::AuthenticationError(format!("IAM token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::AuthenticationError(format!(
                "IAM token request returned {status}: {text}"
            )));
        }

        let token: IamTokenResponse = response.json().await.map_err(|err| {
            Error::AuthenticationError(format!("Invalid IAM token response: {err}"))
        })?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        debug!(expires_in = lifetime.as_secs(), "IAM access token obtained");

        Ok(CachedToken {
            access_token: SecretString::from(token.access_token),
            refresh_at: Instant::now() + lifetime.mul_f64(0.8),
        })
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Iam
    }

    fn validate(&self) -> Result<()> {
        if self.apikey.expose_secret().is_empty() {
            return Err(Error::ConfigError(
                "IAM authentication requires an API key".to_string(),
            ));
        }
        if has_brackets_or_quotes(self.apikey.expose_secret()) {
            return Err(Error::ConfigError(
                "the API key must not be enclosed in brackets or quotes".to_string(),
            ));
        }
        url::Url::parse(&self.url)
            .map_err(|err| Error::ConfigError(format!("Invalid IAM URL `{}`: {err}", self.url)))?;
        Ok(())
    }

    async fn authenticate(&self, headers: &mut HeaderMap) -> Result<()> {
        let mut cached = self.token.lock().await;

        let needs_refresh = cached
            .as_ref()
            .map_or(true, |token| Instant::now() >= token.refresh_at);
        if needs_refresh {
            *cached = Some(self.request_token().await?);
        }

        if let Some(token) = cached.as_ref() {
            let value = format!("Bearer {}", token.access_token.expose_secret());
            headers.insert(AUTHORIZATION, sensitive_value(&value)?);
        }
        Ok(())
    }
}

fn has_brackets_or_quotes(value: &str) -> bool {
    let pairs = [('{', '}'), ('"', '"')];
    pairs
        .iter()
        .any(|(open, close)| value.len() > 1 && value.starts_with(*open) && value.ends_with(*close))
}

fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        Error::AuthenticationError("credentials contain invalid header characters".to_string())
    })?;
    header.set_sensitive(true);
    Ok(header)
}
