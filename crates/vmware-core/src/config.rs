//! Service configuration and environment-based loading.
//!
//! Properties are read from variables prefixed with the upper-cased service
//! name, e.g. `VMWARE_URL`, `VMWARE_AUTH_TYPE` and `VMWARE_APIKEY` for the
//! `vmware` service.

use crate::auth::{
    AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, IamAuthenticator,
    NoAuthAuthenticator,
};
use crate::client::{RetryPolicy, ServiceClientBuilder};
use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

/// Configuration for a service client loaded from external properties.
#[derive(Debug, Default, Validate)]
pub struct ServiceConfig {
    /// Base service URL
    #[validate(url)]
    pub url: Option<String>,

    /// Authentication scheme; defaults to IAM
    pub auth_type: Option<AuthType>,

    /// IAM API key
    pub apikey: Option<SecretString>,

    /// Static bearer token
    pub bearer_token: Option<SecretString>,

    /// Basic authentication username
    pub username: Option<String>,

    /// Basic authentication password
    pub password: Option<SecretString>,

    /// IAM token service URL
    #[validate(url)]
    pub auth_url: Option<String>,

    /// Skip TLS certificate verification
    pub disable_ssl: bool,

    /// Gzip-compress request bodies
    pub enable_gzip: bool,

    /// Retry transient failures
    pub enable_retries: bool,

    /// Maximum retry attempts (0 selects the default)
    #[validate(range(max = 10))]
    pub max_retries: u32,

    /// Maximum delay between retries in seconds (0 selects the default)
    #[validate(range(max = 3600))]
    pub retry_interval_secs: u64,
}

impl ServiceConfig {
    /// Load the configuration for `service_name` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a property has an invalid value.
    pub fn from_env(service_name: &str) -> Result<Self, Error> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Load the configuration for `service_name` using `lookup` to resolve keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a property has an invalid value.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let get = |name: &str| {
            lookup(&format!("{prefix}_{name}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let config = Self {
            url: get("URL"),
            auth_type: get("AUTH_TYPE")
                .map(|value| AuthType::from_str(&value))
                .transpose()?,
            apikey: get("APIKEY").map(SecretString::from),
            bearer_token: get("BEARER_TOKEN").map(SecretString::from),
            username: get("USERNAME"),
            password: get("PASSWORD").map(SecretString::from),
            auth_url: get("AUTH_URL"),
            disable_ssl: parse_flag("DISABLE_SSL", get("DISABLE_SSL"))?,
            enable_gzip: parse_flag("ENABLE_GZIP", get("ENABLE_GZIP"))?,
            enable_retries: parse_flag("ENABLE_RETRIES", get("ENABLE_RETRIES"))?,
            max_retries: parse_number("MAX_RETRIES", get("MAX_RETRIES"))?,
            retry_interval_secs: parse_number("RETRY_INTERVAL", get("RETRY_INTERVAL"))?,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid {service_name} configuration: {e}")))?;

        debug!(
            service = service_name,
            auth_type = %config.effective_auth_type(),
            has_url = config.url.is_some(),
            "Loaded external service configuration"
        );

        Ok(config)
    }

    /// The authentication scheme in effect.
    #[must_use]
    pub fn effective_auth_type(&self) -> AuthType {
        self.auth_type.unwrap_or(AuthType::Iam)
    }

    /// Maximum delay between retries.
    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    /// Build the configured authenticator.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials required by the scheme are missing.
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>, Error> {
        let authenticator: Arc<dyn Authenticator> = match self.effective_auth_type() {
            AuthType::NoAuth => Arc::new(NoAuthAuthenticator),
            AuthType::Basic => Arc::new(BasicAuthenticator::new(
                self.username.clone().unwrap_or_default(),
                expose(self.password.as_ref()),
            )),
            AuthType::BearerToken => {
                Arc::new(BearerTokenAuthenticator::new(expose(self.bearer_token.as_ref())))
            }
            AuthType::Iam => {
                let mut iam = IamAuthenticator::new(expose(self.apikey.as_ref()));
                if let Some(url) = &self.auth_url {
                    iam = iam.with_url(url.clone());
                }
                Arc::new(iam)
            }
        };
        authenticator.validate()?;
        Ok(authenticator)
    }

    /// Apply this configuration to a client builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the authenticator cannot be built.
    pub fn apply(&self, mut builder: ServiceClientBuilder) -> Result<ServiceClientBuilder, Error> {
        if let Some(url) = &self.url {
            builder = builder.with_base_url(url.clone());
        }
        builder = builder
            .with_shared_authenticator(self.authenticator()?)
            .with_tls_verify(!self.disable_ssl)
            .with_gzip_compression(self.enable_gzip);

        if self.enable_retries {
            builder = builder
                .with_retry_policy(RetryPolicy::enabled(self.max_retries, self.retry_interval()));
        }

        Ok(builder)
    }
}

fn expose(secret: Option<&SecretString>) -> String {
    secret
        .map(|value| value.expose_secret().to_string())
        .unwrap_or_default()
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool, Error> {
    match value {
        None => Ok(false),
        Some(value) => value.to_lowercase().parse::<bool>().map_err(|_| {
            Error::ConfigError(format!("{name} must be `true` or `false`, got `{value}`"))
        }),
    }
}

fn parse_number<T>(name: &str, value: Option<String>) -> Result<T, Error>
where
    T: FromStr + Default,
{
    match value {
        None => Ok(T::default()),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| Error::ConfigError(format!("{name} must be a number, got `{value}`"))),
    }
}
