//! Declarative endpoint descriptors and per-call request parts.
//!
//! An [`Endpoint`] is the static half of an operation: method, path template
//! and identification. [`RequestParts`] is the per-call half produced from an
//! options value. The executor in [`crate::client`] combines the two.

use crate::error::{Error, Result};
use crate::query::QueryParams;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// Header carrying the caller's transaction correlation id.
pub const TRANSACTION_ID_HEADER: &str = "X-Global-Transaction-ID";

/// Header identifying the SDK, service and operation that issued a request.
pub const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

const JSON_MIME: &str = "application/json";

/// Static description of one API operation.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Service name used in analytics headers (e.g. `vmware`)
    pub service_name: &'static str,
    /// Service API version (e.g. `V1`)
    pub service_version: &'static str,
    /// Operation identifier (e.g. `CreateWorkloadDomain`)
    pub operation_id: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path template relative to the service URL, with `{name}` placeholders
    pub path: &'static str,
}

impl Endpoint {
    /// Describe an operation.
    #[must_use]
    pub const fn new(
        service_name: &'static str,
        service_version: &'static str,
        operation_id: &'static str,
        method: Method,
        path: &'static str,
    ) -> Self {
        Self {
            service_name,
            service_version,
            operation_id,
            method,
            path,
        }
    }

    /// Names of the placeholders in the path template, in order.
    pub fn path_param_names(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }

    /// Resolve the request URL against `base`.
    ///
    /// Each substituted value becomes exactly one path segment; characters that
    /// are not valid in a segment (including `/`) are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no (or an empty) value, or if
    /// `base` cannot carry a path.
    pub fn resolve_url(&self, base: &Url, path_params: &[(&'static str, String)]) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::InvalidEndpoint(format!("`{base}` cannot be used as a service URL"))
            })?;
            segments.pop_if_empty();

            for segment in self.path.split('/').filter(|s| !s.is_empty()) {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let value = path_params
                            .iter()
                            .find(|(key, _)| *key == name)
                            .map(|(_, value)| value.as_str())
                            .filter(|value| !value.is_empty())
                            .ok_or_else(|| {
                                Error::ValidationError(format!(
                                    "{}: path parameter `{name}` must not be empty",
                                    self.operation_id
                                ))
                            })?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        Ok(url)
    }

    /// Value of the SDK analytics header for this operation.
    #[must_use]
    pub fn analytics_header(&self) -> String {
        format!(
            "service_name={};service_version={};operation_id={}",
            self.service_name, self.service_version, self.operation_id
        )
    }
}

/// Per-call request data produced from an operation's options.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    /// Path template substitutions
    pub path_params: Vec<(&'static str, String)>,
    /// Query parameters
    pub query: QueryParams,
    /// Caller-supplied headers, applied first
    pub headers: Vec<(String, String)>,
    /// Optional `Accept-Language`
    pub accept_language: Option<String>,
    /// Optional transaction correlation id
    pub transaction_id: Option<String>,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
}

impl RequestParts {
    /// Start with empty parts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a path template placeholder.
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Set the query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Add caller-supplied headers.
    #[must_use]
    pub fn custom_headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set the `Accept-Language` header value.
    #[must_use]
    pub fn accept_language(mut self, value: Option<&str>) -> Self {
        self.accept_language = value.map(str::to_string);
        self
    }

    /// Set the transaction correlation id.
    #[must_use]
    pub fn transaction_id(mut self, value: Option<&str>) -> Self {
        self.transaction_id = value.map(str::to_string);
        self
    }

    /// Encode `body` as the JSON request payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn json_body<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Assemble the operation headers in precedence order.
    ///
    /// Custom headers first, then SDK identification, `Accept`, `Content-Type`
    /// (only with a body), `Accept-Language` and the transaction id. A later
    /// header replaces an earlier one with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is not valid HTTP.
    pub fn header_map(&self, endpoint: &Endpoint) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        headers.insert(
            HeaderName::from_static("x-ibmcloud-sdk-analytics"),
            header_value(SDK_ANALYTICS_HEADER, &endpoint.analytics_header())?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MIME));

        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME));
        }
        if let Some(language) = &self.accept_language {
            headers.insert(ACCEPT_LANGUAGE, header_value("Accept-Language", language)?);
        }
        if let Some(transaction_id) = &self.transaction_id {
            headers.insert(
                HeaderName::from_static("x-global-transaction-id"),
                header_value(TRANSACTION_ID_HEADER, transaction_id)?,
            );
        }

        Ok(headers)
    }
}

/// Conversion from an operation's options into request parts.
pub trait OperationRequest {
    /// Produce the per-call request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded.
    fn request_parts(&self) -> Result<RequestParts>;
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|err| Error::ValidationError(format!("invalid header name `{name}`: {err}")))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| Error::ValidationError(format!("invalid value for header `{name}`: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTS_COUNT: Endpoint = Endpoint::new(
        "vmware",
        "V1",
        "SetHostsCount",
        Method::PUT,
        "/director_sites/{site_id}/clusters/{cluster_id}/hosts_count",
    );

    fn base() -> Url {
        Url::parse("https://vmware.cloud.ibm.com/v1").unwrap()
    }

    #[test]
    fn resolve_url_substitutes_exactly() {
        let params = vec![("site_id", "abc".to_string()), ("cluster_id", "def".to_string())];
        let url = HOSTS_COUNT.resolve_url(&base(), &params).unwrap();
        assert_eq!(url.path(), "/v1/director_sites/abc/clusters/def/hosts_count");
    }

    #[test]
    fn resolve_url_handles_trailing_slash_on_base() {
        let base = Url::parse("http://127.0.0.1:8080/").unwrap();
        let params = vec![("site_id", "abc".to_string()), ("cluster_id", "def".to_string())];
        let url = HOSTS_COUNT.resolve_url(&base, &params).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/director_sites/abc/clusters/def/hosts_count");
    }

    #[test]
    fn resolve_url_encodes_segment_delimiters() {
        let params = vec![("site_id", "a/b c".to_string()), ("cluster_id", "d".to_string())];
        let url = HOSTS_COUNT.resolve_url(&base(), &params).unwrap();
        assert_eq!(url.path(), "/v1/director_sites/a%2Fb%20c/clusters/d/hosts_count");
    }

    #[test]
    fn resolve_url_rejects_missing_or_empty_params() {
        let missing = HOSTS_COUNT.resolve_url(&base(), &[("site_id", "abc".to_string())]);
        assert!(matches!(missing, Err(Error::ValidationError(_))));

        let empty = HOSTS_COUNT.resolve_url(
            &base(),
            &[("site_id", String::new()), ("cluster_id", "def".to_string())],
        );
        assert!(matches!(empty, Err(Error::ValidationError(_))));
    }

    #[test]
    fn path_param_names_in_order() {
        let names: Vec<_> = HOSTS_COUNT.path_param_names().collect();
        assert_eq!(names, vec!["site_id", "cluster_id"]);
    }

    #[test]
    fn header_map_precedence() {
        let mut custom = HashMap::new();
        custom.insert("Accept".to_string(), "text/plain".to_string());
        custom.insert("X-Custom".to_string(), "1".to_string());

        let parts = RequestParts::new()
            .custom_headers(&custom)
            .accept_language(Some("en-US"))
            .transaction_id(Some("txn-1"))
            .json_body(&serde_json::json!({"count": 2}))
            .unwrap();

        let headers = parts.header_map(&HOSTS_COUNT).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), JSON_MIME);
        assert_eq!(headers.get("x-custom").unwrap(), "1");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON_MIME);
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), "en-US");
        assert_eq!(headers.get(TRANSACTION_ID_HEADER).unwrap(), "txn-1");
        assert_eq!(
            headers.get(SDK_ANALYTICS_HEADER).unwrap(),
            "service_name=vmware;service_version=V1;operation_id=SetHostsCount"
        );
    }

    #[test]
    fn header_map_without_body_has_no_content_type() {
        let headers = RequestParts::new().header_map(&HOSTS_COUNT).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(headers.get(ACCEPT_LANGUAGE).is_none());
    }

    #[test]
    fn header_map_rejects_invalid_names() {
        let mut custom = HashMap::new();
        custom.insert("bad header".to_string(), "x".to_string());
        let result = RequestParts::new().custom_headers(&custom).header_map(&HOSTS_COUNT);
        assert!(matches!(result, Err(Error::ValidationError(_))));
    }
}
