//! Asynchronous VMware as a Service v1 client implementation.

use crate::endpoints;
use crate::models::{
    Cluster, DirectorSite, DirectorSitePriceQuoteResponse, DirectorSitePricingInfo,
    DirectorSiteRegions, FileShares, ListClusters, ListDirectorSites, ListHostProfiles, ListVdcs,
    NewPassword, SetHostsCountResponse, Vdc,
};
use crate::options::{
    CreateVdcOptions, CreateWorkloadDomainOptions, DeleteVdcOptions, DeleteWorkloadDomainOptions,
    GetRegionsOptions, GetSpecificClusterInstanceOptions, GetSpecificWorkloadDomainInstanceOptions,
    GetVcddPriceOptions, GetVdcOptions, ListClusterInstancesOptions, ListPricesOptions,
    ListVdcsOptions, ListWorkloadDomainInstancesOptions, ReplaceOrgAdminPasswordOptions,
    SetFileSharesOptions, SetHostsCountOptions, ViewInstanceOptions,
};
use crate::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vmware_core::auth::Authenticator;
use vmware_core::client::{ClientConfig, RetryPolicy};
use vmware_core::config::ServiceConfig;
use vmware_core::request::{Endpoint, OperationRequest};
use vmware_core::{DetailedResponse, Error, ServiceClient, ServiceClientBuilder};

/// Default base URL of the service.
pub const DEFAULT_SERVICE_URL: &str = "https://vmware.cloud.ibm.com/v1";

/// Default service name used to look up external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "vmware";

const USER_AGENT: &str = concat!("vmware-v1/", env!("CARGO_PKG_VERSION"));

/// Builder for [`VmwareClient`].
#[derive(Debug, Clone)]
pub struct VmwareClientBuilder {
    inner: ServiceClientBuilder,
}

impl VmwareClientBuilder {
    /// Create a builder targeting [`DEFAULT_SERVICE_URL`].
    #[must_use]
    pub fn new() -> Self {
        let builder = ServiceClientBuilder::new(DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL)
            .with_user_agent(USER_AGENT);
        Self { inner: builder }
    }

    /// Override the base service URL; an empty URL is accepted and fails at call time.
    #[must_use]
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.with_base_url(url);
        self
    }

    /// Set the authenticator.
    #[must_use]
    pub fn with_authenticator<A>(mut self, authenticator: A) -> Self
    where
        A: Authenticator + 'static,
    {
        self.inner = self.inner.with_authenticator(authenticator);
        self
    }

    /// Set an authenticator shared with other clients.
    #[must_use]
    pub fn with_shared_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.inner = self.inner.with_shared_authenticator(authenticator);
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Headers added to every request that does not already carry them.
    #[must_use]
    pub fn with_default_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.inner = self.inner.with_default_headers(headers);
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.inner = self.inner.with_tls_verify(verify);
        self
    }

    /// Enable or disable request body compression.
    #[must_use]
    pub fn with_gzip_compression(mut self, enabled: bool) -> Self {
        self.inner = self.inner.with_gzip_compression(enabled);
        self
    }

    /// Apply an external service configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authenticator cannot be built.
    pub fn with_service_config(mut self, config: &ServiceConfig) -> Result<Self> {
        self.inner = config.apply(self.inner)?;
        Ok(self)
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the authenticator is missing or invalid, or the
    /// service URL is malformed.
    pub fn build(self) -> Result<VmwareClient> {
        let inner = self.inner.build()?;
        Ok(VmwareClient { inner })
    }
}

impl Default for VmwareClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Asynchronous VMware as a Service v1 client.
///
/// Clones are independent handles over a shared connection pool.
#[derive(Debug, Clone)]
pub struct VmwareClient {
    inner: ServiceClient,
}

impl VmwareClient {
    /// Construct a client for the default URL with `authenticator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the authenticator fails validation.
    pub fn new<A>(authenticator: A) -> Result<Self>
    where
        A: Authenticator + 'static,
    {
        VmwareClientBuilder::new()
            .with_authenticator(authenticator)
            .build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> VmwareClientBuilder {
        VmwareClientBuilder::new()
    }

    /// Construct a client from environment variables prefixed with the
    /// upper-cased `service_name` (e.g. `VMWARE_URL`, `VMWARE_AUTH_TYPE`).
    ///
    /// A non-empty `url_override` replaces any configured URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_external_config(service_name: &str, url_override: Option<&str>) -> Result<Self> {
        let config = ServiceConfig::from_env(service_name)?;
        Self::from_service_config(&config, url_override)
    }

    /// Construct a client from an already loaded [`ServiceConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_service_config(config: &ServiceConfig, url_override: Option<&str>) -> Result<Self> {
        let mut client = VmwareClientBuilder::new()
            .with_service_config(config)?
            .build()?;

        if let Some(url) = url_override.filter(|url| !url.is_empty()) {
            client.set_service_url(url)?;
        }

        debug!(
            service_url = client.service_url(),
            auth_type = %client.inner.authenticator().auth_type(),
            "Created VMware client from external configuration"
        );
        Ok(client)
    }

    /// Regional URL lookup; this service has a single global endpoint.
    ///
    /// # Errors
    ///
    /// Always returns a configuration error.
    pub fn service_url_for_region(region: &str) -> Result<String> {
        Err(Error::ConfigError(format!(
            "service does not support regional URLs (requested `{region}`)"
        )))
    }

    /// The base service URL; empty when unset.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.inner.service_url()
    }

    /// Replace the base service URL. An empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is non-empty and malformed.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.inner.set_service_url(url)
    }

    /// Replace the headers added to every request that does not already carry them.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is not valid HTTP.
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> Result<()> {
        self.inner.set_default_headers(headers)
    }

    /// Enable or disable gzip compression of request bodies.
    pub fn set_enable_gzip_compression(&mut self, enabled: bool) {
        self.inner.set_enable_gzip_compression(enabled);
    }

    /// Whether request bodies are gzip-compressed.
    #[must_use]
    pub fn gzip_compression_enabled(&self) -> bool {
        self.inner.gzip_compression_enabled()
    }

    /// Enable retries; zero values select the defaults (4 retries, 30 second cap).
    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.inner.enable_retries(max_retries, max_interval);
    }

    /// Disable retries.
    pub fn disable_retries(&mut self) {
        self.inner.disable_retries();
    }

    /// A handle whose calls fail with a deadline-exceeded timeout unless they
    /// complete within `deadline`.
    #[must_use]
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            inner: self.inner.with_deadline(deadline),
        }
    }

    /// Access the underlying executor.
    #[must_use]
    pub fn service_client(&self) -> &ServiceClient {
        &self.inner
    }

    /// Create a director site instance.
    pub async fn create_workload_domain(
        &self,
        options: &CreateWorkloadDomainOptions,
    ) -> Result<DetailedResponse<DirectorSite>> {
        self.call(&endpoints::CREATE_WORKLOAD_DOMAIN, options).await
    }

    /// List director site instances.
    pub async fn list_workload_domain_instances(
        &self,
        options: &ListWorkloadDomainInstancesOptions,
    ) -> Result<DetailedResponse<ListDirectorSites>> {
        self.call(&endpoints::LIST_WORKLOAD_DOMAIN_INSTANCES, options)
            .await
    }

    /// Get a director site instance.
    pub async fn get_specific_workload_domain_instance(
        &self,
        options: &GetSpecificWorkloadDomainInstanceOptions,
    ) -> Result<DetailedResponse<DirectorSite>> {
        self.call(&endpoints::GET_SPECIFIC_WORKLOAD_DOMAIN_INSTANCE, options)
            .await
    }

    /// Delete a director site instance.
    pub async fn delete_workload_domain(
        &self,
        options: &DeleteWorkloadDomainOptions,
    ) -> Result<DetailedResponse<DirectorSite>> {
        self.call(&endpoints::DELETE_WORKLOAD_DOMAIN, options).await
    }

    /// List the clusters of a director site.
    pub async fn list_cluster_instances(
        &self,
        options: &ListClusterInstancesOptions,
    ) -> Result<DetailedResponse<ListClusters>> {
        self.call(&endpoints::LIST_CLUSTER_INSTANCES, options).await
    }

    /// Get a cluster of a director site.
    pub async fn get_specific_cluster_instance(
        &self,
        options: &GetSpecificClusterInstanceOptions,
    ) -> Result<DetailedResponse<Cluster>> {
        self.call(&endpoints::GET_SPECIFIC_CLUSTER_INSTANCE, options)
            .await
    }

    /// Change the host count of a cluster.
    pub async fn set_hosts_count(
        &self,
        options: &SetHostsCountOptions,
    ) -> Result<DetailedResponse<SetHostsCountResponse>> {
        self.call(&endpoints::SET_HOSTS_COUNT, options).await
    }

    /// Change the file shares of a cluster.
    pub async fn set_file_shares(
        &self,
        options: &SetFileSharesOptions,
    ) -> Result<DetailedResponse<FileShares>> {
        self.call(&endpoints::SET_FILE_SHARES, options).await
    }

    /// List the regions where director sites can be deployed.
    pub async fn get_regions(
        &self,
        options: &GetRegionsOptions,
    ) -> Result<DetailedResponse<DirectorSiteRegions>> {
        self.call(&endpoints::GET_REGIONS, options).await
    }

    /// List the available host profiles.
    pub async fn view_instance(
        &self,
        options: &ViewInstanceOptions,
    ) -> Result<DetailedResponse<ListHostProfiles>> {
        self.call(&endpoints::VIEW_INSTANCE, options).await
    }

    /// Replace the admin password of a director site.
    pub async fn replace_org_admin_password(
        &self,
        options: &ReplaceOrgAdminPasswordOptions,
    ) -> Result<DetailedResponse<NewPassword>> {
        self.call(&endpoints::REPLACE_ORG_ADMIN_PASSWORD, options)
            .await
    }

    /// List director site prices.
    pub async fn list_prices(
        &self,
        options: &ListPricesOptions,
    ) -> Result<DetailedResponse<DirectorSitePricingInfo>> {
        self.call(&endpoints::LIST_PRICES, options).await
    }

    /// Quote the price of a director site configuration.
    pub async fn get_vcdd_price(
        &self,
        options: &GetVcddPriceOptions,
    ) -> Result<DetailedResponse<DirectorSitePriceQuoteResponse>> {
        self.call(&endpoints::GET_VCDD_PRICE, options).await
    }

    /// List Virtual Data Centers.
    pub async fn list_vdcs(&self, options: &ListVdcsOptions) -> Result<DetailedResponse<ListVdcs>> {
        self.call(&endpoints::LIST_VDCS, options).await
    }

    /// Create a Virtual Data Center.
    pub async fn create_vdc(&self, options: &CreateVdcOptions) -> Result<DetailedResponse<Vdc>> {
        self.call(&endpoints::CREATE_VDC, options).await
    }

    /// Get a Virtual Data Center.
    pub async fn get_vdc(&self, options: &GetVdcOptions) -> Result<DetailedResponse<Vdc>> {
        self.call(&endpoints::GET_VDC, options).await
    }

    /// Delete a Virtual Data Center.
    pub async fn delete_vdc(&self, options: &DeleteVdcOptions) -> Result<DetailedResponse<Vdc>> {
        self.call(&endpoints::DELETE_VDC, options).await
    }

    async fn call<O, R>(&self, endpoint: &Endpoint, options: &O) -> Result<DetailedResponse<R>>
    where
        O: OperationRequest,
        R: DeserializeOwned,
    {
        let parts = options.request_parts()?;
        self.inner.invoke(endpoint, parts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ClusterOptions, SiteOptions, VdcOptions};
    use serde_json::json;
    use vmware_core::auth::{BasicAuthenticator, NoAuthAuthenticator};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> VmwareClient {
        VmwareClient::builder()
            .with_service_url(server.uri())
            .with_authenticator(NoAuthAuthenticator)
            .build()
            .unwrap()
    }

    #[test]
    fn default_service_url() {
        let client = VmwareClient::new(NoAuthAuthenticator).unwrap();
        assert_eq!(client.service_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn invalid_authenticator_is_rejected() {
        let err = VmwareClient::new(BasicAuthenticator::new("", "")).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn bad_service_url_is_rejected() {
        let err = VmwareClient::builder()
            .with_service_url("{BAD_URL_STRING")
            .with_authenticator(NoAuthAuthenticator)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn regional_urls_are_unsupported() {
        let err = VmwareClient::service_url_for_region("us-south").unwrap_err();
        assert!(err.to_string().contains("service does not support regional URLs"));
    }

    #[test]
    fn clone_is_independent() {
        let mut client = VmwareClient::new(NoAuthAuthenticator).unwrap();
        let clone = client.clone();
        client.set_service_url("https://example.test/v1").unwrap();
        assert_eq!(clone.service_url(), DEFAULT_SERVICE_URL);
        assert_eq!(client.service_url(), "https://example.test/v1");
    }

    #[test]
    fn external_config_with_url_override() {
        let config = ServiceConfig {
            url: Some("https://vmwarev1/api".to_string()),
            auth_type: Some(vmware_core::auth::AuthType::NoAuth),
            ..ServiceConfig::default()
        };

        let client = VmwareClient::from_service_config(&config, None).unwrap();
        assert_eq!(client.service_url(), "https://vmwarev1/api");

        let client =
            VmwareClient::from_service_config(&config, Some("https://testService/api")).unwrap();
        assert_eq!(client.service_url(), "https://testService/api");
    }

    #[tokio::test]
    async fn get_vdc_sends_accept_language_but_no_transaction_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vdcs/vdc-1"))
            .and(header("Accept-Language", "en-us"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "vdc-1",
                "name": "sampleVDC",
                "status": "ReadyToUse",
                "edges": [{"id": "e1", "public_ips": ["10.0.0.1"], "type": "shared"}],
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .get_vdc(&VdcOptions::new("vdc-1").with_accept_language("en-us"))
            .await
            .unwrap();
        let vdc = response.result.unwrap();
        assert_eq!(vdc.name, "sampleVDC");
        assert_eq!(vdc.edges[0].public_ips, vec!["10.0.0.1".to_string()]);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("x-global-transaction-id").is_none());
    }

    #[tokio::test]
    async fn set_hosts_count_sends_body_and_transaction_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/director_sites/abc/clusters/def/hosts_count"))
            .and(header("X-Global-Transaction-ID", "txn-7"))
            .and(body_json(json!({"count": 3})))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"message": "The request has been accepted."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .set_hosts_count(
                &SetHostsCountOptions::new("abc", "def", 3).with_x_global_transaction_id("txn-7"),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code(), 202);
        assert_eq!(
            response.result.unwrap().message.as_deref(),
            Some("The request has been accepted.")
        );
    }

    #[tokio::test]
    async fn replace_org_admin_password_uses_query() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/director_site_password"))
            .and(query_param("site_id", "site-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"password": "n3wP@ss"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = test_client(&server)
            .replace_org_admin_password(&ReplaceOrgAdminPasswordOptions::new("site-1"))
            .await
            .unwrap();
        assert_eq!(response.result.unwrap().password, "n3wP@ss");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn get_regions_decodes_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/director_site_regions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "director_site_regions": {
                    "us-south": {
                        "datacenters": [{"display_name": "Dallas 10", "name": "dal10", "uplink_speed": "35000"}],
                        "endpoint": "https://api.dal.us.ibm.com"
                    }
                }
            })))
            .mount(&server)
            .await;

        let regions = test_client(&server)
            .get_regions(&GetRegionsOptions::new())
            .await
            .unwrap()
            .into_result()
            .unwrap();
        let detail = &regions.director_site_regions["us-south"];
        assert_eq!(detail.datacenters[0].name.as_deref(), Some("dal10"));
    }

    #[tokio::test]
    async fn validation_happens_before_io() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .get_specific_cluster_instance(&ClusterOptions::new("site", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));

        let err = client
            .delete_workload_domain(&SiteOptions::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }
}
