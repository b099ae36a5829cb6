//! Per-operation options.
//!
//! Required values are constructor arguments; everything else is set with
//! `with_*` methods. Options are validated before a request is built.

use crate::models::{
    ClusterOrderInfo, DirectorSitePriceQuoteClusterInfo, FileShares, NewVdcDirectorSite,
    NewVdcEdge, NewVdcResourceGroup,
};
use serde::Serialize;
use std::collections::HashMap;
use validator::Validate;
use vmware_core::query::QueryParams;
use vmware_core::request::{OperationRequest, RequestParts};
use vmware_core::Result;

/// Adds the optional `Accept-Language` and custom header setters.
macro_rules! common_setters {
    ($options:ident) => {
        impl $options {
            /// Set the `Accept-Language` header.
            #[must_use]
            pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
                self.accept_language = Some(accept_language.into());
                self
            }

            /// Set custom request headers.
            #[must_use]
            pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
                self.headers = headers;
                self
            }
        }
    };
    ($options:ident, transaction_id) => {
        common_setters!($options);

        impl $options {
            /// Set the `X-Global-Transaction-ID` header used to correlate requests.
            #[must_use]
            pub fn with_x_global_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
                self.x_global_transaction_id = Some(transaction_id.into());
                self
            }
        }
    };
}

/// Options for creating a director site instance.
#[derive(Debug, Clone, Validate)]
pub struct CreateWorkloadDomainOptions {
    /// Director site name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Resource group for the director site.
    #[validate(length(min = 1))]
    pub resource_group: String,
    /// Clusters to deploy.
    #[validate(length(min = 1), nested)]
    pub clusters: Vec<ClusterOrderInfo>,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl CreateWorkloadDomainOptions {
    /// Create options for a director site.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        resource_group: impl Into<String>,
        clusters: Vec<ClusterOrderInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_group: resource_group.into(),
            clusters,
            accept_language: None,
            x_global_transaction_id: None,
            headers: HashMap::new(),
        }
    }
}

common_setters!(CreateWorkloadDomainOptions, transaction_id);

#[derive(Serialize)]
struct CreateWorkloadDomainBody<'a> {
    name: &'a str,
    resource_group: &'a str,
    clusters: &'a [ClusterOrderInfo],
}

impl OperationRequest for CreateWorkloadDomainOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref())
            .json_body(&CreateWorkloadDomainBody {
                name: &self.name,
                resource_group: &self.resource_group,
                clusters: &self.clusters,
            })
    }
}

/// Options for listing director site instances.
#[derive(Debug, Clone, Default, Validate)]
pub struct ListWorkloadDomainInstancesOptions {
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl ListWorkloadDomainInstancesOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

common_setters!(ListWorkloadDomainInstancesOptions, transaction_id);

impl OperationRequest for ListWorkloadDomainInstancesOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        Ok(RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref()))
    }
}

/// Options addressing a single director site.
#[derive(Debug, Clone, Default, Validate)]
pub struct SiteOptions {
    /// Director site ID.
    #[validate(length(min = 1))]
    pub site_id: String,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl SiteOptions {
    /// Address director site `site_id`.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }

    /// Set the director site ID.
    #[must_use]
    pub fn with_site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = site_id.into();
        self
    }
}

common_setters!(SiteOptions, transaction_id);

impl OperationRequest for SiteOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        Ok(RequestParts::new()
            .path_param("site_id", &self.site_id)
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref()))
    }
}

/// Options for getting a director site instance.
pub type GetSpecificWorkloadDomainInstanceOptions = SiteOptions;

/// Options for deleting a director site instance.
pub type DeleteWorkloadDomainOptions = SiteOptions;

/// Options for listing the clusters of a director site.
pub type ListClusterInstancesOptions = SiteOptions;

/// Options addressing a single cluster of a director site.
#[derive(Debug, Clone, Default, Validate)]
pub struct ClusterOptions {
    /// Director site ID.
    #[validate(length(min = 1))]
    pub site_id: String,
    /// Cluster ID.
    #[validate(length(min = 1))]
    pub cluster_id: String,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl ClusterOptions {
    /// Address cluster `cluster_id` of director site `site_id`.
    #[must_use]
    pub fn new(site_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            cluster_id: cluster_id.into(),
            ..Self::default()
        }
    }
}

common_setters!(ClusterOptions, transaction_id);

impl ClusterOptions {
    fn parts(&self) -> RequestParts {
        RequestParts::new()
            .path_param("site_id", &self.site_id)
            .path_param("cluster_id", &self.cluster_id)
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref())
    }
}

impl OperationRequest for ClusterOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        Ok(self.parts())
    }
}

/// Options for getting a cluster of a director site.
pub type GetSpecificClusterInstanceOptions = ClusterOptions;

/// Options for changing the host count of a cluster.
#[derive(Debug, Clone, Validate)]
pub struct SetHostsCountOptions {
    /// Cluster to change.
    #[validate(nested)]
    pub cluster: ClusterOptions,
    /// New number of hosts.
    pub count: i64,
}

impl SetHostsCountOptions {
    /// Set cluster `cluster_id` of site `site_id` to `count` hosts.
    #[must_use]
    pub fn new(site_id: impl Into<String>, cluster_id: impl Into<String>, count: i64) -> Self {
        Self {
            cluster: ClusterOptions::new(site_id, cluster_id),
            count,
        }
    }

    /// Set the `Accept-Language` header.
    #[must_use]
    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.cluster = self.cluster.with_accept_language(accept_language);
        self
    }

    /// Set the `X-Global-Transaction-ID` header used to correlate requests.
    #[must_use]
    pub fn with_x_global_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.cluster = self.cluster.with_x_global_transaction_id(transaction_id);
        self
    }

    /// Set custom request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.cluster = self.cluster.with_headers(headers);
        self
    }
}

#[derive(Serialize)]
struct SetHostsCountBody {
    count: i64,
}

impl OperationRequest for SetHostsCountOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        self.cluster
            .parts()
            .json_body(&SetHostsCountBody { count: self.count })
    }
}

/// Options for changing the file shares of a cluster.
#[derive(Debug, Clone, Validate)]
pub struct SetFileSharesOptions {
    /// Cluster to change.
    #[validate(nested)]
    pub cluster: ClusterOptions,
    /// Storage tiers to set; unset tiers are omitted from the request.
    pub file_shares: FileShares,
}

impl SetFileSharesOptions {
    /// Change the file shares of cluster `cluster_id` on site `site_id`.
    #[must_use]
    pub fn new(site_id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            cluster: ClusterOptions::new(site_id, cluster_id),
            file_shares: FileShares::new(),
        }
    }

    /// Replace all storage tiers at once.
    #[must_use]
    pub fn with_file_shares(mut self, file_shares: FileShares) -> Self {
        self.file_shares = file_shares;
        self
    }

    /// Set the 0.25 IOPS/GB tier size.
    #[must_use]
    pub fn with_storage_point_two_five_iops_gb(mut self, size: i64) -> Self {
        self.file_shares.storage_point_two_five_iops_gb = Some(size);
        self
    }

    /// Set the 2 IOPS/GB tier size.
    #[must_use]
    pub fn with_storage_two_iops_gb(mut self, size: i64) -> Self {
        self.file_shares.storage_two_iops_gb = Some(size);
        self
    }

    /// Set the 4 IOPS/GB tier size.
    #[must_use]
    pub fn with_storage_four_iops_gb(mut self, size: i64) -> Self {
        self.file_shares.storage_four_iops_gb = Some(size);
        self
    }

    /// Set the 10 IOPS/GB tier size.
    #[must_use]
    pub fn with_storage_ten_iops_gb(mut self, size: i64) -> Self {
        self.file_shares.storage_ten_iops_gb = Some(size);
        self
    }

    /// Set the `Accept-Language` header.
    #[must_use]
    pub fn with_accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.cluster = self.cluster.with_accept_language(accept_language);
        self
    }

    /// Set the `X-Global-Transaction-ID` header used to correlate requests.
    #[must_use]
    pub fn with_x_global_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.cluster = self.cluster.with_x_global_transaction_id(transaction_id);
        self
    }

    /// Set custom request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.cluster = self.cluster.with_headers(headers);
        self
    }
}

impl OperationRequest for SetFileSharesOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        self.cluster.parts().json_body(&self.file_shares)
    }
}

/// Options for catalog operations that take no parameters: regions, host
/// profiles and prices.
#[derive(Debug, Clone, Default, Validate)]
pub struct CatalogOptions {
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl CatalogOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

common_setters!(CatalogOptions, transaction_id);

impl OperationRequest for CatalogOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        Ok(RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref()))
    }
}

/// Options for listing regions.
pub type GetRegionsOptions = CatalogOptions;

/// Options for listing host profiles.
pub type ViewInstanceOptions = CatalogOptions;

/// Options for listing prices.
pub type ListPricesOptions = CatalogOptions;

/// Options for replacing the admin password of a director site.
#[derive(Debug, Clone, Default, Validate)]
pub struct ReplaceOrgAdminPasswordOptions {
    /// Director site ID.
    #[validate(length(min = 1))]
    pub site_id: String,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl ReplaceOrgAdminPasswordOptions {
    /// Replace the admin password of director site `site_id`.
    #[must_use]
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            headers: HashMap::new(),
        }
    }

    /// Set custom request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

impl OperationRequest for ReplaceOrgAdminPasswordOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        let mut query = QueryParams::new();
        query.push("site_id", &self.site_id);
        Ok(RequestParts::new()
            .query(query)
            .custom_headers(&self.headers))
    }
}

/// Options for quoting the price of a director site configuration.
#[derive(Debug, Clone, Default, Validate)]
pub struct GetVcddPriceOptions {
    /// Country code for the quote.
    pub country: Option<String>,
    /// Clusters to price.
    pub clusters: Option<Vec<DirectorSitePriceQuoteClusterInfo>>,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Optional transaction correlation id.
    pub x_global_transaction_id: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl GetVcddPriceOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the clusters to price.
    #[must_use]
    pub fn with_clusters(mut self, clusters: Vec<DirectorSitePriceQuoteClusterInfo>) -> Self {
        self.clusters = Some(clusters);
        self
    }
}

common_setters!(GetVcddPriceOptions, transaction_id);

#[derive(Serialize)]
struct GetVcddPriceBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clusters: Option<&'a [DirectorSitePriceQuoteClusterInfo]>,
}

impl OperationRequest for GetVcddPriceOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .transaction_id(self.x_global_transaction_id.as_deref())
            .json_body(&GetVcddPriceBody {
                country: self.country.as_deref(),
                clusters: self.clusters.as_deref(),
            })
    }
}

/// Options for listing Virtual Data Centers.
#[derive(Debug, Clone, Default, Validate)]
pub struct ListVdcsOptions {
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl ListVdcsOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

common_setters!(ListVdcsOptions);

impl OperationRequest for ListVdcsOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        Ok(RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref()))
    }
}

/// Options for creating a Virtual Data Center.
#[derive(Debug, Clone, Validate)]
pub struct CreateVdcOptions {
    /// VDC name, unique within the region.
    #[validate(length(min = 1))]
    pub name: String,
    /// Director site and cluster to deploy on.
    #[validate(nested)]
    pub director_site: NewVdcDirectorSite,
    /// Networking edge to deploy.
    #[validate(nested)]
    pub edge: Option<NewVdcEdge>,
    /// Resource group; the account default is used when unset.
    #[validate(nested)]
    pub resource_group: Option<NewVdcResourceGroup>,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl CreateVdcOptions {
    /// Create options for VDC `name` on `director_site`.
    #[must_use]
    pub fn new(name: impl Into<String>, director_site: NewVdcDirectorSite) -> Self {
        Self {
            name: name.into(),
            director_site,
            edge: None,
            resource_group: None,
            accept_language: None,
            headers: HashMap::new(),
        }
    }

    /// Set the networking edge.
    #[must_use]
    pub fn with_edge(mut self, edge: NewVdcEdge) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Set the resource group.
    #[must_use]
    pub fn with_resource_group(mut self, resource_group: NewVdcResourceGroup) -> Self {
        self.resource_group = Some(resource_group);
        self
    }
}

common_setters!(CreateVdcOptions);

#[derive(Serialize)]
struct CreateVdcBody<'a> {
    name: &'a str,
    director_site: &'a NewVdcDirectorSite,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge: Option<&'a NewVdcEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_group: Option<&'a NewVdcResourceGroup>,
}

impl OperationRequest for CreateVdcOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        RequestParts::new()
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref())
            .json_body(&CreateVdcBody {
                name: &self.name,
                director_site: &self.director_site,
                edge: self.edge.as_ref(),
                resource_group: self.resource_group.as_ref(),
            })
    }
}

/// Options addressing a single Virtual Data Center.
#[derive(Debug, Clone, Default, Validate)]
pub struct VdcOptions {
    /// VDC ID.
    #[validate(length(min = 1))]
    pub vdc_id: String,
    /// Optional `Accept-Language`.
    pub accept_language: Option<String>,
    /// Custom request headers.
    pub headers: HashMap<String, String>,
}

impl VdcOptions {
    /// Address VDC `vdc_id`.
    #[must_use]
    pub fn new(vdc_id: impl Into<String>) -> Self {
        Self {
            vdc_id: vdc_id.into(),
            ..Self::default()
        }
    }

    /// Set the VDC ID.
    #[must_use]
    pub fn with_vdc_id(mut self, vdc_id: impl Into<String>) -> Self {
        self.vdc_id = vdc_id.into();
        self
    }
}

common_setters!(VdcOptions);

impl OperationRequest for VdcOptions {
    fn request_parts(&self) -> Result<RequestParts> {
        self.validate()?;
        Ok(RequestParts::new()
            .path_param("vdc_id", &self.vdc_id)
            .custom_headers(&self.headers)
            .accept_language(self.accept_language.as_deref()))
    }
}

/// Options for getting a Virtual Data Center.
pub type GetVdcOptions = VdcOptions;

/// Options for deleting a Virtual Data Center.
pub type DeleteVdcOptions = VdcOptions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeSize, EdgeType};
    use serde_json::json;
    use vmware_core::Error;

    #[test]
    fn test_missing_site_id_fails_validation() {
        let err = SiteOptions::new("").request_parts().unwrap_err();
        match err {
            Error::ValidationError(message) => assert!(message.contains("site_id")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_cluster_options_require_both_ids() {
        assert!(ClusterOptions::new("site", "").request_parts().is_err());
        assert!(SetHostsCountOptions::new("", "cluster", 3).request_parts().is_err());
        assert!(SetFileSharesOptions::new("site", "").request_parts().is_err());
    }

    #[test]
    fn test_set_file_shares_body_omits_unset_tiers() {
        let parts = SetFileSharesOptions::new("site", "cluster")
            .with_storage_two_iops_gb(100)
            .request_parts()
            .unwrap();
        assert_eq!(parts.body, Some(json!({"STORAGE_TWO_IOPS_GB": 100})));

        let parts = SetFileSharesOptions::new("site", "cluster").request_parts().unwrap();
        assert_eq!(parts.body, Some(json!({})));
    }

    #[test]
    fn test_create_vdc_body() {
        let parts = CreateVdcOptions::new("sampleVDC", NewVdcDirectorSite::new("site-1", "cl-1"))
            .with_edge(NewVdcEdge::new(EdgeType::Dedicated).with_size(EdgeSize::Medium))
            .with_accept_language("en-us")
            .request_parts()
            .unwrap();

        assert_eq!(
            parts.body,
            Some(json!({
                "name": "sampleVDC",
                "director_site": {"id": "site-1", "cluster": {"id": "cl-1"}},
                "edge": {"size": "medium", "type": "dedicated"}
            }))
        );
        assert_eq!(parts.accept_language.as_deref(), Some("en-us"));
        assert!(parts.transaction_id.is_none());
    }

    #[test]
    fn test_create_vdc_validates_nested_models() {
        let options = CreateVdcOptions::new("vdc", NewVdcDirectorSite::new("site-1", ""));
        assert!(matches!(options.request_parts(), Err(Error::ValidationError(_))));

        let options = CreateVdcOptions::new("vdc", NewVdcDirectorSite::new("site-1", "c"))
            .with_resource_group(NewVdcResourceGroup::new(""));
        assert!(options.request_parts().is_err());
    }

    #[test]
    fn test_create_workload_domain_requires_clusters() {
        let options = CreateWorkloadDomainOptions::new("site", "Default", Vec::new());
        assert!(options.request_parts().is_err());

        let cluster = ClusterOrderInfo::new(
            "cluster_1",
            "dal10",
            2,
            FileShares::new().with_two_iops_gb(100),
            "BM_2S_20_CORES_192_GB",
        );
        let parts = CreateWorkloadDomainOptions::new("site", "Default", vec![cluster])
            .with_x_global_transaction_id("txn")
            .request_parts()
            .unwrap();
        assert_eq!(parts.transaction_id.as_deref(), Some("txn"));
        assert_eq!(parts.body.unwrap()["clusters"][0]["file_shares"]["STORAGE_TWO_IOPS_GB"], 100);
    }

    #[test]
    fn test_replace_password_uses_query() {
        let parts = ReplaceOrgAdminPasswordOptions::new("site-1").request_parts().unwrap();
        assert_eq!(parts.query.pairs(), &[("site_id", "site-1".to_string())]);
        assert!(parts.body.is_none());
        assert!(parts.accept_language.is_none());
        assert!(parts.transaction_id.is_none());
    }

    #[test]
    fn test_vcdd_price_body() {
        let parts = GetVcddPriceOptions::new().request_parts().unwrap();
        assert_eq!(parts.body, Some(json!({})));

        let parts = GetVcddPriceOptions::new()
            .with_country("USA")
            .with_clusters(vec![DirectorSitePriceQuoteClusterInfo {
                name: Some("c1".to_string()),
                host_count: Some(2),
                ..DirectorSitePriceQuoteClusterInfo::default()
            }])
            .request_parts()
            .unwrap();
        assert_eq!(
            parts.body,
            Some(json!({"country": "USA", "clusters": [{"name": "c1", "host_count": 2}]}))
        );
    }
}
