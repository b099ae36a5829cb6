//! VMware as a Service domain models.
//!
//! Response types tolerate missing and `null` fields; request types carry
//! their own required-field validation.
//!
//! Enumerated values fall back to an `Unknown` variant for values added to
//! the service later. That variant does not retain the received string, so
//! a decoded response re-encodes it as `"Unknown"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Reads `null` as the field's default, as for a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle state of a director site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DirectorSiteStatus {
    /// Being provisioned.
    Creating,
    /// Deleted.
    Deleted,
    /// Being deleted.
    Deleting,
    /// Provisioned and usable.
    ReadyToUse,
    /// A change is being applied.
    Updating,
    /// A state this client does not know about. The received value is not
    /// kept; re-encoding writes `"Unknown"`.
    #[serde(other)]
    Unknown,
}

/// Storage type of a cluster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// NFS file shares.
    Nfs,
    /// Other/unknown storage type.
    #[serde(other)]
    Unknown,
}

/// Billing plan of a cluster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingPlan {
    /// Billed monthly.
    Monthly,
    /// Other/unknown billing plan.
    #[serde(other)]
    Unknown,
}

/// Size of a networking edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSize {
    /// Medium edge.
    Medium,
    /// Large edge.
    Large,
    /// Extra large edge.
    ExtraLarge,
    /// Other/unknown size.
    #[serde(other)]
    Unknown,
}

impl EdgeSize {
    /// Returns the size as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra_large",
            Self::Unknown => "unknown",
        }
    }
}

/// Whether an edge is shared between VDCs or dedicated to one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Resources dedicated to a single VDC.
    Dedicated,
    /// Resources shared between VDCs.
    Shared,
    /// Other/unknown edge type.
    #[serde(other)]
    Unknown,
}

impl EdgeType {
    /// Returns the type as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dedicated => "dedicated",
            Self::Shared => "shared",
            Self::Unknown => "unknown",
        }
    }
}

/// Lifecycle state of a Virtual Data Center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VdcStatus {
    /// Being provisioned.
    Creating,
    /// Deleted.
    Deleted,
    /// Being deleted.
    Deleting,
    /// Provisioning or a change failed.
    Failed,
    /// A change is being applied.
    Modifying,
    /// Provisioned and usable.
    ReadyToUse,
    /// A state this client does not know about. The received value is not
    /// kept; re-encoding writes `"Unknown"`.
    #[serde(other)]
    Unknown,
}

/// Tenancy of a Virtual Data Center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VdcType {
    /// Runs on dedicated director site capacity.
    Dedicated,
    /// Other/unknown type.
    #[serde(other)]
    Unknown,
}

/// How resources are made available to a Virtual Data Center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AllocationModel {
    /// Pay-as-you-go; resources are committed as vApps and VMs allocate them.
    Paygo,
    /// Other/unknown allocation model.
    #[serde(other)]
    Unknown,
}

/// Chosen storage policies and their sizes in GB.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FileShares {
    /// 0.25 IOPS/GB tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_point_two_five_iops_gb: Option<i64>,
    /// 2 IOPS/GB tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_two_iops_gb: Option<i64>,
    /// 4 IOPS/GB tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_four_iops_gb: Option<i64>,
    /// 10 IOPS/GB tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_ten_iops_gb: Option<i64>,
}

impl FileShares {
    /// Create an empty set of file shares.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 0.25 IOPS/GB tier size.
    #[must_use]
    pub const fn with_point_two_five_iops_gb(mut self, size: i64) -> Self {
        self.storage_point_two_five_iops_gb = Some(size);
        self
    }

    /// Set the 2 IOPS/GB tier size.
    #[must_use]
    pub const fn with_two_iops_gb(mut self, size: i64) -> Self {
        self.storage_two_iops_gb = Some(size);
        self
    }

    /// Set the 4 IOPS/GB tier size.
    #[must_use]
    pub const fn with_four_iops_gb(mut self, size: i64) -> Self {
        self.storage_four_iops_gb = Some(size);
        self
    }

    /// Set the 10 IOPS/GB tier size.
    #[must_use]
    pub const fn with_ten_iops_gb(mut self, size: i64) -> Self {
        self.storage_ten_iops_gb = Some(size);
        self
    }
}

/// A cluster resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cluster {
    /// Cluster ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Time the instance was ordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_ordered: Option<String>,
    /// Time the instance was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_created: Option<String>,
    /// Time the instance was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_deleted: Option<String>,
    /// Data center the cluster is deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Cluster status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Director site ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Host profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<String>,
    /// Storage type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<StorageType>,
    /// Billing plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_plan: Option<BillingPlan>,
    /// Storage policies and their sizes.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub file_shares: HashMap<String, serde_json::Value>,
}

/// Cluster order information used when creating a director site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ClusterOrderInfo {
    /// Cluster name, unique within the director site.
    #[validate(length(min = 1))]
    pub name: String,
    /// Data center to deploy the cluster in.
    #[validate(length(min = 1))]
    pub location: String,
    /// Number of hosts.
    pub host_count: i64,
    /// Storage policies and their sizes.
    pub file_shares: FileShares,
    /// Host profile name.
    #[validate(length(min = 1))]
    pub host_profile: String,
}

impl ClusterOrderInfo {
    /// Create cluster order information.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        host_count: i64,
        file_shares: FileShares,
        host_profile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            host_count,
            file_shares,
            host_profile: host_profile.into(),
        }
    }
}

/// Summary of a cluster deployed on a director site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClusterSummary {
    /// Cluster ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data center the cluster is deployed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Cluster status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Internal cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Host profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<String>,
    /// Storage policies and their sizes.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub file_shares: HashMap<String, serde_json::Value>,
}

/// Data center details within a region.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataCenterInfo {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Data center name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Uplink speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_speed: Option<String>,
}

/// A director site: a single-tenant VMware Cloud Director instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSite {
    /// Director site ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Time the instance was ordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_ordered: Option<String>,
    /// Time the instance was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_created: Option<String>,
    /// Director site name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DirectorSiteStatus>,
    /// Resource group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// User who ordered the instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
    /// Resource group ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<String>,
    /// Resource group CRN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_crn: Option<String>,
    /// Clusters deployed on the site.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub clusters: Vec<ClusterSummary>,
}

/// One price tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSitePriceItem {
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Quantity at which this tier starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_tier: Option<i64>,
}

/// Prices for one country.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSitePriceListItem {
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Price tiers.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub prices: Vec<DirectorSitePriceItem>,
}

/// Prices for one billing metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSitePriceMetric {
    /// Metric name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    /// Metric description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prices by country.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub price_list: Vec<DirectorSitePriceListItem>,
}

/// A cluster to include in a price quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectorSitePriceQuoteClusterInfo {
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Host profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<String>,
    /// Number of hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_count: Option<i64>,
    /// Storage policies and their sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_shares: Option<FileShares>,
}

/// A price quote for a director site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSitePriceQuoteResponse {
    /// Base charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_charge: Option<PriceInfoBaseCharge>,
    /// Per-cluster charges.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub clusters: Vec<PriceInfoClusterCharge>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Total price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// Director site pricing catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectorSitePricingInfo {
    /// Price metrics.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub director_site_pricing: Vec<DirectorSitePriceMetric>,
}

/// Regions where director sites can be deployed, keyed by region name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectorSiteRegions {
    /// Region details by name.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub director_site_regions: HashMap<String, RegionDetail>,
}

/// A networking edge deployed on a VDC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    /// Edge ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Public IP addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_ips: Vec<String>,
    /// Edge size; only set for dedicated edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<EdgeSize>,
    /// Edge type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<EdgeType>,
}

/// An error reported against a VDC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Error code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    /// Error message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Link to more information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

/// A host profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostProfile {
    /// Profile name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
    /// CPU type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_type: Option<String>,
    /// Number of CPUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_count: Option<i64>,
    /// RAM in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<i64>,
    /// Local disks.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub local_disks: Vec<HostProfileDisk>,
}

/// A local disk in a host profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostProfileDisk {
    /// Number of disks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Disk size in GB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// Disk type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
}

/// List of clusters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListClusters {
    /// Clusters.
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<Cluster>,
}

/// List of director sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListDirectorSites {
    /// Director sites.
    #[serde(default, deserialize_with = "null_as_default")]
    pub director_sites: Vec<DirectorSite>,
}

/// List of host profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListHostProfiles {
    /// Host profiles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub director_site_host_profiles: Vec<HostProfile>,
}

/// List of Virtual Data Centers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListVdcs {
    /// Virtual Data Centers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vdcs: Vec<Vdc>,
}

/// A newly generated admin password.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPassword {
    /// The password.
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewPassword")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Director site and cluster to deploy a new VDC on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NewVdcDirectorSite {
    /// Director site ID.
    #[validate(length(min = 1))]
    pub id: String,
    /// Cluster within the director site.
    #[validate(nested)]
    pub cluster: VdcDirectorSiteCluster,
}

impl NewVdcDirectorSite {
    /// Target cluster `cluster_id` on director site `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, cluster_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cluster: VdcDirectorSiteCluster::new(cluster_id),
        }
    }
}

/// Edge to deploy with a new VDC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NewVdcEdge {
    /// Edge size; only valid for dedicated edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<EdgeSize>,
    /// Edge type.
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl NewVdcEdge {
    /// Create an edge request of the given type.
    #[must_use]
    pub const fn new(edge_type: EdgeType) -> Self {
        Self {
            size: None,
            edge_type,
        }
    }

    /// Set the edge size.
    #[must_use]
    pub const fn with_size(mut self, size: EdgeSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// Resource group to associate with a new VDC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct NewVdcResourceGroup {
    /// Resource group ID.
    #[validate(length(min = 1))]
    pub id: String,
}

impl NewVdcResourceGroup {
    /// Reference resource group `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Base charge of a price quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceInfoBaseCharge {
    /// Charge name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Charge for one cluster in a price quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceInfoClusterCharge {
    /// Cluster name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Line items.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<PriceInfoClusterItem>,
}

/// Line item of a cluster charge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceInfoClusterItem {
    /// Item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Sub-items.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<PriceInfoClusterSubItem>,
}

/// Sub-item of a cluster line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceInfoClusterSubItem {
    /// Sub-item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Details of one region.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionDetail {
    /// Data centers in the region.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub datacenters: Vec<DataCenterInfo>,
    /// Regional API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Response to a host count change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetHostsCountResponse {
    /// Status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A Virtual Data Center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vdc {
    /// VDC ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Resource allocation model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation_model: Option<AllocationModel>,
    /// Time the VDC was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    /// Cloud resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Time the VDC was deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<DateTime<Utc>>,
    /// Director site the VDC is deployed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_site: Option<VdcDirectorSite>,
    /// Networking edges.
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<Edge>,
    /// Errors reported against the VDC.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiError>,
    /// VDC name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Time the VDC was ordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_time: Option<DateTime<Utc>>,
    /// Cloud Director organization name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VdcStatus>,
    /// Tenancy type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub vdc_type: Option<VdcType>,
}

/// Director site a VDC is deployed on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VdcDirectorSite {
    /// Director site ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Cluster the VDC runs on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: VdcDirectorSiteCluster,
    /// Cloud Director URL for the VDC.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Cluster a VDC is deployed on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct VdcDirectorSiteCluster {
    /// Cluster ID.
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(length(min = 1))]
    pub id: String,
}

impl VdcDirectorSiteCluster {
    /// Reference cluster `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_shares_wire_names() {
        let shares = FileShares::new().with_two_iops_gb(100).with_ten_iops_gb(25);
        assert_eq!(
            serde_json::to_value(&shares).unwrap(),
            json!({"STORAGE_TWO_IOPS_GB": 100, "STORAGE_TEN_IOPS_GB": 25})
        );
    }

    #[test]
    fn test_unknown_enum_values() {
        let site: DirectorSite =
            serde_json::from_value(json!({"id": "s1", "status": "Hibernating"})).unwrap();
        assert_eq!(site.status, Some(DirectorSiteStatus::Unknown));

        let edge: Edge = serde_json::from_value(
            json!({"id": "e1", "public_ips": [], "size": "extra_large", "type": "quantum"}),
        )
        .unwrap();
        assert_eq!(edge.size, Some(EdgeSize::ExtraLarge));
        assert_eq!(edge.edge_type, Some(EdgeType::Unknown));
    }

    #[test]
    fn test_unknown_enum_values_reencode_as_unknown() {
        let vdc: Vdc =
            serde_json::from_value(json!({"id": "v1", "name": "n", "status": "Hibernating"}))
                .unwrap();
        assert_eq!(vdc.status, Some(VdcStatus::Unknown));
        assert_eq!(serde_json::to_value(&vdc).unwrap()["status"], "Unknown");
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let vdc: Vdc = serde_json::from_value(json!({
            "id": null,
            "name": "n",
            "edges": null,
            "errors": null,
            "director_site": {"id": "s1", "cluster": null, "url": null}
        }))
        .unwrap();
        assert!(vdc.id.is_empty());
        assert!(vdc.edges.is_empty());
        assert!(vdc.errors.is_empty());
        let site = vdc.director_site.unwrap();
        assert!(site.cluster.id.is_empty());
        assert!(site.url.is_empty());

        let edge: Edge = serde_json::from_value(json!({"id": "e1", "public_ips": null})).unwrap();
        assert!(edge.public_ips.is_empty());

        let password: NewPassword = serde_json::from_value(json!({"password": null})).unwrap();
        assert!(password.password.is_empty());
    }

    #[test]
    fn test_new_vdc_edge_omits_missing_size() {
        let edge = NewVdcEdge::new(EdgeType::Shared);
        assert_eq!(serde_json::to_value(&edge).unwrap(), json!({"type": "shared"}));

        let edge = NewVdcEdge::new(EdgeType::Dedicated).with_size(EdgeSize::Large);
        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({"size": "large", "type": "dedicated"})
        );
    }

    #[test]
    fn test_nested_validation() {
        let site = NewVdcDirectorSite::new("site-1", "");
        assert!(site.validate().is_err());
        assert!(NewVdcDirectorSite::new("site-1", "cluster-1").validate().is_ok());

        let order = ClusterOrderInfo::new("", "dal10", 2, FileShares::new(), "BM_2S_20_CORES_192_GB");
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_new_password_debug_is_redacted() {
        let password = NewPassword {
            password: "hunter2".to_string(),
        };
        assert!(!format!("{password:?}").contains("hunter2"));
    }

    #[test]
    fn test_vdc_times() {
        let vdc: Vdc = serde_json::from_value(json!({
            "id": "vdc-1",
            "name": "sampleVDC",
            "created_time": "2022-03-01T12:00:00Z",
            "allocation_model": "paygo",
            "status": "ReadyToUse",
            "type": "dedicated"
        }))
        .unwrap();
        assert_eq!(vdc.created_time.unwrap().to_rfc3339(), "2022-03-01T12:00:00+00:00");
        assert_eq!(vdc.allocation_model, Some(AllocationModel::Paygo));
        assert_eq!(vdc.status, Some(VdcStatus::ReadyToUse));
        assert_eq!(vdc.vdc_type, Some(VdcType::Dedicated));
        assert!(vdc.deleted_time.is_none());
    }
}
