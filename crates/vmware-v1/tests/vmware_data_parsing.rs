//! Integration tests for parsing VMware as a Service response data.
//!
//! These tests validate that the vmware-v1 models deserialize representative
//! API payloads.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use vmware_v1::models::{
    BillingPlan, Cluster, DirectorSite, DirectorSitePriceQuoteResponse, DirectorSitePricingInfo,
    DirectorSiteRegions, DirectorSiteStatus, EdgeSize, EdgeType, ListHostProfiles, ListVdcs,
    StorageType, VdcStatus,
};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load and deserialize a fixture, panicking with context on failure.
fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let fixture_path = fixtures_dir().join(name);
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&json_data)
        .unwrap_or_else(|e| panic!("Failed to deserialize {name}: {e}\nJSON: {json_data}"))
}

#[test]
fn test_deserialize_director_site() {
    let site: DirectorSite = load_fixture("director_site.json");

    assert_eq!(site.name.as_deref(), Some("prod-director-site"));
    assert_eq!(site.status, Some(DirectorSiteStatus::ReadyToUse));
    assert_eq!(site.resource_group_id.as_deref(), Some("rg-0a1b2c"));

    let cluster = &site.clusters[0];
    assert_eq!(cluster.host_count, Some(3));
    assert_eq!(cluster.cluster_name.as_deref(), Some("cluster_1-internal"));
    assert_eq!(cluster.file_shares.len(), 4);
    assert_eq!(cluster.file_shares["STORAGE_TWO_IOPS_GB"], 500);
}

#[test]
fn test_deserialize_cluster() {
    let cluster: Cluster = load_fixture("cluster.json");

    assert_eq!(cluster.site_id.as_deref(), Some("1f2a3b4c-0001"));
    assert_eq!(cluster.storage_type, Some(StorageType::Nfs));
    assert_eq!(cluster.billing_plan, Some(BillingPlan::Monthly));
    assert_eq!(cluster.file_shares["STORAGE_FOUR_IOPS_GB"], 250);
    assert!(cluster.instance_deleted.is_none());
}

#[test]
fn test_deserialize_vdc_list() {
    let list: ListVdcs = load_fixture("list_vdcs.json");
    assert_eq!(list.vdcs.len(), 2);

    let ready = &list.vdcs[0];
    assert_eq!(ready.status, Some(VdcStatus::ReadyToUse));
    assert_eq!(ready.org_name.as_deref(), Some("org-01"));
    assert!(ready.created_time.is_some());
    assert!(ready.errors.is_empty());

    let edge = &ready.edges[0];
    assert_eq!(edge.id, "edge-01");
    assert_eq!(edge.public_ips.len(), 2);
    assert_eq!(edge.size, Some(EdgeSize::Medium));
    assert_eq!(edge.edge_type, Some(EdgeType::Dedicated));

    let failed = &list.vdcs[1];
    assert_eq!(failed.status, Some(VdcStatus::Failed));
    assert!(failed.created_time.is_none());
    assert!(failed.org_name.is_none());
    assert_eq!(failed.errors[0].code, "edge_capacity_exceeded");
    assert_eq!(
        failed.errors[0].more_info.as_deref(),
        Some("https://cloud.ibm.com/docs/vmwaresolutions")
    );
}

#[test]
fn test_deserialize_regions() {
    let regions: DirectorSiteRegions = load_fixture("regions.json");

    assert_eq!(regions.director_site_regions.len(), 2);
    let us_south = &regions.director_site_regions["us-south"];
    assert_eq!(us_south.datacenters.len(), 2);
    assert_eq!(us_south.datacenters[0].name.as_deref(), Some("dal10"));
    assert_eq!(
        us_south.endpoint.as_deref(),
        Some("https://api.us-south.vmware.cloud.ibm.com")
    );
}

#[test]
fn test_deserialize_host_profiles() {
    let profiles: ListHostProfiles = load_fixture("host_profiles.json");

    let profiles = &profiles.director_site_host_profiles;
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].local_disks[0].disk_type.as_deref(), Some("SSD"));
    assert_eq!(profiles[1].ram, Some(1536));
    assert!(profiles[1].local_disks.is_empty());
}

#[test]
fn test_deserialize_pricing() {
    let pricing: DirectorSitePricingInfo = load_fixture("pricing.json");

    let metric = &pricing.director_site_pricing[0];
    assert_eq!(metric.metric.as_deref(), Some("VCD_HOST"));
    assert_eq!(metric.price_list.len(), 2);
    assert_eq!(metric.price_list[0].prices[1].quantity_tier, Some(10));
    assert_eq!(metric.price_list[1].currency.as_deref(), Some("EUR"));
}

#[test]
fn test_deserialize_price_quote() {
    let quote: DirectorSitePriceQuoteResponse = load_fixture("price_quote.json");

    assert_eq!(quote.total, Some(10200.0));
    assert_eq!(
        quote.base_charge.as_ref().and_then(|c| c.price),
        Some(450.0)
    );
    let host_line = &quote.clusters[0].items[0];
    assert_eq!(host_line.items[0].count, Some(3));
    assert_eq!(
        host_line.items[0].name.as_deref(),
        Some("BM_2S_20_CORES_192_GB")
    );
}
