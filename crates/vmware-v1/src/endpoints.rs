//! Endpoint table for the VMware as a Service v1 API.
//!
//! Every operation the client exposes is one entry here; the generic executor
//! in `vmware-core` does the rest.

use reqwest::Method;
use vmware_core::request::Endpoint;

/// Service name reported in SDK analytics headers.
pub const SERVICE_NAME: &str = "vmware";

/// API version reported in SDK analytics headers.
pub const SERVICE_VERSION: &str = "V1";

const fn endpoint(operation_id: &'static str, method: Method, path: &'static str) -> Endpoint {
    Endpoint::new(SERVICE_NAME, SERVICE_VERSION, operation_id, method, path)
}

/// Create a director site instance.
pub const CREATE_WORKLOAD_DOMAIN: Endpoint =
    endpoint("CreateWorkloadDomain", Method::POST, "/director_sites");

/// List director site instances.
pub const LIST_WORKLOAD_DOMAIN_INSTANCES: Endpoint =
    endpoint("ListWorkloadDomainInstances", Method::GET, "/director_sites");

/// Get a director site instance.
pub const GET_SPECIFIC_WORKLOAD_DOMAIN_INSTANCE: Endpoint = endpoint(
    "GetSpecificWorkloadDomainInstance",
    Method::GET,
    "/director_sites/{site_id}",
);

/// Delete a director site instance.
pub const DELETE_WORKLOAD_DOMAIN: Endpoint = endpoint(
    "DeleteWorkloadDomain",
    Method::DELETE,
    "/director_sites/{site_id}",
);

/// List the clusters of a director site.
pub const LIST_CLUSTER_INSTANCES: Endpoint = endpoint(
    "ListClusterInstances",
    Method::GET,
    "/director_sites/{site_id}/clusters",
);

/// Get a cluster of a director site.
pub const GET_SPECIFIC_CLUSTER_INSTANCE: Endpoint = endpoint(
    "GetSpecificClusterInstance",
    Method::GET,
    "/director_sites/{site_id}/clusters/{cluster_id}",
);

/// Change the host count of a cluster.
pub const SET_HOSTS_COUNT: Endpoint = endpoint(
    "SetHostsCount",
    Method::PUT,
    "/director_sites/{site_id}/clusters/{cluster_id}/hosts_count",
);

/// Change the file shares of a cluster.
pub const SET_FILE_SHARES: Endpoint = endpoint(
    "SetFileShares",
    Method::PUT,
    "/director_sites/{site_id}/clusters/{cluster_id}/file_shares",
);

/// List the regions where director sites can be deployed.
pub const GET_REGIONS: Endpoint = endpoint("GetRegions", Method::GET, "/director_site_regions");

/// List the available host profiles.
pub const VIEW_INSTANCE: Endpoint =
    endpoint("ViewInstance", Method::GET, "/director_site_host_profiles");

/// Replace the admin password of a director site.
pub const REPLACE_ORG_ADMIN_PASSWORD: Endpoint = endpoint(
    "ReplaceOrgAdminPassword",
    Method::PUT,
    "/director_site_password",
);

/// List director site prices.
pub const LIST_PRICES: Endpoint = endpoint("ListPrices", Method::GET, "/director_site_pricing");

/// Quote the price of a director site configuration.
pub const GET_VCDD_PRICE: Endpoint =
    endpoint("GetVcddPrice", Method::POST, "/director_site_price_quote");

/// List Virtual Data Centers.
pub const LIST_VDCS: Endpoint = endpoint("ListVdcs", Method::GET, "/vdcs");

/// Create a Virtual Data Center.
pub const CREATE_VDC: Endpoint = endpoint("CreateVdc", Method::POST, "/vdcs");

/// Get a Virtual Data Center.
pub const GET_VDC: Endpoint = endpoint("GetVdc", Method::GET, "/vdcs/{vdc_id}");

/// Delete a Virtual Data Center.
pub const DELETE_VDC: Endpoint = endpoint("DeleteVdc", Method::DELETE, "/vdcs/{vdc_id}");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [&Endpoint; 17] = [
        &CREATE_WORKLOAD_DOMAIN,
        &LIST_WORKLOAD_DOMAIN_INSTANCES,
        &GET_SPECIFIC_WORKLOAD_DOMAIN_INSTANCE,
        &DELETE_WORKLOAD_DOMAIN,
        &LIST_CLUSTER_INSTANCES,
        &GET_SPECIFIC_CLUSTER_INSTANCE,
        &SET_HOSTS_COUNT,
        &SET_FILE_SHARES,
        &GET_REGIONS,
        &VIEW_INSTANCE,
        &REPLACE_ORG_ADMIN_PASSWORD,
        &LIST_PRICES,
        &GET_VCDD_PRICE,
        &LIST_VDCS,
        &CREATE_VDC,
        &GET_VDC,
        &DELETE_VDC,
    ];

    #[test]
    fn test_operation_ids_are_unique() {
        let ids: HashSet<_> = ALL.iter().map(|e| e.operation_id).collect();
        assert_eq!(ids.len(), ALL.len());
    }

    #[test]
    fn test_path_parameters() {
        let names: Vec<_> = SET_FILE_SHARES.path_param_names().collect();
        assert_eq!(names, vec!["site_id", "cluster_id"]);

        let names: Vec<_> = GET_VDC.path_param_names().collect();
        assert_eq!(names, vec!["vdc_id"]);

        assert_eq!(REPLACE_ORG_ADMIN_PASSWORD.path_param_names().count(), 0);
    }

    #[test]
    fn test_analytics_header() {
        assert_eq!(
            LIST_VDCS.analytics_header(),
            "service_name=vmware;service_version=V1;operation_id=ListVdcs"
        );
    }
}
