//! Client for the IBM Cloud VMware as a Service v1 API.
//!
//! This crate provides typed models, per-operation options and an
//! asynchronous client for managing director sites, clusters, Virtual Data
//! Centers, pricing and catalog information.
//!
//! ```no_run
//! use vmware_core::auth::IamAuthenticator;
//! use vmware_v1::{VdcOptions, VmwareClient};
//!
//! # async fn run() -> vmware_v1::Result<()> {
//! let client = VmwareClient::new(IamAuthenticator::new("my-api-key"))?;
//! let response = client.get_vdc(&VdcOptions::new("vdc-id")).await?;
//! if let Some(vdc) = response.result {
//!     println!("{} is {:?}", vdc.name, vdc.status);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod endpoints;
pub mod models;
pub mod options;

pub use client::{VmwareClient, VmwareClientBuilder, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL};
pub use models::{
    Cluster, ClusterOrderInfo, DirectorSite, FileShares, NewVdcDirectorSite, NewVdcEdge,
    NewVdcResourceGroup, Vdc,
};
pub use options::{
    CatalogOptions, ClusterOptions, CreateVdcOptions, CreateWorkloadDomainOptions,
    GetVcddPriceOptions, ListVdcsOptions, ListWorkloadDomainInstancesOptions,
    ReplaceOrgAdminPasswordOptions, SetFileSharesOptions, SetHostsCountOptions, SiteOptions,
    VdcOptions,
};
pub use vmware_core::DetailedResponse;

/// Convenient result alias that reuses the shared VMware error type.
pub type Result<T> = vmware_core::Result<T>;
