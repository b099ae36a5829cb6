//! # vmware-core
//!
//! REST runtime shared by the IBM Cloud VMware as a Service clients.
//!
//! This crate provides the pieces every generated operation relies on: the
//! error taxonomy, a single generic request executor, retry policy,
//! authenticators, and external configuration loading.
//!
//! ## Modules
//!
//! - [`error`] - Error types and server error body parsing
//! - [`client`] - HTTP client configuration, retry policy, and the request executor
//! - [`request`] - Declarative endpoint descriptors and per-call request parts
//! - [`auth`] - Pluggable authenticators (none, basic, bearer token, IAM)
//! - [`config`] - Service configuration and environment-based loading
//! - [`query`] - Query parameter builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod request;

// Re-export commonly used types
pub use client::{DetailedResponse, ServiceClient, ServiceClientBuilder};
pub use error::{Error, Result};
