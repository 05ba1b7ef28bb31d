//! API Client Modules
//!
//! HTTP clients for the self-service management API.

pub mod platform_client;

pub use platform_client::{PlatformApiClient, PlatformApiConfig};
