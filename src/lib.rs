#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Platform Client
//!
//! Client library and manual-test CLI for a Kafka self-service management
//! platform: applications, environments, topics, access grants, application
//! deployments, principals and schemas.
//!
//! ## Module Organization
//!
//! - [`auth`] - OAuth2 password grant and token caching
//! - [`api_clients`] - REST client for the management API
//! - [`transport`] - `PlatformClient` trait over the client operations
//! - [`harness`] - the access-grant lookup check
//! - [`models`] - request and response types
//! - [`config`] - configuration file and environment handling
//! - [`error`] - structured error handling
//! - [`logging`] - tracing subscriber setup for the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platform_client::{run_grant_lookup, ClientConfig, GrantQuery, PlatformApiClient};
//!
//! # async fn example() -> platform_client::ClientResult<()> {
//! let config = ClientConfig::load()?;
//! let client = PlatformApiClient::connect((&config).into()).await?;
//!
//! let outcome = run_grant_lookup(&client, GrantQuery::new()).await?;
//! println!("{} grants", outcome.grants().len());
//! # Ok(())
//! # }
//! ```

pub mod api_clients;
pub mod auth;
pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod models;
pub mod transport;

// Re-export commonly used types for convenience
pub use api_clients::{PlatformApiClient, PlatformApiConfig};
pub use auth::{AccessToken, AuthDescriptor, TokenProvider};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use harness::{run_grant_lookup, LookupOutcome};
pub use models::{AccessGrant, Collection, GrantQuery, GrantStatus};
pub use transport::PlatformClient;
