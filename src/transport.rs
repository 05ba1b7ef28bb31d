//! # Platform Client Interface
//!
//! The operations the harness and the CLI handlers depend on, as a trait.
//! [`PlatformApiClient`] implements it over REST; tests supply their own
//! implementations to check what gets called.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use platform_client::{PlatformClient, PlatformApiClient, ClientConfig};
//!
//! let config = ClientConfig::load()?;
//! let client = PlatformApiClient::connect((&config).into()).await?;
//! let client: &dyn PlatformClient = &client;
//! let grants = client.get_access_grants(&GrantQuery::new()).await?;
//! ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ClientResult;
use crate::models::{
    AccessGrant, Application, ApplicationDeployment, ApplicationPrincipal, ApplicationRequest,
    Collection, Environment, GrantQuery, SchemaVersion, Topic, TopicRequest,
};
use crate::PlatformApiClient;

/// Common interface for platform clients.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Get the endpoint URL.
    fn endpoint(&self) -> &str;

    // ===================================================================================
    // ACCESS GRANTS
    // ===================================================================================

    /// Look up access grants by application, environment, topic and status.
    async fn get_access_grants(&self, query: &GrantQuery) -> ClientResult<Collection<AccessGrant>>;

    /// Get one access grant.
    async fn get_access_grant(&self, uid: Uuid) -> ClientResult<AccessGrant>;

    // ===================================================================================
    // APPLICATIONS
    // ===================================================================================

    async fn get_applications(&self) -> ClientResult<Collection<Application>>;

    async fn get_application(&self, uid: Uuid) -> ClientResult<Application>;

    async fn find_application_by_name(&self, name: &str) -> ClientResult<Collection<Application>>;

    async fn create_application(&self, request: &ApplicationRequest) -> ClientResult<Application>;

    async fn delete_application(&self, uid: Uuid) -> ClientResult<()>;

    // ===================================================================================
    // ENVIRONMENTS AND TOPICS
    // ===================================================================================

    async fn get_environments(&self) -> ClientResult<Collection<Environment>>;

    async fn get_environment(&self, uid: Uuid) -> ClientResult<Environment>;

    async fn get_topics(&self) -> ClientResult<Collection<Topic>>;

    async fn get_topic(&self, uid: Uuid) -> ClientResult<Topic>;

    async fn create_topic(&self, request: &TopicRequest) -> ClientResult<Topic>;

    // ===================================================================================
    // DEPLOYMENTS, PRINCIPALS, SCHEMAS
    // ===================================================================================

    async fn get_application_deployments(&self) -> ClientResult<Collection<ApplicationDeployment>>;

    /// `None` when the application is not deployed in the environment.
    async fn find_application_deployment(
        &self,
        application: Uuid,
        environment: Uuid,
    ) -> ClientResult<Option<ApplicationDeployment>>;

    async fn get_application_principals(
        &self,
        application: Uuid,
    ) -> ClientResult<Collection<ApplicationPrincipal>>;

    async fn get_schema_versions(&self) -> ClientResult<Collection<SchemaVersion>>;

    async fn get_schema_version(&self, uid: Uuid) -> ClientResult<SchemaVersion>;

    // ===================================================================================
    // HEALTH
    // ===================================================================================

    /// Check if the management API is up.
    async fn health_check(&self) -> ClientResult<()>;
}

#[async_trait]
impl PlatformClient for PlatformApiClient {
    fn endpoint(&self) -> &str {
        self.base_url()
    }

    async fn get_access_grants(&self, query: &GrantQuery) -> ClientResult<Collection<AccessGrant>> {
        PlatformApiClient::get_access_grants(self, query).await
    }

    async fn get_access_grant(&self, uid: Uuid) -> ClientResult<AccessGrant> {
        PlatformApiClient::get_access_grant(self, uid).await
    }

    async fn get_applications(&self) -> ClientResult<Collection<Application>> {
        PlatformApiClient::get_applications(self).await
    }

    async fn get_application(&self, uid: Uuid) -> ClientResult<Application> {
        PlatformApiClient::get_application(self, uid).await
    }

    async fn find_application_by_name(&self, name: &str) -> ClientResult<Collection<Application>> {
        PlatformApiClient::find_application_by_name(self, name).await
    }

    async fn create_application(&self, request: &ApplicationRequest) -> ClientResult<Application> {
        PlatformApiClient::create_application(self, request).await
    }

    async fn delete_application(&self, uid: Uuid) -> ClientResult<()> {
        PlatformApiClient::delete_application(self, uid).await
    }

    async fn get_environments(&self) -> ClientResult<Collection<Environment>> {
        PlatformApiClient::get_environments(self).await
    }

    async fn get_environment(&self, uid: Uuid) -> ClientResult<Environment> {
        PlatformApiClient::get_environment(self, uid).await
    }

    async fn get_topics(&self) -> ClientResult<Collection<Topic>> {
        PlatformApiClient::get_topics(self).await
    }

    async fn get_topic(&self, uid: Uuid) -> ClientResult<Topic> {
        PlatformApiClient::get_topic(self, uid).await
    }

    async fn create_topic(&self, request: &TopicRequest) -> ClientResult<Topic> {
        PlatformApiClient::create_topic(self, request).await
    }

    async fn get_application_deployments(&self) -> ClientResult<Collection<ApplicationDeployment>> {
        PlatformApiClient::get_application_deployments(self).await
    }

    async fn find_application_deployment(
        &self,
        application: Uuid,
        environment: Uuid,
    ) -> ClientResult<Option<ApplicationDeployment>> {
        PlatformApiClient::find_application_deployment(self, application, environment).await
    }

    async fn get_application_principals(
        &self,
        application: Uuid,
    ) -> ClientResult<Collection<ApplicationPrincipal>> {
        PlatformApiClient::get_application_principals(self, application).await
    }

    async fn get_schema_versions(&self) -> ClientResult<Collection<SchemaVersion>> {
        PlatformApiClient::get_schema_versions(self).await
    }

    async fn get_schema_version(&self, uid: Uuid) -> ClientResult<SchemaVersion> {
        PlatformApiClient::get_schema_version(self, uid).await
    }

    async fn health_check(&self) -> ClientResult<()> {
        PlatformApiClient::health_check(self).await
    }
}
