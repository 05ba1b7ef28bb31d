//! # Platform CLI Tool
//!
//! Command-line interface for manual checks against the self-service
//! management API. `lookup` runs the access-grant lookup; the other
//! subcommands exercise the rest of the client.

mod cli;

use clap::{Args, Parser, Subcommand, ValueEnum};
use platform_client::{logging, ClientConfig, GrantStatus};
use tracing::info;
use uuid::Uuid;

use cli::{
    handle_application_command, handle_auth_command, handle_config_command,
    handle_deployment_command, handle_environment_command, handle_grant_command,
    handle_health_command, handle_lookup_command, handle_principal_command,
    handle_schema_command, handle_topic_command,
};

#[derive(Parser, Debug)]
#[command(name = "platform-cli")]
#[command(about = "Command-line interface for the Kafka self-service platform API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./platform-client.toml or ~/.platform/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Management API base URL (overrides config and PLATFORM_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Identity provider realm (overrides config and PLATFORM_REALM)
    #[arg(long)]
    realm: Option<String>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Output format (defaults to the configured cli.default_format)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up access grants once and report the result
    Lookup(GrantFilterArgs),

    /// Access grant operations
    #[command(subcommand)]
    Grants(GrantCommands),

    /// Application operations
    #[command(subcommand)]
    Applications(ApplicationCommands),

    /// Environment operations
    #[command(subcommand)]
    Environments(EnvironmentCommands),

    /// Topic operations
    #[command(subcommand)]
    Topics(TopicCommands),

    /// Application deployment operations
    #[command(subcommand)]
    Deployments(DeploymentCommands),

    /// Application principal operations
    #[command(subcommand)]
    Principals(PrincipalCommands),

    /// Schema version operations
    #[command(subcommand)]
    Schemas(SchemaCommands),

    /// Authentication operations
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Check that the management API is up
    Health,
}

/// Access grant filter; every field is optional
#[derive(Debug, Clone, Args)]
pub struct GrantFilterArgs {
    /// Application UID
    #[arg(short, long)]
    pub application_id: Option<Uuid>,
    /// Environment UID
    #[arg(short, long)]
    pub environment_id: Option<Uuid>,
    /// Topic UID
    #[arg(short, long)]
    pub topic_id: Option<Uuid>,
    /// Grant status (pending, approved, rejected, revoked, cancelled)
    #[arg(short, long)]
    pub status: Option<GrantStatus>,
}

#[derive(Debug, Subcommand)]
pub enum GrantCommands {
    /// List access grants matching a filter
    List(GrantFilterArgs),
    /// Get access grant details by UID
    Get {
        #[arg(value_name = "UID")]
        uid: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum ApplicationCommands {
    /// List applications
    List,
    /// Get application details by UID
    Get {
        #[arg(value_name = "UID")]
        uid: Uuid,
    },
    /// Find applications by name
    Find {
        #[arg(short, long)]
        name: String,
    },
    /// Register a new application
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Short name, unique on the platform
        #[arg(long)]
        short_name: String,
        /// Kafka client id
        #[arg(long)]
        application_id: String,
        /// Custom or Connector
        #[arg(long, default_value = "Custom")]
        application_type: String,
        /// Owning group UID
        #[arg(long)]
        owners: Uuid,
        /// Public or Private
        #[arg(long, default_value = "Private")]
        visibility: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an application
    Delete {
        #[arg(value_name = "UID")]
        uid: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum EnvironmentCommands {
    /// List environments
    List,
    /// Get environment details by UID
    Get {
        #[arg(value_name = "UID")]
        uid: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum TopicCommands {
    /// List topics
    List,
    /// Get topic details by UID
    Get {
        #[arg(value_name = "UID")]
        uid: Uuid,
    },
    /// Create a topic
    Create {
        #[arg(long)]
        name: String,
        /// String, JSON, AVRO, Binary
        #[arg(long, default_value = "String")]
        key_type: String,
        #[arg(long, default_value = "String")]
        value_type: String,
        /// Owning group UID
        #[arg(long)]
        owners: Uuid,
        /// compact or delete
        #[arg(long, default_value = "delete")]
        retention_policy: String,
        /// Topic property as key=value (repeatable)
        #[arg(short, long = "property", value_name = "KEY=VALUE")]
        properties: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DeploymentCommands {
    /// List application deployments
    List,
    /// Find the deployment of an application in an environment
    Find {
        #[arg(short, long)]
        application_id: Uuid,
        #[arg(short, long)]
        environment_id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrincipalCommands {
    /// List the principals of an application
    List {
        #[arg(short, long)]
        application_id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommands {
    /// List schema versions
    List,
    /// Get a schema version by UID
    Get {
        #[arg(value_name = "UID")]
        uid: Uuid,
        /// Print the schema document as well
        #[arg(long)]
        body: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Acquire an access token with the configured credentials
    Token {
        /// Print the token itself, not just its expiry
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current CLI configuration (password redacted)
    Show,
    /// Write the current configuration to a file
    Init {
        /// Output file path (default: ~/.platform/config.toml)
        #[arg(short, long)]
        output: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> platform_client::ClientResult<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_json);

    // Precedence: flags > environment > --config file > discovered file > defaults
    let mut config = if let Some(config_path) = cli.config {
        ClientConfig::load_with_file(std::path::Path::new(&config_path))?
    } else {
        ClientConfig::load()?
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(realm) = cli.realm {
        config.api.realm = realm;
    }
    config.cli.verbose_level = cli.verbose;

    let format = cli.format.unwrap_or(match config.cli.default_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    });

    info!(
        base_url = %config.api.base_url,
        realm = %config.api.realm,
        "Platform CLI starting"
    );

    match cli.command {
        Commands::Lookup(filter) => handle_lookup_command(filter, &config, format).await,
        Commands::Grants(cmd) => handle_grant_command(cmd, &config, format).await,
        Commands::Applications(cmd) => handle_application_command(cmd, &config, format).await,
        Commands::Environments(cmd) => handle_environment_command(cmd, &config, format).await,
        Commands::Topics(cmd) => handle_topic_command(cmd, &config, format).await,
        Commands::Deployments(cmd) => handle_deployment_command(cmd, &config, format).await,
        Commands::Principals(cmd) => handle_principal_command(cmd, &config, format).await,
        Commands::Schemas(cmd) => handle_schema_command(cmd, &config, format).await,
        Commands::Auth(cmd) => handle_auth_command(cmd, &config).await,
        Commands::Config(cmd) => handle_config_command(cmd, &config).await,
        Commands::Health => handle_health_command(&config).await,
    }
}
