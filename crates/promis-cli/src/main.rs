//! promis CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use promis_client::{load_config_from, PromisConfig};
use promis_core::model::ResponsePair;

mod commands;

#[derive(Parser)]
#[command(name = "promis", version, about = "CLI for the PROMIS Assessment Center API")]
struct Cli {
    /// Registration GUID (overrides config file and PROMIS_REGISTRATION)
    #[arg(long, global = true)]
    registration: Option<String>,

    /// Token GUID (overrides config file and PROMIS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API version path segment
    #[arg(long, global = true)]
    api_version: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available PROMIS forms
    ListForms {
        /// Output format: json, text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Get details for a specific form
    FormDetails {
        /// Form OID identifier
        form_oid: String,

        /// Output format: json, text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Call the stateless assessment endpoint for a form
    Stateless {
        /// Form OID identifier
        form_oid: String,

        /// Responses to submit (can be repeated). Example: --response PAININ9=Somewhat
        #[arg(long = "response", value_name = "ITEM=CHOICE")]
        responses: Vec<ResponsePair>,

        /// Submit responses form-urlencoded instead of as a JSON body
        #[arg(long)]
        form_body: bool,

        /// Output format: json, text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Create a starter promis.toml config file
    Init,
}

impl Cli {
    /// Load the config file and apply CLI flag overrides.
    fn resolve_config(&self) -> anyhow::Result<PromisConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(registration) = &self.registration {
            config.registration = registration.clone();
        }
        if let Some(token) = &self.token {
            config.token = token.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(api_version) = &self.api_version {
            config.api_version = api_version.clone();
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("promis=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::ListForms { format } => commands::list_forms::execute(&cli, format).await,
        Commands::FormDetails { form_oid, format } => {
            commands::form_details::execute(&cli, form_oid, format).await
        }
        Commands::Stateless {
            form_oid,
            responses,
            form_body,
            format,
        } => commands::stateless::execute(&cli, form_oid, responses, *form_body, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
