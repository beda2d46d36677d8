///! Catalog CLI
///!
///! Command-line administration for the experts, services and price list

mod commands;
mod config;
mod output;

use anyhow::Result;
use catalog_client::CatalogClient;
use clap::{Parser, Subcommand};
use commands::auth::AuthCommands;
use commands::expert::ExpertCommands;
use commands::price::PriceCommands;
use commands::service::ServiceCommands;
use output::OutputFormat;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog", author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API server address
    #[arg(short, long, env = "CATALOG_API_URL")]
    server: Option<String>,

    /// Base URL of uploaded photos and icons
    #[arg(long, env = "CATALOG_STATIC_URL")]
    static_url: Option<String>,

    /// Access token for write operations
    #[arg(long, env = "CATALOG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage experts
    Expert {
        #[command(subcommand)]
        command: ExpertCommands,
    },
    /// Manage services
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Manage the price list
    Price {
        #[command(subcommand)]
        command: PriceCommands,
    },
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli).await {
        let message = error
            .downcast_ref::<catalog_client::ClientError>()
            .and_then(|client_error| client_error.notification())
            .unwrap_or_else(|| format!("{:#}", error));
        output::print_error(&message);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().unwrap_or_else(|error| {
        tracing::warn!("ignoring unreadable config: {:#}", error);
        config::Config::default()
    });

    let format = OutputFormat::parse(cli.output.as_deref().unwrap_or(&config.default_output));
    let api_client =
        CatalogClient::new(config.client_config(cli.server, cli.static_url, cli.token));

    match cli.command {
        Commands::Expert { command } => {
            commands::expert::handle_expert_command(command, &api_client, format).await?
        }
        Commands::Service { command } => {
            commands::service::handle_service_command(command, &api_client, format).await?
        }
        Commands::Price { command } => {
            commands::price::handle_price_command(command, &api_client, format).await?
        }
        Commands::Auth { command } => {
            commands::auth::handle_auth_command(command, &api_client, &mut config).await?
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
