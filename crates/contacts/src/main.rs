//! # Contacts CLI
//!
//! Command-line entry point for the contacts REST API.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(version)]
#[command(about = "Contact management REST API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Store connection string (memory://, file:///path.json, or a path)
        #[arg(short, long)]
        database_url: Option<String>,

        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },

    /// Display version and build info
    Version,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the default store connection string
    SetDatabaseUrl {
        /// Connection string (memory://, file:///path.json, or a path)
        url: String,
    },

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // A missing .env file is fine.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let telemetry_config =
        contacts_telemetry::TelemetryConfig::new("contacts").with_log_level(&cli.log_level);

    let telemetry_config = if cli.json_logs {
        telemetry_config.with_json_logs()
    } else {
        telemetry_config
    };

    contacts_telemetry::init_logging(&telemetry_config);

    let cfg = config::Config::load();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
            no_cors,
        } => {
            commands::serve(
                host.unwrap_or(cfg.server_host),
                port.unwrap_or(cfg.server_port),
                database_url.unwrap_or(cfg.database_url),
                cfg.cors && !no_cors,
            )
            .await?;
        },

        Commands::Version => {
            commands::version();
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                config::show_config();
            },
            ConfigAction::SetDatabaseUrl { url } => {
                let mut cfg = config::Config::load();
                cfg.set_database_url(&url)?;
                println!("Database URL set to: {}", url);
                println!("Config saved to: {}", config::Config::config_path().display());
            },
            ConfigAction::Path => {
                println!("{}", config::Config::config_path().display());
            },
        },
    }

    Ok(())
}
