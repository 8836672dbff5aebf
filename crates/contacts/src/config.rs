//! Configuration management for the contacts CLI.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (CONTACTS_*, including a `.env` file)
//! 3. Config file (~/.config/contacts/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use color_eyre::eyre::{self, WrapErr};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Connection string for the contact store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Server host.
    #[serde(default = "default_host")]
    pub server_host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub server_port: u16,

    /// Enable permissive CORS.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_database_url() -> String {
    "memory://".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            server_host: default_host(),
            server_port: default_port(),
            cors: default_cors(),
        }
    }
}

impl Config {
    /// Builds the layered figment for a given config file.
    pub fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CONTACTS_"))
    }

    /// Loads configuration from all sources.
    ///
    /// Reports warnings for configuration errors but falls back to defaults.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        match Self::figment(&config_path).extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {}", e);
                eprintln!();
                eprintln!("  To fix, edit or delete the config file:");
                eprintln!("    rm {}", config_path.display());
                eprintln!();
                Config::default()
            },
        }
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the path to the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("contacts")
    }

    /// Saves the current configuration to the config file.
    pub fn save(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(Self::config_dir())?;

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(Self::config_path(), toml_str)?;
        Ok(())
    }

    /// Sets the store connection string and saves.
    ///
    /// The string is checked against the accepted store forms first, so an
    /// unusable value never reaches the config file.
    pub fn set_database_url(&mut self, url: &str) -> eyre::Result<()> {
        contacts_store::validate_database_url(url)
            .wrap_err_with(|| format!("Refusing to save database URL '{url}'"))?;
        self.database_url = url.to_string();
        self.save()
            .wrap_err_with(|| format!("Failed to write {}", Self::config_path().display()))
    }
}

/// Prints the current configuration and its sources.
pub fn show_config() {
    let config = Config::load();
    let config_path = Config::config_path();

    println!("Contacts Configuration");
    println!("======================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    println!("  database_url: {}", config.database_url);
    println!("  server_host: {}", config.server_host);
    println!("  server_port: {}", config.server_port);
    println!("  cors: {}", config.cors);

    println!("\nEnvironment variables:");
    println!("  CONTACTS_DATABASE_URL");
    println!("  CONTACTS_SERVER_HOST");
    println!("  CONTACTS_SERVER_PORT");
    println!("  CONTACTS_CORS");
}
