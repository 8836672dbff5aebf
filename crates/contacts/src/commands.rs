//! CLI command implementations.

use std::net::SocketAddr;

use color_eyre::eyre::{Result, WrapErr};

use contacts_server::{Server, ServerConfig};

/// Start the contacts API server.
pub async fn serve(host: String, port: u16, database_url: String, cors: bool) -> Result<()> {
    tracing::info!("Starting contacts server...");

    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .wrap_err_with(|| format!("Invalid listen address {host}:{port}"))?;

    let store = contacts_store::open(&database_url)
        .await
        .wrap_err("Failed to open contact store")?;

    if store.backend() == "memory" {
        tracing::warn!("=======================================================");
        tracing::warn!("  USING THE IN-MEMORY CONTACT STORE");
        tracing::warn!("  Contacts will be lost when the server stops.");
        tracing::warn!("  ");
        tracing::warn!("  To persist contacts, either:");
        tracing::warn!("    1. Restart with: contacts serve --database-url <path.json>");
        tracing::warn!("    2. Set CONTACTS_DATABASE_URL=file:///path/contacts.json");
        tracing::warn!("=======================================================");
    }

    let config = ServerConfig::builder().addr(addr).cors(cors).build();

    Server::new(config, store).run().await?;

    Ok(())
}

/// Display version and build info.
pub fn version() {
    println!("contacts {}", env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
}
