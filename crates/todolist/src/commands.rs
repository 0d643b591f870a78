//! CLI command implementations.

use color_eyre::eyre::Result;

use todolist_server::{Server, ServerConfig};

use crate::config::Config;

/// Start the todo list server.
pub async fn serve(config: &Config) -> Result<()> {
    tracing::info!(host = %config.host, port = config.port, "Starting todolist server...");

    let server_config = ServerConfig::from_host_port(&config.host, config.port)?;
    let server = Server::new(server_config);
    server.run().await?;

    Ok(())
}

/// Display version information.
pub fn version() {
    println!("todolist {}", env!("CARGO_PKG_VERSION"));
    println!("  server:  todolist-server (axum)");
    println!("  storage: in-memory, cleared on restart");
}
