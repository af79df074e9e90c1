use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cats_mcp::{http, stdio};
use cats_mcp_core::config::McpConfig;
use cats_mcp_core::dispatch::Dispatcher;

#[derive(Parser)]
#[command(name = "cats-mcp", version, about = "JSON-RPC gateway for the fictional cats API")]
struct Cli {
    /// Path to the MCP descriptor file
    #[arg(long, global = true, default_value = "cats_mcp.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve JSON-RPC over HTTP on all interfaces
    Http {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Serve JSON-RPC over stdin/stdout, one message per line
    Stdio,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the stdio protocol stream stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        McpConfig::load(&cli.config)
            .with_context(|| format!("failed to load descriptor {}", cli.config.display()))?
    } else {
        info!(
            "no descriptor at {}, using built-in defaults",
            cli.config.display()
        );
        McpConfig::builtin()
    };

    info!("server: {} v{}", config.server.name, config.server.version);
    info!("available tools: {}", config.tool_names().join(", "));

    let dispatcher = Arc::new(Dispatcher::new(Arc::new(config)));

    match cli.command {
        Command::Http { port } => http::serve(dispatcher, port).await,
        Command::Stdio => stdio::run(dispatcher).await,
    }
}
