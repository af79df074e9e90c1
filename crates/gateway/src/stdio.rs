use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use cats_mcp_core::dispatch::{Dispatcher, TransportMode};

/// Line-oriented stdio transport: one JSON-RPC request per input line, one
/// response per output line. Lines are handled sequentially so responses go
/// out in arrival order. Diagnostics go to stderr via tracing only; stdout
/// carries nothing but protocol lines.
pub async fn run(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("stdio server ready to process requests");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received, exiting");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }

                debug!("received request: {line}");
                let response = dispatcher.handle_request(&line, TransportMode::Stdio).await;
                let encoded = serde_json::to_string(&response)?;
                debug!("sending response: {encoded}");

                stdout.write_all(encoded.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
