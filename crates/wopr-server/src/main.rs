//! WOPR binary.
//!
//! # Usage
//!
//! ```bash
//! # Talk to WOPR on this terminal
//! wopr
//!
//! # Serve telnet clients on port 2000 (or $WOPR_PORT)
//! wopr --server
//! WOPR_PORT=2323 wopr --server --bind 127.0.0.1
//! ```
//!
//! Logs go to stderr so they never interleave with the conversation.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wopr_core::RenderConfig;
use wopr_server::{Server, ServerConfig, ServerError, SystemEnv, run_console};

/// WOPR terminal conversation
#[derive(Parser, Debug)]
#[command(name = "wopr")]
#[command(about = "Scripted conversation with a war operation plan response computer")]
#[command(version)]
struct Args {
    /// Serve sessions over TCP instead of the local terminal
    #[arg(long)]
    server: bool,

    /// Host to bind in server mode; the port comes from WOPR_PORT
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Log level (trace, debug, info, warn, error) [default: info with
    /// --server, warn otherwise]
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = args.log_level.as_deref().unwrap_or(if args.server { "info" } else { "warn" });
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "wopr stopped");
        return Err(e.into());
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), ServerError> {
    if !args.server {
        run_console(SystemEnv::new(), RenderConfig::default()).await?;
        return Ok(());
    }

    let config = ServerConfig::from_env(args.bind)?;
    tracing::info!(port = config.port, "WOPR server starting");

    let server = Server::bind(&config).await?;
    server.run_until(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}
