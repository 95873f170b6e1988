//! Riposte CLI and HTTP server entry point.
//!
//! Binary name: `riposte`. Run `riposte serve` to start the HTTP API,
//! or use the subcommands to inspect personas and conversation memory
//! from the terminal.

mod cli;
mod http;
mod state;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tokio::net::TcpListener;

use crate::cli::{Cli, Commands, MemoryCommand};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,riposte=debug",
        _ => "trace",
    };
    let enable_otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    riposte_observe::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Completions don't need app state; handle before the (potentially
    // slow) embedder initialization.
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "riposte", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match &cli.command {
        Commands::Serve { port, host, .. } => {
            let host = host
                .clone()
                .unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");

            let listener = TcpListener::bind(&addr).await?;

            if !state.api_key_present {
                println!(
                    "  {} GEMINI_API_KEY is not set; /generate will refuse requests",
                    console::style("!").yellow().bold()
                );
            }
            println!(
                "\n  {} Riposte listening on {}",
                console::style("⚡").cyan(),
                console::style(format!("http://{addr}")).cyan().bold()
            );
            println!("  {}\n", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            riposte_observe::shutdown_tracing();
            println!("\n  Server stopped.");
        }
        Commands::Personas => {
            cli::persona::list_personas(&state, cli.json)?;
        }
        Commands::Memory { action } => match action {
            MemoryCommand::Show { chat } => {
                cli::memory::show_memory(&state, chat, cli.json).await?;
            }
            MemoryCommand::Clear { chat, force } => {
                cli::memory::clear_memory(&state, chat, *force, cli.json).await?;
            }
        },
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
