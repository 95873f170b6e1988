//! Command line interface definitions.

pub mod memory;
pub mod persona;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Persona reply service for your group chats.
#[derive(Parser)]
#[command(name = "riposte", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host address to bind
        #[arg(long)]
        host: Option<String>,

        /// Export spans to stdout via OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// List the available personas
    Personas,

    /// Inspect or wipe conversation memory
    Memory {
        #[command(subcommand)]
        action: MemoryCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum MemoryCommand {
    /// Show stored exchanges for a chat
    Show {
        /// Chat ID to inspect
        chat: String,
    },

    /// Wipe stored exchanges for a chat
    Clear {
        /// Chat ID to wipe
        chat: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}
