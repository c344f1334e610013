//! Command-line interface for skirmish_games.

use clap::{Parser, Subcommand};

/// Skirmish Games - authoritative two-player game server
#[derive(Parser, Debug)]
#[command(name = "skirmish_games")]
#[command(about = "Authoritative WebSocket server for the 5x5 skirmish game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket game server
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
