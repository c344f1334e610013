//! Skirmish Games - authoritative game server CLI.

#![warn(missing_docs)]

mod cli;
mod games;
mod protocol;
mod server;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use session::Room;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => {
            info!("Starting Skirmish Games server");
            let room = Room::new();
            server::serve(room, &host, port).await
        }
    }
}
