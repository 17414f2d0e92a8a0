use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod clean;
pub(crate) mod migrate;

#[derive(Parser)]
#[command(about = "job board web service")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the HTTP API and pages
    Listen,
    /// Apply pending schema migrations
    Migrate,
    /// Delete every application, job and user (development only)
    Clean,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Clean) => {
            clean::apply().await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
