use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use commands::{analyze, serve};

#[derive(Parser)]
#[command(name = "planlens")]
#[command(about = "PlanLens insurance plan analyzer with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address, overriding PLANLENS_BIND_ADDRESS
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyze plan documents without starting the server
    ///
    /// Runs each file through the same pipeline as the web API and prints
    /// the analyses as JSON on stdout.
    Analyze {
        /// Plan documents to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind } => {
                serve(bind.as_deref()).await?;
            }
            Commands::Analyze { files, pretty } => {
                analyze(&files, pretty).await?;
            }
        }
        Ok(())
    }
}
