//! Command-line interface wiring for ddi-predictor.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod labels;
pub mod predict;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Drug-drug interaction type predictor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Predict(args) => predict::run(args, settings).await,
            Commands::Labels => labels::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON prediction API.
    Serve(serve::Args),
    /// Predict the interaction type for one drug pair.
    Predict(predict::Args),
    /// Print the interaction-type label table.
    Labels,
}
