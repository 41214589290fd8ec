//! CLI entry-point for a single prediction.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api::types::InteractionDto, config::Settings, data};

/// Args for the `predict` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// First drug name.
    #[arg(long)]
    pub drug1: String,
    /// Second drug name.
    #[arg(long)]
    pub drug2: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let service = data::load_service(&settings)?;
    let interaction = service
        .predict(&args.drug1, &args.drug2)
        .with_context(|| format!("predicting {} + {}", args.drug1, args.drug2))?;
    let body = serde_json::to_string_pretty(&InteractionDto::from(interaction))?;
    println!("{body}");
    Ok(())
}
