//! CLI entry-point for listing interaction-type labels.

use anyhow::Result;
use tracing::instrument;

use crate::{config::Settings, data};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let labels = data::labels::load_label_index(&settings.labels_path())?;
    for (idx, name) in labels.iter() {
        println!("{idx}\t{name}");
    }
    Ok(())
}
