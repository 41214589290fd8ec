//! Interaction-type reference table loader.

use std::{io::Read, path::Path};

use anyhow::{ensure, Context, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::info;

use crate::interaction::LabelIndex;

#[derive(Debug, Deserialize)]
struct LabelRow {
    #[serde(rename = "merged DDI type index")]
    index: usize,
    #[serde(rename = "type name")]
    name: String,
}

/// Read `(merged type index, type name)` rows from a CSV file.
pub fn load_label_index(path: &Path) -> Result<LabelIndex> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let labels = read_rows(&mut reader).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), labels = labels.len(), "loaded label table");
    Ok(labels)
}

pub fn label_index_from_reader<R: Read>(input: R) -> Result<LabelIndex> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    read_rows(&mut reader)
}

fn read_rows<R: Read>(reader: &mut csv::Reader<R>) -> Result<LabelIndex> {
    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<LabelRow>().enumerate() {
        let row = result.with_context(|| format!("row {}", line + 1))?;
        ensure!(!row.name.is_empty(), "row {} has an empty type name", line + 1);
        rows.push((row.index, row.name));
    }
    ensure!(!rows.is_empty(), "label table has no rows");
    Ok(LabelIndex::from_rows(rows))
}
