//! Reader for word2vec text-format embedding exports.
//!
//! The optional first line is a `<count> <dim>` header. Every other line is a
//! name followed by `dim` floats; names may contain spaces, so the vector is
//! always taken from the right. Without a header the dimension is inferred
//! from the trailing numeric fields of the first row, so files whose names can
//! end in a number (`Factor 7`) must carry the header.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, ensure, Context, Result};
use indexmap::IndexMap;
use ndarray::{Array2, ArrayView1};
use tracing::info;

use crate::interaction::EmbeddingLookup;

/// Dense, immutable embedding table keyed by drug name.
#[derive(Debug, Clone)]
pub struct WordVectors {
    index: IndexMap<String, usize>,
    vectors: Array2<f32>,
}

impl WordVectors {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let vectors = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing embeddings from {}", path.display()))?;
        info!(
            path = %path.display(),
            names = vectors.len(),
            dim = vectors.dim(),
            "loaded word vectors"
        );
        Ok(vectors)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut header: Option<(usize, usize)> = None;
        let mut dim: Option<usize> = None;
        let mut rows = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if rows.is_empty() && dim.is_none() {
                if let Some(parsed) = parse_header(&tokens) {
                    header = Some(parsed);
                    dim = Some(parsed.1);
                    continue;
                }
                dim = Some(infer_dim(&tokens));
            }
            let dim = dim.unwrap_or_default();
            let row = parse_row(&tokens, dim).with_context(|| format!("line {}", line_no + 1))?;
            rows.push(row);
        }

        if let Some((count, _)) = header {
            ensure!(
                count == rows.len(),
                "header declares {count} vectors but file holds {}",
                rows.len()
            );
        }
        Self::from_rows(rows)
    }

    /// Build from in-memory `(name, vector)` rows. All vectors must share one length.
    pub fn from_rows(rows: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let Some(dim) = rows.first().map(|(_, v)| v.len()) else {
            bail!("no embedding vectors found");
        };
        ensure!(dim > 0, "embedding dimension must be positive");

        let mut index = IndexMap::with_capacity(rows.len());
        let mut flat = Vec::with_capacity(rows.len() * dim);
        for (name, vector) in rows {
            ensure!(
                vector.len() == dim,
                "vector for {name} has {} values, expected {dim}",
                vector.len()
            );
            let next = index.len();
            if index.insert(name.clone(), next).is_some() {
                bail!("duplicate embedding for {name}");
            }
            flat.extend(vector);
        }
        let vectors = Array2::from_shape_vec((index.len(), dim), flat)?;
        Ok(Self { index, vectors })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl EmbeddingLookup for WordVectors {
    fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    fn vector(&self, name: &str) -> Option<ArrayView1<'_, f32>> {
        self.index.get(name).map(|&row| self.vectors.row(row))
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.index.keys().map(String::as_str))
    }
}

fn parse_header(tokens: &[&str]) -> Option<(usize, usize)> {
    match tokens {
        [count, dim] => Some((count.parse().ok()?, dim.parse().ok()?)),
        _ => None,
    }
}

/// Count trailing numeric tokens, always leaving at least one for the name.
fn infer_dim(tokens: &[&str]) -> usize {
    tokens
        .iter()
        .skip(1)
        .rev()
        .take_while(|token| token.parse::<f32>().is_ok())
        .count()
}

fn parse_row(tokens: &[&str], dim: usize) -> Result<(String, Vec<f32>)> {
    ensure!(
        dim > 0 && tokens.len() > dim,
        "expected a name and {dim} values, found {} fields",
        tokens.len()
    );
    let split = tokens.len() - dim;
    let name = tokens[..split].join(" ");
    let vector = tokens[split..]
        .iter()
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|err| anyhow!("invalid value {token:?} for {name}: {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((name, vector))
}
