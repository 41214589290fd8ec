//! Feature construction from a validated drug pair.

use std::sync::Arc;

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use super::{drug::DrugPair, error::InternalError};

/// Read access to a pretrained embedding model.
pub trait EmbeddingLookup: Send + Sync {
    /// Length of every vector returned by [`EmbeddingLookup::vector`].
    fn dim(&self) -> usize;

    fn vector(&self, name: &str) -> Option<ArrayView1<'_, f32>>;

    /// Every name the model holds a vector for.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

/// Classifier input laid out as `[first, second, |first - second|, first * second]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f32>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.0.view()
    }

    pub fn into_inner(self) -> Array1<f32> {
        self.0
    }
}

impl From<Array1<f32>> for FeatureVector {
    fn from(value: Array1<f32>) -> Self {
        Self(value)
    }
}

/// Builds classifier features from embedding lookups.
#[derive(Clone)]
pub struct FeatureBuilder {
    embeddings: Arc<dyn EmbeddingLookup>,
}

impl FeatureBuilder {
    pub fn new(embeddings: Arc<dyn EmbeddingLookup>) -> Self {
        Self { embeddings }
    }

    /// Number of features produced per pair.
    pub fn output_len(&self) -> usize {
        4 * self.embeddings.dim()
    }

    pub fn build(&self, pair: &DrugPair) -> Result<FeatureVector, InternalError> {
        let first = self.lookup(pair.first().as_str())?;
        let second = self.lookup(pair.second().as_str())?;

        let abs_diff = first.iter().zip(&second).map(|(a, b)| (a - b).abs());
        let product = first.iter().zip(&second).map(|(a, b)| a * b);
        let features: Array1<f32> = first
            .iter()
            .chain(&second)
            .copied()
            .chain(abs_diff)
            .chain(product)
            .collect();

        if features.len() != self.output_len() {
            return Err(InternalError::FeatureShape {
                expected: self.output_len(),
                actual: features.len(),
            });
        }
        debug!(len = features.len(), first = %pair.first(), second = %pair.second(), "built features");
        Ok(FeatureVector(features))
    }

    fn lookup(&self, name: &str) -> Result<ArrayView1<'_, f32>, InternalError> {
        self.embeddings
            .vector(name)
            .ok_or_else(|| InternalError::EmbeddingLookup(name.to_string()))
    }
}
