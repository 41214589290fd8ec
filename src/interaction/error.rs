//! Error taxonomy for the prediction pipeline.
//!
//! Client errors are fixable by the caller and name the offending input.
//! Internal errors point at an inconsistency between loaded artefacts.

use thiserror::Error;

/// Rejections raised while validating a drug pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a non-empty drug name")]
    EmptyName { field: &'static str },

    #[error("drug not found in vocabulary: {}", .0.join(", "))]
    UnknownDrug(Vec<String>),

    #[error("drug1 and drug2 must be different (both were {0})")]
    IdenticalDrugs(String),
}

/// Faults that indicate a system or data inconsistency rather than bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternalError {
    #[error("embedding model has no vector for {0}")]
    EmbeddingLookup(String),

    #[error("feature vector has length {actual}, expected {expected}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("classifier failed: {0}")]
    Classifier(String),

    #[error("classifier returned no class scores")]
    EmptyScores,

    #[error("class index {0} has no entry in the label table")]
    UnknownClassIndex(usize),
}

/// Any failure surfaced by the request handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Client(#[from] ValidationError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PredictError {
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}
