//! Drug pair validation, feature construction and interaction-type prediction.

pub mod drug;
pub mod error;
pub mod features;
pub mod labels;
pub mod predictor;
pub mod validate;
pub mod vocab;

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

pub use drug::{DrugName, DrugPair};
pub use error::{InternalError, PredictError, ValidationError};
pub use features::{EmbeddingLookup, FeatureBuilder, FeatureVector};
pub use labels::LabelIndex;
pub use predictor::{ClassIndex, Classifier, Predictor};
pub use validate::PairValidator;
pub use vocab::VocabularySet;

/// Predicted interaction type for a drug pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub class_index: ClassIndex,
    pub label: String,
    pub probability: f32,
}

/// Request handler composing validation, features, scoring and label lookup.
#[derive(Clone)]
pub struct InteractionService {
    vocabulary: Arc<VocabularySet>,
    labels: Arc<LabelIndex>,
    validator: PairValidator,
    features: FeatureBuilder,
    predictor: Predictor,
}

impl InteractionService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingLookup>,
        classifier: Arc<dyn Classifier>,
        labels: Arc<LabelIndex>,
    ) -> Self {
        let vocabulary = Arc::new(VocabularySet::from_embeddings(embeddings.as_ref()));
        Self::with_vocabulary(vocabulary, embeddings, classifier, labels)
    }

    /// Use a vocabulary built separately from the embedding model.
    pub fn with_vocabulary(
        vocabulary: Arc<VocabularySet>,
        embeddings: Arc<dyn EmbeddingLookup>,
        classifier: Arc<dyn Classifier>,
        labels: Arc<LabelIndex>,
    ) -> Self {
        Self {
            validator: PairValidator::new(vocabulary.clone()),
            vocabulary,
            labels,
            features: FeatureBuilder::new(embeddings),
            predictor: Predictor::new(classifier),
        }
    }

    pub fn vocabulary(&self) -> &VocabularySet {
        &self.vocabulary
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn feature_len(&self) -> usize {
        self.features.output_len()
    }

    pub fn num_classes(&self) -> usize {
        self.predictor.classifier().num_classes()
    }

    pub fn validate(&self, raw1: &str, raw2: &str) -> Result<DrugPair, ValidationError> {
        self.validator.validate(raw1, raw2)
    }

    pub fn validate_and_build(&self, raw1: &str, raw2: &str) -> Result<FeatureVector, PredictError> {
        let pair = self.validate(raw1, raw2)?;
        Ok(self.features.build(&pair)?)
    }

    pub fn predict_and_label(&self, features: &FeatureVector) -> Result<Interaction, InternalError> {
        let scored = self.predictor.predict(features)?;
        let label = self.labels.resolve(scored.class)?;
        Ok(Interaction {
            class_index: scored.class,
            label: label.to_string(),
            probability: scored.score,
        })
    }

    /// Full pipeline for one request.
    #[instrument(skip(self))]
    pub fn predict(&self, raw1: &str, raw2: &str) -> Result<Interaction, PredictError> {
        let outcome = self
            .validate_and_build(raw1, raw2)
            .and_then(|features| self.predict_and_label(&features).map_err(PredictError::from));
        match &outcome {
            Ok(found) => info!(class = %found.class_index, label = %found.label, "predicted interaction"),
            Err(PredictError::Client(err)) => warn!(%err, "rejected drug pair"),
            Err(PredictError::Internal(err)) => error!(%err, "prediction failed"),
        }
        outcome
    }

    /// Vocabulary entries resembling `name`, for unknown-drug reports.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        self.vocabulary.suggest(name, limit)
    }
}
