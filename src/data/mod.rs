//! Loading of pretrained artefacts: embeddings, classifier and label table.

pub mod labels;
pub mod word2vec;
pub mod xgboost;

use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    interaction::{Classifier, EmbeddingLookup, InteractionService, LabelIndex},
};

use self::{word2vec::WordVectors, xgboost::GradientBoostedTrees};

/// Read every artefact named in `settings` and wire the prediction service.
#[instrument(skip(settings))]
pub fn load_service(settings: &Settings) -> Result<InteractionService> {
    let embeddings = WordVectors::load(&settings.embeddings_path()).context("loading embeddings")?;
    let classifier =
        GradientBoostedTrees::load(&settings.classifier_path()).context("loading classifier")?;
    let labels = labels::load_label_index(&settings.labels_path()).context("loading label table")?;
    assemble(Arc::new(embeddings), Arc::new(classifier), Arc::new(labels))
}

/// Check that the artefacts agree with each other before serving requests.
pub fn assemble(
    embeddings: Arc<dyn EmbeddingLookup>,
    classifier: Arc<dyn Classifier>,
    labels: Arc<LabelIndex>,
) -> Result<InteractionService> {
    let feature_len = 4 * embeddings.dim();
    if let Some(expected) = classifier.num_features() {
        ensure!(
            expected == feature_len,
            "classifier expects {expected} features but embeddings of dimension {} produce {feature_len}",
            embeddings.dim()
        );
    }

    let service = InteractionService::new(embeddings, classifier, labels);
    ensure!(!service.vocabulary().is_empty(), "embedding vocabulary is empty");

    let missing = service.labels().missing_classes(service.num_classes());
    if !missing.is_empty() {
        warn!(?missing, "classifier can emit classes without a label");
    }
    info!(
        vocabulary = service.vocabulary().len(),
        classes = service.num_classes(),
        labels = service.labels().len(),
        features = feature_len,
        "prediction service ready"
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ClassIndex;

    fn embeddings(dim: usize) -> Arc<WordVectors> {
        let rows = vec![
            ("Aspirin".to_string(), vec![0.0; dim]),
            ("Warfarin".to_string(), vec![1.0; dim]),
        ];
        Arc::new(WordVectors::from_rows(rows).unwrap())
    }

    fn classifier(num_feature: usize) -> Arc<GradientBoostedTrees> {
        let json = xgboost::tests::STUMPS.replace(
            "\"num_feature\": \"2\"",
            &format!("\"num_feature\": \"{num_feature}\""),
        );
        Arc::new(GradientBoostedTrees::from_json(&json).unwrap())
    }

    fn labels() -> Arc<LabelIndex> {
        Arc::new(LabelIndex::from_rows(vec![
            (0, "bleeding".to_string()),
            (1, "myopathy".to_string()),
        ]))
    }

    #[test]
    fn feature_count_mismatch_fails_startup() {
        let err = assemble(embeddings(1), classifier(8), labels()).err().unwrap();
        assert!(err.to_string().contains("expects 8 features"));
    }

    #[test]
    fn matching_artefacts_assemble() {
        let service = assemble(embeddings(2), classifier(8), labels()).unwrap();
        assert_eq!(service.feature_len(), 8);
        assert_eq!(service.num_classes(), 2);
        let interaction = service.predict("Aspirin", "Warfarin").unwrap();
        assert!(interaction.class_index <= ClassIndex(1));
    }
}
