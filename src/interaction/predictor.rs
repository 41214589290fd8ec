//! Classifier invocation and arg-max class selection.

use std::{fmt, sync::Arc};

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;

use super::{error::InternalError, features::FeatureVector};

/// Scoring capability of a pretrained interaction-type classifier.
pub trait Classifier: Send + Sync {
    /// Number of classes, i.e. columns in every score row.
    fn num_classes(&self) -> usize;

    /// Expected feature count per row, when the model records it.
    fn num_features(&self) -> Option<usize>;

    /// Score a batch of feature rows, returning one row of class scores per input row.
    fn predict_scores(&self, batch: ArrayView2<'_, f32>) -> anyhow::Result<Array2<f32>>;
}

/// Index of a predicted interaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassIndex(pub usize);

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Winning class together with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub class: ClassIndex,
    pub score: f32,
}

#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Score `features` as a batch of one and pick the highest-scoring class.
    pub fn predict(&self, features: &FeatureVector) -> Result<Scored, InternalError> {
        let batch = features.view().insert_axis(Axis(0));
        let scores = self
            .classifier
            .predict_scores(batch)
            .map_err(|err| InternalError::Classifier(format!("{err:#}")))?;
        if scores.nrows() != 1 {
            return Err(InternalError::Classifier(format!(
                "expected 1 score row, got {}",
                scores.nrows()
            )));
        }
        argmax(scores.row(0)).ok_or(InternalError::EmptyScores)
    }
}

/// Index of the largest score; the first one wins ties and NaN never wins.
pub fn argmax(scores: ArrayView1<'_, f32>) -> Option<Scored> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best: Option<Scored>, (idx, &score)| match best {
            Some(current) if current.score >= score => Some(current),
            _ => Some(Scored {
                class: ClassIndex(idx),
                score,
            }),
        })
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1};

    use super::*;

    struct Fixed(Array2<f32>);

    impl Classifier for Fixed {
        fn num_classes(&self) -> usize {
            self.0.ncols()
        }

        fn num_features(&self) -> Option<usize> {
            None
        }

        fn predict_scores(&self, _batch: ArrayView2<'_, f32>) -> anyhow::Result<Array2<f32>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn num_classes(&self) -> usize {
            3
        }

        fn num_features(&self) -> Option<usize> {
            Some(8)
        }

        fn predict_scores(&self, batch: ArrayView2<'_, f32>) -> anyhow::Result<Array2<f32>> {
            anyhow::bail!("expected 8 features, got {}", batch.ncols())
        }
    }

    fn features() -> FeatureVector {
        Array1::<f32>::zeros(4).into()
    }

    #[test]
    fn argmax_picks_highest_and_first_on_ties() {
        let best = argmax(array![0.1, 0.7, 0.2].view()).unwrap();
        assert_eq!(best.class, ClassIndex(1));
        let tie = argmax(array![0.4, 0.1, 0.4].view()).unwrap();
        assert_eq!(tie.class, ClassIndex(0));
    }

    #[test]
    fn argmax_ignores_nan_and_handles_empty() {
        let best = argmax(array![f32::NAN, 0.2, 0.1].view()).unwrap();
        assert_eq!(best.class, ClassIndex(1));
        assert!(argmax(Array1::<f32>::zeros(0).view()).is_none());
    }

    #[test]
    fn predict_uses_single_row_batch() {
        let predictor = Predictor::new(Arc::new(Fixed(array![[0.05, 0.15, 0.8]])));
        let scored = predictor.predict(&features()).unwrap();
        assert_eq!(scored.class, ClassIndex(2));
        assert!((scored.score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn classifier_failures_become_internal_errors() {
        let predictor = Predictor::new(Arc::new(Broken));
        match predictor.predict(&features()) {
            Err(InternalError::Classifier(msg)) => assert!(msg.contains("expected 8 features")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_score_rows_are_internal_errors() {
        let predictor = Predictor::new(Arc::new(Fixed(Array2::zeros((1, 0)))));
        assert_eq!(predictor.predict(&features()), Err(InternalError::EmptyScores));
    }
}
