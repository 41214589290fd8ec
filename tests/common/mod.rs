#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ddi_predictor::{
    data::word2vec::WordVectors,
    interaction::{Classifier, EmbeddingLookup, InteractionService, LabelIndex},
};
use ndarray::{Array2, ArrayView1, ArrayView2};

pub const DIM: usize = 3;

pub const DRUGS: &[(&str, [f32; DIM])] = &[
    ("Bivalirudin", [0.25, -1.5, 0.75]),
    ("Simvastatin", [1.0, 0.5, -0.25]),
    ("Warfarin", [-0.5, 2.0, 1.0]),
    ("Aspirin", [0.0, 0.125, -2.0]),
];

pub fn word_vectors() -> WordVectors {
    let rows = DRUGS
        .iter()
        .map(|(name, vector)| (name.to_string(), vector.to_vec()))
        .collect();
    WordVectors::from_rows(rows).expect("valid fixture vectors")
}

/// Embedding lookup that records how often vectors are read.
pub struct CountingEmbeddings {
    inner: WordVectors,
    lookups: AtomicUsize,
}

impl CountingEmbeddings {
    pub fn new() -> Self {
        Self {
            inner: word_vectors(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl EmbeddingLookup for CountingEmbeddings {
    fn dim(&self) -> usize {
        self.inner.dim()
    }

    fn vector(&self, name: &str) -> Option<ArrayView1<'_, f32>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.vector(name)
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.inner.names()
    }
}

/// Classifier returning the same score row for every input row.
pub struct FixedClassifier {
    scores: Vec<f32>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(scores: Vec<f32>) -> Self {
        Self {
            scores,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FixedClassifier {
    fn num_classes(&self) -> usize {
        self.scores.len()
    }

    fn num_features(&self) -> Option<usize> {
        Some(4 * DIM)
    }

    fn predict_scores(&self, batch: ArrayView2<'_, f32>) -> anyhow::Result<Array2<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::ensure!(batch.ncols() == 4 * DIM, "bad feature count {}", batch.ncols());
        let flat: Vec<f32> = (0..batch.nrows())
            .flat_map(|_| self.scores.iter().copied())
            .collect();
        Ok(Array2::from_shape_vec((batch.nrows(), self.scores.len()), flat)?)
    }
}

pub fn labels() -> LabelIndex {
    LabelIndex::from_rows(vec![
        (0, "The risk or severity of bleeding can be increased".to_string()),
        (1, "The serum concentration can be increased".to_string()),
        (2, "The metabolism can be decreased".to_string()),
    ])
}

pub struct Harness {
    pub embeddings: Arc<CountingEmbeddings>,
    pub classifier: Arc<FixedClassifier>,
    pub service: InteractionService,
}

pub fn harness(scores: Vec<f32>) -> Harness {
    let embeddings = Arc::new(CountingEmbeddings::new());
    let classifier = Arc::new(FixedClassifier::new(scores));
    let service = InteractionService::new(
        embeddings.clone(),
        classifier.clone(),
        Arc::new(labels()),
    );
    Harness {
        embeddings,
        classifier,
        service,
    }
}
