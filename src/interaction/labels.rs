//! Class index to interaction-type name mapping.

use std::collections::BTreeMap;

use tracing::warn;

use super::{error::InternalError, predictor::ClassIndex};

/// Read-only mapping from classifier output class to a human-readable label.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    labels: BTreeMap<ClassIndex, String>,
}

impl LabelIndex {
    /// Build from `(index, name)` rows. A repeated index keeps its last name.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        let mut labels = BTreeMap::new();
        for (idx, name) in rows {
            if let Some(previous) = labels.insert(ClassIndex(idx), name.clone()) {
                if previous != name {
                    warn!(index = idx, %previous, current = %name, "duplicate label index; keeping last");
                }
            }
        }
        Self { labels }
    }

    pub fn resolve(&self, idx: ClassIndex) -> Result<&str, InternalError> {
        self.labels
            .get(&idx)
            .map(String::as_str)
            .ok_or(InternalError::UnknownClassIndex(idx.0))
    }

    /// Classes in `0..num_classes` that have no label.
    pub fn missing_classes(&self, num_classes: usize) -> Vec<ClassIndex> {
        (0..num_classes)
            .map(ClassIndex)
            .filter(|idx| !self.labels.contains_key(idx))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassIndex, &str)> {
        self.labels.iter().map(|(idx, name)| (*idx, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
