//! Pair validation ahead of any embedding lookup or inference.

use std::sync::Arc;

use super::{
    drug::{DrugName, DrugPair},
    error::ValidationError,
    vocab::VocabularySet,
};

/// Checks raw drug names against the vocabulary and the distinctness rule.
///
/// Rules run in a fixed order: emptiness (drug1, then drug2), vocabulary
/// membership (both names, each unknown name reported once), then distinctness.
#[derive(Debug, Clone)]
pub struct PairValidator {
    vocabulary: Arc<VocabularySet>,
}

impl PairValidator {
    pub fn new(vocabulary: Arc<VocabularySet>) -> Self {
        Self { vocabulary }
    }

    pub fn validate(&self, raw1: &str, raw2: &str) -> Result<DrugPair, ValidationError> {
        let first = non_empty(raw1, "drug1")?;
        let second = non_empty(raw2, "drug2")?;
        self.known(&first, &second)?;
        distinct(&first, &second)?;
        Ok(DrugPair::new(first, second))
    }

    fn known(&self, first: &DrugName, second: &DrugName) -> Result<(), ValidationError> {
        let mut missing: Vec<String> = Vec::with_capacity(2);
        for name in [first, second] {
            let seen = missing.iter().any(|m| m == name.as_str());
            if !seen && !self.vocabulary.contains(name.as_str()) {
                missing.push(name.to_string());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::UnknownDrug(missing))
        }
    }
}

fn non_empty(raw: &str, field: &'static str) -> Result<DrugName, ValidationError> {
    DrugName::parse(raw).ok_or(ValidationError::EmptyName { field })
}

fn distinct(first: &DrugName, second: &DrugName) -> Result<(), ValidationError> {
    if first == second {
        Err(ValidationError::IdenticalDrugs(first.to_string()))
    } else {
        Ok(())
    }
}
