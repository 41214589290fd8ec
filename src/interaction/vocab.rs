//! Vocabulary gate: the set of drug names the embedding model knows.

use std::collections::HashSet;

use strsim::jaro_winkler;

use super::features::EmbeddingLookup;

/// Read-only set of known drug names, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct VocabularySet {
    names: HashSet<String>,
}

impl VocabularySet {
    /// Collect every key exposed by the embedding model.
    pub fn from_embeddings(embeddings: &dyn EmbeddingLookup) -> Self {
        embeddings.names().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Closest known names to `name`, best first, ties broken alphabetically.
    pub fn suggest(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .names
            .iter()
            .map(|candidate| (jaro_winkler(&needle, &candidate.to_lowercase()), candidate))
            .filter(|(score, _)| *score >= 0.8)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for VocabularySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> VocabularySet {
        ["Bivalirudin", "Simvastatin", "Atorvastatin", "Warfarin"]
            .into_iter()
            .collect()
    }

    #[test]
    fn membership_is_exact_and_case_sensitive() {
        let vocab = vocab();
        assert!(vocab.contains("Warfarin"));
        assert!(!vocab.contains("warfarin"));
        assert!(!vocab.contains(" Warfarin"));
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn suggestions_rank_closest_first() {
        let suggestions = vocab().suggest("simvastatn", 2);
        assert_eq!(suggestions.first().map(String::as_str), Some("Simvastatin"));
        assert!(suggestions.len() <= 2);
    }

    #[test]
    fn suggestions_skip_unrelated_names() {
        assert!(vocab().suggest("zzzzzz", 3).is_empty());
    }
}
