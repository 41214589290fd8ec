//! Runtime configuration utilities for ddi-predictor.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder holding the pretrained artefacts.
    pub data_dir: PathBuf,
    /// Word2vec text export of the drug embedding model.
    pub embeddings_file: PathBuf,
    /// XGBoost JSON export of the interaction classifier.
    pub classifier_file: PathBuf,
    /// CSV reference table of merged interaction types.
    pub labels_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            embeddings_file: PathBuf::from("w2v_vectors.txt"),
            classifier_file: PathBuf::from("xgb_model.json"),
            labels_file: PathBuf::from("DDI_types_merged.csv"),
        }
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Resolve settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);
        Self {
            data_dir: path("DATA_DIR", defaults.data_dir),
            embeddings_file: path("EMBEDDINGS_FILE", defaults.embeddings_file),
            classifier_file: path("CLASSIFIER_FILE", defaults.classifier_file),
            labels_file: path("LABELS_FILE", defaults.labels_file),
        }
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    pub fn embeddings_path(&self) -> PathBuf {
        self.join_data(&self.embeddings_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.join_data(&self.classifier_file)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.join_data(&self.labels_file)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_live_under_data_dir() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.labels_path(), PathBuf::from("./data/DDI_types_merged.csv"));
        assert_eq!(settings.classifier_path(), PathBuf::from("./data/xgb_model.json"));
    }

    #[test]
    fn absolute_overrides_ignore_data_dir() {
        let vars = HashMap::from([
            ("DATA_DIR", "/srv/ddi"),
            ("EMBEDDINGS_FILE", "/models/vectors.txt"),
            ("LABELS_FILE", "labels.csv"),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.embeddings_path(), PathBuf::from("/models/vectors.txt"));
        assert_eq!(settings.labels_path(), PathBuf::from("/srv/ddi/labels.csv"));
    }
}
