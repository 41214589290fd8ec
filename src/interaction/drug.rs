//! Drug name and ordered drug pair value types.

use std::fmt;

use serde::Serialize;

/// A trimmed, non-empty, case-sensitive drug name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DrugName(String);

impl DrugName {
    /// Trim `raw` and wrap it, returning `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DrugName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrugName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered pair of distinct drugs known to the vocabulary.
///
/// Only [`crate::interaction::PairValidator`] constructs values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugPair {
    first: DrugName,
    second: DrugName,
}

impl DrugPair {
    pub(crate) fn new(first: DrugName, second: DrugName) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &DrugName {
        &self.first
    }

    pub fn second(&self) -> &DrugName {
        &self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let name = DrugName::parse("  Aspirin\t").unwrap();
        assert_eq!(name.as_str(), "Aspirin");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(DrugName::parse("").is_none());
        assert!(DrugName::parse(" \n\t ").is_none());
    }

    #[test]
    fn parse_keeps_case_and_inner_spaces() {
        let name = DrugName::parse(" Insulin Glargine ").unwrap();
        assert_eq!(name.to_string(), "Insulin Glargine");
        assert_ne!(DrugName::parse("aspirin"), DrugName::parse("Aspirin"));
    }
}
