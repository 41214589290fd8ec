//! Shared DTOs for JSON responses.

use serde::{Deserialize, Serialize};

use crate::interaction::Interaction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub vocabulary: usize,
    pub classes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDto {
    pub interaction_type_index: usize,
    pub interaction_type_label: String,
    pub probability: f32,
}

impl From<Interaction> for InteractionDto {
    fn from(value: Interaction) -> Self {
        InteractionDto {
            interaction_type_index: value.class_index.0,
            interaction_type_label: value.label,
            probability: value.probability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
