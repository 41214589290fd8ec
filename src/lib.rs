//! Drug-drug interaction type prediction from pretrained drug embeddings.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod interaction;
pub mod logging;
