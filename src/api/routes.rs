//! HTTP route handlers for Axum.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    api::types::{ErrorDto, HealthDto, InteractionDto, MessageDto},
    interaction::{PredictError, ValidationError},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorDto>)>;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct PairQuery {
    pub drug1: String,
    pub drug2: String,
}

pub async fn home() -> Json<MessageDto> {
    Json(MessageDto {
        message: "Hello, welcome to the drug-drug interaction type finder".into(),
    })
}

pub async fn about() -> Json<MessageDto> {
    Json(MessageDto {
        message: "Predicts the interaction type between two drugs from pretrained drug embeddings and a gradient boosted classifier".into(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".into(),
        vocabulary: state.service.vocabulary().len(),
        classes: state.service.num_classes(),
    })
}

pub async fn drug_interaction(
    State(state): State<AppState>,
    Query(query): Query<PairQuery>,
) -> ApiResult<InteractionDto> {
    state
        .service
        .predict(&query.drug1, &query.drug2)
        .map(|interaction| Json(interaction.into()))
        .map_err(|err| error_response(&state, err))
}

fn error_response(state: &AppState, err: PredictError) -> (StatusCode, Json<ErrorDto>) {
    match err {
        PredictError::Client(err) => {
            let suggestions = match &err {
                ValidationError::UnknownDrug(names) => names
                    .iter()
                    .flat_map(|name| state.service.suggest(name, MAX_SUGGESTIONS))
                    .collect(),
                _ => Vec::new(),
            };
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    detail: err.to_string(),
                    suggestions,
                }),
            )
        }
        PredictError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                detail: "internal error".into(),
                suggestions: Vec::new(),
            }),
        ),
    }
}
