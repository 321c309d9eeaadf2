//! Genre prediction handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use genre_core::{PredictRequest, PredictionResult, ValidationError, API_KEY_HEADER};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticates, validates and classifies one feature vector.
///
/// The credential is checked before the body is looked at.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    let provided = headers
        .get(API_KEY_HEADER)
        .map(|value| value.to_str().unwrap_or_default());
    state.credentials.check(provided).map_err(|e| {
        warn!("Rejected credentials: {}", e);
        e
    })?;

    let Json(request) =
        payload.map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;
    let features = request.validate().map_err(|e| {
        warn!("Invalid features: {}", e);
        e
    })?;

    let result = state.predictor.predict(&features).map_err(|e| {
        warn!("{}", e);
        e
    })?;

    info!("Predicted genre: {}", result.predicted_genre);
    Ok(Json(result))
}
