use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use metrics::counter;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::encoding::{FieldOptions, option_listing};
use crate::engine::Engine;
use crate::error::ApiError;
use crate::types::{CreditApplication, ModelInfo, PredictionResponse};
use crate::validation::validate;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<dyn Engine>,
    strict_validation: bool,
}

impl AppState {
    pub fn new(engine: Arc<dyn Engine>, strict_validation: bool) -> Self {
        Self {
            engine,
            strict_validation,
        }
    }
}

/// Prediction routes. Metrics are layered on by the binary since the
/// Prometheus recorder is process-global.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/options", get(options_handler))
        .route("/model", get(model_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tracing::instrument(skip(state, payload), fields(request_id = %Uuid::new_v4().simple()))]
async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreditApplication>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    counter!("prediction_requests_total").increment(1);

    let Json(application) = payload.map_err(|rejection| {
        counter!("prediction_failures_total", "reason" => "payload").increment(1);
        ApiError::from(rejection)
    })?;
    tracing::info!(
        account = %application.existing_account_status,
        "Processing prediction request"
    );

    if state.strict_validation {
        let issues = validate(&application);
        if !issues.is_empty() {
            counter!("prediction_failures_total", "reason" => "validation").increment(1);
            return Err(ApiError::Validation(issues));
        }
    }

    let code = state.engine.predict(&application).await.map_err(|e| {
        counter!("prediction_failures_total", "reason" => "inference").increment(1);
        ApiError::Inference(e)
    })?;

    tracing::info!(prediction = code, "Prediction completed successfully");
    Ok(Json(PredictionResponse {
        prediction: vec![code],
    }))
}

async fn options_handler() -> Json<Vec<FieldOptions>> {
    Json(option_listing())
}

async fn model_handler(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.engine.info())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
