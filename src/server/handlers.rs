//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::calculators;
use crate::data::FeatureVector;
use crate::error::HeartError;
use crate::inference::Identity;
use crate::report::{self, REPORT_FILENAME, REPORT_MIME};

use super::error::{Result, ServerError};
use super::state::AppState;

// ============================================================================
// System
// ============================================================================

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// Dataset
// ============================================================================

pub async fn get_dataset_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>> {
    let state_clone = state.clone();
    let corpus = tokio::task::spawn_blocking(move || state_clone.dataset.get_or_load())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok(Json(json!({
        "path": state.dataset.path().display().to_string(),
        "summary": corpus.summary(),
    })))
}

// ============================================================================
// Sessions
// ============================================================================

pub async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let id = state.create_session().await;
    info!(session = %id, "Session created");
    (StatusCode::CREATED, Json(json!({ "session_id": id })))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.remove_session(&id).await?;
    info!(session = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Training and prediction
// ============================================================================

pub async fn train(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    if !state.session_exists(&id).await {
        return Err(ServerError::NotFound(format!("Unknown session: {}", id)));
    }

    // Training is CPU bound; keep it off the async workers
    let state_clone = state.clone();
    let outcome = tokio::task::spawn_blocking(move || -> crate::error::Result<_> {
        let corpus = state_clone.dataset.get_or_load()?;
        state_clone.trainer.train(&corpus)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    let n_train = outcome.n_train;
    let n_test = outcome.n_test;
    let training_time_secs = outcome.training_time_secs;
    let metrics = outcome.model.metrics().clone();
    let importances: Vec<serde_json::Value> = outcome
        .model
        .feature_importances()
        .into_iter()
        .map(|(feature, importance)| json!({ "feature": feature, "importance": importance }))
        .collect();
    let accuracy = state
        .with_session(&id, move |session| Ok(session.install(outcome)))
        .await?;

    Ok(Json(json!({
        "success": true,
        "accuracy": accuracy,
        "accuracy_percent": format!("{:.2}%", accuracy * 100.0),
        "n_train": n_train,
        "n_test": n_test,
        "training_time_secs": training_time_secs,
        "metrics": metrics,
        "feature_importances": importances,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub features: FeatureVector,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<serde_json::Value>> {
    let prediction = state
        .with_session(&id, |session| {
            Ok(session
                .predict(Identity::new(request.name), request.features)?
                .clone())
        })
        .await?;

    Ok(Json(json!({
        "risk": prediction.risk.to_string(),
        "label": prediction.risk.label(),
        "probability": prediction.probability,
        "risk_score": prediction.risk.risk_score(),
        "tips": prediction.risk.tips(),
    })))
}

pub async fn download_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let prediction = state
        .with_session(&id, |session| {
            Ok(session.last_prediction().cloned().ok_or(HeartError::NoPrediction)?)
        })
        .await?;

    // Render outside the sessions lock
    let bytes = tokio::task::spawn_blocking(move || {
        report::render(&prediction.identity, &prediction.features, prediction.risk)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        bytes,
    ))
}

// ============================================================================
// Calculators
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
}

pub async fn calculate_bmi(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<BmiRequest>,
) -> Result<Json<serde_json::Value>> {
    let reading = state
        .with_session(&id, |session| {
            Ok(session.calculate_bmi(request.weight_kg, request.height_cm)?)
        })
        .await?;

    Ok(Json(json!({
        "bmi": reading.value,
        "bmi_display": format!("{:.2}", reading.value),
        "category": reading.category.to_string(),
        "advice": reading.advice(),
    })))
}

pub async fn get_bmi_meter(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let reading = state
        .with_session(&id, |session| Ok(session.last_bmi().copied()))
        .await?
        .ok_or_else(|| ServerError::NotFound("No BMI calculated in this session".to_string()))?;
    let meter = reading.meter();

    Ok(Json(json!({
        "bmi": reading.value,
        "category": reading.category.to_string(),
        "percent": meter.percent,
        "color": meter.color,
    })))
}

#[derive(Debug, Deserialize)]
pub struct CholesterolRequest {
    pub hdl: f64,
    pub ldl: f64,
    pub triglycerides: f64,
}

pub async fn calculate_cholesterol(
    Json(request): Json<CholesterolRequest>,
) -> Result<Json<serde_json::Value>> {
    let reading =
        calculators::total_cholesterol(request.hdl, request.ldl, request.triglycerides)?;

    Ok(Json(json!({
        "total": reading.total,
        "total_display": format!("{:.1}", reading.total),
        "category": reading.category.to_string(),
        "message": reading.message(),
    })))
}
