//! Analyze handler

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use insightflow_core::{
    render, AlertPayload, AnalysisRequest, Category, InsightProvider, Report, Tier,
};

/// Request body for an analysis run
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    /// Business or listing name
    pub subject: String,
    pub category: Category,
    /// Analysis tier (default: consulting, the full report)
    #[serde(default = "default_tier")]
    pub tier: Tier,
}

fn default_tier() -> Tier {
    Tier::Consulting
}

/// Response for an analysis run
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: Report,
    /// Urgent-issue banner payload, when the insight flags one
    pub alert: Option<AlertPayload>,
    pub provider: &'static str,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

/// POST /api/analyze - Run one request -> validate -> render cycle
///
/// The subject is validated before any provider call; all provider and
/// contract failures are terminal for the request (no retry, no partial
/// result).
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if body.subject.trim().is_empty() {
        return Err(AppError::bad_request("Subject must not be empty"));
    }

    let request = AnalysisRequest::new(
        body.subject,
        state.corpus.reviews().to_vec(),
        body.category,
        body.tier,
    )
    .map_err(AppError::from_core)?;

    let insight = state
        .provider
        .request_insight(&request)
        .await
        .map_err(AppError::from_core)?;

    let rendered = render(&request.subject, &insight, request.category, request.tier)
        .map_err(AppError::from_core)?;

    Ok(Json(AnalyzeResponse {
        report: rendered.report,
        alert: rendered.alert,
        provider: state.provider.backend(),
        model: state.provider.model().to_string(),
        analyzed_at: Utc::now(),
    }))
}
