//! Corpus handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use insightflow_core::Review;

/// Response for the corpus listing
#[derive(Debug, Serialize)]
pub struct CorpusResponse {
    pub count: usize,
    pub reviews: Vec<Review>,
}

/// GET /api/corpus - The review corpus loaded at startup
pub async fn get_corpus(State(state): State<Arc<AppState>>) -> Json<CorpusResponse> {
    Json(CorpusResponse {
        count: state.corpus.len(),
        reviews: state.corpus.reviews().to_vec(),
    })
}
