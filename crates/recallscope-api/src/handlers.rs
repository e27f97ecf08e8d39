//! API request handlers

use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::Json as JsonResponse,
};
use std::sync::Arc;
use std::time::Instant;

use crate::models::*;
use recallscope_graph::{event_iri, SparqlResponse, TripleStore};
use recallscope_search::{QueryTranslator, SearchBackend, SearchResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn SearchBackend>,
    pub triple_store: Arc<dyn TripleStore>,
    pub start_time: Instant,
}

/// Health check handler
pub async fn health_check(
    Extension(state): Extension<Arc<AppState>>,
) -> JsonResponse<HealthResponse> {
    let uptime = state.start_time.elapsed();

    JsonResponse(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.as_secs(),
    })
}

/// Faceted search handler. Translates the interaction state, executes it,
/// and returns the backend response verbatim.
pub async fn search(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<SearchApiRequest>,
) -> Result<JsonResponse<SearchResponse>, (StatusCode, JsonResponse<ErrorResponse>)> {
    let translated = QueryTranslator::translate(request.query.as_deref(), &request.filters);

    match state.search.search(&translated).await {
        Ok(response) => Ok(JsonResponse(response)),
        Err(e) => {
            tracing::error!(error = %e, "search backend request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonResponse(ErrorResponse::new("Search failed")),
            ))
        }
    }
}

/// Graph-data handler. Resolves the event id to its IRI, queries the triple
/// store, and returns the bindings response verbatim. A missing id is a
/// client error; no backend call is attempted.
pub async fn graph_data(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<GraphDataParams>,
) -> Result<JsonResponse<SparqlResponse>, (StatusCode, JsonResponse<ErrorResponse>)> {
    let id = match params.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                JsonResponse(ErrorResponse::new("Missing id")),
            ))
        }
    };

    match state.triple_store.subject_statements(&event_iri(&id)).await {
        Ok(response) => Ok(JsonResponse(response)),
        Err(e) => {
            tracing::error!(error = %e, id, "triple store request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                JsonResponse(ErrorResponse::new("Graph query failed")),
            ))
        }
    }
}
