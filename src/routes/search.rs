//! Search endpoints
//!
//! `POST /api/search` runs the full pipeline for one query: web search,
//! AI summary with model fallback, persistence, response composition.
//! `GET /api/searches` and `GET /api/searches/{id}` are read-throughs
//! against the stored history.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::operations::DatabaseOperations;
use crate::llm::gemini::GeminiClient;
use crate::models::{
    AppState, Citation, SearchDetailResponse, SearchHistoryEntry, SearchRequest, SearchResponse,
};
use crate::search::serper::{SearchError, SerperClient};
use crate::summarizer::Summarizer;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(post_search))
        .route("/api/searches", get(list_searches))
        .route("/api/searches/{id}", get(get_search))
        .with_state(state)
}

pub async fn post_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidRequest("Query cannot be empty".to_string()));
    }
    info!(query = %query, "Received search request");

    let serper = SerperClient::from_config(&state.config.search)
        .map_err(|e| AppError::Configuration(e.to_string()))?;
    let gemini = GeminiClient::from_config(&state.config.llm)
        .map_err(|e| AppError::Configuration(e.to_string()))?;
    let models = state.config.llm.model_candidates();

    let response = execute_search(&state.pool, &serper, &gemini, &models, query).await?;
    Ok(Json(response))
}

/// The orchestration pipeline, separated from client construction so tests
/// can point the provider clients at local mocks.
async fn execute_search(
    pool: &SqlitePool,
    serper: &SerperClient,
    gemini: &GeminiClient,
    models: &[String],
    query: &str,
) -> AppResult<SearchResponse> {
    // 1. Fetch ranked results; provider failures surface, no retry
    let results = serper.search(query).await.map_err(|e| match e {
        SearchError::NoApiKey => AppError::Configuration(e.to_string()),
        other => AppError::Upstream(other.to_string()),
    })?;

    // 2-4. Summarize with model fallback; never fails
    let summary = Summarizer::summarize(gemini, models, query, &results).await;

    // 5. Persist query row and citation rows
    let id = DatabaseOperations::insert_search(pool, query, &summary, &results).await?;

    // 6. Compose; response citation ids are the 1-based positions
    let citations = results
        .iter()
        .map(|r| Citation {
            id: r.position,
            title: r.title.clone(),
            url: r.link.clone(),
            snippet: r.snippet.clone(),
            position: r.position,
        })
        .collect();

    info!(id, result_count = results.len(), "Search stored");
    Ok(SearchResponse {
        id,
        query: query.to_string(),
        summary,
        citations,
        raw_results: results,
    })
}

async fn list_searches(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SearchHistoryEntry>>> {
    let entries = DatabaseOperations::list_recent(&state.pool).await?;
    Ok(Json(entries))
}

async fn get_search(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SearchDetailResponse>> {
    let row = DatabaseOperations::get_search_query(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Search not found".to_string()))?;

    let citations = DatabaseOperations::get_citations_for_query(&state.pool, id)
        .await?
        .into_iter()
        .map(|c| Citation {
            id: c.id,
            title: c.title,
            url: c.url,
            snippet: c.snippet,
            position: c.position,
        })
        .collect();

    Ok(Json(SearchDetailResponse {
        id: row.id,
        query: row.query,
        summary: row.response_text,
        citations,
    }))
}
