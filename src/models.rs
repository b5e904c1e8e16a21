use sqlx::SqlitePool;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

// Persisted rows.
// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct SearchQueryRow {
    pub id: i64,
    pub query: String,
    pub response_text: String,
    pub citations_json: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct CitationRow {
    pub id: i64,
    pub search_query_id: i64,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub position: i64,
}

/// One ranked result from the search provider. Transient: embedded in the
/// query row as `citations_json` and mirrored into citation rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

// API request/response types

#[derive(Debug, serde::Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Citation {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub position: i64,
}

#[derive(Debug, serde::Serialize)]
pub struct SearchResponse {
    pub id: i64,
    pub query: String,
    pub summary: String,
    pub citations: Vec<Citation>,
    pub raw_results: Vec<SearchResult>,
}

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct SearchHistoryEntry {
    pub id: i64,
    pub query: String,
    pub response_text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, serde::Serialize)]
pub struct SearchDetailResponse {
    pub id: i64,
    pub query: String,
    pub summary: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
