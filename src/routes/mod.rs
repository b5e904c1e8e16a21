//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/api/search` - Run a search and return the cited summary
//! - `/api/searches` - Search history (most recent first)
//! - `/api/searches/{id}` - One stored search with its citations
//! - `/api/health` - Health check
//! - `/` - The search page (inline frontend)

pub mod health;
pub mod search;
pub mod ui;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    // API routes (with state)
    let api_router = Router::new()
        .merge(search::router(state))
        .merge(health::router());

    Router::new()
        .merge(api_router)
        .merge(ui::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DatabaseConfig, LlmConfig, SearchConfig, ServerConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        let config = Config {
            server: ServerConfig { port: 0, host: "127.0.0.1".to_string() },
            database: DatabaseConfig { url: "sqlite::memory:".to_string(), max_connections: 1 },
            search: SearchConfig { serper_api_key: "key".to_string() },
            llm: LlmConfig { gemini_api_key: "key".to_string(), model_override: None },
        };
        create_router(AppState { pool, config })
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn index_serves_the_search_page() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("SearchMind"));
    }

    #[tokio::test]
    async fn unknown_search_id_returns_json_error() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/api/searches/999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Search not found");
    }

    #[tokio::test]
    async fn empty_query_returns_bad_request() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::post("/api/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Query cannot be empty");
    }
}
