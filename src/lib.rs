// SearchMind - search the web and summarize the results with numbered citations

pub mod config;
pub mod db;
pub mod llm;
pub mod models;
pub mod routes;
pub mod search;
pub mod summarizer;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
