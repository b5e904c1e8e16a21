use sqlx::SqlitePool;
use chrono::Utc;

use crate::models::{CitationRow, SearchHistoryEntry, SearchQueryRow, SearchResult};
use crate::types::{AppError, AppResult};

/// History endpoint returns at most this many entries, newest first.
const HISTORY_LIMIT: i64 = 20;

pub struct DatabaseOperations;

impl DatabaseOperations {
    /// Insert a completed search: one query row, then one citation row per
    /// result. The statements are sequential and not wrapped in a
    /// transaction; a query row without citations is an accepted state.
    pub async fn insert_search(
        pool: &SqlitePool,
        query: &str,
        summary: &str,
        results: &[SearchResult],
    ) -> AppResult<i64> {
        let citations_json = serde_json::to_string(results)
            .map_err(|e| AppError::Internal(format!("Failed to serialize results: {}", e)))?;

        let search_query_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO search_queries (query, response_text, citations_json, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(query)
        .bind(summary)
        .bind(&citations_json)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        for result in results {
            sqlx::query(
                r#"
                INSERT INTO citations (search_query_id, title, url, snippet, position)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(search_query_id)
            .bind(&result.title)
            .bind(&result.link)
            .bind(&result.snippet)
            .bind(result.position)
            .execute(pool)
            .await?;
        }

        Ok(search_query_id)
    }

    pub async fn list_recent(pool: &SqlitePool) -> AppResult<Vec<SearchHistoryEntry>> {
        let entries = sqlx::query_as::<_, SearchHistoryEntry>(
            r#"
            SELECT id, query, response_text, created_at
            FROM search_queries
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(HISTORY_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    pub async fn get_search_query(
        pool: &SqlitePool,
        search_query_id: i64,
    ) -> AppResult<Option<SearchQueryRow>> {
        let row = sqlx::query_as::<_, SearchQueryRow>(
            "SELECT * FROM search_queries WHERE id = ?",
        )
        .bind(search_query_id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    pub async fn get_citations_for_query(
        pool: &SqlitePool,
        search_query_id: i64,
    ) -> AppResult<Vec<CitationRow>> {
        let citations = sqlx::query_as::<_, CitationRow>(
            r#"
            SELECT * FROM citations
            WHERE search_query_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(search_query_id)
        .fetch_all(pool)
        .await?;

        Ok(citations)
    }
}
