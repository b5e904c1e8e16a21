use anyhow::Result;
use serde::Deserialize;
use std::env;

use crate::llm::gemini;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serper_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub gemini_api_key: String,
    pub model_override: Option<String>,
}

impl LlmConfig {
    /// Model identifiers to try in order. The configured model (or the
    /// default) comes first; the fixed fallback is appended unless it is
    /// already the primary.
    pub fn model_candidates(&self) -> Vec<String> {
        let primary = self
            .model_override
            .clone()
            .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());

        let mut candidates = vec![primary];
        if candidates[0] != gemini::FALLBACK_MODEL {
            candidates.push(gemini::FALLBACK_MODEL.to_string());
        }
        candidates
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:searchmind.db?mode=rwc".to_string()),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
            },
            search: SearchConfig {
                serper_api_key: env::var("SERPER_API_KEY").unwrap_or_default(),
            },
            llm: LlmConfig {
                // GOOGLE_API_KEY takes precedence when both are set
                gemini_api_key: env::var("GOOGLE_API_KEY")
                    .or_else(|_| env::var("GEMINI_API_KEY"))
                    .unwrap_or_default(),
                model_override: env::var("MODEL_NAME").ok(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_candidates_are_primary_then_fallback() {
        let llm = LlmConfig { gemini_api_key: "k".to_string(), model_override: None };
        assert_eq!(
            llm.model_candidates(),
            vec![gemini::DEFAULT_MODEL.to_string(), gemini::FALLBACK_MODEL.to_string()]
        );
    }

    #[test]
    fn override_replaces_primary() {
        let llm = LlmConfig {
            gemini_api_key: "k".to_string(),
            model_override: Some("gemini-2.0-pro".to_string()),
        };
        assert_eq!(
            llm.model_candidates(),
            vec!["gemini-2.0-pro".to_string(), gemini::FALLBACK_MODEL.to_string()]
        );
    }

    #[test]
    fn override_equal_to_fallback_is_not_duplicated() {
        let llm = LlmConfig {
            gemini_api_key: "k".to_string(),
            model_override: Some(gemini::FALLBACK_MODEL.to_string()),
        };
        assert_eq!(llm.model_candidates(), vec![gemini::FALLBACK_MODEL.to_string()]);
    }
}
