//! Summary generation
//!
//! Builds the summarization prompt from ranked search results and runs it
//! through Gemini with ordered model fallback. When generation fails for any
//! reason (transport error, API error, empty text, exhausted candidates),
//! a deterministic overview is synthesized from the top results instead;
//! summarization failures never surface to the caller.

use tracing::{info, warn};

use crate::llm::gemini::GeminiClient;
use crate::models::SearchResult;

/// Results included in the prompt context.
const CONTEXT_RESULTS: usize = 8;
/// Results included in the synthesized fallback overview.
const FALLBACK_RESULTS: usize = 5;

/// Lead line of every fallback summary.
pub const UNAVAILABLE_LEAD: &str =
    "Summary unavailable from AI. Here's a quick overview based on top results:";

pub struct Summarizer;

impl Summarizer {
    /// Render the top results as numbered context blocks. Zero results
    /// yield an empty context; the prompt is still sent.
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .take(CONTEXT_RESULTS)
            .map(|r| format!("[{}] {}\n{}\nURL: {}", r.position, r.title, r.snippet, r.link))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn build_prompt(query: &str, results: &[SearchResult]) -> String {
        let context = Self::build_context(results);
        format!(
            "You are a research assistant that summarizes web search results. \n\n\
             Instructions:\n\
             1. Provide a comprehensive, well-structured summary of the search results\n\
             2. Include relevant details and key insights\n\
             3. Use numbered citations [1], [2], etc. that correspond to the search result positions\n\
             4. Be objective and accurate\n\
             5. If the search results don't contain enough information, acknowledge limitations\n\
             6. Keep the summary between 200-500 words\n\n\
             Search results to summarize:\n\
             {}\n\n\
             Query: {}\n\n\
             Please provide a comprehensive summary of these search results:",
            context, query
        )
    }

    /// Deterministic substitute used when generation fails. Never fails
    /// itself: with no results it is just the lead line.
    pub fn fallback_summary(results: &[SearchResult]) -> String {
        let bullets = results
            .iter()
            .take(FALLBACK_RESULTS)
            .map(|r| {
                let label = if r.title.is_empty() { r.link.as_str() } else { r.title.as_str() };
                format!("- [{}] {}: {}", r.position, label, r.snippet)
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}", UNAVAILABLE_LEAD, bullets)
    }

    /// Produce the final summary text for a query. Infallible by design.
    pub async fn summarize(
        gemini: &GeminiClient,
        models: &[String],
        query: &str,
        results: &[SearchResult],
    ) -> String {
        let prompt = Self::build_prompt(query, results);

        match gemini.generate_with_candidates(models, &prompt).await {
            Ok(text) => {
                info!(chars = text.len(), "AI summary generated");
                text
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed, synthesizing overview from top results");
                Self::fallback_summary(results)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results(count: usize) -> Vec<SearchResult> {
        (1..=count)
            .map(|n| SearchResult {
                title: format!("Result {}", n),
                link: format!("https://example.com/{}", n),
                snippet: format!("Snippet {}", n),
                position: n as i64,
                date: None,
            })
            .collect()
    }

    #[test]
    fn context_numbers_results_and_caps_at_eight() {
        let context = Summarizer::build_context(&sample_results(10));

        assert!(context.starts_with("[1] Result 1\nSnippet 1\nURL: https://example.com/1"));
        assert!(context.contains("[8] Result 8"));
        assert!(!context.contains("[9]"));

        let blocks: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(blocks.len(), 8);
    }

    #[test]
    fn context_is_empty_without_results() {
        assert_eq!(Summarizer::build_context(&[]), "");
    }

    #[test]
    fn prompt_carries_query_and_context() {
        let prompt = Summarizer::build_prompt("what is rust", &sample_results(2));
        assert!(prompt.contains("Query: what is rust"));
        assert!(prompt.contains("[2] Result 2"));
        assert!(prompt.contains("numbered citations [1], [2]"));
    }

    #[test]
    fn fallback_lists_up_to_five_bullets_under_the_lead() {
        let summary = Summarizer::fallback_summary(&sample_results(7));

        assert!(summary.starts_with(UNAVAILABLE_LEAD));
        let bullets: Vec<&str> =
            summary.lines().filter(|line| line.starts_with("- [")).collect();
        assert_eq!(bullets.len(), 5);
        assert_eq!(bullets[0], "- [1] Result 1: Snippet 1");
        assert_eq!(bullets[4], "- [5] Result 5: Snippet 5");
    }

    #[test]
    fn fallback_uses_link_when_title_is_missing() {
        let mut results = sample_results(1);
        results[0].title = String::new();

        let summary = Summarizer::fallback_summary(&results);
        assert!(summary.contains("- [1] https://example.com/1: Snippet 1"));
    }

    #[test]
    fn fallback_without_results_is_just_the_lead() {
        let summary = Summarizer::fallback_summary(&[]);
        assert!(summary.starts_with(UNAVAILABLE_LEAD));
        assert!(!summary.contains("- ["));
    }

    #[tokio::test]
    async fn summarize_falls_back_when_generation_fails() {
        // No route mocked: every request errors out, which must still
        // produce the deterministic overview.
        let server = mockito::Server::new_async().await;
        let gemini = GeminiClient::new("test-key").with_base_url(server.url());
        let models = vec!["gemini-2.5-flash".to_string()];

        let summary =
            Summarizer::summarize(&gemini, &models, "what is rust", &sample_results(3)).await;

        assert!(summary.starts_with(UNAVAILABLE_LEAD));
        assert!(summary.contains("- [3] Result 3: Snippet 3"));
    }
}
