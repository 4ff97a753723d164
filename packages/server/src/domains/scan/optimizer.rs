//! AI query shaping for the two search passes.
//!
//! Both calls degrade to `None` on any failure; the pipeline always has a
//! literal query to fall back on, so the AI is never load-bearing.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use gemini_client::{extract_json, GeminiError, GenerateRequest};

use crate::kernel::{
    retry_with_backoff, BaseTextGenerator, RATE_LIMIT_BASE_DELAY, RATE_LIMIT_RETRIES,
};

const OPTIMIZE_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Deserialize)]
struct OptimizedQuery {
    q: String,
}

/// Rewrites keyword/location pairs into sharper Google Maps queries, and
/// broadens keywords when the strict pass comes back empty.
pub struct QueryOptimizer {
    ai: Arc<dyn BaseTextGenerator>,
}

impl QueryOptimizer {
    pub fn new(ai: Arc<dyn BaseTextGenerator>) -> Self {
        Self { ai }
    }

    /// Produce an optimized search query, or `None` if the AI is unavailable
    /// or returns something unusable.
    pub async fn optimize(&self, keyword: &str, location: &str) -> Option<String> {
        let prompt = format!(
            "You are a local-search expert. Rewrite this into the single best Google \
             Maps search query for finding businesses of this type in this city. \
             Keyword: \"{keyword}\". Location: \"{location}\". \
             Respond ONLY with JSON: {{\"q\": \"<query>\"}}"
        );

        let request = GenerateRequest::new(prompt)
            .temperature(OPTIMIZE_TEMPERATURE)
            .json_output();

        let text = self.generate_with_retry(request).await?;

        let parsed: OptimizedQuery = extract_json(&text)
            .and_then(|json| serde_json::from_str(json).ok())
            .or_else(|| {
                warn!("Could not parse optimizer response");
                None
            })?;

        let query = parsed.q.trim().to_string();
        if query.is_empty() {
            None
        } else {
            Some(query)
        }
    }

    /// Produce a broader keyword for the relaxed pass, e.g. "cosmetic
    /// dentistry clinic" -> "dentist".
    pub async fn broaden(&self, keyword: &str) -> Option<String> {
        let prompt = format!(
            "The search term \"{keyword}\" found no businesses. Respond with a single \
             broader, more generic business category likely to match on Google Maps. \
             Respond with the category only, no explanation."
        );

        let request = GenerateRequest::new(prompt).temperature(OPTIMIZE_TEMPERATURE);

        let text = self.generate_with_retry(request).await?;

        let broadened = text
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches('"')
            .to_string();

        if broadened.is_empty() {
            None
        } else {
            Some(broadened)
        }
    }

    async fn generate_with_retry(&self, request: GenerateRequest) -> Option<String> {
        let result = retry_with_backoff(
            RATE_LIMIT_RETRIES,
            RATE_LIMIT_BASE_DELAY,
            GeminiError::is_rate_limited,
            || self.ai.generate(request.clone()),
        )
        .await;

        match result {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "Query generation failed, falling back to literal query");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockTextGenerator;

    #[tokio::test]
    async fn optimize_parses_json_response() {
        let ai = Arc::new(MockTextGenerator::new().with_response(r#"{"q": "dentist district 1"}"#));
        let optimizer = QueryOptimizer::new(ai);

        let query = optimizer.optimize("dentist", "Ho Chi Minh City").await;
        assert_eq!(query.as_deref(), Some("dentist district 1"));
    }

    #[tokio::test]
    async fn optimize_extracts_json_from_fenced_response() {
        let ai = Arc::new(
            MockTextGenerator::new()
                .with_response("```json\n{\"q\": \"spa ho chi minh\"}\n```"),
        );
        let optimizer = QueryOptimizer::new(ai);

        let query = optimizer.optimize("spa", "Ho Chi Minh City").await;
        assert_eq!(query.as_deref(), Some("spa ho chi minh"));
    }

    #[tokio::test]
    async fn optimize_returns_none_on_garbage() {
        let ai = Arc::new(MockTextGenerator::new().with_response("no json here"));
        let optimizer = QueryOptimizer::new(ai);

        assert!(optimizer.optimize("dentist", "Hanoi").await.is_none());
    }

    #[tokio::test]
    async fn optimize_returns_none_on_failure() {
        let ai = Arc::new(MockTextGenerator::new().with_error());
        let optimizer = QueryOptimizer::new(ai);

        assert!(optimizer.optimize("dentist", "Hanoi").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limits_are_retried_then_succeed() {
        let ai = Arc::new(
            MockTextGenerator::new()
                .with_rate_limited()
                .with_rate_limited()
                .with_response(r#"{"q": "coffee hanoi"}"#),
        );
        let optimizer = QueryOptimizer::new(ai.clone());

        let query = optimizer.optimize("coffee", "Hanoi").await;
        assert_eq!(query.as_deref(), Some("coffee hanoi"));
        assert_eq!(ai.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_exhaustion_returns_none() {
        let ai = Arc::new(
            MockTextGenerator::new()
                .with_rate_limited()
                .with_rate_limited()
                .with_rate_limited()
                .with_rate_limited(),
        );
        let optimizer = QueryOptimizer::new(ai.clone());

        assert!(optimizer.optimize("coffee", "Hanoi").await.is_none());
        // Initial attempt plus three retries.
        assert_eq!(ai.call_count(), 4);
    }

    #[tokio::test]
    async fn broaden_trims_quotes_and_extra_lines() {
        let ai = Arc::new(MockTextGenerator::new().with_response("\"dentist\"\nbecause..."));
        let optimizer = QueryOptimizer::new(ai);

        let broadened = optimizer.broaden("cosmetic dentistry clinic").await;
        assert_eq!(broadened.as_deref(), Some("dentist"));
    }

    #[tokio::test]
    async fn broaden_returns_none_on_empty_response() {
        let ai = Arc::new(MockTextGenerator::new().with_response("   "));
        let optimizer = QueryOptimizer::new(ai);

        assert!(optimizer.broaden("niche thing").await.is_none());
    }
}
