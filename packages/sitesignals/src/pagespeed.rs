//! Google PageSpeed Insights probe.

use std::time::Duration;

use crate::error::SignalError;

const PAGESPEED_ENDPOINT: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// PageSpeed runs a remote Lighthouse audit; anything past this is a lost cause.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the PageSpeed Insights v5 API.
pub struct PagespeedClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl PagespeedClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, api_key }
    }

    /// Fetch the mobile performance score for a URL as an integer percentage.
    ///
    /// Total: any error, non-200 status, or malformed payload yields `None`
    /// ("not measured") rather than a fake zero.
    pub async fn fetch_score(&self, url: &str) -> Option<u8> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::debug!("No PageSpeed API key configured, skipping score");
                return None;
            }
        };

        match self.try_fetch_score(url, api_key).await {
            Ok(score) => Some(score),
            Err(e) => {
                tracing::warn!(url, error = %e, "PageSpeed probe failed, score unknown");
                None
            }
        }
    }

    async fn try_fetch_score(&self, url: &str, api_key: &str) -> Result<u8, SignalError> {
        let response = self
            .client
            .get(PAGESPEED_ENDPOINT)
            .query(&[("url", url), ("strategy", "mobile"), ("key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = response.json().await?;
        let normalized = payload
            .pointer("/lighthouseResult/categories/performance/score")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| SignalError::Payload("missing performance score".into()))?;

        Ok(score_to_percentage(normalized))
    }
}

/// Map Lighthouse's normalized 0.0-1.0 score to an integer percentage.
fn score_to_percentage(normalized: f64) -> u8 {
    (normalized * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_normalized_score_to_percentage() {
        assert_eq!(score_to_percentage(0.0), 0);
        assert_eq!(score_to_percentage(0.4), 40);
        assert_eq!(score_to_percentage(0.955), 96);
        assert_eq!(score_to_percentage(1.0), 100);
    }

    #[test]
    fn clamps_out_of_range_scores() {
        assert_eq!(score_to_percentage(1.2), 100);
        assert_eq!(score_to_percentage(-0.1), 0);
    }

    #[tokio::test]
    async fn missing_api_key_yields_unknown() {
        let client = PagespeedClient::new(None);
        assert_eq!(client.fetch_score("https://example.com").await, None);
    }
}
