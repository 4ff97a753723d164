//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor runs,
//! polling for completion, and fetching dataset results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::ApifyClient;
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let listings = client.search_places("SEO agency in Ho Chi Minh City", 5, "en").await?;
//! for listing in &listings {
//!     println!("{}", listing.title.as_deref().unwrap_or("(unnamed)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{GooglePlacesInput, PlaceListing, RunData};

use serde::de::DeserializeOwned;
use std::time::Duration;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for compass/crawler-google-places.
const GOOGLE_PLACES_CRAWLER: &str = "compass~crawler-google-places";

/// Client timeout. Must exceed the `waitForFinish=60` long-poll window.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Upper bound on run polling. Each poll long-waits up to 60s, so this caps
/// the total wait for one run at roughly ten minutes.
const MAX_POLL_ATTEMPTS: u32 = 10;

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Start a Google Places crawl run. Returns immediately with run metadata.
    pub async fn start_places_search(&self, input: &GooglePlacesInput) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, GOOGLE_PLACES_CRAWLER);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient
    /// long-polling, giving up after [`MAX_POLL_ATTEMPTS`] so a run stuck in
    /// a non-terminal state can never hang the caller.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        for _ in 0..MAX_POLL_ATTEMPTS {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", self.base_url, run_id);
            let resp = self.client.get(&url).bearer_auth(&self.token).send().await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(api_resp.data.status));
                }
                _ => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                }
            }
        }

        Err(ApifyError::RunFailed("poll deadline exceeded".to_string()))
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self.client.get(&url).bearer_auth(&self.token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Search Google Places end-to-end: start run, poll, fetch listings.
    pub async fn search_places(
        &self,
        query: &str,
        max_results: u32,
        language: &str,
    ) -> Result<Vec<PlaceListing>> {
        tracing::info!(query, max_results, "Starting Google Places search");

        let input = GooglePlacesInput {
            search_strings_array: vec![query.to_string()],
            max_crawled_places_per_search: max_results,
            language: language.to_string(),
            max_images: 0,
        };

        let run = self.start_places_search(&input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let listings: Vec<PlaceListing> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = listings.len(), "Fetched place listings");

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Local stub that answers every request with the same JSON body.
    async fn spawn_stub_server(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server addr");

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn wait_for_run_gives_up_on_a_run_that_never_finishes() {
        let base_url = spawn_stub_server(
            r#"{"data":{"id":"run-1","status":"RUNNING","defaultDatasetId":"ds-1"}}"#,
        )
        .await;

        let client = ApifyClient::new("test-token".to_string()).with_base_url(base_url);
        let err = client.wait_for_run("run-1").await.unwrap_err();

        assert!(matches!(err, ApifyError::RunFailed(_)));
    }

    #[tokio::test]
    async fn wait_for_run_surfaces_terminal_failure_status() {
        let base_url = spawn_stub_server(
            r#"{"data":{"id":"run-2","status":"ABORTED","defaultDatasetId":"ds-2"}}"#,
        )
        .await;

        let client = ApifyClient::new("test-token".to_string()).with_base_url(base_url);
        let err = client.wait_for_run("run-2").await.unwrap_err();

        match err {
            ApifyError::RunFailed(status) => assert_eq!(status, "ABORTED"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
