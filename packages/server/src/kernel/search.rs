//! Apify-backed search provider adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use apify_client::{ApifyClient, PlaceListing};

use super::BaseSearchProvider;

/// Wraps the Apify Google Places crawler behind the search trait.
pub struct ApifySearchProvider {
    client: Arc<ApifyClient>,
    language: String,
}

impl ApifySearchProvider {
    pub fn new(client: Arc<ApifyClient>, language: impl Into<String>) -> Self {
        Self {
            client,
            language: language.into(),
        }
    }
}

#[async_trait]
impl BaseSearchProvider for ApifySearchProvider {
    async fn search_places(&self, query: &str, max_results: u32) -> Result<Vec<PlaceListing>> {
        self.client
            .search_places(query, max_results, &self.language)
            .await
            .context("Apify places search failed")
    }
}
