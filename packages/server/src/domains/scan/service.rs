//! The scan pipeline: optimize, search, filter, probe, qualify, persist.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use apify_client::PlaceListing;

use crate::domains::companies::NewCompany;
use crate::kernel::{BaseLeadStore, BaseSearchProvider, BaseSignalCollector, ServerDeps};

use super::location::LocationMatcher;
use super::models::{ScanOutcome, ScanRequest};
use super::optimizer::QueryOptimizer;
use super::qualify::qualify;

/// Orchestrates one scan run end to end.
pub struct ScanService {
    search: Arc<dyn BaseSearchProvider>,
    signals: Arc<dyn BaseSignalCollector>,
    store: Arc<dyn BaseLeadStore>,
    optimizer: QueryOptimizer,
}

impl ScanService {
    pub fn new(
        search: Arc<dyn BaseSearchProvider>,
        signals: Arc<dyn BaseSignalCollector>,
        store: Arc<dyn BaseLeadStore>,
        optimizer: QueryOptimizer,
    ) -> Self {
        Self {
            search,
            signals,
            store,
            optimizer,
        }
    }

    pub fn from_deps(deps: &ServerDeps) -> Self {
        Self::new(
            deps.search.clone(),
            deps.signals.clone(),
            deps.store.clone(),
            QueryOptimizer::new(deps.ai.clone()),
        )
    }

    /// Run the full pipeline. Search and storage failures propagate; probe
    /// and AI failures degrade inside their own stages.
    pub async fn run(&self, request: &ScanRequest) -> Result<ScanOutcome> {
        let keyword = request.keyword.trim();
        let location = request.location.trim();
        let search_keyword = format!("{} - {}", keyword, location);
        // A zero limit would ask the crawler for nothing.
        let limit = request.limit.max(1);

        // Strict pass: AI-optimized query (or the literal pairing), results
        // filtered down to listings whose address names the location.
        let query = match self.optimizer.optimize(keyword, location).await {
            Some(optimized) => optimized,
            None => format!("{} in {}", keyword, location),
        };

        info!(%query, "Starting strict search pass");
        let listings = self
            .search
            .search_places(&query, limit)
            .await
            .context("Places search failed")?;

        let matcher = LocationMatcher::new(location);
        let strict: Vec<&PlaceListing> = listings
            .iter()
            .filter(|l| l.website.is_some() && matcher.matches(l.address.as_deref()))
            .collect();

        let mut is_fallback = false;
        let mut fallback_keyword = None;

        let rows = if strict.is_empty() {
            // Relaxed pass: broadened keyword, no location filtering beyond
            // what the query itself carries. Listings still need a website.
            let Some(broadened) = self.optimizer.broaden(keyword).await else {
                return Ok(ScanOutcome::empty(
                    format!(
                        "No businesses with websites found for '{}'. Try a broader keyword.",
                        keyword
                    ),
                    None,
                ));
            };

            let relaxed_query = format!("{} in {}", broadened, location);
            info!(query = %relaxed_query, "Strict pass empty, starting relaxed search pass");

            let relaxed_listings = self
                .search
                .search_places(&relaxed_query, limit)
                .await
                .context("Fallback places search failed")?;

            let relaxed: Vec<&PlaceListing> = relaxed_listings
                .iter()
                .filter(|l| l.website.is_some())
                .collect();

            if relaxed.is_empty() {
                return Ok(ScanOutcome::empty(
                    format!(
                        "No businesses with websites found for '{}' or the broader '{}'.",
                        keyword, broadened
                    ),
                    Some(broadened),
                ));
            }

            is_fallback = true;
            fallback_keyword = Some(broadened);
            self.assess_all(&relaxed, &search_keyword).await
        } else {
            self.assess_all(&strict, &search_keyword).await
        };

        let candidates = self
            .store
            .insert_companies(rows)
            .await
            .context("Failed to persist scan results")?;

        info!(
            count = candidates.len(),
            is_fallback, "Scan pass complete"
        );

        Ok(ScanOutcome {
            success: true,
            count: candidates.len(),
            candidates,
            is_fallback,
            fallback_keyword,
            message: None,
        })
    }

    /// Probe and qualify every listing. Listings are processed sequentially;
    /// the collector already fans out its probes internally.
    async fn assess_all(&self, listings: &[&PlaceListing], search_keyword: &str) -> Vec<NewCompany> {
        let mut rows = Vec::with_capacity(listings.len());

        for listing in listings {
            // Callers filter on website presence before assessment.
            let Some(website) = listing.website.as_deref() else {
                warn!("Listing without website reached assessment, skipping");
                continue;
            };

            let bundle = self.signals.collect(website).await;
            let (status, reason) = qualify(bundle.has_ssl, bundle.pagespeed_score, &bundle.tech);

            info!(
                website,
                %status,
                score = ?bundle.pagespeed_score,
                "Assessed candidate"
            );

            rows.push(NewCompany::from_assessment(
                listing,
                website.to_string(),
                &bundle,
                status.to_string(),
                reason,
                search_keyword.to_string(),
            ));
        }

        rows
    }
}
