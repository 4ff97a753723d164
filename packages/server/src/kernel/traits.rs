// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (qualification, location matching, orchestration) lives in
// domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSearchProvider)

use anyhow::Result;
use async_trait::async_trait;

use apify_client::PlaceListing;
use gemini_client::GenerateRequest;
use sitesignals::SignalBundle;

use crate::domains::companies::{Company, NewCompany};
use crate::domains::contacts::{Contact, NewContact};

// =============================================================================
// Places Search (Infrastructure - remote crawl job)
// =============================================================================

#[async_trait]
pub trait BaseSearchProvider: Send + Sync {
    /// Submit a places-search query and wait for the raw listings.
    /// May block for tens of seconds while the remote crawl job runs.
    async fn search_places(&self, query: &str, max_results: u32) -> Result<Vec<PlaceListing>>;
}

// =============================================================================
// Text Generation (Infrastructure - LLM)
// =============================================================================

/// Returns the typed client error so callers can distinguish rate limiting
/// (retryable) from everything else (fail closed).
#[async_trait]
pub trait BaseTextGenerator: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> gemini_client::Result<String>;
}

// =============================================================================
// Signal Collection (Infrastructure - website probes)
// =============================================================================

/// Total by contract: implementations absorb probe failures into neutral
/// defaults, so collection never fails a scan.
#[async_trait]
pub trait BaseSignalCollector: Send + Sync {
    async fn collect(&self, website: &str) -> SignalBundle;
}

// =============================================================================
// Persistence (Infrastructure - lead store)
// =============================================================================

#[async_trait]
pub trait BaseLeadStore: Send + Sync {
    /// Batch-insert scanned companies; returns the stored rows with ids.
    async fn insert_companies(&self, rows: Vec<NewCompany>) -> Result<Vec<Company>>;

    /// Batch-insert enriched contacts; returns the stored rows with ids.
    async fn insert_contacts(&self, rows: Vec<NewContact>) -> Result<Vec<Contact>>;
}
