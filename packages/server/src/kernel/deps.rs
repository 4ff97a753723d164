//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to domain services. All external
//! collaborators hide behind trait abstractions so tests can substitute
//! fakes without touching the network or a database.

use sqlx::PgPool;
use std::sync::Arc;

use super::{BaseLeadStore, BaseSearchProvider, BaseSignalCollector, BaseTextGenerator};

/// Server dependencies accessible to domain services
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Places-search provider (remote crawl job, may take tens of seconds)
    pub search: Arc<dyn BaseSearchProvider>,
    /// Text generator for query optimization, enrichment, and drafting
    pub ai: Arc<dyn BaseTextGenerator>,
    /// Website signal probes (performance, tech stack, content)
    pub signals: Arc<dyn BaseSignalCollector>,
    /// Lead persistence (companies + contacts)
    pub store: Arc<dyn BaseLeadStore>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        search: Arc<dyn BaseSearchProvider>,
        ai: Arc<dyn BaseTextGenerator>,
        signals: Arc<dyn BaseSignalCollector>,
        store: Arc<dyn BaseLeadStore>,
    ) -> Self {
        Self {
            db_pool,
            search,
            ai,
            signals,
            store,
        }
    }
}
