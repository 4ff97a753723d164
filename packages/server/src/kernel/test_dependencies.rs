// Mock implementations for testing
//
// Provides scripted fakes for every Base* trait so domain services can be
// exercised without the network or a database.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use apify_client::PlaceListing;
use chrono::Utc;
use gemini_client::{GeminiError, GenerateRequest};
use sitesignals::SignalBundle;
use uuid::Uuid;

use crate::domains::companies::{Company, NewCompany};
use crate::domains::contacts::{Contact, NewContact};

use super::{BaseLeadStore, BaseSearchProvider, BaseSignalCollector, BaseTextGenerator};

// =============================================================================
// Mock Search Provider
// =============================================================================

pub struct MockSearchProvider {
    responses: Mutex<Vec<Result<Vec<PlaceListing>>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful search result.
    pub fn with_listings(self, listings: Vec<PlaceListing>) -> Self {
        self.responses.lock().unwrap().push(Ok(listings));
        self
    }

    /// Queue a provider failure.
    pub fn with_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(anyhow::anyhow!("{}", message)));
        self
    }

    /// Queries submitted so far, with their max-results arguments.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSearchProvider for MockSearchProvider {
    async fn search_places(&self, query: &str, max_results: u32) -> Result<Vec<PlaceListing>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(vec![])
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// Mock Text Generator
// =============================================================================

pub struct MockTextGenerator {
    responses: Mutex<Vec<gemini_client::Result<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful generation.
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    /// Queue a rate-limit response (retryable).
    pub fn with_rate_limited(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(GeminiError::RateLimited));
        self
    }

    /// Queue a non-retryable provider failure.
    pub fn with_error(self) -> Self {
        self.responses.lock().unwrap().push(Err(GeminiError::Api {
            status: 500,
            message: "scripted failure".to_string(),
        }));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseTextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerateRequest) -> gemini_client::Result<String> {
        self.prompts.lock().unwrap().push(request.prompt);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(GeminiError::Api {
                status: 500,
                message: "no scripted response".to_string(),
            })
        } else {
            responses.remove(0)
        }
    }
}

// =============================================================================
// Mock Signal Collector
// =============================================================================

pub struct MockSignalCollector {
    bundles: Mutex<HashMap<String, SignalBundle>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSignalCollector {
    pub fn new() -> Self {
        Self {
            bundles: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the bundle returned for one website. Unknown websites get the
    /// neutral default bundle, matching the real collector's failure mode.
    pub fn with_bundle(self, website: &str, bundle: SignalBundle) -> Self {
        self.bundles
            .lock()
            .unwrap()
            .insert(website.to_string(), bundle);
        self
    }

    /// Websites probed so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSignalCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSignalCollector for MockSignalCollector {
    async fn collect(&self, website: &str) -> SignalBundle {
        self.calls.lock().unwrap().push(website.to_string());
        self.bundles
            .lock()
            .unwrap()
            .get(website)
            .cloned()
            .unwrap_or_default()
    }
}

// =============================================================================
// Mock Lead Store
// =============================================================================

pub struct MockLeadStore {
    fail_companies: bool,
    companies: Arc<Mutex<Vec<NewCompany>>>,
    contacts: Arc<Mutex<Vec<NewContact>>>,
}

impl MockLeadStore {
    pub fn new() -> Self {
        Self {
            fail_companies: false,
            companies: Arc::new(Mutex::new(Vec::new())),
            contacts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make company inserts fail, simulating a storage outage.
    pub fn failing() -> Self {
        Self {
            fail_companies: true,
            ..Self::new()
        }
    }

    /// Company rows written so far.
    pub fn inserted_companies(&self) -> Vec<NewCompany> {
        self.companies.lock().unwrap().clone()
    }

    /// Contact rows written so far.
    pub fn inserted_contacts(&self) -> Vec<NewContact> {
        self.contacts.lock().unwrap().clone()
    }
}

impl Default for MockLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseLeadStore for MockLeadStore {
    async fn insert_companies(&self, rows: Vec<NewCompany>) -> Result<Vec<Company>> {
        if self.fail_companies {
            anyhow::bail!("scripted storage failure");
        }

        self.companies.lock().unwrap().extend(rows.iter().cloned());

        Ok(rows
            .into_iter()
            .map(|row| Company {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                name: row.name,
                website_url: row.website_url,
                google_maps_url: row.google_maps_url,
                industry: row.industry,
                address: row.address,
                phone: row.phone,
                has_ssl: row.has_ssl,
                pagespeed_score: row.pagespeed_score,
                is_wordpress: row.is_wordpress,
                crm_system: row.crm_system,
                agents: row.agents,
                emails: row.emails,
                socials: row.socials,
                description: row.description,
                status: row.status,
                disqualify_reason: row.disqualify_reason,
                search_keyword: row.search_keyword,
            })
            .collect())
    }

    async fn insert_contacts(&self, rows: Vec<NewContact>) -> Result<Vec<Contact>> {
        self.contacts.lock().unwrap().extend(rows.iter().cloned());

        Ok(rows
            .into_iter()
            .map(|row| Contact {
                id: Uuid::new_v4(),
                company_id: row.company_id,
                full_name: row.full_name,
                position: row.position,
                linkedin_url: row.linkedin_url,
                email: row.email,
                is_primary_decision_maker: row.is_primary_decision_maker,
                status: row.status,
                created_at: Utc::now(),
            })
            .collect())
    }
}
