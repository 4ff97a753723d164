//! Contact enrichment: ask the AI (with search grounding) to find
//! decision-makers for a company, then persist what it returns.

use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use gemini_client::{extract_json, GenerateRequest};

use crate::kernel::{
    retry_with_backoff, BaseLeadStore, BaseTextGenerator, RATE_LIMIT_BASE_DELAY,
    RATE_LIMIT_RETRIES,
};

use super::{Contact, NewContact};

const INITIAL_CONTACT_STATUS: &str = "IDENTIFIED";

#[derive(Debug, Deserialize)]
struct FoundContact {
    full_name: Option<String>,
    position: Option<String>,
    linkedin_url: Option<String>,
    email: Option<String>,
}

/// Finds and stores decision-makers for an already-scanned company.
pub struct ContactEnricher {
    ai: Arc<dyn BaseTextGenerator>,
    store: Arc<dyn BaseLeadStore>,
}

impl ContactEnricher {
    pub fn new(ai: Arc<dyn BaseTextGenerator>, store: Arc<dyn BaseLeadStore>) -> Self {
        Self { ai, store }
    }

    /// Returns `Ok(None)` when the AI could not find anyone; generation and
    /// parse failures are treated the same way rather than failing the call.
    pub async fn enrich(
        &self,
        company_id: Uuid,
        company_name: &str,
    ) -> Result<Option<Vec<Contact>>> {
        let prompt = format!(
            "Find the owner, CEO, founder, or marketing director of the business \
             \"{company_name}\" in Vietnam. Search LinkedIn and the company website. \
             Return ONLY a JSON array of objects with keys: \"full_name\", \"position\", \
             \"linkedin_url\", \"email\". Use null for unknown fields. Return an empty \
             array if you cannot find anyone with confidence."
        );

        let request = GenerateRequest::new(prompt).json_output().grounded();

        let response = retry_with_backoff(
            RATE_LIMIT_RETRIES,
            RATE_LIMIT_BASE_DELAY,
            gemini_client::GeminiError::is_rate_limited,
            || self.ai.generate(request.clone()),
        )
        .await;

        let text = match response {
            Ok(text) => text,
            Err(err) => {
                warn!(company = %company_name, error = %err, "Contact enrichment generation failed");
                return Ok(None);
            }
        };

        let found: Vec<FoundContact> = match extract_json(&text)
            .and_then(|json| serde_json::from_str(json).ok())
        {
            Some(found) => found,
            None => {
                warn!(company = %company_name, "Could not parse enrichment response");
                return Ok(None);
            }
        };

        let rows: Vec<NewContact> = found
            .into_iter()
            .filter_map(|c| {
                let full_name = c.full_name.filter(|n| !n.trim().is_empty())?;
                Some(NewContact {
                    company_id,
                    full_name,
                    position: c.position,
                    linkedin_url: c.linkedin_url,
                    email: c.email,
                    is_primary_decision_maker: true,
                    status: INITIAL_CONTACT_STATUS.to_string(),
                })
            })
            .collect();

        if rows.is_empty() {
            return Ok(None);
        }

        let contacts = self.store.insert_contacts(rows).await?;
        Ok(Some(contacts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockLeadStore, MockTextGenerator};

    #[tokio::test]
    async fn enrich_stores_named_contacts() {
        let ai = Arc::new(MockTextGenerator::new().with_response(
            r#"[{"full_name": "Linh Tran", "position": "CEO", "linkedin_url": null, "email": "linh@example.com"},
                {"full_name": "", "position": "Ghost", "linkedin_url": null, "email": null}]"#,
        ));
        let store = Arc::new(MockLeadStore::new());
        let enricher = ContactEnricher::new(ai, store.clone());

        let result = enricher
            .enrich(Uuid::new_v4(), "Saigon Dental")
            .await
            .unwrap();

        let contacts = result.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].full_name, "Linh Tran");
        assert!(contacts[0].is_primary_decision_maker);
        assert_eq!(contacts[0].status, "IDENTIFIED");
        assert_eq!(store.inserted_contacts().len(), 1);
    }

    #[tokio::test]
    async fn enrich_returns_none_on_empty_array() {
        let ai = Arc::new(MockTextGenerator::new().with_response("[]"));
        let store = Arc::new(MockLeadStore::new());
        let enricher = ContactEnricher::new(ai, store.clone());

        let result = enricher.enrich(Uuid::new_v4(), "Unknown Co").await.unwrap();

        assert!(result.is_none());
        assert!(store.inserted_contacts().is_empty());
    }

    #[tokio::test]
    async fn enrich_swallows_generation_failure() {
        let ai = Arc::new(MockTextGenerator::new().with_error());
        let store = Arc::new(MockLeadStore::new());
        let enricher = ContactEnricher::new(ai, store);

        let result = enricher.enrich(Uuid::new_v4(), "Flaky Co").await.unwrap();

        assert!(result.is_none());
    }
}
