//! Outreach email drafting.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use gemini_client::{extract_json, GenerateRequest};

use crate::kernel::{
    retry_with_backoff, BaseTextGenerator, RATE_LIMIT_BASE_DELAY, RATE_LIMIT_RETRIES,
};

const SENDER_PROFILE: &str = "We are Danta Labs, a web studio in Ho Chi Minh City. We rebuild \
slow, outdated business websites into fast modern ones and add AI chat agents that capture \
leads around the clock. Products: Maestro (Orchestration), Quack (Sales Agent), Colectia \
(Debt Collection).";

/// Industry keywords -> the product to pitch.
const PRODUCT_PITCHES: &[(&[&str], &str)] = &[
    (&["financ", "retail"], "Colectia (Debt Collection)"),
    (&["agency", "consult"], "Quack (Sales Agent)"),
    (&["tech", "software"], "Maestro (Orchestration)"),
];

fn product_for_industry(industry: &str) -> Option<&'static str> {
    let lower = industry.to_lowercase();
    PRODUCT_PITCHES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, product)| *product)
}

fn default_industry() -> String {
    "Unknown".to_string()
}

fn default_has_ssl() -> bool {
    true
}

/// Context for one outreach draft, shaped by the scan signals.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub company_name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default = "default_has_ssl")]
    pub has_ssl: bool,
    #[serde(default)]
    pub page_speed: u8,
    #[serde(default)]
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Drafts a personalized cold email from the lead's weak points.
pub struct DraftService {
    ai: Arc<dyn BaseTextGenerator>,
}

impl DraftService {
    pub fn new(ai: Arc<dyn BaseTextGenerator>) -> Self {
        Self { ai }
    }

    pub async fn draft(&self, request: &DraftRequest) -> Result<EmailDraft> {
        let mut pain_points = Vec::new();
        if request.page_speed > 0 && request.page_speed < 50 {
            pain_points.push(format!(
                "their website scores only {}/100 on Google PageSpeed",
                request.page_speed
            ));
        }
        if !request.has_ssl {
            pain_points.push("their website has no SSL certificate".to_string());
        }
        let pain_points = if pain_points.is_empty() {
            "their website could convert more visitors into customers".to_string()
        } else {
            pain_points.join(" and ")
        };

        let greeting_target = request
            .contact_name
            .as_deref()
            .unwrap_or(&request.company_name);

        let offer = match product_for_industry(&request.industry) {
            Some(product) => format!("Pitch our product {product}."),
            None => "Offer a free website audit.".to_string(),
        };

        let prompt = format!(
            "{SENDER_PROFILE}\n\n\
             Write a short, friendly cold outreach email in English to {greeting_target} at \
             \"{company}\" ({industry}, website: {website}). Mention that {pain_points}. \
             {offer} Keep it under 120 words, no placeholders. \
             Respond ONLY with JSON: {{\"subject\": \"...\", \"body\": \"...\"}}",
            company = request.company_name,
            industry = request.industry,
            website = request.website,
        );

        let generate = GenerateRequest::new(prompt).json_output();

        let text = retry_with_backoff(
            RATE_LIMIT_RETRIES,
            RATE_LIMIT_BASE_DELAY,
            gemini_client::GeminiError::is_rate_limited,
            || self.ai.generate(generate.clone()),
        )
        .await
        .context("Draft generation failed")?;

        extract_json(&text)
            .and_then(|json| serde_json::from_str::<EmailDraft>(json).ok())
            .ok_or_else(|| anyhow!("Draft response was not valid JSON"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockTextGenerator;

    #[tokio::test]
    async fn draft_parses_subject_and_body() {
        let ai = Arc::new(MockTextGenerator::new().with_response(
            r#"{"subject": "Quick question about your site", "body": "Hi there..."}"#,
        ));
        let service = DraftService::new(ai.clone());

        let request = DraftRequest {
            company_name: "Saigon Dental".to_string(),
            website: "https://saigondental.vn".to_string(),
            industry: "Dentist".to_string(),
            has_ssl: false,
            page_speed: 35,
            contact_name: Some("Linh".to_string()),
        };

        let draft = service.draft(&request).await.unwrap();
        assert_eq!(draft.subject, "Quick question about your site");

        let prompt = &ai.prompts()[0];
        assert!(prompt.contains("35/100"));
        assert!(prompt.contains("no SSL certificate"));
        assert!(prompt.contains("Linh"));
        // Dentistry maps to no product, so the generic audit offer applies.
        assert!(prompt.contains("free website audit"));
    }

    #[test]
    fn industries_map_to_their_product_pitch() {
        assert_eq!(
            product_for_industry("Retail Store"),
            Some("Colectia (Debt Collection)")
        );
        assert_eq!(
            product_for_industry("Financial Services"),
            Some("Colectia (Debt Collection)")
        );
        assert_eq!(
            product_for_industry("Marketing Agency"),
            Some("Quack (Sales Agent)")
        );
        assert_eq!(
            product_for_industry("IT Consulting"),
            Some("Quack (Sales Agent)")
        );
        assert_eq!(
            product_for_industry("Software Company"),
            Some("Maestro (Orchestration)")
        );
        assert_eq!(product_for_industry("Dentist"), None);
    }

    #[tokio::test]
    async fn draft_pitches_product_matching_industry() {
        let ai = Arc::new(
            MockTextGenerator::new()
                .with_response(r#"{"subject": "s", "body": "b"}"#),
        );
        let service = DraftService::new(ai.clone());

        let request = DraftRequest {
            company_name: "Acme Agency".to_string(),
            website: "https://acme.vn".to_string(),
            industry: "Marketing Agency".to_string(),
            has_ssl: true,
            page_speed: 0,
            contact_name: None,
        };

        service.draft(&request).await.unwrap();

        let prompt = &ai.prompts()[0];
        assert!(prompt.contains("Quack (Sales Agent)"));
        assert!(!prompt.contains("free website audit"));
    }

    #[tokio::test]
    async fn draft_fails_on_unparseable_response() {
        let ai = Arc::new(MockTextGenerator::new().with_response("sorry, cannot help"));
        let service = DraftService::new(ai);

        let request = DraftRequest {
            company_name: "X".to_string(),
            website: String::new(),
            industry: "Unknown".to_string(),
            has_ssl: true,
            page_speed: 0,
            contact_name: None,
        };

        assert!(service.draft(&request).await.is_err());
    }
}
