//! Landing-page content scrape: emails, social links, meta description.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::SignalError;
use crate::types::ScrapedContent;

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Anchor hrefs ending in these are image assets that happen to look like
/// email addresses (e.g. `logo@2x.png`).
const ASSET_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref SOCIAL_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("linkedin", Regex::new(r"linkedin\.com/(?:company|in)/").unwrap()),
        ("facebook", Regex::new(r"facebook\.com/").unwrap()),
        ("instagram", Regex::new(r"instagram\.com/").unwrap()),
        ("twitter", Regex::new(r"(?:twitter\.com|x\.com)/").unwrap()),
        ("youtube", Regex::new(r"youtube\.com/").unwrap()),
    ];
}

/// Scrapes contact and descriptive content from a landing page.
pub struct ContentScraper {
    client: reqwest::Client,
}

impl ContentScraper {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(DESKTOP_USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Scrape a page for emails, socials, and the meta description.
    ///
    /// Total: any failure yields the empty content record.
    pub async fn scrape(&self, url: &str) -> ScrapedContent {
        match self.try_scrape(url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(url, error = %e, "Content scrape failed, returning empty");
                ScrapedContent::default()
            }
        }
    }

    async fn try_scrape(&self, url: &str) -> Result<ScrapedContent, SignalError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Status(status.as_u16()));
        }

        let base = Url::parse(url)
            .map_err(|e| SignalError::Payload(format!("invalid base URL: {e}")))?;
        let html = response.text().await?;

        Ok(extract_content(&base, &html))
    }
}

impl Default for ContentScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure extraction over a fetched page. Exercised directly by tests.
fn extract_content(base: &Url, html: &str) -> ScrapedContent {
    let document = Html::parse_document(html);

    ScrapedContent {
        description: extract_description(&document),
        emails: extract_emails(html, &document),
        socials: extract_socials(base, &document),
    }
}

/// Meta description, falling back to og:description.
fn extract_description(document: &Html) -> String {
    let selectors = [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
    ];

    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(content) = document
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr("content"))
            {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    String::new()
}

/// Emails from a body-wide regex scan plus explicit mailto links, deduplicated.
fn extract_emails(html: &str, document: &Html) -> Vec<String> {
    let mut emails: BTreeSet<String> = EMAIL_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .filter(|email| !is_asset_name(email))
        .collect();

    if let Ok(selector) = Selector::parse("a[href]") {
        for href in document
            .select(&selector)
            .filter_map(|el| el.value().attr("href"))
        {
            if let Some(rest) = href.strip_prefix("mailto:") {
                let address = rest.split('?').next().unwrap_or_default();
                if !address.is_empty() && !is_asset_name(address) {
                    emails.insert(address.to_string());
                }
            }
        }
    }

    emails.into_iter().collect()
}

fn is_asset_name(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// First matching profile URL per platform, hrefs resolved against the base.
fn extract_socials(base: &Url, document: &Html) -> BTreeMap<String, String> {
    let mut socials = BTreeMap::new();

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return socials,
    };

    for href in document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
    {
        let resolved = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        for (platform, pattern) in SOCIAL_PATTERNS.iter() {
            if pattern.is_match(&resolved) {
                socials
                    .entry(platform.to_string())
                    .or_insert_with(|| resolved.clone());
            }
        }
    }

    socials
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn extracts_meta_description() {
        let html = r#"<head><meta name="description" content="  A fine agency.  "></head>"#;
        let content = extract_content(&base(), html);
        assert_eq!(content.description, "A fine agency.");
    }

    #[test]
    fn falls_back_to_og_description() {
        let html = r#"<head><meta property="og:description" content="From OG"></head>"#;
        let content = extract_content(&base(), html);
        assert_eq!(content.description, "From OG");
    }

    #[test]
    fn extracts_and_dedupes_emails() {
        let html = r#"
            <p>Contact sales@example.com or sales@example.com</p>
            <a href="mailto:boss@example.com?subject=Hi">Email the boss</a>
            <img src="hero@2x.png">
        "#;
        let content = extract_content(&base(), html);
        assert_eq!(
            content.emails,
            vec!["boss@example.com".to_string(), "sales@example.com".to_string()]
        );
    }

    #[test]
    fn skips_asset_lookalike_emails() {
        let html = r#"<img srcset="logo@2x.png 2x, banner@3x.webp 3x">"#;
        let content = extract_content(&base(), html);
        assert!(content.emails.is_empty());
    }

    #[test]
    fn resolves_relative_social_links_and_keeps_first_match() {
        let html = r#"
            <a href="https://www.linkedin.com/company/acme">LinkedIn</a>
            <a href="https://facebook.com/acme">FB one</a>
            <a href="https://facebook.com/acme-two">FB two</a>
            <a href="https://x.com/acme">X</a>
        "#;
        let content = extract_content(&base(), html);
        assert_eq!(
            content.socials.get("linkedin").unwrap(),
            "https://www.linkedin.com/company/acme"
        );
        assert_eq!(content.socials.get("facebook").unwrap(), "https://facebook.com/acme");
        assert_eq!(content.socials.get("twitter").unwrap(), "https://x.com/acme");
        assert!(!content.socials.contains_key("youtube"));
    }

    #[test]
    fn personal_linkedin_profiles_match() {
        let html = r#"<a href="https://linkedin.com/in/jane-doe">Jane</a>"#;
        let content = extract_content(&base(), html);
        assert!(content.socials.contains_key("linkedin"));
    }
}
