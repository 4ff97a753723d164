//! Technology-stack fingerprinting.
//!
//! Classification is a declarative rule table evaluated against the
//! lower-cased page body, the response headers, and the generator meta tag.
//! New signatures are additive: append a row, no branching logic to touch.

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::header::HeaderMap;
use scraper::{Html, Selector};

use crate::error::SignalError;
use crate::types::TechStack;

const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Cms,
    Frontend,
    Server,
    Ecommerce,
    Crm,
    Analytics,
    Agents,
}

/// Where to look for a signature.
#[derive(Debug, Clone, Copy)]
enum Signal {
    /// Substring of the lower-cased page body.
    Body(&'static str),
    /// Response header, matched on lower-cased value. An empty value string
    /// is a presence check.
    Header(&'static str, &'static str),
    /// Substring of the lower-cased generator meta tag content.
    Generator(&'static str),
}

struct Signature {
    category: Category,
    label: &'static str,
    signal: Signal,
}

const fn sig(category: Category, label: &'static str, signal: Signal) -> Signature {
    Signature {
        category,
        label,
        signal,
    }
}

use Category::*;
use Signal::*;

#[rustfmt::skip]
static SIGNATURES: &[Signature] = &[
    // CMS
    sig(Cms, "WordPress",   Generator("wordpress")),
    sig(Cms, "WordPress",   Body("/wp-content/")),
    sig(Cms, "WordPress",   Body("/wp-includes/")),
    sig(Cms, "Shopify",     Generator("shopify")),
    sig(Cms, "Shopify",     Body("cdn.shopify.com")),
    sig(Cms, "Shopify",     Header("x-shopify-stage", "")),
    sig(Cms, "Wix",         Generator("wix")),
    sig(Cms, "Wix",         Body("wix.com")),
    sig(Cms, "Wix",         Body("wix-bolt")),
    sig(Cms, "Wix",         Header("x-wix-request-id", "")),
    sig(Cms, "Squarespace", Generator("squarespace")),
    sig(Cms, "Squarespace", Body("static1.squarespace.com")),
    sig(Cms, "Joomla",      Generator("joomla")),
    sig(Cms, "Drupal",      Generator("drupal")),
    sig(Cms, "Webflow",     Generator("webflow")),
    sig(Cms, "Webflow",     Body("webflow.com")),
    sig(Cms, "Webflow",     Body("w-mod-")),
    // Frontend frameworks and CSS
    sig(Frontend, "Next.js",      Body("next.js")),
    sig(Frontend, "Next.js",      Body("/_next/static")),
    sig(Frontend, "Next.js",      Body("__next_data__")),
    sig(Frontend, "React",        Body("react")),
    sig(Frontend, "Vue.js",       Body("vue.js")),
    sig(Frontend, "Vue.js",       Body("vue.min.js")),
    sig(Frontend, "Vue.js",       Body("data-v-")),
    sig(Frontend, "Nuxt.js",      Body("nuxt")),
    sig(Frontend, "Angular",      Body("angular")),
    sig(Frontend, "Angular",      Body("ng-version")),
    sig(Frontend, "Svelte",       Body("svelte")),
    sig(Frontend, "Tailwind CSS", Body("tailwind")),
    sig(Frontend, "Bootstrap",    Body("bootstrap")),
    sig(Frontend, "jQuery",       Body("jquery")),
    // Server / hosting
    sig(Server, "Cloudflare", Header("server", "cloudflare")),
    sig(Server, "Nginx",      Header("server", "nginx")),
    sig(Server, "Apache",     Header("server", "apache")),
    sig(Server, "Vercel",     Header("x-vercel-id", "")),
    sig(Server, "Netlify",    Header("x-netlify-id", "")),
    sig(Server, "PHP",        Header("x-powered-by", "php")),
    sig(Server, "ASP.NET",    Header("x-powered-by", "asp.net")),
    // E-commerce
    sig(Ecommerce, "WooCommerce", Body("woocommerce")),
    sig(Ecommerce, "Shopify",     Body("shopify")),
    sig(Ecommerce, "Magento",     Body("magento")),
    sig(Ecommerce, "Magento",     Body("mage/")),
    sig(Ecommerce, "BigCommerce", Body("bigcommerce")),
    sig(Ecommerce, "PrestaShop",  Body("prestashop")),
    // CRM
    sig(Crm, "HubSpot",    Body("hs-scripts.com")),
    sig(Crm, "HubSpot",    Body("hubspot")),
    sig(Crm, "Salesforce", Body("salesforce")),
    sig(Crm, "Salesforce", Body("pardot")),
    sig(Crm, "Zoho",       Body("zoho")),
    sig(Crm, "Bitrix24",   Body("bitrix24")),
    sig(Crm, "Intercom",   Body("intercom")),
    sig(Crm, "Zendesk",    Body("zendesk")),
    sig(Crm, "Drift",      Body("drift")),
    // Analytics
    sig(Analytics, "Google Analytics",   Body("google-analytics.com")),
    sig(Analytics, "Google Analytics",   Body("gtag")),
    sig(Analytics, "Google Tag Manager", Body("googletagmanager.com")),
    sig(Analytics, "Facebook Pixel",     Body("fbevents.js")),
    sig(Analytics, "Facebook Pixel",     Body("fbq(")),
    sig(Analytics, "Hotjar",             Body("hotjar")),
    sig(Analytics, "Segment",            Body("segment.com")),
    // Chat widgets and AI agents
    sig(Agents, "Intercom",   Body("intercom")),
    sig(Agents, "Drift",      Body("drift")),
    sig(Agents, "Zendesk",    Body("zendesk")),
    sig(Agents, "Zendesk",    Body("zopim")),
    sig(Agents, "Tawk.to",    Body("tawk.to")),
    sig(Agents, "LiveChat",   Body("livechat")),
    sig(Agents, "Crisp",      Body("crisp.chat")),
    sig(Agents, "ManyChat",   Body("manychat")),
    sig(Agents, "Chatbase",   Body("chatbase")),
    sig(Agents, "Voiceflow",  Body("voiceflow")),
    sig(Agents, "Botpress",   Body("botpress")),
    sig(Agents, "Dialogflow", Body("dialogflow")),
    sig(Agents, "Tidio",      Body("tidio")),
];

/// Detects the technology stack of a website from one page fetch.
pub struct TechDetector {
    client: reqwest::Client,
}

impl TechDetector {
    pub fn new() -> Self {
        // Small-business sites often carry broken or self-signed certs;
        // the fetch still has to succeed so the stack can be fingerprinted.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(DESKTOP_USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fingerprint the stack behind a URL.
    ///
    /// Total: any fetch or parse failure yields the empty stack.
    pub async fn detect(&self, url: &str) -> TechStack {
        match self.try_detect(url).await {
            Ok(stack) => stack,
            Err(e) => {
                tracing::warn!(url, error = %e, "Tech detection failed, assuming empty stack");
                TechStack::default()
            }
        }
    }

    async fn try_detect(&self, url: &str) -> Result<TechStack, SignalError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SignalError::Status(status.as_u16()));
        }

        let headers = response.headers().clone();
        let body = response.text().await?;
        let generator = extract_generator(&body);

        Ok(classify(
            &body.to_lowercase(),
            &headers,
            generator.as_deref(),
        ))
    }
}

impl Default for TechDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the `<meta name="generator">` content, lower-cased.
fn extract_generator(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[name="generator"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.to_lowercase())
}

/// Evaluate the signature table. Pure; exercised directly by tests.
fn classify(body_lower: &str, headers: &HeaderMap, generator: Option<&str>) -> TechStack {
    let mut matched: Vec<(Category, BTreeSet<&'static str>)> = vec![
        (Cms, BTreeSet::new()),
        (Frontend, BTreeSet::new()),
        (Server, BTreeSet::new()),
        (Ecommerce, BTreeSet::new()),
        (Crm, BTreeSet::new()),
        (Analytics, BTreeSet::new()),
        (Agents, BTreeSet::new()),
    ];

    for signature in SIGNATURES {
        let hit = match signature.signal {
            Body(needle) => body_lower.contains(needle),
            Header(name, value) => headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| value.is_empty() || v.to_lowercase().contains(value))
                .unwrap_or(false),
            Generator(needle) => generator.map(|g| g.contains(needle)).unwrap_or(false),
        };

        if hit {
            if let Some((_, labels)) = matched
                .iter_mut()
                .find(|(category, _)| *category == signature.category)
            {
                labels.insert(signature.label);
            }
        }
    }

    let take = |category: Category, matched: &[(Category, BTreeSet<&'static str>)]| {
        matched
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, labels)| labels.iter().map(|l| l.to_string()).collect())
            .unwrap_or_default()
    };

    let cms: Vec<String> = take(Cms, &matched);
    let is_wordpress = cms.iter().any(|c| c == "WordPress");

    TechStack {
        frontend: take(Frontend, &matched),
        server: take(Server, &matched),
        ecommerce: take(Ecommerce, &matched),
        crm: take(Crm, &matched),
        analytics: take(Analytics, &matched),
        agents: take(Agents, &matched),
        cms,
        is_wordpress,
    }
}
