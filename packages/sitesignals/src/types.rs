//! Signal data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Detected technologies, one list per category. Lists are sorted and
/// deduplicated; multiple simultaneous matches per category are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub cms: Vec<String>,
    pub frontend: Vec<String>,
    pub server: Vec<String>,
    pub ecommerce: Vec<String>,
    pub crm: Vec<String>,
    pub analytics: Vec<String>,
    /// Chat widgets and AI agents.
    pub agents: Vec<String>,
    pub is_wordpress: bool,
}

impl TechStack {
    /// Whether any chat/support agent was detected.
    pub fn has_agent(&self) -> bool {
        !self.agents.is_empty()
    }
}

/// Content scraped from a landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedContent {
    pub emails: Vec<String>,
    /// Platform name -> first matching profile URL.
    pub socials: BTreeMap<String, String>,
    pub description: String,
}

/// All evidence collected for one candidate website. Assembled once, never
/// mutated afterwards; failed probes leave their neutral defaults in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalBundle {
    pub has_ssl: bool,
    /// Lighthouse performance score 0-100. `None` means "not measured",
    /// which is distinct from a genuinely low score.
    pub pagespeed_score: Option<u8>,
    pub tech: TechStack,
    pub scraped: ScrapedContent,
}
