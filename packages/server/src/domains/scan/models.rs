//! Scan request and outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domains::companies::Company;

fn default_location() -> String {
    "Ho Chi Minh City".to_string()
}

fn default_limit() -> u32 {
    5
}

/// Parameters for one scan run.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub keyword: String,
    #[serde(default = "default_location")]
    pub location: String,
    /// Maximum places fetched per search pass.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Verdict stored with each company row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadStatus {
    #[serde(rename = "QUALIFIED")]
    Qualified,
    #[serde(rename = "DISQUALIFIED")]
    Disqualified,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::Qualified => write!(f, "QUALIFIED"),
            LeadStatus::Disqualified => write!(f, "DISQUALIFIED"),
        }
    }
}

/// Result of a full scan run, including whether the relaxed fallback pass
/// produced the returned set.
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub success: bool,
    pub count: usize,
    pub candidates: Vec<Company>,
    pub is_fallback: bool,
    pub fallback_keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ScanOutcome {
    /// Terminal failure. Carries the broadened-keyword suggestion (when one
    /// was produced) so callers can surface it alongside the message.
    pub fn empty(message: String, suggestion: Option<String>) -> Self {
        Self {
            success: false,
            count: 0,
            candidates: Vec::new(),
            is_fallback: false,
            fallback_keyword: suggestion,
            message: Some(message),
        }
    }
}
