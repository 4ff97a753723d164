//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// High-level request
// =============================================================================

/// A single generateContent request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Prompt text sent as a single user turn.
    pub prompt: String,

    /// Sampling temperature (0.0 to 2.0). Keep low for deterministic output.
    pub temperature: f64,

    /// Ask the model to respond with `application/json`.
    pub json_output: bool,

    /// Enable Google Search grounding for the request.
    pub grounded: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            temperature: 0.3,
            json_output: false,
            grounded: false,
        }
    }
}

impl GenerateRequest {
    /// Create a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Request a JSON response body.
    pub fn json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Enable Google Search grounding.
    pub fn grounded(mut self) -> Self {
        self.grounded = true;
        self
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f64,
    #[serde(rename = "response_mime_type", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_generation_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hello".to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: Some("application/json".to_string()),
            },
            tools: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["temperature"], 0.2);
        assert_eq!(
            json["generationConfig"]["response_mime_type"],
            "application/json"
        );
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn response_deserializes_grounded_multi_part() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {},
                        { "text": "grounded answer" }
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let parts = &response.candidates[0].content.as_ref().unwrap().parts;
        assert!(parts[0].text.is_none());
        assert_eq!(parts[1].text.as_deref(), Some("grounded answer"));
    }
}
