//! Gemini-backed text generator adapter.

use async_trait::async_trait;

use gemini_client::{GeminiClient, GenerateRequest};

use super::BaseTextGenerator;

/// Wraps the Gemini client behind the text-generation trait.
pub struct GeminiTextGenerator {
    client: GeminiClient,
}

impl GeminiTextGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseTextGenerator for GeminiTextGenerator {
    async fn generate(&self, request: GenerateRequest) -> gemini_client::Result<String> {
        self.client.generate(request).await
    }
}
