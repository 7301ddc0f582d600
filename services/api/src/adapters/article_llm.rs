//! services/api/src/adapters/article_llm.rs
//!
//! This module contains the adapter for blog-article generation.
//! It implements the `ArticleService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use nutriflow_core::ports::{ArticleService, PortError, PortResult};

/// Shown when the model replies with an empty body.
const FALLBACK_CONTENT: &str = "Content currently unavailable.";

/// An adapter that implements `ArticleService` using the hosted Gemini model.
#[derive(Clone)]
pub struct GeminiArticleAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiArticleAdapter {
    /// Creates a new `GeminiArticleAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

/// Builds the article prompt for a topic title. Plain text output with
/// blank lines between paragraphs; an approximate length cap only.
pub fn article_prompt(topic_title: &str) -> String {
    format!(
        "Write a helpful, engaging, and scientifically accurate nutrition blog post about: \
         \"{}\".\nKeep it under 400 words. Use plain text with double line breaks for \
         paragraphs. Do not use markdown formatting like ** or #.",
        topic_title
    )
}

#[async_trait]
impl ArticleService for GeminiArticleAdapter {
    /// Generates the article body for the given topic title.
    async fn generate_article(&self, topic_title: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(article_prompt(topic_title))
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CONTENT.to_string());

        Ok(content)
    }
}
