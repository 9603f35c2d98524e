use crate::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, EnhancedPrompt, PromptOutcome,
    ResponseFormat,
};
use crate::template;
use thiserror::Error;
use reqwest::Client;
use tracing::{info, error};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("no message content in completion response")] EmptyCompletion,
}

/// Coarse failure taxonomy, matched against the failure's textual
/// description. Known signatures map to tailored messages, everything else
/// falls through to Generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidApiKey,
    RateLimited,
    Generic,
}

impl ErrorKind {
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("api_key") {
            ErrorKind::InvalidApiKey
        } else if lower.contains("rate limit") {
            ErrorKind::RateLimited
        } else {
            ErrorKind::Generic
        }
    }

    pub fn message(self, description: &str) -> String {
        match self {
            ErrorKind::InvalidApiKey => {
                "Invalid or missing API key. Please check your OpenAI API key configuration."
                    .to_string()
            }
            ErrorKind::RateLimited => {
                "Rate limit exceeded. Please try again in a few moments.".to_string()
            }
            ErrorKind::Generic => format!("Could not generate response: {description}"),
        }
    }
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let base_url = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Point the client at an OpenAI-compatible endpoint (also used by tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// One POST to /v1/chat/completions, returning the assistant message
    /// content. No retry, no backoff; the transport default timeout applies.
    async fn perform_api_call(&self, idea: &str) -> Result<String, OpenAiError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(template::SYSTEM_INSTRUCTION.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(template::user_message(idea)),
                },
            ],
            response_format: ResponseFormat::json_object(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| OpenAiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ OpenAI API error: status={} body={}", status, error_body);
            return Err(OpenAiError::Http(format!("status={} body={}", status, error_body)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenAiError::Http(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OpenAiError::EmptyCompletion)
    }

    /// Turns a raw idea into the structured result. Every failure is folded
    /// into the ErrorResult shape here — callers never see an Err.
    pub async fn enhance_prompt(&self, idea: &str) -> PromptOutcome {
        info!("Enhancing prompt with model {}...", self.model);

        let content = match self.perform_api_call(idea).await {
            Ok(content) => content,
            Err(e) => {
                error!("❌ Enhancement request failed: {}", e);
                let description = e.to_string();
                return PromptOutcome::failed(
                    ErrorKind::classify(&description).message(&description),
                );
            }
        };

        match serde_json::from_str::<EnhancedPrompt>(&content) {
            Ok(prompt) => {
                info!("✅ Enhanced prompt generated ({} chars)", prompt.final_prompt.len());
                PromptOutcome::Enhanced(prompt)
            }
            Err(e) => {
                error!("❌ Model reply was not valid JSON: {}", e);
                PromptOutcome::failed("Failed to parse the response as JSON. Please try again.")
            }
        }
    }
}
