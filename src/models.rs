use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnhanceRequest {
    pub idea: String,
}

/// The nine-field structured result returned by the model. Keys the model
/// leaves out decode as empty strings ("not inferable").
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct EnhancedPrompt {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub style_or_medium: String,
    #[serde(default)]
    pub lighting_or_mood: String,
    #[serde(default)]
    pub camera_angle_or_composition: String,
    #[serde(default)]
    pub background_or_environment: String,
    #[serde(default)]
    pub specific_details_or_accessories: String,
    #[serde(default)]
    pub color_scheme_or_palette: String,
    #[serde(default)]
    pub final_prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResult {
    pub error: String,
}

/// What a submission leaves behind: either the enhanced prompt or a
/// human-readable error, never both. `Failed` must stay the first variant —
/// with every prompt field defaulted, untagged deserialization would
/// otherwise read `{"error": ...}` as an all-empty EnhancedPrompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PromptOutcome {
    Failed(ErrorResult),
    Enhanced(EnhancedPrompt),
}

impl PromptOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        PromptOutcome::Failed(ErrorResult { error: message.into() })
    }
}

/// One user's interaction context. `outcome: None` means nothing has been
/// submitted yet (or the slot was cleared).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub request_count: u32,
    pub in_flight: bool,
    pub outcome: Option<PromptOutcome>,
}

// OpenAI chat-completions wire types
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { format_type: "json_object".to_string() }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            anyhow::anyhow!(
                "OpenAI API key not found. Please set the OPENAI_API_KEY environment variable."
            )
        })?;

        Ok(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080),
        })
    }
}
