//! Completion client: the two prompt templates and their API calls.
//!
//! Both operations are single request/response calls against the OpenAI
//! chat-completions endpoint. Errors propagate unchanged to the caller; there
//! is no retry and no conversation state.

use crate::config::Config;
use crate::error::CligptError;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Typed view of a chat-completion response.
///
/// Only the fields this tool reads; a response with zero choices is a
/// distinct [`CligptError::EmptyCompletion`] instead of an index panic.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(CligptError::EmptyCompletion)?;
        Ok(choice.message.content)
    }
}

/// Client for the two completion call kinds: "command" and "explanation".
pub struct CompletionClient {
    http: Box<dyn HttpClient>,
    api_key: String,
    model: String,
    max_tokens_command: u32,
    max_tokens_explanation: u32,
    temperature_command: f32,
    temperature_explanation: f32,
}

impl CompletionClient {
    /// Creates a client from the loaded configuration.
    ///
    /// Fails fast with [`CligptError::MissingCredential`] before any network
    /// call when no API key is available.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_http_client(config, Box::new(ReqwestHttpClient::new()))
    }

    /// Creates a client with an injected HTTP client (for testing).
    pub fn with_http_client(config: &Config, http: Box<dyn HttpClient>) -> Result<Self> {
        Ok(Self {
            http,
            api_key: config.api_key()?.to_string(),
            model: config.model.clone(),
            max_tokens_command: config.max_tokens.command,
            max_tokens_explanation: config.max_tokens.explanation,
            temperature_command: config.command_temperature(),
            temperature_explanation: config.explanation_temperature(),
        })
    }

    /// Generates a shell command for the given task description.
    ///
    /// `shell` names the interpreter the command must work in; it becomes
    /// part of the instruction template.
    pub async fn generate_command(&self, prompt: &str, shell: &str) -> Result<String> {
        let query = format!(
            "Write a shell command that works in the following shell: {shell}\n\
             \n\
             The command must accomplish this task:\n\
             \n\
             {prompt}\n\
             \n\
             Return ONLY the command, no other explanation, words, code \
             highlighting, or text."
        );

        debug!("Generating command for prompt: {}", prompt);

        self.request(&query, self.max_tokens_command, self.temperature_command)
            .await
    }

    /// Explains a candidate command against the task it should fulfill.
    pub async fn explain_command(&self, suggestion: &str, prompt: &str) -> Result<String> {
        let query = format!(
            "Explain as briefly as possible how the following command works, \
             what it does and if it is safe to use (why not if not):\n\
             \n\
             {suggestion}\n\
             \n\
             Does it fulfill the requested task, yes or no:\n\
             \n\
             {prompt}\n\
             \n\
             Return ONLY the explanation and if the requested task is \
             fulfilled, on a single line. No other words, code highlighting, \
             or text."
        );

        debug!("Explaining command: {}", suggestion);

        self.request(&query, self.max_tokens_explanation, self.temperature_explanation)
            .await
    }

    async fn request(&self, query: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": query }],
            "max_tokens": max_tokens,
            "temperature": temperature,
            "n": 1,
        });

        let bearer = format!("Bearer {}", self.api_key);
        let headers = [
            ("Authorization", bearer.as_str()),
            ("Content-Type", "application/json"),
        ];

        let text = self.http.post_json(API_URL, &headers, &body).await?;

        let response: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CligptError::Service(format!("malformed response: {e}: {text}")))?;

        response.into_text()
    }
}
