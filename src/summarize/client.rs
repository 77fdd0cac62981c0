//! Blocking HTTP clients for the summary providers.
//!
//! SiliconFlow and OpenAI take an OpenAI-style chat completions request with
//! Bearer authentication. Anthropic takes a messages request with the system
//! prompt as a top-level field and `x-api-key` authentication.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ApiConfig, ProviderConfig};
use crate::error::{ChatdigestError, Result};
use crate::summarize::provider::Provider;

/// Request timeout per provider call.
pub const TIMEOUT: Duration = Duration::from_secs(60);

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on the summary length, in tokens.
pub const MAX_TOKENS: u32 = 1500;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default system prompt: topic-ordered factual summary of a QQ group chat.
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一个专业的聊天内容分析助手。你的任务是对QQ聊天记录进行简明扼要的总结。内容上，你需要着重关注事实上发生的内容，尤其是当前时事的细节。如果有链接，你需要原样保留。*不要*添加任何主观评论。格式上，你需要按照内容前后的顺序，按话题划分小标题。";

/// Default instruction placed in front of the transcript.
pub const DEFAULT_PROMPT: &str = "请对以下聊天记录内容进行简要总结，提取主要话题和关键信息：\n\n";

/// Anything that can turn a cleaned transcript into a summary.
pub trait Summarizer: Send + Sync {
    /// The provider this summarizer talks to.
    fn provider(&self) -> Provider;

    /// Summarizes `transcript`.
    fn summarize(&self, transcript: &str) -> Result<String>;
}

/// System prompt and user instruction sent with each transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Prompts {
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// User message for `transcript`: the instruction followed by the text.
    pub fn user_message(&self, transcript: &str) -> String {
        format!("{}{}", self.user, transcript)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Error payloads seen in the wild: `{"message": ..}` and
/// `{"error": {"message": ..}}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Builds the JSON request body for `provider`.
pub fn request_body(
    provider: Provider,
    model: &str,
    prompts: &Prompts,
    transcript: &str,
) -> Result<String> {
    let user = ChatMessage::new("user", prompts.user_message(transcript));
    let body = if provider.is_openai_compatible() {
        serde_json::to_string(&ChatRequest {
            model,
            messages: vec![ChatMessage::new("system", prompts.system.as_str()), user],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        })?
    } else {
        serde_json::to_string(&MessagesRequest {
            model,
            system: &prompts.system,
            messages: vec![user],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        })?
    };
    Ok(body)
}

/// Extracts the summary from a response, or the error a failed call carries.
pub fn parse_response(provider: Provider, status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.message.or_else(|| e.error.and_then(|d| d.message)))
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ChatdigestError::provider(
            provider.to_string(),
            format!("status {status}: {detail}"),
        ));
    }

    let malformed = |what: &str| {
        ChatdigestError::provider(provider.to_string(), format!("malformed response: {what}"))
    };
    let summary = if provider.is_openai_compatible() {
        let response: ChatResponse =
            serde_json::from_str(body).map_err(|e| malformed(&e.to_string()))?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| malformed("no choices"))?
    } else {
        let response: MessagesResponse =
            serde_json::from_str(body).map_err(|e| malformed(&e.to_string()))?;
        response
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| malformed("no text content"))?
    };
    Ok(summary)
}

/// A [`Summarizer`] backed by a provider's HTTP API.
pub struct HttpSummarizer {
    provider: Provider,
    config: ProviderConfig,
    prompts: Prompts,
    agent: ureq::Agent,
}

impl HttpSummarizer {
    pub fn new(provider: Provider, config: ProviderConfig, prompts: Prompts) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            provider,
            config,
            prompts,
            agent,
        }
    }

    /// Builds one summarizer per selected provider, in order.
    pub fn from_config(
        api: &ApiConfig,
        providers: &[Provider],
        prompts: &Prompts,
    ) -> Vec<Box<dyn Summarizer>> {
        providers
            .iter()
            .map(|&p| {
                Box::new(HttpSummarizer::new(p, api.get(p).clone(), prompts.clone()))
                    as Box<dyn Summarizer>
            })
            .collect()
    }

    fn transport_error(&self, e: &ureq::Error) -> ChatdigestError {
        ChatdigestError::provider(self.provider.to_string(), e.to_string())
    }
}

impl Summarizer for HttpSummarizer {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn summarize(&self, transcript: &str) -> Result<String> {
        let body = request_body(self.provider, &self.config.model, &self.prompts, transcript)?;
        debug!(
            provider = %self.provider,
            model = %self.config.model,
            bytes = body.len(),
            "sending summary request"
        );

        let request = self
            .agent
            .post(&self.config.api_url)
            .header("Content-Type", "application/json");
        let request = if self.provider.is_openai_compatible() {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
                .header("x-api-key", self.config.api_key.as_str())
                .header("anthropic-version", ANTHROPIC_VERSION)
        };

        let mut response = request.send(body).map_err(|e| self.transport_error(&e))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| self.transport_error(&e))?;
        parse_response(self.provider, status, &text)
    }
}
