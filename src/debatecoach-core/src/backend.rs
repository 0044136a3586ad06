//! Chat-completion backends.
//!
//! A backend opens one streaming completion and hands back the text deltas
//! as they arrive. The production backend talks to any OpenAI-compatible API.

use std::pin::Pin;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
    CreateChatCompletionRequestArgs, CreateChatCompletionStreamResponse,
};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};

use crate::error::CoachError;
use crate::message::{Message, Role};

/// Incremental output of one completion.
///
/// Each item is `Some(text)` for a chunk carrying a text delta and `None` for
/// a chunk without one. The stream is finite and can only be consumed once.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<Option<String>, CoachError>> + Send>>;

/// Everything needed to open one streaming completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. "gpt-4o".
    pub model: String,
    pub messages: Vec<Message>,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Open a streaming completion for `request`.
    async fn open_stream(&self, request: &CompletionRequest) -> Result<DeltaStream, CoachError>;
}

/// Backend for OpenAI-compatible chat-completion endpoints.
pub struct OpenAIBackend {
    client: Client<OpenAIConfig>,
}

impl OpenAIBackend {
    pub fn new(api_base: &str, api_key: &str) -> Result<Self, CoachError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("debatecoach/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CoachError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Ok(Self {
            client: Client::with_config(config).with_http_client(http_client),
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    async fn open_stream(&self, request: &CompletionRequest) -> Result<DeltaStream, CoachError> {
        let messages: Vec<ChatCompletionRequestMessage> =
            request.messages.iter().map(to_request_message).collect();

        let args = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .max_completion_tokens(request.max_tokens)
            .temperature(request.temperature)
            .stream(true)
            .messages(messages)
            .build()?;

        let stream = self.client.chat().create_stream(args).await?;

        let deltas = stream.map(|item| item.map(delta_text).map_err(CoachError::from));

        Ok(Box::pin(deltas))
    }
}

/// Text carried by the first choice of a stream response, if any. Responses
/// without choices or without content are keep-alives.
fn delta_text(response: CreateChatCompletionStreamResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
}

fn to_request_message(message: &Message) -> ChatCompletionRequestMessage {
    let content = message.content().to_string();
    match message.role() {
        Role::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: content.into(),
                name: None,
            })
        }
        Role::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: content.into(),
            name: None,
        }),
        Role::Coach => {
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(content.into()),
                name: None,
                tool_calls: None,
                refusal: None,
                audio: None,
                function_call: None,
            })
        }
    }
}
