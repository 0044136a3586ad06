//! Coaching orchestration logic.
//!
//! Turns practice submissions into model requests, streams the replies, and
//! keeps the session transcript.

use tracing::{debug, info};

use crate::backend::{ChatBackend, CompletionRequest};
use crate::collector::collect_stream;
use crate::config::GenerationSettings;
use crate::error::CoachError;
use crate::message::{Message, Role};
use crate::practice_mode::ComplexityLevel;
use crate::prompt::{PracticeRequest, build_messages};
use crate::transcript::Transcript;

/// Runs one coaching session against a chat backend.
///
/// Every operation that talks to the model takes `&mut self`, so a session
/// never has two requests in flight.
pub struct CoachOrchestrator {
    backend: Box<dyn ChatBackend>,
    settings: GenerationSettings,
    /// Conversation for this session.
    transcript: Transcript,
}

impl CoachOrchestrator {
    /// Start a new session with an empty transcript.
    pub fn new(backend: Box<dyn ChatBackend>, settings: GenerationSettings) -> Self {
        Self {
            backend,
            settings,
            transcript: Transcript::new(),
        }
    }

    /// Handle one practice submission.
    ///
    /// Returns `Ok(None)` without calling the model when the input is empty.
    /// On success the exchange is appended to the transcript and the coach's
    /// reply returned. On failure nothing is appended.
    pub async fn practice<F>(
        &mut self,
        request: &PracticeRequest,
        on_partial: F,
    ) -> Result<Option<String>, CoachError>
    where
        F: FnMut(&str),
    {
        if request.is_empty() {
            debug!(mode = request.mode().name(), "empty input, no request issued");
            return Ok(None);
        }

        let messages = build_messages(request)?;
        let reply = self
            .generate_response(
                messages,
                self.settings.max_tokens,
                self.settings.temperature,
                on_partial,
            )
            .await?;

        // Build both entries before touching the transcript so a rejected
        // reply commits nothing.
        let mut exchange = Vec::with_capacity(2);
        if request.records_user_input() {
            exchange.push(Message::new(Role::User, request.input())?);
        }
        let coach_reply =
            Message::new(Role::Coach, reply.as_str()).map_err(|_| CoachError::EmptyResponse)?;
        exchange.push(coach_reply);

        for message in exchange {
            self.transcript.push(message);
        }
        info!(
            mode = request.mode().name(),
            entries = self.transcript.len(),
            "exchange recorded"
        );

        Ok(Some(reply))
    }

    /// Generate declamation guidance for a topic.
    pub async fn declamation<F>(
        &mut self,
        topic: &str,
        level: ComplexityLevel,
        on_partial: F,
    ) -> Result<Option<String>, CoachError>
    where
        F: FnMut(&str),
    {
        self.practice(&PracticeRequest::declamation(topic, level), on_partial)
            .await
    }

    /// Suggest how to argue the given motives in a parliamentary debate.
    pub async fn parliamentary<F>(
        &mut self,
        motives: &str,
        on_partial: F,
    ) -> Result<Option<String>, CoachError>
    where
        F: FnMut(&str),
    {
        self.practice(&PracticeRequest::parliamentary(motives), on_partial)
            .await
    }

    /// Generate supporting points and diplomatic language for an MUN stance.
    pub async fn mun<F>(&mut self, stance: &str, on_partial: F) -> Result<Option<String>, CoachError>
    where
        F: FnMut(&str),
    {
        self.practice(&PracticeRequest::mun(stance), on_partial).await
    }

    /// Send a message list to the model and collect the streamed reply.
    ///
    /// Uses the session's model; `max_tokens` and `temperature` apply to this
    /// call only. Errors from the backend are returned unchanged.
    pub async fn generate_response<F>(
        &mut self,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: f32,
        on_partial: F,
    ) -> Result<String, CoachError>
    where
        F: FnMut(&str),
    {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens,
            temperature,
        };

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens,
            "opening completion stream"
        );

        let stream = self.backend.open_stream(&request).await?;
        collect_stream(stream, on_partial).await
    }

    /// Get the session transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// End the session, keeping its transcript.
    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}
