//! End-to-end coaching flows through the public API.
//!
//! A canned backend stands in for the chat-completion service so the tests
//! run without network access.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use debatecoach_core::{
    ChatBackend, CoachError, CoachOrchestrator, CompletionRequest, ComplexityLevel, DeltaStream,
    GenerationSettings, ModeSelection, PracticeMode, PracticeRequest, Role,
};
use futures_util::stream;

struct CannedBackend {
    chunks: Vec<&'static str>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CannedBackend {
    fn new(chunks: Vec<&'static str>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = Self {
            chunks,
            calls: Arc::clone(&calls),
            fail: false,
        };
        (backend, calls)
    }

    fn failing() -> (Self, Arc<AtomicUsize>) {
        let (mut backend, calls) = Self::new(Vec::new());
        backend.fail = true;
        (backend, calls)
    }
}

#[async_trait]
impl ChatBackend for CannedBackend {
    async fn open_stream(&self, _request: &CompletionRequest) -> Result<DeltaStream, CoachError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CoachError::ConfigError("rate limited".to_string()));
        }
        let items: Vec<Result<Option<String>, CoachError>> = self
            .chunks
            .iter()
            .map(|c| Ok(Some(c.to_string())))
            .collect();
        Ok(Box::pin(stream::iter(items)))
    }
}

#[tokio::test]
async fn test_declamation_session_streams_and_records() {
    let (backend, calls) = CannedBackend::new(vec!["Hel", "lo", " world"]);
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());
    let mut partials = Vec::new();

    let reply = coach
        .declamation("Free speech", ComplexityLevel::High, |p| {
            partials.push(p.to_string())
        })
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("Hello world"));
    assert_eq!(partials, vec!["Hel", "Hello", "Hello world"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let transcript = coach.transcript();
    assert_eq!(transcript.len(), 2);
    let mut entries = transcript.all();
    let first = entries.next().unwrap();
    assert_eq!((first.role(), first.content()), (Role::User, "Free speech"));
    let second = entries.next().unwrap();
    assert_eq!((second.role(), second.content()), (Role::Coach, "Hello world"));
}

#[tokio::test]
async fn test_failed_call_is_observable_and_commits_nothing() {
    let (backend, calls) = CannedBackend::failing();
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());

    let result = coach.parliamentary("Lower the voting age", |_| {}).await;

    assert!(matches!(result, Err(CoachError::ConfigError(msg)) if msg == "rate limited"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(coach.transcript().is_empty());
}

#[tokio::test]
async fn test_selected_mode_drives_request() {
    let (backend, calls) = CannedBackend::new(vec!["Points."]);
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());

    let mode = ModeSelection::from_label("Model United Nations").mode().unwrap();
    assert_eq!(mode, PracticeMode::Mun);
    assert!(mode.rules().is_some());

    let request = PracticeRequest::for_mode(mode, "Japan backs ocean treaties", ComplexityLevel::Low);
    coach.practice(&request, |_| {}).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let last = coach.transcript().last().unwrap();
    assert_eq!(last.role(), Role::Coach);
    assert_eq!(last.content(), "Points.");
}

#[tokio::test]
async fn test_empty_input_in_every_mode_never_calls_backend() {
    let (backend, calls) = CannedBackend::new(vec!["unused"]);
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());

    for mode in PracticeMode::ALL {
        let request = PracticeRequest::for_mode(mode, "", ComplexityLevel::Medium);
        assert_eq!(coach.practice(&request, |_| {}).await.unwrap(), None);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(coach.transcript().is_empty());
}

#[tokio::test]
async fn test_new_session_starts_with_empty_transcript() {
    let (backend, _) = CannedBackend::new(vec!["Reply"]);
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());
    coach.mun("Neutral stance", |_| {}).await.unwrap();
    assert_eq!(coach.transcript().len(), 1);

    let (backend, _) = CannedBackend::new(vec!["Reply"]);
    let fresh = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());
    assert!(fresh.transcript().is_empty());
}

#[tokio::test]
async fn test_whitespace_input_still_reaches_backend() {
    let (backend, calls) = CannedBackend::new(vec!["Say more."]);
    let mut coach = CoachOrchestrator::new(Box::new(backend), GenerationSettings::default());

    let reply = coach.parliamentary("   ", |_| {}).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Say more."));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(coach.transcript().len(), 1);
}
