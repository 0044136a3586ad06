//! DebateCoach Core Library
//!
//! Provides the coaching orchestration logic: practice modes, prompt
//! templates, streaming model calls, and the session transcript.

pub mod backend;
pub mod collector;
pub mod config;
pub mod error;
pub mod message;
pub mod orchestrator;
pub mod practice_mode;
pub mod prompt;
pub mod transcript;

pub use backend::{ChatBackend, CompletionRequest, DeltaStream, OpenAIBackend};
pub use collector::collect_stream;
pub use config::{Config, GenerationSettings, Overrides};
pub use error::CoachError;
pub use message::{Message, Role};
pub use orchestrator::CoachOrchestrator;
pub use practice_mode::{ComplexityLevel, ModeSelection, PracticeMode};
pub use prompt::{PracticeRequest, build_messages};
pub use transcript::Transcript;
