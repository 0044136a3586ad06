//! Error types for the coaching core.

use thiserror::Error;

use crate::message::Role;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("API key not found: set the {var} environment variable")]
    MissingApiKey { var: String },

    #[error("OpenAI API error: {0}")]
    OpenAIError(#[from] async_openai::error::OpenAIError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{role} message content cannot be empty")]
    EmptyMessage { role: Role },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Unknown practice mode: {0}")]
    UnknownMode(String),
}
