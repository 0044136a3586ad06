//! Role-tagged chat messages.
//!
//! A message is immutable once built; its content is never empty.

use std::fmt;

use crate::error::CoachError;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Instructions that steer the model.
    System,
    /// Text entered by the person practising.
    User,
    /// Generated coaching output.
    Coach,
}

impl Role {
    pub fn display_name(&self) -> &str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Coach => "Coach",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single entry in a conversation.
///
/// Only [`Message::new`] builds one, so the content is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Create a message, rejecting empty content. Whitespace is kept as typed.
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, CoachError> {
        let content = content.into();
        if content.is_empty() {
            return Err(CoachError::EmptyMessage { role });
        }
        Ok(Self { role, content })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when the message was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
