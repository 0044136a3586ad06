//! Session transcript.
//!
//! An append-only record of the conversation, read by the presentation layer
//! for display. A new session starts with a new, empty transcript.

use crate::error::CoachError;
use crate::message::{Message, Role};

/// Ordered log of the messages exchanged in one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end. Empty content is rejected and leaves the
    /// transcript untouched.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<(), CoachError> {
        let message = Message::new(role, content)?;
        self.entries.push(message);
        Ok(())
    }

    /// Append an already-built message.
    pub(crate) fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    /// Messages in insertion order. Call again to restart the iteration.
    pub fn all(&self) -> std::slice::Iter<'_, Message> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.all().count(), 0);
        assert!(transcript.last().is_none());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        let entries = [
            (Role::User, "first"),
            (Role::Coach, "second"),
            (Role::Coach, "second"),
            (Role::User, "third"),
        ];
        for (role, content) in entries {
            transcript.append(role, content).unwrap();
        }

        assert_eq!(transcript.len(), 4);
        let seen: Vec<(Role, &str)> = transcript
            .all()
            .map(|m| (m.role(), m.content()))
            .collect();
        assert_eq!(seen, entries.to_vec());
    }

    #[test]
    fn test_all_is_restartable() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "a").unwrap();
        transcript.append(Role::Coach, "b").unwrap();

        let iter = transcript.all();
        let first_pass: Vec<_> = iter.clone().map(Message::content).collect();
        let second_pass: Vec<_> = iter.map(Message::content).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(transcript.all().count(), 2);
    }

    #[test]
    fn test_rejected_append_leaves_transcript_unchanged() {
        let mut transcript = Transcript::new();
        transcript.append(Role::User, "kept").unwrap();

        assert!(transcript.append(Role::Coach, "").is_err());
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().map(Message::content), Some("kept"));
    }
}
