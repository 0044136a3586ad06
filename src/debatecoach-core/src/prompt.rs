//! Prompt construction for each practice mode.
//!
//! Turns a user's submission into the role-tagged message list sent to the
//! chat-completion API. The templates are fixed per mode.

use crate::error::CoachError;
use crate::message::{Message, Role};
use crate::practice_mode::{ComplexityLevel, PracticeMode};

const DECLAMATION_SYSTEM_PROMPT: &str =
    "Provide declamation guidance and a sample two-paragraph response.";

/// A submission from the input form of one practice mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeRequest {
    Declamation {
        topic: String,
        level: ComplexityLevel,
    },
    Parliamentary {
        motives: String,
    },
    Mun {
        stance: String,
    },
}

impl PracticeRequest {
    pub fn declamation(topic: impl Into<String>, level: ComplexityLevel) -> Self {
        PracticeRequest::Declamation {
            topic: topic.into(),
            level,
        }
    }

    pub fn parliamentary(motives: impl Into<String>) -> Self {
        PracticeRequest::Parliamentary {
            motives: motives.into(),
        }
    }

    pub fn mun(stance: impl Into<String>) -> Self {
        PracticeRequest::Mun {
            stance: stance.into(),
        }
    }

    /// Build a request for `mode` from the raw form input. `level` only
    /// applies to declamation.
    pub fn for_mode(mode: PracticeMode, input: impl Into<String>, level: ComplexityLevel) -> Self {
        match mode {
            PracticeMode::Declamation => Self::declamation(input, level),
            PracticeMode::Parliamentary => Self::parliamentary(input),
            PracticeMode::Mun => Self::mun(input),
        }
    }

    pub fn mode(&self) -> PracticeMode {
        match self {
            PracticeRequest::Declamation { .. } => PracticeMode::Declamation,
            PracticeRequest::Parliamentary { .. } => PracticeMode::Parliamentary,
            PracticeRequest::Mun { .. } => PracticeMode::Mun,
        }
    }

    /// The free text the user typed.
    pub fn input(&self) -> &str {
        match self {
            PracticeRequest::Declamation { topic, .. } => topic,
            PracticeRequest::Parliamentary { motives } => motives,
            PracticeRequest::Mun { stance } => stance,
        }
    }

    /// Empty input never produces a model call. Whitespace still counts as
    /// input.
    pub fn is_empty(&self) -> bool {
        self.input().is_empty()
    }

    /// Whether the user's own text is recorded in the transcript alongside
    /// the coach's reply.
    pub fn records_user_input(&self) -> bool {
        matches!(self, PracticeRequest::Declamation { .. })
    }
}

/// Build the message list for a request. Returns an empty list when the
/// request has no input.
pub fn build_messages(request: &PracticeRequest) -> Result<Vec<Message>, CoachError> {
    if request.is_empty() {
        return Ok(Vec::new());
    }

    let messages = match request {
        PracticeRequest::Declamation { topic, level } => vec![
            Message::new(Role::System, DECLAMATION_SYSTEM_PROMPT)?,
            Message::new(
                Role::User,
                format!("Topic: {}. Complexity level: {}.", topic, level.as_str()),
            )?,
        ],
        PracticeRequest::Parliamentary { motives } => vec![Message::new(
            Role::User,
            format!(
                "As a debater, your motives are: '{}'. Suggest an approach to argue this effectively.",
                motives
            ),
        )?],
        PracticeRequest::Mun { stance } => vec![Message::new(
            Role::User,
            format!(
                "In an MUN session, the user represents a country with the stance: '{}'. \
                 Generate points to support this stance and suggest diplomatic language.",
                stance
            ),
        )?],
    };

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(messages: &[Message]) -> Vec<(Role, &str)> {
        messages.iter().map(|m| (m.role(), m.content())).collect()
    }

    #[test]
    fn test_declamation_messages() {
        let request = PracticeRequest::declamation("Free speech", ComplexityLevel::High);
        let messages = build_messages(&request).unwrap();
        assert_eq!(
            contents(&messages),
            vec![
                (
                    Role::System,
                    "Provide declamation guidance and a sample two-paragraph response."
                ),
                (Role::User, "Topic: Free speech. Complexity level: high."),
            ]
        );
    }

    #[test]
    fn test_parliamentary_messages() {
        let request = PracticeRequest::parliamentary("Ban homework");
        let messages = build_messages(&request).unwrap();
        assert_eq!(
            contents(&messages),
            vec![(
                Role::User,
                "As a debater, your motives are: 'Ban homework'. Suggest an approach to argue this effectively."
            )]
        );
    }

    #[test]
    fn test_mun_messages() {
        let request = PracticeRequest::mun("Norway supports carbon taxes");
        let messages = build_messages(&request).unwrap();
        assert_eq!(
            contents(&messages),
            vec![(
                Role::User,
                "In an MUN session, the user represents a country with the stance: \
                 'Norway supports carbon taxes'. Generate points to support this stance \
                 and suggest diplomatic language."
            )]
        );
    }

    #[test]
    fn test_last_message_is_user_for_every_mode() {
        for mode in PracticeMode::ALL {
            let request = PracticeRequest::for_mode(mode, "climate", ComplexityLevel::Low);
            let messages = build_messages(&request).unwrap();
            let last = messages.last().unwrap();
            assert_eq!(last.role(), Role::User);
            assert!(last.content().contains("climate"));
            assert_eq!(request.mode(), mode);
        }
    }

    #[test]
    fn test_empty_input_builds_nothing() {
        for mode in PracticeMode::ALL {
            let request = PracticeRequest::for_mode(mode, "", ComplexityLevel::Medium);
            assert!(request.is_empty());
            assert!(build_messages(&request).unwrap().is_empty());
        }
    }

    #[test]
    fn test_whitespace_input_still_builds_request() {
        for mode in PracticeMode::ALL {
            let request = PracticeRequest::for_mode(mode, "   ", ComplexityLevel::Medium);
            assert!(!request.is_empty());
            let messages = build_messages(&request).unwrap();
            assert_eq!(messages.last().map(Message::role), Some(Role::User));
        }
        let messages =
            build_messages(&PracticeRequest::parliamentary("   ")).unwrap();
        assert_eq!(
            messages[0].content(),
            "As a debater, your motives are: '   '. Suggest an approach to argue this effectively."
        );
    }

    #[test]
    fn test_only_declamation_records_user_input() {
        assert!(PracticeRequest::declamation("x", ComplexityLevel::Low).records_user_input());
        assert!(!PracticeRequest::parliamentary("x").records_user_input());
        assert!(!PracticeRequest::mun("x").records_user_input());
    }
}
