//! Practice mode definitions and selection.
//!
//! Each mode picks the instruction template, the rules shown before the input
//! form, and the label of that form. Modes carry no state; the selection is
//! re-evaluated from scratch every time the user picks from the menu.

use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;

/// Placeholder entry shown at the top of the mode selector.
pub const SELECT_PLACEHOLDER: &str = "Select";

const PARLIAMENTARY_RULES: &str = "Parliamentary Debate Rules:\n\
1. Debate is split into government and opposition teams.\n\
2. Each speaker has a time limit for arguments.\n\
3. Formal language is required; no direct addresses.\n\
4. Constructive speeches and rebuttals are key.\n\
5. Maintain decorum and follow the speaker's instructions.";

const MUN_RULES: &str = "Model United Nations (MUN) Rules:\n\
1. Delegates represent assigned countries.\n\
2. Use formal language and courtesy.\n\
3. Follow parliamentary procedures.\n\
4. Propose resolutions and debate global issues.\n\
5. Vote on resolutions after debate.";

/// The kinds of practice the coach offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeMode {
    Declamation,
    Parliamentary,
    Mun,
}

impl PracticeMode {
    /// All modes in menu order.
    pub const ALL: [PracticeMode; 3] = [
        PracticeMode::Declamation,
        PracticeMode::Parliamentary,
        PracticeMode::Mun,
    ];

    /// Short machine name, used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            PracticeMode::Declamation => "declamation",
            PracticeMode::Parliamentary => "parliamentary",
            PracticeMode::Mun => "mun",
        }
    }

    /// Label shown in the mode selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            PracticeMode::Declamation => "Declamation",
            PracticeMode::Parliamentary => "Parliamentary Debate",
            PracticeMode::Mun => "Model United Nations",
        }
    }

    /// Heading shown above the rules and input form.
    pub fn heading(&self) -> &'static str {
        match self {
            PracticeMode::Declamation => "Declamation Preparation",
            PracticeMode::Parliamentary => "Parliamentary Debate Rules",
            PracticeMode::Mun => "Model United Nations (MUN) Rules",
        }
    }

    /// Reference rules displayed before the input form, if the mode has any.
    pub fn rules(&self) -> Option<&'static str> {
        match self {
            PracticeMode::Declamation => None,
            PracticeMode::Parliamentary => Some(PARLIAMENTARY_RULES),
            PracticeMode::Mun => Some(MUN_RULES),
        }
    }

    /// Label of the free-text input for this mode.
    pub fn input_prompt(&self) -> &'static str {
        match self {
            PracticeMode::Declamation => "Enter the topic of your declamation:",
            PracticeMode::Parliamentary => "Enter your motives for discussion:",
            PracticeMode::Mun => {
                "Enter your country or organization's stance on a global issue:"
            }
        }
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PracticeMode {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_mode(s).ok_or_else(|| CoachError::UnknownMode(s.to_string()))
    }
}

/// How demanding the generated declamation sample should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ComplexityLevel {
    pub const ALL: [ComplexityLevel; 3] = [
        ComplexityLevel::Low,
        ComplexityLevel::Medium,
        ComplexityLevel::High,
    ];

    /// Lowercase form used inside prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }

    /// Capitalised form used in menus.
    pub fn label(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "Low",
            ComplexityLevel::Medium => "Medium",
            ComplexityLevel::High => "High",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplexityLevel {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ComplexityLevel::Low),
            "medium" => Ok(ComplexityLevel::Medium),
            "high" => Ok(ComplexityLevel::High),
            _ => Err(CoachError::ConfigError(format!(
                "Unknown complexity level '{}': expected low, medium or high",
                s
            ))),
        }
    }
}

/// Result of a pick in the mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    /// Nothing chosen yet; only the welcome text and history are shown.
    Unselected,
    Selected(PracticeMode),
}

impl ModeSelection {
    /// Evaluate a selector label. The placeholder and unknown labels are
    /// treated as no selection.
    pub fn from_label(label: &str) -> Self {
        PracticeMode::ALL
            .into_iter()
            .find(|mode| mode.display_name() == label)
            .map_or(ModeSelection::Unselected, ModeSelection::Selected)
    }

    pub fn mode(&self) -> Option<PracticeMode> {
        match self {
            ModeSelection::Unselected => None,
            ModeSelection::Selected(mode) => Some(*mode),
        }
    }
}

/// Labels for the mode selector: the placeholder followed by every mode.
pub fn selector_labels() -> Vec<&'static str> {
    let mut labels = vec![SELECT_PLACEHOLDER];
    labels.extend(PracticeMode::ALL.iter().map(|mode| mode.display_name()));
    labels
}

/// Get a practice mode by short name or display label, ignoring case.
pub fn get_mode(name: &str) -> Option<PracticeMode> {
    let wanted = name.trim().to_lowercase();
    PracticeMode::ALL
        .into_iter()
        .find(|mode| mode.name() == wanted || mode.display_name().to_lowercase() == wanted)
}

/// List all available mode names.
pub fn available_modes() -> Vec<&'static str> {
    PracticeMode::ALL.iter().map(|mode| mode.name()).collect()
}
