use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Optimization dimension a user opts into.
///
/// `Ord` follows declaration order, which is also the fixed rule-evaluation
/// order: Clarity, Conciseness, Structure, Depth. Keeping goals in a
/// `BTreeSet` makes that ordering fall out of iteration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
pub enum Goal {
    Clarity,
    Conciseness,
    Structure,
    Depth,
}

impl Goal {
    /// Change note appended when this goal is selected.
    pub fn note(self) -> &'static str {
        match self {
            Self::Clarity => "Removed ambiguous terms to improve clarity.",
            Self::Conciseness => "Reduced word count by removing redundancy.",
            Self::Structure => "Applied markdown formatting for better structure.",
            Self::Depth => "Expanded context requirements for deeper analysis.",
        }
    }
}

/// Optimization intensity, controlling rewrite boilerplate and the score
/// baseline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
pub enum Level {
    Light,
    #[default]
    Moderate,
    Aggressive,
}

impl Level {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Light => "[Refined] ",
            Self::Moderate => "[Optimized] ",
            Self::Aggressive => "[Expert-Level Rewrite] ",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Moderate => "\n\nEnsure the output strictly follows these guidelines.",
            Self::Aggressive => "\n\nStep-by-step reasoning is required before the final answer.",
        }
    }

    /// Level-specific change notes seeding the explanation list.
    pub fn notes(self) -> &'static [&'static str] {
        match self {
            Self::Light => &["Corrected minor grammatical inconsistencies."],
            Self::Moderate => &[
                "Enhanced vocabulary for better precision.",
                "Clarified instruction intent.",
            ],
            Self::Aggressive => &[
                "Completely restructured for maximum logical flow.",
                "Added strict constraints to prevent hallucinations.",
            ],
        }
    }

    /// Baseline the heuristic sub-scores start from.
    pub fn base_score(self) -> u8 {
        match self {
            Self::Light => 70,
            Self::Moderate => 80,
            Self::Aggressive => 85,
        }
    }
}

/// A rewrite request: the original prompt plus goals and intensity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub prompt: String,
    #[serde(default)]
    pub goals: BTreeSet<Goal>,
    #[serde(default)]
    pub level: Level,
}

impl OptimizationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_goals(mut self, goals: impl IntoIterator<Item = Goal>) -> Self {
        self.goals = goals.into_iter().collect();
        self
    }
}

/// Heuristic quality sub-scores in [0,100] plus their truncated mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub clarity: u8,
    pub conciseness: u8,
    pub structure: u8,
    pub depth: u8,
    pub overall: u8,
}

impl Scores {
    /// Derive the overall score as the integer-truncated mean.
    pub fn derive(clarity: u8, conciseness: u8, structure: u8, depth: u8) -> Self {
        let sum =
            u16::from(clarity) + u16::from(conciseness) + u16::from(structure) + u16::from(depth);
        let overall = u8::try_from(sum / 4).unwrap_or(u8::MAX);
        Self {
            clarity,
            conciseness,
            structure,
            depth,
            overall,
        }
    }

    fn as_array(self) -> [u8; 4] {
        [self.clarity, self.conciseness, self.structure, self.depth]
    }

    pub fn min_sub_score(self) -> u8 {
        self.as_array().into_iter().min().unwrap_or(0)
    }

    pub fn max_sub_score(self) -> u8 {
        self.as_array().into_iter().max().unwrap_or(0)
    }
}

/// Output of a simulated rewrite: the new prompt, ordered change notes, and
/// the heuristic scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub prompt: String,
    pub explanation: Vec<String>,
    pub scores: Scores,
}
