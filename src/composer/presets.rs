use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Task category driving default tone/format selection.
///
/// `PromptFields::purpose` stays an open string so stored history from older
/// versions keeps loading; this catalog covers the purposes the preset logic
/// knows defaults for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Purpose {
    Code,
    Email,
    Blog,
    #[strum(serialize = "Social Post")]
    #[serde(rename = "Social Post")]
    SocialPost,
    Script,
    Creative,
    Analysis,
    Other,
}

impl Purpose {
    /// Default output format applied when this purpose is selected.
    pub fn default_format(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Email => "Email Format",
            Self::Blog | Self::Analysis => "Markdown",
            Self::SocialPost => "Social Media Post",
            Self::Script => "Script",
            Self::Creative | Self::Other => "Paragraph",
        }
    }

    /// Default tone applied when this purpose is selected.
    pub fn default_tone(self) -> &'static str {
        match self {
            Self::Code => "Technical",
            Self::Email | Self::Blog => "Friendly",
            Self::SocialPost => "Enthusiastic",
            Self::Script => "Casual",
            Self::Creative => "Creative",
            Self::Analysis => "Analytical",
            Self::Other => "Professional",
        }
    }

    /// Quick-start topic suggestions shown for this purpose.
    pub fn quick_examples(self) -> &'static [&'static str] {
        match self {
            Self::Code => &[
                "Python script to scrape a website",
                "React component for a login form",
                "SQL query for monthly churn",
            ],
            Self::Email => &[
                "Cold outreach to potential client",
                "Follow-up after interview",
                "Out of office reply",
            ],
            Self::Blog => &[
                "Benefits of remote work",
                "Guide to personal finance",
                "Review of iPhone 15",
            ],
            Self::SocialPost => &[
                "Launch announcement for new product",
                "Motivational quote for Monday",
                "Poll about AI trends",
            ],
            Self::Script => &[
                "Podcast intro about tech news",
                "YouTube video opener",
                "Sales call script",
            ],
            Self::Creative => &[
                "Sci-fi story about Mars colony",
                "Poem about the ocean",
                "Character description for a hero",
            ],
            Self::Analysis => &[
                "Summarize sales data trends",
                "Compare two marketing strategies",
                "SWOT analysis for a startup",
            ],
            Self::Other => &[
                "Study plan for exams",
                "Birthday party ideas",
                "Explain quantum physics",
            ],
        }
    }
}

/// Purpose-specific default constraint text, used by the preset logic.
/// The composer itself never invents constraints. Unknown purposes get none.
pub fn auto_constraint_for(purpose: &str) -> &'static str {
    let Ok(purpose) = Purpose::from_str(purpose) else {
        return "";
    };
    match purpose {
        Purpose::Code => "Return only code. No conversational filler. Include comments.",
        Purpose::Email => "Use professional email structure. Be concise and polite.",
        Purpose::Blog => "Engaging and SEO-friendly. Use headings and short paragraphs.",
        Purpose::SocialPost => "Catchy hook, emojis where appropriate, include hashtags.",
        Purpose::Script => "Natural dialogue flow. Include scene directions.",
        Purpose::Creative => "Show, don't tell. Vivid imagery and emotional resonance.",
        Purpose::Analysis => "Data-driven, objective, bullet points for key insights.",
        Purpose::Other => "Clear and direct response.",
    }
}

const PRECISE_EXTRAS: &str =
    "Ensure high accuracy. Cite sources if applicable. No hallucinations.";

/// Preset intensity: trades answer length against rigor.
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
    clap::ValueEnum,
)]
pub enum Preset {
    Quick,
    #[default]
    Balanced,
    Precise,
}

impl Preset {
    /// Length label this preset selects.
    pub fn length(self) -> &'static str {
        match self {
            Self::Quick => "Short (< 100 words)",
            Self::Balanced => "Medium (100-300 words)",
            Self::Precise => "Detailed (> 1000 words)",
        }
    }

    /// Constraint text this preset fills in for the given purpose.
    /// Precise stacks the accuracy extras under the purpose baseline.
    pub fn constraints_for(self, purpose: &str) -> String {
        let base = auto_constraint_for(purpose);
        match self {
            Self::Quick | Self::Balanced => base.to_string(),
            Self::Precise if base.is_empty() => PRECISE_EXTRAS.to_string(),
            Self::Precise => format!("{base}\n{PRECISE_EXTRAS}"),
        }
    }
}

/// Fixed label set for the length field.
pub const LENGTH_OPTIONS: [&str; 4] = [
    "Short (< 100 words)",
    "Medium (100-300 words)",
    "Long (300-1000 words)",
    "Detailed (> 1000 words)",
];

/// Tones offered by the form; the field itself accepts free text.
pub const TONE_OPTIONS: [&str; 11] = [
    "Professional",
    "Casual",
    "Enthusiastic",
    "Authoritative",
    "Empathetic",
    "Humorous",
    "Academic",
    "Persuasive",
    "Technical",
    "Friendly",
    "Formal",
];

/// Output formats offered by the form; the field itself accepts free text.
pub const FORMAT_OPTIONS: [&str; 12] = [
    "Paragraph",
    "Bullet Points",
    "Markdown",
    "HTML Code",
    "JSON",
    "Python Script",
    "Email Format",
    "Essay",
    "Step-by-Step Guide",
    "Code",
    "Script",
    "Social Media Post",
];
