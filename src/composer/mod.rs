//! Deterministic prompt assembly from structured form fields.
//!
//! `compose` is pure: same fields in, byte-identical prompt out. Validation
//! happens before any assembly and composing never touches the history store;
//! recording is the caller's job (see `workbench`).

mod presets;

pub use presets::{
    FORMAT_OPTIONS, LENGTH_OPTIONS, Preset, Purpose, TONE_OPTIONS, auto_constraint_for,
};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Structured input for prompt composition. Purpose and topic are required;
/// everything else is omitted from the output when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFields {
    pub purpose: String,
    pub topic: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub examples: String,
}

const INSTRUCTIONS_SECTION: &str = "\n# Instructions\nPlease generate the response following the requirements above. Ensure high quality and strict adherence to the constraints.";

/// Assemble the prompt in fixed section order: Role, Task (topic, then tone,
/// length and format when set), Constraints, Examples, Instructions.
pub fn compose(fields: &PromptFields) -> Result<String, ValidationError> {
    if fields.purpose.is_empty() {
        return Err(ValidationError::MissingPurpose);
    }
    if fields.topic.is_empty() {
        return Err(ValidationError::MissingTopic);
    }

    let mut parts = Vec::new();
    parts.push(format!("# Role\nAct as an expert in {}.", fields.purpose));
    parts.push(format!("\n# Task\nTopic: {}", fields.topic));
    if !fields.tone.is_empty() {
        parts.push(format!("Tone: {}", fields.tone));
    }
    if !fields.length.is_empty() {
        parts.push(format!("Length: {}", fields.length));
    }
    if !fields.format.is_empty() {
        parts.push(format!("Output Format: {}", fields.format));
    }
    if !fields.constraints.is_empty() {
        parts.push(format!("\n# Constraints\n{}", fields.constraints));
    }
    if !fields.examples.is_empty() {
        parts.push(format!("\n# Examples\n{}", fields.examples));
    }
    parts.push(INSTRUCTIONS_SECTION.to_string());

    Ok(parts.join("\n"))
}
