//! Rehydrate form state from a stored record.
//!
//! Metadata values are delimiter-joined strings, so the restore path is a
//! parsing exercise: goals and scores split on `,`, explanation on `|`.
//! Parse failures never propagate: the affected field keeps its fallback
//! and a diagnostic is logged.

use std::str::FromStr;

use tracing::warn;

use super::types::HistoryRecord;
use crate::composer::PromptFields;
use crate::error::RestoreError;
use crate::optimizer::{Goal, Level, Scores};

/// Generator form state rebuilt from a "generated" record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorRestore {
    pub fields: PromptFields,
    pub generated_prompt: String,
}

/// Optimizer view state rebuilt from an "optimized" record.
///
/// `scores` is `None` when the stored scores string failed to parse; the
/// caller keeps whatever score state it had.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerRestore {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub level: Level,
    pub goals: Vec<Goal>,
    pub explanation: Vec<String>,
    pub scores: Option<Scores>,
}

/// Older blobs wrote `purpose`/`describe` where newer ones write
/// `task_type`/`topic`; first present-and-non-empty key wins.
fn first_present(record: &HistoryRecord, keys: &[&str], fallback: &str) -> String {
    keys.iter()
        .filter_map(|key| record.metadata.get(*key))
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// Rebuild generator form fields from a record's metadata and content.
pub fn restore_generator(record: &HistoryRecord) -> GeneratorRestore {
    GeneratorRestore {
        fields: PromptFields {
            purpose: first_present(record, &["task_type", "purpose"], "Code"),
            topic: first_present(record, &["topic", "describe"], ""),
            tone: first_present(record, &["tone"], ""),
            length: first_present(record, &["length"], ""),
            format: first_present(record, &["format"], ""),
            constraints: first_present(record, &["constraints"], ""),
            examples: first_present(record, &["examples"], ""),
        },
        generated_prompt: record.content.clone(),
    }
}

/// Rebuild optimizer view state from a record's metadata and content.
pub fn restore_optimizer(record: &HistoryRecord) -> OptimizerRestore {
    let level_raw = first_present(record, &["optimization_level"], "Moderate");
    let level = Level::from_str(&level_raw).unwrap_or_else(|_| {
        warn!(
            record = %record.id,
            error = %RestoreError::UnknownLevel(level_raw.clone()),
            "falling back to Moderate"
        );
        Level::Moderate
    });

    let goals_raw = first_present(record, &["selected_goals"], "");
    let goals = if goals_raw.is_empty() {
        Vec::new()
    } else {
        goals_raw
            .split(',')
            .filter_map(|label| match Goal::from_str(label) {
                Ok(goal) => Some(goal),
                Err(_) => {
                    warn!(
                        record = %record.id,
                        error = %RestoreError::UnknownGoal(label.to_string()),
                        "skipping goal"
                    );
                    None
                }
            })
            .collect()
    };

    let explanation_raw = first_present(record, &["explanation"], "");
    let explanation = if explanation_raw.is_empty() {
        Vec::new()
    } else {
        explanation_raw.split('|').map(str::to_string).collect()
    };

    let scores_raw = first_present(record, &["scores"], "0,0,0,0");
    let scores = match parse_scores(&scores_raw) {
        Ok(scores) => Some(scores),
        Err(err) => {
            warn!(record = %record.id, error = %err, "keeping prior score state");
            None
        }
    };

    OptimizerRestore {
        original_prompt: first_present(record, &["original_prompt"], ""),
        optimized_prompt: record.content.clone(),
        level,
        goals,
        explanation,
        scores,
    }
}

/// Parse a `clarity,conciseness,structure,depth` scores string; the overall
/// score is re-derived rather than stored.
fn parse_scores(raw: &str) -> Result<Scores, RestoreError> {
    let malformed = || RestoreError::MalformedScores(raw.to_string());
    let parts: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;
    let [clarity, conciseness, structure, depth] = parts[..] else {
        return Err(malformed());
    };
    Ok(Scores::derive(clarity, conciseness, structure, depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RecordKind;
    use std::collections::BTreeMap;

    fn record(kind: RecordKind, metadata: &[(&str, &str)]) -> HistoryRecord {
        HistoryRecord {
            id: "r-1".into(),
            kind,
            title: "t".into(),
            content: "stored content".into(),
            timestamp: 1.0,
            formatted_date: "d".into(),
            metadata: metadata
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn generator_restore_prefers_canonical_keys() {
        let rec = record(
            RecordKind::Generated,
            &[
                ("task_type", "Email"),
                ("purpose", "Code"),
                ("topic", "follow-up"),
                ("describe", "ignored"),
                ("tone", "Friendly"),
            ],
        );
        let restored = restore_generator(&rec);
        assert_eq!(restored.fields.purpose, "Email");
        assert_eq!(restored.fields.topic, "follow-up");
        assert_eq!(restored.fields.tone, "Friendly");
        assert_eq!(restored.generated_prompt, "stored content");
    }

    #[test]
    fn generator_restore_falls_back_to_alias_keys() {
        let rec = record(
            RecordKind::Generated,
            &[("purpose", "Blog"), ("describe", "remote work")],
        );
        let restored = restore_generator(&rec);
        assert_eq!(restored.fields.purpose, "Blog");
        assert_eq!(restored.fields.topic, "remote work");
    }

    #[test]
    fn generator_restore_defaults_purpose_when_absent() {
        let rec = record(RecordKind::Generated, &[]);
        let restored = restore_generator(&rec);
        assert_eq!(restored.fields.purpose, "Code");
        assert_eq!(restored.fields.topic, "");
    }

    #[test]
    fn optimizer_restore_parses_delimited_metadata() {
        let rec = record(
            RecordKind::Optimized,
            &[
                ("original_prompt", "Write a poem"),
                ("optimization_level", "Aggressive"),
                ("selected_goals", "Clarity,Structure"),
                ("explanation", "note one|note two"),
                ("scores", "90,85,95,88"),
            ],
        );
        let restored = restore_optimizer(&rec);
        assert_eq!(restored.original_prompt, "Write a poem");
        assert_eq!(restored.optimized_prompt, "stored content");
        assert_eq!(restored.level, Level::Aggressive);
        assert_eq!(restored.goals, vec![Goal::Clarity, Goal::Structure]);
        assert_eq!(restored.explanation, vec!["note one", "note two"]);
        let scores = restored.scores.unwrap();
        assert_eq!(
            (scores.clarity, scores.conciseness, scores.structure, scores.depth),
            (90, 85, 95, 88)
        );
        assert_eq!(scores.overall, 89);
    }

    #[test]
    fn malformed_scores_leave_score_state_untouched() {
        let rec = record(
            RecordKind::Optimized,
            &[("scores", "90,eighty,95,88"), ("optimization_level", "Light")],
        );
        let restored = restore_optimizer(&rec);
        assert_eq!(restored.scores, None);
        assert_eq!(restored.level, Level::Light);
    }

    #[test]
    fn wrong_score_count_is_malformed() {
        assert!(parse_scores("90,85,95").is_err());
        assert!(parse_scores("90,85,95,88,70").is_err());
        assert!(parse_scores("").is_err());
    }

    #[test]
    fn optimizer_restore_defaults_when_metadata_missing() {
        let rec = record(RecordKind::Optimized, &[]);
        let restored = restore_optimizer(&rec);
        assert_eq!(restored.level, Level::Moderate);
        assert!(restored.goals.is_empty());
        assert!(restored.explanation.is_empty());
        // The writer's zero-score default parses cleanly.
        assert_eq!(restored.scores.unwrap().overall, 0);
        assert_eq!(restored.original_prompt, "");
    }

    #[test]
    fn unknown_goal_labels_are_skipped_not_fatal() {
        let rec = record(
            RecordKind::Optimized,
            &[("selected_goals", "Clarity,Vibes,Depth")],
        );
        let restored = restore_optimizer(&rec);
        assert_eq!(restored.goals, vec![Goal::Clarity, Goal::Depth]);
    }
}
