//! Async service seam between the pure engines and the history store.
//!
//! Each operation validates first, sleeps a configured artificial delay to
//! stand in for a remote model call, and records to history only after that
//! delay completes, so an abandoned (dropped) operation persists nothing. A
//! future real model collaborator slots in where the sleep is without
//! changing the composer/optimizer contracts.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::info;

use crate::composer::{self, PromptFields};
use crate::error::{Result, ValidationError};
use crate::history::{HistoryRecord, HistoryStore, RecordKind};
use crate::optimizer::{self, OptimizationRequest, OptimizationResult};

/// Simulated latencies for the two operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub generate: Duration,
    pub optimize: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            generate: Duration::from_millis(800),
            optimize: Duration::from_millis(1500),
        }
    }
}

impl Latency {
    /// No artificial delay; used by tests and scripting callers.
    pub const NONE: Self = Self {
        generate: Duration::ZERO,
        optimize: Duration::ZERO,
    };
}

/// Completed generation: the composed prompt and its history record.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub prompt: String,
    pub record: HistoryRecord,
}

/// Completed optimization: the rewrite result and its history record.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub result: OptimizationResult,
    pub record: HistoryRecord,
}

pub struct Workbench<S: HistoryStore> {
    store: S,
    latency: Latency,
}

impl<S: HistoryStore> Workbench<S> {
    pub fn new(store: S, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Compose a prompt and record it with kind "generated".
    pub async fn generate(&self, fields: &PromptFields) -> Result<GenerateOutcome> {
        if fields.purpose.is_empty() {
            return Err(ValidationError::MissingPurpose.into());
        }
        if fields.topic.is_empty() {
            return Err(ValidationError::MissingTopic.into());
        }

        tokio::time::sleep(self.latency.generate).await;

        let prompt = composer::compose(fields)?;
        let title = format!("{}: {}", fields.purpose, fields.topic);
        let record = self.store.add(
            RecordKind::Generated,
            &title,
            &prompt,
            generator_metadata(fields),
        )?;
        info!(id = %record.id, title = %record.title, "prompt generated");

        Ok(GenerateOutcome { prompt, record })
    }

    /// Run the simulated optimization and record it with kind "optimized".
    pub async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizeOutcome> {
        if request.prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt.into());
        }

        tokio::time::sleep(self.latency.optimize).await;

        let result = optimizer::optimize(request)?;
        let title = format!("Optimized: {}", preview(&request.prompt));
        let record = self.store.add(
            RecordKind::Optimized,
            &title,
            &result.prompt,
            optimizer_metadata(request, &result),
        )?;
        info!(id = %record.id, overall = result.scores.overall, "prompt optimized");

        Ok(OptimizeOutcome { result, record })
    }
}

fn generator_metadata(fields: &PromptFields) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("task_type".to_string(), fields.purpose.clone()),
        ("topic".to_string(), fields.topic.clone()),
        ("tone".to_string(), fields.tone.clone()),
        ("format".to_string(), fields.format.clone()),
        ("length".to_string(), fields.length.clone()),
        ("constraints".to_string(), fields.constraints.clone()),
        ("examples".to_string(), fields.examples.clone()),
    ])
}

fn optimizer_metadata(
    request: &OptimizationRequest,
    result: &OptimizationResult,
) -> BTreeMap<String, String> {
    let goals = request
        .goals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let scores = result.scores;
    BTreeMap::from([
        ("original_prompt".to_string(), request.prompt.clone()),
        (
            "optimization_level".to_string(),
            request.level.to_string(),
        ),
        ("selected_goals".to_string(), goals),
        ("explanation".to_string(), result.explanation.join("|")),
        (
            "scores".to_string(),
            format!(
                "{},{},{},{}",
                scores.clarity, scores.conciseness, scores.structure, scores.depth
            ),
        ),
    ])
}

/// Title preview: the first 30 characters of the original prompt.
fn preview(prompt: &str) -> String {
    if prompt.chars().count() > 30 {
        let head: String = prompt.chars().take(30).collect();
        format!("{head}...")
    } else {
        prompt.to_string()
    }
}
