use std::str::FromStr;

use anyhow::{Result, bail};

use crate::Config;
use crate::cli::{Cli, Commands, HistoryCommands};
use crate::composer::{Preset, PromptFields, Purpose};
use crate::history::{
    HistoryRecord, HistoryStore, JsonHistoryStore, restore_generator, restore_optimizer,
};
use crate::optimizer::{Goal, Level, OptimizationRequest};
use crate::workbench::Workbench;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let store = JsonHistoryStore::new(config.history_path(), config.history.capacity);
    let bench = Workbench::new(store, config.latency());

    match cli.command {
        Commands::Generate {
            topic,
            purpose,
            tone,
            length,
            format,
            constraints,
            examples,
            preset,
        } => {
            let fields = resolve_fields(
                &config, topic, purpose, tone, length, format, constraints, examples, preset,
            );
            run_generate(&bench, &fields).await
        }
        Commands::Optimize {
            prompt,
            goals,
            level,
        } => run_optimize(&bench, prompt, goals, level).await,
        Commands::History { command } => run_history(bench.store(), &command),
        Commands::Restore { id } => run_restore(bench.store(), &id),
    }
}

/// Resolve form fields the way the form would: explicit flags win, then the
/// selected purpose's defaults, then the configured defaults. A preset fills
/// length and constraints unless overridden.
#[allow(clippy::too_many_arguments)]
fn resolve_fields(
    config: &Config,
    topic: String,
    purpose: Option<String>,
    tone: Option<String>,
    length: Option<String>,
    format: Option<String>,
    constraints: Option<String>,
    examples: Option<String>,
    preset: Option<Preset>,
) -> PromptFields {
    let purpose = purpose
        .or_else(|| {
            (!config.defaults.purpose.is_empty()).then(|| config.defaults.purpose.clone())
        })
        .unwrap_or_else(|| "Code".to_string());
    let known = Purpose::from_str(&purpose).ok();

    let tone = tone.unwrap_or_else(|| {
        known.map_or_else(|| config.defaults.tone.clone(), |p| p.default_tone().into())
    });
    let format = format.unwrap_or_else(|| {
        known.map_or_else(
            || config.defaults.format.clone(),
            |p| p.default_format().into(),
        )
    });
    let length = length.unwrap_or_else(|| {
        preset.map_or_else(|| config.defaults.length.clone(), |p| p.length().into())
    });
    let constraints = constraints
        .unwrap_or_else(|| preset.map_or_else(String::new, |p| p.constraints_for(&purpose)));

    PromptFields {
        purpose,
        topic,
        tone,
        length,
        format,
        constraints,
        examples: examples.unwrap_or_default(),
    }
}

async fn run_generate(bench: &Workbench<JsonHistoryStore>, fields: &PromptFields) -> Result<()> {
    let outcome = bench.generate(fields).await?;
    println!("{}", outcome.prompt);
    println!();
    println!("Saved to history ({})", outcome.record.id);
    Ok(())
}

async fn run_optimize(
    bench: &Workbench<JsonHistoryStore>,
    prompt: Option<String>,
    goals: Vec<Goal>,
    level: Level,
) -> Result<()> {
    let prompt = match prompt {
        Some(prompt) => prompt,
        None => std::io::read_to_string(std::io::stdin())?
            .trim_end_matches('\n')
            .to_string(),
    };

    let request = OptimizationRequest::new(prompt)
        .with_level(level)
        .with_goals(goals);
    let outcome = bench.optimize(&request).await?;

    println!("{}", outcome.result.prompt);
    println!();
    println!("Changes:");
    for note in &outcome.result.explanation {
        println!("  - {note}");
    }
    let scores = outcome.result.scores;
    println!();
    println!(
        "Scores: clarity {} | conciseness {} | structure {} | depth {} | overall {}",
        scores.clarity, scores.conciseness, scores.structure, scores.depth, scores.overall
    );
    println!();
    println!("Saved to history ({})", outcome.record.id);
    Ok(())
}

fn run_history(store: &JsonHistoryStore, command: &HistoryCommands) -> Result<()> {
    match command {
        HistoryCommands::List => {
            let records = store.list()?;
            if records.is_empty() {
                println!("History is empty.");
                return Ok(());
            }
            for record in records {
                println!(
                    "{}  {:<9}  {}  {}",
                    record.formatted_date,
                    record.kind.to_string(),
                    record.id,
                    record.title
                );
            }
            Ok(())
        }
        HistoryCommands::Show { id } => {
            let record = find_record(store, id)?;
            println!("{} ({}) — {}", record.title, record.kind, record.formatted_date);
            println!();
            println!("{}", record.content);
            if !record.metadata.is_empty() {
                println!();
                for (key, value) in &record.metadata {
                    println!("{key}: {value}");
                }
            }
            Ok(())
        }
        HistoryCommands::Delete { id } => {
            store.delete(id)?;
            println!("Item removed from history");
            Ok(())
        }
        HistoryCommands::Clear => {
            store.clear()?;
            println!("History cleared");
            Ok(())
        }
    }
}

fn run_restore(store: &JsonHistoryStore, id: &str) -> Result<()> {
    use crate::history::RecordKind;

    let record = find_record(store, id)?;
    match record.kind {
        RecordKind::Generated => {
            let restored = restore_generator(&record);
            let fields = &restored.fields;
            println!("purpose: {}", fields.purpose);
            println!("topic: {}", fields.topic);
            println!("tone: {}", fields.tone);
            println!("length: {}", fields.length);
            println!("format: {}", fields.format);
            println!("constraints: {}", fields.constraints);
            println!("examples: {}", fields.examples);
            println!();
            println!("{}", restored.generated_prompt);
        }
        RecordKind::Optimized => {
            let restored = restore_optimizer(&record);
            println!("original prompt: {}", restored.original_prompt);
            println!("level: {}", restored.level);
            let goals = restored
                .goals
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("goals: {goals}");
            for note in &restored.explanation {
                println!("  - {note}");
            }
            if let Some(scores) = restored.scores {
                println!(
                    "scores: clarity {} | conciseness {} | structure {} | depth {} | overall {}",
                    scores.clarity,
                    scores.conciseness,
                    scores.structure,
                    scores.depth,
                    scores.overall
                );
            }
            println!();
            println!("{}", restored.optimized_prompt);
        }
    }
    Ok(())
}

fn find_record(store: &JsonHistoryStore, id: &str) -> Result<HistoryRecord> {
    let Some(record) = store.list()?.into_iter().find(|record| record.id == id) else {
        bail!("no history record with id {id}");
    };
    Ok(record)
}
