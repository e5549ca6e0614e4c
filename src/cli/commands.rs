use clap::{Parser, Subcommand};

use crate::composer::Preset;
use crate::optimizer::{Goal, Level};

/// `promptsmith` - Compose, optimize and recall prompts for language models.
#[derive(Parser, Debug)]
#[command(name = "promptsmith")]
#[command(version = "0.1.0")]
#[command(about = "Prompt-engineering workbench.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose a structured prompt from form fields
    Generate {
        /// What you need (the topic); required
        #[arg(short, long)]
        topic: String,

        /// Task category (Code, Email, Blog, Social Post, ...)
        #[arg(short, long)]
        purpose: Option<String>,

        /// Tone of the response
        #[arg(long)]
        tone: Option<String>,

        /// Length label, e.g. "Short (< 100 words)"
        #[arg(long)]
        length: Option<String>,

        /// Output format, e.g. Markdown
        #[arg(long)]
        format: Option<String>,

        /// Constraint text; overrides any preset constraints
        #[arg(long)]
        constraints: Option<String>,

        /// Example text to include
        #[arg(long)]
        examples: Option<String>,

        /// Fill length and constraints from a preset
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },

    /// Simulate an optimization pass over an existing prompt
    Optimize {
        /// The prompt to optimize; read from stdin when omitted
        prompt: Option<String>,

        /// Optimization goal; repeatable
        #[arg(short, long = "goal", value_enum)]
        goals: Vec<Goal>,

        /// Optimization intensity
        #[arg(short, long, value_enum, default_value = "moderate")]
        level: Level,
    },

    /// Inspect or prune the local history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Rebuild the originating form state from a history record
    Restore {
        /// Record id (as shown by `history list`)
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List records, most recent first
    List,

    /// Print one record's content and metadata
    Show { id: String },

    /// Delete one record; unknown ids are ignored
    Delete { id: String },

    /// Delete all records
    Clear,
}
