use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::workbench::Latency;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Workspace directory - computed from home, not serialized
    #[serde(skip)]
    pub workspace_dir: PathBuf,
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub latency: LatencyConfig,

    #[serde(default)]
    pub defaults: GeneratorDefaults,
}

// ── History store ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Blob file name inside the workspace directory
    #[serde(default = "default_history_file")]
    pub file: String,
    /// Records kept after retention runs (default: 50)
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

fn default_history_file() -> String {
    "history.json".into()
}

fn default_history_capacity() -> usize {
    crate::history::DEFAULT_CAPACITY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
            capacity: default_history_capacity(),
        }
    }
}

// ── Simulated latency ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Artificial generate delay in milliseconds (default: 800)
    #[serde(default = "default_generate_ms")]
    pub generate_ms: u64,
    /// Artificial optimize delay in milliseconds (default: 1500)
    #[serde(default = "default_optimize_ms")]
    pub optimize_ms: u64,
}

fn default_generate_ms() -> u64 {
    800
}

fn default_optimize_ms() -> u64 {
    1500
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            generate_ms: default_generate_ms(),
            optimize_ms: default_optimize_ms(),
        }
    }
}

// ── Generator defaults ────────────────────────────────────────────

/// Form defaults applied when a flag or field is not given explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorDefaults {
    /// Default purpose; empty means "Code"
    #[serde(default)]
    pub purpose: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_length")]
    pub length: String,
}

fn default_tone() -> String {
    "Professional".into()
}

fn default_format() -> String {
    "Markdown".into()
}

fn default_length() -> String {
    "Medium (100-300 words)".into()
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            purpose: String::new(),
            tone: default_tone(),
            format: default_format(),
            length: default_length(),
        }
    }
}

// ── Loading and saving ────────────────────────────────────────────

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let smith_dir = home.join(".promptsmith");
        let config_path = smith_dir.join("config.toml");

        if !smith_dir.exists() {
            fs::create_dir_all(&smith_dir).context("Failed to create .promptsmith directory")?;
            fs::create_dir_all(smith_dir.join("workspace"))
                .context("Failed to create workspace directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set computed paths that are skipped during serialization
            config.config_path.clone_from(&config_path);
            config.workspace_dir = smith_dir.join("workspace");
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                workspace_dir: smith_dir.join("workspace"),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Where the history blob lives.
    pub fn history_path(&self) -> PathBuf {
        self.workspace_dir.join(&self.history.file)
    }

    pub fn latency(&self) -> Latency {
        Latency {
            generate: Duration::from_millis(self.latency.generate_ms),
            optimize: Duration::from_millis(self.latency.optimize_ms),
        }
    }
}
