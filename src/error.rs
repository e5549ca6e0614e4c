use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `promptsmith`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains. None of these terminate the
/// process: validation failures are surfaced to the caller, persistence and
/// restore parse failures are recovered where they occur.
#[derive(Debug, Error)]
pub enum SmithError {
    // ── Input validation ─────────────────────────────────────────────────
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    // ── History persistence ──────────────────────────────────────────────
    #[error("history: {0}")]
    History(#[from] HistoryError),

    // ── History restore ──────────────────────────────────────────────────
    #[error("restore: {0}")]
    Restore(#[from] RestoreError),

    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Validation errors ───────────────────────────────────────────────────────

/// Required input missing. Checked before any assembly work; a rejected
/// operation never reaches the history store.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("purpose is required")]
    MissingPurpose,

    #[error("topic is required")]
    MissingTopic,

    #[error("prompt must not be empty")]
    EmptyPrompt,
}

// ─── History persistence errors ──────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Lock,
}

// ─── Restore errors ──────────────────────────────────────────────────────────

/// Record metadata lacks fields the restore path expects. Recovered locally:
/// prior state for the affected field is preserved and a diagnostic logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("malformed scores string: {0:?}")]
    MalformedScores(String),

    #[error("unknown optimization level: {0:?}")]
    UnknownLevel(String),

    #[error("unknown goal label: {0:?}")]
    UnknownGoal(String),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SmithError>;
