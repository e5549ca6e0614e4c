//! Bounded, JSON-serialized history of generations and optimizations.

mod restore;
mod store;
mod types;

pub use restore::{GeneratorRestore, OptimizerRestore, restore_generator, restore_optimizer};
pub use store::{DEFAULT_CAPACITY, HistoryStore, JsonHistoryStore};
pub use types::{HistoryRecord, RecordKind, format_timestamp};
