#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod history;
pub mod optimizer;
pub mod workbench;

pub use config::Config;
pub use error::{Result, SmithError};
