//! CLI support for mongo-analyzer
//!
//! Provides programmatic access to the CLI functionality so other tools can
//! embed the same checks.

mod check;
mod docs;
mod run;

pub use check::{CheckOptions, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use run::{RunOptions, ScriptEntry, execute_run, script_lines};

use std::io;

use thiserror::Error;

use crate::executor::ExecutionError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// The document store could not be opened or closed
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// JSON serialization error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No script provided
    #[error("No input provided. Use --file or pipe commands to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'mongo-analyzer docs' to see available categories.")]
    UnknownCategory(String),
}
