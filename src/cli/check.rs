//! Analyze a single shell command

use std::sync::Arc;

use super::CliError;
use crate::{AnalysisResult, Analyzer, Executor, MemoryExecutor};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The shell command to analyze
    pub command: String,
    /// Run the command against a fresh in-memory store once it is valid
    pub execute: bool,
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<AnalysisResult, CliError> {
    if !options.execute {
        return Ok(Analyzer::default().analyze(&options.command));
    }

    let executor = Arc::new(MemoryExecutor::new());
    executor.connect()?;
    let result = Analyzer::with_executor(executor.clone()).analyze(&options.command);
    executor.close()?;

    Ok(result)
}
