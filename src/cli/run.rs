//! Run a script of shell commands against one in-memory store

use std::sync::Arc;

use tracing::debug;

use super::CliError;
use crate::{AnalysisResult, Analyzer, Executor, MemoryExecutor};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// One command per line
    pub script: String,
}

/// Analysis of one script line
#[derive(Debug, Clone)]
pub struct ScriptEntry {
    /// 1-based line number in the script
    pub line: usize,
    pub input: String,
    pub result: AnalysisResult,
}

/// Non-empty, non-comment (`//`) lines with their 1-based numbers
pub fn script_lines(script: &str) -> impl Iterator<Item = (usize, &str)> {
    script
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"))
}

/// Analyze and execute every line in order.
///
/// Lines share a single store, so `use <db>` on one line selects the
/// database for the following ones. Failing lines do not stop the script.
pub fn execute_run(options: &RunOptions) -> Result<Vec<ScriptEntry>, CliError> {
    let executor = Arc::new(MemoryExecutor::new());
    executor.connect()?;
    let analyzer = Analyzer::with_executor(executor.clone());

    let entries = script_lines(&options.script)
        .map(|(line, input)| {
            debug!(line, input, "running script line");
            ScriptEntry {
                line,
                input: input.to_string(),
                result: analyzer.analyze(input),
            }
        })
        .collect();

    executor.close()?;
    Ok(entries)
}
