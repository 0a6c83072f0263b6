//! The analysis pipeline: tokenize → parse → validate → (optionally) execute.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    ast::Command,
    diagnostics::{self, Phase},
    executor::{ExecutionError, Executor},
    lexer::{ShellTokenizer, Tokenizer},
    parser::{CommandParser, ShellParser},
    validator::{SemanticValidator, ShellValidator},
};

/// Outcome of analyzing one input.
///
/// `is_valid` implies `errors` is empty; a failed analysis always carries at
/// least one error and names the failing `phase`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Parsed command; absent when tokenizing or recognizing the command failed
    pub command: Option<Command>,
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Tokens excluding EOF; unknown after a lexical failure
    pub token_count: Option<usize>,
    /// Empty when not applicable
    pub suggested_fix: String,
    pub phase: Option<Phase>,
    /// Present only when execution ran and succeeded
    pub execution_result: Option<serde_json::Value>,
    /// Present only when execution ran and failed
    pub execution_error: Option<ExecutionError>,
}

impl AnalysisResult {
    fn failure(phase: Phase, message: impl std::fmt::Display, suggested_fix: &str) -> Self {
        AnalysisResult {
            is_valid: false,
            errors: vec![format!("{}{}", phase.error_prefix(), message)],
            suggested_fix: suggested_fix.to_string(),
            phase: Some(phase),
            ..Default::default()
        }
    }
}

/// Sequences the analysis phases over injected capabilities.
///
/// Holds no per-call state: one instance can analyze from many threads.
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    parser: Box<dyn CommandParser>,
    validator: Box<dyn SemanticValidator>,
    executor: Option<Arc<dyn Executor>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(
            Box::new(ShellTokenizer),
            Box::new(ShellParser),
            Box::new(ShellValidator),
            None,
        )
    }
}

impl Analyzer {
    pub fn new(
        tokenizer: Box<dyn Tokenizer>,
        parser: Box<dyn CommandParser>,
        validator: Box<dyn SemanticValidator>,
        executor: Option<Arc<dyn Executor>>,
    ) -> Self {
        Analyzer {
            tokenizer,
            parser,
            validator,
            executor,
        }
    }

    /// Shell pipeline that hands valid commands to `executor`.
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Analyzer {
            executor: Some(executor),
            ..Self::default()
        }
    }

    /// Runs every phase until the first failure.
    ///
    /// Execution problems are reported in the result but leave it valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use mongo_analyzer::{Analyzer, CommandKind};
    ///
    /// let result = Analyzer::default().analyze("use tienda");
    /// assert!(result.is_valid);
    /// assert_eq!(result.token_count, Some(2));
    /// assert_eq!(result.command.unwrap().kind(), Some(CommandKind::SelectDatabase));
    /// ```
    pub fn analyze(&self, input: &str) -> AnalysisResult {
        let tokens = match self.tokenizer.tokenize(input) {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!(error = %e, "lexical analysis failed");
                let message = e.to_string();
                return AnalysisResult::failure(
                    Phase::Lexical,
                    &message,
                    diagnostics::lexical_fix(&message),
                );
            }
        };
        let token_count = tokens.len().saturating_sub(1);
        debug!(token_count, "tokenized input");

        let command = match self.parser.parse(&tokens) {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, "command not recognized");
                let message = e.to_string();
                return AnalysisResult {
                    token_count: Some(token_count),
                    ..AnalysisResult::failure(
                        Phase::Syntactic,
                        &message,
                        diagnostics::syntactic_fix(&message),
                    )
                };
            }
        };

        if !command.is_valid() {
            debug!(errors = ?command.errors, "syntactic analysis failed");
            let suggested_fix = diagnostics::syntactic_fix_from_errors(&command.errors);
            // A parser that reports invalid without saying why still fails loudly.
            let errors = if command.errors.is_empty() {
                vec![format!(
                    "{}{}",
                    Phase::Syntactic.error_prefix(),
                    suggested_fix
                )]
            } else {
                command.errors.clone()
            };
            return AnalysisResult {
                token_count: Some(command.token_count),
                errors,
                is_valid: false,
                suggested_fix: suggested_fix.to_string(),
                phase: Some(Phase::Syntactic),
                command: Some(command),
                ..Default::default()
            };
        }

        if let Err(e) = self.validator.validate_semantics(&command) {
            debug!(error = %e, "semantic analysis failed");
            let message = e.to_string();
            return AnalysisResult {
                token_count: Some(command.token_count),
                command: Some(command),
                ..AnalysisResult::failure(
                    Phase::Semantic,
                    &message,
                    diagnostics::semantic_fix(&message),
                )
            };
        }

        let (execution_result, execution_error) = match &self.executor {
            Some(executor) => match executor.execute(&command) {
                Ok(result) => (Some(result), None),
                Err(e) => {
                    warn!(error = %e, "execution failed");
                    (None, Some(e))
                }
            },
            None => (None, None),
        };

        AnalysisResult {
            token_count: Some(command.token_count),
            command: Some(command),
            is_valid: true,
            execution_result,
            execution_error,
            ..Default::default()
        }
    }
}
