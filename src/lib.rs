pub mod analyzer;
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod diagnostics;
pub mod executor;
pub mod lexer;
pub mod output;
pub mod parser;
#[cfg(feature = "server")]
pub mod server;
pub mod validator;
pub mod value;

pub use analyzer::{AnalysisResult, Analyzer};
pub use ast::{Command, CommandKind, Operation, Token, TokenKind};
pub use diagnostics::Phase;
pub use executor::{ExecutionError, Executor, MemoryExecutor};
pub use lexer::{LexError, Lexer, Position, ShellTokenizer, Tokenizer};
pub use output::{AnalysisResponse, AnalyzeRequest};
pub use parser::{CommandParser, DocumentError, ParseError, Parser, ShellParser};
pub use validator::{SemanticError, SemanticValidator, ShellValidator};
pub use value::{Document, Value};
