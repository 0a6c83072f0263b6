use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Shell functions recognized as FUNCTION tokens.
pub const FUNCTIONS: [&str; 7] = [
    "createCollection",
    "insertOne",
    "find",
    "updateOne",
    "deleteOne",
    "drop",
    "dropDatabase",
];

/// Tokenization failure. The first invalid token aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("token inválido en posición {position}: '{character}'")]
    InvalidCharacter { character: char, position: usize },

    /// Input ended before the closing quote of the string starting at `position`.
    #[error("token inválido en posición {position}: cadena sin cerrar '\"{content}'")]
    UnterminatedString { content: String, position: usize },
}

impl LexError {
    /// Byte offset of the offending token
    pub fn position(&self) -> usize {
        match self {
            LexError::InvalidCharacter { position, .. }
            | LexError::UnterminatedString { position, .. } => *position,
        }
    }
}

/// Source location of the scan cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// Single-use scanner over one input.
///
/// The input is trimmed before scanning, so offsets are relative to the
/// trimmed text.
pub struct Lexer {
    input: Vec<char>,
    index: usize,
    cursor: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.trim().chars().collect(),
            index: 0,
            cursor: Position::default(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.index).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.index += 1;
            self.cursor.offset += ch.len_utf8();
            if ch == '\n' {
                self.cursor.line += 1;
                self.cursor.column = 1;
            } else {
                self.cursor.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn token(&self, kind: TokenKind, lexeme: impl Into<String>, start: Position) -> Token {
        Token::new(kind, lexeme, start.offset, start.line, start.column)
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if accept(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// No escape processing: everything up to the next quote is content.
    fn read_string(&mut self, start: Position) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let content = self.read_while(|ch| ch != '"');

        if self.current_char().is_none() {
            return Err(LexError::UnterminatedString {
                content,
                position: start.offset,
            });
        }

        self.advance(); // closing quote
        Ok(self.token(TokenKind::String, content, start))
    }

    /// Accepts any run of digits and dots; `1.2.3` fails later, at conversion.
    fn read_number(&mut self, start: Position) -> Token {
        let number = self.read_while(|ch| ch.is_ascii_digit() || ch == '.');
        self.token(TokenKind::Number, number, start)
    }

    fn read_identifier(&mut self, start: Position) -> Token {
        let ident = self.read_while(|ch| ch.is_alphanumeric() || ch == '_');

        let kind = match ident.as_str() {
            "use" => TokenKind::Use,
            "db" => TokenKind::Db,
            name if FUNCTIONS.contains(&name) => TokenKind::Function,
            _ => TokenKind::Identifier,
        };
        self.token(kind, ident, start)
    }

    /// Scans the next token; returns EOF once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.cursor;

        let Some(ch) = self.current_char() else {
            return Ok(self.token(TokenKind::Eof, "", start));
        };

        let punctuation = match ch {
            '.' => Some(TokenKind::Dot),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            '{' => Some(TokenKind::LeftBrace),
            '}' => Some(TokenKind::RightBrace),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '$' => Some(TokenKind::DollarSign),
            _ => None,
        };

        if let Some(kind) = punctuation {
            self.advance();
            return Ok(self.token(kind, ch, start));
        }

        match ch {
            '"' => self.read_string(start),
            c if c.is_ascii_digit() => Ok(self.read_number(start)),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier(start)),
            c => Err(LexError::InvalidCharacter {
                character: c,
                position: start.offset,
            }),
        }
    }

    /// Scans the whole input into an EOF-terminated token list.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Tokenization capability used by the analyzer.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError>;
}

/// Tokenizer for the MongoDB shell subset; a fresh [`Lexer`] per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellTokenizer;

impl Tokenizer for ShellTokenizer {
    fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(input).tokenize()
    }
}
