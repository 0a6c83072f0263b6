use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Command, Operation, Token, TokenKind},
    value::{Document, Value},
};

/// Hard parse failure: the input is not shaped like any supported command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("comando no reconocido: {lexeme}")]
    UnrecognizedCommand { lexeme: String, position: usize },
}

/// Structural failure inside a document literal.
///
/// Never escapes the parser: the caller turns it into an invalid [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Se esperaba '{{' al inicio del documento")]
    ExpectedOpenBrace,

    #[error("Se esperaba identificador después de '$'")]
    ExpectedOperatorName,

    #[error("Se esperaba string, identificador o operador $ como clave")]
    InvalidKey,

    #[error("Se esperaba ':' después de la clave")]
    ExpectedColon,

    #[error("Se esperaba ',' o '}}' en el documento")]
    ExpectedSeparator,

    #[error("valor no válido: {0}")]
    InvalidValue(String),

    #[error("número inválido: '{0}'")]
    InvalidNumber(String),

    #[error("Se esperaba documento con anidamiento máximo de {0} niveles")]
    TooDeep(usize),
}

/// Deepest accepted nesting of document literals; the outermost counts as 1.
pub const MAX_DOCUMENT_DEPTH: usize = 100;

/// Outcome of one grammar production: a command (valid or not) or, for
/// documents, a structural error.
type Production = Result<Command, String>;

/// Single-use recursive-descent cursor over one token stream.
///
/// Only moves forward; never steps past the final token.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    /// Documents currently open
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn lexeme(&self) -> &'a str {
        self.current().map(|t| t.lexeme.as_str()).unwrap_or("")
    }

    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Consumes a token of `kind`, or fails with `message`.
    fn expect(&mut self, kind: TokenKind, message: impl Into<String>) -> Result<(), String> {
        if !self.check(kind) {
            return Err(message.into());
        }
        self.advance();
        Ok(())
    }

    /// Parses a complete command.
    ///
    /// Every result carries the token count (EOF excluded). Only an
    /// unrecognized leading token is a hard error.
    pub fn parse(&mut self) -> Result<Command, ParseError> {
        let token_count = self
            .tokens
            .iter()
            .filter(|t| !t.is(TokenKind::Eof))
            .count();

        let command = match self.current().map(|t| t.kind) {
            Some(TokenKind::Use) => self.parse_use_command(),
            Some(TokenKind::Db) => self.parse_db_command(),
            _ => {
                return Err(ParseError::UnrecognizedCommand {
                    lexeme: self.lexeme().to_string(),
                    position: self.current().map(|t| t.position).unwrap_or(0),
                });
            }
        };

        let command = command.unwrap_or_else(Command::invalid);
        debug!(
            valid = command.is_valid(),
            token_count, "parsed command"
        );
        Ok(command.with_token_count(token_count))
    }

    /// `use <name>`, or `use <name> db.dropDatabase` targeting `<name>`.
    fn parse_use_command(&mut self) -> Production {
        self.advance(); // use

        if !self.check(TokenKind::Identifier) {
            return Err("Se esperaba nombre de base de datos después de 'use'".into());
        }
        let database = self.lexeme().to_string();
        self.advance();

        if self.check(TokenKind::Db) {
            self.advance();
            if self.check(TokenKind::Dot) {
                self.advance();
                if self.current().is_some_and(|t| t.is_function("dropDatabase")) {
                    return Ok(Command::valid(Operation::DropDatabase {
                        database: Some(database),
                    }));
                }
            }
        }

        Ok(Command::valid(Operation::SelectDatabase { database }))
    }

    fn parse_db_command(&mut self) -> Production {
        self.advance(); // db
        self.expect(TokenKind::Dot, "Se esperaba '.' después de 'db'")?;

        if self.check(TokenKind::Function) {
            return match self.lexeme() {
                "createCollection" => self.parse_create_collection(),
                "dropDatabase" => self.parse_drop_database(),
                other => Err(format!("Función no reconocida: {}", other)),
            };
        }

        if !self.check(TokenKind::Identifier) {
            return Err("Comando db inválido".into());
        }
        let collection = self.lexeme().to_string();
        self.advance();

        self.expect(
            TokenKind::Dot,
            "Se esperaba '.' después del nombre de la colección",
        )?;

        if !self.check(TokenKind::Function) {
            return Err("Se esperaba función después de '.'".into());
        }

        match self.lexeme() {
            "insertOne" => self.parse_insert_one(collection),
            "find" => self.parse_find(collection),
            "updateOne" => self.parse_update_one(collection),
            "deleteOne" => self.parse_delete_one(collection),
            "drop" => self.parse_drop(collection),
            other => Err(format!("Función no reconocida: {}", other)),
        }
    }

    /// Consumes the function name and the `(` that must follow it.
    fn open_call(&mut self) -> Result<(), String> {
        let name = self.lexeme();
        self.advance();
        self.expect(
            TokenKind::LeftParen,
            format!("Se esperaba '(' después de {}", name),
        )
    }

    fn close_call(&mut self, message: &str) -> Result<(), String> {
        self.expect(TokenKind::RightParen, message)
    }

    fn parse_create_collection(&mut self) -> Production {
        self.open_call()?;

        if !self.check(TokenKind::String) {
            return Err("Se esperaba nombre de colección como string".into());
        }
        let collection = self.lexeme().to_string();
        self.advance();

        self.close_call("Se esperaba ')' después del nombre de la colección")?;
        Ok(Command::valid(Operation::CreateCollection { collection }))
    }

    fn parse_drop_database(&mut self) -> Production {
        self.open_call()?;
        self.close_call("Se esperaba ')' después de dropDatabase")?;
        Ok(Command::valid(Operation::DropDatabase { database: None }))
    }

    fn parse_insert_one(&mut self, collection: String) -> Production {
        self.open_call()?;
        let document = self.parse_document().map_err(|e| e.to_string())?;
        self.close_call("Se esperaba ')' después del documento")?;
        Ok(Command::valid(Operation::InsertOne {
            collection,
            document,
        }))
    }

    fn parse_find(&mut self, collection: String) -> Production {
        self.open_call()?;

        let filter = if self.check(TokenKind::LeftBrace) {
            Some(self.parse_document().map_err(|e| e.to_string())?)
        } else {
            None
        };

        self.close_call("Se esperaba ')' después de find")?;
        Ok(Command::valid(Operation::Find { collection, filter }))
    }

    fn parse_update_one(&mut self, collection: String) -> Production {
        self.open_call()?;

        let filter = self
            .parse_document()
            .map_err(|e| format!("Error en filtro: {}", e))?;

        self.expect(
            TokenKind::Comma,
            "Se esperaba ',' entre filtro y actualización",
        )?;

        let update = self
            .parse_document()
            .map_err(|e| format!("Error en actualización: {}", e))?;

        self.close_call("Se esperaba ')' después de updateOne")?;
        Ok(Command::valid(Operation::UpdateOne {
            collection,
            filter,
            update,
        }))
    }

    fn parse_delete_one(&mut self, collection: String) -> Production {
        self.open_call()?;
        let filter = self.parse_document().map_err(|e| e.to_string())?;
        self.close_call("Se esperaba ')' después del filtro")?;
        Ok(Command::valid(Operation::DeleteOne { collection, filter }))
    }

    fn parse_drop(&mut self, collection: String) -> Production {
        self.open_call()?;
        self.close_call("Se esperaba ')' después de drop")?;
        Ok(Command::valid(Operation::DropCollection { collection }))
    }

    /// `$` IDENTIFIER, yielding the `$`-prefixed name.
    fn parse_operator_name(&mut self) -> Result<String, DocumentError> {
        self.advance(); // $
        if !self.check(TokenKind::Identifier) {
            return Err(DocumentError::ExpectedOperatorName);
        }
        let name = format!("${}", self.lexeme());
        self.advance();
        Ok(name)
    }

    fn parse_key(&mut self) -> Result<String, DocumentError> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::String | TokenKind::Identifier) => {
                let key = self.lexeme().to_string();
                self.advance();
                Ok(key)
            }
            Some(TokenKind::DollarSign) => self.parse_operator_name(),
            _ => Err(DocumentError::InvalidKey),
        }
    }

    /// Parses `{ key: value, ... }`. Duplicate keys keep the last value.
    ///
    /// Nesting deeper than [`MAX_DOCUMENT_DEPTH`] is rejected.
    pub fn parse_document(&mut self) -> Result<Document, DocumentError> {
        if !self.check(TokenKind::LeftBrace) {
            return Err(DocumentError::ExpectedOpenBrace);
        }
        if self.depth >= MAX_DOCUMENT_DEPTH {
            return Err(DocumentError::TooDeep(MAX_DOCUMENT_DEPTH));
        }

        self.depth += 1;
        let document = self.parse_document_body();
        self.depth -= 1;
        document
    }

    fn parse_document_body(&mut self) -> Result<Document, DocumentError> {
        self.advance(); // {

        let mut document = Document::new();

        if self.check(TokenKind::RightBrace) {
            self.advance();
            return Ok(document);
        }

        loop {
            let key = self.parse_key()?;

            if !self.check(TokenKind::Colon) {
                return Err(DocumentError::ExpectedColon);
            }
            self.advance();

            let value = self.parse_value()?;
            document.insert(key, value);

            if self.check(TokenKind::RightBrace) {
                self.advance();
                return Ok(document);
            }

            if !self.check(TokenKind::Comma) {
                return Err(DocumentError::ExpectedSeparator);
            }
            self.advance();
        }
    }

    pub fn parse_value(&mut self) -> Result<Value, DocumentError> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::String) => {
                let value = self.lexeme().to_string();
                self.advance();
                Ok(Value::String(value))
            }
            Some(TokenKind::Number) => {
                let lexeme = self.lexeme();
                self.advance();
                parse_number(lexeme)
            }
            Some(TokenKind::LeftBrace) => self.parse_document().map(Value::Document),
            // Bare field reference
            Some(TokenKind::Identifier) => {
                let value = self.lexeme().to_string();
                self.advance();
                Ok(Value::String(value))
            }
            Some(TokenKind::DollarSign) => self.parse_operator_name().map(Value::Operator),
            _ => Err(DocumentError::InvalidValue(self.lexeme().to_string())),
        }
    }
}

/// Integer unless the lexeme has a decimal point.
fn parse_number(lexeme: &str) -> Result<Value, DocumentError> {
    let invalid = || DocumentError::InvalidNumber(lexeme.to_string());
    if lexeme.contains('.') {
        lexeme.parse::<f64>().map(Value::Float).map_err(|_| invalid())
    } else {
        lexeme.parse::<i64>().map(Value::Integer).map_err(|_| invalid())
    }
}

/// Parsing capability used by the analyzer.
pub trait CommandParser: Send + Sync {
    fn parse(&self, tokens: &[Token]) -> Result<Command, ParseError>;
}

/// Parser for the MongoDB shell subset; a fresh [`Parser`] per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellParser;

impl CommandParser for ShellParser {
    fn parse(&self, tokens: &[Token]) -> Result<Command, ParseError> {
        Parser::new(tokens).parse()
    }
}
