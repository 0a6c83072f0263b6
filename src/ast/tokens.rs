use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    /// The `use` keyword that selects a database
    ///
    /// # Examples
    /// ```text
    /// use tienda
    /// ```
    Use,

    /// The `db` keyword, handle to the selected database
    ///
    /// # Examples
    /// ```text
    /// db.usuarios.find()
    /// db.createCollection("logs")
    /// ```
    Db,

    // Names
    /// Database, collection or field name
    ///
    /// Must start with a letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// usuarios
    /// item_count
    /// _internal
    /// ```
    Identifier,

    /// One of the recognized shell functions
    ///
    /// `createCollection`, `insertOne`, `find`, `updateOne`, `deleteOne`,
    /// `drop` and `dropDatabase`. Any other name is an [`TokenKind::Identifier`].
    Function,

    // Literals
    /// String literal enclosed in double quotes, taken verbatim (no escapes)
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "item #1"
    /// ```
    String,

    /// Numeric literal made of digits and dots
    ///
    /// The lexer does not check the shape: `1.2.3` is a single NUMBER token
    /// and only fails when the parser converts it.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Number,

    // Punctuation
    /// Member access: `db.users`
    Dot,

    /// Left parenthesis opening an argument list
    LeftParen,

    /// Right parenthesis
    RightParen,

    /// Left brace opening a document
    LeftBrace,

    /// Right brace
    RightBrace,

    /// Separates arguments and document entries
    Comma,

    /// Separates a document key from its value
    Colon,

    /// Operator prefix
    ///
    /// # Examples
    /// ```text
    /// { $set: { edad: 31 } }
    /// ```
    DollarSign,

    /// End of input, always the last token of a stream
    Eof,

    /// Unrecognized character; never survives tokenization
    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Use => "USE",
            TokenKind::Db => "DB",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Function => "FUNCTION",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Dot => "DOT",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Colon => "COLON",
            TokenKind::DollarSign => "DOLLAR_SIGN",
            TokenKind::Eof => "EOF",
            TokenKind::Invalid => "INVALID",
        };
        f.write_str(name)
    }
}

/// A single lexeme with its location in the (trimmed) input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text; for strings this is the content without the quotes
    pub lexeme: String,
    /// Byte offset of the first character
    pub position: usize,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        position: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
            line,
            column,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for the FUNCTION token with the given name.
    pub fn is_function(&self, name: &str) -> bool {
        self.kind == TokenKind::Function && self.lexeme == name
    }
}
