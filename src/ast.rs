//! # Shell Command Syntax Tree
//!
//! Types shared by the analysis phases of the MongoDB shell subset.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[command]** - Parsed commands: one [`Operation`] per supported shape
//!
//! Document literals are described by [`crate::value`].
//!
//! ## Supported Shapes
//!
//! ```text
//! use <db>
//! use <db> db.dropDatabase()
//! db.createCollection("<name>")
//! db.dropDatabase()
//! db.<coll>.insertOne({ ... })
//! db.<coll>.find({ ... }?)
//! db.<coll>.updateOne({ ... }, { ... })
//! db.<coll>.deleteOne({ ... })
//! db.<coll>.drop()
//! ```
//!
//! ## Document Literals
//!
//! Keys may be quoted strings, bare identifiers or `$`-prefixed operators;
//! values may be strings, numbers, nested documents, bare identifiers or
//! `$`-prefixed operator strings:
//!
//! ```text
//! { "nombre": "ana", edad: 30, $set: { activo: si }, ref: $campo }
//! ```
pub mod command;
pub mod tokens;

pub use command::{Command, CommandKind, Operation};
pub use tokens::{Token, TokenKind};
