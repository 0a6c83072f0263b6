//! Documentation content for the mongo-analyzer CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Commands,
    Documents,
    Diagnostics,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "commands" | "command" | "cmd" => Some(Self::Commands),
            "documents" | "document" | "docs" => Some(Self::Documents),
            "diagnostics" | "errors" | "fixes" => Some(Self::Diagnostics),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MONGO-ANALYZER DOCUMENTATION

mongo-analyzer checks MongoDB shell commands in three phases (lexical,
syntactic, semantic) and, on request, runs valid commands against an
in-memory document store.

DOCUMENTATION CATEGORIES

  commands          The eight supported command shapes
  documents         Document literal syntax: keys, values, operators
  diagnostics       Error phases, messages and suggested fixes

QUICK REFERENCE

  use <db>                              Select a database
  db.createCollection("<name>")         Create a collection
  db.<coll>.insertOne({ ... })          Insert one document
  db.<coll>.find({ ... })               Find documents (filter optional)
  db.<coll>.updateOne({ ... }, { ... }) Update the first match
  db.<coll>.deleteOne({ ... })          Delete the first match
  db.<coll>.drop()                      Drop a collection
  db.dropDatabase()                     Drop the selected database

Run 'mongo-analyzer doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Commands) => Ok(COMMANDS_DOC),
        Some(DocCategory::Documents) => Ok(DOCUMENTS_DOC),
        Some(DocCategory::Diagnostics) => Ok(DIAGNOSTICS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const COMMANDS_DOC: &str = r#"COMMANDS - Supported Shapes

SELECT DATABASE
  use <name>
    Selects the database used by the following collection commands.

    Constraints:
      - Name must not be empty or longer than 64 bytes
      - Name must not contain / \ . space " $ < > : | ? *

  use <name> db.dropDatabase()
    Drops <name> instead of selecting it.

CREATE COLLECTION
  db.createCollection("<name>")
    The name is a quoted string and must not start with '$'.

INSERT
  db.<coll>.insertOne({ nombre: "ana", edad: 30 })

    Constraints:
      - Document must have at least one field
      - Keys must not be empty or start with '$'

FIND
  db.<coll>.find()
  db.<coll>.find({ edad: { $gte: 18 } })
    Without a filter every document matches.

UPDATE
  db.<coll>.updateOne({ nombre: "ana" }, { $set: { edad: 31 } })

    Constraints:
      - Filter and update must not be empty
      - Update needs one of $set, $unset, $inc, $push, $pull

DELETE
  db.<coll>.deleteOne({ nombre: "ana" })
    Filter must not be empty.

DROP
  db.<coll>.drop()
  db.dropDatabase()
    dropDatabase without 'use <name>' in front drops the selected database.
"#;

const DOCUMENTS_DOC: &str = r#"DOCUMENTS - Literal Syntax

KEYS
  "quoted key"      Any text between double quotes (no escapes)
  bare_key          Letters, digits and underscores
  $operator         '$' followed by an identifier

VALUES
  "text"            String
  42                Integer
  3.14              Float (any number with a decimal point)
  { ... }           Nested document
  bare_word         String (unquoted field reference)
  $campo            Operator string

  Example:
    { nombre: "ana", edad: 30, direccion: { ciudad: Lima } }

QUERY OPERATORS (find, updateOne, deleteOne filters)
  $eq $ne $gt $gte $lt $lte

  Example:
    db.usuarios.find({ edad: { $gt: 18, $lte: 65 } })

UPDATE OPERATORS
  $set      Set fields (dotted paths create nested documents)
  $unset    Remove fields
  $inc      Add to numeric fields
  $push     Append to an array field
  $pull     Remove matching elements from an array field

  Constraints:
    - Duplicate keys keep the last value
    - Numbers like 1.2.3 are rejected when the document is parsed
    - Documents nest at most 100 levels deep
"#;

const DIAGNOSTICS_DOC: &str = r#"DIAGNOSTICS - Phases and Suggested Fixes

Analysis stops at the first failing phase and reports one error with a
suggested fix. Messages are in Spanish.

LEXICAL
  Unknown characters and unterminated strings.

    Input:  db.x.find({a:"b})
    Error:  Error léxico: token inválido en posición 13: cadena sin cerrar '"b})'

SYNTACTIC
  Commands that do not match one of the supported shapes.

    Input:  db.usuarios.find(
    Error:  Se esperaba ')' después de find
    Fix:    Cierra los paréntesis: funcion(...)

SEMANTIC
  Well-formed commands that break a naming or document rule.

    Input:  db.x.updateOne({a:1},{b:2})
    Error:  Error semántico: la actualización debe contener al menos un operador válido ($set, $unset, $inc, etc.)
    Fix:    Usa operadores como $set: { $set: { campo: nuevoValor } }

EXECUTION
  Problems running a valid command (for example no selected database) are
  reported as execution_error; the analysis stays valid.
"#;
