//! Semantic checks on syntactically valid commands.
//!
//! Only the first violated rule is reported. Commands without a rule
//! (`find`, `drop`, `dropDatabase`) always pass.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{
    ast::{Command, Operation},
    value::Document,
};

/// Update operators accepted by `updateOne`.
pub const UPDATE_OPERATORS: [&str; 5] = ["$set", "$unset", "$inc", "$push", "$pull"];

/// Longest accepted database name, in bytes.
pub const MAX_DATABASE_NAME_LEN: usize = 64;

static INVALID_DATABASE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\. "$<>:|?*]"#).expect("static pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("comando sintácticamente inválido")]
    SyntacticallyInvalid,

    #[error("el nombre de la base de datos no puede estar vacío")]
    EmptyDatabaseName,

    #[error("el nombre de la base de datos contiene caracteres inválidos")]
    InvalidDatabaseName,

    #[error("el nombre de la base de datos es demasiado largo (máximo 64 caracteres)")]
    DatabaseNameTooLong,

    #[error("el nombre de la colección no puede estar vacío")]
    EmptyCollectionName,

    #[error("el nombre de la colección no puede comenzar con '$'")]
    CollectionNameStartsWithDollar,

    #[error("el documento a insertar no puede estar vacío")]
    EmptyInsertDocument,

    #[error("las claves del documento no pueden estar vacías")]
    EmptyDocumentKey,

    #[error("las claves del documento no pueden comenzar con '$'")]
    OperatorDocumentKey,

    #[error("el filtro de actualización no puede estar vacío")]
    EmptyUpdateFilter,

    #[error("la actualización no puede estar vacía")]
    EmptyUpdate,

    #[error("la actualización debe contener al menos un operador válido ($set, $unset, $inc, etc.)")]
    MissingUpdateOperator,

    #[error("el filtro de eliminación no puede estar vacío")]
    EmptyDeleteFilter,
}

/// Semantic validation capability used by the analyzer.
pub trait SemanticValidator: Send + Sync {
    fn validate_semantics(&self, command: &Command) -> Result<(), SemanticError>;
}

/// MongoDB naming and document rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellValidator;

impl SemanticValidator for ShellValidator {
    fn validate_semantics(&self, command: &Command) -> Result<(), SemanticError> {
        let Some(operation) = command.operation.as_ref().filter(|_| command.is_valid()) else {
            return Err(SemanticError::SyntacticallyInvalid);
        };

        match operation {
            Operation::SelectDatabase { database } => validate_database_name(database),
            Operation::CreateCollection { collection } => validate_collection_name(collection),
            Operation::InsertOne { document, .. } => validate_insert_document(document),
            Operation::UpdateOne { filter, update, .. } => validate_update(filter, update),
            Operation::DeleteOne { filter, .. } => validate_delete(filter),
            Operation::Find { .. }
            | Operation::DropCollection { .. }
            | Operation::DropDatabase { .. } => Ok(()),
        }
    }
}

pub fn validate_database_name(name: &str) -> Result<(), SemanticError> {
    if name.is_empty() {
        return Err(SemanticError::EmptyDatabaseName);
    }
    if INVALID_DATABASE_CHARS.is_match(name) {
        return Err(SemanticError::InvalidDatabaseName);
    }
    if name.len() > MAX_DATABASE_NAME_LEN {
        return Err(SemanticError::DatabaseNameTooLong);
    }
    Ok(())
}

pub fn validate_collection_name(name: &str) -> Result<(), SemanticError> {
    if name.is_empty() {
        return Err(SemanticError::EmptyCollectionName);
    }
    if name.starts_with('$') {
        return Err(SemanticError::CollectionNameStartsWithDollar);
    }
    Ok(())
}

fn validate_insert_document(document: &Document) -> Result<(), SemanticError> {
    if document.is_empty() {
        return Err(SemanticError::EmptyInsertDocument);
    }

    for key in document.keys() {
        if key.is_empty() {
            return Err(SemanticError::EmptyDocumentKey);
        }
        if key.starts_with('$') {
            return Err(SemanticError::OperatorDocumentKey);
        }
    }
    Ok(())
}

/// Other keys next to a known operator are left to the executor.
fn validate_update(filter: &Document, update: &Document) -> Result<(), SemanticError> {
    if filter.is_empty() {
        return Err(SemanticError::EmptyUpdateFilter);
    }
    if update.is_empty() {
        return Err(SemanticError::EmptyUpdate);
    }
    if !update
        .keys()
        .any(|key| UPDATE_OPERATORS.contains(&key.as_str()))
    {
        return Err(SemanticError::MissingUpdateOperator);
    }
    Ok(())
}

fn validate_delete(filter: &Document) -> Result<(), SemanticError> {
    if filter.is_empty() {
        return Err(SemanticError::EmptyDeleteFilter);
    }
    Ok(())
}
