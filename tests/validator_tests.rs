// tests/validator_tests.rs

use mongo_analyzer::ast::{Command, Operation};
use mongo_analyzer::lexer::Lexer;
use mongo_analyzer::parser::Parser;
use mongo_analyzer::validator::{SemanticError, SemanticValidator, ShellValidator};
use pretty_assertions::assert_eq;

fn validate(input: &str) -> Result<(), SemanticError> {
    let tokens = Lexer::new(input).tokenize().unwrap();
    let command = Parser::new(&tokens).parse().unwrap();
    ShellValidator.validate_semantics(&command)
}

// ============================================================================
// Commands without rules
// ============================================================================

#[test]
fn test_unchecked_commands_pass() {
    for input in [
        "db.usuarios.find()",
        "db.usuarios.find({})",
        "db.usuarios.drop()",
        "db.dropDatabase()",
        "use x db.dropDatabase()",
    ] {
        assert_eq!(validate(input), Ok(()), "Failed for input: {}", input);
    }
}

#[test]
fn test_invalid_command_is_rejected() {
    let command = Command::invalid("Se esperaba '.' después de 'db'");
    assert_eq!(
        ShellValidator.validate_semantics(&command),
        Err(SemanticError::SyntacticallyInvalid)
    );
    assert_eq!(
        SemanticError::SyntacticallyInvalid.to_string(),
        "comando sintácticamente inválido"
    );
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_database_names() {
    assert_eq!(validate("use tienda"), Ok(()));
    assert_eq!(validate(&format!("use {}", "a".repeat(64))), Ok(()));
    assert_eq!(
        validate(&format!("use {}", "a".repeat(65))),
        Err(SemanticError::DatabaseNameTooLong)
    );
}

#[test]
fn test_database_name_is_checked_directly() {
    let command = Command::valid(Operation::SelectDatabase {
        database: String::new(),
    });
    assert_eq!(
        ShellValidator.validate_semantics(&command),
        Err(SemanticError::EmptyDatabaseName)
    );

    let command = Command::valid(Operation::SelectDatabase {
        database: "mi base".into(),
    });
    let err = ShellValidator.validate_semantics(&command).unwrap_err();
    assert_eq!(
        err.to_string(),
        "el nombre de la base de datos contiene caracteres inválidos"
    );
}

#[test]
fn test_collection_names() {
    assert_eq!(validate(r#"db.createCollection("clientes")"#), Ok(()));
    assert_eq!(
        validate(r#"db.createCollection("")"#),
        Err(SemanticError::EmptyCollectionName)
    );
    assert_eq!(
        validate(r#"db.createCollection("$clientes")"#),
        Err(SemanticError::CollectionNameStartsWithDollar)
    );
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_insert_document_rules() {
    assert_eq!(validate("db.p.insertOne({a: 1})"), Ok(()));
    assert_eq!(
        validate("db.p.insertOne({})"),
        Err(SemanticError::EmptyInsertDocument)
    );
    assert_eq!(
        validate(r#"db.p.insertOne({"": 1})"#),
        Err(SemanticError::EmptyDocumentKey)
    );
    assert_eq!(
        validate("db.p.insertOne({$set: 1})"),
        Err(SemanticError::OperatorDocumentKey)
    );
}

#[test]
fn test_update_rules() {
    assert_eq!(validate("db.x.updateOne({a: 1}, {$inc: {b: 2}})"), Ok(()));
    assert_eq!(
        validate("db.x.updateOne({}, {$set: {b: 2}})"),
        Err(SemanticError::EmptyUpdateFilter)
    );
    assert_eq!(
        validate("db.x.updateOne({a: 1}, {})"),
        Err(SemanticError::EmptyUpdate)
    );
    assert_eq!(
        validate("db.x.updateOne({a:1},{b:2})"),
        Err(SemanticError::MissingUpdateOperator)
    );
    assert_eq!(
        validate("db.x.updateOne({a: 1}, {$rename: {b: 2}})"),
        Err(SemanticError::MissingUpdateOperator)
    );
}

#[test]
fn test_any_known_operator_is_enough() {
    assert_eq!(validate("db.x.updateOne({a: 1}, {b: 2, $push: {c: 3}})"), Ok(()));
}

#[test]
fn test_delete_rules() {
    assert_eq!(validate("db.x.deleteOne({a: 1})"), Ok(()));
    assert_eq!(
        validate("db.x.deleteOne({})"),
        Err(SemanticError::EmptyDeleteFilter)
    );
}

#[test]
fn test_validation_is_repeatable() {
    let tokens = Lexer::new("db.x.updateOne({a:1},{b:2})").tokenize().unwrap();
    let command = Parser::new(&tokens).parse().unwrap();
    let first = ShellValidator.validate_semantics(&command);
    let second = ShellValidator.validate_semantics(&command);
    assert_eq!(first, second);
}
