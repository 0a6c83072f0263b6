// tests/analyzer_tests.rs

use std::sync::Arc;

use mongo_analyzer::ast::{Command, Operation};
use mongo_analyzer::executor::{ExecutionError, Executor, MemoryExecutor};
use mongo_analyzer::{Analyzer, CommandKind, Phase};
use pretty_assertions::assert_eq;
use serde_json::json;

fn analyze(input: &str) -> mongo_analyzer::AnalysisResult {
    Analyzer::default().analyze(input)
}

fn connected() -> Arc<MemoryExecutor> {
    let executor = Arc::new(MemoryExecutor::new());
    executor.connect().unwrap();
    executor
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_use_database() {
    let result = analyze("use tienda");
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.token_count, Some(2));
    assert_eq!(result.phase, None);

    let command = result.command.unwrap();
    assert_eq!(command.kind(), Some(CommandKind::SelectDatabase));
    assert_eq!(command.database(), Some("tienda"));
}

#[test]
fn test_empty_insert_is_semantic_failure() {
    let result = analyze("db.productos.insertOne({})");
    assert!(!result.is_valid);
    assert_eq!(result.phase, Some(Phase::Semantic));
    assert_eq!(
        result.errors,
        vec!["Error semántico: el documento a insertar no puede estar vacío"]
    );
    assert_eq!(
        result.suggested_fix,
        "El documento debe tener al menos un campo: { campo: valor }"
    );
    assert_eq!(result.token_count, Some(9));
    assert!(result.command.is_some());
}

#[test]
fn test_find_without_filter() {
    let result = analyze("db.usuarios.find()");
    assert!(result.is_valid);

    let command = result.command.unwrap();
    assert_eq!(command.kind(), Some(CommandKind::Find));
    assert_eq!(command.collection(), Some("usuarios"));
    assert_eq!(command.filter(), None);
}

#[test]
fn test_update_without_operator() {
    let result = analyze("db.x.updateOne({a:1},{b:2})");
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "Error semántico: la actualización debe contener al menos un operador válido ($set, $unset, $inc, etc.)"
        ]
    );
    assert_eq!(
        result.suggested_fix,
        "Usa operadores como $set: { $set: { campo: nuevoValor } }"
    );
}

#[test]
fn test_unterminated_string_is_lexical_failure() {
    let result = analyze(r#"db.x.find({a:"b})"#);
    assert!(!result.is_valid);
    assert_eq!(result.phase, Some(Phase::Lexical));
    assert_eq!(result.command, None);
    assert_eq!(result.token_count, None);
    assert_eq!(
        result.errors,
        vec![r#"Error léxico: token inválido en posición 13: cadena sin cerrar '"b})'"#]
    );
    assert_eq!(
        result.suggested_fix,
        "Verifica caracteres especiales. Ejemplo correcto: db.usuarios.find()"
    );
}

#[test]
fn test_use_then_drop_database() {
    let result = analyze("use s db.dropDatabase()");
    assert!(result.is_valid);
    assert_eq!(
        result.command.unwrap().operation,
        Some(Operation::DropDatabase {
            database: Some("s".into())
        })
    );
}

// ============================================================================
// Syntactic failures
// ============================================================================

#[test]
fn test_unrecognized_command() {
    let result = analyze("show dbs");
    assert!(!result.is_valid);
    assert_eq!(result.phase, Some(Phase::Syntactic));
    assert_eq!(result.command, None);
    assert_eq!(result.token_count, Some(2));
    assert_eq!(result.errors, vec!["Error sintáctico: comando no reconocido: show"]);
    assert_eq!(result.suggested_fix, "Revisa la sintaxis del comando MongoDB");
}

#[test]
fn test_soft_failure_keeps_command_errors() {
    let result = analyze("db.usuarios.find(");
    assert!(!result.is_valid);
    assert_eq!(result.phase, Some(Phase::Syntactic));
    assert_eq!(result.errors, vec!["Se esperaba ')' después de find"]);
    assert_eq!(result.suggested_fix, "Cierra los paréntesis: funcion(...)");
    assert_eq!(result.token_count, Some(6));
    assert!(result.command.is_some());
}

#[test]
fn test_runaway_nesting_is_a_syntax_error() {
    let input = format!(
        "db.x.insertOne({}1{})",
        "{a:".repeat(50_000),
        "}".repeat(50_000)
    );
    let result = analyze(&input);
    assert!(!result.is_valid);
    assert_eq!(result.phase, Some(Phase::Syntactic));
    assert_eq!(
        result.errors,
        vec!["Se esperaba documento con anidamiento máximo de 100 niveles"]
    );
    assert_eq!(result.suggested_fix, "Revisa la sintaxis del comando MongoDB");
}

#[test]
fn test_suggested_fixes_for_syntax() {
    let cases = [
        ("db usuarios", "Agrega un punto después de 'db': db.nombreColeccion.funcion()"),
        ("db.usuarios.find", "Agrega paréntesis después de la función: funcion()"),
        ("db.u.insertOne(x)", "Usa llaves para objetos: { campo: valor }"),
        ("db.usuarios.insertMany()", "Revisa la sintaxis del comando MongoDB"),
    ];

    for (input, expected) in cases {
        assert_eq!(analyze(input).suggested_fix, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_suggested_fixes_for_semantics() {
    let long_name = format!("use {}", "a".repeat(65));
    let cases = [
        (
            long_name.as_str(),
            "Usa un nombre válido para la base de datos (sin caracteres especiales)",
        ),
        (
            r#"db.createCollection("$x")"#,
            "Usa un nombre válido para la colección (no puede empezar con '$')",
        ),
        ("db.x.updateOne({}, {$set: {a: 1}})", "Especifica un filtro: { campo: valor }"),
        ("db.x.deleteOne({})", "Revisa la lógica del comando"),
    ];

    for (input, expected) in cases {
        assert_eq!(analyze(input).suggested_fix, expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_validity_matches_errors() {
    for input in [
        "use tienda",
        "use",
        "",
        "@",
        "db.x.find({a: 1})",
        "db.x.insertOne({})",
        "db.x.updateOne({a:1},{$set:{a:2}})",
        "db.x.drop(",
    ] {
        let result = analyze(input);
        assert_eq!(result.is_valid, result.errors.is_empty(), "Failed for input: {}", input);
        assert_eq!(result.is_valid, result.phase.is_none(), "Failed for input: {}", input);
    }
}

#[test]
fn test_token_count_matches_lexer() {
    use mongo_analyzer::lexer::Lexer;

    for input in [
        "use tienda",
        "db.x.find({a: {$gt: 1}})",
        "db.x.insertOne({})",
        "foo bar baz",
        "db.x.find(",
    ] {
        let expected = Lexer::new(input).tokenize().unwrap().len() - 1;
        assert_eq!(analyze(input).token_count, Some(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_analyzer_is_shareable_across_threads() {
    let analyzer = Arc::new(Analyzer::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || analyzer.analyze(&format!("use db{}", i)).is_valid)
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

// ============================================================================
// Execution
// ============================================================================

#[test]
fn test_no_executor_means_no_execution_fields() {
    let result = analyze("use tienda");
    assert_eq!(result.execution_result, None);
    assert_eq!(result.execution_error, None);
}

#[test]
fn test_valid_commands_are_executed() {
    let executor = connected();
    let analyzer = Analyzer::with_executor(executor.clone());

    analyzer.analyze("use tienda");
    let result = analyzer.analyze(r#"db.productos.insertOne({_id: 1, nombre: "pan"})"#);
    assert!(result.is_valid);
    assert_eq!(
        result.execution_result,
        Some(json!({
            "message": "Documento insertado exitosamente",
            "insertedId": 1,
            "collection": "productos",
            "database": "tienda",
        }))
    );
    assert_eq!(executor.collection_names("tienda"), vec!["productos"]);
}

#[test]
fn test_execution_error_keeps_result_valid() {
    let analyzer = Analyzer::with_executor(connected());
    let result = analyzer.analyze("db.usuarios.find()");
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.execution_result, None);
    assert_eq!(result.execution_error, Some(ExecutionError::NoDatabaseSelected));
}

#[test]
fn test_invalid_commands_are_not_executed() {
    let executor = connected();
    let analyzer = Analyzer::with_executor(executor.clone());
    let result = analyzer.analyze("db.x.insertOne({})");
    assert!(!result.is_valid);
    assert_eq!(result.execution_error, None);
    assert!(executor.database_names().is_empty());
}

#[test]
fn test_disconnected_executor_is_reported() {
    let analyzer = Analyzer::with_executor(Arc::new(MemoryExecutor::new()));
    let result = analyzer.analyze("use tienda");
    assert!(result.is_valid);
    assert_eq!(result.execution_error, Some(ExecutionError::NotConnected));
}

struct Recording(std::sync::Mutex<Vec<Command>>);

impl Executor for Recording {
    fn connect(&self) -> Result<(), ExecutionError> {
        Ok(())
    }

    fn execute(&self, command: &Command) -> Result<serde_json::Value, ExecutionError> {
        self.0.lock().unwrap().push(command.clone());
        Ok(json!({ "ok": true }))
    }

    fn close(&self) -> Result<(), ExecutionError> {
        Ok(())
    }
}

#[test]
fn test_custom_executor_receives_parsed_command() {
    let recording = Arc::new(Recording(std::sync::Mutex::new(Vec::new())));
    let analyzer = Analyzer::with_executor(recording.clone());

    let result = analyzer.analyze("db.x.drop()");
    assert_eq!(result.execution_result, Some(json!({ "ok": true })));

    let seen = recording.0.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].operation,
        Some(Operation::DropCollection {
            collection: "x".into()
        })
    );
}
