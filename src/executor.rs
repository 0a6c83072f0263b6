//! Execution capability: runs validated commands against a document store.
//!
//! The analyzer only sees the [`Executor`] trait. The bundled
//! [`MemoryExecutor`] keeps everything in process and owns the "currently
//! selected database" that `use <db>` changes.

pub mod memory;
pub mod path;
pub mod query;

pub use memory::MemoryExecutor;

use thiserror::Error;

use crate::ast::Command;

/// Errors raised while executing an already validated command.
///
/// They never invalidate the analysis; the analyzer reports them next to a
/// valid result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("no hay conexión a la base de datos")]
    NotConnected,

    #[error("no se puede ejecutar un comando inválido")]
    InvalidCommand,

    #[error("no hay base de datos seleccionada. Usa 'use nombreDB' primero")]
    NoDatabaseSelected,

    #[error(
        "no hay base de datos especificada o seleccionada. Usa 'use nombreDB' primero o especifica la base de datos"
    )]
    NoDatabaseToDrop,

    #[error("la colección '{0}' ya existe")]
    CollectionExists(String),

    #[error("ya existe un documento con _id {0}")]
    DuplicateId(String),

    #[error("operador de consulta no soportado: {0}")]
    UnsupportedQueryOperator(String),

    #[error("operador de actualización no soportado: {0}")]
    UnsupportedUpdateOperator(String),

    #[error("error en la actualización: {0}")]
    Update(String),

    #[error("el almacén de documentos no está disponible")]
    StoreUnavailable,
}

/// Document-store capability injected into the analyzer.
pub trait Executor: Send + Sync {
    /// Establish connectivity. Calling it again is harmless.
    fn connect(&self) -> Result<(), ExecutionError>;

    /// Run a validated command and describe the outcome as JSON.
    fn execute(&self, command: &Command) -> Result<serde_json::Value, ExecutionError>;

    /// Release connectivity; fine to call without a prior `connect`.
    fn close(&self) -> Result<(), ExecutionError>;
}
