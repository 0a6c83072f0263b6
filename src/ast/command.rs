use std::fmt;

use crate::value::Document;

/// Tag naming one of the eight supported command shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SelectDatabase,
    CreateCollection,
    InsertOne,
    Find,
    UpdateOne,
    DeleteOne,
    DropCollection,
    DropDatabase,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::SelectDatabase => "USE_DATABASE",
            CommandKind::CreateCollection => "CREATE_COLLECTION",
            CommandKind::InsertOne => "INSERT_ONE",
            CommandKind::Find => "FIND",
            CommandKind::UpdateOne => "UPDATE_ONE",
            CommandKind::DeleteOne => "DELETE_ONE",
            CommandKind::DropCollection => "DROP_COLLECTION",
            CommandKind::DropDatabase => "DROP_DATABASE",
        };
        f.write_str(name)
    }
}

/// A recognized shell operation with the fields its shape requires.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Select a database
    ///
    /// # Example
    /// ```text
    /// use tienda
    /// ```
    SelectDatabase { database: String },

    /// Create a collection in the selected database
    ///
    /// # Example
    /// ```text
    /// db.createCollection("productos")
    /// ```
    CreateCollection { collection: String },

    /// Insert a single document
    ///
    /// # Example
    /// ```text
    /// db.productos.insertOne({ nombre: "mesa", precio: 120 })
    /// ```
    InsertOne {
        collection: String,
        document: Document,
    },

    /// Find documents, optionally filtered
    ///
    /// # Example
    /// ```text
    /// db.usuarios.find()
    /// db.usuarios.find({ edad: 30 })
    /// ```
    Find {
        collection: String,
        filter: Option<Document>,
    },

    /// Update the first document matching `filter`
    ///
    /// # Example
    /// ```text
    /// db.usuarios.updateOne({ nombre: "ana" }, { $set: { edad: 31 } })
    /// ```
    UpdateOne {
        collection: String,
        filter: Document,
        update: Document,
    },

    /// Delete the first document matching `filter`
    DeleteOne {
        collection: String,
        filter: Document,
    },

    /// Drop a collection
    DropCollection { collection: String },

    /// Drop a database
    ///
    /// `database` is only known for `use <name> db.dropDatabase()`; the bare
    /// `db.dropDatabase()` form leaves it to the executor's selected database.
    DropDatabase { database: Option<String> },
}

impl Operation {
    pub fn kind(&self) -> CommandKind {
        match self {
            Operation::SelectDatabase { .. } => CommandKind::SelectDatabase,
            Operation::CreateCollection { .. } => CommandKind::CreateCollection,
            Operation::InsertOne { .. } => CommandKind::InsertOne,
            Operation::Find { .. } => CommandKind::Find,
            Operation::UpdateOne { .. } => CommandKind::UpdateOne,
            Operation::DeleteOne { .. } => CommandKind::DeleteOne,
            Operation::DropCollection { .. } => CommandKind::DropCollection,
            Operation::DropDatabase { .. } => CommandKind::DropDatabase,
        }
    }
}

/// Output of the parser.
///
/// A command is either a recognized [`Operation`] or a list of syntax errors,
/// never both. `token_count` excludes the EOF sentinel and is set in both cases.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub operation: Option<Operation>,
    pub errors: Vec<String>,
    pub token_count: usize,
}

impl Command {
    pub fn valid(operation: Operation) -> Self {
        Command {
            operation: Some(operation),
            errors: Vec::new(),
            token_count: 0,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Command {
            operation: None,
            errors: vec![error.into()],
            token_count: 0,
        }
    }

    pub fn with_token_count(mut self, token_count: usize) -> Self {
        self.token_count = token_count;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.operation.is_some() && self.errors.is_empty()
    }

    pub fn kind(&self) -> Option<CommandKind> {
        self.operation.as_ref().map(Operation::kind)
    }

    pub fn database(&self) -> Option<&str> {
        match self.operation.as_ref()? {
            Operation::SelectDatabase { database } => Some(database),
            Operation::DropDatabase { database } => database.as_deref(),
            _ => None,
        }
    }

    pub fn collection(&self) -> Option<&str> {
        match self.operation.as_ref()? {
            Operation::CreateCollection { collection }
            | Operation::InsertOne { collection, .. }
            | Operation::Find { collection, .. }
            | Operation::UpdateOne { collection, .. }
            | Operation::DeleteOne { collection, .. }
            | Operation::DropCollection { collection } => Some(collection),
            Operation::SelectDatabase { .. } | Operation::DropDatabase { .. } => None,
        }
    }

    /// Document to insert (`insertOne` only)
    pub fn document(&self) -> Option<&Document> {
        match self.operation.as_ref()? {
            Operation::InsertOne { document, .. } => Some(document),
            _ => None,
        }
    }

    pub fn filter(&self) -> Option<&Document> {
        match self.operation.as_ref()? {
            Operation::Find { filter, .. } => filter.as_ref(),
            Operation::UpdateOne { filter, .. } | Operation::DeleteOne { filter, .. } => {
                Some(filter)
            }
            _ => None,
        }
    }

    pub fn update(&self) -> Option<&Document> {
        match self.operation.as_ref()? {
            Operation::UpdateOne { update, .. } => Some(update),
            _ => None,
        }
    }
}
