use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use serde_json::{Map, Value as Json, json};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ExecutionError, Executor, query};
use crate::{
    ast::{Command, Operation},
    convert::document_to_json,
    value::Document,
};

type StoredDocument = Map<String, Json>;
type Collection = Vec<StoredDocument>;

#[derive(Debug, Default)]
struct Database {
    collections: BTreeMap<String, Collection>,
}

#[derive(Debug, Default)]
struct Store {
    connected: bool,
    /// Target of `use <db>`; collection commands run against it
    current_database: Option<String>,
    databases: BTreeMap<String, Database>,
}

impl Store {
    fn selected(&mut self) -> Result<(String, &mut Database), ExecutionError> {
        let name = self
            .current_database
            .clone()
            .ok_or(ExecutionError::NoDatabaseSelected)?;
        let database = self.databases.entry(name.clone()).or_default();
        Ok((name, database))
    }
}

/// In-process document store implementing [`Executor`].
///
/// Databases and collections are created on first use, like MongoDB does.
/// All state sits behind one mutex, so a single instance can serve
/// concurrent analyses.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    store: Mutex<Store>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Database selected by the last `use <db>`, if any.
    pub fn current_database(&self) -> Option<String> {
        self.lock().ok()?.current_database.clone()
    }

    /// Names of all existing databases
    pub fn database_names(&self) -> Vec<String> {
        self.lock()
            .map(|store| store.databases.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of the collections in `database`
    pub fn collection_names(&self, database: &str) -> Vec<String> {
        self.lock()
            .ok()
            .and_then(|store| {
                store
                    .databases
                    .get(database)
                    .map(|db| db.collections.keys().cloned().collect())
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ExecutionError> {
        self.store.lock().map_err(|_| ExecutionError::StoreUnavailable)
    }
}

impl Executor for MemoryExecutor {
    fn connect(&self) -> Result<(), ExecutionError> {
        let mut store = self.lock()?;
        if !store.connected {
            info!("in-memory document store connected");
            store.connected = true;
        }
        Ok(())
    }

    fn execute(&self, command: &Command) -> Result<Json, ExecutionError> {
        let mut store = self.lock()?;
        if !store.connected {
            return Err(ExecutionError::NotConnected);
        }

        let Some(operation) = command.operation.as_ref().filter(|_| command.is_valid()) else {
            return Err(ExecutionError::InvalidCommand);
        };
        debug!(kind = %operation.kind(), "executing command");

        match operation {
            Operation::SelectDatabase { database } => select_database(&mut store, database),
            Operation::CreateCollection { collection } => create_collection(&mut store, collection),
            Operation::InsertOne {
                collection,
                document,
            } => insert_one(&mut store, collection, document),
            Operation::Find { collection, filter } => find(&mut store, collection, filter.as_ref()),
            Operation::UpdateOne {
                collection,
                filter,
                update,
            } => update_one(&mut store, collection, filter, update),
            Operation::DeleteOne { collection, filter } => delete_one(&mut store, collection, filter),
            Operation::DropCollection { collection } => drop_collection(&mut store, collection),
            Operation::DropDatabase { database } => drop_database(&mut store, database.as_deref()),
        }
    }

    fn close(&self) -> Result<(), ExecutionError> {
        let mut store = self.lock()?;
        if store.connected {
            info!("in-memory document store closed");
            store.connected = false;
        }
        Ok(())
    }
}

fn select_database(store: &mut Store, database: &str) -> Result<Json, ExecutionError> {
    store.databases.entry(database.to_string()).or_default();
    store.current_database = Some(database.to_string());

    Ok(json!({
        "message": format!("Cambiado a base de datos '{}'", database),
        "database": database,
    }))
}

fn create_collection(store: &mut Store, collection: &str) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;
    if db.collections.contains_key(collection) {
        return Err(ExecutionError::CollectionExists(collection.to_string()));
    }
    db.collections.insert(collection.to_string(), Collection::new());

    Ok(json!({
        "message": format!("Colección '{}' creada exitosamente", collection),
        "collection": collection,
        "database": database,
    }))
}

fn insert_one(store: &mut Store, collection: &str, document: &Document) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;
    let documents = db.collections.entry(collection.to_string()).or_default();

    let mut stored = document_to_json(document);
    let id = stored
        .entry("_id")
        .or_insert_with(|| Json::String(Uuid::new_v4().simple().to_string()))
        .clone();

    if documents
        .iter()
        .any(|existing| existing.get("_id").is_some_and(|other| query::values_equal(other, &id)))
    {
        return Err(ExecutionError::DuplicateId(id.to_string()));
    }
    documents.push(stored);

    Ok(json!({
        "message": "Documento insertado exitosamente",
        "insertedId": id,
        "collection": collection,
        "database": database,
    }))
}

fn find(store: &mut Store, collection: &str, filter: Option<&Document>) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;

    let mut documents = Vec::new();
    for doc in db.collections.get(collection).into_iter().flatten() {
        if filter.map_or(Ok(true), |f| query::matches(doc, f))? {
            documents.push(Json::Object(doc.clone()));
        }
    }

    Ok(json!({
        "message": format!("Encontrados {} documentos", documents.len()),
        "count": documents.len(),
        "documents": documents,
        "collection": collection,
        "database": database,
    }))
}

/// Index of the first document matching `filter`
fn position_of(documents: &[StoredDocument], filter: &Document) -> Result<Option<usize>, ExecutionError> {
    for (index, doc) in documents.iter().enumerate() {
        if query::matches(doc, filter)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn update_one(
    store: &mut Store,
    collection: &str,
    filter: &Document,
    update: &Document,
) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;
    let documents = db.collections.get_mut(collection);

    let (matched, modified) = match documents {
        Some(documents) => match position_of(documents, filter)? {
            Some(index) => (1, usize::from(query::apply_update(&mut documents[index], update)?)),
            None => (0, 0),
        },
        None => (0, 0),
    };

    Ok(json!({
        "message": "Actualización completada",
        "matchedCount": matched,
        "modifiedCount": modified,
        "collection": collection,
        "database": database,
    }))
}

fn delete_one(store: &mut Store, collection: &str, filter: &Document) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;

    let mut deleted = 0;
    if let Some(documents) = db.collections.get_mut(collection)
        && let Some(index) = position_of(documents, filter)?
    {
        documents.remove(index);
        deleted = 1;
    }

    Ok(json!({
        "message": "Eliminación completada",
        "deletedCount": deleted,
        "collection": collection,
        "database": database,
    }))
}

fn drop_collection(store: &mut Store, collection: &str) -> Result<Json, ExecutionError> {
    let (database, db) = store.selected()?;
    db.collections.remove(collection);

    Ok(json!({
        "message": format!("Colección '{}' eliminada exitosamente", collection),
        "collection": collection,
        "database": database,
    }))
}

/// Explicit name first, then the selected database.
fn drop_database(store: &mut Store, database: Option<&str>) -> Result<Json, ExecutionError> {
    let name = database
        .map(str::to_string)
        .or_else(|| store.current_database.clone())
        .filter(|name| !name.is_empty())
        .ok_or(ExecutionError::NoDatabaseToDrop)?;

    store.databases.remove(&name);
    if store.current_database.as_deref() == Some(name.as_str()) {
        store.current_database = None;
    }

    Ok(json!({
        "message": format!("Base de datos '{}' eliminada exitosamente", name),
        "database": name,
    }))
}
