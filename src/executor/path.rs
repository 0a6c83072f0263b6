//! Dotted field paths (`direccion.ciudad`) inside stored documents.

use serde_json::{Map, Value as Json};

use super::ExecutionError;

/// A sequence of field names leading to a nested value.
///
/// `"direccion.ciudad"` → `["direccion", "ciudad"]`
pub type Path<'a> = Vec<&'a str>;

pub fn split(path: &str) -> Path<'_> {
    path.split('.').collect()
}

/// Look up a possibly nested field
pub fn get<'a>(doc: &'a Map<String, Json>, path: &str) -> Option<&'a Json> {
    let segments = split(path);
    let (last, parents) = segments.split_last()?;

    let mut current = doc;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }
    current.get(*last)
}

/// Set a field, creating missing intermediate objects.
///
/// Fails when an intermediate field exists but is not an object.
pub fn set(doc: &mut Map<String, Json>, path: &str, value: Json) -> Result<(), ExecutionError> {
    let segments = split(path);
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };

    let mut current = doc;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Json::Object(Map::new()));
        current = entry.as_object_mut().ok_or_else(|| {
            ExecutionError::Update(format!("el campo '{}' no es un documento", segment))
        })?;
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Remove a field; missing fields are not an error
pub fn remove(doc: &mut Map<String, Json>, path: &str) -> Option<Json> {
    let segments = split(path);
    let (last, parents) = segments.split_last()?;

    let mut current = doc;
    for segment in parents {
        current = current.get_mut(*segment)?.as_object_mut()?;
    }
    current.remove(*last)
}
