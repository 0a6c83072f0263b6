//! Document literal -> JSON conversion utilities

use serde_json::{Map, Number};

use crate::value::{Document, Value};

/// Convert a document literal value to serde_json::Value
///
/// Operator strings become plain JSON strings (`$campo` stays `"$campo"`).
/// Non-finite floats have no JSON form and become null.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::String(s) | Value::Operator(s) => serde_json::Value::String(s.clone()),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Document(doc) => serde_json::Value::Object(document_to_json(doc)),
    }
}

/// Convert a document literal to a JSON object
pub fn document_to_json(doc: &Document) -> Map<String, serde_json::Value> {
    doc.iter()
        .map(|(k, v)| (k.clone(), value_to_json(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_documents_convert_recursively() {
        let mut inner = Document::new();
        inner.insert("edad".into(), Value::Integer(31));
        inner.insert("peso".into(), Value::Float(70.5));

        let mut doc = Document::new();
        doc.insert("$set".into(), Value::Document(inner));
        doc.insert("ref".into(), Value::Operator("$otro".into()));

        assert_eq!(
            serde_json::Value::Object(document_to_json(&doc)),
            json!({ "$set": { "edad": 31, "peso": 70.5 }, "ref": "$otro" })
        );
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(value_to_json(&Value::Float(f64::INFINITY)), serde_json::Value::Null);
    }
}
