use std::collections::BTreeMap;

/// A document: unique string keys mapped to [`Value`]s.
///
/// Key order carries no meaning; a `BTreeMap` keeps iteration (and therefore
/// validation and JSON output) deterministic.
pub type Document = BTreeMap<String, Value>;

/// A value inside a shell document literal.
///
/// The set is closed: whatever the parser accepts in value position maps to
/// exactly one of these variants.
///
/// # Examples
///
/// ```
/// use mongo_analyzer::{Document, Value};
///
/// let mut inner = Document::new();
/// inner.insert("edad".to_string(), Value::Integer(31));
///
/// let mut update = Document::new();
/// update.insert("$set".to_string(), Value::Document(inner));
///
/// assert!(update["$set"].as_document().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string, or a bare identifier used as a value (`{ estado: activo }`)
    String(String),

    /// Number literal without a decimal point
    Integer(i64),

    /// Number literal with a decimal point
    Float(f64),

    /// Nested document
    Document(Document),

    /// `$`-prefixed bare token in value position (`{ campo: $otro }`)
    Operator(String),
}

impl Value {
    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Textual payload of strings and operator strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Operator(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Document(_) => "document",
            Value::Operator(_) => "operator",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_widen_to_float() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::String("3".into()).as_float(), None);
    }

    #[test]
    fn operator_strings_expose_their_text() {
        assert_eq!(Value::Operator("$x".into()).as_str(), Some("$x"));
        assert_eq!(Value::Integer(1).as_str(), None);
    }
}
