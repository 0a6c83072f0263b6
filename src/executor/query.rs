//! Filter matching and update operators for stored documents.

use std::cmp::Ordering;

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use serde_json::{Map, Number, Value as Json};

use super::{ExecutionError, path};
use crate::{
    convert::value_to_json,
    validator::UPDATE_OPERATORS,
    value::{Document, Value},
};

/// True when `doc` satisfies every entry of `filter`. An empty filter matches all.
pub fn matches(doc: &Map<String, Json>, filter: &Document) -> Result<bool, ExecutionError> {
    for (field, expected) in filter {
        if !matches_field(path::get(doc, field), expected)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A document whose keys all start with `$` is a set of comparisons.
fn comparison_set(expected: &Value) -> Option<&Document> {
    expected
        .as_document()
        .filter(|doc| !doc.is_empty() && doc.keys().all(|k| k.starts_with('$')))
}

fn matches_field(actual: Option<&Json>, expected: &Value) -> Result<bool, ExecutionError> {
    let Some(comparisons) = comparison_set(expected) else {
        return Ok(actual.is_some_and(|a| equals_or_contains(a, &value_to_json(expected))));
    };

    for (operator, operand) in comparisons {
        let operand = value_to_json(operand);
        let ordering = actual.and_then(|a| compare(a, &operand));

        let satisfied = match operator.as_str() {
            "$eq" => actual.is_some_and(|a| equals_or_contains(a, &operand)),
            "$ne" => !actual.is_some_and(|a| equals_or_contains(a, &operand)),
            "$gt" => ordering == Some(Ordering::Greater),
            "$gte" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            "$lt" => ordering == Some(Ordering::Less),
            "$lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            other => return Err(ExecutionError::UnsupportedQueryOperator(other.to_string())),
        };

        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Arrays match when any element equals the expected value.
fn equals_or_contains(actual: &Json, expected: &Json) -> bool {
    if values_equal(actual, expected) {
        return true;
    }
    match actual {
        Json::Array(items) => items.iter().any(|item| values_equal(item, expected)),
        _ => false,
    }
}

/// Structural equality where `1` and `1.0` are the same number.
pub fn values_equal(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Number(x), Json::Number(y)) => x.as_f64() == y.as_f64(),
        (Json::Array(xs), Json::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Json::Object(xs), Json::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Ordering for range operators; only numbers and strings are comparable
fn compare(a: &Json, b: &Json) -> Option<Ordering> {
    match (a, b) {
        (Json::Number(x), Json::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Json::String(x), Json::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Apply update operators to `doc`. Returns whether the document changed.
///
/// The document is left untouched when any operator fails.
pub fn apply_update(doc: &mut Map<String, Json>, update: &Document) -> Result<bool, ExecutionError> {
    if let Some(unsupported) = update
        .keys()
        .find(|k| !UPDATE_OPERATORS.contains(&k.as_str()))
    {
        return Err(ExecutionError::UnsupportedUpdateOperator(unsupported.clone()));
    }

    let mut updated = doc.clone();

    for (operator, fields) in update {
        let Some(fields) = fields.as_document() else {
            return Err(ExecutionError::Update(format!(
                "{} requiere un documento, se recibió {}",
                operator,
                fields.type_name()
            )));
        };

        for (field, operand) in fields {
            match operator.as_str() {
                "$set" => path::set(&mut updated, field, value_to_json(operand))?,
                "$unset" => {
                    path::remove(&mut updated, field);
                }
                "$inc" => increment(&mut updated, field, operand)?,
                "$push" => push(&mut updated, field, operand)?,
                "$pull" => pull(&mut updated, field, operand)?,
                other => return Err(ExecutionError::UnsupportedUpdateOperator(other.to_string())),
            }
        }
    }

    let modified = updated != *doc;
    *doc = updated;
    Ok(modified)
}

fn increment(doc: &mut Map<String, Json>, field: &str, amount: &Value) -> Result<(), ExecutionError> {
    if amount.as_float().is_none() {
        return Err(ExecutionError::Update(format!(
            "$inc requiere un valor numérico para '{}'",
            field
        )));
    }

    let result = match path::get(doc, field) {
        None => value_to_json(amount),
        Some(Json::Number(current)) => add(current, amount),
        Some(_) => {
            return Err(ExecutionError::Update(format!(
                "no se puede incrementar el campo no numérico '{}'",
                field
            )));
        }
    };

    path::set(doc, field, result)
}

/// Integer + integer stays integer; anything involving a float is summed
/// as a decimal to avoid binary rounding (`0.1 + 0.2 == 0.3`).
fn add(current: &Number, amount: &Value) -> Json {
    if let (Some(a), Value::Integer(b)) = (current.as_i64(), amount)
        && let Some(sum) = a.checked_add(*b)
    {
        return Json::Number(sum.into());
    }

    let a = current.as_f64().unwrap_or_default();
    let b = amount.as_float().unwrap_or_default();

    if let Some(ad) = Decimal::from_f64(a)
        && let Some(bd) = Decimal::from_f64(b)
        && let Some(sum) = (ad + bd).to_f64()
    {
        return Number::from_f64(sum).map(Json::Number).unwrap_or(Json::Null);
    }

    Number::from_f64(a + b).map(Json::Number).unwrap_or(Json::Null)
}

fn push(doc: &mut Map<String, Json>, field: &str, item: &Value) -> Result<(), ExecutionError> {
    let items = match path::get(doc, field) {
        None => vec![value_to_json(item)],
        Some(Json::Array(items)) => {
            let mut items = items.clone();
            items.push(value_to_json(item));
            items
        }
        Some(_) => {
            return Err(ExecutionError::Update(format!(
                "el campo '{}' no es un arreglo",
                field
            )));
        }
    };

    path::set(doc, field, Json::Array(items))
}

fn pull(doc: &mut Map<String, Json>, field: &str, item: &Value) -> Result<(), ExecutionError> {
    let remaining = match path::get(doc, field) {
        None => return Ok(()),
        Some(Json::Array(items)) => {
            let target = value_to_json(item);
            items
                .iter()
                .filter(|existing| !values_equal(existing, &target))
                .cloned()
                .collect()
        }
        Some(_) => {
            return Err(ExecutionError::Update(format!(
                "el campo '{}' no es un arreglo",
                field
            )));
        }
    };

    path::set(doc, field, Json::Array(remaining))
}
