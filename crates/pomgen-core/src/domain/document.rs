//! Path navigation inside a JSON document.
//!
//! Names address object members, indices address list slots. Writing creates
//! missing containers on the way down and pads short lists.

use serde_json::{Map, Value};

use crate::domain::{DomainError, Key, KeyPath};

/// Value at `key`, if every step exists.
pub fn get<'a>(document: &'a Value, key: &KeyPath) -> Option<&'a Value> {
    key.keys()
        .iter()
        .try_fold(document, |node, step| match (step, node) {
            (Key::Name(name), Value::Object(map)) => map.get(name),
            (Key::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        })
}

/// Store `value` at `key`.
///
/// `null` steps become an object or a list as the next key requires; list
/// slots skipped over are filled with `padding`.
pub fn set(document: &mut Value, key: &KeyPath, value: Value, padding: &Value) -> Result<(), DomainError> {
    let mut node = document;
    for step in key.keys() {
        node = descend(node, step, padding).map_err(|reason| DomainError::InvalidKeyPath {
            path: key.to_string(),
            reason,
        })?;
    }
    *node = value;
    Ok(())
}

/// Length of the list at `key`.
pub fn array_len(document: &Value, key: &KeyPath) -> Result<usize, DomainError> {
    match get(document, key) {
        Some(Value::Array(items)) => Ok(items.len()),
        Some(other) => Err(DomainError::InvalidKeyPath {
            path: key.to_string(),
            reason: format!("expected a list, found {}", type_name(other)),
        }),
        None => Err(DomainError::InvalidKeyPath {
            path: key.to_string(),
            reason: "no value at this path".into(),
        }),
    }
}

/// Type label used in documentation entries.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "<null>",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

fn descend<'a>(node: &'a mut Value, step: &Key, padding: &Value) -> Result<&'a mut Value, String> {
    if node.is_null() {
        *node = match step {
            Key::Name(_) => Value::Object(Map::new()),
            Key::Index(_) => Value::Array(Vec::new()),
        };
    }
    match (step, node) {
        (Key::Name(name), Value::Object(map)) => Ok(map.entry(name.clone()).or_insert(Value::Null)),
        (Key::Index(index), Value::Array(items)) => {
            if items.len() <= *index {
                items.resize(*index, padding.clone());
                items.push(Value::Null);
            }
            Ok(&mut items[*index])
        }
        (Key::Name(name), other) => Err(format!(
            "cannot read member '{}' of {}",
            name,
            type_name(other)
        )),
        (Key::Index(index), other) => Err(format!(
            "cannot read slot {} of {}",
            index,
            type_name(other)
        )),
    }
}
