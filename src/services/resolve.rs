//! Dotted-path resolution over project records and rule comparison.
//!
//! A walk starts from the whole record and applies one [`step`] per segment.
//! Objects descend into the named child, sequences either project that child
//! out of every element or, for an any-element rule, collapse into a
//! found/not-found boolean. Scalars end the walk as [`Resolved::Absent`].

use crate::domain::models::{DottedPath, Expected};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Absent,
    Value(Value),
    /// Outcome of an any-element test; the walk stops once this is produced.
    Exists(bool),
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Absent => f.write_str("null"),
            Resolved::Value(v) => f.write_str(&display_value(v)),
            Resolved::Exists(found) => write!(f, "{}", found),
        }
    }
}

/// Strings bare, everything else as compact JSON.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn resolve(record: &Value, path: &DottedPath, expected: &Expected) -> Resolved {
    let mut current = Resolved::Value(record.clone());
    for seg in path.segments() {
        current = step(current, seg, expected);
        if !matches!(current, Resolved::Value(_)) {
            return current;
        }
    }
    match (current, expected) {
        (Resolved::Value(Value::Array(items)), Expected::AnyElement { fields, .. }) => {
            Resolved::Exists(items.iter().any(|item| carries_all(item, fields)))
        }
        (other, _) => other,
    }
}

fn step(current: Resolved, seg: &str, expected: &Expected) -> Resolved {
    match current {
        Resolved::Absent | Resolved::Exists(_) => current,
        Resolved::Value(Value::Object(mut map)) => match map.remove(seg) {
            Some(child) => Resolved::Value(child),
            None => Resolved::Absent,
        },
        Resolved::Value(Value::Array(items)) => match expected {
            Expected::AnyElement { fields, .. } => {
                let found = children_of(&items, seg).any(|c| carries_all(c, fields));
                Resolved::Exists(found)
            }
            Expected::Equals(_) => {
                let mut projected: Vec<Value> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(mut m) => m.remove(seg).filter(|c| !c.is_null()),
                        _ => None,
                    })
                    .collect();
                if projected.len() == 1 {
                    Resolved::Value(projected.remove(0))
                } else {
                    Resolved::Value(Value::Array(projected))
                }
            }
        },
        Resolved::Value(_) => Resolved::Absent,
    }
}

/// Named child of each object element, with list-valued children flattened.
fn children_of<'a>(items: &'a [Value], seg: &'a str) -> impl Iterator<Item = &'a Value> {
    items
        .iter()
        .filter_map(move |item| item.get(seg))
        .flat_map(|child| match child {
            Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
}

fn carries_all(item: &Value, fields: &Map<String, Value>) -> bool {
    match item {
        Value::Object(m) => fields
            .iter()
            .all(|(k, v)| m.get(k).map(|actual| values_equal(actual, v)).unwrap_or(false)),
        _ => false,
    }
}

/// Structural equality where numbers compare by value (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                return true;
            }
            // Integer pairs stay exact; f64 only when a float is involved.
            if !(x.is_f64() || y.is_f64()) {
                return false;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).map(|y| values_equal(x, y)).unwrap_or(false))
        }
        _ => a == b,
    }
}

pub fn matches(resolved: &Resolved, expected: &Expected) -> bool {
    match resolved {
        Resolved::Exists(found) => *found,
        Resolved::Absent => expected.raw().is_null(),
        Resolved::Value(v) => values_equal(v, expected.raw()),
    }
}

pub fn mismatch_line(path: &DottedPath, resolved: &Resolved, expected: &Expected) -> String {
    format!(
        "Setting '{}' is '{}', expected '{}'",
        path,
        resolved,
        display_value(expected.raw())
    )
}
