//! Path lookups and string coercion over arbitrary JSON documents.
//!
//! Webhook bodies are schemaless: filters address them with dotted paths
//! (`Metadata.librarySectionType`, `Player.title`, `Account.tags[0]`) and
//! compare the string form of whatever sits there.

use std::borrow::Cow;

use serde_json::{Number, Value};

/// Split a path into segments.
///
/// Dots separate keys; brackets address array indices or quoted keys:
/// `a.b[0]["c.d"]` → `["a", "b", "0", "c.d"]`.
pub fn path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut after_bracket = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !after_bracket {
                    segments.push(std::mem::take(&mut current));
                }
                after_bracket = false;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let quote = match chars.peek() {
                    Some(&q) if q == '"' || q == '\'' => {
                        chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut inner = String::new();
                while let Some(c) = chars.next() {
                    match quote {
                        Some(q) if c == q => {
                            // Closing quote; swallow up to the bracket.
                            for c in chars.by_ref() {
                                if c == ']' {
                                    break;
                                }
                            }
                            break;
                        }
                        None if c == ']' => break,
                        _ => inner.push(c),
                    }
                }
                segments.push(inner);
                after_bracket = true;
            }
            _ => {
                after_bracket = false;
                current.push(c);
            }
        }
    }

    if !current.is_empty() || (!after_bracket && path.ends_with('.')) {
        segments.push(current);
    }

    segments
}

/// Resolve `path` inside `document`.
///
/// Returns `None` when any segment is missing, which is distinct from a
/// present `null`, `""` or `0`. A top-level key spelled exactly like the
/// whole path takes precedence over segment traversal. Arrays and strings
/// answer `length` and canonical indices (`1`, not `01` or `+1`); string
/// lengths and indices count UTF-16 code units.
pub fn lookup<'a>(document: &'a Value, path: &str) -> Option<Cow<'a, Value>> {
    if path.is_empty() {
        return None;
    }

    if let Value::Object(map) = document {
        if let Some(value) = map.get(path) {
            return Some(Cow::Borrowed(value));
        }
    }

    let mut current = Cow::Borrowed(document);
    for segment in path_segments(path) {
        current = match current {
            Cow::Borrowed(value) => step(value, &segment)?,
            // Derived values (lengths, characters) have no children.
            Cow::Owned(_) => return None,
        };
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) if segment == "length" => Some(Cow::Owned(Value::from(items.len()))),
        Value::Array(items) => items.get(array_index(segment)?).map(Cow::Borrowed),
        Value::String(s) if segment == "length" => {
            Some(Cow::Owned(Value::from(s.encode_utf16().count())))
        }
        Value::String(s) => {
            let unit = s.encode_utf16().nth(array_index(segment)?)?;
            Some(Cow::Owned(Value::from(String::from_utf16_lossy(&[unit]))))
        }
        _ => None,
    }
}

/// Only the canonical decimal form addresses an element; anything else
/// would be a property name on the array.
fn array_index(segment: &str) -> Option<usize> {
    segment
        .parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == segment)
}

/// String form of a JSON value, as a JavaScript `String(value)` would print it.
///
/// Integral numbers print without a fraction (`3.0` → `"3"`), arrays are
/// comma-joined with `null` entries blank, objects collapse to
/// `"[object Object]"`.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// String form of a looked-up value; absent and `null` both become `""`.
pub fn comparable(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => js_string(v),
    }
}

fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
