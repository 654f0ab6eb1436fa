//! JSON path evaluation.
//!
//! Supports a dotted/indexed subset rooted at `$`: `$.field.nested`,
//! `$.items[0].id`, `$[*].userId`. A `[*]` segment projects the remaining
//! path over every element of an array and collects the results.

use thiserror::Error;

/// Errors produced while evaluating a JSON path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path expression itself is malformed.
    #[error("malformed JSON path '{path}': {message}")]
    Malformed {
        /// The offending path.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// The path walked off the document.
    #[error("JSON path '{path}' not found at '{segment}' (available: {})", available.join(", "))]
    NotFound {
        /// The full path being evaluated.
        path: String,
        /// The segment that failed to resolve.
        segment: String,
        /// Keys or indices available at the point of failure.
        available: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Wildcard,
}

/// Looks up the value at `path` inside `json`.
///
/// Returns an owned value: wildcard projection builds a fresh array, and
/// plain lookups clone the selected node.
///
/// # Errors
///
/// Returns [`PathError::Malformed`] for syntax errors and
/// [`PathError::NotFound`] when a segment does not resolve, listing the
/// keys or indices available at the failing point.
pub fn lookup(json: &serde_json::Value, path: &str) -> Result<serde_json::Value, PathError> {
    let segments = parse(path)?;
    eval(json, &segments, path)
}

fn parse(path: &str) -> Result<Vec<Segment>, PathError> {
    let malformed = |message: &str| PathError::Malformed {
        path: path.to_string(),
        message: message.to_string(),
    };

    let trimmed = path.trim();
    let Some(mut rest) = trimmed.strip_prefix('$') else {
        return Err(malformed("must start with '$'"));
    };

    let mut segments = Vec::new();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let Some(close) = after.find(']') else {
                return Err(malformed("unclosed '['"));
            };
            let inner = &after[..close];
            if inner == "*" {
                segments.push(Segment::Wildcard);
            } else {
                let index = inner
                    .parse::<usize>()
                    .map_err(|_| malformed(&format!("invalid array index '{inner}'")))?;
                segments.push(Segment::Index(index));
            }
            rest = &after[close + 1..];
        } else if let Some(after) = rest.strip_prefix('.') {
            let end = after
                .find(['.', '['])
                .unwrap_or(after.len());
            let key = &after[..end];
            if key.is_empty() {
                return Err(malformed("empty key segment"));
            }
            segments.push(Segment::Key(key.to_string()));
            rest = &after[end..];
        } else {
            return Err(malformed(&format!("unexpected character at '{rest}'")));
        }
    }

    Ok(segments)
}

fn eval(
    value: &serde_json::Value,
    segments: &[Segment],
    full_path: &str,
) -> Result<serde_json::Value, PathError> {
    let Some((segment, remaining)) = segments.split_first() else {
        return Ok(value.clone());
    };

    match segment {
        Segment::Key(key) => match value.get(key) {
            Some(next) => eval(next, remaining, full_path),
            None => Err(not_found(full_path, key, value)),
        },
        Segment::Index(index) => match value.get(index) {
            Some(next) => eval(next, remaining, full_path),
            None => Err(not_found(full_path, &format!("[{index}]"), value)),
        },
        Segment::Wildcard => match value.as_array() {
            Some(elements) => {
                let mut collected = Vec::with_capacity(elements.len());
                for element in elements {
                    collected.push(eval(element, remaining, full_path)?);
                }
                Ok(serde_json::Value::Array(collected))
            }
            None => Err(not_found(full_path, "[*]", value)),
        },
    }
}

fn not_found(path: &str, segment: &str, at: &serde_json::Value) -> PathError {
    let available = match at {
        serde_json::Value::Object(map) => map.keys().cloned().collect(),
        serde_json::Value::Array(items) => {
            vec![format!("indices 0..{}", items.len())]
        }
        other => vec![format!("<{}>", type_name(other))],
    };
    PathError::NotFound {
        path: path.to_string(),
        segment: segment.to_string(),
        available,
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
