//! Response shape normalization.
//!
//! The backend is not consistent about collection envelopes: some endpoints
//! return a bare list, some wrap it under `items`, `data`, the endpoint's
//! own name, or `results`, and some return a single record. Everything is
//! flattened here into one uniform row list before decoding.

use serde_json::Value;

/// Normalize a collection payload into an ordered row list.
///
/// Rules, in order:
/// - a list is used directly;
/// - an object is probed for `items`, `data`, `<endpoint>`, `results`; the
///   first key present wins, and its list is used. A present key holding a
///   non-list, or no recognized key at all, means the object itself is a
///   single record and is wrapped in a one-element list;
/// - any other value (string, number, bool, null) yields an empty list.
#[must_use]
pub fn normalize_collection(endpoint: &str, payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(rows) => rows,
        Value::Object(mut map) => {
            for key in ["items", "data", endpoint, "results"] {
                match map.get(key) {
                    Some(Value::Array(_)) => {
                        if let Some(Value::Array(rows)) = map.remove(key) {
                            return rows;
                        }
                    }
                    // First present key decides; a non-list value means the
                    // whole object is the record.
                    Some(_) => break,
                    None => {}
                }
            }
            vec![Value::Object(map)]
        }
        _ => Vec::new(),
    }
}
