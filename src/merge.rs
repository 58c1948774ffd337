//! Strict non-overlapping deep merge of metadata trees
//!
//! Run metadata arrives in fragments (one per report chunk) that are supposed
//! to describe disjoint facts about the same run. [`merge_nonoverlap`]
//! combines two such fragments and treats any overlap as a hard error rather
//! than picking a winner: a dashboard silently preferring one chunk's
//! `run_info` over another's would misattribute scores to the wrong engine
//! build.

use serde_json::{Map, Value};

use crate::error::{Error, MergeConflictKind, Result};

/// Deep-merges two JSON object trees, failing on any overlap.
///
/// Rules:
/// - a key present in only one input is copied through with its subtree;
/// - a key present in both inputs with object values on both sides is merged
///   recursively;
/// - an array anywhere in either input is a conflict
///   ([`MergeConflictKind::Array`]) — arrays have no meaningful positional
///   merge for run metadata;
/// - a key present in both inputs where either side is a non-object leaf is a
///   conflict ([`MergeConflictKind::Overlap`]).
///
/// For disjoint inputs the operation is commutative, and merging with an
/// empty map returns the other input unchanged. Inputs are never mutated and
/// the output shares no structure with them.
pub fn merge_nonoverlap(
    a: &Map<String, Value>,
    b: &Map<String, Value>,
) -> Result<Map<String, Value>> {
    let mut path = Vec::new();
    merge_maps(&mut path, a, b)
}

fn merge_maps<'a>(
    path: &mut Vec<&'a str>,
    a: &'a Map<String, Value>,
    b: &'a Map<String, Value>,
) -> Result<Map<String, Value>> {
    let mut merged = Map::new();

    for (key, a_value) in a {
        path.push(key);
        let value = match b.get(key) {
            None => checked_clone(path, a_value)?,
            Some(b_value) => match (a_value, b_value) {
                (Value::Object(a_inner), Value::Object(b_inner)) => {
                    Value::Object(merge_maps(path, a_inner, b_inner)?)
                }
                _ => {
                    let kind = if a_value.is_array() || b_value.is_array() {
                        MergeConflictKind::Array
                    } else {
                        MergeConflictKind::Overlap
                    };
                    return Err(Error::merge_conflict(path, kind));
                }
            },
        };
        path.pop();
        merged.insert(key.clone(), value);
    }

    for (key, b_value) in b {
        if a.contains_key(key) {
            continue;
        }
        path.push(key);
        let value = checked_clone(path, b_value)?;
        path.pop();
        merged.insert(key.clone(), value);
    }

    Ok(merged)
}

// Copy-through still walks the subtree: an array is rejected even when its
// key exists on only one side, so a fragment that merges cleanly today cannot
// smuggle in a value that would be unmergeable against a later fragment.
fn checked_clone<'a>(path: &mut Vec<&'a str>, value: &'a Value) -> Result<Value> {
    match value {
        Value::Array(_) => Err(Error::merge_conflict(path, MergeConflictKind::Array)),
        Value::Object(inner) => {
            let mut cloned = Map::new();
            for (key, child) in inner {
                path.push(key);
                let child = checked_clone(path, child)?;
                path.pop();
                cloned.insert(key.clone(), child);
            }
            Ok(Value::Object(cloned))
        }
        _ => Ok(value.clone()),
    }
}
