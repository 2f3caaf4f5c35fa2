//! Resolution of a parsed page state into a [`NoteRecord`].
//!
//! The state trees are untyped and change shape between page generations,
//! so each platform resolver runs an ordered list of candidate path probes.
//! A probe yields a partial record; the resolver merges the partials field
//! by field. A missing key, a value of the wrong type, or an explicit `null`
//! anywhere along a path only empties the field that path feeds.
//!
//! [`NoteRecord`]: crate::types::NoteRecord

pub mod douyin;
pub mod xiaohongshu;

use serde_json::Value;

/// Partial record read from one location in a state tree.
#[derive(Debug, Default)]
pub(crate) struct Probe<'a> {
    pub source: &'static str,
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: &'a [Value],
    pub video: Option<String>,
}

/// Non-empty string at a JSON pointer.
pub(crate) fn str_at(tree: &Value, pointer: &str) -> Option<String> {
    tree.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

/// Array at a JSON pointer, or an empty slice when absent or not an array.
pub(crate) fn array_at<'a>(tree: &'a Value, pointer: &str) -> &'a [Value] {
    tree.pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Object member by exact key. Keys containing `/` cannot be reached with a
/// JSON pointer without escaping, so route keys go through here.
pub(crate) fn member<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    tree.as_object()?.get(key).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn str_at_treats_blank_and_wrong_type_as_absent() {
        let tree = json!({"a": {"s": "x", "blank": " ", "n": 3, "null": null}});
        assert_eq!(str_at(&tree, "/a/s").as_deref(), Some("x"));
        assert_eq!(str_at(&tree, "/a/blank"), None);
        assert_eq!(str_at(&tree, "/a/n"), None);
        assert_eq!(str_at(&tree, "/a/null"), None);
        assert_eq!(str_at(&tree, "/a/missing/deeper"), None);
    }

    #[test]
    fn array_at_indexes_through_arrays() {
        let tree = json!({"list": [{"urls": ["u1", "u2"]}], "obj": {}});
        assert_eq!(array_at(&tree, "/list/0/urls").len(), 2);
        assert!(array_at(&tree, "/obj").is_empty());
        assert!(array_at(&tree, "/list/5/urls").is_empty());
    }

    #[test]
    fn member_reads_keys_with_slashes() {
        let tree = json!({"video_(id)/page": {"ok": true}, "gone": null});
        assert!(member(&tree, "video_(id)/page").is_some());
        assert!(member(&tree, "gone").is_none());
        assert!(member(&json!([1]), "x").is_none());
    }
}
