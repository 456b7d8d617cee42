//! Annotations: key-value metadata attached to nodes and edges
//!
//! Absence of a key is an ordinary, queryable state; nothing here fails.

use super::FxIndexMap;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nested map value, ordered by insertion
pub type AnnotationMap = IndexMap<String, AnnotationValue, FxBuildHasher>;

/// Value stored under an annotation key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnnotationValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<AnnotationValue>),
    Map(AnnotationMap),
    Null,
}

impl AnnotationValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AnnotationValue::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AnnotationValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AnnotationValue::Float(f) => Some(*f),
            AnnotationValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AnnotationValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<AnnotationValue>> {
        match self {
            AnnotationValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&AnnotationMap> {
        match self {
            AnnotationValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            AnnotationValue::String(_) => "String",
            AnnotationValue::Integer(_) => "Integer",
            AnnotationValue::Float(_) => "Float",
            AnnotationValue::Boolean(_) => "Boolean",
            AnnotationValue::Array(_) => "Array",
            AnnotationValue::Map(_) => "Map",
            AnnotationValue::Null => "Null",
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::String(s) => write!(f, "\"{}\"", s),
            AnnotationValue::Integer(i) => write!(f, "{}", i),
            AnnotationValue::Float(fl) => write!(f, "{}", fl),
            AnnotationValue::Boolean(b) => write!(f, "{}", b),
            AnnotationValue::Array(arr) => {
                write!(f, "[")?;
                for (i, val) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            AnnotationValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
            AnnotationValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for AnnotationValue {
    fn from(s: String) -> Self {
        AnnotationValue::String(s)
    }
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self {
        AnnotationValue::String(s.to_string())
    }
}

impl From<i64> for AnnotationValue {
    fn from(i: i64) -> Self {
        AnnotationValue::Integer(i)
    }
}

impl From<i32> for AnnotationValue {
    fn from(i: i32) -> Self {
        AnnotationValue::Integer(i as i64)
    }
}

impl From<f64> for AnnotationValue {
    fn from(f: f64) -> Self {
        AnnotationValue::Float(f)
    }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self {
        AnnotationValue::Boolean(b)
    }
}

impl From<Vec<AnnotationValue>> for AnnotationValue {
    fn from(arr: Vec<AnnotationValue>) -> Self {
        AnnotationValue::Array(arr)
    }
}

impl From<AnnotationMap> for AnnotationValue {
    fn from(map: AnnotationMap) -> Self {
        AnnotationValue::Map(map)
    }
}

impl<K: Into<String>, V: Into<AnnotationValue>> FromIterator<(K, V)> for AnnotationValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        AnnotationValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Annotation bag owned by a node or an edge
///
/// Keys are unique and keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    entries: FxIndexMap<String, AnnotationValue>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the previous value
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AnnotationValue>,
    ) -> Option<AnnotationValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.entries.get(key)
    }

    /// Remove a key, reporting whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn has_any(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, val)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, val)?;
        }
        write!(f, "}}")
    }
}

/// Elements that carry an annotation bag
pub trait Annotated {
    fn annotations(&self) -> &Annotations;

    fn annotations_mut(&mut self) -> &mut Annotations;

    fn set_annotation(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AnnotationValue>,
    ) -> Option<AnnotationValue> {
        self.annotations_mut().set(key, value)
    }

    fn get_annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations().get(key)
    }

    fn remove_annotation(&mut self, key: &str) -> bool {
        self.annotations_mut().remove(key)
    }

    fn has_annotations(&self) -> bool {
        self.annotations().has_any()
    }

    fn annotation_count(&self) -> usize {
        self.annotations().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_value_types() {
        assert_eq!(AnnotationValue::from("x").type_name(), "String");
        assert_eq!(AnnotationValue::Integer(42).type_name(), "Integer");
        assert_eq!(AnnotationValue::Float(2.5).type_name(), "Float");
        assert_eq!(AnnotationValue::Boolean(true).type_name(), "Boolean");
        assert_eq!(AnnotationValue::Array(vec![]).type_name(), "Array");
        assert_eq!(AnnotationValue::Map(AnnotationMap::default()).type_name(), "Map");
        assert_eq!(AnnotationValue::Null.type_name(), "Null");
        assert!(AnnotationValue::Null.is_null());
    }

    #[test]
    fn test_annotation_value_conversions() {
        let s: AnnotationValue = "hello".into();
        assert_eq!(s.as_string(), Some("hello"));

        let i: AnnotationValue = 42i64.into();
        assert_eq!(i.as_integer(), Some(42));
        assert_eq!(i.as_float(), Some(42.0));

        let f: AnnotationValue = 0.5.into();
        assert_eq!(f.as_float(), Some(0.5));
        assert_eq!(f.as_integer(), None);

        let b: AnnotationValue = true.into();
        assert_eq!(b.as_boolean(), Some(true));
    }

    #[test]
    fn test_set_get_remove() {
        let mut ann = Annotations::new();
        assert!(!ann.has_any());
        assert_eq!(ann.get("colour"), None);

        assert_eq!(ann.set("colour", "red"), None);
        let previous = ann.set("colour", "blue");
        assert_eq!(previous, Some(AnnotationValue::from("red")));
        assert_eq!(ann.count(), 1);
        assert_eq!(ann.get("colour").and_then(|v| v.as_string()), Some("blue"));

        assert!(ann.remove("colour"));
        assert!(!ann.remove("colour"));
        assert_eq!(ann.count(), 0);
    }

    #[test]
    fn test_display_keeps_insertion_order() {
        let mut ann = Annotations::new();
        ann.set("b", 1i64);
        ann.set("a", "x");
        assert_eq!(ann.to_string(), "{b: 1, a: \"x\"}");
        let keys: Vec<&str> = ann.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_nested_values() {
        let arr = AnnotationValue::Array(vec![1i64.into(), 2i64.into()]);
        assert_eq!(arr.as_array().map(|a| a.len()), Some(2));
        assert_eq!(arr.to_string(), "[1, 2]");

        let mut map = AnnotationMap::default();
        map.insert("key".to_string(), AnnotationValue::from("value"));
        let map_val = AnnotationValue::Map(map);
        assert!(map_val.as_map().is_some_and(|m| m.contains_key("key")));
    }

    #[test]
    fn test_nested_map_displays_in_insertion_order() {
        let value: AnnotationValue = [("z", 1i64), ("a", 2i64), ("m", 3i64)].into_iter().collect();
        assert_eq!(value.to_string(), "{z: 1, a: 2, m: 3}");

        let mut ann = Annotations::new();
        ann.set("nested", value);
        assert_eq!(ann.to_string(), "{nested: {z: 1, a: 2, m: 3}}");
    }
}
