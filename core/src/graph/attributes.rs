// Attribute maps attached to nodes and edges
//
// Values are typed; callers go through the typed getters instead of poking at
// the raw map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key used to flag concealed elements
pub const HIDDEN: &str = "hidden";

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

/// Name → value map carried by every node and edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Set a value, returning the previous one if any
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    /// Boolean value under `key`; `None` if absent or of another type
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(AttrValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(AttrValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Float value under `key`; integers widen
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(AttrValue::Float(v)) => Some(*v),
            Some(AttrValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(AttrValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.0.insert(key.into(), AttrValue::Bool(value));
    }

    /// True only when `hidden` is present and set to `true`
    pub fn is_hidden(&self) -> bool {
        self.get_bool(HIDDEN).unwrap_or(false)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.set_bool(HIDDEN, hidden);
    }

    /// Remove the `hidden` key whatever its value
    pub fn clear_hidden(&mut self) {
        self.remove(HIDDEN);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
