//! serde_json tree adapter
//!
//! Implements [`TreeNode`] for [`serde_json::Value`] and bundles the JSON
//! specific filters and transforms. Map iteration follows insertion order
//! (`preserve_order`), which is what makes descent order and copy layout
//! deterministic.

pub mod filter;
pub mod transform;

use serde_json::{Map, Number, Value};

use crate::errors::{PointerError, Result};
use crate::path::{NestedPointer, PathCompiler, Pointer};
use crate::tree::TreeNode;
use crate::types::{CoercionType, NodeKind, Scalar};

pub use filter::{
    boolean_filter, string_filter, string_filter_ignore_case, string_value_filter, BooleanMatch,
    StringMatch,
};
pub use transform::{PrimitiveTransform, SetTextTransform};

/// Compile an absolute path with the shared default compiler
///
/// # Errors
///
/// Returns `MalformedPath` if the path is unparseable or nested.
pub fn compile(path: &str) -> Result<Pointer> {
    PathCompiler::default().compile(path)
}

/// Compile a path that may contain `*` and `**` with the shared default compiler
///
/// # Errors
///
/// Returns `MalformedPath` if the path is unparseable.
pub fn compile_nested(path: &str) -> Result<NestedPointer> {
    PathCompiler::default().compile_nested(path)
}

impl TreeNode for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Map,
            _ => NodeKind::Value,
        }
    }

    fn new_map() -> Self {
        Value::Object(Map::new())
    }

    fn new_array() -> Self {
        Value::Array(Vec::new())
    }

    fn null() -> Self {
        Value::Null
    }

    fn child_count(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    fn iterate(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Value::Array(items) => Box::new(items.iter()),
            Value::Object(map) => Box::new(map.values()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn iterate_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self> + '_> {
        match self {
            Value::Array(items) => Box::new(items.iter_mut()),
            Value::Object(map) => Box::new(map.values_mut()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Self)> + '_> {
        match self {
            Value::Object(map) => Box::new(map.iter().map(|(key, value)| (key.as_str(), value))),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn get_field(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn get_field_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_object_mut()?.get_mut(key)
    }

    fn get_element(&self, index: usize) -> Option<&Self> {
        self.as_array()?.get(index)
    }

    fn get_element_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.as_array_mut()?.get_mut(index)
    }

    fn insert_field(&mut self, key: &str, value: Self) {
        if let Value::Object(map) = self {
            map.insert(key.to_string(), value);
        }
    }

    fn remove_field(&mut self, key: &str) -> Option<Self> {
        // shift_remove keeps the remaining keys in insertion order
        self.as_object_mut()?.shift_remove(key)
    }

    fn push_element(&mut self, value: Self) {
        if let Value::Array(items) = self {
            items.push(value);
        }
    }

    fn remove_element(&mut self, index: usize) -> Option<Self> {
        let items = self.as_array_mut()?;
        (index < items.len()).then(|| items.remove(index))
    }

    fn coerce(value: Scalar, target: &CoercionType) -> Result<Self> {
        let unsupported = |value: &Scalar| PointerError::UnsupportedCoercion {
            value: value.to_string(),
            target: *target,
        };

        if value.is_null() {
            return Ok(Value::Null);
        }

        match (target, &value) {
            (CoercionType::Native, Scalar::Bool(b)) => Ok(Value::Bool(*b)),
            (CoercionType::Native, Scalar::Int(i)) => Ok(Value::from(*i)),
            (CoercionType::Native | CoercionType::Float, Scalar::Float(f)) => {
                float_node(*f).ok_or_else(|| unsupported(&value))
            }
            (CoercionType::Native, Scalar::Text(text)) => Ok(Value::String(text.clone())),

            (CoercionType::Text, other) => Ok(Value::String(other.to_text())),

            (CoercionType::Integer, Scalar::Int(i)) => Ok(Value::from(*i)),
            (CoercionType::Integer, Scalar::Float(f)) if f.is_finite() => {
                Ok(Value::from(f.trunc() as i64))
            }
            (CoercionType::Integer, Scalar::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| unsupported(&value)),

            (CoercionType::Float, Scalar::Int(i)) => {
                float_node(*i as f64).ok_or_else(|| unsupported(&value))
            }
            (CoercionType::Float, Scalar::Text(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(float_node)
                .ok_or_else(|| unsupported(&value)),

            (CoercionType::Boolean, Scalar::Bool(b)) => Ok(Value::Bool(*b)),
            (CoercionType::Boolean, Scalar::Text(text)) => match text.trim() {
                t if t.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                t if t.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                _ => Err(unsupported(&value)),
            },

            (CoercionType::Tree, Scalar::Text(text)) => {
                serde_json::from_str(text).map_err(|_| unsupported(&value))
            }

            _ => Err(unsupported(&value)),
        }
    }
}

/// JSON has no representation for NaN or infinities
fn float_node(value: f64) -> Option<Value> {
    Number::from_f64(value).map(Value::Number)
}
