//! External values handed to a tree adapter for coercion
//!
//! Builders look values up by key and literals are declared inline; both arrive
//! as a [`Scalar`] and are turned into native nodes by the adapter according to
//! a [`CoercionType`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that lives outside any tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Short type name used in coercion error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }

    /// Render the value as plain text (text is returned without quotes)
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{:?}", value),
            Scalar::Text(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// Target representation requested when coercing a [`Scalar`] into a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionType {
    /// Keep the value's own type
    #[default]
    Native,
    Text,
    Integer,
    Float,
    Boolean,
    /// Parse text as a serialized tree in the adapter's own format
    Tree,
}

impl fmt::Display for CoercionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionType::Native => write!(f, "native"),
            CoercionType::Text => write!(f, "text"),
            CoercionType::Integer => write!(f, "integer"),
            CoercionType::Float => write!(f, "float"),
            CoercionType::Boolean => write!(f, "boolean"),
            CoercionType::Tree => write!(f, "tree"),
        }
    }
}
