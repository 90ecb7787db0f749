//! JSON value transforms

use std::fmt;

use serde_json::{Number, Value};

use crate::errors::{PointerError, Result};
use crate::operation::transform::{Arguments, Transform};
use crate::types::{CoercionType, Scalar};

/// Numeric and text conversions of a scalar node
///
/// A node that already has the target representation, or is null, is returned
/// unchanged. Text is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTransform {
    ToString,
    ToDouble,
    /// Narrows to single precision before storing
    ToFloat,
    ToLong,
    ToInt,
}

impl PrimitiveTransform {
    fn target(self) -> CoercionType {
        match self {
            PrimitiveTransform::ToString => CoercionType::Text,
            PrimitiveTransform::ToDouble | PrimitiveTransform::ToFloat => CoercionType::Float,
            PrimitiveTransform::ToLong | PrimitiveTransform::ToInt => CoercionType::Integer,
        }
    }

    fn unsupported(self, node: &Value) -> PointerError {
        PointerError::UnsupportedCoercion {
            value: node.to_string(),
            target: self.target(),
        }
    }

    fn to_text(self, node: &Value) -> Result<Value> {
        match node {
            Value::String(_) => Ok(node.clone()),
            Value::Number(number) => Ok(Value::String(number.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(self.unsupported(node)),
        }
    }

    fn to_f64(self, node: &Value) -> Result<f64> {
        match node {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|value| value.is_finite())
        .ok_or_else(|| self.unsupported(node))
    }

    fn to_i64(self, node: &Value) -> Result<i64> {
        let parsed = match node {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(text) => {
                let text = text.trim();
                text.parse::<i64>().ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                        .map(|f| f.trunc() as i64)
                })
            }
            _ => None,
        };
        parsed.ok_or_else(|| self.unsupported(node))
    }

    fn float_value(self, value: f64, node: &Value) -> Result<Value> {
        Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| self.unsupported(node))
    }
}

impl Transform<Value> for PrimitiveTransform {
    fn apply(&self, node: &Value) -> Result<Value> {
        if node.is_null() {
            return Ok(Value::Null);
        }
        let this = *self;
        match this {
            PrimitiveTransform::ToString => this.to_text(node),
            PrimitiveTransform::ToDouble => {
                if node.is_f64() {
                    return Ok(node.clone());
                }
                let value = this.to_f64(node)?;
                this.float_value(value, node)
            }
            PrimitiveTransform::ToFloat => {
                let value = this.to_f64(node)?;
                this.float_value(f64::from(value as f32), node)
            }
            PrimitiveTransform::ToLong => {
                if node.is_i64() {
                    return Ok(node.clone());
                }
                this.to_i64(node).map(Value::from)
            }
            PrimitiveTransform::ToInt => {
                let value = this.to_i64(node)?;
                i32::try_from(value)
                    .map(Value::from)
                    .map_err(|_| this.unsupported(node))
            }
        }
    }
}

impl fmt::Display for PrimitiveTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveTransform::ToString => "toString",
            PrimitiveTransform::ToDouble => "toDouble",
            PrimitiveTransform::ToFloat => "toFloat",
            PrimitiveTransform::ToLong => "toLong",
            PrimitiveTransform::ToInt => "toInt",
        };
        f.write_str(name)
    }
}

/// Replaces a text node with a fixed or per-run text
///
/// A named transform is resettable: each reset takes the replacement from the
/// run's arguments under its name, falling back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTextTransform {
    name: Option<String>,
    default: Option<String>,
    replace: Option<String>,
}

impl SetTextTransform {
    /// Always replace with `replace`
    pub fn new(replace: impl Into<String>) -> Self {
        Self {
            name: None,
            default: None,
            replace: Some(replace.into()),
        }
    }

    /// Replace with the run argument `name`, or `default` when it is not given
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if `name` is empty.
    pub fn named(name: &str, default: Option<&str>) -> Result<Self> {
        if name.is_empty() {
            return Err(PointerError::invalid("", "transform name may not be empty"));
        }
        Ok(Self {
            name: Some(name.to_string()),
            default: default.map(str::to_string),
            replace: default.map(str::to_string),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The text the next `apply` writes
    pub fn replacement(&self) -> Option<&str> {
        self.replace.as_deref()
    }
}

impl Transform<Value> for SetTextTransform {
    fn apply(&self, node: &Value) -> Result<Value> {
        if !node.is_string() {
            return Err(PointerError::invalid(
                node.to_string(),
                "can only replace a text node",
            ));
        }
        Ok(self
            .replace
            .as_ref()
            .map_or(Value::Null, |text| Value::String(text.clone())))
    }

    fn is_resettable(&self) -> bool {
        self.name.is_some()
    }

    fn reset(&mut self, arguments: &Arguments) {
        let Some(name) = &self.name else {
            return;
        };
        self.replace = match arguments.get(name) {
            Some(Scalar::Null) => None,
            Some(value) => Some(value.to_text()),
            None => self.default.clone(),
        };
    }
}
