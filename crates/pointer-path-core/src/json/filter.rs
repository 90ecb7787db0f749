//! JSON value comparisons for [`PointerFilter`]

use serde_json::Value;

use crate::errors::Result;
use crate::operation::filter::{Comparison, PointerFilter};
use crate::path::Pointer;

/// Compares the target's text rendering against an expected string
///
/// An expected value of `None` matches a missing or null target. Any other
/// expectation never matches a missing or null target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringMatch {
    value: Option<String>,
    ignore_case: bool,
}

impl StringMatch {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ignore_case: false,
        }
    }

    /// Matches only a missing or null target
    pub fn absent() -> Self {
        Self {
            value: None,
            ignore_case: false,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

impl Comparison<Value> for StringMatch {
    fn compares(&self, target: Option<&Value>) -> bool {
        let target = target.filter(|node| !node.is_null());
        let (expected, node) = match (&self.value, target) {
            (None, None) => return true,
            (Some(expected), Some(node)) => (expected, node),
            _ => return false,
        };

        let text = as_text(node);
        if self.ignore_case {
            text.to_lowercase() == expected.to_lowercase()
        } else {
            text == *expected
        }
    }
}

/// Compares a boolean target; anything else reads as `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanMatch(pub bool);

impl Comparison<Value> for BooleanMatch {
    fn compares(&self, target: Option<&Value>) -> bool {
        let actual = target.and_then(Value::as_bool).unwrap_or(false);
        actual == self.0
    }
}

/// Plain text of a scalar node; containers render as empty text
fn as_text(node: &Value) -> String {
    match node {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Match when the text at `path`, relative to the candidate, equals `value`
///
/// # Errors
///
/// Returns `MalformedPath` if `path` is not a concrete path.
pub fn string_filter(path: &str, value: &str) -> Result<PointerFilter<StringMatch>> {
    Ok(PointerFilter::at(Pointer::parse(path)?, StringMatch::new(value)))
}

/// Match when the candidate's own text equals `value`
pub fn string_value_filter(value: &str) -> PointerFilter<StringMatch> {
    PointerFilter::node(StringMatch::new(value))
}

/// # Errors
///
/// Returns `MalformedPath` if `path` is not a concrete path.
pub fn string_filter_ignore_case(path: &str, value: &str) -> Result<PointerFilter<StringMatch>> {
    Ok(PointerFilter::at(
        Pointer::parse(path)?,
        StringMatch::new(value).ignore_case(),
    ))
}

/// Match when the boolean at `path`, relative to the candidate, equals `value`
///
/// # Errors
///
/// Returns `MalformedPath` if `path` is not a concrete path.
pub fn boolean_filter(path: &str, value: bool) -> Result<PointerFilter<BooleanMatch>> {
    Ok(PointerFilter::at(Pointer::parse(path)?, BooleanMatch(value)))
}
