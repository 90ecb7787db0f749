//! Declarative build specification
//!
//! A [`BuildSpec`] places values into a destination tree: literal values
//! declared inline, and values looked up by key at build time. Lookups either
//! replace a single location (`put`) or append to a list there (`add`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operation::copy_spec::ROOT;
use crate::types::{CoercionType, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PutMode {
    /// Replace the value at the destination
    Put,
    /// Append to the list at the destination, creating it if absent
    Add,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralEntry {
    pub value: Scalar,
    pub into: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutEntry {
    pub mode: PutMode,
    /// Lookup key
    pub from: String,
    /// Requested type; the spec's default type when absent
    pub as_type: Option<CoercionType>,
    pub into: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSpec {
    target: String,
    default_type: CoercionType,
    literals: Vec<LiteralEntry>,
    puts: Vec<PutEntry>,
}

impl Default for BuildSpec {
    fn default() -> Self {
        Self {
            target: ROOT.to_string(),
            default_type: CoercionType::Native,
            literals: Vec::new(),
            puts: Vec::new(),
        }
    }
}

impl BuildSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build into `path` instead of the destination root
    pub fn with_target(mut self, path: impl Into<String>) -> Self {
        self.target = path.into();
        self
    }

    /// Type used by entries that do not request one
    pub fn with_default_type(mut self, default_type: CoercionType) -> Self {
        self.default_type = default_type;
        self
    }

    /// Place a literal `value` at `into`
    pub fn put_value(mut self, value: impl Into<Scalar>, into: &str) -> Self {
        self.literals.push(LiteralEntry {
            value: value.into(),
            into: into.to_string(),
        });
        self
    }

    /// Place the value looked up under `from` at `into`
    pub fn put_into(self, from: &str, into: &str) -> Self {
        self.entry(PutMode::Put, from, None, into)
    }

    pub fn put_into_as(self, from: &str, as_type: CoercionType, into: &str) -> Self {
        self.entry(PutMode::Put, from, Some(as_type), into)
    }

    /// Append the value looked up under `from` to the list at `into`
    pub fn add_into(self, from: &str, into: &str) -> Self {
        self.entry(PutMode::Add, from, None, into)
    }

    pub fn add_into_as(self, from: &str, as_type: CoercionType, into: &str) -> Self {
        self.entry(PutMode::Add, from, Some(as_type), into)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn default_type(&self) -> CoercionType {
        self.default_type
    }

    pub fn literals(&self) -> &[LiteralEntry] {
        &self.literals
    }

    pub fn puts(&self) -> &[PutEntry] {
        &self.puts
    }

    /// The type an entry is coerced to
    pub fn type_of(&self, entry: &PutEntry) -> CoercionType {
        entry.as_type.unwrap_or(self.default_type)
    }

    fn entry(mut self, mode: PutMode, from: &str, as_type: Option<CoercionType>, into: &str) -> Self {
        self.puts.push(PutEntry {
            mode,
            from: from.to_string(),
            as_type,
            into: into.to_string(),
        });
        self
    }
}

impl fmt::Display for BuildSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BuildSpec{{into='{}', defaultType={}, literals={}, puts=[",
            self.target,
            self.default_type,
            self.literals.len()
        )?;
        for (i, put) in self.puts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?} '{}' -> '{}'", put.mode, put.from, put.into)?;
        }
        f.write_str("]}")
    }
}
