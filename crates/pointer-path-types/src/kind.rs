//! Node kind classification used by every tree adapter

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three shapes a tree node can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Ordered list addressed by index
    Array,
    /// Keyed container addressed by field name
    Map,
    /// Any non-container value, including null
    Value,
}

impl NodeKind {
    /// True for `Array` and `Map`
    pub fn is_container(self) -> bool {
        !matches!(self, NodeKind::Value)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Array => write!(f, "array"),
            NodeKind::Map => write!(f, "map"),
            NodeKind::Value => write!(f, "value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_kinds() {
        assert!(NodeKind::Array.is_container());
        assert!(NodeKind::Map.is_container());
        assert!(!NodeKind::Value.is_container());
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKind::Map.to_string(), "map");
        assert_eq!(NodeKind::Array.to_string(), "array");
    }
}
