//! Pointer Path Core - path compiler, resolver chain and spec model
//!
//! This crate provides the tree-agnostic engine for addressing and moving
//! values inside hierarchical documents, including:
//! - Absolute pointers with auto-creating writes (`path::Pointer`)
//! - Nested pointers with `*` and `**` segments, interpreted by a resolver chain
//! - A bounded cache of single-segment pointers used during fan-out
//! - Deterministic path enumeration of a subtree (`util::PathTree`)
//! - Copy and build specs plus their compiled decorator form
//! - The `TreeNode` adapter contract and its serde_json implementation

pub mod config;
pub mod errors;
pub mod json;
pub mod logging_facility;
pub mod operation;
pub mod path;
pub mod tree;
pub mod util;

pub use pointer_path_types as types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use errors::{ExError, ExErrorKind, PointerError, Result};
pub use path::{NestedPointer, PathCompiler, Pointer, PointerCache, Segment};
pub use tree::TreeNode;
