//! Traversal helpers

pub mod path_tree;

pub use path_tree::{Element, PathTree};
