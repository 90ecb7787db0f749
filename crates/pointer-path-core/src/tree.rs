//! Tree adapter contract
//!
//! Every pointer, resolver and engine in this crate is generic over
//! [`TreeNode`]. An adapter supplies kind inspection, iteration, entry access,
//! a handful of in-place mutation primitives and scalar coercion; everything
//! else (auto-creation, padding, merging, fan-out) is built on top of these.
//!
//! Mutation primitives are only called after the caller has checked
//! [`TreeNode::kind`]. On a node of the wrong kind they do nothing.

use std::fmt::Debug;

use crate::errors::Result;
use crate::path::Segment;
use crate::types::{CoercionType, NodeKind, Scalar};

pub trait TreeNode: Clone + Debug {
    fn kind(&self) -> NodeKind;

    fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    fn new_map() -> Self;

    fn new_array() -> Self;

    fn null() -> Self;

    /// Number of direct children; zero for values
    fn child_count(&self) -> usize;

    /// Child values in native order: index order for arrays, insertion order for maps
    fn iterate(&self) -> Box<dyn Iterator<Item = &Self> + '_>;

    fn iterate_mut(&mut self) -> Box<dyn Iterator<Item = &mut Self> + '_>;

    /// `(key, child)` pairs of a map; empty for any other kind
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Self)> + '_>;

    fn get_field(&self, key: &str) -> Option<&Self>;

    fn get_field_mut(&mut self, key: &str) -> Option<&mut Self>;

    fn get_element(&self, index: usize) -> Option<&Self>;

    fn get_element_mut(&mut self, index: usize) -> Option<&mut Self>;

    /// Insert or replace a map entry, keeping the position of an existing key
    fn insert_field(&mut self, key: &str, value: Self);

    fn remove_field(&mut self, key: &str) -> Option<Self>;

    fn push_element(&mut self, value: Self);

    /// Positional removal; later elements shift down
    fn remove_element(&mut self, index: usize) -> Option<Self>;

    /// Convert an external value into a native node
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedCoercion` when `value` cannot be represented as `target`.
    fn coerce(value: Scalar, target: &CoercionType) -> Result<Self>;

    /// Segment-driven child lookup: field name on maps, index on arrays
    fn child(&self, segment: &Segment) -> Option<&Self> {
        match self.kind() {
            NodeKind::Map => self.get_field(segment.key()),
            NodeKind::Array => segment.index().and_then(|i| self.get_element(i)),
            NodeKind::Value => None,
        }
    }

    fn child_mut(&mut self, segment: &Segment) -> Option<&mut Self> {
        match self.kind() {
            NodeKind::Map => self.get_field_mut(segment.key()),
            NodeKind::Array => match segment.index() {
                Some(index) => self.get_element_mut(index),
                None => None,
            },
            NodeKind::Value => None,
        }
    }

    /// The segment naming each direct child, in iteration order
    fn child_segments(&self) -> Vec<Segment> {
        match self.kind() {
            NodeKind::Map => self.entries().map(|(key, _)| Segment::new(key)).collect(),
            NodeKind::Array => (0..self.child_count()).map(Segment::from_index).collect(),
            NodeKind::Value => Vec::new(),
        }
    }

    /// Materialize a multi-match result as an Array-kind node
    fn into_result_container(items: Vec<Self>) -> Self
    where
        Self: Sized,
    {
        let mut result = Self::new_array();
        for item in items {
            result.push_element(item);
        }
        result
    }
}
