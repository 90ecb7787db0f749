//! Absolute pointers
//!
//! A [`Pointer`] addresses exactly one location. It is compiled once and can be
//! driven against any number of roots. Reads never create anything; `set`,
//! `add`, `object_at` and `copy` create the intermediate containers they need,
//! choosing an array when the following segment looks like an index and a map
//! otherwise.

use std::collections::HashMap;
use std::fmt;

use crate::errors::{PointerError, Result};
use crate::operation::filter::NodeFilter;
use crate::operation::transform::Transform;
use crate::path::segment::{render, Segment};
use crate::tree::TreeNode;
use crate::types::NodeKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pointer {
    segments: Vec<Segment>,
}

impl Pointer {
    /// The pointer to the document root (`""`)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a concrete path
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` if the path does not start with `/`, carries a
    /// bad `~` escape, or contains a `*` or `**` segment.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        let Some(body) = path.strip_prefix('/') else {
            return Err(PointerError::malformed(path, "must be empty or start with '/'"));
        };

        let mut segments = Vec::new();
        for raw in body.split('/') {
            if raw.contains('*') {
                return Err(PointerError::malformed(
                    path,
                    format!("wildcard segment '{}' is not allowed in an absolute path", raw),
                ));
            }
            segments.push(Segment::unescape(raw, path)?);
        }
        Ok(Self { segments })
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, absent for the root
    pub fn tail(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Pointer to the container holding the tail; the root's head is the root
    pub fn head(&self) -> Pointer {
        let end = self.segments.len().saturating_sub(1);
        Self {
            segments: self.segments[..end].to_vec(),
        }
    }

    /// Concatenate two pointers
    pub fn append(&self, other: &Pointer) -> Pointer {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Resolve the location; `None` if any step is absent
    pub fn at<'a, N: TreeNode>(&self, root: &'a N) -> Option<&'a N> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| node.child(segment))
    }

    pub fn at_mut<'a, N: TreeNode>(&self, root: &'a mut N) -> Option<&'a mut N> {
        let mut node = root;
        for segment in &self.segments {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    /// Resolve the container at this location, creating it and any missing
    /// ancestors as maps (or arrays, before an index segment)
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the location or an ancestor holds a value.
    pub fn object_at<'a, N: TreeNode>(&self, root: &'a mut N) -> Result<&'a mut N> {
        let Some(tail) = self.tail() else {
            return match root.kind() {
                NodeKind::Value => Err(PointerError::invalid(self, "root is not a container")),
                _ => Ok(root),
            };
        };

        let parent = self.ensure_parent(root)?;
        if parent.child(tail).is_none() {
            self.place(parent, tail, N::new_map())?;
        }
        match parent.child_mut(tail) {
            Some(node) if node.is_container() => Ok(node),
            Some(_) => Err(PointerError::invalid(self, "location holds a value, not a container")),
            None => Err(PointerError::invalid(self, "container could not be created")),
        }
    }

    /// Detach and return the value at this location
    ///
    /// Array removal shifts later elements down. The root cannot be detached.
    pub fn remove<N: TreeNode>(&self, root: &mut N) -> Option<N> {
        let tail = self.tail()?;
        let parent = self.head().at_mut(root)?;
        match parent.kind() {
            NodeKind::Map => parent.remove_field(tail.key()),
            NodeKind::Array => tail.index().and_then(|i| parent.remove_element(i)),
            NodeKind::Value => None,
        }
    }

    /// Deep-copy the value at this location in `from` to the same location in `into`
    ///
    /// A missing source value, or one rejected by `filter`, is a no-op. Copying
    /// the root merges its children into `into`. Array steps in the
    /// destination replace an in-bounds element and append otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if a destination step runs into a value or
    /// the root merge combines incompatible kinds.
    pub fn copy<N: TreeNode>(
        &self,
        from: &N,
        into: &mut N,
        filter: Option<&dyn NodeFilter<N>>,
    ) -> Result<()> {
        self.copy_mapped(from, into, filter, &mut ArrayPlacement::default())
    }

    /// [`Pointer::copy`] that reuses the destination array positions recorded
    /// in `placement` for source elements it has already copied into
    pub(crate) fn copy_mapped<N: TreeNode>(
        &self,
        from: &N,
        into: &mut N,
        filter: Option<&dyn NodeFilter<N>>,
        placement: &mut ArrayPlacement,
    ) -> Result<()> {
        let Some(value) = self.at(from) else {
            return Ok(());
        };
        if let Some(filter) = filter {
            if !filter.test(value) {
                return Ok(());
            }
        }

        let Some(tail) = self.tail() else {
            return self.merge_root(value, into);
        };

        let mut node = into;
        let parents = &self.segments[..self.segments.len() - 1];
        for (i, segment) in parents.iter().enumerate() {
            let next_is_index = self.segments[i + 1].is_index();
            node = self.copy_step(node, segment, next_is_index, i, placement)?;
        }

        let value = value.clone();
        match node.kind() {
            NodeKind::Map => {
                node.insert_field(tail.key(), value);
                Ok(())
            }
            NodeKind::Array => {
                let slot = placement
                    .get(&self.segments)
                    .or_else(|| tail.index())
                    .filter(|&i| i < node.child_count());
                let index = match slot.and_then(|i| node.get_element_mut(i).map(|e| (i, e))) {
                    Some((i, element)) => {
                        *element = value;
                        i
                    }
                    None => {
                        node.push_element(value);
                        node.child_count() - 1
                    }
                };
                placement.record(&self.segments, index);
                Ok(())
            }
            NodeKind::Value => Err(PointerError::invalid(self, "destination parent is a value")),
        }
    }

    /// Replace the current value with `transform(current)`
    ///
    /// A missing tail inside an existing parent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `MissingParent` if the parent container does not exist,
    /// `InvalidOperation` if the parent is a value, or the transform's error.
    pub fn apply<N, T>(&self, root: &mut N, transform: &T) -> Result<()>
    where
        N: TreeNode,
        T: Transform<N> + ?Sized,
    {
        let Some(tail) = self.tail() else {
            *root = transform.apply(root)?;
            return Ok(());
        };

        let parent = self
            .head()
            .at_mut(root)
            .ok_or_else(|| PointerError::MissingParent {
                path: self.to_string(),
            })?;
        if !parent.is_container() {
            return Err(PointerError::invalid(self, "parent is a value"));
        }
        if let Some(slot) = parent.child_mut(tail) {
            *slot = transform.apply(slot)?;
        }
        Ok(())
    }

    /// Write `child` at this location, creating ancestors and padding arrays with nulls
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if an existing ancestor is a value or an array
    /// step is not an index.
    pub fn set<N: TreeNode>(&self, root: &mut N, child: N) -> Result<()> {
        let Some(tail) = self.tail() else {
            *root = child;
            return Ok(());
        };
        let parent = self.ensure_parent(root)?;
        self.place(parent, tail, child)
    }

    /// `set` with `transform(child)`
    ///
    /// # Errors
    ///
    /// As [`Pointer::set`], plus any error from the transform.
    pub fn set_with<N, T>(&self, root: &mut N, child: N, transform: &T) -> Result<()>
    where
        N: TreeNode,
        T: Transform<N> + ?Sized,
    {
        let child = transform.apply(&child)?;
        self.set(root, child)
    }

    /// Append `child` to the array at this location, creating the array if absent
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the location holds anything but an array.
    pub fn add<N: TreeNode>(&self, root: &mut N, child: N) -> Result<()> {
        let Some(tail) = self.tail() else {
            return match root.kind() {
                NodeKind::Array => {
                    root.push_element(child);
                    Ok(())
                }
                _ => Err(PointerError::invalid(self, "root is not an array")),
            };
        };

        let parent = self.ensure_parent(root)?;
        if parent.child(tail).is_none() {
            self.place(parent, tail, N::new_array())?;
        }
        match parent.child_mut(tail) {
            Some(list) if list.kind() == NodeKind::Array => {
                list.push_element(child);
                Ok(())
            }
            Some(other) => Err(PointerError::invalid(
                self,
                format!("cannot add to a {}", other.kind()),
            )),
            None => Err(PointerError::invalid(self, "array could not be created")),
        }
    }

    /// `add` with `transform(child)`
    ///
    /// # Errors
    ///
    /// As [`Pointer::add`], plus any error from the transform.
    pub fn add_with<N, T>(&self, root: &mut N, child: N, transform: &T) -> Result<()>
    where
        N: TreeNode,
        T: Transform<N> + ?Sized,
    {
        let child = transform.apply(&child)?;
        self.add(root, child)
    }

    /// Walk to the tail's parent, creating missing containers
    fn ensure_parent<'a, N: TreeNode>(&self, root: &'a mut N) -> Result<&'a mut N> {
        let mut node = root;
        let parents = &self.segments[..self.segments.len().saturating_sub(1)];
        for (i, segment) in parents.iter().enumerate() {
            if node.child(segment).is_none() {
                let fresh = if self.segments[i + 1].is_index() {
                    N::new_array()
                } else {
                    N::new_map()
                };
                self.place(node, segment, fresh)?;
            }
            node = match node.child_mut(segment) {
                Some(child) if child.is_container() => child,
                Some(_) => {
                    return Err(PointerError::invalid(
                        self,
                        format!("'{}' is not a container", segment),
                    ))
                }
                None => return Err(PointerError::invalid(self, "intermediate could not be created")),
            };
        }
        Ok(node)
    }

    /// Set-semantics write of one child into a container
    fn place<N: TreeNode>(&self, container: &mut N, segment: &Segment, value: N) -> Result<()> {
        match container.kind() {
            NodeKind::Map => {
                container.insert_field(segment.key(), value);
                Ok(())
            }
            NodeKind::Array => {
                let index = segment.index().ok_or_else(|| {
                    PointerError::invalid(self, format!("'{}' is not an array index", segment))
                })?;
                while container.child_count() < index {
                    container.push_element(N::null());
                }
                match container.get_element_mut(index) {
                    Some(slot) => *slot = value,
                    None => container.push_element(value),
                }
                Ok(())
            }
            NodeKind::Value => Err(PointerError::invalid(
                self,
                format!("cannot write '{}' into a value", segment),
            )),
        }
    }

    /// One intermediate step of a copy destination; `depth` is the position of `segment`
    fn copy_step<'a, N: TreeNode>(
        &self,
        node: &'a mut N,
        segment: &Segment,
        next_is_index: bool,
        depth: usize,
        placement: &mut ArrayPlacement,
    ) -> Result<&'a mut N> {
        let fresh = || if next_is_index { N::new_array() } else { N::new_map() };
        match node.kind() {
            NodeKind::Map => {
                if node.get_field(segment.key()).is_none() {
                    node.insert_field(segment.key(), fresh());
                }
                match node.get_field_mut(segment.key()) {
                    Some(child) if child.is_container() => Ok(child),
                    _ => Err(PointerError::invalid(
                        self,
                        format!("'{}' is not a container", segment),
                    )),
                }
            }
            NodeKind::Array => {
                let source = &self.segments[..=depth];
                let reusable = placement
                    .get(source)
                    .or_else(|| segment.index())
                    .filter(|&i| node.get_element(i).is_some_and(TreeNode::is_container));
                let index = match reusable {
                    Some(index) => index,
                    None => {
                        node.push_element(fresh());
                        node.child_count() - 1
                    }
                };
                placement.record(source, index);
                node.get_element_mut(index)
                    .ok_or_else(|| PointerError::invalid(self, "array element vanished"))
            }
            NodeKind::Value => Err(PointerError::invalid(
                self,
                format!("cannot descend into value at '{}'", segment),
            )),
        }
    }

    fn merge_root<N: TreeNode>(&self, value: &N, into: &mut N) -> Result<()> {
        match (value.kind(), into.kind()) {
            (NodeKind::Map, NodeKind::Map) => {
                for (key, child) in value.entries() {
                    into.insert_field(key, child.clone());
                }
                Ok(())
            }
            (NodeKind::Array, NodeKind::Array) => {
                for child in value.iterate() {
                    into.push_element(child.clone());
                }
                Ok(())
            }
            (from, to) => Err(PointerError::invalid(
                self,
                format!("cannot merge a {} root into a {}", from, to),
            )),
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments))
    }
}

/// Destination array positions chosen for source array elements
///
/// Keyed by the concrete source path of the element. Every path copied from
/// the same source element during one run lands in the same destination
/// element, even when compaction moved it to a lower index.
#[derive(Debug, Default)]
pub(crate) struct ArrayPlacement {
    slots: HashMap<Vec<Segment>, usize>,
}

impl ArrayPlacement {
    fn get(&self, source: &[Segment]) -> Option<usize> {
        self.slots.get(source).copied()
    }

    fn record(&mut self, source: &[Segment], index: usize) {
        if !self.slots.contains_key(source) {
            self.slots.insert(source.to_vec(), index);
        }
    }
}
