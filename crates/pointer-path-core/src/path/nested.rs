//! Nested pointers
//!
//! A [`NestedPointer`] may match many locations. When its path carries no
//! `*` or `**` segment it degrades to the single [`Pointer`] it wraps and every
//! operation goes straight through that pointer.

use std::fmt;
use std::sync::Arc;

use crate::errors::Result;
use crate::operation::filter::NodeFilter;
use crate::operation::transform::Transform;
use crate::path::resolver::{self, CopyRun, Stage};
use crate::path::{Pointer, PointerCache};
use crate::tree::TreeNode;

#[derive(Debug, Clone)]
pub struct NestedPointer {
    path: String,
    stages: Vec<Stage>,
    cache: Arc<PointerCache>,
    descent_fast_path: bool,
}

impl NestedPointer {
    pub(crate) fn new(
        path: &str,
        stages: Vec<Stage>,
        cache: Arc<PointerCache>,
        descent_fast_path: bool,
    ) -> Self {
        Self {
            path: path.to_string(),
            stages,
            cache,
            descent_fast_path,
        }
    }

    /// The path this pointer was compiled from
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// True iff the chain has no wildcard or descent stage
    pub fn is_absolute(&self) -> bool {
        self.stages
            .iter()
            .all(|stage| matches!(stage, Stage::Literal(_) | Stage::Terminal))
    }

    /// The single pointer an absolute chain reduces to
    pub fn as_pointer(&self) -> Option<&Pointer> {
        match self.stages.as_slice() {
            [Stage::Literal(pointer), Stage::Terminal] => Some(pointer),
            _ => None,
        }
    }

    /// The first match in document order
    pub fn at<'a, N: TreeNode>(&self, root: &'a N) -> Option<&'a N> {
        match self.as_pointer() {
            Some(pointer) => pointer.at(root),
            None => self.all_at(root).into_iter().next(),
        }
    }

    /// Every match in document order
    pub fn all_at<'a, N: TreeNode>(&self, root: &'a N) -> Vec<&'a N> {
        if let Some(pointer) = self.as_pointer() {
            return pointer.at(root).into_iter().collect();
        }
        let mut out = Vec::new();
        resolver::resolve(&self.stages, root, &mut out);
        out
    }

    /// Detach every match, returning the removed values in document order
    pub fn remove<N: TreeNode>(&self, root: &mut N) -> Vec<N> {
        if let Some(pointer) = self.as_pointer() {
            return pointer.remove(root).into_iter().collect();
        }
        let mut out = Vec::new();
        resolver::remove(&self.stages, root, &self.cache, &mut out);
        out
    }

    /// Copy every match to the same concrete location in `into`
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if a destination location cannot hold the copy.
    pub fn copy<N: TreeNode>(&self, from: &N, into: &mut N) -> Result<()> {
        self.copy_filtered(from, into, None)
    }

    /// [`NestedPointer::copy`] keeping only matches accepted by `filter`
    ///
    /// # Errors
    ///
    /// As [`NestedPointer::copy`].
    pub fn copy_filtered<N: TreeNode>(
        &self,
        from: &N,
        into: &mut N,
        filter: Option<&dyn NodeFilter<N>>,
    ) -> Result<()> {
        if let Some(pointer) = self.as_pointer() {
            return pointer.copy(from, into, filter);
        }
        let mut run = CopyRun::new(from, filter, self.descent_fast_path);
        resolver::copy(&self.stages, from, &mut Vec::new(), &mut run, into)
    }

    /// Replace every match in place with `transform(match)`
    ///
    /// # Errors
    ///
    /// Returns the transform's error. An absolute path additionally fails with
    /// `MissingParent` when the parent of the target is absent.
    pub fn apply<N, T>(&self, root: &mut N, transform: &T) -> Result<()>
    where
        N: TreeNode,
        T: Transform<N> + ?Sized,
    {
        match self.as_pointer() {
            Some(pointer) => pointer.apply(root, transform),
            None => resolver::set(&self.stages, root, transform),
        }
    }
}

impl fmt::Display for NestedPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq for NestedPointer {
    fn eq(&self, other: &Self) -> bool {
        self.stages == other.stages
    }
}
