//! Match filters
//!
//! A [`NodeFilter`] decides whether a matched node takes part in a copy.
//! [`PointerFilter`] first follows an optional relative pointer from the
//! candidate node and hands whatever it finds (possibly nothing) to a
//! [`Comparison`].

use crate::path::Pointer;
use crate::tree::TreeNode;

pub trait NodeFilter<N>: Send + Sync {
    fn test(&self, node: &N) -> bool;

    /// A filter with the opposite result
    fn negate(self) -> Negate<Self>
    where
        Self: Sized,
    {
        Negate(self)
    }
}

impl<N, F> NodeFilter<N> for F
where
    F: Fn(&N) -> bool + Send + Sync,
{
    fn test(&self, node: &N) -> bool {
        self(node)
    }
}

/// Inverts the wrapped filter
#[derive(Debug, Clone)]
pub struct Negate<F>(F);

impl<F> Negate<F> {
    pub fn new(filter: F) -> Self {
        Negate(filter)
    }
}

impl<N, F: NodeFilter<N>> NodeFilter<N> for Negate<F> {
    fn test(&self, node: &N) -> bool {
        !self.0.test(node)
    }
}

/// Decides a match from the node a [`PointerFilter`] resolved
pub trait Comparison<N>: Send + Sync {
    fn compares(&self, target: Option<&N>) -> bool;
}

#[derive(Debug, Clone)]
pub struct PointerFilter<C> {
    pointer: Option<Pointer>,
    comparison: C,
}

impl<C> PointerFilter<C> {
    /// Compare the node found at `pointer`, relative to the candidate
    pub fn at(pointer: Pointer, comparison: C) -> Self {
        Self {
            pointer: Some(pointer),
            comparison,
        }
    }

    /// Compare the candidate node itself
    pub fn node(comparison: C) -> Self {
        Self {
            pointer: None,
            comparison,
        }
    }

    /// Same as [`NodeFilter::negate`], without naming the node type
    pub fn negate(self) -> Negate<Self> {
        Negate(self)
    }

    pub fn pointer(&self) -> Option<&Pointer> {
        self.pointer.as_ref()
    }

    pub fn comparison(&self) -> &C {
        &self.comparison
    }
}

impl<N, C> NodeFilter<N> for PointerFilter<C>
where
    N: TreeNode,
    C: Comparison<N>,
{
    fn test(&self, node: &N) -> bool {
        let target = match &self.pointer {
            Some(pointer) => pointer.at(node),
            None => Some(node),
        };
        self.comparison.compares(target)
    }
}
