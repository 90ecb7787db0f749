use crate::path::{Pointer, Segment};
use crate::tree::TreeNode;

/// One recorded location of a [`PathTree`]
#[derive(Debug, Clone, Default)]
pub struct Element {
    path: Vec<Segment>,
    children: Vec<Element>,
}

impl Element {
    /// Get or insert the child named by `segment`, keeping first-insertion order
    pub fn child(&mut self, segment: impl Into<Segment>) -> &mut Element {
        let segment = segment.into();
        let position = self
            .children
            .iter()
            .position(|c| c.path.last() == Some(&segment));

        let index = match position {
            Some(index) => index,
            None => {
                let mut path = self.path.clone();
                path.push(segment);
                self.children.push(Element {
                    path,
                    children: Vec::new(),
                });
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Segments from the tree root to this element
    pub fn path(&self) -> &[Segment] {
        &self.path
    }

    pub fn pointer(&self) -> Pointer {
        Pointer::from_segments(self.path.clone())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a [Segment]>, leaves_only: bool) {
        for child in &self.children {
            child.collect(out, leaves_only);
        }
        if !leaves_only || self.is_leaf() {
            out.push(&self.path);
        }
    }
}

/// Snapshot of concrete paths used to fix descent order before any mutation
///
/// Paths are emitted depth first with children before their parent, so the
/// empty root path always comes last.
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    root: Element,
}

impl PathTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every concrete path reachable from `node`
    pub fn from_node<N: TreeNode>(node: &N) -> Self {
        let mut tree = Self::new();
        record(&mut tree.root, node);
        tree
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn child(&mut self, segment: impl Into<Segment>) -> &mut Element {
        self.root.child(segment)
    }

    /// Every recorded path, children before parents, root last
    pub fn depth_first_paths(&self) -> Vec<&[Segment]> {
        let mut out = Vec::new();
        self.root.collect(&mut out, false);
        out
    }

    pub fn depth_first_pointers(&self) -> Vec<Pointer> {
        self.depth_first_paths()
            .into_iter()
            .map(|path| Pointer::from_segments(path.to_vec()))
            .collect()
    }

    pub fn leaf_pointers(&self) -> Vec<Pointer> {
        let mut out = Vec::new();
        self.root.collect(&mut out, true);
        out.into_iter()
            .map(|path| Pointer::from_segments(path.to_vec()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.depth_first_paths().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }
}

fn record<N: TreeNode>(element: &mut Element, node: &N) {
    for segment in node.child_segments() {
        if let Some(child) = node.child(&segment) {
            record(element.child(segment), child);
        }
    }
}
