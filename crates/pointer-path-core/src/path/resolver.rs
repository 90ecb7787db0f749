//! Resolver chain for wildcard and descent paths
//!
//! A nested path compiles into a flat sequence of [`Stage`]s that always ends
//! with exactly one [`Stage::Terminal`]. Each multi-match operation is a
//! single recursive interpreter over that sequence: a stage consumes the head
//! of the slice and hands the rest to every node it advances into.
//!
//! Traversal never fails on absence. A missing literal step simply
//! contributes no matches.

use crate::errors::{PointerError, Result};
use crate::operation::filter::NodeFilter;
use crate::operation::transform::Transform;
use crate::path::pointer::ArrayPlacement;
use crate::path::{Pointer, PointerCache, Segment};
use crate::tree::TreeNode;
use crate::types::NodeKind;
use crate::util::PathTree;

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// One or more fixed steps, compiled as a relative pointer
    Literal(Pointer),
    /// `*`: every immediate child
    Wildcard,
    /// `**`: the current node and every descendant
    Descent,
    /// Performs the read, removal, write or copy at the visited node
    Terminal,
}

impl Stage {
    pub fn is_literal(&self) -> bool {
        matches!(self, Stage::Literal(_))
    }
}

/// Split `path` into stages, merging consecutive literal segments into one pointer
///
/// # Errors
///
/// Returns `MalformedPath` for a missing leading `/`, a bad `~` escape, or a
/// segment mixing `*` with anything else.
pub fn build_chain(path: &str) -> Result<Vec<Stage>> {
    if path.is_empty() {
        return Ok(vec![Stage::Literal(Pointer::root()), Stage::Terminal]);
    }
    let Some(body) = path.strip_prefix('/') else {
        return Err(PointerError::malformed(path, "must be empty or start with '/'"));
    };

    let mut stages = Vec::new();
    let mut literal: Vec<Segment> = Vec::new();

    for raw in body.split('/') {
        let fan_out = match raw {
            "*" => Stage::Wildcard,
            "**" => Stage::Descent,
            _ if raw.contains('*') => {
                return Err(PointerError::malformed(
                    path,
                    format!("'{}' mixes a wildcard with other characters", raw),
                ))
            }
            _ => {
                literal.push(Segment::unescape(raw, path)?);
                continue;
            }
        };
        if !literal.is_empty() {
            stages.push(Stage::Literal(Pointer::from_segments(std::mem::take(&mut literal))));
        }
        stages.push(fan_out);
    }

    if !literal.is_empty() {
        stages.push(Stage::Literal(Pointer::from_segments(literal)));
    }
    stages.push(Stage::Terminal);
    Ok(stages)
}

/// Collect every match in document order
pub(crate) fn resolve<'a, N: TreeNode>(stages: &[Stage], node: &'a N, out: &mut Vec<&'a N>) {
    let Some((stage, rest)) = stages.split_first() else {
        return;
    };
    match stage {
        Stage::Terminal => out.push(node),
        Stage::Literal(pointer) => {
            if let Some(child) = pointer.at(node) {
                resolve(rest, child, out);
            }
        }
        Stage::Wildcard => {
            for child in node.iterate() {
                resolve(rest, child, out);
            }
        }
        Stage::Descent => {
            resolve(rest, node, out);
            for child in node.iterate() {
                resolve(stages, child, out);
            }
        }
    }
}

/// Detach every match
///
/// A stage directly followed by the terminal detaches from the node it is
/// visiting, since that node is the matched child's parent.
pub(crate) fn remove<N: TreeNode>(
    stages: &[Stage],
    node: &mut N,
    cache: &PointerCache,
    out: &mut Vec<N>,
) {
    let Some((stage, rest)) = stages.split_first() else {
        return;
    };
    let terminal_next = matches!(rest, [Stage::Terminal]);

    match stage {
        // nothing above to detach from
        Stage::Terminal => {}
        Stage::Literal(pointer) if terminal_next => out.extend(pointer.remove(node)),
        Stage::Literal(pointer) => {
            if let Some(child) = pointer.at_mut(node) {
                remove(rest, child, cache, out);
            }
        }
        Stage::Wildcard | Stage::Descent if terminal_next => detach_children(node, cache, out),
        Stage::Wildcard => {
            for child in node.iterate_mut() {
                remove(rest, child, cache, out);
            }
        }
        Stage::Descent => {
            remove(rest, node, cache, out);
            for child in node.iterate_mut() {
                remove(stages, child, cache, out);
            }
        }
    }
}

/// Remove all direct children, highest index first so positions stay valid
fn detach_children<N: TreeNode>(node: &mut N, cache: &PointerCache, out: &mut Vec<N>) {
    let reversed = node.kind() == NodeKind::Array;
    let mut segments = node.child_segments();
    if reversed {
        segments.reverse();
    }

    let mut removed: Vec<N> = segments
        .iter()
        .filter_map(|segment| cache.get(segment).remove(node))
        .collect();
    if reversed {
        removed.reverse();
    }
    out.extend(removed);
}

/// Replace every match with `transform(match)`
///
/// # Errors
///
/// Stops at and returns the first transform failure.
pub(crate) fn set<N, T>(stages: &[Stage], node: &mut N, transform: &T) -> Result<()>
where
    N: TreeNode,
    T: Transform<N> + ?Sized,
{
    let Some((stage, rest)) = stages.split_first() else {
        return Ok(());
    };
    match stage {
        Stage::Terminal => {
            *node = transform.apply(node)?;
        }
        Stage::Literal(pointer) => {
            if let Some(child) = pointer.at_mut(node) {
                set(rest, child, transform)?;
            }
        }
        Stage::Wildcard => {
            for child in node.iterate_mut() {
                set(rest, child, transform)?;
            }
        }
        // children first, so a replacement is never walked into
        Stage::Descent => {
            for child in node.iterate_mut() {
                set(stages, child, transform)?;
            }
            set(rest, node, transform)?;
        }
    }
    Ok(())
}

/// Shared state of one nested copy
pub(crate) struct CopyRun<'r, N> {
    /// The source root every queued path is relative to
    pub root: &'r N,
    pub filter: Option<&'r dyn NodeFilter<N>>,
    pub fast_path: bool,
    placement: ArrayPlacement,
}

impl<'r, N> CopyRun<'r, N> {
    pub fn new(root: &'r N, filter: Option<&'r dyn NodeFilter<N>>, fast_path: bool) -> Self {
        Self {
            root,
            filter,
            fast_path,
            placement: ArrayPlacement::default(),
        }
    }
}

/// Copy every match from `run.root` to the same concrete path in `into`
///
/// `queue` holds the concrete segments walked so far; the terminal stage
/// turns it into an absolute pointer and copies through it, so filtering and
/// container creation behave exactly like a direct pointer copy.
///
/// # Errors
///
/// Returns the first destination failure from [`Pointer::copy`].
pub(crate) fn copy<N: TreeNode>(
    stages: &[Stage],
    node: &N,
    queue: &mut Vec<Segment>,
    run: &mut CopyRun<'_, N>,
    into: &mut N,
) -> Result<()> {
    let Some((stage, rest)) = stages.split_first() else {
        return Ok(());
    };
    match stage {
        Stage::Terminal => Pointer::from_segments(queue.clone()).copy_mapped(
            run.root,
            into,
            run.filter,
            &mut run.placement,
        ),
        Stage::Literal(pointer) => {
            let Some(child) = pointer.at(node) else {
                return Ok(());
            };
            with_queued(queue, pointer.segments(), |queue| {
                copy(rest, child, queue, run, into)
            })
        }
        Stage::Wildcard => {
            for segment in node.child_segments() {
                if let Some(child) = node.child(&segment) {
                    with_queued(queue, std::slice::from_ref(&segment), |queue| {
                        copy(rest, child, queue, run, into)
                    })?;
                }
            }
            Ok(())
        }
        Stage::Descent => {
            // every descendant path is contained in the node itself
            if run.fast_path && run.filter.is_none() && matches!(rest, [Stage::Terminal]) {
                return copy(rest, node, queue, run, into);
            }

            let snapshot = PathTree::from_node(node);
            for path in snapshot.depth_first_paths() {
                let Some(target) = Pointer::from_segments(path.to_vec()).at(node) else {
                    continue;
                };
                with_queued(queue, path, |queue| copy(rest, target, queue, run, into))?;
            }
            Ok(())
        }
    }
}

fn with_queued<F>(queue: &mut Vec<Segment>, segments: &[Segment], f: F) -> Result<()>
where
    F: FnOnce(&mut Vec<Segment>) -> Result<()>,
{
    let mark = queue.len();
    queue.extend_from_slice(segments);
    let result = f(queue);
    queue.truncate(mark);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn chain(path: &str) -> Vec<Stage> {
        build_chain(path).unwrap()
    }

    fn literal(path: &str) -> Stage {
        Stage::Literal(Pointer::parse(path).unwrap())
    }

    #[test]
    fn test_build_chain_merges_literals() {
        assert_eq!(
            chain("/person/**/measure/value"),
            vec![
                literal("/person"),
                Stage::Descent,
                literal("/measure/value"),
                Stage::Terminal
            ]
        );
        assert_eq!(chain("/*"), vec![Stage::Wildcard, Stage::Terminal]);
        assert_eq!(chain(""), vec![literal(""), Stage::Terminal]);
        assert_eq!(chain("/a/b"), vec![literal("/a/b"), Stage::Terminal]);
    }

    #[test]
    fn test_build_chain_rejects_mixed_wildcards() {
        for bad in ["/a*", "/***", "/a/*b/c", "person/*", "/a~3"] {
            assert!(
                matches!(build_chain(bad), Err(PointerError::MalformedPath { .. })),
                "{} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn test_resolve_descent_matches_zero_depth() {
        let doc = json!({"x": 1, "a": {"x": 2, "b": {"x": 3}}});
        let mut out = Vec::new();
        resolve(&chain("/**/x"), &doc, &mut out);
        assert_eq!(out, vec![&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn test_remove_wildcard_array_in_document_order() {
        let mut doc = json!({"list": [1, 2, 3]});
        let cache = PointerCache::new(8);
        let mut out = Vec::new();
        remove(&chain("/list/*"), &mut doc, &cache, &mut out);
        assert_eq!(out, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(doc, json!({"list": []}));
        assert!(cache.contains(&Segment::from_index(0)));
    }

    #[test]
    fn test_set_wildcard() {
        let mut doc = json!({"a": {"v": 1}, "b": {"v": 2}});
        let negate = |v: &Value| json!(-v.as_i64().unwrap_or_default());
        set(&chain("/*/v"), &mut doc, &negate).unwrap();
        assert_eq!(doc, json!({"a": {"v": -1}, "b": {"v": -2}}));
    }

    #[test]
    fn test_copy_descent_snapshot_filters_each_path() {
        let from = json!({"list": [{"keep": true, "v": 1}, {"keep": false, "v": 2}]});
        let mut into = json!({});
        let leaves_except_two = |v: &Value| !v.is_object() && v != &json!(2);
        let mut run = CopyRun::new(&from, Some(&leaves_except_two as &dyn NodeFilter<Value>), true);
        copy(&chain("/list/*/**"), &from, &mut Vec::new(), &mut run, &mut into).unwrap();
        assert_eq!(into, json!({"list": [{"keep": true, "v": 1}, {"keep": false}]}));
    }
}
