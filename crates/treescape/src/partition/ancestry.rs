//! Upward walks through parent pointers.
//!
//! [`Ancestry`] answers per-node questions (depth, root path, bounding box)
//! without a full traversal. The parent array is built once in O(n); each
//! query costs O(depth).

use crate::repr::{NodeId, Side, TreeView};

use super::rect::Rect;

/// Parent pointer for every node of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    parents: Box<[Option<(NodeId, Side)>]>,
}

impl Ancestry {
    /// Build the parent array from child links. Out-of-range child ids are
    /// ignored; validate the tree first if it comes from untrusted input.
    pub fn new<T: TreeView + ?Sized>(tree: &T) -> Self {
        let n_nodes = tree.n_nodes();
        let mut parents = vec![None; n_nodes];
        for node in 0..n_nodes as NodeId {
            if let Some((left, right)) = tree.children(node) {
                for (child, side) in [(left, Side::Left), (right, Side::Right)] {
                    if let Some(slot) = parents.get_mut(child as usize) {
                        *slot = Some((node, side));
                    }
                }
            }
        }
        Self {
            parents: parents.into_boxed_slice(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.parents.len()
    }

    /// Parent of a node and the side the node hangs from. `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<(NodeId, Side)> {
        self.parents.get(node as usize).copied().flatten()
    }

    /// Ancestors from the nearest up to the root, each paired with the side
    /// of the link leading back down towards `node`.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            ancestry: self,
            current: node,
            remaining: self.parents.len(),
        }
    }

    /// Number of links between the root and `node`.
    pub fn depth(&self, node: NodeId) -> usize {
        self.ancestors(node).count()
    }

    /// Links from the root down to `node`.
    pub fn path(&self, node: NodeId) -> Vec<(NodeId, Side)> {
        let mut path: Vec<_> = self.ancestors(node).collect();
        path.reverse();
        path
    }

    /// Bounding box of `node`, narrowed by every ancestor split.
    pub fn node_box<T: TreeView + ?Sized>(&self, tree: &T, node: NodeId, domain: Rect) -> Rect {
        self.ancestors(node).fold(domain, |bbox, (ancestor, side)| {
            bbox.narrow(
                tree.split_axis(ancestor),
                side,
                tree.split_threshold(ancestor),
            )
        })
    }
}

/// Iterator returned by [`Ancestry::ancestors`].
///
/// Stops after `n_nodes` steps so malformed parent chains cannot loop.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    ancestry: &'a Ancestry,
    current: NodeId,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = (NodeId, Side);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let (parent, side) = self.ancestry.parent(self.current)?;
        self.current = parent;
        Some((parent, side))
    }
}
