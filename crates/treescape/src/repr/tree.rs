//! Canonical tree representation (SoA) and read-only tree interface.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage
//! - [`TreeView`]: Read-only trait for unified tree access
//! - [`TreeValidationError`]: Structural validation errors
//!
//! For building trees node by node, see [`super::mutable_tree::MutableTree`].

use super::node::SplitAxis;
use super::NodeId;

// ============================================================================
// TreeView Trait
// ============================================================================

/// Read-only view of a fitted 2D regression tree.
///
/// Implemented for both [`Tree`] and [`MutableTree`](super::MutableTree), so
/// partition extraction and validation work on either.
///
/// Child accessors must only be called for split nodes; leaf child slots hold
/// no meaningful ids.
pub trait TreeView {
    /// Number of nodes in the tree.
    fn n_nodes(&self) -> usize;

    /// Check if a node is a leaf.
    fn is_leaf(&self, node: NodeId) -> bool;

    /// Axis a split node compares against.
    fn split_axis(&self, node: NodeId) -> SplitAxis;

    /// Threshold of a split node. Samples with `value <= threshold` go left.
    fn split_threshold(&self, node: NodeId) -> f64;

    /// Left child of a split node.
    fn left_child(&self, node: NodeId) -> NodeId;

    /// Right child of a split node.
    fn right_child(&self, node: NodeId) -> NodeId;

    /// Predicted value stored at a node. Internal nodes carry the mean of the
    /// samples that reached them, which is what depth pruning draws.
    fn value(&self, node: NodeId) -> f64;

    /// Whether the tree has no nodes at all.
    fn is_empty(&self) -> bool {
        self.n_nodes() == 0
    }

    /// Both children of a split node, `None` for leaves.
    #[inline]
    fn children(&self, node: NodeId) -> Option<(NodeId, NodeId)> {
        if self.is_leaf(node) {
            None
        } else {
            Some((self.left_child(node), self.right_child(node)))
        }
    }

    /// Number of leaf nodes.
    fn n_leaves(&self) -> usize {
        (0..self.n_nodes())
            .filter(|&n| self.is_leaf(n as NodeId))
            .count()
    }

    /// Traverse the tree to find the leaf reached by a point.
    ///
    /// Returns `None` for an empty tree.
    fn traverse_to_leaf(&self, point: [f64; 2]) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }

        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let fvalue = point[self.split_axis(node).feature()];
            node = if fvalue <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }

        Some(node)
    }
}

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeValidationError {
    /// A per-node array does not have one entry per node.
    #[error("array `{field}` has {len} entries but the tree has {n_nodes} nodes")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        n_nodes: usize,
    },
    /// A child pointer references an out-of-bounds node.
    #[error("node {node} has {side} child {child} but the tree has {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
    /// Split thresholds must be finite to bound a region.
    #[error("split node {node} has non-finite threshold {threshold}")]
    NonFiniteThreshold { node: NodeId, threshold: f64 },
    /// Node values must be finite to be coloured.
    #[error("node {node} has non-finite value {value}")]
    NonFiniteValue { node: NodeId, value: f64 },
}

/// Validate basic structural invariants of any tree.
///
/// An empty tree is valid. A non-empty tree must be a finite, acyclic binary
/// tree rooted at node 0 in which every node is reachable exactly once.
pub fn validate_tree<T: TreeView + ?Sized>(tree: &T) -> Result<(), TreeValidationError> {
    let n_nodes = tree.n_nodes();
    if n_nodes == 0 {
        return Ok(());
    }

    for node in 0..n_nodes as NodeId {
        let value = tree.value(node);
        if !value.is_finite() {
            return Err(TreeValidationError::NonFiniteValue { node, value });
        }
        if !tree.is_leaf(node) {
            let threshold = tree.split_threshold(node);
            if !threshold.is_finite() {
                return Err(TreeValidationError::NonFiniteThreshold { node, threshold });
            }
        }
    }

    // Iterative DFS with color marking.
    // 0 = unvisited, 1 = visiting, 2 = done
    let mut color = vec![0u8; n_nodes];
    let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

    while let Some((node, phase)) = stack.pop() {
        let node_usize = node as usize;

        match phase {
            0 => {
                match color[node_usize] {
                    0 => {}
                    1 => return Err(TreeValidationError::CycleDetected { node }),
                    _ => return Err(TreeValidationError::DuplicateVisit { node }),
                }

                color[node_usize] = 1;
                stack.push((node, 1));

                if let Some((left, right)) = tree.children(node) {
                    if left == node || right == node {
                        return Err(TreeValidationError::SelfLoop { node });
                    }

                    for (side, child) in [("left", left), ("right", right)] {
                        if child as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side,
                                child,
                                n_nodes,
                            });
                        }
                    }

                    stack.push((right, 0));
                    stack.push((left, 0));
                }
            }
            _ => {
                color[node_usize] = 2;
            }
        }
    }

    if let Some(i) = color.iter().position(|&c| c == 0) {
        return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
    }

    Ok(())
}

// ============================================================================
// Tree
// ============================================================================

/// Structure-of-Arrays tree storage.
///
/// Stores tree nodes in flat arrays. Child indices are local to this tree
/// (0 = root). Leaf child slots are never read.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_axes: Box<[SplitAxis]>,
    split_thresholds: Box<[f64]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    is_leaf: Box<[bool]>,
    values: Box<[f64]>,
}

impl Tree {
    /// Create a new tree from parallel arrays without validating it.
    ///
    /// All arrays must have the same length (number of nodes). Use
    /// [`Tree::try_new`] for arrays of unknown provenance.
    pub fn new(
        split_axes: Vec<SplitAxis>,
        split_thresholds: Vec<f64>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        is_leaf: Vec<bool>,
        values: Vec<f64>,
    ) -> Self {
        let n_nodes = is_leaf.len();
        debug_assert_eq!(n_nodes, split_axes.len());
        debug_assert_eq!(n_nodes, split_thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, values.len());

        Self {
            split_axes: split_axes.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            values: values.into_boxed_slice(),
        }
    }

    /// Create a tree from parallel arrays, checking lengths and structure.
    pub fn try_new(
        split_axes: Vec<SplitAxis>,
        split_thresholds: Vec<f64>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        is_leaf: Vec<bool>,
        values: Vec<f64>,
    ) -> Result<Self, TreeValidationError> {
        let n_nodes = is_leaf.len();
        let lengths = [
            ("split_axes", split_axes.len()),
            ("split_thresholds", split_thresholds.len()),
            ("left_children", left_children.len()),
            ("right_children", right_children.len()),
            ("values", values.len()),
        ];
        for (field, len) in lengths {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch { field, len, n_nodes });
            }
        }

        let tree = Self::new(
            split_axes,
            split_thresholds,
            left_children,
            right_children,
            is_leaf,
            values,
        );
        tree.validate()?;
        Ok(tree)
    }

    /// An empty tree. Renders no regions and no lines.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// A tree consisting of a single leaf.
    pub fn leaf(value: f64) -> Self {
        Self::new(vec![SplitAxis::X], vec![0.0], vec![0], vec![0], vec![true], vec![value])
    }

    /// Validate basic structural invariants for this tree.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        validate_tree(self)
    }

    /// Per-node values as a slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Predict the value for a single point.
    pub fn predict_point(&self, point: [f64; 2]) -> Option<f64> {
        self.traverse_to_leaf(point).map(|leaf| self.values[leaf as usize])
    }
}

// =============================================================================
// TreeView for Tree
// =============================================================================

impl TreeView for Tree {
    #[inline]
    fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    fn split_axis(&self, node: NodeId) -> SplitAxis {
        self.split_axes[node as usize]
    }

    #[inline]
    fn split_threshold(&self, node: NodeId) -> f64 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        debug_assert!(!self.is_leaf(node), "left_child called on leaf {node}");
        self.left_children[node as usize]
    }

    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        debug_assert!(!self.is_leaf(node), "right_child called on leaf {node}");
        self.right_children[node as usize]
    }

    #[inline]
    fn value(&self, node: NodeId) -> f64 {
        self.values[node as usize]
    }
}
