//! Mutable tree for node-by-node construction.

use super::node::SplitAxis;
use super::tree::{Tree, TreeView};
use super::NodeId;

/// Growable tree used to assemble a [`Tree`] one node at a time.
///
/// Nodes that were allocated but never assigned are leaves with value `0.0`.
/// [`MutableTree::freeze`] does not validate; call [`Tree::validate`] when the
/// node ids come from untrusted input.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_axes: Vec<SplitAxis>,
    split_thresholds: Vec<f64>,
    left_children: Vec<NodeId>,
    right_children: Vec<NodeId>,
    is_leaf: Vec<bool>,
    values: Vec<f64>,
}

impl MutableTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n_nodes: usize) -> Self {
        Self {
            split_axes: Vec::with_capacity(n_nodes),
            split_thresholds: Vec::with_capacity(n_nodes),
            left_children: Vec::with_capacity(n_nodes),
            right_children: Vec::with_capacity(n_nodes),
            is_leaf: Vec::with_capacity(n_nodes),
            values: Vec::with_capacity(n_nodes),
        }
    }

    /// Allocate the root (node 0) as a leaf with value `0.0`.
    pub fn init_root(&mut self) -> NodeId {
        debug_assert!(self.is_leaf.is_empty(), "root already initialized");
        self.allocate()
    }

    fn allocate(&mut self) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_axes.push(SplitAxis::X);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.values.push(0.0);
        id
    }

    fn ensure_node(&mut self, node: NodeId) {
        while self.is_leaf.len() <= node as usize {
            self.allocate();
        }
    }

    /// Turn `node` into a split and allocate two fresh leaf children.
    ///
    /// Returns `(left, right)`.
    pub fn apply_split(&mut self, node: NodeId, axis: SplitAxis, threshold: f64) -> (NodeId, NodeId) {
        let left = self.allocate();
        let right = self.allocate();
        let idx = node as usize;
        self.split_axes[idx] = axis;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;
        (left, right)
    }

    /// Set a split at an explicit node id with explicit children.
    ///
    /// Allocates intermediate nodes as needed.
    pub fn set_split(
        &mut self,
        node: NodeId,
        axis: SplitAxis,
        threshold: f64,
        value: f64,
        left: NodeId,
        right: NodeId,
    ) {
        self.ensure_node(node);
        let idx = node as usize;
        self.split_axes[idx] = axis;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;
        self.values[idx] = value;
    }

    /// Make `node` a leaf with the given value.
    pub fn make_leaf(&mut self, node: NodeId, value: f64) {
        self.ensure_node(node);
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.values[idx] = value;
    }

    /// Set the value stored at a node (leaf prediction or internal mean).
    pub fn set_value(&mut self, node: NodeId, value: f64) {
        self.ensure_node(node);
        self.values[node as usize] = value;
    }

    /// Convert into an immutable [`Tree`].
    pub fn freeze(self) -> Tree {
        Tree::new(
            self.split_axes,
            self.split_thresholds,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.values,
        )
    }
}

impl TreeView for MutableTree {
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
        self.left_children[node as usize]
    }

    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    fn value(&self, node: NodeId) -> f64 {
        self.values[node as usize]
    }
}
