//! Top-down partition extraction.
//!
//! A single walk from the root carries each node's bounding box as an explicit
//! value. Split nodes produce a [`SplitLine`] spanning their box, leaf (and
//! pruned) nodes produce a [`LeafRegion`] covering it.

use crate::repr::{validate_tree, NodeId, NodeRole, SplitAxis, TreeValidationError, TreeView};

use super::depth::roles_unchecked;
use super::rect::Rect;

/// A split boundary drawn across its node's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLine {
    pub node: NodeId,
    /// Axis the split compares against. `X` splits are vertical lines.
    pub axis: SplitAxis,
    /// Position on `axis` (the threshold).
    pub at: f64,
    /// `(from, to)` along the other axis.
    pub span: (f64, f64),
}

impl SplitLine {
    /// Start and end point in data coordinates.
    pub fn endpoints(&self) -> ([f64; 2], [f64; 2]) {
        let (from, to) = self.span;
        match self.axis {
            SplitAxis::X => ([self.at, from], [self.at, to]),
            SplitAxis::Y => ([from, self.at], [to, self.at]),
        }
    }

    pub fn length(&self) -> f64 {
        (self.span.1 - self.span.0).max(0.0)
    }
}

/// A filled region: the box of a drawn leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafRegion {
    pub node: NodeId,
    pub rect: Rect,
    pub value: f64,
}

/// Everything the partition plot draws for one tree, in node-id order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    domain: Rect,
    roles: Vec<NodeRole>,
    boxes: Vec<Option<Rect>>,
    lines: Vec<SplitLine>,
    regions: Vec<LeafRegion>,
}

impl Partition {
    /// Extract lines and regions for a tree.
    ///
    /// `max_depth` truncates the display as described in
    /// [`display_roles`](super::display_roles). Split lines whose threshold
    /// falls outside the node's box are left out; their children still get
    /// (possibly empty) boxes.
    ///
    /// # Errors
    ///
    /// Returns [`TreeValidationError`] if the tree is malformed.
    pub fn extract<T: TreeView + ?Sized>(
        tree: &T,
        domain: Rect,
        max_depth: Option<usize>,
    ) -> Result<Self, TreeValidationError> {
        validate_tree(tree)?;
        let roles = roles_unchecked(tree, max_depth);
        let n_nodes = tree.n_nodes();
        let mut boxes = vec![None; n_nodes];
        let mut lines = Vec::new();
        let mut regions = Vec::new();

        if n_nodes > 0 {
            let mut stack: Vec<(NodeId, Rect)> = vec![(0, domain)];
            while let Some((node, bbox)) = stack.pop() {
                let idx = node as usize;
                boxes[idx] = Some(bbox);

                match roles[idx] {
                    NodeRole::Hidden => {}
                    NodeRole::Leaf => regions.push(LeafRegion {
                        node,
                        rect: bbox,
                        value: tree.value(node),
                    }),
                    NodeRole::Split(axis) => {
                        let threshold = tree.split_threshold(node);
                        let span = bbox.range(axis.other());
                        if bbox.contains_on(axis, threshold) && span.0 <= span.1 {
                            lines.push(SplitLine {
                                node,
                                axis,
                                at: threshold,
                                span,
                            });
                        } else {
                            tracing::warn!(
                                node,
                                threshold,
                                ?axis,
                                "split threshold outside node box, line skipped"
                            );
                        }

                        let (left_box, right_box) = bbox.split(axis, threshold);
                        let left = tree.left_child(node);
                        let right = tree.right_child(node);
                        stack.push((right, right_box));
                        stack.push((left, left_box));
                    }
                }
            }
        }

        lines.sort_by_key(|l| l.node);
        regions.sort_by_key(|r| r.node);

        tracing::debug!(
            n_nodes,
            n_lines = lines.len(),
            n_regions = regions.len(),
            "partition extracted"
        );

        Ok(Self {
            domain,
            roles,
            boxes,
            lines,
            regions,
        })
    }

    pub fn domain(&self) -> Rect {
        self.domain
    }

    pub fn lines(&self) -> &[SplitLine] {
        &self.lines
    }

    pub fn regions(&self) -> &[LeafRegion] {
        &self.regions
    }

    /// Bounding box of a node, `None` if the node is below the display cutoff.
    pub fn node_box(&self, node: NodeId) -> Option<Rect> {
        match self.roles.get(node as usize) {
            Some(role) if role.is_drawn() => self.boxes[node as usize],
            _ => None,
        }
    }

    /// Region drawn for a node, if any.
    pub fn region(&self, node: NodeId) -> Option<&LeafRegion> {
        self.regions
            .binary_search_by_key(&node, |r| r.node)
            .ok()
            .map(|i| &self.regions[i])
    }

    /// Total area covered by regions.
    pub fn covered_area(&self) -> f64 {
        self.regions.iter().map(|r| r.rect.area()).sum()
    }
}
