//! Conversion from scikit-learn exports to native treescape types.

use ndarray::{Array1, Array2};

use crate::repr::{LinearModel, LinearShapeError, NodeId, SplitAxis, Tree, TreeValidationError, TreeView};

use super::json::{NodeValue, PlotDocument, SklearnLinearRegression, SklearnTree, TREE_LEAF, TREE_UNDEFINED};

/// Error type for scikit-learn model conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("array `{field}` has {len} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("node_count is {node_count} but the arrays describe {n_nodes} nodes")]
    NodeCountMismatch { node_count: usize, n_nodes: usize },
    #[error("node {node} has exactly one child (left {left}, right {right})")]
    HalfLeaf { node: usize, left: i64, right: i64 },
    #[error("node {node} references invalid child id {child}")]
    InvalidChild { node: usize, child: i64 },
    #[error("node {node} has feature {feature}, which disagrees with its children")]
    SentinelMismatch { node: usize, feature: i64 },
    /// Only features 0 and 1 can be drawn.
    #[error("unsupported dimensionality: node {node} splits on feature {feature}, expected 0 or 1")]
    UnsupportedDimensionality { node: usize, feature: i64 },
    #[error("node {node} has an empty value array")]
    EmptyValue { node: usize },
    #[error("sample {row} has {columns} columns, expected 2")]
    SampleShape { row: usize, columns: usize },
    #[error(transparent)]
    InvalidTree(#[from] TreeValidationError),
    #[error(transparent)]
    LinearShape(#[from] LinearShapeError),
}

impl SklearnTree {
    /// Number of nodes described by the arrays.
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    /// Convert to a native, validated [`Tree`].
    pub fn to_tree(&self) -> Result<Tree, ConversionError> {
        let n_nodes = self.n_nodes();
        let lengths = [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("value", self.value.len()),
        ];
        for (field, len) in lengths {
            if len != n_nodes {
                return Err(ConversionError::LengthMismatch {
                    field,
                    len,
                    expected: n_nodes,
                });
            }
        }
        if let Some(node_count) = self.node_count {
            if node_count != n_nodes {
                return Err(ConversionError::NodeCountMismatch { node_count, n_nodes });
            }
        }

        let mut split_axes = Vec::with_capacity(n_nodes);
        let mut left_children = Vec::with_capacity(n_nodes);
        let mut right_children = Vec::with_capacity(n_nodes);
        let mut is_leaf = Vec::with_capacity(n_nodes);
        let mut values = Vec::with_capacity(n_nodes);

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            let feature = self.feature[node];
            let leaf = match (left == TREE_LEAF, right == TREE_LEAF) {
                (true, true) => true,
                (false, false) => false,
                _ => return Err(ConversionError::HalfLeaf { node, left, right }),
            };

            let axis = usize::try_from(feature).ok().and_then(SplitAxis::from_feature);
            if axis.is_none() && feature != TREE_UNDEFINED {
                return Err(ConversionError::UnsupportedDimensionality { node, feature });
            }

            if leaf {
                if feature != TREE_UNDEFINED {
                    return Err(ConversionError::SentinelMismatch { node, feature });
                }
                split_axes.push(SplitAxis::X);
                left_children.push(0);
                right_children.push(0);
            } else {
                let axis = axis.ok_or(ConversionError::SentinelMismatch { node, feature })?;
                split_axes.push(axis);
                left_children.push(child_id(node, left)?);
                right_children.push(child_id(node, right)?);
            }
            is_leaf.push(leaf);

            let value = self.value[node]
                .first()
                .ok_or(ConversionError::EmptyValue { node })?;
            values.push(value);
        }

        let tree = Tree::new(
            split_axes,
            self.threshold.clone(),
            left_children,
            right_children,
            is_leaf,
            values,
        );
        tree.validate()?;
        Ok(tree)
    }
}

fn child_id(node: usize, child: i64) -> Result<NodeId, ConversionError> {
    NodeId::try_from(child).map_err(|_| ConversionError::InvalidChild { node, child })
}

impl From<&Tree> for SklearnTree {
    /// Export with scikit-learn sentinels and nested `[[value]]` entries.
    fn from(tree: &Tree) -> Self {
        let n_nodes = tree.n_nodes();
        let mut out = SklearnTree {
            node_count: Some(n_nodes),
            children_left: Vec::with_capacity(n_nodes),
            children_right: Vec::with_capacity(n_nodes),
            feature: Vec::with_capacity(n_nodes),
            threshold: Vec::with_capacity(n_nodes),
            value: Vec::with_capacity(n_nodes),
        };
        for node in 0..n_nodes as NodeId {
            match tree.children(node) {
                Some((left, right)) => {
                    out.children_left.push(left as i64);
                    out.children_right.push(right as i64);
                    out.feature.push(tree.split_axis(node).feature() as i64);
                    out.threshold.push(tree.split_threshold(node));
                }
                None => {
                    out.children_left.push(TREE_LEAF);
                    out.children_right.push(TREE_LEAF);
                    out.feature.push(TREE_UNDEFINED);
                    out.threshold.push(TREE_UNDEFINED as f64);
                }
            }
            out.value.push(NodeValue::Nested(vec![vec![tree.value(node)]]));
        }
        out
    }
}

impl PlotDocument {
    /// Data points as an `(n, 2)` matrix.
    pub fn points(&self) -> Result<Array2<f64>, ConversionError> {
        let mut flat = Vec::with_capacity(self.samples.len() * 2);
        for (row, sample) in self.samples.iter().enumerate() {
            if sample.len() != 2 {
                return Err(ConversionError::SampleShape {
                    row,
                    columns: sample.len(),
                });
            }
            flat.extend_from_slice(sample);
        }
        Array2::from_shape_vec((self.samples.len(), 2), flat).map_err(|_| ConversionError::LengthMismatch {
            field: "samples",
            len: self.samples.len(),
            expected: self.samples.len(),
        })
    }

    pub fn labels(&self) -> Array1<f64> {
        Array1::from_vec(self.labels.clone())
    }
}

impl SklearnLinearRegression {
    pub fn to_model(&self) -> Result<LinearModel, ConversionError> {
        Ok(LinearModel::new(
            self.feature_names.clone(),
            Array1::from_vec(self.coef.clone()),
            self.intercept,
        )?)
    }
}
