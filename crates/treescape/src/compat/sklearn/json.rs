//! scikit-learn model exports.
//!
//! These are "foreign types" used only for parsing. They mirror the arrays of
//! a fitted estimator (`tree_` of a `DecisionTreeRegressor`, `coef_` /
//! `intercept_` of a `LinearRegression`) as dumped to JSON; see
//! [`super::convert`] for the conversion to native types.

use serde::{Deserialize, Serialize};

/// Child id scikit-learn stores for "no child".
pub const TREE_LEAF: i64 = -1;

/// Feature id scikit-learn stores for leaves.
pub const TREE_UNDEFINED: i64 = -2;

/// Per-node value as exported.
///
/// `tree_.value` has shape `[n_nodes][n_outputs][n_classes]`; exporters often
/// flatten it or reduce it to a scalar. The prediction is always the first
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Scalar(f64),
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

impl NodeValue {
    /// The predicted value (`value[i][0][0]`), `None` if the array is empty.
    pub fn first(&self) -> Option<f64> {
        match self {
            NodeValue::Scalar(v) => Some(*v),
            NodeValue::Flat(values) => values.first().copied(),
            NodeValue::Nested(rows) => rows.first().and_then(|row| row.first()).copied(),
        }
    }
}

/// Arrays of a fitted `sklearn.tree._tree.Tree`, indexed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SklearnTree {
    /// Declared node count; checked against the array lengths when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count: Option<usize>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    /// Split feature, [`TREE_UNDEFINED`] for leaves.
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<NodeValue>,
}

/// A tree plus the labelled points to scatter over its partition.
///
/// ```json
/// {
///   "tree": { "children_left": [1, -1, -1], ... },
///   "samples": [[0.1, 0.7], [0.8, 0.2]],
///   "labels": [1.2, -0.4]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDocument {
    pub tree: SklearnTree,
    /// One `[x, y]` row per point.
    #[serde(default)]
    pub samples: Vec<Vec<f64>>,
    #[serde(default)]
    pub labels: Vec<f64>,
}

/// Coefficients of a fitted `LinearRegression`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SklearnLinearRegression {
    #[serde(alias = "feature_names_in_")]
    pub feature_names: Vec<String>,
    #[serde(alias = "coef_")]
    pub coef: Vec<f64>,
    #[serde(alias = "intercept_")]
    pub intercept: f64,
}
