use ndarray::{Array1, Array2, ArrayView2};
use rand::prelude::*;

use crate::partition::Rect;
use crate::repr::{MutableTree, NodeId, SplitAxis, Tree};

/// Shape of randomly generated trees.
#[derive(Debug, Clone, Copy)]
pub struct RandomTreeParams {
    pub max_depth: usize,
    /// Probability that a node above `max_depth` is split.
    pub split_probability: f64,
    /// Node values are uniform in `[-value_bound, value_bound]`.
    pub value_bound: f64,
}

impl Default for RandomTreeParams {
    fn default() -> Self {
        Self {
            max_depth: 5,
            split_probability: 0.8,
            value_bound: 2.0,
        }
    }
}

/// Generate a random valid tree whose thresholds lie strictly inside each
/// node's box, as a fitted tree's would.
pub fn random_tree(seed: u64, domain: Rect, params: RandomTreeParams) -> Tree {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = MutableTree::new();
    let root = tree.init_root();

    let mut stack: Vec<(NodeId, Rect, usize)> = vec![(root, domain, 0)];
    while let Some((node, bbox, depth)) = stack.pop() {
        let value = (rng.r#gen::<f64>() * 2.0 - 1.0) * params.value_bound;
        tree.set_value(node, value);

        let split = depth < params.max_depth && (depth == 0 || rng.gen_bool(params.split_probability));
        if !split {
            continue;
        }

        let axis = if rng.gen_bool(0.5) { SplitAxis::X } else { SplitAxis::Y };
        let (lo, hi) = bbox.range(axis);
        let threshold = lo + (hi - lo) * rng.gen_range(0.1..0.9);
        let (left, right) = tree.apply_split(node, axis, threshold);
        let (left_box, right_box) = bbox.split(axis, threshold);
        stack.push((right, right_box, depth + 1));
        stack.push((left, left_box, depth + 1));
    }

    tree.freeze()
}

/// `n` points drawn uniformly from `domain`, one row per point.
pub fn random_points(n: usize, seed: u64, domain: Rect) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n, 2), |(_, col)| {
        let (lo, hi) = if col == 0 {
            (domain.xmin, domain.xmax)
        } else {
            (domain.ymin, domain.ymax)
        };
        lo + rng.r#gen::<f64>() * (hi - lo)
    })
}

/// Tree predictions for each point plus uniform noise in `[-noise, noise]`.
pub fn labels_from_tree(tree: &Tree, points: ArrayView2<'_, f64>, seed: u64, noise: f64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    points
        .rows()
        .into_iter()
        .map(|row| {
            let base = tree.predict_point([row[0], row[1]]).unwrap_or(0.0);
            base + (rng.r#gen::<f64>() * 2.0 - 1.0) * noise
        })
        .collect()
}
