//! Property-based tests for partition extraction and rendering.
//!
//! Random trees are generated the way a fitted tree looks: every threshold
//! lies strictly inside the box of the node it splits.

use ndarray::{Array1, Array2};
use proptest::prelude::*;

use treescape::partition::{node_depths, Ancestry, Partition, Rect};
use treescape::plot::{render, Layer, RenderOptions, Shape};
use treescape::repr::{NodeId, Side, SplitAxis, Tree, TreeView};
use treescape::testing::{random_tree, RandomTreeParams};

// =============================================================================
// Generators
// =============================================================================

fn arb_domain() -> impl Strategy<Value = Rect> {
    (-10.0f64..10.0, 0.5f64..20.0, -10.0f64..10.0, 0.5f64..20.0)
        .prop_map(|(x, w, y, h)| Rect::new(x, x + w, y, y + h))
}

fn arb_tree(domain: Rect) -> impl Strategy<Value = Tree> {
    (any::<u64>(), 0usize..7, 0.3f64..1.0).prop_map(move |(seed, max_depth, split_probability)| {
        random_tree(
            seed,
            domain,
            RandomTreeParams {
                max_depth,
                split_probability,
                value_bound: 2.0,
            },
        )
    })
}

fn arb_domain_and_tree() -> impl Strategy<Value = (Rect, Tree)> {
    arb_domain().prop_flat_map(|domain| (Just(domain), arb_tree(domain)))
}

fn no_points() -> (Array2<f64>, Array1<f64>) {
    (Array2::zeros((0, 2)), Array1::zeros(0))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn leaf_regions_tile_the_domain((domain, tree) in arb_domain_and_tree()) {
        let partition = Partition::extract(&tree, domain, None).unwrap();
        let regions = partition.regions();

        prop_assert_eq!(regions.len(), tree.n_leaves());
        let total: f64 = regions.iter().map(|r| r.rect.area()).sum();
        prop_assert!((total - domain.area()).abs() <= 1e-9 * domain.area());

        for (i, a) in regions.iter().enumerate() {
            prop_assert!(!a.rect.is_empty());
            for b in &regions[i + 1..] {
                prop_assert!(a.rect.overlap_area(&b.rect) <= 1e-12 * domain.area());
            }
        }
    }

    #[test]
    fn top_down_boxes_match_upward_walk((domain, tree) in arb_domain_and_tree()) {
        let partition = Partition::extract(&tree, domain, None).unwrap();
        let ancestry = Ancestry::new(&tree);

        for node in 0..tree.n_nodes() as NodeId {
            prop_assert_eq!(partition.node_box(node), Some(ancestry.node_box(&tree, node, domain)));
        }
    }

    #[test]
    fn region_centres_route_back_to_their_leaf((domain, tree) in arb_domain_and_tree()) {
        let partition = Partition::extract(&tree, domain, None).unwrap();
        for region in partition.regions() {
            let r = region.rect;
            let centre = [(r.xmin + r.xmax) / 2.0, (r.ymin + r.ymax) / 2.0];
            prop_assert_eq!(tree.traverse_to_leaf(centre), Some(region.node));
        }
    }

    #[test]
    fn root_split_separates_descendants((domain, tree) in arb_domain_and_tree()) {
        prop_assume!(!tree.is_leaf(0));
        let axis = tree.split_axis(0);
        let threshold = tree.split_threshold(0);

        let partition = Partition::extract(&tree, domain, None).unwrap();
        let ancestry = Ancestry::new(&tree);
        for region in partition.regions() {
            let (lo, hi) = region.rect.range(axis);
            let root_link = ancestry.path(region.node).first().map(|&(_, side)| side);
            if root_link == Some(Side::Left) {
                prop_assert!(hi <= threshold);
            } else {
                prop_assert!(lo >= threshold);
            }
        }
    }

    #[test]
    fn lines_span_their_node_box((domain, tree) in arb_domain_and_tree()) {
        let partition = Partition::extract(&tree, domain, None).unwrap();
        prop_assert_eq!(partition.lines().len(), tree.n_nodes() - tree.n_leaves());

        for line in partition.lines() {
            let bbox = partition.node_box(line.node).unwrap();
            prop_assert_eq!(line.span, bbox.range(line.axis.other()));
            let ([x0, y0], [x1, y1]) = line.endpoints();
            match line.axis {
                SplitAxis::X => prop_assert!(x0 == x1 && y0 <= y1),
                SplitAxis::Y => prop_assert!(y0 == y1 && x0 <= x1),
            }
        }
    }

    #[test]
    fn pruning_draws_nothing_below_cutoff(tree in arb_tree(Rect::UNIT), cutoff in 0usize..6) {
        let (points, labels) = no_points();
        let options = RenderOptions::builder().max_depth(cutoff).build().unwrap();
        let canvas = render(&tree, points.view(), labels.view(), &options).unwrap();
        let depths = node_depths(&tree).unwrap();

        for (node, &depth) in depths.iter().enumerate() {
            let shapes: Vec<&Shape> = canvas.node_shapes(node as NodeId).collect();
            let rects = shapes.iter().filter(|s| matches!(s, Shape::FilledRect { .. })).count();
            if depth > cutoff {
                prop_assert!(shapes.is_empty(), "node {} at depth {} drawn", node, depth);
            } else if depth == cutoff {
                prop_assert_eq!(rects, 1);
                prop_assert_eq!(shapes.len(), 1);
            }
        }

        let total: f64 = canvas
            .layer(Layer::Regions)
            .map(|s| match s {
                Shape::FilledRect { rect, .. } => rect.area(),
                _ => 0.0,
            })
            .sum();
        prop_assert!((total - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn cutoff_beyond_depth_matches_full_render(tree in arb_tree(Rect::UNIT)) {
        let (points, labels) = no_points();
        let full = render(&tree, points.view(), labels.view(), &RenderOptions::default()).unwrap();
        let options = RenderOptions::builder().max_depth(64).build().unwrap();
        let pruned = render(&tree, points.view(), labels.view(), &options).unwrap();
        prop_assert_eq!(full, pruned);
    }
}
