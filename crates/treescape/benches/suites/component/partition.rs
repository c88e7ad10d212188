//! Component benchmarks: partition extraction, rendering and SVG encoding.

#[path = "../../common/mod.rs"]
mod common;

use common::criterion_config::default_criterion;

use treescape::partition::{Ancestry, Partition, Rect};
use treescape::plot::{render, RenderOptions};
use treescape::repr::TreeView;
use treescape::testing::{labels_from_tree, random_points, random_tree, RandomTreeParams};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn tree_of_depth(depth: usize) -> treescape::Tree {
	let params = RandomTreeParams {
		max_depth: depth,
		split_probability: 1.0,
		..Default::default()
	};
	random_tree(42, Rect::UNIT, params)
}

fn bench_extract_depths(c: &mut Criterion) {
	let mut group = c.benchmark_group("component/partition/extract");

	for depth in [4usize, 8, 12] {
		let tree = tree_of_depth(depth);
		group.throughput(Throughput::Elements(tree.n_nodes() as u64));
		group.bench_with_input(BenchmarkId::new("top_down", depth), &tree, |b, tree| {
			b.iter(|| black_box(Partition::extract(black_box(tree), Rect::UNIT, None)));
		});
		group.bench_with_input(BenchmarkId::new("ancestry", depth), &tree, |b, tree| {
			b.iter(|| {
				let ancestry = Ancestry::new(black_box(tree));
				let boxes: Vec<Rect> = (0..tree.n_nodes() as u32)
					.map(|node| ancestry.node_box(tree, node, Rect::UNIT))
					.collect();
				black_box(boxes)
			});
		});
	}

	group.finish();
}

fn bench_render_and_encode(c: &mut Criterion) {
	let tree = tree_of_depth(6);
	let points = random_points(500, 7, Rect::UNIT);
	let labels = labels_from_tree(&tree, points.view(), 7, 0.25);
	let options = RenderOptions::default();

	let mut group = c.benchmark_group("component/partition/render");

	group.bench_function("render", |b| {
		b.iter(|| {
			let canvas = render(black_box(&tree), points.view(), labels.view(), &options);
			black_box(canvas)
		});
	});

	let canvas = match render(&tree, points.view(), labels.view(), &options) {
		Ok(canvas) => canvas,
		Err(err) => {
			eprintln!("Skipping svg encoding - render failed: {err}");
			group.finish();
			return;
		}
	};
	group.bench_function("svg", |b| {
		b.iter(|| black_box(canvas.to_svg_string()));
	});

	group.finish();
}

criterion_group! {
	name = benches;
	config = default_criterion();
	targets = bench_extract_depths, bench_render_and_encode
}
criterion_main!(benches);
