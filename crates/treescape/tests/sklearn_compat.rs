//! Integration tests for scikit-learn JSON exports.
//!
//! Test fixtures are stored in `tests/test-cases/sklearn/`.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use ndarray::array;
use rstest::rstest;

use treescape::compat::sklearn::{
    load_linear_model, load_plot_document, read_json, ConversionError, LoadError, PlotDocument, SklearnTree,
};
use treescape::explain;
use treescape::plot::{render, Layer, RenderOptions};
use treescape::repr::{SplitAxis, TreeView};

const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/test-cases/sklearn");

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(FIXTURE_DIR).join(name)
}

// ============================================================================
// Plot documents
// ============================================================================

#[test]
fn load_stump_document() {
    let (doc, tree) = load_plot_document(fixture("stump_plot.json")).unwrap();

    assert_eq!(tree.n_nodes(), 3);
    assert_eq!(tree.split_axis(0), SplitAxis::X);
    assert_eq!(tree.split_threshold(0), 0.5);
    assert_eq!(tree.values(), &[1.5, 1.0, 2.0]);

    let points = doc.points().unwrap();
    assert_eq!(points.dim(), (4, 2));
    assert_eq!(doc.labels(), array![0.9, 1.1, 1.8, 2.2]);
}

#[rstest]
#[case::left_bottom([0.25, 0.1], -1.2)]
#[case::left_top([0.25, 0.6], 0.2)]
#[case::right_bottom([0.8, 0.5], 0.4)]
#[case::right_top([0.8, 0.9], 1.6)]
#[case::on_threshold_goes_left([0.5, 0.3], -1.2)]
fn depth_two_predictions(#[case] point: [f64; 2], #[case] expected: f64) {
    let (_, tree) = load_plot_document(fixture("depth2_plot.json")).unwrap();
    assert_eq!(tree.predict_point(point), Some(expected));
}

#[test]
fn depth_two_document_renders_to_svg() {
    let (doc, tree) = load_plot_document(fixture("depth2_plot.json")).unwrap();
    let points = doc.points().unwrap();
    let labels = doc.labels();

    let canvas = render(&tree, points.view(), labels.view(), &RenderOptions::default()).unwrap();
    assert_eq!(canvas.layer(Layer::Breaks).count(), 3);
    assert_eq!(canvas.layer(Layer::Regions).count(), 4);
    assert_eq!(canvas.layer(Layer::Points).count(), 4);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("depth2.svg");
    canvas.save_svg(&path).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn exported_tree_reloads_identically() {
    let (doc, tree) = load_plot_document(fixture("depth2_plot.json")).unwrap();

    let exported = PlotDocument {
        tree: SklearnTree::from(&tree),
        samples: doc.samples.clone(),
        labels: doc.labels.clone(),
    };
    assert_eq!(exported, doc);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.json");
    std::fs::write(&path, serde_json::to_string_pretty(&exported).unwrap()).unwrap();
    let reloaded: PlotDocument = read_json(&path).unwrap();
    assert_eq!(reloaded.tree.to_tree().unwrap(), tree);
}

// ============================================================================
// Load errors
// ============================================================================

#[test]
fn missing_file_is_io_error() {
    let err = load_plot_document(fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn truncated_json_is_parse_error() {
    let err = load_plot_document(fixture("truncated.json")).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().contains("truncated.json"));
}

#[rstest]
#[case::half_leaf("half_leaf_plot.json", ConversionError::HalfLeaf { node: 0, left: 1, right: -1 })]
#[case::third_feature("three_feature_plot.json", ConversionError::UnsupportedDimensionality { node: 0, feature: 2 })]
fn malformed_tree_is_conversion_error(#[case] name: &str, #[case] expected: ConversionError) {
    match load_plot_document(fixture(name)).unwrap_err() {
        LoadError::Conversion { path, source } => {
            assert!(path.ends_with(name));
            assert_eq!(source, expected);
        }
        other => panic!("expected a conversion error, got {other:?}"),
    }
}

// ============================================================================
// Linear regression
// ============================================================================

#[test]
fn linear_regression_explains_a_house() {
    let model = load_linear_model(fixture("linear_regression.json")).unwrap();
    assert_eq!(model.n_features(), 5);

    let sample = array![1500.0, 3.0, 0.0, 1.0, 0.0];
    let why = explain(&model, sample.view(), &["zip"]).unwrap();

    assert_eq!(why.features.len(), 2);
    assert_abs_diff_eq!(why.features[0].contribution, 225_000.0);
    assert_abs_diff_eq!(why.features[1].contribution, 30_000.0);

    let active = why.groups[0].active.as_ref().unwrap();
    assert_eq!(active.category, "10002");
    assert_eq!(active.column, "zip_10002");
    assert_abs_diff_eq!(why.groups[0].contribution(), 80_000.0);

    assert_abs_diff_eq!(why.prediction, 355_000.0);
    assert_abs_diff_eq!(why.prediction, model.predict(sample.view()));
    assert!(why.to_string().contains("355,000"));
}

#[test]
fn linear_regression_table_renders_to_svg() {
    let model = load_linear_model(fixture("linear_regression.json")).unwrap();
    let sample = array![900.0, 1.0, 1.0, 0.0, 0.0];
    let why = explain(&model, sample.view(), &["zip"]).unwrap();

    let canvas = why.to_canvas((1400, 1000));
    assert!(canvas.layer(Layer::Annotations).count() > 0);
    let svg = canvas.to_svg_string().unwrap();
    assert!(svg.contains("Prediction"));
}

#[test]
fn plot_document_is_not_a_linear_model() {
    let err = load_linear_model(fixture("stump_plot.json")).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
}
