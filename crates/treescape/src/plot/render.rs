//! Partition plot rendering onto a [`Canvas`].

use ndarray::{ArrayView1, ArrayView2};
use plotters::style::RGBColor;

use crate::partition::Partition;
use crate::repr::{TreeValidationError, TreeView};

use super::canvas::{Canvas, Colorbar, Layer, Shape};
use super::colormap::ColorScale;
use super::options::{ConfigError, RenderOptions};

const LINE_COLOR: RGBColor = RGBColor(0, 0, 0);
const MARKER_EDGE: RGBColor = RGBColor(255, 255, 255);

/// Errors raised while rendering or encoding a plot.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid tree: {0}")]
    InvalidTree(#[from] TreeValidationError),

    #[error("invalid render options: {0}")]
    InvalidOptions(#[from] ConfigError),

    /// Only two-feature inputs can be plotted.
    #[error("unsupported dimensionality: data points have {columns} columns, expected 2")]
    UnsupportedDimensionality { columns: usize },

    #[error("{points} data points but {labels} labels")]
    LengthMismatch { points: usize, labels: usize },

    #[error("drawing backend error: {0}")]
    Backend(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a tree's partition and the data points onto a fresh canvas.
///
/// Regions are coloured by node value through `options.value_range`, points by
/// label through the labels' own min/max. See [`render_onto`].
///
/// # Example
///
/// ```
/// use ndarray::{array, Array1, Array2};
/// use treescape::plot::{render, Layer, RenderOptions};
/// use treescape::tree;
///
/// let tree = tree! {
///     0 => split(X, 0.5, 1.5) -> 1, 2,
///     1 => leaf(1.0),
///     2 => leaf(2.0),
/// };
/// let canvas = render(
///     &tree,
///     Array2::<f64>::zeros((0, 2)).view(),
///     Array1::<f64>::zeros(0).view(),
///     &RenderOptions::default(),
/// ).unwrap();
///
/// assert_eq!(canvas.layer(Layer::Breaks).count(), 1);
/// assert_eq!(canvas.layer(Layer::Regions).count(), 2);
/// ```
pub fn render<T: TreeView + ?Sized>(
    tree: &T,
    points: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
    options: &RenderOptions,
) -> Result<Canvas, RenderError> {
    options.validate()?;
    let canvas = Canvas::new(options.size, options.domain);
    render_onto(canvas, tree, points, labels, options)
}

/// Render onto an existing canvas and return it with the new shapes added.
///
/// Inputs are checked before anything is drawn: the tree must be valid,
/// `points` must have two columns and one label per row.
pub fn render_onto<T: TreeView + ?Sized>(
    mut canvas: Canvas,
    tree: &T,
    points: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
    options: &RenderOptions,
) -> Result<Canvas, RenderError> {
    options.validate()?;
    if points.nrows() > 0 && points.ncols() != 2 {
        return Err(RenderError::UnsupportedDimensionality {
            columns: points.ncols(),
        });
    }
    if points.nrows() != labels.len() {
        return Err(RenderError::LengthMismatch {
            points: points.nrows(),
            labels: labels.len(),
        });
    }

    let partition = Partition::extract(tree, options.domain, options.max_depth)?;

    if options.show_prediction {
        for region in partition.regions() {
            canvas.push(
                Layer::Regions,
                Some(region.node),
                Shape::FilledRect {
                    rect: region.rect.normalized(),
                    color: options.value_range.color(region.value),
                },
            );
        }
    }

    if options.show_breaks {
        for line in partition.lines() {
            let (from, to) = line.endpoints();
            canvas.push(
                Layer::Breaks,
                Some(line.node),
                Shape::Segment {
                    from,
                    to,
                    color: LINE_COLOR,
                    width: options.line_width,
                },
            );
        }
    }

    let mut n_markers = 0usize;
    if options.show_points {
        if let Some(scale) = ColorScale::fit(labels) {
            for (row, &label) in points.rows().into_iter().zip(labels.iter()) {
                canvas.push(
                    Layer::Points,
                    None,
                    Shape::Marker {
                        at: [row[0], row[1]],
                        radius: options.marker_radius,
                        fill: scale.color(label),
                        edge: MARKER_EDGE,
                    },
                );
                n_markers += 1;
            }
            if options.show_colorbar {
                canvas.set_colorbar(Colorbar { scale, label: None });
            }
        }
    }

    tracing::info!(
        n_nodes = tree.n_nodes(),
        n_regions = if options.show_prediction { partition.regions().len() } else { 0 },
        n_lines = if options.show_breaks { partition.lines().len() } else { 0 },
        n_markers,
        max_depth = ?options.max_depth,
        "rendered partition"
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Rect;
    use crate::plot::viridis;
    use crate::repr::{SplitAxis, Tree};
    use crate::tree;
    use ndarray::{array, Array1, Array2};

    fn no_points() -> (Array2<f64>, Array1<f64>) {
        (Array2::zeros((0, 2)), Array1::zeros(0))
    }

    #[test]
    fn regions_use_fixed_prediction_scale() {
        let tree = tree! {
            0 => split(X, 0.5, 1.5) -> 1, 2,
            1 => leaf(1.0),
            2 => leaf(2.0),
        };
        let (points, labels) = no_points();
        let canvas = render(&tree, points.view(), labels.view(), &RenderOptions::default()).unwrap();

        let rects: Vec<_> = canvas.layer(Layer::Regions).collect();
        assert_eq!(
            rects[0],
            &Shape::FilledRect {
                rect: Rect::new(0.0, 0.5, 0.0, 1.0),
                color: ColorScale::PREDICTION.color(1.0),
            }
        );
        assert_eq!(
            rects[1],
            &Shape::FilledRect {
                rect: Rect::new(0.5, 1.0, 0.0, 1.0),
                color: ColorScale::PREDICTION.color(2.0),
            }
        );
        assert!(canvas.colorbar().is_none());
    }

    #[test]
    fn flags_gate_layers() {
        let tree = tree! {
            0 => split(Y, 0.3) -> 1, 2,
            1 => leaf(0.0),
            2 => leaf(1.0),
        };
        let points = array![[0.1, 0.1], [0.9, 0.9]];
        let labels = array![0.0, 1.0];
        let options = RenderOptions::builder()
            .show_breaks(false)
            .show_prediction(false)
            .build()
            .unwrap();

        let canvas = render(&tree, points.view(), labels.view(), &options).unwrap();
        assert_eq!(canvas.layer(Layer::Regions).count(), 0);
        assert_eq!(canvas.layer(Layer::Breaks).count(), 0);
        assert_eq!(canvas.layer(Layer::Points).count(), 2);
        assert_eq!(canvas.colorbar().map(|c| c.scale), Some(ColorScale::new(0.0, 1.0)));
    }

    #[test]
    fn markers_use_label_scale() {
        let (points, labels) = (array![[0.2, 0.2], [0.8, 0.8]], array![10.0, 20.0]);
        let canvas = render(&Tree::leaf(0.0), points.view(), labels.view(), &RenderOptions::default()).unwrap();

        let fills: Vec<_> = canvas
            .layer(Layer::Points)
            .map(|s| match s {
                Shape::Marker { fill, .. } => *fill,
                other => panic!("unexpected shape {other:?}"),
            })
            .collect();
        assert_eq!(fills, vec![viridis(0.0), viridis(1.0)]);
    }

    #[test]
    fn three_column_points_are_rejected() {
        let points = Array2::<f64>::zeros((4, 3));
        let labels = Array1::<f64>::zeros(4);
        let err = render(&Tree::leaf(0.0), points.view(), labels.view(), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedDimensionality { columns: 3 }));
    }

    #[test]
    fn label_count_must_match_points() {
        let points = Array2::<f64>::zeros((4, 2));
        let labels = Array1::<f64>::zeros(3);
        let err = render(&Tree::leaf(0.0), points.view(), labels.view(), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::LengthMismatch { points: 4, labels: 3 }));
    }

    #[test]
    fn invalid_tree_is_rejected_before_drawing() {
        let tree = Tree::new(
            vec![SplitAxis::X; 2],
            vec![0.5, 0.0],
            vec![0, 0],
            vec![1, 0],
            vec![false, true],
            vec![0.0, 1.0],
        );
        let (points, labels) = no_points();
        let err = render(&tree, points.view(), labels.view(), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTree(TreeValidationError::SelfLoop { node: 0 })));
    }

    #[test]
    fn render_onto_composes() {
        let (points, labels) = no_points();
        let options = RenderOptions::default();
        let canvas = render(&Tree::leaf(-2.0), points.view(), labels.view(), &options).unwrap();
        let canvas = render_onto(canvas, &Tree::leaf(2.0), points.view(), labels.view(), &options).unwrap();
        assert_eq!(canvas.layer(Layer::Regions).count(), 2);
    }
}
