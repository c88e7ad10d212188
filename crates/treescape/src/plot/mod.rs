//! Partition plots.
//!
//! [`render`] turns a tree plus labelled data points into a [`Canvas`]: split
//! lines, leaf regions coloured by prediction, and the points coloured by
//! label. The canvas encodes to SVG with [`Canvas::to_svg_string`] or
//! [`Canvas::save_svg`].
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use treescape::plot::{render, RenderOptions};
//! use treescape::tree;
//!
//! let tree = tree! {
//!     0 => split(X, 0.5, 0.0) -> 1, 2,
//!     1 => leaf(-1.0),
//!     2 => leaf(1.0),
//! };
//! let points = array![[0.25, 0.5], [0.75, 0.5]];
//! let labels = array![-1.2, 0.9];
//!
//! let options = RenderOptions::builder().size((400, 300)).build().unwrap();
//! let canvas = render(&tree, points.view(), labels.view(), &options).unwrap();
//! let svg = canvas.to_svg_string().unwrap();
//! assert!(svg.contains("<svg"));
//! ```

mod canvas;
mod colormap;
mod options;
mod render;
mod svg;

pub use canvas::{Anchor, Canvas, Colorbar, Item, Layer, Shape};
pub use colormap::{viridis, ColorScale};
pub use options::{ConfigError, RenderOptions, MAX_PIXELS};
pub use render::{render, render_onto, RenderError};

/// Colour type used by canvas shapes.
pub use plotters::style::RGBColor;
