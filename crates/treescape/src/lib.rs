//! treescape: pictures of what fitted regression models learned.
//!
//! Draws the axis-aligned partition a 2D decision tree induces on its
//! feature space, and breaks linear regression predictions down into
//! per-feature contributions.
//!
//! # Key Types
//!
//! - [`Tree`] / [`MutableTree`] - Regression tree over two features
//! - [`Partition`] / [`Ancestry`] - Split lines, leaf regions and node boxes
//! - [`RenderOptions`] / [`Canvas`] - Plot configuration and drawing context
//! - [`LinearModel`] / [`Explanation`] - Linear contribution tables
//!
//! # Plotting a tree
//!
//! Use [`plot::render`] to draw a tree plus its labelled points onto a
//! [`Canvas`], then [`Canvas::save_svg`]. See the [`plot`] module for details.
//!
//! # Loading scikit-learn models
//!
//! Use [`compat::sklearn::SklearnTree`] to convert a fitted
//! `DecisionTreeRegressor`'s `tree_` arrays. See the [`compat`] module.

pub mod compat;
pub mod explain;
pub mod partition;
pub mod plot;
pub mod repr;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use explain::{explain, Explanation};
pub use partition::{Ancestry, Partition, Rect};
pub use plot::{render, render_onto, Canvas, RenderError, RenderOptions};
pub use repr::{LinearModel, MutableTree, NodeId, SplitAxis, Tree, TreeView};
