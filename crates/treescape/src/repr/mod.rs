//! Canonical model representations.
//!
//! - [`Tree`] / [`MutableTree`]: 2D regression trees in SoA form
//! - [`LinearModel`]: named linear regression coefficients

/// Canonical node identifier.
///
/// Internally this is just an index into the tree's SoA arrays.
pub type NodeId = u32;

pub mod linear;
pub mod mutable_tree;
pub mod node;
pub mod tree;

pub use linear::{LinearModel, LinearShapeError};
pub use mutable_tree::MutableTree;
pub use node::{NodeRole, Side, SplitAxis};
pub use tree::{validate_tree, Tree, TreeValidationError, TreeView};
