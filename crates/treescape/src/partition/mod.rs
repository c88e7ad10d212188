//! Axis-aligned partition of the 2D feature space induced by a tree.
//!
//! - [`Partition`]: top-down extraction of split lines and leaf regions
//! - [`Ancestry`]: parent pointers for per-node upward queries
//! - [`display_roles`]: display-depth pruning

mod ancestry;
mod depth;
mod layout;
mod rect;

pub use ancestry::{Ancestors, Ancestry};
pub use depth::{display_roles, node_depths, tree_depth};
pub use layout::{LeafRegion, Partition, SplitLine};
pub use rect::Rect;
