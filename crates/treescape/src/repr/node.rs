//! Tree node types.

use serde::{Deserialize, Serialize};

/// Axis of the 2D feature space a split node compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SplitAxis {
    /// Feature 0, drawn as a vertical line at `x = threshold`.
    #[default]
    X = 0,
    /// Feature 1, drawn as a horizontal line at `y = threshold`.
    Y = 1,
}

impl SplitAxis {
    /// Map a feature index onto an axis. Only features 0 and 1 are plottable.
    pub fn from_feature(feature: usize) -> Option<Self> {
        match feature {
            0 => Some(SplitAxis::X),
            1 => Some(SplitAxis::Y),
            _ => None,
        }
    }

    /// Feature index this axis stands for.
    #[inline]
    pub fn feature(self) -> usize {
        self as usize
    }

    /// The other axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            SplitAxis::X => SplitAxis::Y,
            SplitAxis::Y => SplitAxis::X,
        }
    }
}

/// How a node is drawn.
///
/// A node's role is usually its true kind (split or leaf). Display-depth pruning
/// reassigns roles without touching the tree: nodes at the cutoff depth become
/// [`NodeRole::Leaf`] and everything below becomes [`NodeRole::Hidden`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Draw a split line on this axis and keep descending.
    Split(SplitAxis),
    /// Draw a filled region coloured by the node's own value.
    Leaf,
    /// Draw nothing.
    Hidden,
}

impl NodeRole {
    #[inline]
    pub fn is_drawn(self) -> bool {
        !matches!(self, NodeRole::Hidden)
    }
}

/// Which child link a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// `value <= threshold`
    Left,
    /// `value > threshold`
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_from_feature() {
        assert_eq!(SplitAxis::from_feature(0), Some(SplitAxis::X));
        assert_eq!(SplitAxis::from_feature(1), Some(SplitAxis::Y));
        assert_eq!(SplitAxis::from_feature(2), None);
    }

    #[test]
    fn axis_other_is_involution() {
        assert_eq!(SplitAxis::X.other(), SplitAxis::Y);
        assert_eq!(SplitAxis::X.other().other(), SplitAxis::X);
    }

    #[test]
    fn hidden_role_is_not_drawn() {
        assert!(NodeRole::Leaf.is_drawn());
        assert!(NodeRole::Split(SplitAxis::Y).is_drawn());
        assert!(!NodeRole::Hidden.is_drawn());
    }
}
