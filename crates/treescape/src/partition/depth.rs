//! Node depths and display-depth pruning.

use crate::repr::{validate_tree, NodeId, NodeRole, TreeValidationError, TreeView};

/// Depth of every node (root = 0), computed with an explicit-stack walk.
///
/// # Errors
///
/// Returns [`TreeValidationError`] if the tree is malformed.
pub fn node_depths<T: TreeView + ?Sized>(tree: &T) -> Result<Vec<usize>, TreeValidationError> {
    validate_tree(tree)?;
    Ok(depths_unchecked(tree))
}

/// Depth of the deepest node, `None` for an empty tree.
///
/// # Errors
///
/// Returns [`TreeValidationError`] if the tree is malformed.
pub fn tree_depth<T: TreeView + ?Sized>(tree: &T) -> Result<Option<usize>, TreeValidationError> {
    Ok(node_depths(tree)?.into_iter().max())
}

/// How each node is drawn when the display is truncated at `max_depth`.
///
/// Without a limit every node keeps its true role. With a limit `d`, nodes
/// shallower than `d` keep their role, nodes at depth `d` are drawn as leaves
/// using their own value, and deeper nodes are [`NodeRole::Hidden`].
///
/// # Errors
///
/// Returns [`TreeValidationError`] if the tree is malformed.
pub fn display_roles<T: TreeView + ?Sized>(
    tree: &T,
    max_depth: Option<usize>,
) -> Result<Vec<NodeRole>, TreeValidationError> {
    validate_tree(tree)?;
    Ok(roles_unchecked(tree, max_depth))
}

/// [`node_depths`] for a tree that already passed [`validate_tree`].
pub(super) fn depths_unchecked<T: TreeView + ?Sized>(tree: &T) -> Vec<usize> {
    let n_nodes = tree.n_nodes();
    let mut depths = vec![0usize; n_nodes];
    if n_nodes == 0 {
        return depths;
    }

    let mut stack: Vec<(NodeId, usize)> = vec![(0, 0)];
    while let Some((node, depth)) = stack.pop() {
        depths[node as usize] = depth;
        if let Some((left, right)) = tree.children(node) {
            stack.push((left, depth + 1));
            stack.push((right, depth + 1));
        }
    }

    depths
}

/// [`display_roles`] for a tree that already passed [`validate_tree`].
pub(super) fn roles_unchecked<T: TreeView + ?Sized>(tree: &T, max_depth: Option<usize>) -> Vec<NodeRole> {
    let true_role = |node: NodeId| {
        if tree.is_leaf(node) {
            NodeRole::Leaf
        } else {
            NodeRole::Split(tree.split_axis(node))
        }
    };

    let Some(max_depth) = max_depth else {
        return (0..tree.n_nodes() as NodeId).map(true_role).collect();
    };

    depths_unchecked(tree)
        .into_iter()
        .enumerate()
        .map(|(node, depth)| match depth.cmp(&max_depth) {
            std::cmp::Ordering::Less => true_role(node as NodeId),
            std::cmp::Ordering::Equal => NodeRole::Leaf,
            std::cmp::Ordering::Greater => NodeRole::Hidden,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::{SplitAxis, Tree};
    use crate::tree;

    fn two_level_tree() -> Tree {
        tree! {
            0 => split(X, 0.5, 0.0) -> 1, 2,
            1 => split(Y, 0.3, -1.0) -> 3, 4,
            2 => leaf(1.0),
            3 => leaf(-1.5),
            4 => leaf(-0.5),
        }
    }

    #[test]
    fn depths_follow_structure() {
        assert_eq!(node_depths(&two_level_tree()).unwrap(), vec![0, 1, 1, 2, 2]);
        assert_eq!(tree_depth(&two_level_tree()).unwrap(), Some(2));
        assert_eq!(tree_depth(&Tree::empty()).unwrap(), None);
    }

    #[test]
    fn no_limit_keeps_true_roles() {
        let roles = display_roles(&two_level_tree(), None).unwrap();
        assert_eq!(
            roles,
            vec![
                NodeRole::Split(SplitAxis::X),
                NodeRole::Split(SplitAxis::Y),
                NodeRole::Leaf,
                NodeRole::Leaf,
                NodeRole::Leaf,
            ]
        );
    }

    #[test]
    fn cutoff_turns_nodes_into_leaves_and_hides_deeper() {
        let roles = display_roles(&two_level_tree(), Some(1)).unwrap();
        assert_eq!(
            roles,
            vec![
                NodeRole::Split(SplitAxis::X),
                NodeRole::Leaf,
                NodeRole::Leaf,
                NodeRole::Hidden,
                NodeRole::Hidden,
            ]
        );
    }

    #[test]
    fn cutoff_at_zero_draws_root_only() {
        let roles = display_roles(&two_level_tree(), Some(0)).unwrap();
        assert_eq!(roles[0], NodeRole::Leaf);
        assert!(roles[1..].iter().all(|r| *r == NodeRole::Hidden));
    }

    #[test]
    fn cutoff_beyond_depth_changes_nothing() {
        let tree = two_level_tree();
        assert_eq!(display_roles(&tree, Some(10)).unwrap(), display_roles(&tree, None).unwrap());
    }

    #[test]
    fn malformed_tree_is_rejected() {
        let cyclic = Tree::new(
            vec![SplitAxis::X; 3],
            vec![0.5; 3],
            vec![1, 0, 0],
            vec![2, 0, 0],
            vec![false, false, true],
            vec![0.0; 3],
        );
        assert!(node_depths(&cyclic).is_err());
        assert!(tree_depth(&cyclic).is_err());
        assert!(display_roles(&cyclic, Some(1)).is_err());
    }
}
