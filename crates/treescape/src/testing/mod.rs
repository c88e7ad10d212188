//! Test utilities: literal tree construction and seeded random inputs.

mod random;

pub use random::{labels_from_tree, random_points, random_tree, RandomTreeParams};

/// Build a [`Tree`](crate::repr::Tree) from a literal node listing.
///
/// Node ids may be listed in any order. Split values default to `0.0` when
/// omitted. The result is not validated.
///
/// ```
/// use treescape::tree;
///
/// let tree = tree! {
///     0 => split(X, 0.5, 1.5) -> 1, 2,
///     1 => leaf(1.0),
///     2 => leaf(2.0),
/// };
/// assert_eq!(tree.predict_point([0.2, 0.0]), Some(1.0));
/// ```
#[macro_export]
macro_rules! tree {
    (@node $b:ident, $id:literal, split($axis:ident, $th:expr, $val:expr) -> $l:literal, $r:literal) => {
        $b.set_split($id, $crate::repr::SplitAxis::$axis, $th, $val, $l, $r);
    };
    (@node $b:ident, $id:literal, split($axis:ident, $th:expr) -> $l:literal, $r:literal) => {
        $b.set_split($id, $crate::repr::SplitAxis::$axis, $th, 0.0, $l, $r);
    };
    (@node $b:ident, $id:literal, leaf($val:expr)) => {
        $b.make_leaf($id, $val);
    };
    ($($id:literal => $kind:ident ($($args:tt)*) $(-> $l:literal, $r:literal)?),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut builder = $crate::repr::MutableTree::with_capacity(<[usize]>::len(&[$($id),*]));
        $( $crate::tree!(@node builder, $id, $kind($($args)*) $(-> $l, $r)?); )*
        builder.freeze()
    }};
}
