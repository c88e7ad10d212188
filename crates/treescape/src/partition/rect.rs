//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::repr::{Side, SplitAxis};

/// Axis-aligned rectangle `[xmin, xmax] × [ymin, ymax]`.
///
/// Boxes narrowed by inconsistent thresholds can end up inverted
/// (`xmin > xmax`); such boxes are [empty](Rect::is_empty) and have zero area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Rect {
    /// The unit square `[0, 1] × [0, 1]`.
    pub const UNIT: Rect = Rect {
        xmin: 0.0,
        xmax: 1.0,
        ymin: 0.0,
        ymax: 1.0,
    };

    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// `(min, max)` along an axis.
    #[inline]
    pub fn range(&self, axis: SplitAxis) -> (f64, f64) {
        match axis {
            SplitAxis::X => (self.xmin, self.xmax),
            SplitAxis::Y => (self.ymin, self.ymax),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.xmax - self.xmin).max(0.0)
    }

    #[inline]
    pub fn height(&self) -> f64 {
        (self.ymax - self.ymin).max(0.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if the box has no interior.
    pub fn is_empty(&self) -> bool {
        !(self.xmin < self.xmax && self.ymin < self.ymax)
    }

    /// True if all bounds are finite and the box has an interior.
    pub fn is_proper(&self) -> bool {
        [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|v| v.is_finite())
            && !self.is_empty()
    }

    /// Closed containment test.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        self.contains_on(SplitAxis::X, point[0]) && self.contains_on(SplitAxis::Y, point[1])
    }

    /// Closed containment test along one axis.
    #[inline]
    pub fn contains_on(&self, axis: SplitAxis, value: f64) -> bool {
        let (lo, hi) = self.range(axis);
        lo <= value && value <= hi
    }

    /// Narrow the box by one split constraint.
    ///
    /// The left side of a split tightens the maximum along the split axis, the
    /// right side tightens the minimum. Constraints commute, so narrowing from
    /// the root downwards and from a node upwards give the same box.
    #[must_use]
    pub fn narrow(&self, axis: SplitAxis, side: Side, threshold: f64) -> Rect {
        let mut out = *self;
        let (lo, hi) = match axis {
            SplitAxis::X => (&mut out.xmin, &mut out.xmax),
            SplitAxis::Y => (&mut out.ymin, &mut out.ymax),
        };
        match side {
            Side::Left => *hi = hi.min(threshold),
            Side::Right => *lo = lo.max(threshold),
        }
        out
    }

    /// Boxes of the left and right children of a split.
    pub fn split(&self, axis: SplitAxis, threshold: f64) -> (Rect, Rect) {
        (
            self.narrow(axis, Side::Left, threshold),
            self.narrow(axis, Side::Right, threshold),
        )
    }

    /// Same box with inverted ranges collapsed to zero width.
    #[must_use]
    pub fn normalized(&self) -> Rect {
        Rect {
            xmin: self.xmin,
            xmax: self.xmax.max(self.xmin),
            ymin: self.ymin,
            ymax: self.ymax.max(self.ymin),
        }
    }

    /// Area of the intersection of two boxes.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.xmax.min(other.xmax) - self.xmin.max(other.xmin);
        let h = self.ymax.min(other.ymax) - self.ymin.max(other.ymin);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }
}
