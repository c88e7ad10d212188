//! Viridis colour map and value normalisation.

use ndarray::ArrayView1;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Evenly spaced viridis stops; intermediate colours are interpolated.
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3E, 0x4A, 0x89),
    (0x31, 0x68, 0x8E),
    (0x26, 0x82, 0x8E),
    (0x1F, 0x9E, 0x89),
    (0x35, 0xB7, 0x79),
    (0x6D, 0xCD, 0x59),
    (0xB4, 0xDE, 0x2C),
    (0xFD, 0xE7, 0x25),
];

/// Viridis colour at `t ∈ [0, 1]`. Values outside are clamped, NaN maps to 0.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let lo = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - lo as f64;

    let (r0, g0, b0) = VIRIDIS[lo];
    let (r1, g1, b1) = VIRIDIS[lo + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Linear map from a value range onto the colour map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::PREDICTION
    }
}

impl ColorScale {
    /// Fixed range used for leaf predictions: `(v + 2) / 4`.
    pub const PREDICTION: ColorScale = ColorScale { min: -2.0, max: 2.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale spanning the finite values of `values`, `None` if there are none.
    pub fn fit(values: ArrayView1<'_, f64>) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .map(|(min, max)| Self { min, max })
    }

    /// True for a finite, non-inverted range.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Position of `value` in `[0, 1]`. A zero-width range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let width = self.max - self.min;
        if width <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / width).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f64) -> RGBColor {
        viridis(self.normalize(value))
    }
}
