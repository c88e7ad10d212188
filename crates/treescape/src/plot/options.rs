//! Render configuration with builder pattern.
//!
//! [`RenderOptions`] uses the `bon` crate for builder generation and
//! validates at build time. It also deserializes from JSON with every field
//! optional, so the CLI can load it from a file and override single fields.
//!
//! # Example
//!
//! ```
//! use treescape::plot::RenderOptions;
//!
//! // All defaults: full tree, lines and regions, unit square, 1000×800 px
//! let options = RenderOptions::builder().build().unwrap();
//! assert!(options.show_breaks);
//!
//! // Truncate the display at depth 2 and hide the split lines
//! let options = RenderOptions::builder()
//!     .max_depth(2)
//!     .show_breaks(false)
//!     .build()
//!     .unwrap();
//! assert_eq!(options.max_depth, Some(2));
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::partition::Rect;

use super::colormap::ColorScale;

/// Upper bound for every pixel quantity: canvas sides, marker radius, line width.
pub const MAX_PIXELS: u32 = 16_384;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during option validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The plotted domain must be finite with positive width and height.
    InvalidDomain(Rect),
    /// The prediction colour range must be finite with `min < max`.
    InvalidValueRange(ColorScale),
    /// Canvas width and height must be non-zero.
    InvalidSize { width: u32, height: u32 },
    /// A pixel size that must be positive was zero.
    ZeroPixels { field: &'static str },
    /// A pixel size exceeded [`MAX_PIXELS`].
    TooLarge { field: &'static str, value: u32, max: u32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDomain(r) => write!(
                f,
                "domain must be finite and non-empty, got [{}, {}] x [{}, {}]",
                r.xmin, r.xmax, r.ymin, r.ymax
            ),
            Self::InvalidValueRange(s) => {
                write!(f, "value_range must satisfy min < max, got [{}, {}]", s.min, s.max)
            }
            Self::InvalidSize { width, height } => {
                write!(f, "canvas size must be non-zero, got {}x{}", width, height)
            }
            Self::ZeroPixels { field } => write!(f, "{} must be at least 1 pixel", field),
            Self::TooLarge { field, value, max } => {
                write!(f, "{} must be at most {} pixels, got {}", field, max, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// RenderOptions
// =============================================================================

/// Options for [`render`](super::render) and [`render_onto`](super::render_onto).
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
#[serde(default)]
pub struct RenderOptions {
    /// Truncate the display at this depth. Nodes at the cutoff are drawn as
    /// leaves with their own value, deeper nodes are not drawn.
    pub max_depth: Option<usize>,

    /// Draw split lines. Default: true.
    #[builder(default = true)]
    pub show_breaks: bool,

    /// Draw leaf regions coloured by prediction. Default: true.
    #[builder(default = true)]
    pub show_prediction: bool,

    /// Draw the data points. Default: true.
    #[builder(default = true)]
    pub show_points: bool,

    /// Draw a colourbar for the label scale when points are drawn. Default: true.
    #[builder(default = true)]
    pub show_colorbar: bool,

    /// Plotted region of the feature space. Default: unit square.
    #[builder(default)]
    pub domain: Rect,

    /// Value range mapped onto the colour map for leaf regions. Default: `[-2, 2]`.
    #[builder(default)]
    pub value_range: ColorScale,

    /// Canvas size in pixels. Default: 1000×800.
    #[builder(default = (1000, 800))]
    pub size: (u32, u32),

    /// Marker radius in pixels. Default: 7.
    #[builder(default = 7)]
    pub marker_radius: u32,

    /// Split line width in pixels. Default: 1.
    #[builder(default = 1)]
    pub line_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

/// Custom finishing function that validates the options.
impl<S: render_options_builder::IsComplete> RenderOptionsBuilder<S> {
    /// Build and validate the options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty or non-finite domain, an inverted
    /// colour range, or a pixel size that is zero or above [`MAX_PIXELS`].
    pub fn build(self) -> Result<RenderOptions, ConfigError> {
        let options = self.__build_internal();
        options.validate()?;
        Ok(options)
    }
}

impl RenderOptions {
    /// Validate the options. Needed after deserializing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.domain.is_proper() {
            return Err(ConfigError::InvalidDomain(self.domain));
        }

        let range = self.value_range;
        if !(range.is_valid() && range.min < range.max) {
            return Err(ConfigError::InvalidValueRange(range));
        }

        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidSize { width, height });
        }

        if self.marker_radius == 0 {
            return Err(ConfigError::ZeroPixels {
                field: "marker_radius",
            });
        }
        if self.line_width == 0 {
            return Err(ConfigError::ZeroPixels { field: "line_width" });
        }

        let bounded = [
            ("width", width),
            ("height", height),
            ("marker_radius", self.marker_radius),
            ("line_width", self.line_width),
        ];
        for (field, value) in bounded {
            if value > MAX_PIXELS {
                return Err(ConfigError::TooLarge {
                    field,
                    value,
                    max: MAX_PIXELS,
                });
            }
        }

        Ok(())
    }
}
