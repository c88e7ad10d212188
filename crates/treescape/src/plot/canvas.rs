//! In-memory drawing context.
//!
//! A [`Canvas`] is a plain list of shapes in data coordinates, grouped into
//! [`Layer`]s that are painted bottom to top. Renders take a canvas by value
//! and hand it back with their shapes added, so several renders can be
//! composed and every shape can be inspected before encoding.

use plotters::style::RGBColor;

use crate::partition::Rect;
use crate::repr::NodeId;

use super::colormap::ColorScale;

/// Paint order. Later layers are drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Regions,
    Breaks,
    Points,
    Annotations,
}

/// Horizontal anchor of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Left,
    Center,
    Right,
}

/// A drawable primitive in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    FilledRect {
        rect: Rect,
        color: RGBColor,
    },
    Segment {
        from: [f64; 2],
        to: [f64; 2],
        color: RGBColor,
        width: u32,
    },
    /// Round marker with an edge ring.
    Marker {
        at: [f64; 2],
        radius: u32,
        fill: RGBColor,
        edge: RGBColor,
    },
    Text {
        at: [f64; 2],
        text: String,
        size: f64,
        color: RGBColor,
        bold: bool,
        anchor: Anchor,
    },
}

/// A shape plus where it goes and which tree node produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub layer: Layer,
    pub node: Option<NodeId>,
    pub shape: Shape,
}

/// Colourbar drawn beside the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub scale: ColorScale,
    pub label: Option<String>,
}

/// Explicit drawing context.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: (u32, u32),
    domain: Rect,
    show_axes: bool,
    items: Vec<Item>,
    colorbar: Option<Colorbar>,
}

impl Canvas {
    /// Empty canvas of `size` pixels showing `domain`.
    pub fn new(size: (u32, u32), domain: Rect) -> Self {
        Self {
            size,
            domain,
            show_axes: true,
            items: Vec::new(),
            colorbar: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn domain(&self) -> Rect {
        self.domain
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    /// Hide axis ticks and labels (annotation-only figures).
    #[must_use]
    pub fn without_axes(mut self) -> Self {
        self.show_axes = false;
        self
    }

    pub fn push(&mut self, layer: Layer, node: Option<NodeId>, shape: Shape) {
        self.items.push(Item { layer, node, shape });
    }

    pub fn set_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbar = Some(colorbar);
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    /// Items in paint order: by layer, insertion order within a layer.
    pub fn painted(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_key(|item| item.layer);
        items
    }

    /// Shapes on one layer in insertion order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Shape> + '_ {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.shape)
    }

    /// Shapes produced for a given tree node.
    pub fn node_shapes(&self, node: NodeId) -> impl Iterator<Item = &Shape> + '_ {
        self.items
            .iter()
            .filter(move |item| item.node == Some(node))
            .map(|item| &item.shape)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.colorbar.is_none()
    }
}
