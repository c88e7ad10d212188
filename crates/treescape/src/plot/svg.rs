//! SVG encoding of a [`Canvas`] through the plotters SVG backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use super::canvas::{Anchor, Canvas, Colorbar, Shape};
use super::options::{ConfigError, MAX_PIXELS};
use super::render::RenderError;

/// Pixel width reserved for the colourbar.
const COLORBAR_WIDTH: u32 = 120;
/// Number of colour bands in the colourbar.
const COLORBAR_STEPS: usize = 64;
const FONT: &str = "sans-serif";

fn backend<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Backend(err.to_string())
}

/// Pixel quantity as a plotters coordinate, bounded by [`MAX_PIXELS`].
fn pixels(field: &'static str, value: u32) -> Result<i32, RenderError> {
    match i32::try_from(value) {
        Ok(px) if value <= MAX_PIXELS => Ok(px),
        _ => Err(ConfigError::TooLarge {
            field,
            value,
            max: MAX_PIXELS,
        }
        .into()),
    }
}

impl Canvas {
    /// Encode the canvas as an SVG document.
    pub fn to_svg_string(&self) -> Result<String, RenderError> {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidSize { width, height }.into());
        }
        pixels("width", width)?;
        pixels("height", height)?;
        if !self.domain().is_proper() {
            return Err(ConfigError::InvalidDomain(self.domain()).into());
        }

        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(backend)?;

            match self.colorbar() {
                Some(colorbar) if width > 2 * COLORBAR_WIDTH => {
                    let (plot_area, bar_area) =
                        root.split_horizontally(pixels("width", width - COLORBAR_WIDTH)?);
                    draw_plot(&plot_area, self)?;
                    draw_colorbar(&bar_area, colorbar)?;
                }
                Some(_) => {
                    tracing::warn!(
                        width,
                        min_width = 2 * COLORBAR_WIDTH + 1,
                        "canvas too narrow for a colourbar, colourbar not drawn"
                    );
                    draw_plot(&root, self)?;
                }
                None => draw_plot(&root, self)?,
            }

            root.present().map_err(backend)?;
        }

        tracing::debug!(bytes = out.len(), n_items = self.len(), "encoded svg");
        Ok(out)
    }

    /// Encode the canvas as SVG and write it to `path`.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let svg = self.to_svg_string()?;
        std::fs::write(path.as_ref(), svg)?;
        tracing::info!(path = %path.as_ref().display(), "wrote svg");
        Ok(())
    }
}

fn draw_plot(area: &DrawingArea<SVGBackend<'_>, Shift>, canvas: &Canvas) -> Result<(), RenderError> {
    let domain = canvas.domain();

    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if canvas.show_axes() {
        builder.x_label_area_size(40).y_label_area_size(50);
    }
    let mut chart = builder
        .build_cartesian_2d(domain.xmin..domain.xmax, domain.ymin..domain.ymax)
        .map_err(backend)?;

    if canvas.show_axes() {
        chart.configure_mesh().disable_mesh().draw().map_err(backend)?;
    }

    for item in canvas.painted() {
        let drawn = match &item.shape {
            Shape::FilledRect { rect, color } => chart.draw_series(std::iter::once(Rectangle::new(
                [(rect.xmin, rect.ymin), (rect.xmax, rect.ymax)],
                color.filled(),
            ))),
            Shape::Segment {
                from,
                to,
                color,
                width,
            } => chart.draw_series(std::iter::once(PathElement::new(
                vec![(from[0], from[1]), (to[0], to[1])],
                color.stroke_width(*width),
            ))),
            Shape::Marker {
                at,
                radius,
                fill,
                edge,
            } => {
                let inner = pixels("marker_radius", *radius)?;
                let outer = inner.saturating_add(2);
                chart.draw_series([
                    Circle::new((at[0], at[1]), outer, edge.filled()),
                    Circle::new((at[0], at[1]), inner, fill.filled()),
                ])
            }
            Shape::Text {
                at,
                text,
                size,
                color,
                bold,
                anchor,
            } => {
                let font = (FONT, *size).into_font();
                let font = if *bold { font.style(FontStyle::Bold) } else { font };
                let hpos = match anchor {
                    Anchor::Left => HPos::Left,
                    Anchor::Center => HPos::Center,
                    Anchor::Right => HPos::Right,
                };
                let style = font.color(color).pos(Pos::new(hpos, VPos::Bottom));
                chart.draw_series(std::iter::once(Text::new(text.clone(), (at[0], at[1]), style)))
            }
        };
        drawn.map_err(backend)?;
    }

    Ok(())
}

fn draw_colorbar(area: &DrawingArea<SVGBackend<'_>, Shift>, colorbar: &Colorbar) -> Result<(), RenderError> {
    let scale = colorbar.scale;
    // A single distinct label still needs a drawable range.
    let (lo, hi) = if scale.max > scale.min {
        (scale.min, scale.max)
    } else {
        (scale.min - 0.5, scale.max + 0.5)
    };

    let mut builder = ChartBuilder::on(area);
    builder.margin(20).y_label_area_size(60);
    if let Some(label) = &colorbar.label {
        builder.caption(label.as_str(), (FONT, 14.0));
    }
    let mut chart = builder.build_cartesian_2d(0.0..1.0, lo..hi).map_err(backend)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .draw()
        .map_err(backend)?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let y0 = lo + step * i as f64;
            let color = scale.color(y0 + step / 2.0);
            Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
        }))
        .map_err(backend)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Rect;
    use crate::plot::{ColorScale, Layer};

    #[test]
    fn encodes_shapes_as_svg_elements() {
        let mut canvas = Canvas::new((400, 300), Rect::UNIT);
        canvas.push(
            Layer::Regions,
            Some(1),
            Shape::FilledRect {
                rect: Rect::new(0.0, 0.5, 0.0, 1.0),
                color: RGBColor(0x44, 0x01, 0x54),
            },
        );
        canvas.push(
            Layer::Breaks,
            Some(0),
            Shape::Segment {
                from: [0.5, 0.0],
                to: [0.5, 1.0],
                color: RGBColor(0, 0, 0),
                width: 1,
            },
        );

        let svg = canvas.to_svg_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("#440154"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn colorbar_is_drawn_beside_plot() {
        let mut canvas = Canvas::new((600, 400), Rect::UNIT);
        canvas.set_colorbar(Colorbar {
            scale: ColorScale::new(0.0, 10.0),
            label: Some("label".into()),
        });
        let svg = canvas.to_svg_string().unwrap();
        assert!(svg.matches("<rect").count() >= 64);
    }

    #[test]
    fn narrow_canvas_skips_colorbar() {
        let mut canvas = Canvas::new((200, 200), Rect::UNIT);
        canvas.set_colorbar(Colorbar {
            scale: ColorScale::new(0.0, 10.0),
            label: None,
        });
        let svg = canvas.to_svg_string().unwrap();
        assert!(svg.matches("<rect").count() < 64);
    }

    #[test]
    fn oversized_marker_is_rejected() {
        let mut canvas = Canvas::new((400, 300), Rect::UNIT);
        canvas.push(
            Layer::Points,
            None,
            Shape::Marker {
                at: [0.5, 0.5],
                radius: u32::MAX,
                fill: RGBColor(0, 0, 0),
                edge: RGBColor(255, 255, 255),
            },
        );
        assert!(matches!(
            canvas.to_svg_string(),
            Err(RenderError::InvalidOptions(ConfigError::TooLarge {
                field: "marker_radius",
                ..
            }))
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let canvas = Canvas::new((0, 100), Rect::UNIT);
        assert!(matches!(
            canvas.to_svg_string(),
            Err(RenderError::InvalidOptions(ConfigError::InvalidSize { .. }))
        ));
    }
}
