//! SVG rendering of previews.

use std::path::{Path, PathBuf};

use log::{debug, info};
use svg::{self, Document, node::Text as SvgText, node::element as svg_element};

use tikzsync_core::{
    color::Color,
    geometry::Point,
    scene::{ArrowHead, Style},
};

use super::{Error, Exporter};
use crate::{
    config::PreviewConfig,
    preview::{Preview, Primitive},
};

/// Pixels per millimeter at 96 dpi.
const PX_PER_MM: f64 = 96.0 / 25.4;
const GRID_COLOR: &str = "#d9d9d9";
const AXIS_COLOR: &str = "#808080";

/// Apply the stroke part of a [`Style`] to an SVG element.
///
/// Sets color, opacity, width (converted from millimeters) and the dash
/// pattern when the line is not solid.
macro_rules! apply_style {
    ($element:expr, $style:expr) => {{
        let style: &Style = $style;
        let mut elem = $element
            .set("stroke", style.color().to_string())
            .set("stroke-opacity", f64::from(style.opacity()) / 100.0)
            .set("stroke-width", style.line_width() * PX_PER_MM);

        if let Some(dasharray) = style.line_style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

/// Apply the fill part of a [`Style`], or `fill="none"` when there is none.
macro_rules! apply_fill {
    ($element:expr, $style:expr) => {{
        let style: &Style = $style;
        let elem = $element;
        match style.fill() {
            Some(fill) => elem
                .set("fill", fill.to_string())
                .set("fill-opacity", f64::from(style.opacity()) / 100.0),
            None => elem.set("fill", "none"),
        }
    }};
}

/// Renders `preview` to an SVG document string.
///
/// # Errors
///
/// Returns [`Error::Render`] if the configured background color is invalid.
pub fn render(preview: &Preview, config: &PreviewConfig) -> Result<String, Error> {
    Ok(Svg::new(config)?.render(preview).to_string())
}

/// Builds SVG documents from previews.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Color,
    font_size: f64,
}

impl Svg {
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn new(config: &PreviewConfig) -> Result<Self, Error> {
        Ok(Self {
            background: config.background_color().map_err(Error::Render)?,
            font_size: config.font_size(),
        })
    }

    /// Renders the complete preview to an SVG document.
    pub fn render(&self, preview: &Preview) -> Document {
        let size = preview.viewport().size();
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height())
            .add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.background.to_string()),
            );

        let markers = Self::marker_definitions(preview);
        if let Some(defs) = markers {
            doc = doc.add(defs);
        }

        for primitive in preview.primitives() {
            doc = doc.add(self.render_primitive(primitive));
        }

        debug!(primitives = preview.primitives().len(); "Rendered preview to SVG");
        doc
    }

    fn render_primitive(&self, primitive: &Primitive) -> Box<dyn svg::Node> {
        match primitive {
            Primitive::Circle {
                center,
                radius,
                style,
            } => {
                let circle = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", *radius);
                Box::new(apply_fill!(apply_style!(circle, style), style))
            }
            Primitive::Rectangle {
                origin,
                size,
                style,
            } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", size.width())
                    .set("height", size.height());
                Box::new(apply_fill!(apply_style!(rect, style), style))
            }
            Primitive::Line { start, end, style } => {
                let line = svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y());
                let mut line = apply_style!(line, style);
                let arrow = style.arrow_head();
                if arrow.has_start() {
                    line = line.set("marker-start", marker_ref(MarkerEnd::Start, style.color()));
                }
                if arrow.has_end() {
                    line = line.set("marker-end", marker_ref(MarkerEnd::End, style.color()));
                }
                Box::new(line)
            }
            Primitive::GridLine { start, end } => Box::new(
                svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y())
                    .set("stroke", GRID_COLOR)
                    .set("stroke-width", 0.5)
                    .set("stroke-dasharray", "5,5"),
            ),
            Primitive::Label {
                position,
                content,
                style,
            } => Box::new(
                svg_element::Text::new("")
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-size", self.font_size)
                    .set("fill", style.color().to_string())
                    .set("fill-opacity", f64::from(style.opacity()) / 100.0)
                    .add(SvgText::new(content.as_str())),
            ),
            Primitive::Curve { segments, style } => {
                let group = segments.iter().filter(|s| !s.is_empty()).fold(
                    svg_element::Group::new(),
                    |group, segment| {
                        let polyline = svg_element::Polyline::new()
                            .set("points", points_attribute(segment))
                            .set("fill", "none");
                        group.add(apply_style!(polyline, style))
                    },
                );
                Box::new(group)
            }
            Primitive::Axis { start, end } => Box::new(
                svg_element::Line::new()
                    .set("x1", start.x())
                    .set("y1", start.y())
                    .set("x2", end.x())
                    .set("y2", end.y())
                    .set("stroke", AXIS_COLOR)
                    .set("stroke-width", 1),
            ),
        }
    }

    /// One marker per color and line end used by an arrow in the preview.
    fn marker_definitions(preview: &Preview) -> Option<svg_element::Definitions> {
        let mut needed: Vec<(MarkerEnd, Color)> = Vec::new();
        for primitive in preview.primitives() {
            if let Primitive::Line { style, .. } = primitive {
                let arrow = style.arrow_head();
                if arrow == ArrowHead::None {
                    continue;
                }
                for (end, used) in [
                    (MarkerEnd::Start, arrow.has_start()),
                    (MarkerEnd::End, arrow.has_end()),
                ] {
                    if used && !needed.contains(&(end, style.color())) {
                        needed.push((end, style.color()));
                    }
                }
            }
        }

        if needed.is_empty() {
            return None;
        }
        Some(
            needed
                .into_iter()
                .fold(svg_element::Definitions::new(), |defs, (end, color)| {
                    defs.add(create_marker(end, color))
                }),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerEnd {
    Start,
    End,
}

fn marker_id(end: MarkerEnd, color: Color) -> String {
    match end {
        MarkerEnd::Start => format!("arrow-start-{}", color.to_hex()),
        MarkerEnd::End => format!("arrow-end-{}", color.to_hex()),
    }
}

fn marker_ref(end: MarkerEnd, color: Color) -> String {
    format!("url(#{})", marker_id(end, color))
}

fn create_marker(end: MarkerEnd, color: Color) -> svg_element::Marker {
    let (ref_x, path) = match end {
        MarkerEnd::Start => (1, "M 10 0 L 0 5 L 10 10 z"),
        MarkerEnd::End => (9, "M 0 0 L 10 5 L 0 10 z"),
    };
    svg_element::Marker::new()
        .set("id", marker_id(end, color))
        .set("viewBox", "0 0 10 10")
        .set("refX", ref_x)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", path)
                .set("fill", color.to_string()),
        )
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes previews to an SVG file.
#[derive(Debug)]
pub struct SvgExporter {
    path: PathBuf,
    svg: Svg,
}

impl SvgExporter {
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn new(path: impl AsRef<Path>, config: &PreviewConfig) -> Result<Self, Error> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            svg: Svg::new(config)?,
        })
    }
}

impl Exporter for SvgExporter {
    fn export_preview(&mut self, preview: &Preview) -> Result<(), Error> {
        let doc = self.svg.render(preview);
        svg::save(&self.path, &doc).map_err(Error::Io)?;
        info!(path:? = self.path; "SVG preview written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tikzsync_core::{
        geometry::Viewport,
        scene::{AxisConfig, ElementSpec, LineStyle, Scene},
    };
    use tikzsync_parser::expr::SampleLimits;

    use super::*;

    fn render_scene(specs: Vec<ElementSpec>) -> String {
        let preview = Preview::build(
            &Scene::from_specs(specs),
            Viewport::default(),
            &SampleLimits::default(),
        );
        render(&preview, &PreviewConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let svg = render_scene(Vec::new());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 500 400\""));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(!svg.contains("<defs"));
    }

    #[test]
    fn test_style_attributes() {
        let style = Style::default()
            .with_color(Color::from_rgb(255, 0, 0))
            .with_fill(Color::from_rgb(0, 0, 255))
            .with_opacity(50)
            .with_line_style(LineStyle::Dashed);
        let svg = render_scene(vec![
            ElementSpec::circle(Point::new(0.0, 0.0), 1.0).with_style(style),
        ]);

        assert!(svg.contains("stroke=\"#ff0000\""));
        assert!(svg.contains("fill=\"#0000ff\""));
        assert!(svg.contains("stroke-opacity=\"0.5\""));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn test_arrow_markers() {
        let svg = render_scene(vec![
            ElementSpec::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
                .with_style(Style::default().with_arrow_head(ArrowHead::Both)),
        ]);

        assert!(svg.contains("id=\"arrow-start-000000\""));
        assert!(svg.contains("id=\"arrow-end-000000\""));
        assert!(svg.contains("marker-end=\"url(#arrow-end-000000)\""));
    }

    #[test]
    fn test_label() {
        let svg = render_scene(vec![ElementSpec::text(Point::new(1.0, 0.0), "Hello")]);
        assert!(svg.contains("<text"));
        assert!(svg.contains("Hello"));
        assert!(svg.contains("x=\"290\""));
    }

    #[test]
    fn test_plot_renders_polylines() {
        let svg = render_scene(vec![ElementSpec::plot("1/x", AxisConfig::default())]);
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_invalid_background_color() {
        let config: PreviewConfig = toml::from_str("background_color = \"nope\"").unwrap();
        assert!(matches!(Svg::new(&config), Err(Error::Render(_))));
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.svg");

        let preview = Preview::build(&Scene::new(), Viewport::default(), &SampleLimits::default());
        let mut exporter = SvgExporter::new(&path, &PreviewConfig::default()).unwrap();
        exporter.export_preview(&preview).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
    }
}
