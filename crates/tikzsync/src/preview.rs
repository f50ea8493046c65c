//! Pixel-space preview of a scene.
//!
//! [`Preview::build`] maps every element through the geometry mapper and
//! samples every plot through the sandboxed expression evaluator. Plots whose
//! expression does not compile draw nothing; their diagnostics are kept in
//! [`Preview::failures`].

use log::{debug, warn};

use tikzsync_core::{
    geometry::{Point, Size, Viewport},
    scene::{ElementId, ElementParams, PlotParams, Scene, SceneElement, ShapeParams, Style},
};
use tikzsync_parser::{
    error::ParseError,
    expr::{self, SampleLimits},
};

use crate::error::TikzSyncError;

/// Grids that would need more lines than this on the canvas are not drawn.
pub const MAX_GRID_LINES: usize = 2000;

/// A drawable item in preview pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f64,
        style: Style,
    },
    /// `origin` is the top-left corner.
    Rectangle {
        origin: Point,
        size: Size,
        style: Style,
    },
    Line {
        start: Point,
        end: Point,
        style: Style,
    },
    GridLine {
        start: Point,
        end: Point,
    },
    Label {
        position: Point,
        content: String,
        style: Style,
    },
    /// Sampled plot, one polyline per contiguous segment.
    Curve {
        segments: Vec<Vec<Point>>,
        style: Style,
    },
    Axis {
        start: Point,
        end: Point,
    },
}

/// A plot whose expression could not be compiled.
#[derive(Debug, Clone)]
pub struct PlotFailure {
    element: ElementId,
    expression: String,
    error: ParseError,
}

impl PlotFailure {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Diagnostics with spans into [`expression`](Self::expression).
    pub fn error(&self) -> &ParseError {
        &self.error
    }

    pub fn to_error(&self) -> TikzSyncError {
        TikzSyncError::new_expression_error(self.error.clone(), self.expression.clone())
    }
}

/// The rendered form of a scene.
#[derive(Debug, Clone)]
pub struct Preview {
    viewport: Viewport,
    primitives: Vec<Primitive>,
    failures: Vec<PlotFailure>,
}

impl Preview {
    /// Builds the preview of `scene`.
    ///
    /// Non-plot elements come first in scene order, then the axes (when the
    /// first plot shows them), then the plot curves.
    pub fn build(scene: &Scene, viewport: Viewport, limits: &SampleLimits) -> Self {
        let mut preview = Self {
            viewport,
            primitives: Vec::new(),
            failures: Vec::new(),
        };

        for element in scene.others() {
            preview.add_element(element);
        }

        if scene
            .plots()
            .next()
            .and_then(SceneElement::as_plot)
            .is_some_and(|plot| plot.axis().show_axis())
        {
            preview.add_axes();
        }

        for element in scene.plots() {
            if let Some(plot) = element.as_plot() {
                preview.add_plot(element.id(), plot, element.style(), limits);
            }
        }

        debug!(
            primitives = preview.primitives.len(),
            failures = preview.failures.len();
            "Preview built"
        );
        preview
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn failures(&self) -> &[PlotFailure] {
        &self.failures
    }

    fn add_element(&mut self, element: &SceneElement) {
        let vp = self.viewport;
        let style = element.style().clone();
        match element.params() {
            ElementParams::Shape(ShapeParams::Circle { center, radius }) => {
                self.primitives.push(Primitive::Circle {
                    center: vp.to_pixel(*center),
                    radius: vp.to_pixel_length(radius.abs()),
                    style,
                });
            }
            ElementParams::Shape(ShapeParams::Rectangle {
                origin,
                width,
                height,
            }) => {
                let a = vp.to_pixel(*origin);
                let b = vp.to_pixel(origin.add_point(Point::new(*width, *height)));
                self.primitives.push(Primitive::Rectangle {
                    origin: Point::new(a.x().min(b.x()), a.y().min(b.y())),
                    size: Size::new((a.x() - b.x()).abs(), (a.y() - b.y()).abs()),
                    style,
                });
            }
            ElementParams::Shape(ShapeParams::Line { start, end }) => {
                self.primitives.push(Primitive::Line {
                    start: vp.to_pixel(*start),
                    end: vp.to_pixel(*end),
                    style,
                });
            }
            ElementParams::Shape(ShapeParams::Grid { from, to }) => self.add_grid(*from, *to),
            ElementParams::Text(text) => {
                self.primitives.push(Primitive::Label {
                    position: vp.to_pixel(text.position()),
                    content: text.plain_text(),
                    style,
                });
            }
            ElementParams::Plot(_) => {}
        }
    }

    /// Unit-step grid lines between two corners, limited to the visible
    /// canvas.
    fn add_grid(&mut self, from: Point, to: Point) {
        let vp = self.viewport;
        let (view_left, view_right) = vp.logical_x_range();
        let (view_bottom, view_top) = vp.logical_y_range();

        let left = from.x().min(to.x()).max(view_left.floor());
        let right = from.x().max(to.x()).min(view_right.ceil());
        let bottom = from.y().min(to.y()).max(view_bottom.floor());
        let top = from.y().max(to.y()).min(view_top.ceil());
        if !(left <= right && bottom <= top) {
            return;
        }

        let count = (right.floor() - left.ceil() + 1.0).max(0.0)
            + (top.floor() - bottom.ceil() + 1.0).max(0.0);
        if count > MAX_GRID_LINES as f64 {
            warn!(lines = count, limit = MAX_GRID_LINES; "Grid too dense to preview, skipped");
            return;
        }

        let mut x = left.ceil();
        while x <= right {
            self.primitives.push(Primitive::GridLine {
                start: vp.to_pixel(Point::new(x, bottom)),
                end: vp.to_pixel(Point::new(x, top)),
            });
            x += 1.0;
        }
        let mut y = bottom.ceil();
        while y <= top {
            self.primitives.push(Primitive::GridLine {
                start: vp.to_pixel(Point::new(left, y)),
                end: vp.to_pixel(Point::new(right, y)),
            });
            y += 1.0;
        }
    }

    fn add_axes(&mut self) {
        let size = self.viewport.size();
        let origin = self.viewport.origin();
        self.primitives.push(Primitive::Axis {
            start: Point::new(0.0, origin.y()),
            end: Point::new(size.width(), origin.y()),
        });
        self.primitives.push(Primitive::Axis {
            start: Point::new(origin.x(), size.height()),
            end: Point::new(origin.x(), 0.0),
        });
    }

    fn add_plot(&mut self, id: ElementId, plot: &PlotParams, style: &Style, limits: &SampleLimits) {
        let expression = match expr::compile(plot.expression()) {
            Ok(expression) => expression,
            Err(error) => {
                warn!(id:%, expression = plot.expression(), error:%; "Plot expression rejected");
                self.failures.push(PlotFailure {
                    element: id,
                    expression: plot.expression().to_string(),
                    error,
                });
                return;
            }
        };

        let curve = expression.sample(plot.axis().domain(), plot.axis().samples(), limits);
        let segments = curve
            .segments()
            .iter()
            .map(|segment| segment.iter().map(|p| self.viewport.to_pixel(*p)).collect())
            .collect();
        self.primitives.push(Primitive::Curve {
            segments,
            style: style.clone(),
        });
    }
}
