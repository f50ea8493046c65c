//! Scene element types.
//!
//! Each element kind carries exactly the parameters it needs: every shape
//! type is its own variant, so an element can never hold an incomplete set of
//! coordinates.

use std::fmt;

use crate::geometry::Point;

use super::style::Style;

/// Opaque, counter-allocated element key.
///
/// Ids are unique within one [`Scene`](super::Scene) and never reused by it.
/// They display as `el-1`, `el-2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}

/// The broad category of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Shape,
    Text,
    Plot,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Shape => "shape",
            Self::Text => "text",
            Self::Plot => "plot",
        };
        f.write_str(name)
    }
}

/// Geometry of a shape element, in logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeParams {
    Circle { center: Point, radius: f64 },
    /// `origin` is one corner; `width` and `height` are the relative extent
    /// to the opposite corner and may be negative.
    Rectangle {
        origin: Point,
        width: f64,
        height: f64,
    },
    Line { start: Point, end: Point },
    /// Unit-step grid spanning two opposite corners.
    Grid { from: Point, to: Point },
}

impl ShapeParams {
    /// Returns the shape type name used in logs and presets.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rectangle { .. } => "rectangle",
            Self::Line { .. } => "line",
            Self::Grid { .. } => "grid",
        }
    }
}

/// A text label anchored at a logical position.
///
/// The content is kept in TeX form so it can be written between braces as
/// is: unescaped `%` and unbalanced braces are escaped with a backslash,
/// line breaks become spaces, and a trailing lone backslash is followed by a
/// space. Content that is already in this form is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    position: Point,
    content: String,
}

impl TextParams {
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: escape_content(&content.into()),
        }
    }

    /// The content with the escaping backslashes of `\%`, `\{` and `\}`
    /// removed, as it reads in the typeset document.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.content.len());
        let mut chars = self.content.chars().peekable();
        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                ('\\', Some(&next)) if matches!(next, '%' | '{' | '}') => {
                    out.push(next);
                    chars.next();
                }
                ('\\', Some(&next)) => {
                    out.push(c);
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            }
        }
        out
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Brings label content into the form described on [`TextParams`].
///
/// A backslash escapes the character after it, the same rule the code
/// parser applies when it strips comments and matches braces.
fn escape_content(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    // Byte offsets in `out` of `{` still waiting for their `}`.
    let mut open = Vec::new();
    let mut escaped = false;

    for c in raw.chars() {
        let c = if matches!(c, '\n' | '\r') { ' ' } else { c };
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '%' => out.push_str("\\%"),
            '{' => {
                open.push(out.len());
                out.push(c);
            }
            '}' if open.pop().is_some() => out.push(c),
            '}' => out.push_str("\\}"),
            _ => out.push(c),
        }
    }
    if escaped {
        out.push(' ');
    }
    for pos in open.into_iter().rev() {
        out.insert(pos, '\\');
    }
    out
}

/// Closed sampling interval for a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    /// Returns the interval with its bounds in ascending order.
    pub fn ordered(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self::new(self.max, self.min)
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-5.0, 5.0)
    }
}

/// Axis configuration shared by the plots of one axis block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    domain: Domain,
    samples: u32,
    show_axis: bool,
}

impl AxisConfig {
    /// Default number of samples per plot.
    pub const DEFAULT_SAMPLES: u32 = 100;

    pub fn new(domain: Domain, samples: u32, show_axis: bool) -> Self {
        Self {
            domain,
            samples,
            show_axis,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn show_axis(&self) -> bool {
        self.show_axis
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.domain = domain;
    }

    pub fn set_samples(&mut self, samples: u32) {
        self.samples = samples;
    }

    pub fn set_show_axis(&mut self, show_axis: bool) {
        self.show_axis = show_axis;
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(Domain::default(), Self::DEFAULT_SAMPLES, true)
    }
}

/// A function plot `y = f(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotParams {
    expression: String,
    axis: AxisConfig,
}

impl PlotParams {
    pub fn new(expression: impl Into<String>, axis: AxisConfig) -> Self {
        Self {
            expression: expression.into(),
            axis,
        }
    }

    /// Returns the expression source text, as written between the braces.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn axis(&self) -> &AxisConfig {
        &self.axis
    }
}

/// Kind-specific element parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementParams {
    Shape(ShapeParams),
    Text(TextParams),
    Plot(PlotParams),
}

impl ElementParams {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Shape(_) => ElementKind::Shape,
            Self::Text(_) => ElementKind::Text,
            Self::Plot(_) => ElementKind::Plot,
        }
    }
}

/// An element description that has not been placed in a scene yet.
///
/// Specs are what presets and the code parser produce; the scene assigns ids
/// when it takes ownership of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    params: ElementParams,
    style: Style,
}

impl ElementSpec {
    pub fn new(params: ElementParams, style: Style) -> Self {
        Self { params, style }
    }

    /// A circle with the default style.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(
            ElementParams::Shape(ShapeParams::Circle { center, radius }),
            Style::default(),
        )
    }

    /// A rectangle with the default style.
    pub fn rectangle(origin: Point, width: f64, height: f64) -> Self {
        Self::new(
            ElementParams::Shape(ShapeParams::Rectangle {
                origin,
                width,
                height,
            }),
            Style::default(),
        )
    }

    /// A line segment with the default style.
    pub fn line(start: Point, end: Point) -> Self {
        Self::new(
            ElementParams::Shape(ShapeParams::Line { start, end }),
            Style::default(),
        )
    }

    pub fn grid(from: Point, to: Point) -> Self {
        Self::new(
            ElementParams::Shape(ShapeParams::Grid { from, to }),
            Style::default(),
        )
    }

    pub fn text(position: Point, content: impl Into<String>) -> Self {
        Self::new(
            ElementParams::Text(TextParams::new(position, content)),
            Style::default(),
        )
    }

    pub fn plot(expression: impl Into<String>, axis: AxisConfig) -> Self {
        Self::new(
            ElementParams::Plot(PlotParams::new(expression, axis)),
            Style::default(),
        )
    }

    /// Replaces the style, returning the updated spec.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn params(&self) -> &ElementParams {
        &self.params
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn kind(&self) -> ElementKind {
        self.params.kind()
    }
}

/// An element owned by a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    id: ElementId,
    params: ElementParams,
    style: Style,
}

impl SceneElement {
    pub(crate) fn from_spec(id: ElementId, spec: ElementSpec) -> Self {
        Self {
            id,
            params: spec.params,
            style: spec.style,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.params.kind()
    }

    pub fn params(&self) -> &ElementParams {
        &self.params
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the plot parameters if this element is a plot.
    pub fn as_plot(&self) -> Option<&PlotParams> {
        match &self.params {
            ElementParams::Plot(plot) => Some(plot),
            _ => None,
        }
    }

    /// Returns true if the element matches `other` ignoring ids.
    pub fn same_content(&self, other: &SceneElement) -> bool {
        self.params == other.params && self.style == other.style
    }

    /// Detaches the element from its id.
    pub fn to_spec(&self) -> ElementSpec {
        ElementSpec::new(self.params.clone(), self.style.clone())
    }
}
