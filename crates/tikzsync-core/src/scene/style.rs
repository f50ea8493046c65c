//! Element style definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`Style`]: All visual properties of a scene element (color, fill, width, opacity, pattern, arrows)
//! - [`LineStyle`]: Line pattern (solid, dashed, dotted)
//! - [`ArrowHead`]: Arrow direction on open paths
//!
//! # Canonical defaults
//!
//! `Style::default()` is the single default table shared by the code generator
//! and the code parser. An option is written to TikZ source only when it
//! differs from this table, and the parser starts every decoded style from it.
//!
//! | Property     | Default  | TikZ option          |
//! |--------------|----------|----------------------|
//! | `color`      | `#000000`| `draw=` / `text=`    |
//! | `fill`       | none     | `fill=`              |
//! | `line_width` | `0.8` mm | `line width=0.8mm`   |
//! | `opacity`    | `100`    | `opacity=1`          |
//! | `line_style` | solid    | `dashed` / `dotted`  |
//! | `arrow_head` | none     | `->` / `<-` / `<->`  |

use std::str::FromStr;

use crate::color::Color;

/// Default line width in millimeters.
pub const DEFAULT_LINE_WIDTH: f64 = 0.8;

/// Default opacity as a percentage.
pub const DEFAULT_OPACITY: u8 = 100;

/// Line pattern of a stroke.
///
/// # SVG Mapping
///
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
}

impl LineStyle {
    /// Returns the TikZ option keyword, or None for solid lines.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("dashed"),
            Self::Dotted => Some("dotted"),
        }
    }

    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

/// Arrow direction drawn on an open path.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowHead {
    #[default]
    None,
    /// Arrow at the end point (`->`)
    Forward,
    /// Arrow at the start point (`<-`)
    Backward,
    /// Arrows at both ends (`<->`)
    Both,
}

impl ArrowHead {
    /// Returns the TikZ arrow specification, or None when no arrow is drawn.
    pub fn as_tikz(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Forward => Some("->"),
            Self::Backward => Some("<-"),
            Self::Both => Some("<->"),
        }
    }

    /// Returns true if an arrow is drawn at the start of the path.
    pub fn has_start(self) -> bool {
        matches!(self, Self::Backward | Self::Both)
    }

    /// Returns true if an arrow is drawn at the end of the path.
    pub fn has_end(self) -> bool {
        matches!(self, Self::Forward | Self::Both)
    }
}

impl FromStr for ArrowHead {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "" => Ok(Self::None),
            "->" => Ok(Self::Forward),
            "<-" => Ok(Self::Backward),
            "<->" => Ok(Self::Both),
            _ => Err(format!(
                "invalid arrow head `{s}`, valid values: none, ->, <-, <->"
            )),
        }
    }
}

/// Visual style of a scene element.
///
/// Invariants: `line_width >= 0` and `opacity <= 100`. Setters clamp their
/// input so the invariants hold for every reachable value.
///
/// # Examples
///
/// ```
/// use tikzsync_core::color::Color;
/// use tikzsync_core::scene::{ArrowHead, LineStyle, Style};
///
/// let style = Style::default()
///     .with_color(Color::from_rgb(255, 0, 0))
///     .with_line_style(LineStyle::Dashed)
///     .with_arrow_head(ArrowHead::Forward);
///
/// assert_eq!(style.color().to_hex(), "ff0000");
/// assert!(!style.is_default());
/// assert!(Style::default().is_default());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    color: Color,
    fill: Option<Color>,
    line_width: f64,
    opacity: u8,
    line_style: LineStyle,
    arrow_head: ArrowHead,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            fill: None,
            line_width: DEFAULT_LINE_WIDTH,
            opacity: DEFAULT_OPACITY,
            line_style: LineStyle::Solid,
            arrow_head: ArrowHead::None,
        }
    }
}

impl Style {
    /// Returns the stroke (or text) color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the fill color, if any.
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    /// Returns the line width in millimeters.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Returns the opacity as a percentage in `0..=100`.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Returns the line pattern.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Returns the arrow direction.
    pub fn arrow_head(&self) -> ArrowHead {
        self.arrow_head
    }

    /// Returns true if every property equals the canonical default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    /// Sets the line width in millimeters.
    ///
    /// Negative widths clamp to zero; NaN falls back to the default width.
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = if width.is_nan() {
            DEFAULT_LINE_WIDTH
        } else {
            width.max(0.0)
        };
    }

    /// Sets the opacity percentage, clamped to 100.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity.min(100);
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.line_style = line_style;
    }

    pub fn set_arrow_head(&mut self, arrow_head: ArrowHead) {
        self.arrow_head = arrow_head;
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.set_fill(Some(fill));
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.set_line_width(width);
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.set_line_style(line_style);
        self
    }

    pub fn with_arrow_head(mut self, arrow_head: ArrowHead) -> Self {
        self.set_arrow_head(arrow_head);
        self
    }
}
