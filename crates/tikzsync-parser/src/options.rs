//! Decoding of bracketed TikZ option lists (`[draw=ff0000, dashed, ->]`).
//!
//! Each entry is decoded on its own. Unknown keys, and known keys with values
//! that do not parse, are ignored; every property that is not mentioned keeps
//! its canonical default from [`Style::default`].

use log::trace;
use tikzsync_core::{
    color::Color,
    scene::{ArrowHead, Domain, ElementKind, LineStyle, Style},
};

/// Millimeters per TeX point (1pt = 1/72.27 in).
const MM_PER_PT: f64 = 25.4 / 72.27;

/// Options decoded from one bracket group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    draw: Option<Color>,
    text: Option<Color>,
    color: Option<Color>,
    fill: Option<Color>,
    line_width: Option<f64>,
    opacity: Option<u8>,
    line_style: Option<LineStyle>,
    arrow_head: Option<ArrowHead>,
    domain: Option<Domain>,
    samples: Option<u32>,
    show_axis: Option<bool>,
}

impl Options {
    /// Decodes the text between `[` and `]`.
    pub fn decode(raw: &str) -> Self {
        let mut options = Self::default();
        for entry in split_top_level(raw) {
            options.apply_entry(entry);
        }
        options
    }

    fn apply_entry(&mut self, entry: &str) {
        let Some((key, value)) = entry.split_once('=') else {
            self.apply_flag(entry);
            return;
        };
        let key = key.trim();
        let value = strip_braces(value.trim());

        match key {
            "draw" => self.draw = parse_hex(value),
            "text" => self.text = parse_hex(value),
            "color" => self.color = parse_hex(value),
            "fill" => self.fill = parse_hex(value),
            "line width" => {
                if let Some(width) = parse_length_mm(value) {
                    self.line_width = Some(width);
                }
            }
            "opacity" => {
                if let Some(opacity) = parse_opacity(value) {
                    self.opacity = Some(opacity);
                }
            }
            "arrows" => {
                if let Ok(arrow) = value.parse() {
                    self.arrow_head = Some(arrow);
                }
            }
            "domain" => {
                if let Some(domain) = parse_domain(value) {
                    self.domain = Some(domain);
                }
            }
            "samples" => {
                if let Ok(samples) = value.parse() {
                    self.samples = Some(samples);
                }
            }
            "axis lines" => self.show_axis = Some(value != "none"),
            _ => trace!(key; "Ignoring unknown option"),
        }
    }

    fn apply_flag(&mut self, flag: &str) {
        let flag = dash_variant(flag).unwrap_or(flag);
        match flag {
            "->" | "<-" | "<->" => self.arrow_head = flag.parse().ok(),
            "solid" | "dashed" | "dotted" => self.line_style = flag.parse().ok(),
            "hide axis" => self.show_axis = Some(false),
            "ultra thin" => self.line_width = Some(0.1 * MM_PER_PT),
            "very thin" => self.line_width = Some(0.2 * MM_PER_PT),
            "thin" => self.line_width = Some(0.4 * MM_PER_PT),
            "semithick" => self.line_width = Some(0.6 * MM_PER_PT),
            "thick" => self.line_width = Some(0.8 * MM_PER_PT),
            "very thick" => self.line_width = Some(1.2 * MM_PER_PT),
            "ultra thick" => self.line_width = Some(1.6 * MM_PER_PT),
            "" => {}
            _ => trace!(flag; "Ignoring unknown option"),
        }
    }

    /// Builds the style of an element of the given kind.
    ///
    /// Text nodes take their color from `text=`, every other kind from
    /// `draw=`. A generic `color=` is used when the specific key is absent.
    pub fn style_for(&self, kind: ElementKind) -> Style {
        let mut style = Style::default();

        let color = match kind {
            ElementKind::Text => self.text.or(self.color),
            ElementKind::Shape | ElementKind::Plot => self.draw.or(self.color),
        };
        if let Some(color) = color {
            style.set_color(color);
        }
        style.set_fill(self.fill);
        if let Some(width) = self.line_width {
            style.set_line_width(width);
        }
        if let Some(opacity) = self.opacity {
            style.set_opacity(opacity);
        }
        if let Some(line_style) = self.line_style {
            style.set_line_style(line_style);
        }
        if let Some(arrow_head) = self.arrow_head {
            style.set_arrow_head(arrow_head);
        }
        style
    }

    /// Sampling domain override (`domain=a:b`).
    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// Sample count override (`samples=n`).
    pub fn samples(&self) -> Option<u32> {
        self.samples
    }

    /// Axis visibility (`axis lines=...` or `hide axis`).
    pub fn show_axis(&self) -> Option<bool> {
        self.show_axis
    }
}

/// Splits an option list at commas that are not nested inside braces.
fn split_top_level(raw: &str) -> impl Iterator<Item = &str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&raw[start..]);
    entries.into_iter().map(str::trim)
}

/// `densely dashed`, `loosely dotted` and friends keep only their pattern.
fn dash_variant(flag: &str) -> Option<&str> {
    let (spacing, pattern) = flag.rsplit_once(' ')?;
    (matches!(spacing, "densely" | "loosely") && matches!(pattern, "dashed" | "dotted"))
        .then_some(pattern)
}

fn strip_braces(value: &str) -> &str {
    value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .map_or(value, str::trim)
}

fn parse_hex(value: &str) -> Option<Color> {
    Color::from_hex(value).ok()
}

/// Parses a length into millimeters. Bare numbers are points.
fn parse_length_mm(value: &str) -> Option<f64> {
    let (number, factor) = if let Some(n) = value.strip_suffix("mm") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("cm") {
        (n, 10.0)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, MM_PER_PT)
    } else {
        (value, MM_PER_PT)
    };
    let number: f64 = number.trim().parse().ok()?;
    number.is_finite().then_some(number * factor)
}

/// Parses an opacity in `[0, 1]` into a percentage.
fn parse_opacity(value: &str) -> Option<u8> {
    let fraction: f64 = value.parse().ok()?;
    if !fraction.is_finite() {
        return None;
    }
    Some((fraction * 100.0).round().clamp(0.0, 100.0) as u8)
}

fn parse_domain(value: &str) -> Option<Domain> {
    let (min, max) = value.split_once(':')?;
    let min: f64 = min.trim().parse().ok()?;
    let max: f64 = max.trim().parse().ok()?;
    (min.is_finite() && max.is_finite()).then(|| Domain::new(min, max))
}
