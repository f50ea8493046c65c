//! Deterministic serialization of a [`Scene`] to TikZ code.
//!
//! Non-plot elements are written first, in scene order. All plots follow in a
//! single `axis` block whose options come from the first plot. Style options
//! are only written when they differ from the canonical defaults in
//! [`tikzsync_core::scene`], so a scene parsed back from the output carries
//! exactly the same styles.

use std::fmt::Write as _;

use log::debug;

use tikzsync_core::{
    geometry::Point,
    scene::{
        AxisConfig, DEFAULT_LINE_WIDTH, DEFAULT_OPACITY, ElementParams, Scene, SceneElement,
        ShapeParams, Style,
    },
};

const PICTURE_BEGIN: &str = "\\begin{tikzpicture}";
const PICTURE_END: &str = "\\end{tikzpicture}";
const GRID_OPTIONS: &str = "[step=1cm, gray!30, very thin, dashed]";

/// Writes `scene` as a `tikzpicture` environment.
///
/// The output never ends with a newline.
///
/// # Examples
///
/// ```
/// use tikzsync::{generator, geometry::Point, scene::{ElementSpec, Scene}};
///
/// let scene = Scene::from_specs([ElementSpec::circle(Point::new(0.0, 0.0), 2.0)]);
/// assert_eq!(
///     generator::generate(&scene),
///     "\\begin{tikzpicture}\n  \\draw (0,0) circle (2cm);\n\\end{tikzpicture}"
/// );
/// ```
pub fn generate(scene: &Scene) -> String {
    let mut out = String::new();
    out.push_str(PICTURE_BEGIN);
    out.push('\n');

    for element in scene.others() {
        out.push_str("  ");
        write_element(&mut out, element);
        out.push('\n');
    }

    let mut plots = scene.plots().peekable();
    if let Some(axis) = plots.peek().and_then(|e| e.as_plot()).map(|p| *p.axis()) {
        out.push_str("  \\begin{axis}");
        out.push_str(&axis_options(&axis));
        out.push('\n');
        for element in plots {
            out.push_str("    ");
            write_element(&mut out, element);
            out.push('\n');
        }
        out.push_str("  \\end{axis}\n");
    }

    out.push_str(PICTURE_END);

    debug!(elements = scene.len(), bytes = out.len(); "Generated TikZ code");
    out
}

fn write_element(out: &mut String, element: &SceneElement) {
    let style = element.style();
    // Writing into a String cannot fail.
    let _ = match element.params() {
        ElementParams::Shape(ShapeParams::Circle { center, radius }) => write!(
            out,
            "\\draw{} {} circle ({}cm);",
            style_options(style, "draw"),
            point(*center),
            number(*radius)
        ),
        ElementParams::Shape(ShapeParams::Rectangle {
            origin,
            width,
            height,
        }) => write!(
            out,
            "\\draw{} {} rectangle ++({},{});",
            style_options(style, "draw"),
            point(*origin),
            number(*width),
            number(*height)
        ),
        ElementParams::Shape(ShapeParams::Line { start, end }) => write!(
            out,
            "\\draw{} {} -- {};",
            style_options(style, "draw"),
            point(*start),
            point(*end)
        ),
        ElementParams::Shape(ShapeParams::Grid { from, to }) => write!(
            out,
            "\\draw{GRID_OPTIONS} {} grid {};",
            point(*from),
            point(*to)
        ),
        ElementParams::Text(text) => write!(
            out,
            "\\node{} at {} {{{}}};",
            style_options(style, "text"),
            point(text.position()),
            text.content()
        ),
        ElementParams::Plot(plot) => write!(
            out,
            "\\addplot{} {{{}}};",
            style_options(style, "draw"),
            plot.expression()
        ),
    };
}

/// Bracketed option list for the non-default parts of `style`.
///
/// `color_key` is `draw` for strokes and `text` for nodes.
fn style_options(style: &Style, color_key: &str) -> String {
    let mut options = Vec::new();

    if let Some(arrow) = style.arrow_head().as_tikz() {
        options.push(arrow.to_string());
    }
    if style.color() != Style::default().color() {
        options.push(format!("{color_key}={}", style.color().to_hex()));
    }
    if let Some(fill) = style.fill() {
        options.push(format!("fill={}", fill.to_hex()));
    }
    if style.line_width() != DEFAULT_LINE_WIDTH {
        options.push(format!("line width={}mm", number(style.line_width())));
    }
    if style.opacity() != DEFAULT_OPACITY {
        options.push(format!(
            "opacity={}",
            number(f64::from(style.opacity()) / 100.0)
        ));
    }
    if let Some(keyword) = style.line_style().keyword() {
        options.push(keyword.to_string());
    }

    if options.is_empty() {
        String::new()
    } else {
        format!("[{}]", options.join(", "))
    }
}

fn axis_options(axis: &AxisConfig) -> String {
    let visibility = if axis.show_axis() {
        "axis lines=middle"
    } else {
        "hide axis"
    };
    format!(
        "[{visibility}, domain={}:{}, samples={}]",
        number(axis.domain().min()),
        number(axis.domain().max()),
        axis.samples()
    )
}

fn point(p: Point) -> String {
    format!("({},{})", number(p.x()), number(p.y()))
}

/// Shortest decimal form that reads back to the same value.
///
/// Integral values have no fractional part and negative zero is written `0`.
fn number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use tikzsync_core::{
        color::Color,
        scene::{ArrowHead, Domain, ElementSpec, LineStyle},
    };

    use super::*;

    fn body(scene: &Scene) -> Vec<String> {
        generate(scene)
            .lines()
            .skip(1)
            .map(str::to_string)
            .filter(|l| l != PICTURE_END)
            .collect()
    }

    #[test]
    fn test_empty_scene() {
        assert_eq!(
            generate(&Scene::new()),
            "\\begin{tikzpicture}\n\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_default_circle() {
        let scene = Scene::from_specs([ElementSpec::circle(Point::new(0.0, 0.0), 2.0)]);
        assert_eq!(
            generate(&scene),
            "\\begin{tikzpicture}\n  \\draw (0,0) circle (2cm);\n\\end{tikzpicture}"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let scene = Scene::from_specs([ElementSpec::line(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
        )]);
        assert!(!generate(&scene).ends_with('\n'));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(2.0), "2");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(0.1), "0.1");
        assert_eq!(number(-2.5), "-2.5");
        assert_eq!(number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_option_order() {
        let style = Style::default()
            .with_arrow_head(ArrowHead::Both)
            .with_color(Color::from_rgb(255, 0, 0))
            .with_fill(Color::from_rgb(0, 0, 255))
            .with_line_width(1.5)
            .with_opacity(40)
            .with_line_style(LineStyle::Dotted);
        let scene = Scene::from_specs([
            ElementSpec::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).with_style(style),
        ]);

        assert_eq!(
            body(&scene),
            vec![
                "  \\draw[<->, draw=ff0000, fill=0000ff, line width=1.5mm, opacity=0.4, dotted] (0,0) -- (1,0);"
            ]
        );
    }

    #[test]
    fn test_defaults_are_omitted() {
        let style = Style::default()
            .with_color(Color::BLACK)
            .with_line_width(0.8)
            .with_opacity(100)
            .with_line_style(LineStyle::Solid);
        let scene = Scene::from_specs([
            ElementSpec::rectangle(Point::new(1.0, 1.0), 3.0, 2.0).with_style(style),
        ]);

        assert_eq!(body(&scene), vec!["  \\draw (1,1) rectangle ++(3,2);"]);
    }

    #[test]
    fn test_node_uses_text_key() {
        let scene = Scene::from_specs([ElementSpec::text(Point::new(0.0, 0.0), "Hello")
            .with_style(Style::default().with_color(Color::from_rgb(0, 255, 0)))]);

        assert_eq!(body(&scene), vec!["  \\node[text=00ff00] at (0,0) {Hello};"]);
    }

    #[test]
    fn test_node_content_is_escaped() {
        let scene = Scene::from_specs([
            ElementSpec::text(Point::new(0.0, 0.0), "50%"),
            ElementSpec::text(Point::new(1.0, 0.0), "a}b"),
            ElementSpec::text(Point::new(2.0, 0.0), "two\nlines"),
        ]);

        assert_eq!(
            body(&scene),
            vec![
                "  \\node at (0,0) {50\\%};",
                "  \\node at (1,0) {a\\}b};",
                "  \\node at (2,0) {two lines};",
            ]
        );

        let outcome = tikzsync_parser::parse(&generate(&scene));
        assert_eq!(outcome.recognized(), 3);
        let mut parsed = Scene::new();
        assert!(outcome.apply_to(&mut parsed));
        assert!(parsed.is_equivalent(&scene));
    }

    #[test]
    fn test_grid_style_is_fixed() {
        let scene = Scene::from_specs([ElementSpec::grid(
            Point::new(-2.0, -2.0),
            Point::new(2.0, 2.0),
        )
        .with_style(Style::default().with_color(Color::from_rgb(255, 0, 0)))]);

        assert_eq!(
            body(&scene),
            vec!["  \\draw[step=1cm, gray!30, very thin, dashed] (-2,-2) grid (2,2);"]
        );
    }

    #[test]
    fn test_plots_grouped_after_other_elements() {
        let axis = AxisConfig::new(Domain::new(-5.0, 5.0), 100, true);
        let scene = Scene::from_specs([
            ElementSpec::plot("sin(x)", axis),
            ElementSpec::circle(Point::new(1.0, 1.0), 0.5),
            ElementSpec::plot("cos(x)", AxisConfig::new(Domain::new(0.0, 1.0), 10, false)),
        ]);

        assert_eq!(
            body(&scene),
            vec![
                "  \\draw (1,1) circle (0.5cm);",
                "  \\begin{axis}[axis lines=middle, domain=-5:5, samples=100]",
                "    \\addplot {sin(x)};",
                "    \\addplot {cos(x)};",
                "  \\end{axis}",
            ]
        );
    }

    #[test]
    fn test_hidden_axis() {
        let axis = AxisConfig::new(Domain::new(0.0, 2.5), 50, false);
        let scene = Scene::from_specs([ElementSpec::plot("x^2", axis)]);

        assert!(
            generate(&scene).contains("\\begin{axis}[hide axis, domain=0:2.5, samples=50]")
        );
    }

    #[test]
    fn test_deterministic() {
        let scene = Scene::from_specs([
            ElementSpec::text(Point::new(-1.25, 3.0), "$x$"),
            ElementSpec::plot("exp(x)", AxisConfig::default()),
        ]);
        assert_eq!(generate(&scene), generate(&scene.clone()));
    }
}
