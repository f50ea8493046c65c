//! End-to-end tests of the code parser over whole documents.

use tikzsync_core::{
    color::Color,
    geometry::Point,
    scene::{AxisConfig, Domain, ElementParams, ElementSpec, LineStyle, Scene, ShapeParams},
};

use crate::{error::ErrorCode, parse, span::Span};

fn only_element(text: &str) -> ElementSpec {
    let outcome = parse(text);
    assert_eq!(
        outcome.recognized(),
        1,
        "expected exactly one element in {text:?}, diagnostics: {:?}",
        outcome.diagnostics()
    );
    outcome.elements()[0].clone()
}

fn warning_codes(text: &str) -> Vec<ErrorCode> {
    parse(text)
        .diagnostics()
        .iter()
        .filter_map(|d| d.code())
        .collect()
}

#[test]
fn test_rectangle_with_style() {
    let spec = only_element("\\draw[draw=ff0000,dashed] (1,1) rectangle ++(3,2);");

    assert_eq!(
        spec.params(),
        &ElementParams::Shape(ShapeParams::Rectangle {
            origin: Point::new(1.0, 1.0),
            width: 3.0,
            height: 2.0,
        })
    );
    assert_eq!(spec.style().color(), Color::from_rgb(255, 0, 0));
    assert_eq!(spec.style().line_style(), LineStyle::Dashed);
}

#[test]
fn test_node_with_text_color() {
    let spec = only_element("\\node[text=00ff00] at (0,0) {Hello};");

    assert_eq!(
        spec.params(),
        &ElementParams::Text(tikzsync_core::scene::TextParams::new(
            Point::new(0.0, 0.0),
            "Hello"
        ))
    );
    assert_eq!(spec.style().color().to_hex(), "00ff00");
}

#[test]
fn test_garbage_line_is_tolerated() {
    let text = "\\begin{tikzpicture}\n  \\draw (0,0) circle (2cm);\n  this is not tikz\n\\end{tikzpicture}";
    let outcome = parse(text);

    assert_eq!(
        outcome.elements(),
        &[ElementSpec::circle(Point::new(0.0, 0.0), 2.0)]
    );
    assert_eq!(outcome.skipped(), 1);
    assert_eq!(outcome.diagnostics().len(), 1);

    let diag = &outcome.diagnostics()[0];
    assert!(diag.severity().is_warning());
    assert_eq!(diag.code(), Some(ErrorCode::E200));
    assert_eq!(&text[diag.labels()[0].span().range()], "this is not tikz");
}

#[test]
fn test_structural_lines_are_silent() {
    let text = "\\begin{tikzpicture}[scale=2]\n\\end{tikzpicture}\n";
    let outcome = parse(text);

    assert_eq!(outcome.recognized(), 0);
    assert!(outcome.diagnostics().is_empty());
}

#[test]
fn test_comments_and_blank_lines() {
    let text = "% a comment\n\n   \n\\draw (0,0) -- (1,1); % trailing\n";
    let spec = only_element(text);

    assert_eq!(spec, ElementSpec::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
    assert!(warning_codes(text).is_empty());
}

#[test]
fn test_escaped_percent_in_node() {
    let spec = only_element("\\node at (1,2) {50\\% done};");
    match spec.params() {
        ElementParams::Text(text) => assert_eq!(text.content(), "50\\% done"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_multiple_elements_keep_order() {
    let text = "\\begin{tikzpicture}\n\
                \\draw (0,0) -- (1,0);\n\
                \\node at (0,0) {A};\n\
                \\draw (-1,-1) grid (1,1);\n\
                \\draw (0,0) circle (1cm);\n\
                \\end{tikzpicture}";
    let kinds: Vec<_> = parse(text)
        .elements()
        .iter()
        .map(|spec| match spec.params() {
            ElementParams::Shape(shape) => shape.name(),
            ElementParams::Text(_) => "text",
            ElementParams::Plot(_) => "plot",
        })
        .collect();

    assert_eq!(kinds, vec!["line", "text", "grid", "circle"]);
}

#[test]
fn test_axis_context_applies_to_plots() {
    let text = "\\begin{tikzpicture}\n\
                \\begin{axis}[hide axis, domain=-2:2, samples=30]\n\
                \\addplot {x^2};\n\
                \\addplot[domain=0:1] {sin(x)};\n\
                \\end{axis}\n\
                \\addplot {cos(x)};\n\
                \\end{tikzpicture}";
    let outcome = parse(text);
    let axes: Vec<AxisConfig> = outcome
        .elements()
        .iter()
        .filter_map(|spec| match spec.params() {
            ElementParams::Plot(plot) => Some(*plot.axis()),
            _ => None,
        })
        .collect();

    assert_eq!(axes.len(), 3);
    assert_eq!(axes[0], AxisConfig::new(Domain::new(-2.0, 2.0), 30, false));
    assert_eq!(axes[1], AxisConfig::new(Domain::new(0.0, 1.0), 30, false));
    // after `\end{axis}` the defaults apply again
    assert_eq!(axes[2], AxisConfig::default());
}

#[test]
fn test_malformed_number_skips_line() {
    let text = "\\draw (0,0) circle (1cm);\n\\draw (1.2.3,0) -- (1,1);";
    let outcome = parse(text);

    assert_eq!(outcome.recognized(), 1);
    assert_eq!(warning_codes(text), vec![ErrorCode::E201]);

    let label = &outcome.diagnostics()[0].labels()[0];
    assert_eq!(label.span(), Span::new(33..38));
    assert_eq!(&text[label.span().range()], "1.2.3");
}

#[test]
fn test_diagnostic_spans_account_for_indentation() {
    let text = "\\draw (0,0) -- (1,1);\n    \\foo{bar}\n";
    let outcome = parse(text);
    let span = outcome.diagnostics()[0].labels()[0].span();

    assert_eq!(&text[span.range()], "\\foo{bar}");
}

#[test]
fn test_unsupported_draw_forms_are_skipped() {
    let text = "\\draw (0,0) -- (1,1) -- (2,0);\n\\draw (0,0) to[bend left] (1,1);\n\\fill (0,0) circle (1);";
    assert_eq!(
        warning_codes(text),
        vec![ErrorCode::E200, ErrorCode::E200, ErrorCode::E200]
    );
}

#[test]
fn test_nothing_recognized_keeps_prior_scene() {
    let mut scene = Scene::new();
    scene.add(ElementSpec::circle(Point::new(1.0, 1.0), 1.0));

    let outcome = parse("\\draw (0,0) circle (1cm");
    assert!(!outcome.apply_to(&mut scene));
    assert_eq!(scene.len(), 1);

    let outcome = parse("\\draw (5,5) -- (6,6);");
    assert!(outcome.apply_to(&mut scene));
    assert_eq!(scene.len(), 1);
    assert_eq!(
        scene.iter().next().map(|e| e.to_spec()),
        Some(ElementSpec::line(Point::new(5.0, 5.0), Point::new(6.0, 6.0)))
    );
}

#[test]
fn test_crlf_line_endings() {
    let text = "\\begin{tikzpicture}\r\n  \\draw (0,0) circle (1cm);\r\n\\end{tikzpicture}\r\n";
    assert_eq!(parse(text).recognized(), 1);
    assert!(warning_codes(text).is_empty());
}
