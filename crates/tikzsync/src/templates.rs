//! Built-in templates, snippets and scene presets.
//!
//! Templates and snippets are text and enter the session through the text
//! path of the [`SyncController`](crate::sync::SyncController). Presets are
//! element lists and enter through the scene path.

use tikzsync_core::{
    color::Color,
    geometry::Point,
    scene::{ArrowHead, AxisConfig, Domain, ElementSpec, LineStyle, Style},
};

/// A complete starting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    label: &'static str,
    description: &'static str,
    code: &'static str,
}

impl Template {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

/// A fragment inserted into the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    label: &'static str,
    code: &'static str,
}

impl Snippet {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

/// A ready-made scene.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    label: &'static str,
    description: &'static str,
    build: fn() -> Vec<ElementSpec>,
}

impl Preset {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Builds the preset's elements.
    pub fn elements(&self) -> Vec<ElementSpec> {
        (self.build)()
    }
}

pub const TEMPLATES: &[Template] = &[
    Template {
        label: "Blank",
        description: "An empty drawing",
        code: "\\begin{tikzpicture}\n\\end{tikzpicture}",
    },
    Template {
        label: "Coordinate grid",
        description: "A grid with labeled axes",
        code: "\\begin{tikzpicture}
  \\draw[step=1cm, gray!30, very thin, dashed] (-3,-3) grid (3,3);
  \\draw[->] (-3,0) -- (3.5,0);
  \\draw[->] (0,-3) -- (0,3.5);
  \\node at (3.5,-0.3) {$x$};
  \\node at (-0.3,3.5) {$y$};
\\end{tikzpicture}",
    },
    Template {
        label: "Function plot",
        description: "A sine curve on centered axes",
        code: "\\begin{tikzpicture}
  \\begin{axis}[axis lines=middle, domain=-5:5, samples=100]
    \\addplot[draw=0000ff] {sin(x)};
  \\end{axis}
\\end{tikzpicture}",
    },
    Template {
        label: "Shapes",
        description: "A circle, a rectangle and a label",
        code: "\\begin{tikzpicture}
  \\draw[fill=ffcc00] (0,0) circle (1cm);
  \\draw[draw=ff0000, dashed] (1.5,-1) rectangle ++(2,2);
  \\node at (0,-1.5) {Shapes};
\\end{tikzpicture}",
    },
];

pub const SNIPPETS: &[Snippet] = &[
    Snippet {
        label: "Circle",
        code: "\\draw (0,0) circle (1cm);",
    },
    Snippet {
        label: "Rectangle",
        code: "\\draw (0,0) rectangle ++(2,1);",
    },
    Snippet {
        label: "Line",
        code: "\\draw (0,0) -- (2,2);",
    },
    Snippet {
        label: "Arrow",
        code: "\\draw[->] (0,0) -- (2,0);",
    },
    Snippet {
        label: "Grid",
        code: "\\draw[step=1cm, gray!30, very thin, dashed] (-2,-2) grid (2,2);",
    },
    Snippet {
        label: "Label",
        code: "\\node at (0,0) {Label};",
    },
    Snippet {
        label: "Plot",
        code: "\\addplot {x^2};",
    },
];

pub const PRESETS: &[Preset] = &[
    Preset {
        label: "Unit circle",
        description: "The unit circle with both axes",
        build: unit_circle,
    },
    Preset {
        label: "Parabola",
        description: "y = x^2 over [-2, 2]",
        build: parabola,
    },
    Preset {
        label: "Flow",
        description: "Two boxes joined by an arrow",
        build: flow,
    },
];

fn unit_circle() -> Vec<ElementSpec> {
    let axis = Style::default().with_arrow_head(ArrowHead::Forward);
    vec![
        ElementSpec::circle(Point::new(0.0, 0.0), 1.0)
            .with_style(Style::default().with_color(Color::from_rgb(0, 0, 255))),
        ElementSpec::line(Point::new(-1.5, 0.0), Point::new(1.5, 0.0)).with_style(axis.clone()),
        ElementSpec::line(Point::new(0.0, -1.5), Point::new(0.0, 1.5)).with_style(axis),
        ElementSpec::text(Point::new(1.2, 0.3), "$1$"),
    ]
}

fn parabola() -> Vec<ElementSpec> {
    vec![ElementSpec::plot(
        "x^2",
        AxisConfig::new(Domain::new(-2.0, 2.0), 50, true),
    )
    .with_style(Style::default().with_color(Color::from_rgb(255, 0, 0)))]
}

fn flow() -> Vec<ElementSpec> {
    vec![
        ElementSpec::rectangle(Point::new(-3.0, -0.5), 2.0, 1.0),
        ElementSpec::text(Point::new(-2.0, 0.0), "Input"),
        ElementSpec::rectangle(Point::new(1.0, -0.5), 2.0, 1.0)
            .with_style(Style::default().with_line_style(LineStyle::Dashed)),
        ElementSpec::text(Point::new(2.0, 0.0), "Output"),
        ElementSpec::line(Point::new(-1.0, 0.0), Point::new(1.0, 0.0))
            .with_style(Style::default().with_arrow_head(ArrowHead::Forward)),
    ]
}
