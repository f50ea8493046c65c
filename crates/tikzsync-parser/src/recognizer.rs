//! The recognizer table.
//!
//! One [`Recognizer`] per supported command shape. Each one tries to read a
//! whole (comment-stripped, trimmed) line and either produces an element,
//! rejects the line, or reports a malformed number inside a line whose shape
//! it otherwise matched.

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, delimited, eof, opt, preceded, separated_pair, terminated},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::take_while,
};

use tikzsync_core::{
    geometry::Point,
    scene::{AxisConfig, ElementKind, ElementSpec},
};

use crate::{options::Options, span::Span};

/// Context attached to recognizer errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what was expected
    Expected(&'static str),
    /// A numeric field that does not parse, as a span within the line
    MalformedNumber(Span),
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<Context>>;
type Extractor = fn(&mut Input<'_>, &AxisConfig) -> IResult<ElementSpec>;

/// Outcome of running one recognizer on one line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recognition {
    Matched(ElementSpec),
    /// The line does not have this recognizer's shape.
    Rejected(Option<&'static str>),
    /// The line has this recognizer's shape but a number in it is malformed.
    Malformed(Span),
}

/// A named line extractor.
pub struct Recognizer {
    name: &'static str,
    extract: Extractor,
}

impl Recognizer {
    /// Name of the command shape this recognizer reads.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn recognize(&self, line: &str, axis: &AxisConfig) -> Recognition {
        let mut input = Input::new(line);
        match (self.extract)(&mut input, axis) {
            Ok(spec) => Recognition::Matched(spec),
            Err(ErrMode::Backtrack(e) | ErrMode::Cut(e)) => {
                let mut expected = None;
                for context in e.context() {
                    match context {
                        Context::MalformedNumber(span) => return Recognition::Malformed(*span),
                        Context::Expected(what) => expected = expected.or(Some(*what)),
                    }
                }
                Recognition::Rejected(expected)
            }
            Err(ErrMode::Incomplete(_)) => Recognition::Rejected(None),
        }
    }
}

impl std::fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizer").field("name", &self.name).finish()
    }
}

/// The supported command shapes, in matching order.
pub const RECOGNIZERS: &[Recognizer] = &[
    Recognizer {
        name: "circle",
        extract: circle,
    },
    Recognizer {
        name: "rectangle",
        extract: rectangle,
    },
    Recognizer {
        name: "line",
        extract: line,
    },
    Recognizer {
        name: "grid",
        extract: grid,
    },
    Recognizer {
        name: "node",
        extract: node,
    },
    Recognizer {
        name: "addplot",
        extract: addplot,
    },
];

fn expected(input: &Input<'_>, what: &'static str) -> ErrMode<ContextError<Context>> {
    ErrMode::Backtrack(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        Context::Expected(what),
    ))
}

/// Parse a numeric field.
///
/// The candidate run of number characters is captured first and validated
/// afterwards, so `1.2.3` is reported as a malformed number instead of a
/// line of the wrong shape.
fn number(input: &mut Input<'_>) -> IResult<f64> {
    let start = input.current_token_start();
    let text = take_while(1.., |c: char| {
        c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
    })
    .parse_next(input)
    .map_err(|_: ErrMode<ContextError<Context>>| expected(input, "a number"))?;

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            let span = Span::new(start..input.current_token_start());
            Err(ErrMode::Cut(ContextError::new().add_context(
                input,
                &input.checkpoint(),
                Context::MalformedNumber(span),
            )))
        }
    }
}

/// Parse a coordinate pair `(x,y)`
fn point(input: &mut Input<'_>) -> IResult<Point> {
    delimited(
        ('(', multispace0),
        separated_pair(number, (multispace0, ',', multispace0), number),
        (multispace0, ')'),
    )
    .map(|(x, y)| Point::new(x, y))
    .parse_next(input)
}

/// Scan up to (not including) `close` at brace depth zero.
fn balanced_until<'a>(close: char) -> impl FnMut(&mut Input<'a>) -> IResult<&'a str> {
    move |input: &mut Input<'a>| {
        let mut depth = 0usize;
        let mut end = None;
        let mut escaped = false;
        for (i, c) in input.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '{' => depth += 1,
                '}' if depth > 0 => depth -= 1,
                c if c == close && depth == 0 => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }
        match end {
            Some(i) => Ok(input.next_slice(i)),
            None => Err(expected(input, "a closing delimiter")),
        }
    }
}

/// Parse an optional `[...]` option group.
fn options(input: &mut Input<'_>) -> IResult<Options> {
    opt(delimited('[', balanced_until(']'), ']'))
        .map(|raw| raw.map(Options::decode).unwrap_or_default())
        .parse_next(input)
}

/// Parse `{...}` with balanced inner braces, returning the content.
fn braced<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    delimited('{', balanced_until('}'), '}').parse_next(input)
}

/// Parse a command name followed by its optional option group.
fn command(name: &'static str) -> impl FnMut(&mut Input<'_>) -> IResult<Options> {
    move |input: &mut Input<'_>| {
        (name, multispace0)
            .parse_next(input)
            .map_err(|_: ErrMode<ContextError<Context>>| expected(input, name))?;
        terminated(options, multispace0).parse_next(input)
    }
}

/// Parse a keyword surrounded by optional whitespace.
fn keyword(word: &'static str) -> impl FnMut(&mut Input<'_>) -> IResult<()> {
    move |input: &mut Input<'_>| {
        delimited(multispace0, word, multispace0)
            .void()
            .parse_next(input)
            .map_err(|_: ErrMode<ContextError<Context>>| expected(input, word))
    }
}

/// Parse the `;` that ends a command and require nothing after it.
fn end_of_command(input: &mut Input<'_>) -> IResult<()> {
    (multispace0, ';', multispace0, eof)
        .void()
        .parse_next(input)
        .map_err(|_: ErrMode<ContextError<Context>>| expected(input, "`;` at end of line"))
}

/// `\draw[opts] (x,y) circle (r);` with an optional `cm` unit on the radius.
fn circle(input: &mut Input<'_>, _: &AxisConfig) -> IResult<ElementSpec> {
    let options = command("\\draw")(input)?;
    let center = point(input)?;
    keyword("circle")(input)?;
    let radius = delimited(
        ('(', multispace0),
        terminated(number, (multispace0, opt("cm"))),
        (multispace0, ')'),
    )
    .parse_next(input)?;
    end_of_command(input)?;

    Ok(ElementSpec::circle(center, radius).with_style(options.style_for(ElementKind::Shape)))
}

/// `\draw[opts] (x,y) rectangle ++(w,h);` or the absolute `rectangle (x2,y2);`
fn rectangle(input: &mut Input<'_>, _: &AxisConfig) -> IResult<ElementSpec> {
    let options = command("\\draw")(input)?;
    let origin = point(input)?;
    keyword("rectangle")(input)?;
    let (width, height) = alt((
        preceded(("++", multispace0), point).map(|extent| (extent.x(), extent.y())),
        point.map(|corner| (corner.x() - origin.x(), corner.y() - origin.y())),
    ))
    .parse_next(input)?;
    end_of_command(input)?;

    Ok(ElementSpec::rectangle(origin, width, height)
        .with_style(options.style_for(ElementKind::Shape)))
}

/// `\draw[opts] (x,y) -- (x2,y2);`
fn line(input: &mut Input<'_>, _: &AxisConfig) -> IResult<ElementSpec> {
    let options = command("\\draw")(input)?;
    let start = point(input)?;
    keyword("--")(input)?;
    let end = point(input)?;
    end_of_command(input)?;

    Ok(ElementSpec::line(start, end).with_style(options.style_for(ElementKind::Shape)))
}

/// `\draw[...] (x,y) grid (x2,y2);` The grid style is fixed, so options are
/// read but not decoded into the element.
fn grid(input: &mut Input<'_>, _: &AxisConfig) -> IResult<ElementSpec> {
    command("\\draw")(input)?;
    let from = point(input)?;
    keyword("grid")(input)?;
    let to = point(input)?;
    end_of_command(input)?;

    Ok(ElementSpec::grid(from, to))
}

/// `\node[opts] at (x,y) {content};`
fn node(input: &mut Input<'_>, _: &AxisConfig) -> IResult<ElementSpec> {
    let options = command("\\node")(input)?;
    keyword("at")(input)?;
    let position = point(input)?;
    let content = preceded(multispace0, braced).parse_next(input)?;
    end_of_command(input)?;

    Ok(ElementSpec::text(position, content).with_style(options.style_for(ElementKind::Text)))
}

/// `\addplot[opts] {expr};` with an optional `+` after the command name.
///
/// The plot inherits the enclosing axis configuration; `domain=` and
/// `samples=` in its own options override it for this plot only.
fn addplot(input: &mut Input<'_>, axis: &AxisConfig) -> IResult<ElementSpec> {
    ("\\addplot", opt('+'), multispace0)
        .parse_next(input)
        .map_err(|_: ErrMode<ContextError<Context>>| expected(input, "\\addplot"))?;
    let options = terminated(options, multispace0).parse_next(input)?;
    let expression = braced(input)?;
    end_of_command(input)?;

    let mut config = *axis;
    if let Some(domain) = options.domain() {
        config.set_domain(domain);
    }
    if let Some(samples) = options.samples() {
        config.set_samples(samples);
    }

    Ok(ElementSpec::plot(expression.trim(), config)
        .with_style(options.style_for(ElementKind::Plot)))
}

/// Options of an axis directive, `\begin{axis}[...]`.
///
/// Returns `None` if the line is not an axis directive.
pub(crate) fn axis_directive(line: &str) -> Option<AxisConfig> {
    let mut input = Input::new(line);
    let parsed: IResult<Options> = preceded(("\\begin{axis}", multispace0), options)
        .parse_next(&mut input);
    let options = parsed.ok()?;

    let mut config = AxisConfig::default();
    if let Some(domain) = options.domain() {
        config.set_domain(domain);
    }
    if let Some(samples) = options.samples() {
        config.set_samples(samples);
    }
    if let Some(show_axis) = options.show_axis() {
        config.set_show_axis(show_axis);
    }
    Some(config)
}
