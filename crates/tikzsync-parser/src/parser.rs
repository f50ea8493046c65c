//! Tolerant, line-oriented reconstruction of a scene from TikZ code.
//!
//! The parser never fails. Each line either produces one element, is a
//! structural line that is skipped silently, or is skipped with a warning
//! diagnostic. The caller decides what to do with an outcome that recognized
//! nothing; [`ParseOutcome::apply_to`] keeps the prior scene in that case.

use log::{debug, trace};
use tikzsync_core::scene::{AxisConfig, ElementSpec, Scene};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    recognizer::{self, RECOGNIZERS, Recognition, Recognizer},
    span::Span,
};

const PICTURE_BEGIN: &str = "\\begin{tikzpicture}";
const PICTURE_END: &str = "\\end{tikzpicture}";
const AXIS_END: &str = "\\end{axis}";

/// Parser driven by an ordered table of [`Recognizer`]s.
#[derive(Debug, Clone, Copy)]
pub struct CodeParser {
    recognizers: &'static [Recognizer],
}

impl Default for CodeParser {
    fn default() -> Self {
        Self {
            recognizers: RECOGNIZERS,
        }
    }
}

impl CodeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the recognizers, in matching order.
    pub fn recognizer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.recognizers.iter().map(Recognizer::name)
    }

    /// Parses `text` into element specs and warning diagnostics.
    ///
    /// Diagnostic spans are byte offsets into `text`.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        let mut elements = Vec::new();
        let mut diagnostics = DiagnosticCollector::new();
        let mut skipped = 0;
        let mut axis = AxisConfig::default();

        let mut offset = 0;
        for raw in text.split_inclusive('\n') {
            let line_start = offset;
            offset += raw.len();

            let code = strip_comment(raw);
            let line = code.trim();
            if line.is_empty() {
                continue;
            }
            let line_offset = line_start + (code.len() - code.trim_start().len());
            let line_span = Span::new(line_offset..line_offset + line.len());

            if line.starts_with(PICTURE_BEGIN) || line == PICTURE_END {
                continue;
            }
            if line == AXIS_END {
                axis = AxisConfig::default();
                continue;
            }
            if let Some(config) = recognizer::axis_directive(line) {
                trace!(domain:? = config.domain(), samples = config.samples(); "Entered axis block");
                axis = config;
                continue;
            }

            match self.recognize(line, &axis) {
                Ok(spec) => elements.push(spec),
                Err(diagnostic) => {
                    skipped += 1;
                    diagnostics.emit(diagnostic.shifted(line_offset).with_secondary_label(
                        line_span,
                        "this line is left as written",
                    ));
                }
            }
        }

        debug!(recognized = elements.len(), skipped; "Parsed TikZ code");
        ParseOutcome {
            elements,
            diagnostics: diagnostics.into_diagnostics(),
            skipped,
        }
    }

    /// Runs the recognizer table on one trimmed line.
    ///
    /// A malformed number only counts when no later recognizer matches the
    /// line. Spans in the returned diagnostic are relative to the line.
    fn recognize(&self, line: &str, axis: &AxisConfig) -> Result<ElementSpec, Diagnostic> {
        let mut malformed = None;
        for recognizer in self.recognizers {
            match recognizer.recognize(line, axis) {
                Recognition::Matched(spec) => {
                    trace!(recognizer = recognizer.name(), line; "Line recognized");
                    return Ok(spec);
                }
                Recognition::Malformed(span) => {
                    trace!(recognizer = recognizer.name(), span:%; "Malformed number");
                    malformed.get_or_insert(span);
                }
                Recognition::Rejected(expected) => {
                    trace!(recognizer = recognizer.name(), expected:?; "Line rejected");
                }
            }
        }

        let diagnostic = match malformed {
            Some(span) => Diagnostic::warning("malformed numeric literal")
                .with_code(ErrorCode::E201)
                .with_label(span, "this is not a number")
                .with_help("numbers look like `2`, `-0.5` or `1e-3`"),
            None => Diagnostic::warning("unrecognized construct")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(0..line.len()), ErrorCode::E200.description())
                .with_help(format!(
                    "supported commands: {}",
                    self.recognizer_names().collect::<Vec<_>>().join(", ")
                )),
        };
        Err(diagnostic)
    }
}

/// Removes a trailing `%` comment. `\%` is a literal percent sign.
fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '%' if !escaped => return &line[..i],
            _ => escaped = false,
        }
    }
    line
}

/// Result of one parse pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    elements: Vec<ElementSpec>,
    diagnostics: Vec<Diagnostic>,
    skipped: usize,
}

impl ParseOutcome {
    /// Recognized elements, in source order.
    pub fn elements(&self) -> &[ElementSpec] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<ElementSpec> {
        self.elements
    }

    /// Warnings for lines that were skipped.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of recognized lines.
    pub fn recognized(&self) -> usize {
        self.elements.len()
    }

    /// Number of non-structural lines that were skipped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Replaces the contents of `scene` with the recognized elements.
    ///
    /// Returns `false` and leaves `scene` untouched when nothing was
    /// recognized.
    pub fn apply_to(&self, scene: &mut Scene) -> bool {
        if self.elements.is_empty() {
            return false;
        }
        scene.replace_all(self.elements.iter().cloned());
        true
    }
}
