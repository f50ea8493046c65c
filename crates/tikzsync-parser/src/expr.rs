//! Sandboxed arithmetic for plot expressions.
//!
//! Plot expressions (`sin(x)`, `x^2 - 1`, `1/x`) are never handed to a
//! general-purpose interpreter. They go through a fixed pipeline:
//!
//! 1. **Tokenize** ([`lexer`]) - numbers, names, `+ - * / ^ ( ) ,`
//! 2. **Parse** ([`parser`]) - recursive descent into an [`Expr`] tree
//! 3. **Evaluate** - a pure tree walk over `f64`
//!
//! Only the variable `x`, the constants `pi` and `e`, and the functions in
//! [`Function`] are reachable. Token count and nesting depth are capped so the
//! worst case is bounded regardless of input.
//!
//! # Example
//!
//! ```
//! use tikzsync_core::scene::Domain;
//! use tikzsync_parser::expr::{self, SampleLimits};
//!
//! let expression = expr::compile("1/x").unwrap();
//! let curve = expression.sample(Domain::new(-1.0, 1.0), 3, &SampleLimits::default());
//!
//! // x = 0 is dropped, splitting the curve in two
//! assert_eq!(curve.segments().len(), 2);
//! ```

mod ast;
mod lexer;
mod parser;

use log::debug;
use tikzsync_core::{geometry::Point, scene::Domain};

use crate::error::ParseError;

pub use ast::{BinaryOp, Expr, Function};
pub use parser::{MAX_DEPTH, MAX_TOKENS};

/// A compiled, ready-to-evaluate plot expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// Returns the text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluates the expression at `x`. Results may be NaN or infinite.
    pub fn eval(&self, x: f64) -> f64 {
        self.root.eval(x)
    }

    /// Samples the expression over `domain`.
    ///
    /// The domain is swapped if reversed, and a degenerate domain yields a
    /// single sample. Otherwise `samples` is clamped to
    /// `[2, limits.max_samples]` and the points `x_i = min + (max - min) * i / (n - 1)`
    /// are evaluated. Non-finite values and values whose magnitude exceeds
    /// `limits.clamp` are dropped, ending the current segment.
    pub fn sample(&self, domain: Domain, samples: u32, limits: &SampleLimits) -> SampledCurve {
        let domain = domain.ordered();
        let (min, max) = (domain.min(), domain.max());

        let mut curve = SampledCurve::default();
        if !min.is_finite() || !max.is_finite() {
            return curve;
        }

        let count = if min == max {
            1
        } else {
            samples.clamp(2, limits.max_samples.clamp(2, SampleLimits::SAMPLES_CEILING))
        };

        let mut segment = Vec::new();
        for i in 0..count {
            let x = if count == 1 {
                min
            } else {
                (min + (max - min) * f64::from(i) / f64::from(count - 1)).min(max)
            };
            let y = self.eval(x);

            if y.is_finite() && y.abs() <= limits.clamp {
                segment.push(Point::new(x, y));
            } else if !segment.is_empty() {
                curve.segments.push(std::mem::take(&mut segment));
            }
        }
        if !segment.is_empty() {
            curve.segments.push(segment);
        }

        debug!(
            expression = self.source.as_str(),
            samples = count,
            segments = curve.segments.len();
            "Sampled plot expression"
        );
        curve
    }
}

/// Bounds applied while sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleLimits {
    /// Upper bound on the number of samples per plot.
    pub max_samples: u32,
    /// Samples with `|y|` above this value are dropped.
    pub clamp: f64,
}

impl SampleLimits {
    pub const DEFAULT_MAX_SAMPLES: u32 = 2000;
    pub const DEFAULT_CLAMP: f64 = 1000.0;
    /// Hard ceiling on `max_samples`, whatever the configuration says.
    pub const SAMPLES_CEILING: u32 = 100_000;

    /// Checks that the limits bound sampling and keep some samples.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_samples` is outside
    /// `2..=SAMPLES_CEILING` or `clamp` is not a positive finite number.
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=Self::SAMPLES_CEILING).contains(&self.max_samples) {
            return Err(format!(
                "max_samples must be between 2 and {}, got {}",
                Self::SAMPLES_CEILING,
                self.max_samples
            ));
        }
        if !self.clamp.is_finite() || self.clamp <= 0.0 {
            return Err(format!(
                "clamp must be a positive number, got {}",
                self.clamp
            ));
        }
        Ok(())
    }
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            clamp: Self::DEFAULT_CLAMP,
        }
    }
}

/// Sampled points of a plot, split into contiguous segments at every gap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledCurve {
    segments: Vec<Vec<Point>>,
}

impl SampledCurve {
    pub fn segments(&self) -> &[Vec<Point>] {
        &self.segments
    }

    /// Total number of kept samples across all segments.
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Compiles expression text.
///
/// Spans in the returned diagnostics are byte offsets into `source`.
///
/// # Errors
///
/// Returns every lexing error at once, or the first parsing error.
pub fn compile(source: &str) -> Result<Expression, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let root = parser::parse(&tokens, source.len())?;
    Ok(Expression {
        source: source.to_string(),
        root,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_compile_and_eval() {
        let expression = compile("x^2 - 2*x + 1").unwrap();
        assert_eq!(expression.source(), "x^2 - 2*x + 1");
        assert_eq!(expression.eval(1.0), 0.0);
        assert_eq!(expression.eval(3.0), 4.0);
    }

    #[test]
    fn test_compile_constants() {
        let expression = compile("sin(pi/2) + ln(e)").unwrap();
        assert!(approx_eq!(f64, expression.eval(0.0), 2.0, ulps = 4));
    }

    #[test]
    fn test_compile_error_codes() {
        let err = compile("x $ 1").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));

        let err = compile("exec(x)").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_sample_reciprocal_has_gap_at_zero() {
        let expression = compile("1/x").unwrap();
        let curve = expression.sample(Domain::new(-5.0, 5.0), 11, &SampleLimits::default());

        assert_eq!(curve.segments().len(), 2);
        assert_eq!(curve.point_count(), 10);
        assert!(
            curve
                .segments()
                .iter()
                .flatten()
                .all(|p| p.x() != 0.0)
        );
        assert_eq!(curve.segments()[0].last().map(|p| p.x()), Some(-1.0));
        assert_eq!(curve.segments()[1].first().map(|p| p.x()), Some(1.0));
    }

    #[test]
    fn test_sample_evenly_spaced() {
        let expression = compile("x").unwrap();
        let curve = expression.sample(Domain::new(0.0, 1.0), 5, &SampleLimits::default());

        let xs: Vec<f64> = curve.segments()[0].iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_sample_reversed_domain() {
        let expression = compile("x").unwrap();
        let curve = expression.sample(Domain::new(2.0, -2.0), 3, &SampleLimits::default());

        let xs: Vec<f64> = curve.segments()[0].iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_sample_degenerate_domain() {
        let expression = compile("x + 1").unwrap();
        let curve = expression.sample(Domain::new(3.0, 3.0), 100, &SampleLimits::default());

        assert_eq!(curve.point_count(), 1);
        assert_eq!(curve.segments()[0][0], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_sample_count_clamped() {
        let expression = compile("x").unwrap();
        let limits = SampleLimits {
            max_samples: 50,
            ..SampleLimits::default()
        };

        let curve = expression.sample(Domain::new(0.0, 1.0), 10_000, &limits);
        assert_eq!(curve.point_count(), 50);

        let curve = expression.sample(Domain::new(0.0, 1.0), 0, &limits);
        assert_eq!(curve.point_count(), 2);
    }

    #[test]
    fn test_sample_drops_values_beyond_clamp() {
        let expression = compile("x^3").unwrap();
        let limits = SampleLimits {
            clamp: 10.0,
            ..SampleLimits::default()
        };
        let curve = expression.sample(Domain::new(-3.0, 3.0), 7, &limits);

        // x = -3 and x = 3 exceed the clamp; the middle run stays connected
        assert_eq!(curve.segments().len(), 1);
        assert_eq!(curve.point_count(), 5);
    }

    #[test]
    fn test_sample_nan_everywhere_is_empty() {
        let expression = compile("sqrt(-1 - x^2)").unwrap();
        let curve = expression.sample(Domain::default(), 100, &SampleLimits::default());
        assert!(curve.is_empty());
    }

    #[test]
    fn test_sample_non_finite_domain_is_empty() {
        let expression = compile("x").unwrap();
        let curve = expression.sample(
            Domain::new(f64::NEG_INFINITY, 1.0),
            10,
            &SampleLimits::default(),
        );
        assert!(curve.is_empty());
    }

    #[test]
    fn test_sample_count_never_exceeds_ceiling() {
        let expression = compile("x").unwrap();
        let limits = SampleLimits {
            max_samples: u32::MAX,
            ..SampleLimits::default()
        };
        let curve = expression.sample(Domain::new(0.0, 1.0), u32::MAX, &limits);
        assert_eq!(curve.point_count(), SampleLimits::SAMPLES_CEILING as usize);
    }

    #[test]
    fn test_limits_validation() {
        assert!(SampleLimits::default().validate().is_ok());

        let bounds = [
            (1, 1000.0),
            (SampleLimits::SAMPLES_CEILING + 1, 1000.0),
            (u32::MAX, 1000.0),
            (2000, 0.0),
            (2000, -1.0),
            (2000, f64::NAN),
            (2000, f64::INFINITY),
        ];
        for (max_samples, clamp) in bounds {
            let limits = SampleLimits { max_samples, clamp };
            assert!(limits.validate().is_err(), "{limits:?} should be rejected");
        }

        let edge = SampleLimits {
            max_samples: SampleLimits::SAMPLES_CEILING,
            clamp: f64::MIN_POSITIVE,
        };
        assert!(edge.validate().is_ok());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Every kept sample lies inside the domain and under the clamp.
    fn check_samples_within_bounds(
        min: f64,
        max: f64,
        samples: u32,
    ) -> Result<(), TestCaseError> {
        let expression = compile("tan(x) * 100").unwrap();
        let limits = SampleLimits::default();
        let curve = expression.sample(Domain::new(min, max), samples, &limits);

        let (lo, hi) = (min.min(max), min.max(max));
        for p in curve.segments().iter().flatten() {
            prop_assert!(p.x() >= lo && p.x() <= hi);
            prop_assert!(p.y().is_finite());
            prop_assert!(p.y().abs() <= limits.clamp);
        }
        prop_assert!(curve.point_count() <= limits.max_samples as usize);
        prop_assert!(curve.segments().iter().all(|s| !s.is_empty()));
        Ok(())
    }

    proptest! {
        #[test]
        fn samples_within_bounds(
            min in -100.0f64..100.0,
            max in -100.0f64..100.0,
            samples in 0u32..5000,
        ) {
            check_samples_within_bounds(min, max, samples)?;
        }
    }
}
