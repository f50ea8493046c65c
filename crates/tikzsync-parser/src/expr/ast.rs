//! Expression tree and the function allow-list.

use std::f64::consts;

/// Binary arithmetic operators, in source notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// The functions an expression may call. Nothing outside this list is
/// reachable from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log,
    Log10,
    Log2,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Deg,
    Rad,
    Min,
    Max,
    Pow,
    Atan2,
    Mod,
}

impl Function {
    /// Names accepted in source text, for help messages.
    pub const NAMES: &'static [&'static str] = &[
        "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "exp", "ln", "log",
        "log10", "log2", "sqrt", "abs", "floor", "ceil", "round", "deg", "rad", "min", "max",
        "pow", "atan2", "mod",
    ];

    /// Looks up a function by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "deg" => Self::Deg,
            "rad" => Self::Rad,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            "atan2" => Self::Atan2,
            "mod" => Self::Mod,
            _ => return None,
        };
        Some(function)
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Min | Self::Max | Self::Pow | Self::Atan2 | Self::Mod => 2,
            _ => 1,
        }
    }

    /// Applies the function. `args` has exactly [`arity`](Self::arity) values.
    fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Exp => a.exp(),
            // `log` is the natural logarithm, as in pgfmath.
            Self::Ln | Self::Log => a.ln(),
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Sqrt => a.sqrt(),
            Self::Abs => a.abs(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Deg => a.to_degrees(),
            Self::Rad => a.to_radians(),
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Pow => a.powf(b),
            Self::Atan2 => a.atan2(b),
            Self::Mod => a % b,
        }
    }
}

/// Named constants.
pub(crate) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        _ => None,
    }
}

/// The name of the single free variable.
pub(crate) const VARIABLE: &str = "x";

/// A compiled arithmetic expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable,
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Evaluates the tree at `x`.
    ///
    /// Never panics; domain errors (`ln(-1)`, `1/0`) surface as NaN or
    /// infinity for the caller to filter.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Variable => x,
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Self::Call { function, args } => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                function.apply(&values)
            }
        }
    }
}
