//! Expression tree produced by the parser.
//!
//! Names are kept as written; resolving them to inputs is the binder's job.
//! Nothing here knows how to evaluate.

use std::fmt;
use std::ops::Range;

/// A parsed infix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, as written in the source.
    Number(String),
    /// Identifier reference: `A`, or anything else the binder will reject.
    Name { name: String, span: Range<usize> },
    /// Binary operation: `a + b`, `a / b`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Visit every name in the tree, left to right.
    pub fn names(&self) -> Vec<(&str, Range<usize>)> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<(&'a str, Range<usize>)>) {
        match self {
            Expr::Number(_) => {}
            Expr::Name { name, span } => out.push((name.as_str(), span.clone())),
            Expr::Binary { left, right, .. } => {
                left.collect_names(out);
                right.collect_names(out);
            }
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/` - floor division when evaluated downstream
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
        }
    }
}

/// The four inputs an expression may reference.
///
/// Each stands for one raw data byte of the CAN response, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Input {
    A,
    B,
    C,
    D,
}

impl Input {
    pub const ALL: [Input; 4] = [Input::A, Input::B, Input::C, Input::D];

    pub fn name(self) -> &'static str {
        match self {
            Input::A => "A",
            Input::B => "B",
            Input::C => "C",
            Input::D => "D",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|input| input.name() == name)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
