//! S-expression rendering of expression trees.
//!
//! Used by the file-driven tests and snapshot assertions. Precedence and
//! grouping are explicit in the output, so `A + B * C` renders as
//! `(+ A (* B C))`.

use std::fmt::Write;

use super::Expr;

/// Format an expression as an S-expression.
pub fn format_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

fn write_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Number(text) => out.push_str(text),
        Expr::Name { name, .. } => out.push_str(name),
        Expr::Binary { left, op, right } => {
            // Writing into a String cannot fail.
            let _ = write!(out, "({} ", op);
            write_expr(left, out);
            out.push(' ');
            write_expr(right, out);
            out.push(')');
        }
    }
}
