//! The rewrite rules behind simplification.
//!
//! A rule is a function from an expression to `Some(replacement)` when it knows how to reduce
//! the expression, or `None` when it does not apply. Rules never recurse; the driver walks the
//! tree and offers every node to every rule.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod power;
pub mod root;
pub mod trigonometry;

use crate::expr::{Expr, Primary};

/// Runs `f` on the arguments of a call to the named function, passing through its result.
///
/// Any other expression returns `None`.
pub(crate) fn do_call(
    expr: &Expr,
    name: &str,
    f: impl FnOnce(&[Expr]) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Primary(Primary::Call(target, args)) if target == name => f(args),
        _ => None,
    }
}

/// Runs `f` on the terms of an addition, passing through its result.
///
/// Any other expression returns `None`.
pub(crate) fn do_add(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Add(terms) => f(terms),
        _ => None,
    }
}

/// Runs `f` on the factors of a multiplication, passing through its result.
///
/// Any other expression returns `None`.
pub(crate) fn do_multiply(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Mul(factors) => f(factors),
        _ => None,
    }
}

/// Runs `f` on the base and exponent of a power, passing through its result.
///
/// Any other expression returns `None`.
pub(crate) fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Exp(base, exponent) => f(base, exponent),
        _ => None,
    }
}

/// Applies the first rule that makes progress, trying the rule families in a fixed order.
pub fn all(expr: &Expr) -> Option<Expr> {
    add::all(expr)
        .or_else(|| multiply::all(expr))
        .or_else(|| power::all(expr))
        .or_else(|| distribute::all(expr))
        .or_else(|| trigonometry::all(expr))
        .or_else(|| root::all(expr))
}
