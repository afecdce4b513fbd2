//! Substitution of symbols and function calls within expressions.

use crate::expr::{Expr, Primary};
use std::collections::HashMap;

/// Replaces every occurrence of the given symbol with the replacement expression.
///
/// The result is not simplified.
pub fn substitute(expr: &Expr, symbol: &str, replacement: &Expr) -> Expr {
    match expr {
        Expr::Primary(Primary::Symbol(name)) if name == symbol => replacement.clone(),
        Expr::Primary(Primary::Call(name, args)) => {
            Expr::Primary(Primary::Call(
                name.clone(),
                args.iter()
                    .map(|arg| substitute(arg, symbol, replacement))
                    .collect(),
            ))
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            Expr::Add(terms.iter().map(|term| substitute(term, symbol, replacement)).collect())
        },
        Expr::Mul(factors) => {
            Expr::Mul(factors.iter().map(|factor| substitute(factor, symbol, replacement)).collect())
        },
        Expr::Exp(lhs, rhs) => {
            Expr::Exp(
                Box::new(substitute(lhs, symbol, replacement)),
                Box::new(substitute(rhs, symbol, replacement)),
            )
        },
    }
}

/// Replaces every symbol named in `replacements` with its mapped expression, simultaneously.
///
/// Unlike chaining [`substitute`] calls, replacement expressions are never walked again, so a
/// swap such as `x -> y, y -> x` behaves as expected. The result is not simplified.
pub fn substitute_all(expr: &Expr, replacements: &HashMap<String, Expr>) -> Expr {
    match expr {
        Expr::Primary(Primary::Symbol(name)) => {
            match replacements.get(name) {
                Some(replacement) => replacement.clone(),
                None => expr.clone(),
            }
        },
        Expr::Primary(Primary::Call(name, args)) => {
            Expr::Primary(Primary::Call(
                name.clone(),
                args.iter()
                    .map(|arg| substitute_all(arg, replacements))
                    .collect(),
            ))
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            Expr::Add(terms.iter().map(|term| substitute_all(term, replacements)).collect())
        },
        Expr::Mul(factors) => {
            Expr::Mul(factors.iter().map(|factor| substitute_all(factor, replacements)).collect())
        },
        Expr::Exp(lhs, rhs) => {
            Expr::Exp(
                Box::new(substitute_all(lhs, replacements)),
                Box::new(substitute_all(rhs, replacements)),
            )
        },
    }
}

/// Rewrites calls to the function `name` using the given transformation.
///
/// The expression is walked bottom-up; when a call to `name` is found, `f` receives the
/// (already rewritten) arguments and can return a replacement for the whole call, or `None` to
/// leave the call in place.
pub fn substitute_call(
    expr: &Expr,
    name: &str,
    f: impl Copy + Fn(&[Expr]) -> Option<Expr>,
) -> Expr {
    match expr {
        Expr::Primary(Primary::Call(target_name, args)) => {
            let args = args.iter()
                .map(|arg| substitute_call(arg, name, f))
                .collect::<Vec<_>>();

            if target_name == name {
                if let Some(replacement) = f(&args) {
                    return replacement;
                }
            }

            Expr::Primary(Primary::Call(target_name.clone(), args))
        },
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => {
            Expr::Add(terms.iter().map(|term| substitute_call(term, name, f)).collect())
        },
        Expr::Mul(factors) => {
            Expr::Mul(factors.iter().map(|factor| substitute_call(factor, name, f)).collect())
        },
        Expr::Exp(lhs, rhs) => {
            Expr::Exp(
                Box::new(substitute_call(lhs, name, f)),
                Box::new(substitute_call(rhs, name, f)),
            )
        },
    }
}
