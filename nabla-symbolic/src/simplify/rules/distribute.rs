//! Rules that distribute products over sums and powers over products.

use crate::expr::Expr;
use crate::simplify::rules::{do_multiply, do_power};

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        // distribute the remaining factors over the first sum found
        let mut rest = factors.to_vec();
        let idx = rest.iter().position(|factor| matches!(factor, Expr::Add(_)))?;
        let Expr::Add(terms) = rest.swap_remove(idx) else {
            unreachable!();
        };

        let distributed = terms.into_iter()
            .map(|term| Expr::Mul(rest.clone()) * term)
            .collect();
        Some(Expr::Add(distributed))
    })
}

/// `(a*b)^c = a^c * b^c`
pub fn distribute_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exponent| {
        let Expr::Mul(factors) = base else {
            return None;
        };

        let raised = factors.iter()
            .map(|factor| Expr::Exp(
                Box::new(factor.clone()),
                Box::new(exponent.clone()),
            ))
            .collect();
        Some(Expr::Mul(raised))
    })
}

/// Applies all distribution rules.
///
/// Distribution can make an expression larger instead of smaller, but the terms it exposes are
/// often exactly what the addition and power rules need to make progress.
pub fn all(expr: &Expr) -> Option<Expr> {
    distributive_property(expr)
        .or_else(|| distribute_power(expr))
}
