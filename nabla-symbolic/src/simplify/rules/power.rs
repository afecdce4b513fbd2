//! Rules for powers.

use crate::expr::Expr;
use crate::simplify::rules::do_power;
use rug::{ops::Pow, Integer};

/// `a^0 = 1`
///
/// This rule also sends `0^0` to `1`, a choice other mathematical contexts may not share.
pub fn power_zero(expr: &Expr) -> Option<Expr> {
    do_power(expr, |_, exponent| {
        exponent.as_integer()?.is_zero().then(Expr::one)
    })
}

/// `0^a = 0`
///
/// `0^0` never reaches this rule; [`power_zero`] runs first and claims it.
pub fn power_zero_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, _| {
        base.as_integer()?.is_zero().then(Expr::zero)
    })
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, _| {
        (*base.as_integer()? == 1).then(Expr::one)
    })
}

/// `a^1 = a`
pub fn power_one(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exponent| {
        (*exponent.as_integer()? == 1).then(|| base.clone())
    })
}

/// `(a^b)^c = a^(b*c)`
pub fn power_power(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, outer| {
        let Expr::Exp(inner_base, inner_exp) = base else {
            return None;
        };

        Some(Expr::Exp(
            Box::new((**inner_base).clone()),
            Box::new((**inner_exp).clone() * outer.clone()),
        ))
    })
}

/// Evaluates powers of integers.
///
/// A nonnegative exponent is computed outright. A negative exponent moves into the canonical
/// reciprocal form instead, `2^-2 = 4^-1`, except for -1 itself: `a^-1` is the representation
/// of the fraction `1/a` and must stay as it is.
pub fn integer(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exponent| {
        let base = base.as_integer()?;
        let exponent = exponent.as_integer()?;

        if let Some(n) = exponent.to_u32() {
            return Some(Expr::integer(base.pow(n)));
        }
        if *exponent == -1 {
            return None;
        }

        let magnitude = Integer::from(exponent.abs_ref()).to_u32()?;
        Some(Expr::Exp(
            Box::new(Expr::integer(base.pow(magnitude))),
            Box::new(Expr::integer(-1)),
        ))
    })
}

/// Applies all power rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    power_zero(expr)
        .or_else(|| power_zero_left(expr))
        .or_else(|| power_one_left(expr))
        .or_else(|| power_one(expr))
        .or_else(|| power_power(expr))
        .or_else(|| integer(expr))
}
