//! Rules for trigonometric and hyperbolic functions.

mod consts;
mod table;

use crate::expr::Expr;
use crate::simplify::{
    self,
    fraction::{extract_explicit_frac, make_fraction},
    rules::{do_call, do_power},
};
use std::collections::HashMap;

/// Looks up the exact value of a trigonometric function at the given angle.
///
/// The angle is normalized to a fraction of a full turn: `arg / (2*pi)` is simplified, reduced
/// modulo one turn, and the resulting fraction keys into `table`. Angles that do not reduce to
/// a known special angle miss the table and are left alone.
fn simplify_trig(arg: Expr, table: &HashMap<&Expr, table::TrigOut>) -> Option<Expr> {
    let two_pi = Expr::integer(2) * Expr::symbol("pi");
    let mut turns = simplify::simplify(&make_fraction(arg, two_pi));

    let (numerator, denominator) = extract_explicit_frac(&mut turns)?;

    // wrap into the first turn; the added denominator keeps negative angles positive
    let numerator = (numerator % &denominator + &denominator) % &denominator;
    let key = if numerator.is_zero() {
        Expr::zero()
    } else {
        make_fraction(Expr::integer(numerator), Expr::integer(denominator))
    };

    let entry = table.get(&key)?;
    let value = entry.output.clone();
    Some(if entry.neg { -value } else { value })
}

/// Exact values of `sin` at special angles.
pub fn sin(expr: &Expr) -> Option<Expr> {
    do_call(expr, "sin", |args| {
        simplify_trig(args.first().cloned()?, &table::SIN_TABLE)
    })
}

/// Exact values of `cos` at special angles.
pub fn cos(expr: &Expr) -> Option<Expr> {
    do_call(expr, "cos", |args| {
        simplify_trig(args.first().cloned()?, &table::COS_TABLE)
    })
}

/// Exact values of `tan` at special angles.
pub fn tan(expr: &Expr) -> Option<Expr> {
    do_call(expr, "tan", |args| {
        simplify_trig(args.first().cloned()?, &table::TAN_TABLE)
    })
}

/// `cos(x)^2 = 1 - sin(x)^2`
///
/// Squared cosines are rewritten in terms of the sine, so that sums such as
/// `sin(x)^2 + cos(x)^2` collapse to `1` through distribution and like-term combining. Scale
/// factors derived from a Jacobian rely on this to reduce to closed form.
pub fn pythagorean_sin_cos(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exponent| {
        if *exponent.as_integer()? != 2 {
            return None;
        }
        let (name, args) = base.as_call()?;
        if name != "cos" {
            return None;
        }

        let sin_squared = Expr::Exp(
            Box::new(Expr::call("sin", args.to_vec())),
            Box::new(Expr::integer(2)),
        );
        Some(Expr::one() - sin_squared)
    })
}

/// `cosh(x)^2 = 1 + sinh(x)^2`
///
/// The hyperbolic analogue of [`pythagorean_sin_cos`].
pub fn pythagorean_sinh_cosh(expr: &Expr) -> Option<Expr> {
    do_power(expr, |base, exponent| {
        if *exponent.as_integer()? != 2 {
            return None;
        }
        let (name, args) = base.as_call()?;
        if name != "cosh" {
            return None;
        }

        let sinh_squared = Expr::Exp(
            Box::new(Expr::call("sinh", args.to_vec())),
            Box::new(Expr::integer(2)),
        );
        Some(Expr::one() + sinh_squared)
    })
}

/// Applies all trigonometric rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    sin(expr)
        .or_else(|| cos(expr))
        .or_else(|| tan(expr))
        .or_else(|| pythagorean_sin_cos(expr))
        .or_else(|| pythagorean_sinh_cosh(expr))
}
