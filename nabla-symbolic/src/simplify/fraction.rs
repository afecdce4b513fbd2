//! Helpers for the canonical fraction shape.
//!
//! A fraction in this crate is an [`Expr::Mul`] holding the numerator and the denominator
//! raised to the power of -1. The routines here build that shape and pull it back out of
//! factor lists.

use crate::primitive::int;
use crate::expr::{Expr, Primary};
use rug::Integer;

/// Creates the fraction `numerator / denominator` in canonical shape: the numerator times the
/// denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    let recip = Expr::Exp(Box::new(denominator), Box::new(Expr::integer(-1)));
    numerator * recip
}

/// Removes the first integer factor and the first integer-reciprocal factor from a factor
/// list and returns them as a numerator / denominator pair.
///
/// The match is deliberately narrow: the numerator must be a bare [`Primary::Integer`] and the
/// denominator a [`Primary::Integer`] raised to exactly -1. A missing half makes the whole
/// extraction fail unless the corresponding `_optional` flag allows it to default to 1; with a
/// flag set, the implied 1 is returned and nothing is removed for that half.
pub(crate) fn extract_integer_fraction(
    factors: &mut Vec<Expr>,
    numerator_optional: bool,
    denominator_optional: bool,
) -> Option<(Integer, Integer)> {
    let numerator = factors
        .iter()
        .position(Expr::is_integer)
        .and_then(|i| factors.swap_remove(i).into_integer());
    let denominator = factors
        .iter()
        .position(Expr::is_integer_recip)
        .and_then(|i| factors.swap_remove(i).into_integer_recip());

    match (numerator, denominator) {
        (Some(num), Some(den)) => Some((num, den)),
        (Some(num), None) if denominator_optional => Some((num, int(1))),
        (None, Some(den)) if numerator_optional => Some((int(1), den)),
        (None, None) if numerator_optional && denominator_optional => Some((int(1), int(1))),
        _ => None,
    }
}

/// Removes the numeric content of a factor list and returns it as one expression.
///
/// A float wins outright and is returned as-is. Otherwise the first integer factor and the
/// first integer-reciprocal factor are removed, and whichever of the two were present are
/// multiplied back together. Returns `None` if the list holds no numeric factor at all.
pub(crate) fn extract_fractional(factors: &mut Vec<Expr>) -> Option<Expr> {
    if let Some(i) = factors.iter().position(Expr::is_float) {
        return Some(factors.swap_remove(i));
    }

    let numerator_idx = factors.iter().position(Expr::is_integer);
    let denominator_idx = factors.iter().position(Expr::is_integer_recip);
    match (numerator_idx, denominator_idx) {
        (Some(num), Some(den)) => {
            // remove the higher index first so the lower one stays valid
            let (first, second) = if num > den { (num, den) } else { (den, num) };
            Some(factors.swap_remove(first) * factors.swap_remove(second))
        },
        (Some(idx), None) | (None, Some(idx)) => Some(factors.swap_remove(idx)),
        (None, None) => None,
    }
}

/// Takes a numerical fraction out of any expression shaped like one, leaving the integer 1 in
/// its place.
///
/// The recognized shapes are a bare [`Primary::Integer`] (denominator 1), an [`Expr::Mul`]
/// with an integer numerator and optional integer-reciprocal denominator, and a lone
/// integer-reciprocal power (numerator 1).
pub(crate) fn extract_explicit_frac(expr: &mut Expr) -> Option<(Integer, Integer)> {
    match expr {
        Expr::Primary(Primary::Integer(num)) => {
            let numerator = std::mem::replace(num, int(1));
            Some((numerator, int(1)))
        },
        Expr::Mul(factors) => extract_integer_fraction(factors, false, true),
        Expr::Exp(..) if expr.is_integer_recip() => {
            let denominator = std::mem::replace(expr, Expr::one()).into_integer_recip()?;
            Some((int(1), denominator))
        },
        _ => None,
    }
}
