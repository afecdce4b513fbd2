//! Rules for products: flattening, zero and one absorption, fraction reduction, and combining
//! like factors.

use crate::primitive::int;
use crate::expr::{Expr, Primary};
use crate::simplify::{
    fraction::{extract_integer_fraction, make_fraction},
    rules::do_multiply,
};

/// Splits a factor into base and exponent. Everything that is not a power has exponent 1.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn split_exponent(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
        other => (other.clone(), Expr::one()),
    }
}

/// `a * (b * c) = a * b * c`
///
/// Rewrites performed on a factor can leave a nested product behind; this rule splices it back
/// into the outer product so the combining rules see a flat list of factors.
pub fn flatten_factors(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let mut flat = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                Expr::Mul(inner) => flat.extend(inner.iter().cloned()),
                other => flat.push(other.clone()),
            }
        }
        Some(Expr::Mul(flat))
    })
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let has_zero = factors
            .iter()
            .any(|factor| factor.as_integer().is_some_and(|n| n.is_zero()));
        if has_zero {
            Some(Expr::Primary(Primary::Integer(int(0))))
        } else {
            None
        }
    })
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let kept = factors
            .iter()
            .filter(|factor| factor.as_integer().map_or(true, |n| *n != 1))
            .cloned()
            .collect::<Vec<_>>();

        if kept.len() == factors.len() {
            return None;
        }
        Some(Expr::Mul(kept).downgrade())
    })
}

/// Simplifies numerical fractions.
///
/// `3/12 = 1/4`
/// `12/3 = 4`
pub fn reduce_numerical_fraction(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let mut rest = factors.to_vec();
        let (numerator, denominator) = extract_integer_fraction(&mut rest, false, false)?;

        let gcd = numerator.clone().gcd(&denominator);
        if gcd == 1 {
            return None;
        }

        let reduced = make_fraction(
            Expr::Primary(Primary::Integer(numerator / &gcd)),
            Expr::Primary(Primary::Integer(denominator / &gcd)),
        );
        Some(Expr::Mul(rest) * reduced)
    })
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `a^c*b^c = (a*b)^c`
/// etc.
pub fn combine_like_factors(expr: &Expr) -> Option<Expr> {
    do_multiply(expr, |factors| {
        let mut combined = factors.to_vec();
        let mut i = 0;

        // quadratic scan, every later factor is checked against the current one
        while i < combined.len() {
            let (mut base, mut exponent) = split_exponent(&combined[i]);

            let mut j = i + 1;
            while j < combined.len() {
                let (other_base, other_exponent) = split_exponent(&combined[j]);

                let both_numeric = base.is_integer() && other_base.is_integer()
                    || base.is_float() && other_base.is_float();
                if exponent == other_exponent && both_numeric {
                    // a^c * b^c = (a*b)^c
                    base *= other_base;
                    combined.swap_remove(j);
                } else if base == other_base {
                    // a^b * a^c = a^(b+c)
                    exponent += other_exponent;
                    combined.swap_remove(j);
                } else {
                    j += 1;
                }
            }

            combined[i] = if exponent.is_one() {
                base
            } else {
                Expr::Exp(Box::new(base), Box::new(exponent))
            };
            i += 1;
        }

        if combined.len() == factors.len() {
            None
        } else {
            Some(Expr::Mul(combined).downgrade())
        }
    })
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten_factors(expr)
        .or_else(|| multiply_zero(expr))
        .or_else(|| multiply_one(expr))
        .or_else(|| reduce_numerical_fraction(expr))
        .or_else(|| combine_like_factors(expr))
}
