//! Rules for sums: flattening, dropping zeros, and combining like terms.

use crate::expr::{Expr, Primary};
use crate::simplify::{
    fraction::{extract_explicit_frac, extract_fractional, make_fraction},
    rules::do_add,
};

/// `+=` for coefficients, extended to add exact fractions.
///
/// Only ever called on the pure numeric coefficients produced by [`split_coefficient`], so the
/// clones handed to the fraction extractor never hold factors that could be lost.
fn add_assign(lhs: &mut Expr, rhs: Expr) {
    // two floats fold directly, the fraction path is for exact values only
    if lhs.is_float() && rhs.is_float() {
        *lhs += rhs;
        return;
    }

    let left = extract_explicit_frac(&mut lhs.clone());
    let right = extract_explicit_frac(&mut rhs.clone());
    let (Some((num1, den1)), Some((num2, den2))) = (left, right) else {
        *lhs += rhs;
        return;
    };

    // (a / b) + (c / d) = (a*d + c*b) / (b*d)
    let numerator = num1 * &den2 + num2 * &den1;
    let denominator = den1 * den2;
    *lhs = if denominator == 1 {
        Expr::Primary(Primary::Integer(numerator))
    } else {
        make_fraction(
            Expr::Primary(Primary::Integer(numerator)),
            Expr::Primary(Primary::Integer(denominator)),
        )
    };
}

/// Splits a term into its rational coefficient and the factors it scales.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `sqrt(6)` -> `(1, sqrt(6))`
/// - `a` -> `(1, a)`
fn split_coefficient(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => (expr.clone(), Expr::one()),
        Expr::Mul(factors) => {
            let mut rest = factors.clone();
            let coeff = extract_fractional(&mut rest).unwrap_or_else(Expr::one);
            (coeff, Expr::Mul(rest).downgrade())
        },
        Expr::Exp(..) if expr.is_integer_recip() => (expr.clone(), Expr::one()),
        _ => (Expr::one(), expr.clone()),
    }
}

/// `a + (b + c) = a + b + c`
///
/// Rewrites performed on a term can leave a nested sum behind; this rule splices it back into
/// the outer sum so the combining rules see a flat list of terms.
pub fn flatten_terms(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Expr::Add(inner) => flat.extend(inner.iter().cloned()),
                other => flat.push(other.clone()),
            }
        }
        Some(Expr::Add(flat))
    })
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let kept = terms
            .iter()
            .filter(|term| term.as_integer().map_or(true, |n| !n.is_zero()))
            .cloned()
            .collect::<Vec<_>>();

        if kept.len() == terms.len() {
            return None;
        }
        Some(Expr::Add(kept).downgrade())
    })
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &Expr) -> Option<Expr> {
    do_add(expr, |terms| {
        let mut combined = terms.to_vec();
        let mut i = 0;

        // quadratic scan, every later term is checked against the current one
        while i < combined.len() {
            let (mut coeff, factors) = split_coefficient(&combined[i]);

            let mut j = i + 1;
            while j < combined.len() {
                let (other_coeff, other_factors) = split_coefficient(&combined[j]);
                if factors == other_factors {
                    // a*n + a*m = (n + m)*a
                    add_assign(&mut coeff, other_coeff);
                    combined.swap_remove(j);
                } else {
                    j += 1;
                }
            }

            combined[i] = if coeff.is_one() {
                factors
            } else {
                coeff * factors
            };
            i += 1;
        }

        if combined.len() == terms.len() {
            None
        } else {
            Some(Expr::Add(combined).downgrade())
        }
    })
}

/// Applies all addition rules.
pub fn all(expr: &Expr) -> Option<Expr> {
    flatten_terms(expr)
        .or_else(|| add_zero(expr))
        .or_else(|| combine_like_terms(expr))
}
