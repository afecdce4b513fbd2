//! Solving equations for a named variable.
//!
//! The [`solve`] function handles equations that are polynomial of degree at most two in the
//! target variable, which covers the linear vector equations and norm equations produced by the
//! vector layer. Roots are returned in exact form; use [`solve_nonnegative`] to drop roots that
//! are provably negative.

use crate::eval::as_float;
use crate::expr::{Expr, Primary};
use crate::primitive::int;
use crate::simplify::{fraction::make_fraction, simplify};
use std::collections::HashMap;

/// Errors that can occur while solving an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The variable appears in a position that is not polynomial, such as inside a function call
    /// or an exponent.
    NonPolynomial,

    /// The equation is polynomial in the variable, but of degree greater than two.
    DegreeTooHigh,

    /// Both sides of the equation are identical; every value of the variable is a solution.
    Underdetermined,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPolynomial => {
                write!(f, "the equation is not polynomial in the target variable")
            },
            Self::DegreeTooHigh => {
                write!(f, "cannot solve polynomial equations of degree greater than two")
            },
            Self::Underdetermined => {
                write!(f, "every value of the variable satisfies the equation")
            },
        }
    }
}

impl std::error::Error for SolveError {}

/// Splits a term into the degree of the variable within it and the remaining coefficient.
fn term_degree(term: &Expr, var: &str) -> Result<(usize, Expr), SolveError> {
    /// Degree of a lone factor, which must be the variable itself or an integer power of it.
    fn factor_degree(factor: &Expr, var: &str) -> Result<usize, SolveError> {
        match factor {
            Expr::Primary(Primary::Symbol(name)) if name == var => Ok(1),
            Expr::Exp(base, exponent) => {
                if !matches!(&**base, Expr::Primary(Primary::Symbol(name)) if name == var) {
                    return Err(SolveError::NonPolynomial);
                }
                exponent.as_integer()
                    .and_then(|n| n.to_usize())
                    .ok_or(SolveError::NonPolynomial)
            },
            _ => Err(SolveError::NonPolynomial),
        }
    }

    if !term.contains_symbol(var) {
        return Ok((0, term.clone()));
    }

    match term {
        Expr::Mul(factors) => {
            let (dependent, constant): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.contains_symbol(var));

            match dependent.as_slice() {
                [factor] => Ok((factor_degree(factor, var)?, Expr::Mul(constant).downgrade())),
                _ => Err(SolveError::NonPolynomial),
            }
        },
        term => Ok((factor_degree(term, var)?, Expr::Primary(Primary::Integer(int(1))))),
    }
}

/// Collects the simplified difference of the two sides of an equation into polynomial
/// coefficients `[c0, c1, c2]`, where the equation is `c2 var^2 + c1 var + c0 = 0`.
fn collect_coefficients(lhs: &Expr, rhs: &Expr, var: &str) -> Result<[Expr; 3], SolveError> {
    let difference = simplify(&(lhs.clone() - rhs.clone()));
    let terms = match &difference {
        Expr::Add(terms) => terms.clone(),
        other => vec![other.clone()],
    };

    let mut coefficients = [Expr::zero(), Expr::zero(), Expr::zero()];
    for term in &terms {
        let (degree, coefficient) = term_degree(term, var)?;
        if degree > 2 {
            return Err(SolveError::DegreeTooHigh);
        }
        coefficients[degree] = simplify(&(coefficients[degree].clone() + coefficient));
    }

    Ok(coefficients)
}

/// Solves the equation `lhs = rhs` for the variable `var`.
///
/// The equation must be polynomial of degree at most two in `var`. Roots are returned in exact,
/// simplified form; a quadratic with two real roots lists the `+` branch of the discriminant
/// first. An empty list means the equation has no solution.
pub fn solve(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Vec<Expr>, SolveError> {
    let [c0, c1, c2] = collect_coefficients(lhs, rhs, var)?;

    if c2.is_zero() && c1.is_zero() {
        return if c0.is_zero() {
            Err(SolveError::Underdetermined)
        } else {
            // a nonzero constant is never zero
            Ok(Vec::new())
        };
    }

    if c2.is_zero() {
        // c1 var + c0 = 0
        let root = simplify(&make_fraction(-c0, c1));
        return Ok(vec![root]);
    }

    // var = (-c1 +- sqrt(c1^2 - 4 c2 c0)) / (2 c2)
    let discriminant = simplify(&(
        Expr::Exp(Box::new(c1.clone()), Box::new(Expr::Primary(Primary::Integer(int(2)))))
            - Expr::Primary(Primary::Integer(int(4))) * c2.clone() * c0
    ));
    let sqrt_discriminant = Expr::call("sqrt", vec![discriminant]);
    let denominator = Expr::Primary(Primary::Integer(int(2))) * c2;

    let plus = simplify(&make_fraction(
        -c1.clone() + sqrt_discriminant.clone(),
        denominator.clone(),
    ));
    let minus = simplify(&make_fraction(
        -c1 - sqrt_discriminant,
        denominator,
    ));

    Ok(vec![plus, minus])
}

/// Solves the equation `lhs = rhs` for `var`, dropping roots that are provably negative.
///
/// A root is provably negative when it evaluates numerically without free symbols and the value
/// is less than zero. Roots containing free symbols are kept.
pub fn solve_nonnegative(lhs: &Expr, rhs: &Expr, var: &str) -> Result<Vec<Expr>, SolveError> {
    let roots = solve(lhs, rhs, var)?;
    Ok(roots.into_iter()
        .filter(|root| {
            match as_float(root, &HashMap::new()) {
                Ok(value) => value >= 0,
                // a root with free symbols is not provably negative
                Err(_) => true,
            }
        })
        .collect())
}
