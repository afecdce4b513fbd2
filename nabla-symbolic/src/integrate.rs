//! Symbolic integration of expressions.
//!
//! The entry point is the [`integrate`] function, which computes an antiderivative with respect
//! to a named variable. Coverage is deliberately small: sums integrate term by term, constant
//! factors are pulled out of products, powers of a linear expression use the power rule, and
//! `sin`, `cos` and `exp` of linear arguments are handled directly. Everything else is an
//! [`IntegrateError`]. This is enough for the arc-length and flux integrands produced by the
//! coordinate machinery, which are polynomial and sinusoidal in the curve parameter.

use rug::Integer;

use crate::derivative::derivative;
use crate::expr::{Expr, Primary};
use crate::primitive::int;
use crate::simplify::{fraction::make_fraction, simplify};
use crate::substitute::substitute;

/// Errors that can occur while symbolically integrating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrateError {
    /// The expression may be integrable, but symbolically computing the antiderivative is not
    /// supported.
    Unsupported,
}

impl std::fmt::Display for IntegrateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "cannot symbolically compute this integral"),
        }
    }
}

impl std::error::Error for IntegrateError {}

/// If the expression is linear in `var`, returns its constant slope.
///
/// The slope may be any expression free of `var`, so `a t + b` is linear for symbolic `a` and
/// `b`. Returns `None` for expressions that are constant with respect to `var`.
fn linear_coefficient(expr: &Expr, var: &str) -> Option<Expr> {
    if !expr.contains_symbol(var) {
        return None;
    }

    let slope = simplify(&derivative(expr, var).ok()?);
    if slope.contains_symbol(var) || slope.is_zero() {
        None
    } else {
        Some(slope)
    }
}

/// Integrates `sin`, `cos` and `exp` calls whose argument is linear in `var`.
fn integrate_call(name: &str, args: &[Expr], var: &str) -> Result<Expr, IntegrateError> {
    let arg = match args {
        [arg] => arg,
        _ => return Err(IntegrateError::Unsupported),
    };
    let slope = linear_coefficient(arg, var).ok_or(IntegrateError::Unsupported)?;

    let antiderivative = match name {
        // sin(at + b) -> -cos(at + b) / a
        "sin" => -Expr::Primary(Primary::Call("cos".to_string(), vec![arg.clone()])),

        // cos(at + b) -> sin(at + b) / a
        "cos" => Expr::Primary(Primary::Call("sin".to_string(), vec![arg.clone()])),

        // exp(at + b) -> exp(at + b) / a
        "exp" => Expr::Primary(Primary::Call("exp".to_string(), vec![arg.clone()])),

        _ => return Err(IntegrateError::Unsupported),
    };

    Ok(make_fraction(antiderivative, slope))
}

/// Integrates a power of an expression linear in `var`.
fn integrate_power(base: &Expr, exponent: &Expr, var: &str) -> Result<Expr, IntegrateError> {
    if exponent.contains_symbol(var) {
        return Err(IntegrateError::Unsupported);
    }
    let slope = linear_coefficient(base, var).ok_or(IntegrateError::Unsupported)?;

    // (at + b)^-1 -> ln(at + b) / a
    if exponent.as_integer().map(|n| n == &-1).unwrap_or(false) {
        return Ok(make_fraction(
            Expr::Primary(Primary::Call("ln".to_string(), vec![base.clone()])),
            slope,
        ));
    }

    // (at + b)^c -> (at + b)^(c + 1) / (a (c + 1))
    let next_exponent = match exponent.as_integer() {
        Some(n) => Expr::Primary(Primary::Integer(n + Integer::from(1))),
        None => exponent.clone() + Expr::Primary(Primary::Integer(int(1))),
    };
    Ok(make_fraction(
        Expr::Exp(Box::new(base.clone()), Box::new(next_exponent.clone())),
        slope * next_exponent,
    ))
}

/// Computes an antiderivative of the given expression with respect to the variable `var`.
/// Returns [`Err`] if the antiderivative could not be symbolically computed.
///
/// The result is not simplified, and carries no constant of integration.
pub fn integrate(expr: &Expr, var: &str) -> Result<Expr, IntegrateError> {
    // constants integrate to a linear term
    if !expr.contains_symbol(var) {
        return Ok(expr.clone() * Expr::Primary(Primary::Symbol(var.to_string())));
    }

    match expr {
        // t -> t^2 / 2
        Expr::Primary(Primary::Symbol(_)) => {
            Ok(make_fraction(
                Expr::Exp(Box::new(expr.clone()), Box::new(Expr::Primary(Primary::Integer(int(2))))),
                Expr::Primary(Primary::Integer(int(2))),
            ))
        },
        Expr::Primary(Primary::Call(name, args)) => integrate_call(name, args, var),
        Expr::Primary(_) => unreachable!("numbers never contain the variable"),
        Expr::Add(terms) => {
            let integrated = terms.iter()
                .map(|term| integrate(term, var))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Add(integrated))
        },
        Expr::Mul(factors) => {
            // pull constant factors out; a single variable-dependent factor must remain
            let (dependent, constant): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.contains_symbol(var));

            match dependent.as_slice() {
                [factor] => Ok(Expr::Mul(constant).downgrade() * integrate(factor, var)?),
                _ => Err(IntegrateError::Unsupported),
            }
        },
        Expr::Exp(base, exponent) => integrate_power(base, exponent, var),
    }
}

/// Computes the definite integral of the given expression over `var` from `lower` to `upper`,
/// evaluating the antiderivative at the bounds by substitution.
///
/// The result is simplified.
pub fn definite_integral(
    expr: &Expr,
    var: &str,
    lower: &Expr,
    upper: &Expr,
) -> Result<Expr, IntegrateError> {
    let antiderivative = integrate(expr, var)?;
    let at_upper = substitute(&antiderivative, var, upper);
    let at_lower = substitute(&antiderivative, var, lower);
    Ok(simplify(&(at_upper - at_lower)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exp: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exp)))
    }

    #[test]
    fn constant() {
        // 3 dt = 3t
        assert_eq!(
            simplify(&integrate(&Expr::integer(3), "t").unwrap()),
            Expr::Mul(vec![Expr::integer(3), sym("t")]),
        );
    }

    #[test]
    fn bare_variable() {
        // t dt = t^2 / 2
        assert_eq!(
            simplify(&integrate(&sym("t"), "t").unwrap()),
            Expr::Mul(vec![pow(sym("t"), 2), pow(Expr::integer(2), -1)]),
        );
    }

    #[test]
    fn power() {
        // t^2 dt = t^3 / 3
        assert_eq!(
            simplify(&integrate(&pow(sym("t"), 2), "t").unwrap()),
            Expr::Mul(vec![pow(sym("t"), 3), pow(Expr::integer(3), -1)]),
        );
    }

    #[test]
    fn reciprocal() {
        // t^-1 dt = ln(t)
        assert_eq!(
            simplify(&integrate(&pow(sym("t"), -1), "t").unwrap()),
            Expr::call("ln", vec![sym("t")]),
        );
    }

    #[test]
    fn sine() {
        // sin(t) dt = -cos(t)
        assert_eq!(
            simplify(&integrate(&Expr::call("sin", vec![sym("t")]), "t").unwrap()),
            Expr::Mul(vec![Expr::integer(-1), Expr::call("cos", vec![sym("t")])]),
        );
    }

    #[test]
    fn cosine_of_linear_argument() {
        // cos(2t) dt = sin(2t) / 2
        let arg = Expr::integer(2) * sym("t");
        assert_eq!(
            simplify(&integrate(&Expr::call("cos", vec![arg.clone()]), "t").unwrap()),
            Expr::Mul(vec![
                Expr::call("sin", vec![arg]),
                pow(Expr::integer(2), -1),
            ]),
        );
    }

    #[test]
    fn constant_factor() {
        // a t dt = a t^2 / 2
        let expr = sym("a") * sym("t");
        assert_eq!(
            simplify(&integrate(&expr, "t").unwrap()),
            Expr::Mul(vec![sym("a"), pow(sym("t"), 2), pow(Expr::integer(2), -1)]),
        );
    }

    #[test]
    fn product_of_dependent_factors() {
        // integration by parts is not supported
        let expr = sym("t") * Expr::call("sin", vec![sym("t")]);
        assert_eq!(integrate(&expr, "t").unwrap_err(), IntegrateError::Unsupported);
    }

    #[test]
    fn definite_sine() {
        // sin(t) dt from 0 to pi = 2
        let result = definite_integral(
            &Expr::call("sin", vec![sym("t")]),
            "t",
            &Expr::zero(),
            &sym("pi"),
        ).unwrap();
        assert_eq!(result, Expr::integer(2));
    }

    #[test]
    fn definite_power() {
        // t^2 dt from 0 to 3 = 9
        let result = definite_integral(&pow(sym("t"), 2), "t", &Expr::zero(), &Expr::integer(3)).unwrap();
        assert_eq!(result, Expr::integer(9));
    }
}
