//! Symbolic differentiation of expressions.
//!
//! The entry point is the [`derivative`] function, which differentiates an expression with
//! respect to a named variable. All other symbols are treated as constants, so the result is a
//! partial derivative when the expression contains multiple variables.
//!
//! The output is not simplified beyond dropping terms and factors that are trivially zero or one;
//! callers that want a canonical result should pass it through
//! [`simplify`](crate::simplify::simplify).

use rug::Integer;

use crate::primitive::float;

use crate::expr::{Expr, Primary};

mod function;

/// Whether the expression is zero on its face, without any real simplification.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Integer(n)) => n.is_zero(),
        Expr::Primary(Primary::Float(x)) => x.is_zero(),
        Expr::Add(terms) => terms.iter().all(is_trivially_zero),
        Expr::Mul(factors) => factors.iter().any(is_trivially_zero),
        Expr::Exp(base, exponent) => is_trivially_zero(base) && !is_trivially_zero(exponent),
        _ => false,
    }
}

/// Whether the expression is one on its face, without any real simplification.
fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Integer(n)) => *n == 1,
        Expr::Primary(Primary::Float(x)) => *x == 1,
        Expr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        Expr::Mul(factors) => factors.iter().all(is_trivially_unity),
        Expr::Exp(base, exponent) => is_trivially_zero(exponent) || is_trivially_unity(base),
        _ => false,
    }
}

/// Accumulates the factors of a product. A zero factor collapses the whole product to zero, and
/// factors of one are skipped.
#[derive(Default)]
struct Factors(Vec<Expr>);

impl Factors {
    fn push(&mut self, factor: Expr) {
        if is_trivially_zero(&factor) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expr::zero()];
        } else if !is_trivially_unity(&factor) {
            self.0.push(factor);
        }
    }

    fn build(self) -> Expr {
        Expr::Mul(self.0).downgrade()
    }
}

/// Accumulates the terms of a sum, skipping terms of zero.
#[derive(Default)]
struct Terms(Vec<Expr>);

impl Terms {
    fn push(&mut self, term: Expr) {
        if !is_trivially_zero(&term) {
            self.0.push(term);
        }
    }

    fn build(self) -> Expr {
        Expr::Add(self.0).downgrade()
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], with: &str) -> Result<Expr, DerivativeError> {
    let mut sum = Terms::default();
    for term in terms {
        sum.push(derivative(term, with)?);
    }
    Ok(sum.build())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[Expr], with: &str) -> Result<Expr, DerivativeError> {
    let mut sum = Terms::default();

    for i in 0..factors.len() {
        let mut product = Factors::default();
        for (j, factor) in factors.iter().enumerate() {
            let part = if i == j {
                derivative(factor, with)?
            } else {
                factor.clone()
            };
            product.push(part);
        }
        sum.push(product.build());
    }

    Ok(sum.build())
}

/// `(f^c)' = c * f^(c - 1) * f'`, where `c` is constant with respect to the differentiation
/// variable.
fn power_rule(base: &Expr, exponent: &Expr, with: &str) -> Result<Expr, DerivativeError> {
    let reduced = match exponent {
        Expr::Primary(Primary::Integer(n)) => Expr::integer(n - Integer::from(1)),
        Expr::Primary(Primary::Float(x)) => Expr::Primary(Primary::Float(x - float(1))),
        _ if !exponent.contains_symbol(with) => exponent.clone() - Expr::one(),
        // TODO: `a^f(x)` needs the exponential rule, `(a^f)' = a^f * ln(a) * f'`
        _ => return Err(DerivativeError::Unsupported),
    };

    let mut product = Factors::default();
    product.push(derivative(base, with)?);
    product.push(exponent.clone());
    product.push(Expr::Exp(Box::new(base.clone()), Box::new(reduced)));
    Ok(product.build())
}

/// Errors that can occur while symbolically differentiating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivativeError {
    /// The expression may be differentiable, but symbolically computing the derivative is not
    /// supported.
    Unsupported,

    /// A call to an unknown function whose arguments contain the differentiation variable.
    UnknownFunction(String),
}

impl std::fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "cannot symbolically compute this derivative"),
            Self::UnknownFunction(name) => {
                write!(f, "cannot differentiate a call to the unknown function `{name}`")
            },
        }
    }
}

impl std::error::Error for DerivativeError {}

/// Computes the derivative of the given expression with respect to the variable `with`. Returns
/// [`Err`] if the derivative could not be symbolically computed.
pub fn derivative(f: &Expr, with: &str) -> Result<Expr, DerivativeError> {
    if is_trivially_zero(f) {
        return Ok(Expr::zero());
    }

    let raw = match f {
        Expr::Primary(Primary::Integer(_) | Primary::Float(_)) => Expr::zero(),
        Expr::Primary(Primary::Symbol(name)) => {
            if name == with {
                Expr::one()
            } else {
                Expr::zero()
            }
        },
        Expr::Primary(Primary::Call(name, args)) => {
            function::function_derivative(name, args, with)?
        },
        Expr::Add(terms) => sum_rule(terms, with)?,
        Expr::Mul(factors) => product_rule(factors, with)?,
        Expr::Exp(base, exponent) => power_rule(base, exponent, with)?,
    };

    // a zero left behind by the rules is normalized to the canonical integer zero
    if is_trivially_zero(&raw) {
        return Ok(Expr::zero());
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::simplify::simplify;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exp: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exp)))
    }

    #[test]
    fn constants_and_symbols() {
        assert_eq!(derivative(&Expr::integer(5), "x").unwrap(), Expr::zero());
        assert_eq!(derivative(&sym("x"), "x").unwrap(), Expr::one());
        assert_eq!(derivative(&sym("y"), "x").unwrap(), Expr::zero());
    }

    #[test]
    fn power_rule_integer() {
        // d/dx x^3 = 3x^2
        let expr = pow(sym("x"), 3);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), Expr::Mul(vec![
            Expr::integer(3),
            pow(sym("x"), 2),
        ]));
    }

    #[test]
    fn polynomial() {
        // d/dx (x^2 + 3x + 5) = 2x + 3
        let expr = pow(sym("x"), 2) + Expr::integer(3) * sym("x") + Expr::integer(5);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(2), sym("x")]),
            Expr::integer(3),
        ]));
    }

    #[test]
    fn product() {
        // d/dx (x sin(x)) = sin(x) + x cos(x)
        let expr = sym("x") * Expr::call("sin", vec![sym("x")]);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), Expr::Add(vec![
            Expr::call("sin", vec![sym("x")]),
            Expr::Mul(vec![sym("x"), Expr::call("cos", vec![sym("x")])]),
        ]));
    }

    #[test]
    fn chain_rule() {
        // d/dx sin(x^2) = 2x cos(x^2)
        let expr = Expr::call("sin", vec![pow(sym("x"), 2)]);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), Expr::Mul(vec![
            Expr::integer(2),
            sym("x"),
            Expr::call("cos", vec![pow(sym("x"), 2)]),
        ]));
    }

    #[test]
    fn sqrt_of_sum() {
        // d/drho sqrt(rho^2 + z^2) = rho / sqrt(rho^2 + z^2)
        let arg = pow(sym("rho"), 2) + pow(sym("z"), 2);
        let expr = Expr::call("sqrt", vec![arg.clone()]);
        assert_eq!(simplify(&derivative(&expr, "rho").unwrap()), Expr::Mul(vec![
            sym("rho"),
            pow(Expr::call("sqrt", vec![arg]), -1),
        ]));
    }

    #[test]
    fn natural_log() {
        // d/dx ln(x) = 1/x
        let expr = Expr::call("ln", vec![sym("x")]);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), pow(sym("x"), -1));
    }

    #[test]
    fn exponential() {
        // d/dx exp(2x) = 2 exp(2x)
        let expr = Expr::call("exp", vec![Expr::integer(2) * sym("x")]);
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()), Expr::Mul(vec![
            Expr::integer(2),
            Expr::call("exp", vec![Expr::Mul(vec![Expr::integer(2), sym("x")])]),
        ]));
    }

    #[test]
    fn hyperbolic() {
        // d/dx cosh(x) = sinh(x), d/dx sinh(x) = cosh(x)
        let expr = Expr::call("cosh", vec![sym("x")]);
        assert_eq!(
            simplify(&derivative(&expr, "x").unwrap()),
            Expr::call("sinh", vec![sym("x")]),
        );

        let expr = Expr::call("sinh", vec![sym("x")]);
        assert_eq!(
            simplify(&derivative(&expr, "x").unwrap()),
            Expr::call("cosh", vec![sym("x")]),
        );
    }

    #[test]
    fn unknown_function_of_other_variable() {
        // d/dx f(y) = 0, since the arguments do not involve x
        let expr = Expr::call("f", vec![sym("y")]);
        assert_eq!(derivative(&expr, "x").unwrap(), Expr::zero());
    }

    #[test]
    fn unknown_function_errors() {
        let expr = Expr::call("f", vec![sym("x")]);
        assert_eq!(
            derivative(&expr, "x").unwrap_err(),
            DerivativeError::UnknownFunction("f".to_string()),
        );
    }

    #[test]
    fn variable_exponent_errors() {
        let expr = Expr::Exp(Box::new(Expr::integer(2)), Box::new(sym("x")));
        assert_eq!(derivative(&expr, "x").unwrap_err(), DerivativeError::Unsupported);
    }

    #[test]
    fn matches_finite_difference() {
        use std::collections::HashMap;
        use crate::eval::as_float;

        const DX: f64 = 1e-6;

        fn eval_at(e: &Expr, x: f64) -> f64 {
            let mut vars = HashMap::new();
            vars.insert("x".to_string(), crate::primitive::float(x));
            as_float(e, &vars).unwrap().to_f64()
        }

        // f(x) = x^2 sin(x) + sqrt(x)
        let expr = pow(sym("x"), 2) * Expr::call("sin", vec![sym("x")])
            + Expr::call("sqrt", vec![sym("x")]);
        let deriv = derivative(&expr, "x").unwrap();

        for x in [0.5, 1.0, 2.0, 3.5] {
            let numeric = (eval_at(&expr, x + DX) - eval_at(&expr, x)) / DX;
            let symbolic = eval_at(&deriv, x);
            assert_float_absolute_eq!(symbolic, numeric, 1e-3);
        }
    }
}
