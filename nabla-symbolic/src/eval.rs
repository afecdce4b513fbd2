//! Numerical evaluation of expressions.
//!
//! Expressions are exact and symbolic everywhere else in this crate; this module is the escape
//! hatch that turns one into a concrete [`Float`], given values for its free symbols.

use crate::consts::{E, PI};
use crate::expr::{Expr, Primary};
use crate::primitive::float;
use rug::{ops::Pow, Float};
use std::collections::HashMap;

/// Errors that can occur while numerically evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A symbol in the expression has no bound value.
    UnknownSymbol(String),

    /// A call to a function this library cannot numerically evaluate.
    UnknownFunction(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSymbol(name) => {
                write!(f, "the symbol `{name}` has no bound value")
            },
            Self::UnknownFunction(name) => {
                write!(f, "cannot numerically evaluate a call to the unknown function `{name}`")
            },
        }
    }
}

impl std::error::Error for EvalError {}

/// Numerically evaluates the given expression, reading values for free symbols out of `vars`.
///
/// The symbols `pi` and `e` are implicitly bound to their usual values, unless `vars` overrides
/// them.
pub fn as_float(expr: &Expr, vars: &HashMap<String, Float>) -> Result<Float, EvalError> {
    match expr {
        Expr::Primary(Primary::Integer(n)) => Ok(float(n)),
        Expr::Primary(Primary::Float(n)) => Ok(n.clone()),
        Expr::Primary(Primary::Symbol(name)) => {
            if let Some(value) = vars.get(name) {
                Ok(value.clone())
            } else if name == "pi" {
                Ok(PI.clone())
            } else if name == "e" {
                Ok(E.clone())
            } else {
                Err(EvalError::UnknownSymbol(name.clone()))
            }
        },
        Expr::Primary(Primary::Call(name, args)) => {
            let values = args.iter()
                .map(|arg| as_float(arg, vars))
                .collect::<Result<Vec<_>, _>>()?;

            match (name.as_str(), values.as_slice()) {
                ("sin", [x]) => Ok(x.clone().sin()),
                ("cos", [x]) => Ok(x.clone().cos()),
                ("tan", [x]) => Ok(x.clone().tan()),
                ("sinh", [x]) => Ok(x.clone().sinh()),
                ("cosh", [x]) => Ok(x.clone().cosh()),
                ("tanh", [x]) => Ok(x.clone().tanh()),
                ("exp", [x]) => Ok(x.clone().exp()),
                ("ln", [x]) => Ok(x.clone().ln()),
                ("sqrt", [x]) => Ok(x.clone().sqrt()),
                ("cbrt", [x]) => Ok(x.clone().cbrt()),
                ("abs", [x]) => Ok(x.clone().abs()),
                ("root", [x, n]) => Ok(x.clone().pow(n.clone().recip())),
                _ => Err(EvalError::UnknownFunction(name.clone())),
            }
        },
        Expr::Add(terms) => {
            terms.iter().try_fold(float(0), |sum, term| {
                Ok(sum + as_float(term, vars)?)
            })
        },
        Expr::Mul(factors) => {
            factors.iter().try_fold(float(1), |product, factor| {
                Ok(product * as_float(factor, vars)?)
            })
        },
        Expr::Exp(lhs, rhs) => {
            Ok(as_float(lhs, vars)?.pow(as_float(rhs, vars)?))
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn polynomial() {
        // x^2 + 3x + 1 at x = 2
        let expr = Expr::Exp(Box::new(sym("x")), Box::new(Expr::integer(2)))
            + Expr::integer(3) * sym("x")
            + Expr::one();
        let mut vars = HashMap::new();
        vars.insert("x".to_string(), float(2));
        assert_float_absolute_eq!(as_float(&expr, &vars).unwrap().to_f64(), 11.0);
    }

    #[test]
    fn implicit_pi() {
        let expr = Expr::call("sin", vec![sym("pi") / Expr::integer(2)]);
        assert_float_absolute_eq!(as_float(&expr, &HashMap::new()).unwrap().to_f64(), 1.0);
    }

    #[test]
    fn fraction_value() {
        let expr = Expr::fraction(Expr::integer(5), Expr::integer(8));
        assert_float_absolute_eq!(as_float(&expr, &HashMap::new()).unwrap().to_f64(), 0.625);
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(
            as_float(&sym("q"), &HashMap::new()).unwrap_err(),
            EvalError::UnknownSymbol("q".to_string()),
        );
    }

    #[test]
    fn unknown_function() {
        let expr = Expr::call("gamma", vec![Expr::integer(3)]);
        assert_eq!(
            as_float(&expr, &HashMap::new()).unwrap_err(),
            EvalError::UnknownFunction("gamma".to_string()),
        );
    }
}
