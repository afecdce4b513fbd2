//! Symbolic derivatives of the function calls understood by this library.

use crate::expr::Expr;

use super::{derivative, DerivativeError, Factors};

/// Computes the derivative of a supported function call and applies the chain rule.
pub(super) fn function_derivative(
    func: &str,
    args: &[Expr],
    with: &str,
) -> Result<Expr, DerivativeError> {
    // a call whose arguments never mention the variable is a constant, no matter the function
    if args.iter().all(|arg| !arg.contains_symbol(with)) {
        return Ok(Expr::zero());
    }

    let [arg] = args else {
        // none of the supported functions take more than one argument
        return Err(DerivativeError::Unsupported);
    };

    let recip = |e: Expr| Expr::Exp(Box::new(e), Box::new(Expr::integer(-1)));

    // every supported function is differentiated as `f(g(x))' = g'(x) * f'(g(x))`
    let mut product = Factors::default();
    product.push(derivative(arg, with)?);

    match func {
        "sin" => product.push(Expr::call("cos", vec![arg.clone()])),
        "cos" => {
            product.push(Expr::integer(-1));
            product.push(Expr::call("sin", vec![arg.clone()]));
        },
        "tan" => {
            // sec(x)^2 = cos(x)^-2
            product.push(Expr::Exp(
                Box::new(Expr::call("cos", vec![arg.clone()])),
                Box::new(Expr::integer(-2)),
            ));
        },
        "sinh" => product.push(Expr::call("cosh", vec![arg.clone()])),
        "cosh" => product.push(Expr::call("sinh", vec![arg.clone()])),
        "tanh" => {
            // sech(x)^2 = cosh(x)^-2
            product.push(Expr::Exp(
                Box::new(Expr::call("cosh", vec![arg.clone()])),
                Box::new(Expr::integer(-2)),
            ));
        },
        "exp" => product.push(Expr::call("exp", vec![arg.clone()])),
        "ln" => product.push(recip(arg.clone())),
        "sqrt" => {
            // 1 / (2 sqrt(x))
            product.push(recip(Expr::integer(2)));
            product.push(recip(Expr::call("sqrt", vec![arg.clone()])));
        },
        _ => return Err(DerivativeError::UnknownFunction(func.to_string())),
    }

    Ok(product.build())
}
