//! Solving vector equations for scalar and vector unknowns.

use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_symbolic::solve::{solve, solve_nonnegative};
use nabla_symbolic::substitute::{substitute, substitute_call};
use crate::algebra::{AtomicVector, SymbolCombination, VectorExpr, VectorSymbol};
use crate::error::VectorError;

/// Name of the stand-in scalar used while solving for a magnitude.
const MAGNITUDE: &str = "_norm";

/// A vector equation `lhs = rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorEquation {
    lhs: VectorExpr,
    rhs: VectorExpr,
}

impl VectorEquation {
    pub fn new(lhs: VectorExpr, rhs: VectorExpr) -> Self {
        Self { lhs, rhs }
    }

    /// The left-hand side of the equation.
    pub fn lhs(&self) -> &VectorExpr {
        &self.lhs
    }

    /// The right-hand side of the equation.
    pub fn rhs(&self) -> &VectorExpr {
        &self.rhs
    }

    /// The combination form of `lhs - rhs`, whose terms sum to zero.
    fn residual(&self) -> Result<SymbolCombination, VectorError> {
        (self.lhs.clone() - self.rhs.clone()).as_symbol_combination()
    }
}

/// Solves a scalar equation `lhs = rhs` for `symbol`.
///
/// A thin wrapper over the polynomial solver, so that scalar relations produced by dot
/// products and norms solve through the same interface as vector equations.
pub fn solve_for_scalar(lhs: &Expr, rhs: &Expr, symbol: &str) -> Result<Vec<Expr>, VectorError> {
    Ok(solve(lhs, rhs, symbol)?)
}

/// Solves the equation for a single atom of its combination form.
///
/// The atom is isolated strictly: its coefficient is divided out and every other term moves to
/// the other side. With `normalize` set the result is reduced to canonical combination form,
/// otherwise the raw sum of scaled atoms is returned. Returns `None` when the atom does not
/// appear in the equation.
pub fn solve_for_vector(
    equation: &VectorEquation,
    target: &AtomicVector,
    normalize: bool,
) -> Result<Option<VectorExpr>, VectorError> {
    let residual = equation.residual()?;
    let Some(factor) = residual.coefficient_of(target) else {
        return Ok(None);
    };
    let factor = factor.clone();

    let mut result = VectorExpr::Zero;
    for (atom, coefficient) in residual.terms() {
        if atom == target {
            continue;
        }
        let scale = simplify(&Expr::fraction(-coefficient.clone(), factor.clone()));
        result = result + VectorExpr::Atom(atom.clone()) * scale;
    }

    if normalize {
        result = result.doit()?;
    }
    Ok(Some(result))
}

/// Solves the equation for a vector symbol, resolving coefficients that involve the symbol's
/// own norm.
///
/// The difference of the two sides is reduced to combination form and split around the bare
/// `symbol` atom. When its coefficient mentions `norm(symbol)`, taking norms of both sides
/// turns the equation into a polynomial one for the unknown magnitude; its first nonnegative
/// root is substituted back before the symbol is isolated. Returns `None` when the symbol does
/// not appear in the equation.
pub fn solve_for_vector_symbol(
    equation: &VectorEquation,
    symbol: &VectorSymbol,
) -> Result<Option<VectorExpr>, VectorError> {
    let residual = equation.residual()?;
    let name = symbol.name();

    let mut factor = None;
    let mut rest: Vec<(&AtomicVector, &Expr)> = Vec::new();
    for (atom, coefficient) in residual.terms() {
        match atom {
            AtomicVector::Symbol(candidate) if candidate == symbol => {
                factor = Some(coefficient.clone());
            },
            AtomicVector::Cross(a, b) if a == symbol || b == symbol => {
                return Err(VectorError::Unsupported(format!(
                    "cannot isolate `{name}` from inside a cross product",
                )));
            },
            _ => rest.push((atom, coefficient)),
        }
    }
    let Some(factor) = factor else {
        return Ok(None);
    };

    let (factor, rest) = if contains_norm_of(&factor, name) {
        resolve_magnitude(&factor, &rest, name)?
    } else {
        let rest = rest.into_iter()
            .map(|(atom, coefficient)| (atom.clone(), coefficient.clone()))
            .collect();
        (factor, rest)
    };

    if factor.contains_symbol(name)
        || rest.iter().any(|(_, coefficient)| coefficient.contains_symbol(name))
    {
        return Err(VectorError::Unsupported(format!(
            "the equation is not linear in `{name}`",
        )));
    }

    let mut result = VectorExpr::Zero;
    for (atom, coefficient) in rest {
        let scale = simplify(&Expr::fraction(-coefficient, factor.clone()));
        result = result + VectorExpr::Atom(atom) * scale;
    }
    Ok(Some(result.doit()?))
}

/// Solves for the magnitude of the target symbol and substitutes it into the coefficients.
///
/// With the equation in the form `c(n) * x = b`, where `n` is the unknown magnitude of `x`,
/// taking norms of both sides gives `c(n) * n = ±|b|`. The `+` case is tried first; the `-`
/// case picks up coefficients that are negative at the solution.
fn resolve_magnitude(
    factor: &Expr,
    rest: &[(&AtomicVector, &Expr)],
    name: &str,
) -> Result<(Expr, Vec<(AtomicVector, Expr)>), VectorError> {
    let replace_norm = |args: &[Expr]| -> Option<Expr> {
        match args {
            [arg] if arg.as_symbol() == Some(name) => Some(Expr::symbol(MAGNITUDE)),
            _ => None,
        }
    };

    let mut moved = VectorExpr::Zero;
    for (atom, coefficient) in rest {
        moved = moved + VectorExpr::Atom((*atom).clone()) * -(*coefficient).clone();
    }

    let with_magnitude = substitute_call(factor, "norm", replace_norm);
    let magnitude_product = Expr::symbol(MAGNITUDE) * with_magnitude.clone();
    let target_norm = moved.norm()?;

    let mut roots = solve_nonnegative(&magnitude_product, &target_norm, MAGNITUDE)?;
    if roots.is_empty() {
        roots = solve_nonnegative(&magnitude_product, &(-target_norm), MAGNITUDE)?;
    }
    let Some(magnitude) = roots.into_iter().next() else {
        return Err(VectorError::Unsupported(format!(
            "no nonnegative magnitude satisfies the norm equation for `{name}`",
        )));
    };

    let factor = simplify(&substitute(&with_magnitude, MAGNITUDE, &magnitude));
    let rest = rest.iter()
        .map(|(atom, coefficient)| {
            let substituted = substitute_call(coefficient, "norm", replace_norm);
            ((*atom).clone(), simplify(&substitute(&substituted, MAGNITUDE, &magnitude)))
        })
        .collect();
    Ok((factor, rest))
}

/// True if the expression mentions the norm of the named vector symbol.
fn contains_norm_of(expr: &Expr, name: &str) -> bool {
    expr.post_order_iter().any(|node| {
        matches!(
            node.as_call(),
            Some(("norm", [arg])) if arg.as_symbol() == Some(name)
        )
    })
}

#[cfg(test)]
mod tests {
    use nabla_units::Dimension;
    use pretty_assertions::assert_eq;

    use crate::coords::Quantity;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exponent: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exponent)))
    }

    fn vector(name: &str) -> VectorSymbol {
        VectorSymbol::new(name, Dimension::DIMENSIONLESS)
    }

    #[test]
    fn scalar_equations_delegate_to_the_polynomial_solver() {
        let lhs = pow(sym("t"), 2);
        assert_eq!(
            solve_for_scalar(&lhs, &Expr::integer(9), "t").unwrap(),
            vec![Expr::integer(3), Expr::integer(-3)],
        );
    }

    #[test]
    fn absent_symbols_solve_to_none() {
        let equation = VectorEquation::new(
            VectorExpr::from(vector("a")),
            VectorExpr::from(vector("b")),
        );
        assert_eq!(solve_for_vector_symbol(&equation, &vector("x")).unwrap(), None);
    }

    #[test]
    fn linear_equations_isolate_the_symbol() {
        // k x = 2 b
        let equation = VectorEquation::new(
            VectorExpr::from(vector("x")) * sym("k"),
            VectorExpr::from(vector("b")) * Expr::integer(2),
        );

        let solution = solve_for_vector_symbol(&equation, &vector("x")).unwrap();
        let expected = VectorExpr::from(vector("b"))
            * Expr::Mul(vec![Expr::integer(2), pow(sym("k"), -1)]);
        assert_eq!(solution, Some(expected));
    }

    #[test]
    fn norm_scaled_equations_resolve_the_magnitude() {
        // |x| x = 4 a with |a| = 1, so |x| = 2 and x = 2 a
        let unit = VectorSymbol::with_norm(
            "a",
            Dimension::DIMENSIONLESS,
            Quantity::new(Expr::one(), Dimension::DIMENSIONLESS),
        )
        .unwrap();
        let x = VectorExpr::from(vector("x"));
        let equation = VectorEquation::new(
            x.clone() * x.norm().unwrap(),
            unit.clone() * Expr::integer(4),
        );

        let solution = solve_for_vector_symbol(&equation, &vector("x")).unwrap();
        assert_eq!(solution, Some(unit * Expr::integer(2)));
    }

    #[test]
    fn cross_product_positions_are_rejected() {
        let equation = VectorEquation::new(
            VectorExpr::from(vector("w")).cross(VectorExpr::from(vector("x"))),
            VectorExpr::from(vector("b")),
        );

        let result = solve_for_vector_symbol(&equation, &vector("x"));
        assert!(matches!(result, Err(VectorError::Unsupported(_))));
    }

    #[test]
    fn atoms_isolate_strictly() {
        // u + 3 v = 0, solved for u
        let u = vector("u");
        let equation = VectorEquation::new(
            VectorExpr::from(u.clone()) + VectorExpr::from(vector("v")) * Expr::integer(3),
            VectorExpr::Zero,
        );

        let solution =
            solve_for_vector(&equation, &AtomicVector::Symbol(u), true).unwrap();
        assert_eq!(
            solution,
            Some(VectorExpr::from(vector("v")) * Expr::integer(-3)),
        );
    }

    #[test]
    fn cross_atoms_are_valid_targets() {
        // (c x d) = 2 e, solved for the cross product atom
        let c = vector("c");
        let d = vector("d");
        let equation = VectorEquation::new(
            VectorExpr::from(c.clone()).cross(VectorExpr::from(d.clone())),
            VectorExpr::from(vector("e")) * Expr::integer(2),
        );

        let solution =
            solve_for_vector(&equation, &AtomicVector::Cross(c, d), true).unwrap();
        assert_eq!(
            solution,
            Some(VectorExpr::from(vector("e")) * Expr::integer(2)),
        );
    }
}
