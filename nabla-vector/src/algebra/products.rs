//! Products of atomic vectors.
//!
//! Dot products, cross products, and scalar triple products of atoms, expanded with the standard
//! vector identities. Products of opaque symbols become opaque `dot`, `norm`, and `mixed` calls
//! with arguments ordered by name, so equal products always take the same form.

use nabla_symbolic::expr::Expr;
use crate::error::VectorError;
use super::symbol::{AtomicVector, VectorSymbol};
use super::VectorExpr;

/// Head of the opaque dot product call.
pub(crate) const DOT: &str = "dot";

/// Head of the opaque norm call.
pub(crate) const NORM: &str = "norm";

/// Head of the opaque scalar triple product call.
pub(crate) const MIXED: &str = "mixed";

/// The norm of a bare symbol: its fixed norm if one is attached, an opaque `norm` call otherwise.
fn symbol_norm(symbol: &VectorSymbol) -> Expr {
    match symbol.norm() {
        Some(norm) => norm.clone(),
        None => Expr::call(NORM, vec![symbol.scalar()]),
    }
}

/// The dot product of two bare symbols.
///
/// A symbol dotted with itself is its squared norm. Distinct symbols produce an opaque `dot`
/// call with arguments ordered by name.
fn symbol_dot(a: &VectorSymbol, b: &VectorSymbol) -> Expr {
    if a == b {
        return Expr::Exp(Box::new(symbol_norm(a)), Box::new(Expr::integer(2)));
    }

    let (first, second) = if a.name() <= b.name() { (a, b) } else { (b, a) };
    Expr::call(DOT, vec![first.scalar(), second.scalar()])
}

/// The scalar triple product `a . (b x c)` as an opaque `mixed` call.
///
/// Arguments are ordered by name, with the sign of the reordering permutation attached as a
/// coefficient. A repeated symbol makes the product zero.
pub fn mixed_product(a: &VectorSymbol, b: &VectorSymbol, c: &VectorSymbol) -> Expr {
    let mut symbols = [a, b, c];
    let mut negated = false;
    for end in (1..symbols.len()).rev() {
        for i in 0..end {
            if symbols[i].name() > symbols[i + 1].name() {
                symbols.swap(i, i + 1);
                negated = !negated;
            }
        }
    }

    if symbols[0].name() == symbols[1].name() || symbols[1].name() == symbols[2].name() {
        return Expr::zero();
    }

    let call = Expr::call(MIXED, symbols.iter().map(|symbol| symbol.scalar()).collect());
    if negated {
        -call
    } else {
        call
    }
}

/// The dot product of two atomic vectors as a scalar expression.
///
/// The result is not simplified; callers simplify after summing over whole combinations.
pub(crate) fn dot_atoms(a: &AtomicVector, b: &AtomicVector) -> Result<Expr, VectorError> {
    match (a, b) {
        (AtomicVector::Symbol(x), AtomicVector::Symbol(y)) => Ok(symbol_dot(x, y)),
        (AtomicVector::Symbol(v), AtomicVector::Cross(c, d))
        | (AtomicVector::Cross(c, d), AtomicVector::Symbol(v)) => Ok(mixed_product(v, c, d)),
        (AtomicVector::Cross(a1, a2), AtomicVector::Cross(b1, b2)) => {
            // dot(a x b, c x d) = dot(a, c) dot(b, d) - dot(b, c) dot(a, d)
            Ok(symbol_dot(a1, b1) * symbol_dot(a2, b2) - symbol_dot(a2, b1) * symbol_dot(a1, b2))
        },
        (AtomicVector::Bound(u), AtomicVector::Bound(w)) => u.dot(w),
        (AtomicVector::Bound(_), _) | (_, AtomicVector::Bound(_)) => Err(VectorError::Unsupported(
            "dot product of a coordinate-bound vector and an abstract vector".into(),
        )),
    }
}

/// The cross product of two atomic vectors, expanded to a combination-ready vector expression.
///
/// Products involving cross atoms expand through the Lagrange identity
/// `a x (b x c) = b dot(a, c) - c dot(a, b)`, so the result never nests cross products.
pub(crate) fn cross_atoms(a: &AtomicVector, b: &AtomicVector) -> Result<VectorExpr, VectorError> {
    match (a, b) {
        (AtomicVector::Symbol(x), AtomicVector::Symbol(y)) => {
            let Some((product, negated)) = AtomicVector::cross(x.clone(), y.clone()) else {
                return Ok(VectorExpr::Zero);
            };
            let product = VectorExpr::Atom(product);
            Ok(if negated { -product } else { product })
        },
        (AtomicVector::Symbol(v), AtomicVector::Cross(c, d)) => {
            Ok(atom(c) * symbol_dot(v, d) - atom(d) * symbol_dot(v, c))
        },
        (AtomicVector::Cross(c, d), AtomicVector::Symbol(v)) => {
            // (c x d) x v = -(v x (c x d))
            Ok(atom(d) * symbol_dot(v, c) - atom(c) * symbol_dot(v, d))
        },
        (AtomicVector::Cross(a1, a2), AtomicVector::Cross(b1, b2)) => {
            Ok(atom(b1) * mixed_product(b2, a1, a2) - atom(b2) * mixed_product(b1, a1, a2))
        },
        (AtomicVector::Bound(u), AtomicVector::Bound(w)) => u.cross(w),
        (AtomicVector::Bound(_), _) | (_, AtomicVector::Bound(_)) => Err(VectorError::Unsupported(
            "cross product of a coordinate-bound vector and an abstract vector".into(),
        )),
    }
}

fn atom(symbol: &VectorSymbol) -> VectorExpr {
    VectorExpr::Atom(AtomicVector::Symbol(symbol.clone()))
}

#[cfg(test)]
mod tests {
    use nabla_units::Dimension;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sym(name: &str) -> VectorSymbol {
        VectorSymbol::new(name, Dimension::LENGTH)
    }

    #[test]
    fn dot_of_symbol_with_itself_is_squared_norm() {
        let a = AtomicVector::Symbol(sym("a"));
        let dot = dot_atoms(&a, &a).unwrap();
        assert_eq!(dot, Expr::Exp(
            Box::new(Expr::call(NORM, vec![Expr::symbol("a")])),
            Box::new(Expr::integer(2)),
        ));
    }

    #[test]
    fn dot_arguments_are_ordered_by_name() {
        let a = AtomicVector::Symbol(sym("a"));
        let b = AtomicVector::Symbol(sym("b"));
        let expected = Expr::call(DOT, vec![Expr::symbol("a"), Expr::symbol("b")]);
        assert_eq!(dot_atoms(&a, &b).unwrap(), expected);
        assert_eq!(dot_atoms(&b, &a).unwrap(), expected);
    }

    #[test]
    fn mixed_product_tracks_permutation_sign() {
        let (a, b, c) = (sym("a"), sym("b"), sym("c"));
        let sorted = Expr::call(MIXED, vec![
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]);

        assert_eq!(mixed_product(&a, &b, &c), sorted);
        assert_eq!(mixed_product(&b, &c, &a), sorted);
        assert_eq!(mixed_product(&c, &a, &b), sorted);
        assert_eq!(mixed_product(&b, &a, &c), -sorted.clone());
        assert_eq!(mixed_product(&a, &c, &b), -sorted);
    }

    #[test]
    fn mixed_product_with_repeated_symbol_is_zero() {
        let (a, c) = (sym("a"), sym("c"));
        assert_eq!(mixed_product(&a, &a, &c), Expr::zero());
    }

    #[test]
    fn dot_of_cross_with_own_operand_is_zero() {
        let cross = AtomicVector::Cross(sym("a"), sym("b"));
        let a = AtomicVector::Symbol(sym("a"));
        assert_eq!(dot_atoms(&a, &cross).unwrap(), Expr::zero());
    }

    #[test]
    fn cross_of_symbol_with_itself_is_zero() {
        let a = AtomicVector::Symbol(sym("a"));
        assert_eq!(cross_atoms(&a, &a).unwrap(), VectorExpr::Zero);
    }

    #[test]
    fn lagrange_identity() {
        let v = AtomicVector::Symbol(sym("a"));
        let cross = AtomicVector::Cross(sym("b"), sym("c"));

        let expanded = cross_atoms(&v, &cross).unwrap();
        let expected = atom(&sym("b")) * Expr::call(DOT, vec![Expr::symbol("a"), Expr::symbol("c")])
            - atom(&sym("c")) * Expr::call(DOT, vec![Expr::symbol("a"), Expr::symbol("b")]);
        assert_eq!(expanded, expected);
    }
}
