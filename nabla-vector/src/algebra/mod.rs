//! Symbolic vector expressions.
//!
//! A [`VectorExpr`] is a tree of vector-valued operations over [atomic vectors](AtomicVector):
//! sums, scalar multiples, and cross products. Construction performs no algebra beyond
//! flattening nested sums and collapsing operations with [`VectorExpr::Zero`]; in particular,
//! cross products are kept as deferred nodes until a canonical form is requested.
//!
//! The canonical form is the [symbol combination](SymbolCombination): a sum of scaled atomic
//! vectors with each atom appearing once. [`VectorExpr::doit`] reduces an expression to this
//! form, expanding deferred cross products with the standard vector identities along the way:
//!
//! ```
//! use nabla_units::Dimension;
//! use nabla_vector::algebra::VectorExpr;
//!
//! let a = VectorExpr::symbol("a", Dimension::LENGTH);
//! let b = VectorExpr::symbol("b", Dimension::LENGTH);
//!
//! // a x b + b x a = 0
//! let sum = a.clone().cross(b.clone()) + b.cross(a);
//! assert_eq!(sum.doit().unwrap(), VectorExpr::Zero);
//! ```
//!
//! Like scalar expressions, `PartialEq` on vector expressions is strict: two expressions are
//! equal when they contain the same operations, comparing sums without regard to term order.
//! Semantically equal expressions compare equal after [`VectorExpr::doit`].

pub mod combination;
pub mod products;
pub mod symbol;

use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_units::Dimension;
use std::ops::{Add, Div, Mul, Neg, Sub};
use crate::error::VectorError;

pub use combination::SymbolCombination;
pub use products::mixed_product;
pub use symbol::{AtomicVector, SymbolArena, VectorSymbol};

use products::{cross_atoms, dot_atoms};

/// A symbolic vector expression.
#[derive(Debug, Clone)]
pub enum VectorExpr {
    /// The zero vector, belonging to every dimension and coordinate system.
    Zero,

    /// An atomic vector.
    Atom(AtomicVector),

    /// A vector scaled by a scalar expression.
    Scale(Expr, Box<VectorExpr>),

    /// A sum of vectors. Nested sums are flattened during construction.
    Add(Vec<VectorExpr>),

    /// A deferred cross product, expanded by [`VectorExpr::doit`].
    Cross(Box<VectorExpr>, Box<VectorExpr>),
}

impl VectorExpr {
    /// Creates a bare vector symbol with the given name and physical dimension.
    pub fn symbol(name: impl Into<String>, dimension: Dimension) -> Self {
        Self::Atom(AtomicVector::Symbol(VectorSymbol::new(name, dimension)))
    }

    /// Returns true if the expression is structurally the zero vector.
    ///
    /// Expressions that merely reduce to zero compare unequal; reduce with [`VectorExpr::doit`]
    /// first to detect those.
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// Creates a deferred cross product of two vector expressions.
    pub fn cross(self, other: VectorExpr) -> Self {
        Self::Cross(Box::new(self), Box::new(other))
    }

    /// Reduces the expression to its symbol combination.
    ///
    /// Deferred cross products are expanded bilinearly, cross products of atoms are rewritten
    /// with the Lagrange identity where possible, and coefficients of repeated atoms are merged
    /// and simplified.
    pub fn as_symbol_combination(&self) -> Result<SymbolCombination, VectorError> {
        let mut combination = SymbolCombination::new();
        self.collect(&mut combination, &Expr::one())?;
        combination.normalize();
        Ok(combination)
    }

    /// Recursively accumulates `coefficient * self` into the combination.
    fn collect(
        &self,
        combination: &mut SymbolCombination,
        coefficient: &Expr,
    ) -> Result<(), VectorError> {
        match self {
            Self::Zero => Ok(()),
            Self::Atom(atom) => {
                combination.push(atom.clone(), coefficient.clone());
                Ok(())
            },
            Self::Scale(factor, inner) => {
                inner.collect(combination, &(coefficient.clone() * factor.clone()))
            },
            Self::Add(terms) => {
                for term in terms {
                    term.collect(combination, coefficient)?;
                }
                Ok(())
            },
            Self::Cross(lhs, rhs) => {
                let left = lhs.as_symbol_combination()?;
                let right = rhs.as_symbol_combination()?;
                for (left_atom, left_coefficient) in left.terms() {
                    for (right_atom, right_coefficient) in right.terms() {
                        let product = cross_atoms(left_atom, right_atom)?;
                        let scale = coefficient.clone()
                            * left_coefficient.clone()
                            * right_coefficient.clone();
                        product.collect(combination, &scale)?;
                    }
                }
                Ok(())
            },
        }
    }

    /// Reduces the expression to the vector expression of its symbol combination.
    pub fn doit(&self) -> Result<VectorExpr, VectorError> {
        Ok(self.as_symbol_combination()?.into_expr())
    }

    /// The dot product of two vector expressions as a simplified scalar expression.
    ///
    /// Both operands are reduced to their symbol combinations and the product is expanded
    /// bilinearly over their terms.
    pub fn dot(&self, other: &VectorExpr) -> Result<Expr, VectorError> {
        let lhs = self.as_symbol_combination()?;
        let rhs = other.as_symbol_combination()?;

        let mut sum = Expr::zero();
        for (left_atom, left_coefficient) in lhs.terms() {
            for (right_atom, right_coefficient) in rhs.terms() {
                sum += left_coefficient.clone()
                    * right_coefficient.clone()
                    * dot_atoms(left_atom, right_atom)?;
            }
        }
        Ok(simplify(&sum))
    }

    /// The norm of the expression as a simplified scalar expression.
    ///
    /// Computed as the square root of `self . self`, so fixed norms and component norms reduce
    /// to closed forms while unknown norms stay opaque.
    pub fn norm(&self) -> Result<Expr, VectorError> {
        let squared = self.dot(self)?;
        Ok(simplify(&Expr::call("sqrt", vec![squared])))
    }
}

impl From<VectorSymbol> for VectorExpr {
    fn from(symbol: VectorSymbol) -> Self {
        Self::Atom(AtomicVector::Symbol(symbol))
    }
}

impl From<AtomicVector> for VectorExpr {
    fn from(atom: AtomicVector) -> Self {
        Self::Atom(atom)
    }
}

/// Strict equality of vector expressions, comparing sums as multisets of terms.
impl PartialEq for VectorExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Zero, Self::Zero) => true,
            (Self::Atom(lhs), Self::Atom(rhs)) => lhs == rhs,
            (Self::Scale(lhs_factor, lhs), Self::Scale(rhs_factor, rhs)) => {
                lhs_factor == rhs_factor && lhs == rhs
            },
            (Self::Add(lhs), Self::Add(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }
                let mut remaining = rhs.iter().collect::<Vec<_>>();
                lhs.iter().all(|term| {
                    if let Some(index) = remaining.iter().position(|other| term == *other) {
                        remaining.swap_remove(index);
                        true
                    } else {
                        false
                    }
                })
            },
            (Self::Cross(lhs_a, lhs_b), Self::Cross(rhs_a, rhs_b)) => {
                lhs_a == rhs_a && lhs_b == rhs_b
            },
            _ => false,
        }
    }
}

impl Eq for VectorExpr {}

/// Adds two vector expressions, flattening nested sums and dropping zero operands.
impl Add for VectorExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Zero, other) | (other, Self::Zero) => other,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl Sub for VectorExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

/// Scales the expression by -1. The zero vector stays zero.
impl Neg for VectorExpr {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Zero => Self::Zero,
            other => Self::Scale(-Expr::one(), Box::new(other)),
        }
    }
}

/// Scales a vector expression by a scalar expression.
impl Mul<Expr> for VectorExpr {
    type Output = Self;

    fn mul(self, rhs: Expr) -> Self {
        match self {
            Self::Zero => Self::Zero,
            other => Self::Scale(rhs, Box::new(other)),
        }
    }
}

impl Mul<VectorExpr> for Expr {
    type Output = VectorExpr;

    fn mul(self, rhs: VectorExpr) -> VectorExpr {
        rhs * self
    }
}

/// Scales a vector expression by the reciprocal of a scalar expression.
impl Div<Expr> for VectorExpr {
    type Output = Self;

    fn div(self, rhs: Expr) -> Self {
        match self {
            Self::Zero => Self::Zero,
            other => Self::Scale(Expr::fraction(Expr::one(), rhs), Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::coords::scalar::Quantity;
    use super::products::{DOT, NORM};
    use super::*;

    fn sym(name: &str) -> VectorSymbol {
        VectorSymbol::new(name, Dimension::LENGTH)
    }

    fn v(name: &str) -> VectorExpr {
        VectorExpr::symbol(name, Dimension::LENGTH)
    }

    fn dot_call(a: &str, b: &str) -> Expr {
        Expr::call(DOT, vec![Expr::symbol(a), Expr::symbol(b)])
    }

    #[test]
    fn addition_flattens_and_drops_zero() {
        let sum = v("a") + (v("b") + v("c")) + VectorExpr::Zero;
        assert_eq!(sum, VectorExpr::Add(vec![v("a"), v("b"), v("c")]));
    }

    #[test]
    fn repeated_terms_merge() {
        let sum = v("a") + v("a") + v("a");
        assert_eq!(sum.doit().unwrap(), v("a") * Expr::integer(3));
    }

    #[test]
    fn opposite_terms_cancel() {
        let difference = v("a") - v("a");
        assert_eq!(difference.doit().unwrap(), VectorExpr::Zero);
    }

    #[test]
    fn nested_scales_collapse() {
        let twice = (v("a") * Expr::symbol("x")) * Expr::symbol("y");
        let once = v("a") * (Expr::symbol("x") * Expr::symbol("y"));
        assert_eq!(twice.doit().unwrap(), once.doit().unwrap());
    }

    #[test]
    fn scaling_distributes_over_sums() {
        let scaled = (v("a") + v("b")) * Expr::integer(3);
        let separate = v("a") * Expr::integer(3) + v("b") * Expr::integer(3);
        assert_eq!(scaled.doit().unwrap(), separate.doit().unwrap());
    }

    #[test]
    fn cross_products_anticommute() {
        let ab = v("a").cross(v("b"));
        let ba = v("b").cross(v("a"));

        assert_eq!(ab.clone().doit().unwrap(), (-ba.clone()).doit().unwrap());
        assert_eq!((ab + ba).doit().unwrap(), VectorExpr::Zero);
    }

    #[test]
    fn cross_distributes_over_addition() {
        let expanded = (v("a") + v("b")).cross(v("c")).doit().unwrap();
        let separate = (v("a").cross(v("c")) + v("b").cross(v("c"))).doit().unwrap();
        assert_eq!(expanded, separate);
    }

    #[test]
    fn triple_product_expands_with_lagrange() {
        let expanded = v("a").cross(v("b").cross(v("c"))).doit().unwrap();

        let expected = VectorExpr::Add(vec![
            VectorExpr::Scale(dot_call("a", "c"), Box::new(v("b"))),
            VectorExpr::Scale(-dot_call("a", "b"), Box::new(v("c"))),
        ]);
        assert_eq!(expanded, expected);
    }

    #[test]
    fn dot_expands_bilinearly() {
        let sum = v("a") + v("b");
        let squared = sum.dot(&sum).unwrap();

        let norm = |name: &str| Expr::call(NORM, vec![Expr::symbol(name)]);
        let expected = Expr::Exp(Box::new(norm("a")), Box::new(Expr::integer(2)))
            + Expr::integer(2) * dot_call("a", "b")
            + Expr::Exp(Box::new(norm("b")), Box::new(Expr::integer(2)));
        assert_eq!(squared, expected);
    }

    #[test]
    fn norm_of_opaque_symbol_round_trips() {
        let norm = v("a").norm().unwrap();
        assert_eq!(norm, Expr::call(NORM, vec![Expr::symbol("a")]));
    }

    #[test]
    fn norm_of_fixed_norm_symbol_is_the_norm() {
        let norm = Quantity::new(Expr::integer(2), Dimension::LENGTH);
        let a = VectorSymbol::with_norm("a", Dimension::LENGTH, norm).unwrap();
        assert_eq!(a.norm().unwrap(), Expr::integer(2));
    }

    #[test]
    fn combination_reports_coefficients() {
        let expr = v("a") * Expr::symbol("k") + v("b");
        let combination = expr.as_symbol_combination().unwrap();

        assert_eq!(
            combination.coefficient_of(&AtomicVector::Symbol(sym("a"))),
            Some(&Expr::symbol("k")),
        );
        assert_eq!(
            combination.coefficient_of(&AtomicVector::Symbol(sym("b"))),
            Some(&Expr::one()),
        );
        assert_eq!(combination.coefficient_of(&AtomicVector::Symbol(sym("c"))), None);
    }
}
