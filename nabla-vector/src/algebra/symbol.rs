//! Vector symbols and the atomic vectors built from them.
//!
//! An [`AtomicVector`] is a vector that the combination pass treats as indivisible: a named
//! symbol, a canonical cross product of two distinct symbols, or a component vector bound to a
//! coordinate system. Every vector expression reduces to a sum of scaled atomic vectors.

use nabla_symbolic::eval::as_float;
use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_units::{Dimension, DimensionMismatch};
use std::collections::HashMap;
use crate::coords::scalar::Quantity;
use crate::coords::vector::CoordinateVector;
use crate::error::VectorError;
use super::VectorExpr;

/// An opaque vector known only by name, carrying a physical dimension and, optionally, a fixed
/// norm.
///
/// Two symbols are the same vector exactly when all of their fields agree. The norm, when fixed,
/// is substituted for `norm(name)` wherever the symbol's magnitude appears in a scalar result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorSymbol {
    name: String,
    dimension: Dimension,
    norm: Option<Expr>,
}

impl VectorSymbol {
    /// Creates a vector symbol with an unknown norm.
    pub fn new(name: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            name: name.into(),
            dimension,
            norm: None,
        }
    }

    /// Creates a vector symbol whose norm is fixed to the given quantity.
    ///
    /// The norm must have the same dimension as the symbol itself. A norm that simplifies to zero
    /// produces [`VectorExpr::Zero`] rather than a symbol, and a norm that evaluates to a negative
    /// number is rejected.
    pub fn with_norm(
        name: impl Into<String>,
        dimension: Dimension,
        norm: Quantity,
    ) -> Result<VectorExpr, VectorError> {
        let name = name.into();
        if norm.dimension() != dimension {
            return Err(DimensionMismatch::new(
                dimension,
                norm.dimension(),
                format!("the norm of `{}`", name),
            ).into());
        }

        let value = simplify(norm.value());
        if value.is_zero() {
            return Ok(VectorExpr::Zero);
        }
        if let Ok(float) = as_float(&value, &HashMap::new()) {
            if float < 0 {
                return Err(VectorError::NegativeNorm(value.to_string()));
            }
        }

        Ok(VectorExpr::Atom(AtomicVector::Symbol(Self {
            name,
            dimension,
            norm: Some(value),
        })))
    }

    /// The name of the symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The physical dimension of the symbol.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The fixed norm of the symbol, if one was attached.
    pub fn norm(&self) -> Option<&Expr> {
        self.norm.as_ref()
    }

    /// The scalar stand-in for this symbol inside opaque `dot` / `norm` / `mixed` calls.
    pub(crate) fn scalar(&self) -> Expr {
        Expr::symbol(self.name.as_str())
    }
}

/// Orders two symbols by name, reporting whether they were exchanged.
pub(crate) fn sort_with_sign(a: VectorSymbol, b: VectorSymbol) -> (VectorSymbol, VectorSymbol, bool) {
    if a.name > b.name {
        (b, a, true)
    } else {
        (a, b, false)
    }
}

/// A vector that the combination pass does not decompose further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicVector {
    /// A bare vector symbol.
    Symbol(VectorSymbol),

    /// The cross product of two distinct vector symbols, operands ordered by name.
    Cross(VectorSymbol, VectorSymbol),

    /// A component vector bound to a coordinate system.
    Bound(CoordinateVector),
}

impl AtomicVector {
    /// Builds the canonical cross product atom of two symbols, or `None` if the product is zero.
    ///
    /// The returned flag is true when the operands were exchanged to restore name order, in which
    /// case the caller owes a sign flip.
    pub(crate) fn cross(a: VectorSymbol, b: VectorSymbol) -> Option<(Self, bool)> {
        if a == b {
            return None;
        }
        let (first, second, swapped) = sort_with_sign(a, b);
        Some((Self::Cross(first, second), swapped))
    }

    /// The physical dimension of the atom, if it carries one.
    ///
    /// Symbols always carry a dimension; bound vectors only do when they were built from
    /// [`Quantity`](crate::coords::scalar::Quantity) components.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::Symbol(symbol) => Some(symbol.dimension()),
            Self::Cross(a, b) => Some(a.dimension() * b.dimension()),
            Self::Bound(vector) => vector.dimension(),
        }
    }
}

/// Hands out uniquely named anonymous vector symbols.
#[derive(Debug, Default)]
pub struct SymbolArena {
    next_id: u64,
}

impl SymbolArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh anonymous symbol with the given dimension.
    pub fn anonymous(&mut self, dimension: Dimension) -> VectorSymbol {
        let id = self.next_id;
        self.next_id += 1;
        VectorSymbol::new(format!("vec_{}", id), dimension)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_norm_collapses_to_zero() {
        let norm = Quantity::new(Expr::zero(), Dimension::LENGTH);
        let vector = VectorSymbol::with_norm("a", Dimension::LENGTH, norm).unwrap();
        assert_eq!(vector, VectorExpr::Zero);
    }

    #[test]
    fn negative_norm_is_rejected() {
        let norm = Quantity::new(Expr::integer(-2), Dimension::LENGTH);
        let result = VectorSymbol::with_norm("a", Dimension::LENGTH, norm);
        assert!(matches!(result, Err(VectorError::NegativeNorm(_))));
    }

    #[test]
    fn norm_dimension_must_match() {
        let norm = Quantity::new(Expr::integer(3), Dimension::TIME);
        let result = VectorSymbol::with_norm("a", Dimension::LENGTH, norm);
        assert!(matches!(result, Err(VectorError::Dimension(_))));
    }

    #[test]
    fn symbolic_norm_is_kept() {
        let norm = Quantity::new(Expr::symbol("m"), Dimension::LENGTH);
        let vector = VectorSymbol::with_norm("a", Dimension::LENGTH, norm).unwrap();
        let VectorExpr::Atom(AtomicVector::Symbol(symbol)) = vector else {
            panic!("expected a symbol atom");
        };
        assert_eq!(symbol.norm(), Some(&Expr::symbol("m")));
    }

    #[test]
    fn cross_orders_operands_by_name() {
        let a = VectorSymbol::new("a", Dimension::LENGTH);
        let b = VectorSymbol::new("b", Dimension::LENGTH);

        let (atom, swapped) = AtomicVector::cross(b.clone(), a.clone()).unwrap();
        assert_eq!(atom, AtomicVector::Cross(a, b));
        assert!(swapped);
    }

    #[test]
    fn cross_with_itself_is_zero() {
        let a = VectorSymbol::new("a", Dimension::LENGTH);
        assert_eq!(AtomicVector::cross(a.clone(), a), None);
    }

    #[test]
    fn arena_names_are_unique() {
        let mut arena = SymbolArena::new();
        let first = arena.anonymous(Dimension::LENGTH);
        let second = arena.anonymous(Dimension::LENGTH);
        assert_eq!(first.name(), "vec_0");
        assert_eq!(second.name(), "vec_1");
    }
}
