//! The symbol combination form of vector expressions.

use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use super::symbol::AtomicVector;
use super::VectorExpr;

/// A vector expression flattened into a sum of scaled atomic vectors.
///
/// Each atomic vector appears at most once; coefficients of repeated atoms are added together
/// and simplified, and terms whose coefficient vanishes are dropped. Terms keep the order in
/// which their atoms were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolCombination {
    terms: Vec<(AtomicVector, Expr)>,
}

impl SymbolCombination {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `coefficient * atom` to the combination, merging with an existing term if the atom
    /// is already present.
    pub(crate) fn push(&mut self, atom: AtomicVector, coefficient: Expr) {
        for (existing, existing_coefficient) in &mut self.terms {
            if *existing == atom {
                *existing_coefficient += coefficient;
                return;
            }
        }
        self.terms.push((atom, coefficient));
    }

    /// Simplifies every coefficient and drops terms whose coefficient vanished.
    pub(crate) fn normalize(&mut self) {
        for (_, coefficient) in &mut self.terms {
            *coefficient = simplify(coefficient);
        }
        self.terms.retain(|(_, coefficient)| !coefficient.is_zero());
    }

    /// The terms of the combination.
    pub fn terms(&self) -> &[(AtomicVector, Expr)] {
        &self.terms
    }

    /// The coefficient attached to the given atom, if the atom appears in the combination.
    pub fn coefficient_of(&self, atom: &AtomicVector) -> Option<&Expr> {
        self.terms.iter().find_map(|(existing, coefficient)| {
            if existing == atom {
                Some(coefficient)
            } else {
                None
            }
        })
    }

    /// Rebuilds a vector expression from the combination.
    ///
    /// An empty combination becomes [`VectorExpr::Zero`], and a single term with coefficient one
    /// becomes a bare atom.
    pub fn into_expr(mut self) -> VectorExpr {
        fn term(atom: AtomicVector, coefficient: Expr) -> VectorExpr {
            if coefficient.is_one() {
                VectorExpr::Atom(atom)
            } else {
                VectorExpr::Scale(coefficient, Box::new(VectorExpr::Atom(atom)))
            }
        }

        match self.terms.len() {
            0 => VectorExpr::Zero,
            1 => {
                let (atom, coefficient) = self.terms.swap_remove(0);
                term(atom, coefficient)
            },
            _ => VectorExpr::Add(
                self.terms
                    .into_iter()
                    .map(|(atom, coefficient)| term(atom, coefficient))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use nabla_units::Dimension;
    use pretty_assertions::assert_eq;

    use crate::algebra::VectorSymbol;
    use super::*;

    fn atom(name: &str) -> AtomicVector {
        AtomicVector::Symbol(VectorSymbol::new(name, Dimension::LENGTH))
    }

    #[test]
    fn repeated_atoms_merge_coefficients() {
        let mut combination = SymbolCombination::new();
        combination.push(atom("a"), Expr::symbol("x"));
        combination.push(atom("b"), Expr::one());
        combination.push(atom("a"), Expr::symbol("y"));
        combination.normalize();

        assert_eq!(
            combination.coefficient_of(&atom("a")),
            Some(&(Expr::symbol("x") + Expr::symbol("y"))),
        );
        assert_eq!(combination.terms().len(), 2);
    }

    #[test]
    fn vanishing_terms_are_dropped() {
        let mut combination = SymbolCombination::new();
        combination.push(atom("a"), Expr::one());
        combination.push(atom("a"), -Expr::one());
        combination.normalize();

        assert_eq!(combination.into_expr(), VectorExpr::Zero);
    }

    #[test]
    fn unit_coefficients_produce_bare_atoms() {
        let mut combination = SymbolCombination::new();
        combination.push(atom("a"), Expr::one());
        combination.normalize();

        assert_eq!(combination.into_expr(), VectorExpr::Atom(atom("a")));
    }
}
