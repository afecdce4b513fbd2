//! Symbolic vectors, orthogonal curvilinear coordinates and vector calculus.
//!
//! # Vector algebra
//!
//! A [`VectorExpr`] is a symbolic vector: a sum of scaled [atomic vectors](AtomicVector) and
//! deferred cross products. Arithmetic builds the tree without doing algebra;
//! [`VectorExpr::doit`] reduces an expression to its canonical **symbol combination**, in which
//! every atom appears once with a simplified scalar coefficient. Cross products of symbols stay
//! atomic, and nested cross products expand with the Lagrange identity, so classic identities
//! like `a x b + b x a = 0` come out as structural equalities.
//!
//! # Coordinate systems
//!
//! A [`CoordinateSystem`](coords::CoordinateSystem) names three base scalars and carries the
//! Lamé scale factors relating coordinate displacements to lengths. Cartesian, cylindrical and
//! spherical systems are built in; custom systems derive their scale factors from a Cartesian
//! transform, validated for orthogonality at construction.
//!
//! Values living in a system are **bound**: a [`CoordinateScalar`] or [`CoordinateVector`] pairs
//! its expression with the system and a point of application. Base vectors of a curvilinear
//! system change direction from point to point, so bound values only combine when their points
//! agree; Cartesian values are free of this and always compare at the sentinel point.
//!
//! # Vector calculus
//!
//! The [`operators`] module provides the gradient, divergence, curl and Laplacian over bound
//! fields, written generically in terms of the scale factors so one implementation serves every
//! orthogonal system:
//!
//! ```
//! use nabla_symbolic::expr::Expr;
//! use nabla_vector::coords::{CoordinateScalar, CoordinateSystem, CoordinateVector};
//! use nabla_vector::operators::VectorGradient;
//!
//! let cartesian = CoordinateSystem::cartesian();
//! let potential = CoordinateScalar::new(
//!     Expr::symbol("x") * Expr::symbol("y"),
//!     cartesian.clone(),
//!     None,
//! ).unwrap();
//!
//! // grad(x y) = y e_x + x e_y
//! let gradient = VectorGradient::new(potential).doit().unwrap();
//! let expected = CoordinateVector::new(
//!     [Expr::symbol("y"), Expr::symbol("x"), Expr::zero()],
//!     cartesian,
//!     None,
//! ).unwrap();
//! assert_eq!(gradient, expected);
//! ```
//!
//! [`solvers`] isolates scalar and vector unknowns from equations, including unknowns scaled by
//! their own norm, and [`integrals`] evaluates line and surface integrals of bound fields over
//! parametrized curves and patches.

pub mod algebra;
pub mod coords;
pub mod error;
pub mod integrals;
pub mod operators;
pub mod solvers;

pub use algebra::{AtomicVector, VectorExpr, VectorSymbol};
pub use coords::{
    AppliedPoint, CoordinateScalar, CoordinateSystem, CoordinateVector, Quantity, SystemRef,
};
pub use error::VectorError;

#[cfg(test)]
mod tests {
    use nabla_symbolic::expr::Expr;
    use pretty_assertions::assert_eq;

    use crate::coords::{AppliedPoint, CoordinateScalar, CoordinateSystem, CoordinateVector};
    use crate::integrals::{Curve, LineIntegral};
    use crate::operators::{VectorDivergence, VectorGradient};

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exponent: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exponent)))
    }

    #[test]
    fn line_integral_of_a_gradient_is_the_potential_difference() {
        let cartesian = CoordinateSystem::cartesian();
        let potential = CoordinateScalar::new(pow(sym("x"), 2), cartesian.clone(), None).unwrap();
        let field = VectorGradient::new(potential).doit().unwrap();

        let segment = Curve::new("t", [sym("t"), Expr::zero(), Expr::zero()], cartesian);
        let work = LineIntegral::new(field, segment)
            .with_bounds(Expr::zero(), sym("b"))
            .doit()
            .unwrap();
        assert_eq!(work, pow(sym("b"), 2));
    }

    #[test]
    fn point_source_fields_are_divergence_free() {
        let spherical = CoordinateSystem::spherical();
        let field = CoordinateVector::new(
            [pow(sym("r"), -2), Expr::zero(), Expr::zero()],
            spherical.clone(),
            Some(AppliedPoint::sentinel(spherical)),
        )
        .unwrap();

        let divergence = VectorDivergence::new(field).doit().unwrap();
        assert_eq!(divergence.value(), &Expr::zero());
    }
}
