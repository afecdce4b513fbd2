//! Vectors bound to coordinate systems.

use nabla_symbolic::derivative::derivative;
use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_units::{Dimension, DimensionMismatch};
use crate::algebra::{AtomicVector, VectorExpr};
use crate::error::VectorError;
use super::scalar::Quantity;
use super::{resolve_point, square, AppliedPoint, SystemRef};

/// A vector written as components along the base vectors of a coordinate system, applied at a
/// point.
///
/// Constructors normalize eagerly: components are simplified, a vector whose components all
/// vanish becomes [`VectorExpr::Zero`], and Cartesian vectors are rebound to the sentinel
/// point. Equality is structural over components, system, point, and dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateVector {
    components: [Expr; 3],
    system: SystemRef,
    point: AppliedPoint,
    dimension: Option<Dimension>,
}

impl CoordinateVector {
    /// Creates a coordinate vector from plain scalar components.
    ///
    /// Cartesian vectors may omit the point of application; every other system requires one.
    pub fn new(
        components: [Expr; 3],
        system: SystemRef,
        point: Option<AppliedPoint>,
    ) -> Result<VectorExpr, VectorError> {
        Self::build(components, system, point, None)
    }

    /// Creates a coordinate vector from dimensioned components.
    ///
    /// All components that are not zero must share one dimension, which the vector then
    /// carries. Vectors carrying a dimension only combine with vectors of the same dimension.
    pub fn from_quantities(
        components: [Quantity; 3],
        system: SystemRef,
        point: Option<AppliedPoint>,
    ) -> Result<VectorExpr, VectorError> {
        let mut dimension: Option<Dimension> = None;
        for (index, component) in components.iter().enumerate() {
            if component.is_zero() {
                continue;
            }
            match dimension {
                None => dimension = Some(component.dimension()),
                Some(expected) if expected == component.dimension() => {},
                Some(expected) => {
                    return Err(DimensionMismatch::new(
                        expected,
                        component.dimension(),
                        format!("the `{}` component", system.base_scalars()[index].name()),
                    ).into());
                },
            }
        }

        let components = components.map(|component| component.value().clone());
        Self::build(components, system, point, dimension)
    }

    fn build(
        components: [Expr; 3],
        system: SystemRef,
        point: Option<AppliedPoint>,
        dimension: Option<Dimension>,
    ) -> Result<VectorExpr, VectorError> {
        let components = components.map(|component| simplify(&component));
        let point = resolve_point(&system, point)?;
        if components.iter().all(Expr::is_zero) {
            return Ok(VectorExpr::Zero);
        }

        Ok(VectorExpr::Atom(AtomicVector::Bound(Self {
            components,
            system,
            point,
            dimension,
        })))
    }

    /// The components in base scalar order.
    pub fn components(&self) -> &[Expr; 3] {
        &self.components
    }

    /// The coordinate system the vector is bound to.
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    /// The point of application.
    pub fn point(&self) -> &AppliedPoint {
        &self.point
    }

    /// The shared dimension of the components, if the vector was built from quantities.
    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    /// The dot product of two coordinate vectors bound to the same system and point.
    pub fn dot(&self, other: &CoordinateVector) -> Result<Expr, VectorError> {
        self.check_compatible(other)?;
        Ok(simplify(&(self.components[0].clone() * other.components[0].clone()
            + self.components[1].clone() * other.components[1].clone()
            + self.components[2].clone() * other.components[2].clone())))
    }

    /// The cross product of two coordinate vectors bound to the same system and point.
    pub fn cross(&self, other: &CoordinateVector) -> Result<VectorExpr, VectorError> {
        self.check_compatible(other)?;
        let components = cross_components(&self.components, &other.components);
        let dimension = match (self.dimension, other.dimension) {
            (Some(lhs), Some(rhs)) => Some(lhs * rhs),
            _ => None,
        };
        Self::build(components, self.system.clone(), Some(self.point.clone()), dimension)
    }

    /// The norm of the vector as a scalar expression.
    pub fn norm(&self) -> Expr {
        simplify(&Expr::call("sqrt", vec![
            square(&self.components[0])
                + square(&self.components[1])
                + square(&self.components[2]),
        ]))
    }

    /// Differentiates the vector with respect to a parameter.
    ///
    /// Components differentiate directly. In non-Cartesian systems the base vectors move with
    /// the point of application, so each component additionally picks up the projections of
    /// the rotated base vectors from
    /// [`diff_base_vector_matrix`](super::CoordinateSystem::diff_base_vector_matrix).
    pub fn differentiate(&self, parameter: &str) -> Result<VectorExpr, VectorError> {
        let component = |i: usize| -> Result<Expr, VectorError> {
            Ok(derivative(&self.components[i], parameter)?)
        };
        let mut components = [component(0)?, component(1)?, component(2)?];

        if !self.system.is_cartesian() {
            let matrix = self.system.diff_base_vector_matrix(parameter, &self.point)?;
            for k in 0..3 {
                let mut total = components[k].clone();
                for i in 0..3 {
                    total = total + self.components[i].clone() * matrix[i][k].clone();
                }
                components[k] = total;
            }
        }

        Self::build(
            components,
            self.system.clone(),
            Some(self.point.clone()),
            self.dimension,
        )
    }

    fn check_compatible(&self, other: &CoordinateVector) -> Result<(), VectorError> {
        if self.system != other.system {
            return Err(VectorError::IncompatibleSystems);
        }
        if self.point != other.point {
            return Err(VectorError::IncompatiblePoints);
        }
        Ok(())
    }
}

/// The componentwise cross product of two component triples.
pub(crate) fn cross_components(lhs: &[Expr; 3], rhs: &[Expr; 3]) -> [Expr; 3] {
    [
        lhs[1].clone() * rhs[2].clone() - lhs[2].clone() * rhs[1].clone(),
        lhs[2].clone() * rhs[0].clone() - lhs[0].clone() * rhs[2].clone(),
        lhs[0].clone() * rhs[1].clone() - lhs[1].clone() * rhs[0].clone(),
    ]
}

/// Merges every group of compatible coordinate vectors in the expression into a single
/// component vector.
///
/// The expression is reduced to its symbol combination, then bound vectors sharing a system,
/// point of application, and dimension are summed componentwise with their coefficients folded
/// in. Bound vectors carrying different dimensions at the same point refuse to merge, while
/// dimensioned and plain vectors stay side by side. Opaque atoms pass through untouched.
pub fn combine_coordinate_vectors(expr: &VectorExpr) -> Result<VectorExpr, VectorError> {
    let combination = expr.as_symbol_combination()?;

    let mut groups: Vec<CoordinateVector> = Vec::new();
    let mut others: Vec<VectorExpr> = Vec::new();

    for (atom, coefficient) in combination.terms() {
        let vector = match atom {
            AtomicVector::Bound(vector) => vector,
            other => {
                let term = if coefficient.is_one() {
                    VectorExpr::Atom(other.clone())
                } else {
                    VectorExpr::Scale(coefficient.clone(), Box::new(VectorExpr::Atom(other.clone())))
                };
                others.push(term);
                continue;
            },
        };

        let mut target = None;
        for (index, existing) in groups.iter().enumerate() {
            if existing.system != vector.system || existing.point != vector.point {
                continue;
            }
            match (existing.dimension, vector.dimension) {
                (Some(lhs), Some(rhs)) if lhs != rhs => {
                    return Err(DimensionMismatch::new(
                        lhs,
                        rhs,
                        "a sum of coordinate vectors",
                    ).into());
                },
                (Some(_), Some(_)) | (None, None) => {
                    target = Some(index);
                    break;
                },
                _ => {},
            }
        }

        let scaled = |i: usize| vector.components[i].clone() * coefficient.clone();
        match target {
            Some(index) => {
                for i in 0..3 {
                    let merged = groups[index].components[i].clone() + scaled(i);
                    groups[index].components[i] = merged;
                }
            },
            None => groups.push(CoordinateVector {
                components: [scaled(0), scaled(1), scaled(2)],
                system: vector.system.clone(),
                point: vector.point.clone(),
                dimension: vector.dimension,
            }),
        }
    }

    let mut terms = others;
    for group in groups {
        match CoordinateVector::build(
            group.components,
            group.system,
            Some(group.point),
            group.dimension,
        )? {
            VectorExpr::Zero => {},
            vector => terms.push(vector),
        }
    }

    Ok(match terms.len() {
        0 => VectorExpr::Zero,
        1 => terms.swap_remove(0),
        _ => VectorExpr::Add(terms),
    })
}

/// Differentiates a vector expression with respect to a parameter.
///
/// Opaque vector symbols are treated as constant, so only their coefficients differentiate.
/// Coordinate vectors differentiate through [`CoordinateVector::differentiate`], including the
/// motion of their base vectors.
pub fn differentiate(expr: &VectorExpr, parameter: &str) -> Result<VectorExpr, VectorError> {
    let combination = expr.as_symbol_combination()?;

    let mut result = VectorExpr::Zero;
    for (atom, coefficient) in combination.terms() {
        result = result + VectorExpr::Atom(atom.clone()) * derivative(coefficient, parameter)?;
        if let AtomicVector::Bound(vector) = atom {
            result = result + vector.differentiate(parameter)? * coefficient.clone();
        }
    }
    result.doit()
}
