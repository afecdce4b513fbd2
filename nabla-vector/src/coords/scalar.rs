//! Scalars with physical dimensions and scalars bound to coordinate systems.

use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_units::{Dimension, DimensionMismatch};
use std::ops::{Div, Mul};
use crate::error::VectorError;
use super::{resolve_point, AppliedPoint, SystemRef};

/// A scalar expression paired with a physical dimension.
///
/// Zero is dimensionally polymorphic: it combines with quantities of any dimension, and the
/// other operand's dimension wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    value: Expr,
    dimension: Dimension,
}

impl Quantity {
    /// Creates a quantity from a value and its dimension.
    pub fn new(value: Expr, dimension: Dimension) -> Self {
        Self { value, dimension }
    }

    /// The underlying scalar expression.
    pub fn value(&self) -> &Expr {
        &self.value
    }

    /// The physical dimension of the quantity.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// True if the value simplifies to zero.
    pub fn is_zero(&self) -> bool {
        simplify(&self.value).is_zero()
    }

    /// Adds two quantities, requiring their dimensions to agree unless one of them is zero.
    ///
    /// `context` names the operation for the error message.
    pub fn checked_add(&self, other: &Quantity, context: &str) -> Result<Quantity, DimensionMismatch> {
        let dimension = if self.is_zero() {
            other.dimension
        } else if other.is_zero() {
            self.dimension
        } else if self.dimension == other.dimension {
            self.dimension
        } else {
            return Err(DimensionMismatch::new(self.dimension, other.dimension, context));
        };

        Ok(Quantity {
            value: simplify(&(self.value.clone() + other.value.clone())),
            dimension,
        })
    }
}

/// Multiplies two quantities, multiplying their dimensions.
impl Mul for Quantity {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            value: self.value * rhs.value,
            dimension: self.dimension * rhs.dimension,
        }
    }
}

/// Divides two quantities, dividing their dimensions.
impl Div for Quantity {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self {
            value: Expr::fraction(self.value, rhs.value),
            dimension: self.dimension / rhs.dimension,
        }
    }
}

/// A scalar expression bound to a coordinate system at a point of application.
///
/// This is what the divergence and Laplacian operators produce, and what the gradient and
/// Laplacian consume: a scalar field written in terms of the system's base scalars, applied at
/// a known point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateScalar {
    value: Expr,
    system: SystemRef,
    point: AppliedPoint,
}

impl CoordinateScalar {
    /// Binds a scalar expression to a coordinate system.
    ///
    /// Cartesian scalars are rebound to the sentinel point; any other system requires an
    /// explicit point of application.
    pub fn new(
        value: Expr,
        system: SystemRef,
        point: Option<AppliedPoint>,
    ) -> Result<Self, VectorError> {
        let point = resolve_point(&system, point)?;
        Ok(Self {
            value,
            system,
            point,
        })
    }

    /// The underlying scalar expression.
    pub fn value(&self) -> &Expr {
        &self.value
    }

    /// The coordinate system the scalar is bound to.
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    /// The point of application.
    pub fn point(&self) -> &AppliedPoint {
        &self.point
    }

    /// Adds two bound scalars, requiring the same system and point of application.
    pub fn checked_add(&self, other: &CoordinateScalar) -> Result<CoordinateScalar, VectorError> {
        if self.system != other.system {
            return Err(VectorError::IncompatibleSystems);
        }
        if self.point != other.point {
            return Err(VectorError::IncompatiblePoints);
        }

        Ok(CoordinateScalar {
            value: simplify(&(self.value.clone() + other.value.clone())),
            system: self.system.clone(),
            point: self.point.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::coords::CoordinateSystem;
    use super::*;

    #[test]
    fn zero_is_dimensionally_polymorphic() {
        let zero = Quantity::new(Expr::zero(), Dimension::DIMENSIONLESS);
        let length = Quantity::new(Expr::symbol("d"), Dimension::LENGTH);

        let sum = zero.checked_add(&length, "sum").unwrap();
        assert_eq!(sum.dimension(), Dimension::LENGTH);
        assert_eq!(sum.value(), &Expr::symbol("d"));
    }

    #[test]
    fn mismatched_dimensions_do_not_add() {
        let length = Quantity::new(Expr::symbol("d"), Dimension::LENGTH);
        let time = Quantity::new(Expr::symbol("t"), Dimension::TIME);
        assert!(length.checked_add(&time, "sum").is_err());
    }

    #[test]
    fn multiplication_multiplies_dimensions() {
        let length = Quantity::new(Expr::symbol("d"), Dimension::LENGTH);
        let frequency = Quantity::new(Expr::symbol("f"), Dimension::FREQUENCY);

        let speed = length * frequency;
        assert_eq!(speed.dimension(), Dimension::VELOCITY);
    }

    #[test]
    fn cartesian_scalars_ignore_the_point_of_application() {
        let system = CoordinateSystem::cartesian();
        let at_origin = CoordinateScalar::new(
            Expr::symbol("x"),
            system.clone(),
            Some(AppliedPoint::new(
                [Expr::zero(), Expr::zero(), Expr::zero()],
                system.clone(),
            )),
        )
        .unwrap();
        let unanchored = CoordinateScalar::new(Expr::symbol("x"), system, None).unwrap();

        assert_eq!(at_origin, unanchored);
    }

    #[test]
    fn non_cartesian_scalars_require_a_point() {
        let system = CoordinateSystem::spherical();
        let result = CoordinateScalar::new(Expr::symbol("r"), system, None);
        assert!(matches!(result, Err(VectorError::MissingPoint { .. })));
    }

    #[test]
    fn scalars_at_different_points_do_not_add() {
        let system = CoordinateSystem::spherical();
        let here = CoordinateScalar::new(
            Expr::symbol("r"),
            system.clone(),
            Some(AppliedPoint::new(
                [Expr::one(), Expr::zero(), Expr::zero()],
                system.clone(),
            )),
        )
        .unwrap();
        let there = CoordinateScalar::new(
            Expr::symbol("r"),
            system.clone(),
            Some(AppliedPoint::new(
                [Expr::integer(2), Expr::zero(), Expr::zero()],
                system,
            )),
        )
        .unwrap();

        assert_eq!(here.checked_add(&there), Err(VectorError::IncompatiblePoints));
    }
}
