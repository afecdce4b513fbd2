//! Points of application.

use nabla_symbolic::expr::Expr;
use std::collections::HashMap;
use super::SystemRef;

/// Concrete coordinate values pinning a bound value to a location in its coordinate system.
///
/// Non-Cartesian base vectors change direction from point to point, so coordinate-bound vectors
/// and scalars in those systems only combine when they are applied at the same point. Cartesian
/// values are always rebound to the [sentinel point](AppliedPoint::sentinel) and therefore
/// compare equal regardless of the point they were built with.
#[derive(Debug, Clone)]
pub struct AppliedPoint {
    coordinates: [Expr; 3],
    system: SystemRef,
}

impl AppliedPoint {
    /// Creates a point from coordinate values listed in base scalar order.
    pub fn new(coordinates: [Expr; 3], system: SystemRef) -> Self {
        Self { coordinates, system }
    }

    /// The point whose coordinates are the system's own base scalars.
    pub fn sentinel(system: SystemRef) -> Self {
        let coordinates = system.base_scalar_exprs();
        Self { coordinates, system }
    }

    /// The coordinate values in base scalar order.
    pub fn coordinates(&self) -> &[Expr; 3] {
        &self.coordinates
    }

    /// The coordinate system the point belongs to.
    pub fn system(&self) -> &SystemRef {
        &self.system
    }

    /// A substitution table mapping each base scalar name to its value at this point.
    pub(crate) fn substitutions(&self) -> HashMap<String, Expr> {
        self.system
            .base_scalars()
            .iter()
            .zip(&self.coordinates)
            .map(|(scalar, value)| (scalar.name().to_string(), value.clone()))
            .collect()
    }
}

impl PartialEq for AppliedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.system == other.system && self.coordinates == other.coordinates
    }
}

impl Eq for AppliedPoint {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::coords::CoordinateSystem;
    use super::*;

    #[test]
    fn sentinel_coordinates_are_the_base_scalars() {
        let system = CoordinateSystem::cylindrical();
        let point = AppliedPoint::sentinel(system);

        assert_eq!(
            point.coordinates(),
            &[Expr::symbol("rho"), Expr::symbol("phi"), Expr::symbol("z")],
        );
    }

    #[test]
    fn points_compare_by_coordinates() {
        let system = CoordinateSystem::cylindrical();
        let origin = AppliedPoint::new(
            [Expr::zero(), Expr::zero(), Expr::zero()],
            system.clone(),
        );
        let elsewhere = AppliedPoint::new(
            [Expr::one(), Expr::zero(), Expr::zero()],
            system.clone(),
        );

        assert_eq!(origin, AppliedPoint::new(
            [Expr::zero(), Expr::zero(), Expr::zero()],
            system,
        ));
        assert_ne!(origin, elsewhere);
    }
}
