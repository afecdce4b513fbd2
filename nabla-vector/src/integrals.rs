//! Line and surface integrals over coordinate-bound fields.
//!
//! A [`Curve`] or [`Surface`] is a point of application whose coordinates depend on one or two
//! parameters. Integrals are built without bounds and evaluated with [`LineIntegral::doit`] or
//! [`SurfaceIntegral::doit`] once bounds are attached; evaluating without bounds is an error.
//!
//! Scalar integrands may mention the symbolic elements [`arc_length_element`] and
//! [`area_element`], which evaluation replaces with the metric expression of the concrete curve
//! or surface. Vector integrands are reduced to a single coordinate-bound vector and contracted
//! with the tangent or normal of the parametrization, so line integrals of fields compute work
//! and surface integrals of fields compute flux.

use nabla_symbolic::derivative::derivative;
use nabla_symbolic::expr::Expr;
use nabla_symbolic::integrate::definite_integral;
use nabla_symbolic::simplify;
use nabla_symbolic::substitute::{substitute, substitute_all};
use std::collections::HashMap;
use crate::algebra::{AtomicVector, VectorExpr};
use crate::coords::vector::{combine_coordinate_vectors, cross_components};
use crate::coords::{square, AppliedPoint, SystemRef};
use crate::error::VectorError;

const ARC_LENGTH: &str = "ds";
const AREA: &str = "dS";

/// The symbolic arc length element `ds` of a scalar line integrand.
pub fn arc_length_element() -> Expr {
    Expr::symbol(ARC_LENGTH)
}

/// The symbolic area element `dS` of a scalar surface integrand.
pub fn area_element() -> Expr {
    Expr::symbol(AREA)
}

/// A parametrized path through a coordinate system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    parameter: String,
    point: AppliedPoint,
}

impl Curve {
    /// Creates a curve whose coordinates, listed in base scalar order, depend on `parameter`.
    pub fn new(parameter: impl Into<String>, coordinates: [Expr; 3], system: SystemRef) -> Self {
        Self {
            parameter: parameter.into(),
            point: AppliedPoint::new(coordinates, system),
        }
    }

    /// The name of the curve parameter.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// The moving point of application traced by the curve.
    pub fn point(&self) -> &AppliedPoint {
        &self.point
    }
}

/// A parametrized patch of a coordinate system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    parameters: (String, String),
    point: AppliedPoint,
}

impl Surface {
    /// Creates a surface whose coordinates, listed in base scalar order, depend on the two
    /// named parameters.
    pub fn new(
        parameters: (impl Into<String>, impl Into<String>),
        coordinates: [Expr; 3],
        system: SystemRef,
    ) -> Self {
        Self {
            parameters: (parameters.0.into(), parameters.1.into()),
            point: AppliedPoint::new(coordinates, system),
        }
    }

    /// The names of the surface parameters.
    pub fn parameters(&self) -> (&str, &str) {
        (&self.parameters.0, &self.parameters.1)
    }

    /// The moving point of application traced by the surface.
    pub fn point(&self) -> &AppliedPoint {
        &self.point
    }
}

/// What is being integrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Integrand {
    /// A scalar expression, integrated as given.
    Scalar(Expr),

    /// A vector expression, contracted with the tangent or normal before integrating.
    Vector(VectorExpr),
}

impl From<Expr> for Integrand {
    fn from(expr: Expr) -> Self {
        Self::Scalar(expr)
    }
}

impl From<VectorExpr> for Integrand {
    fn from(expr: VectorExpr) -> Self {
        Self::Vector(expr)
    }
}

/// An integral along a [`Curve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIntegral {
    integrand: Integrand,
    curve: Curve,
    bounds: Option<(Expr, Expr)>,
}

impl LineIntegral {
    /// Creates an unbounded integral of the integrand along the curve.
    pub fn new(integrand: impl Into<Integrand>, curve: Curve) -> Self {
        Self {
            integrand: integrand.into(),
            curve,
            bounds: None,
        }
    }

    /// Attaches parameter bounds to the integral.
    pub fn with_bounds(mut self, lower: Expr, upper: Expr) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Evaluates the integral.
    ///
    /// Scalar integrands are restricted to the curve and have [`arc_length_element`] replaced
    /// by `sqrt(sum of (h_i dq_i/dt)^2)`. Vector integrands are contracted with the curve's
    /// tangent, yielding the work `sum of F_i h_i dq_i/dt`.
    pub fn doit(&self) -> Result<Expr, VectorError> {
        let Some((lower, upper)) = &self.bounds else {
            return Err(VectorError::MissingBounds);
        };

        let parameter = self.curve.parameter.as_str();
        let system = self.curve.point.system().clone();
        let substitutions = self.curve.point.substitutions();
        let velocity = velocity_components(self.curve.point.coordinates(), parameter)?;
        let scale = bound_scale_factors(&system, &substitutions);

        let integrand = match &self.integrand {
            Integrand::Scalar(expr) => {
                let mut squared = Expr::zero();
                for i in 0..3 {
                    squared += square(&simplify(&(scale[i].clone() * velocity[i].clone())));
                }
                let length = simplify(&Expr::call("sqrt", vec![squared]));

                let on_curve = substitute_all(expr, &substitutions);
                substitute(&on_curve, ARC_LENGTH, &length)
            },
            Integrand::Vector(field) => {
                let mut work = Expr::zero();
                if let Some(components) = bound_components(field, &system)? {
                    for i in 0..3 {
                        work += substitute_all(&components[i], &substitutions)
                            * scale[i].clone()
                            * velocity[i].clone();
                    }
                }
                simplify(&work)
            },
        };

        Ok(definite_integral(&integrand, parameter, lower, upper)?)
    }
}

/// An integral over a [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceIntegral {
    integrand: Integrand,
    surface: Surface,
    bounds: Option<((Expr, Expr), (Expr, Expr))>,
}

impl SurfaceIntegral {
    /// Creates an unbounded integral of the integrand over the surface.
    pub fn new(integrand: impl Into<Integrand>, surface: Surface) -> Self {
        Self {
            integrand: integrand.into(),
            surface,
            bounds: None,
        }
    }

    /// Attaches bounds for the two parameters, in the order they name the surface.
    pub fn with_bounds(mut self, first: (Expr, Expr), second: (Expr, Expr)) -> Self {
        self.bounds = Some((first, second));
        self
    }

    /// Evaluates the integral, integrating over the second parameter first.
    ///
    /// The normal of the parametrization is the cross product of the two scaled tangents.
    /// Scalar integrands have [`area_element`] replaced by the normal's length; vector
    /// integrands are contracted with the normal, yielding the flux through the surface.
    pub fn doit(&self) -> Result<Expr, VectorError> {
        let Some((first, second)) = &self.bounds else {
            return Err(VectorError::MissingBounds);
        };

        let system = self.surface.point.system().clone();
        let substitutions = self.surface.point.substitutions();
        let scale = bound_scale_factors(&system, &substitutions);

        let tangent = |parameter: &str| -> Result<[Expr; 3], VectorError> {
            let velocity = velocity_components(self.surface.point.coordinates(), parameter)?;
            Ok([
                simplify(&(scale[0].clone() * velocity[0].clone())),
                simplify(&(scale[1].clone() * velocity[1].clone())),
                simplify(&(scale[2].clone() * velocity[2].clone())),
            ])
        };
        let normal = cross_components(
            &tangent(&self.surface.parameters.0)?,
            &tangent(&self.surface.parameters.1)?,
        );
        let normal = [
            simplify(&normal[0]),
            simplify(&normal[1]),
            simplify(&normal[2]),
        ];

        let integrand = match &self.integrand {
            Integrand::Scalar(expr) => {
                let mut squared = Expr::zero();
                for component in &normal {
                    squared += square(component);
                }
                let area = simplify(&Expr::call("sqrt", vec![squared]));

                let on_surface = substitute_all(expr, &substitutions);
                substitute(&on_surface, AREA, &area)
            },
            Integrand::Vector(field) => {
                let mut flux = Expr::zero();
                if let Some(components) = bound_components(field, &system)? {
                    for i in 0..3 {
                        flux += substitute_all(&components[i], &substitutions)
                            * normal[i].clone();
                    }
                }
                simplify(&flux)
            },
        };

        let inner = definite_integral(
            &integrand,
            &self.surface.parameters.1,
            &second.0,
            &second.1,
        )?;
        Ok(definite_integral(&inner, &self.surface.parameters.0, &first.0, &first.1)?)
    }
}

/// The raw derivatives of the coordinates with respect to the parameter.
fn velocity_components(
    coordinates: &[Expr; 3],
    parameter: &str,
) -> Result<[Expr; 3], VectorError> {
    Ok([
        derivative(&coordinates[0], parameter)?,
        derivative(&coordinates[1], parameter)?,
        derivative(&coordinates[2], parameter)?,
    ])
}

/// The system's scale factors restricted to the parametrization.
fn bound_scale_factors(
    system: &SystemRef,
    substitutions: &HashMap<String, Expr>,
) -> [Expr; 3] {
    let lame = system.lame_coefficients();
    [
        substitute_all(&lame[0], substitutions),
        substitute_all(&lame[1], substitutions),
        substitute_all(&lame[2], substitutions),
    ]
}

/// Reduces a field to the components of a single vector bound to `system`.
///
/// A field that reduces to zero yields `None`, so the caller integrates nothing.
fn bound_components(
    field: &VectorExpr,
    system: &SystemRef,
) -> Result<Option<[Expr; 3]>, VectorError> {
    match combine_coordinate_vectors(field)? {
        VectorExpr::Zero => Ok(None),
        VectorExpr::Atom(AtomicVector::Bound(vector)) => {
            if vector.system() != system {
                return Err(VectorError::IncompatibleSystems);
            }
            Ok(Some(vector.components().clone()))
        },
        _ => Err(VectorError::NotAVector),
    }
}

#[cfg(test)]
mod tests {
    use nabla_units::Dimension;
    use pretty_assertions::assert_eq;

    use crate::coords::{CoordinateSystem, CoordinateVector};
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exponent: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exponent)))
    }

    fn x_axis() -> Curve {
        Curve::new(
            "t",
            [sym("t"), Expr::zero(), Expr::zero()],
            CoordinateSystem::cartesian(),
        )
    }

    #[test]
    fn arc_length_of_a_straight_segment() {
        let integral = LineIntegral::new(arc_length_element(), x_axis())
            .with_bounds(Expr::zero(), Expr::one());
        assert_eq!(integral.doit().unwrap(), Expr::one());
    }

    #[test]
    fn scalar_integrands_weight_by_arc_length() {
        // x ds over the segment from (0, 0, 0) to (1, 0, 0) is 1/2
        let integral = LineIntegral::new(sym("x") * arc_length_element(), x_axis())
            .with_bounds(Expr::zero(), Expr::one());
        assert_eq!(integral.doit().unwrap(), pow(Expr::integer(2), -1));
    }

    #[test]
    fn polynomial_integrands_integrate_termwise() {
        // (1 + x^2) ds over the same segment is 4/3
        let integrand = (Expr::one() + pow(sym("x"), 2)) * arc_length_element();
        let integral = LineIntegral::new(integrand, x_axis())
            .with_bounds(Expr::zero(), Expr::one());

        assert_eq!(
            integral.doit().unwrap(),
            Expr::Mul(vec![Expr::integer(4), pow(Expr::integer(3), -1)]),
        );
    }

    #[test]
    fn bounds_are_required() {
        let integral = LineIntegral::new(arc_length_element(), x_axis());
        assert_eq!(integral.doit(), Err(VectorError::MissingBounds));
    }

    #[test]
    fn work_along_a_circular_arc() {
        // the azimuthal field rho e_phi along the circle rho = R picks up h_phi = rho
        let system = CoordinateSystem::cylindrical();
        let field = CoordinateVector::new(
            [Expr::zero(), sym("rho"), Expr::zero()],
            system.clone(),
            Some(AppliedPoint::sentinel(system.clone())),
        )
        .unwrap();
        let circle = Curve::new(
            "t",
            [sym("R"), sym("t"), Expr::zero()],
            system,
        );

        let work = LineIntegral::new(field, circle)
            .with_bounds(Expr::zero(), Expr::integer(2) * sym("pi"))
            .doit()
            .unwrap();
        assert_eq!(
            work,
            Expr::Mul(vec![Expr::integer(2), sym("pi"), pow(sym("R"), 2)]),
        );
    }

    #[test]
    fn vector_integrands_must_be_coordinate_bound() {
        let field = VectorExpr::symbol("F", Dimension::DIMENSIONLESS);
        let integral = LineIntegral::new(field, x_axis())
            .with_bounds(Expr::zero(), Expr::one());
        assert_eq!(integral.doit(), Err(VectorError::NotAVector));
    }

    #[test]
    fn fields_must_match_the_curves_system() {
        let cylindrical = CoordinateSystem::cylindrical();
        let field = CoordinateVector::new(
            [Expr::one(), Expr::zero(), Expr::zero()],
            cylindrical.clone(),
            Some(AppliedPoint::sentinel(cylindrical)),
        )
        .unwrap();

        let integral = LineIntegral::new(field, x_axis())
            .with_bounds(Expr::zero(), Expr::one());
        assert_eq!(integral.doit(), Err(VectorError::IncompatibleSystems));
    }

    #[test]
    fn area_of_a_scaled_rectangle() {
        // the patch (t1 m, t2 m, 0) for t1 in [0, 2], t2 in [-3, 0] covers 6 m^2
        let patch = Surface::new(
            ("t1", "t2"),
            [sym("t1") * sym("m"), sym("t2") * sym("m"), Expr::zero()],
            CoordinateSystem::cartesian(),
        );

        let area = SurfaceIntegral::new(area_element(), patch)
            .with_bounds(
                (Expr::zero(), Expr::integer(2)),
                (Expr::integer(-3), Expr::zero()),
            )
            .doit()
            .unwrap();
        assert_eq!(area, Expr::Mul(vec![Expr::integer(6), pow(sym("m"), 2)]));
    }

    #[test]
    fn flux_through_a_sphere() {
        // the radial field r^2 e_r through the sphere r = R has flux 4 pi R^4
        let system = CoordinateSystem::spherical();
        let field = CoordinateVector::new(
            [pow(sym("r"), 2), Expr::zero(), Expr::zero()],
            system.clone(),
            Some(AppliedPoint::sentinel(system.clone())),
        )
        .unwrap();
        let sphere = Surface::new(
            ("theta", "phi"),
            [sym("R"), sym("theta"), sym("phi")],
            system,
        );

        let flux = SurfaceIntegral::new(field, sphere)
            .with_bounds(
                (Expr::zero(), sym("pi")),
                (Expr::zero(), Expr::integer(2) * sym("pi")),
            )
            .doit()
            .unwrap();
        assert_eq!(
            flux,
            Expr::Mul(vec![Expr::integer(4), sym("pi"), pow(sym("R"), 4)]),
        );
    }
}
