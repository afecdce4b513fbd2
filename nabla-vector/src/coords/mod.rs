//! Orthogonal curvilinear coordinate systems.
//!
//! A [`CoordinateSystem`] names three [base scalars](BaseScalar) and relates them to Cartesian
//! space. The built-in systems carry their scale factors and base vectors in closed form, while
//! [`CoordinateSystem::custom`] derives both from a Cartesian transform, validating once at
//! construction that the transform is orthogonal. Systems are shared behind [`SystemRef`], the
//! handle every coordinate-bound value stores.
//!
//! The built-in cylindrical and spherical systems reuse the name `phi` for their azimuthal
//! scalar, and every Cartesian transform writes angles with the same `sin` / `cos` calls, so
//! base vector conversions between their bases reduce to closed trigonometric forms.

pub mod point;
pub mod scalar;
pub mod vector;

use nabla_symbolic::derivative::derivative;
use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use nabla_symbolic::substitute::substitute_all;
use nabla_units::Dimension;
use once_cell::unsync::OnceCell;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use crate::error::VectorError;

pub use point::AppliedPoint;
pub use scalar::{CoordinateScalar, Quantity};
pub use vector::CoordinateVector;

/// Shared handle to a coordinate system.
pub type SystemRef = Rc<CoordinateSystem>;

/// A 3x3 matrix of scalar expressions, indexed row first.
pub type Matrix3 = [[Expr; 3]; 3];

/// Identifies a coordinate system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemKind {
    Cartesian,
    Cylindrical,
    Spherical,

    /// A user-defined system with the given name.
    Custom(String),
}

impl Display for SystemKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Cartesian => write!(f, "cartesian"),
            Self::Cylindrical => write!(f, "cylindrical"),
            Self::Spherical => write!(f, "spherical"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// One of the three coordinates of a system, named and carrying a physical dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseScalar {
    name: String,
    dimension: Dimension,
}

impl BaseScalar {
    /// Creates a base scalar with the given name and physical dimension.
    pub fn new(name: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            name: name.into(),
            dimension,
        }
    }

    /// The name of the scalar.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The physical dimension of the scalar.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The scalar as a symbol expression.
    pub fn expr(&self) -> Expr {
        Expr::symbol(self.name.as_str())
    }
}

/// An orthogonal curvilinear coordinate system.
///
/// Equality is structural: two systems are the same when their kinds, base scalars, and
/// Cartesian transforms agree. Scale factors and base vectors derived from a transform are
/// cached per instance, so holding systems behind a shared [`SystemRef`] derives each at most
/// once.
#[derive(Debug)]
pub struct CoordinateSystem {
    kind: SystemKind,
    base_scalars: [BaseScalar; 3],
    transform: Option<[Expr; 3]>,
    jacobian: Option<Matrix3>,
    lame: OnceCell<[Expr; 3]>,
    rotation: OnceCell<Matrix3>,
}

impl CoordinateSystem {
    /// The Cartesian system with base scalars `x`, `y`, `z`.
    pub fn cartesian() -> SystemRef {
        let base_scalars = [
            BaseScalar::new("x", Dimension::LENGTH),
            BaseScalar::new("y", Dimension::LENGTH),
            BaseScalar::new("z", Dimension::LENGTH),
        ];
        let transform = [
            base_scalars[0].expr(),
            base_scalars[1].expr(),
            base_scalars[2].expr(),
        ];
        let identity = [
            [Expr::one(), Expr::zero(), Expr::zero()],
            [Expr::zero(), Expr::one(), Expr::zero()],
            [Expr::zero(), Expr::zero(), Expr::one()],
        ];

        Rc::new(Self {
            kind: SystemKind::Cartesian,
            base_scalars,
            transform: Some(transform),
            jacobian: None,
            lame: OnceCell::from([Expr::one(), Expr::one(), Expr::one()]),
            rotation: OnceCell::from(identity),
        })
    }

    /// The cylindrical system with base scalars `rho`, `phi`, `z`.
    pub fn cylindrical() -> SystemRef {
        let rho = BaseScalar::new("rho", Dimension::LENGTH);
        let phi = BaseScalar::new("phi", Dimension::ANGLE);
        let z = BaseScalar::new("z", Dimension::LENGTH);

        let cos_phi = Expr::call("cos", vec![phi.expr()]);
        let sin_phi = Expr::call("sin", vec![phi.expr()]);
        let transform = [
            rho.expr() * cos_phi.clone(),
            rho.expr() * sin_phi.clone(),
            z.expr(),
        ];
        let lame = [Expr::one(), rho.expr(), Expr::one()];
        let rotation = [
            [cos_phi.clone(), sin_phi.clone(), Expr::zero()],
            [-sin_phi, cos_phi, Expr::zero()],
            [Expr::zero(), Expr::zero(), Expr::one()],
        ];

        Rc::new(Self {
            kind: SystemKind::Cylindrical,
            base_scalars: [rho, phi, z],
            transform: Some(transform),
            jacobian: None,
            lame: OnceCell::from(lame),
            rotation: OnceCell::from(rotation),
        })
    }

    /// The spherical system with base scalars `r`, `theta`, `phi`.
    ///
    /// `theta` is the polar angle measured from the `z` axis and `phi` the azimuthal angle,
    /// shared with the cylindrical system.
    pub fn spherical() -> SystemRef {
        let r = BaseScalar::new("r", Dimension::LENGTH);
        let theta = BaseScalar::new("theta", Dimension::ANGLE);
        let phi = BaseScalar::new("phi", Dimension::ANGLE);

        let cos_theta = Expr::call("cos", vec![theta.expr()]);
        let sin_theta = Expr::call("sin", vec![theta.expr()]);
        let cos_phi = Expr::call("cos", vec![phi.expr()]);
        let sin_phi = Expr::call("sin", vec![phi.expr()]);

        let transform = [
            r.expr() * sin_theta.clone() * cos_phi.clone(),
            r.expr() * sin_theta.clone() * sin_phi.clone(),
            r.expr() * cos_theta.clone(),
        ];
        let lame = [Expr::one(), r.expr(), r.expr() * sin_theta.clone()];
        let rotation = [
            [
                sin_theta.clone() * cos_phi.clone(),
                sin_theta.clone() * sin_phi.clone(),
                cos_theta.clone(),
            ],
            [
                cos_theta.clone() * cos_phi.clone(),
                cos_theta * sin_phi.clone(),
                -sin_theta,
            ],
            [-sin_phi, cos_phi, Expr::zero()],
        ];

        Rc::new(Self {
            kind: SystemKind::Spherical,
            base_scalars: [r, theta, phi],
            transform: Some(transform),
            jacobian: None,
            lame: OnceCell::from(lame),
            rotation: OnceCell::from(rotation),
        })
    }

    /// Creates a coordinate system from a Cartesian transform.
    ///
    /// `transform` gives Cartesian `(x, y, z)` as expressions in the base scalars. The base
    /// scalar names must be distinct and the columns of the transform's Jacobian must be
    /// mutually orthogonal; both are checked here, while scale factors and base vectors are
    /// derived on first use.
    pub fn custom(
        name: impl Into<String>,
        base_scalars: [BaseScalar; 3],
        transform: [Expr; 3],
    ) -> Result<SystemRef, VectorError> {
        check_distinct_names(&base_scalars)?;

        let entry = |row: usize, column: usize| -> Result<Expr, VectorError> {
            Ok(simplify(&derivative(&transform[row], base_scalars[column].name())?))
        };
        let jacobian = [
            [entry(0, 0)?, entry(0, 1)?, entry(0, 2)?],
            [entry(1, 0)?, entry(1, 1)?, entry(1, 2)?],
            [entry(2, 0)?, entry(2, 1)?, entry(2, 2)?],
        ];

        for a in 0..3 {
            for b in (a + 1)..3 {
                let product = simplify(&(
                    jacobian[0][a].clone() * jacobian[0][b].clone()
                        + jacobian[1][a].clone() * jacobian[1][b].clone()
                        + jacobian[2][a].clone() * jacobian[2][b].clone()
                ));
                if !product.is_zero() {
                    return Err(VectorError::InvalidSystem(format!(
                        "base vectors along `{}` and `{}` are not orthogonal",
                        base_scalars[a].name(),
                        base_scalars[b].name(),
                    )));
                }
            }
        }

        Ok(Rc::new(Self {
            kind: SystemKind::Custom(name.into()),
            base_scalars,
            transform: Some(transform),
            jacobian: Some(jacobian),
            lame: OnceCell::new(),
            rotation: OnceCell::new(),
        }))
    }

    /// Creates a coordinate system directly from its scale factors.
    ///
    /// No Cartesian transform is attached, so operations that need base vectors, such as
    /// converting to another system's basis, are unavailable for the resulting system.
    pub fn custom_orthogonal(
        name: impl Into<String>,
        base_scalars: [BaseScalar; 3],
        scale_factors: [Expr; 3],
    ) -> Result<SystemRef, VectorError> {
        check_distinct_names(&base_scalars)?;

        Ok(Rc::new(Self {
            kind: SystemKind::Custom(name.into()),
            base_scalars,
            transform: None,
            jacobian: None,
            lame: OnceCell::from(scale_factors),
            rotation: OnceCell::new(),
        }))
    }

    /// The kind of the system.
    pub fn kind(&self) -> &SystemKind {
        &self.kind
    }

    /// True if this is the Cartesian system.
    pub fn is_cartesian(&self) -> bool {
        self.kind == SystemKind::Cartesian
    }

    /// The three base scalars in coordinate order.
    pub fn base_scalars(&self) -> &[BaseScalar; 3] {
        &self.base_scalars
    }

    /// The base scalars as symbol expressions.
    pub fn base_scalar_exprs(&self) -> [Expr; 3] {
        [
            self.base_scalars[0].expr(),
            self.base_scalars[1].expr(),
            self.base_scalars[2].expr(),
        ]
    }

    /// The Cartesian transform of the system, if it carries one.
    pub fn cartesian_transform(&self) -> Option<&[Expr; 3]> {
        self.transform.as_ref()
    }

    /// The Lamé coefficients (scale factors) of the system, in base scalar order.
    ///
    /// Built-in systems and systems built with
    /// [`custom_orthogonal`](Self::custom_orthogonal) carry these in closed form; systems built
    /// with [`custom`](Self::custom) derive them as the column norms of the transform's
    /// Jacobian on first use.
    pub fn lame_coefficients(&self) -> &[Expr; 3] {
        self.lame.get_or_init(|| {
            let Some(jacobian) = &self.jacobian else {
                unreachable!("systems without a transform carry explicit scale factors");
            };
            let norm = |column: usize| {
                let sum = square(&jacobian[0][column])
                    + square(&jacobian[1][column])
                    + square(&jacobian[2][column]);
                simplify(&Expr::call("sqrt", vec![sum]))
            };
            [norm(0), norm(1), norm(2)]
        })
    }

    /// The base vector matrix of the system.
    ///
    /// Row `i` holds the Cartesian components of the unit base vector along base scalar `i`.
    /// Derived systems compute this as the Jacobian columns divided by the scale factors;
    /// systems built from bare scale factors have no base vectors and return an error.
    pub fn base_vector_matrix(&self) -> Result<&Matrix3, VectorError> {
        if let Some(rotation) = self.rotation.get() {
            return Ok(rotation);
        }

        let Some(jacobian) = &self.jacobian else {
            return Err(VectorError::Unsupported(format!(
                "system `{}` has no cartesian transform to derive base vectors from",
                self.kind,
            )));
        };
        let lame = self.lame_coefficients();
        let row = |i: usize| {
            let entry =
                |j: usize| simplify(&Expr::fraction(jacobian[j][i].clone(), lame[i].clone()));
            [entry(0), entry(1), entry(2)]
        };
        Ok(self.rotation.get_or_init(|| [row(0), row(1), row(2)]))
    }

    /// The derivative of the base vectors with respect to `parameter`, written in this
    /// system's own basis.
    ///
    /// The base vector matrix is first bound to `point`, whose coordinates may depend on the
    /// parameter. Entry `(i, k)` of the result is the component along base vector `k` of the
    /// derivative of base vector `i`.
    pub fn diff_base_vector_matrix(
        &self,
        parameter: &str,
        point: &AppliedPoint,
    ) -> Result<Matrix3, VectorError> {
        let rotation = self.base_vector_matrix()?;
        let substitutions = point.substitutions();
        let bound = matrix_map(rotation, |entry| substitute_all(entry, &substitutions));

        let derived_entry = |i: usize, j: usize| -> Result<Expr, VectorError> {
            Ok(derivative(&bound[i][j], parameter)?)
        };
        let derived = [
            [derived_entry(0, 0)?, derived_entry(0, 1)?, derived_entry(0, 2)?],
            [derived_entry(1, 0)?, derived_entry(1, 1)?, derived_entry(1, 2)?],
            [derived_entry(2, 0)?, derived_entry(2, 1)?, derived_entry(2, 2)?],
        ];

        let product = |i: usize, k: usize| {
            simplify(&(derived[i][0].clone() * bound[k][0].clone()
                + derived[i][1].clone() * bound[k][1].clone()
                + derived[i][2].clone() * bound[k][2].clone()))
        };
        Ok([
            [product(0, 0), product(0, 1), product(0, 2)],
            [product(1, 0), product(1, 1), product(1, 2)],
            [product(2, 0), product(2, 1), product(2, 2)],
        ])
    }

    /// Expresses this system's base vectors in another system's basis.
    ///
    /// Entry `(i, k)` of the result is the component of this system's base vector `i` along
    /// the other system's base vector `k`. Both systems must carry base vectors, and base
    /// scalars with the same name are taken to refer to the same quantity.
    pub fn convert_base_vectors(&self, other: &CoordinateSystem) -> Result<Matrix3, VectorError> {
        let from = self.base_vector_matrix()?;
        let to = other.base_vector_matrix()?;

        let entry = |i: usize, k: usize| {
            simplify(&(from[i][0].clone() * to[k][0].clone()
                + from[i][1].clone() * to[k][1].clone()
                + from[i][2].clone() * to[k][2].clone()))
        };
        Ok([
            [entry(0, 0), entry(0, 1), entry(0, 2)],
            [entry(1, 0), entry(1, 1), entry(1, 2)],
            [entry(2, 0), entry(2, 1), entry(2, 2)],
        ])
    }
}

impl PartialEq for CoordinateSystem {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.base_scalars != other.base_scalars {
            return false;
        }
        match (&self.transform, &other.transform) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            (None, None) => self.lame.get() == other.lame.get(),
            _ => false,
        }
    }
}

impl Eq for CoordinateSystem {}

fn check_distinct_names(base_scalars: &[BaseScalar; 3]) -> Result<(), VectorError> {
    for a in 0..3 {
        for b in (a + 1)..3 {
            if base_scalars[a].name() == base_scalars[b].name() {
                return Err(VectorError::InvalidSystem(format!(
                    "base scalar `{}` appears more than once",
                    base_scalars[a].name(),
                )));
            }
        }
    }
    Ok(())
}

/// Resolves the point of application for a value bound to `system`.
///
/// Cartesian values are always rebound to the sentinel point. Other systems require an explicit
/// point belonging to the same system.
pub(crate) fn resolve_point(
    system: &SystemRef,
    point: Option<AppliedPoint>,
) -> Result<AppliedPoint, VectorError> {
    if let Some(point) = &point {
        if point.system() != system {
            return Err(VectorError::IncompatibleSystems);
        }
    }
    if system.is_cartesian() {
        return Ok(AppliedPoint::sentinel(Rc::clone(system)));
    }
    point.ok_or_else(|| VectorError::MissingPoint {
        system: system.kind.to_string(),
    })
}

pub(crate) fn square(expr: &Expr) -> Expr {
    Expr::Exp(Box::new(expr.clone()), Box::new(Expr::integer(2)))
}

fn matrix_map(matrix: &Matrix3, f: impl Fn(&Expr) -> Expr) -> Matrix3 {
    let row = |i: usize| [f(&matrix[i][0]), f(&matrix[i][1]), f(&matrix[i][2])];
    [row(0), row(1), row(2)]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exponent: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exponent)))
    }

    fn call(name: &str, arg: &str) -> Expr {
        Expr::call(name, vec![sym(arg)])
    }

    fn scalars(names: [&str; 3]) -> [BaseScalar; 3] {
        names.map(|name| BaseScalar::new(name, Dimension::DIMENSIONLESS))
    }

    #[test]
    fn builtin_scale_factors() {
        let cylindrical = CoordinateSystem::cylindrical();
        assert_eq!(
            cylindrical.lame_coefficients(),
            &[Expr::one(), sym("rho"), Expr::one()],
        );

        let spherical = CoordinateSystem::spherical();
        assert_eq!(
            spherical.lame_coefficients(),
            &[Expr::one(), sym("r"), sym("r") * call("sin", "theta")],
        );
    }

    #[test]
    fn derived_scale_factors_match_the_spherical_closed_form() {
        let scalars = [
            BaseScalar::new("r", Dimension::LENGTH),
            BaseScalar::new("theta", Dimension::ANGLE),
            BaseScalar::new("phi", Dimension::ANGLE),
        ];
        let transform = [
            sym("r") * call("sin", "theta") * call("cos", "phi"),
            sym("r") * call("sin", "theta") * call("sin", "phi"),
            sym("r") * call("cos", "theta"),
        ];
        let system = CoordinateSystem::custom("spherical2", scalars, transform).unwrap();

        assert_eq!(
            system.lame_coefficients(),
            &[Expr::one(), sym("r"), sym("r") * call("sin", "theta")],
        );
    }

    #[test]
    fn parabolic_scale_factors() {
        // x = u v, y = (v^2 - u^2) / 2, z = z
        let transform = [
            sym("u") * sym("v"),
            Expr::fraction(pow(sym("v"), 2) - pow(sym("u"), 2), Expr::integer(2)),
            sym("z"),
        ];
        let system =
            CoordinateSystem::custom("parabolic", scalars(["u", "v", "z"]), transform).unwrap();

        let radial = Expr::call("sqrt", vec![pow(sym("u"), 2) + pow(sym("v"), 2)]);
        assert_eq!(
            system.lame_coefficients(),
            &[radial.clone(), radial, Expr::one()],
        );
    }

    #[test]
    fn duplicate_base_scalars_are_rejected() {
        let result = CoordinateSystem::custom(
            "broken",
            scalars(["u", "u", "z"]),
            [sym("u"), sym("u"), sym("z")],
        );
        assert!(matches!(result, Err(VectorError::InvalidSystem(_))));
    }

    #[test]
    fn non_orthogonal_transforms_are_rejected() {
        // x = u + v makes the u and v directions overlap
        let result = CoordinateSystem::custom(
            "skew",
            scalars(["u", "v", "z"]),
            [sym("u") + sym("v"), sym("v"), sym("z")],
        );
        assert!(matches!(result, Err(VectorError::InvalidSystem(_))));
    }

    #[test]
    fn scale_factor_only_systems_have_no_base_vectors() {
        let factor = Expr::fraction(
            Expr::one(),
            pow(sym("u"), 2) + pow(sym("v"), 2) + pow(sym("w"), 2),
        );
        let system = CoordinateSystem::custom_orthogonal(
            "six_sphere",
            scalars(["u", "v", "w"]),
            [factor.clone(), factor.clone(), factor.clone()],
        )
        .unwrap();

        assert_eq!(system.lame_coefficients()[0], factor);
        assert!(matches!(
            system.base_vector_matrix(),
            Err(VectorError::Unsupported(_)),
        ));
    }

    #[test]
    fn cylindrical_base_vectors_in_cartesian_terms() {
        let cylindrical = CoordinateSystem::cylindrical();
        let cartesian = CoordinateSystem::cartesian();

        let matrix = cylindrical.convert_base_vectors(&cartesian).unwrap();
        assert_eq!(matrix, [
            [call("cos", "phi"), call("sin", "phi"), Expr::zero()],
            [-call("sin", "phi"), call("cos", "phi"), Expr::zero()],
            [Expr::zero(), Expr::zero(), Expr::one()],
        ]);
    }

    #[test]
    fn spherical_base_vectors_in_cylindrical_terms() {
        let spherical = CoordinateSystem::spherical();
        let cylindrical = CoordinateSystem::cylindrical();

        // the shared azimuth phi drops out entirely
        let matrix = spherical.convert_base_vectors(&cylindrical).unwrap();
        assert_eq!(matrix, [
            [call("sin", "theta"), Expr::zero(), call("cos", "theta")],
            [call("cos", "theta"), Expr::zero(), -call("sin", "theta")],
            [Expr::zero(), Expr::one(), Expr::zero()],
        ]);
    }

    #[test]
    fn rotating_base_vectors_differentiate_into_each_other() {
        let cylindrical = CoordinateSystem::cylindrical();
        let point = AppliedPoint::new(
            [sym("R"), sym("omega") * sym("t"), Expr::zero()],
            cylindrical.clone(),
        );

        let matrix = cylindrical.diff_base_vector_matrix("t", &point).unwrap();
        assert_eq!(matrix, [
            [Expr::zero(), sym("omega"), Expr::zero()],
            [-sym("omega"), Expr::zero(), Expr::zero()],
            [Expr::zero(), Expr::zero(), Expr::zero()],
        ]);
    }
}
