//! Differential operators over coordinate-bound fields.
//!
//! Every operator follows the same shape: construct it with its input, then call `doit` to
//! evaluate. The formulas are the standard ones for orthogonal curvilinear systems, written in
//! terms of the scale factors `h_i`. Intermediate products with the scale factors are
//! simplified before differentiating, and every result is bound to the point of application of
//! the input.

use nabla_symbolic::derivative::derivative;
use nabla_symbolic::expr::Expr;
use nabla_symbolic::simplify;
use crate::algebra::{AtomicVector, VectorExpr};
use crate::coords::scalar::CoordinateScalar;
use crate::coords::vector::{combine_coordinate_vectors, CoordinateVector};
use crate::error::VectorError;

/// Cyclic index triples `(i, j, k)` over the three coordinates.
const CYCLIC: [(usize, usize, usize); 3] = [(0, 1, 2), (1, 2, 0), (2, 0, 1)];

/// A scalar input to the gradient: either a coordinate-bound scalar or a free expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarInput {
    Bound(CoordinateScalar),
    Free(Expr),
}

impl From<CoordinateScalar> for ScalarInput {
    fn from(scalar: CoordinateScalar) -> Self {
        Self::Bound(scalar)
    }
}

impl From<Expr> for ScalarInput {
    fn from(expr: Expr) -> Self {
        Self::Free(expr)
    }
}

/// The gradient of a scalar field.
///
/// Component `i` of the gradient is `(1 / h_i) df/dq_i`. A free expression carries no
/// coordinate dependence, so its gradient is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorGradient {
    input: ScalarInput,
}

impl VectorGradient {
    pub fn new(input: impl Into<ScalarInput>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Evaluates the gradient as a vector bound to the input's system and point.
    pub fn doit(&self) -> Result<VectorExpr, VectorError> {
        let scalar = match &self.input {
            ScalarInput::Bound(scalar) => scalar,
            ScalarInput::Free(_) => return Ok(VectorExpr::Zero),
        };

        let system = scalar.system();
        let lame = system.lame_coefficients();
        let component = |i: usize| -> Result<Expr, VectorError> {
            let slope = derivative(scalar.value(), system.base_scalars()[i].name())?;
            Ok(simplify(&Expr::fraction(slope, lame[i].clone())))
        };

        CoordinateVector::new(
            [component(0)?, component(1)?, component(2)?],
            system.clone(),
            Some(scalar.point().clone()),
        )
    }
}

/// The divergence of a vector field.
///
/// The field must reduce to a single coordinate-bound vector. The divergence is then
/// `(1 / (h_1 h_2 h_3)) * sum_i d(h_j h_k v_i)/dq_i` over cyclic `(i, j, k)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDivergence {
    vector: VectorExpr,
}

impl VectorDivergence {
    pub fn new(vector: VectorExpr) -> Self {
        Self { vector }
    }

    /// Evaluates the divergence as a scalar bound to the field's system and point.
    pub fn doit(&self) -> Result<CoordinateScalar, VectorError> {
        let vector = bound_field(&self.vector)?;
        let system = vector.system().clone();
        let scalars = system.base_scalars();
        let lame = system.lame_coefficients();

        let mut flux = Expr::zero();
        for (i, j, k) in CYCLIC {
            let scaled = simplify(&(lame[j].clone()
                * lame[k].clone()
                * vector.components()[i].clone()));
            flux = flux + derivative(&scaled, scalars[i].name())?;
        }

        let volume = lame[0].clone() * lame[1].clone() * lame[2].clone();
        let value = simplify(&Expr::fraction(flux, volume));
        CoordinateScalar::new(value, system.clone(), Some(vector.point().clone()))
    }
}

/// The curl of a vector field.
///
/// The field must reduce to a single coordinate-bound vector. Component `i` of the curl is
/// `(d(h_k v_k)/dq_j - d(h_j v_j)/dq_k) / (h_j h_k)` over cyclic `(i, j, k)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorCurl {
    vector: VectorExpr,
}

impl VectorCurl {
    pub fn new(vector: VectorExpr) -> Self {
        Self { vector }
    }

    /// Evaluates the curl as a vector bound to the field's system and point.
    pub fn doit(&self) -> Result<VectorExpr, VectorError> {
        let vector = bound_field(&self.vector)?;
        let system = vector.system().clone();
        let scalars = system.base_scalars();
        let lame = system.lame_coefficients();

        let scaled = |i: usize| simplify(&(lame[i].clone() * vector.components()[i].clone()));
        let component = |(_, j, k): (usize, usize, usize)| -> Result<Expr, VectorError> {
            let circulation = derivative(&scaled(k), scalars[j].name())?
                - derivative(&scaled(j), scalars[k].name())?;
            Ok(simplify(&Expr::fraction(
                circulation,
                lame[j].clone() * lame[k].clone(),
            )))
        };

        CoordinateVector::new(
            [
                component(CYCLIC[0])?,
                component(CYCLIC[1])?,
                component(CYCLIC[2])?,
            ],
            system.clone(),
            Some(vector.point().clone()),
        )
    }
}

/// The Laplacian of a coordinate-bound scalar field.
///
/// Computed directly as `(1 / (h_1 h_2 h_3)) * sum_i d((h_j h_k / h_i) df/dq_i)/dq_i` over
/// cyclic `(i, j, k)`, the closed form of the divergence of the gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorLaplacian {
    scalar: CoordinateScalar,
}

impl VectorLaplacian {
    pub fn new(scalar: CoordinateScalar) -> Self {
        Self { scalar }
    }

    /// Evaluates the Laplacian as a scalar bound to the input's system and point.
    pub fn doit(&self) -> Result<CoordinateScalar, VectorError> {
        let system = self.scalar.system();
        let scalars = system.base_scalars();
        let lame = system.lame_coefficients();

        let mut flux = Expr::zero();
        for (i, j, k) in CYCLIC {
            let slope = derivative(self.scalar.value(), scalars[i].name())?;
            let scaled = simplify(&(Expr::fraction(
                lame[j].clone() * lame[k].clone(),
                lame[i].clone(),
            ) * slope));
            flux = flux + derivative(&scaled, scalars[i].name())?;
        }

        let volume = lame[0].clone() * lame[1].clone() * lame[2].clone();
        let value = simplify(&Expr::fraction(flux, volume));
        CoordinateScalar::new(value, system.clone(), Some(self.scalar.point().clone()))
    }
}

/// Combines the expression and extracts the single coordinate-bound vector it reduces to.
fn bound_field(expr: &VectorExpr) -> Result<CoordinateVector, VectorError> {
    match combine_coordinate_vectors(expr)? {
        VectorExpr::Atom(AtomicVector::Bound(vector)) => Ok(vector),
        _ => Err(VectorError::NotAVector),
    }
}
