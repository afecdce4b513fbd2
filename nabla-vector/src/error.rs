//! Errors reported by vector construction, combination, and the differential operators.

use nabla_symbolic::derivative::DerivativeError;
use nabla_symbolic::integrate::IntegrateError;
use nabla_symbolic::solve::SolveError;
use nabla_units::DimensionMismatch;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Any error that can occur while building or manipulating vector expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Two quantities with incompatible physical dimensions were combined.
    Dimension(DimensionMismatch),

    /// A fixed norm evaluated to a negative number.
    NegativeNorm(String),

    /// A custom coordinate system failed validation. The message names the offending base
    /// scalars.
    InvalidSystem(String),

    /// A vector or scalar was bound to a non-Cartesian system without a point of application.
    MissingPoint {
        /// The name of the coordinate system that requires a point.
        system: String,
    },

    /// An integral was evaluated before bounds were attached to it.
    MissingBounds,

    /// Two coordinate-bound values anchored at different points of application were combined.
    IncompatiblePoints,

    /// Two coordinate-bound values from different coordinate systems were combined.
    IncompatibleSystems,

    /// An operation that requires a coordinate-bound vector received an expression that does not
    /// reduce to one.
    NotAVector,

    /// The operation is valid but falls outside what the library can currently express.
    Unsupported(String),
}

impl Display for VectorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Dimension(err) => err.fmt(f),
            Self::NegativeNorm(norm) => write!(f, "norm `{}` is negative", norm),
            Self::InvalidSystem(message) => write!(f, "invalid coordinate system: {}", message),
            Self::MissingPoint { system } => write!(
                f,
                "a point of application is required for values in the `{}` system",
                system,
            ),
            Self::MissingBounds => write!(f, "bounds must be attached before evaluating the integral"),
            Self::IncompatiblePoints => {
                write!(f, "cannot combine values applied at different points")
            },
            Self::IncompatibleSystems => {
                write!(f, "cannot combine values bound to different coordinate systems")
            },
            Self::NotAVector => write!(f, "a coordinate-bound vector is required"),
            Self::Unsupported(message) => write!(f, "unsupported operation: {}", message),
        }
    }
}

impl Error for VectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dimension(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DimensionMismatch> for VectorError {
    fn from(err: DimensionMismatch) -> Self {
        Self::Dimension(err)
    }
}

impl From<DerivativeError> for VectorError {
    fn from(err: DerivativeError) -> Self {
        Self::Unsupported(err.to_string())
    }
}

impl From<IntegrateError> for VectorError {
    fn from(err: IntegrateError) -> Self {
        Self::Unsupported(err.to_string())
    }
}

impl From<SolveError> for VectorError {
    fn from(err: SolveError) -> Self {
        Self::Unsupported(err.to_string())
    }
}
