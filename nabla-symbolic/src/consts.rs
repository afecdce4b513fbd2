//! Floating-point values of named mathematical constants, at the working precision.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// The ratio of a circle's circumference to its diameter.
pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());
