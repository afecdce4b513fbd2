//! Physical dimension bookkeeping for symbolic vector calculus.
//!
//! This crate tracks the **dimension** of a quantity (length, velocity, force, ...) as exact
//! integer powers of six base quantities, without committing to any particular unit of
//! measurement. It exists so that the vector layer can reject physically meaningless
//! combinations, such as adding a force-valued vector to a length-valued one, before any
//! symbolic work is done.
//!
//! Plane angle is deliberately tracked as its own base quantity, even though it is physically
//! dimensionless. Angular coordinates (the `phi` of a cylindrical system, say) must not be
//! interchangeable with plain ratios when dimensions are checked.
//!
//! ```
//! use nabla_units::Dimension;
//!
//! let velocity = Dimension::LENGTH / Dimension::TIME;
//! assert_eq!(velocity, Dimension::VELOCITY);
//! assert_eq!(velocity.to_string(), "L T^-1");
//! ```

pub mod dimension;

pub use dimension::{Dimension, DimensionMismatch};
