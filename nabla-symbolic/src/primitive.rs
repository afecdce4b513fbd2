//! Shorthand constructors for arbitrary-precision numbers.

use rug::{Assign, Float, Integer};

/// Precision, in bits, of every [`Float`] this library creates.
pub const PRECISION: u32 = 512;

/// An arbitrary-precision integer with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// An arbitrary-precision float with the given value, at [`PRECISION`] bits.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}
