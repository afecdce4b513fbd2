//! Lookup tables mapping normalized angles to exact trigonometric values.

use crate::expr::Expr;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use super::consts::{input::*, output::*, ONE, ONE_HALF, ZERO};

/// A table entry: the magnitude of the function value at some angle, plus the sign to apply.
///
/// Keeping the sign out of band lets every distinct magnitude be allocated once in
/// [`consts::output`](super::consts::output) and shared by all four quadrants.
#[derive(PartialEq, Eq, Hash)]
pub struct TrigOut {
    /// The magnitude of the function value.
    pub output: &'static Expr,

    /// Whether to negate the output.
    pub neg: bool,
}

fn table<const N: usize>(
    entries: [(&'static Expr, &'static Expr, bool); N],
) -> HashMap<&'static Expr, TrigOut> {
    entries
        .into_iter()
        .map(|(input, output, neg)| (input, TrigOut { output, neg }))
        .collect()
}

/// Sine at every constructible angle, keyed by fraction of a turn.
pub static SIN_TABLE: Lazy<HashMap<&Expr, TrigOut>> = Lazy::new(|| table([
    (&ZERO, &ZERO, false),                      // sin(0) = 0
    (&ONE_TWELFTH, &ONE_HALF, false),           // sin(pi/6) = 1/2
    (&ONE_EIGHTH, &SQRT_TWO_HALF, false),       // sin(pi/4) = sqrt(2)/2
    (&ONE_SIXTH, &SQRT_THREE_HALF, false),      // sin(pi/3) = sqrt(3)/2
    (&ONE_FOURTH, &ONE, false),                 // sin(pi/2) = 1
    (&ONE_THIRD, &SQRT_THREE_HALF, false),      // sin(2pi/3) = sqrt(3)/2
    (&THREE_EIGHTS, &SQRT_TWO_HALF, false),     // sin(3pi/4) = sqrt(2)/2
    (&FIVE_TWELFTHS, &ONE_HALF, false),         // sin(5pi/6) = 1/2
    (&ONE_HALF, &ZERO, false),                  // sin(pi) = 0
    (&SEVEN_TWELFTHS, &ONE_HALF, true),         // sin(7pi/6) = -1/2
    (&FIVE_EIGHTHS, &SQRT_TWO_HALF, true),      // sin(5pi/4) = -sqrt(2)/2
    (&TWO_THIRDS, &SQRT_THREE_HALF, true),      // sin(4pi/3) = -sqrt(3)/2
    (&THREE_FOURTHS, &ONE, true),               // sin(3pi/2) = -1
    (&FIVE_SIXTHS, &SQRT_THREE_HALF, true),     // sin(5pi/3) = -sqrt(3)/2
    (&SEVEN_EIGHTHS, &SQRT_TWO_HALF, true),     // sin(7pi/4) = -sqrt(2)/2
    (&ELEVEN_TWELFTHS, &ONE_HALF, true),        // sin(11pi/6) = -1/2
]));

/// Cosine at every constructible angle, keyed by fraction of a turn.
pub static COS_TABLE: Lazy<HashMap<&Expr, TrigOut>> = Lazy::new(|| table([
    (&ZERO, &ONE, false),                       // cos(0) = 1
    (&ONE_TWELFTH, &SQRT_THREE_HALF, false),    // cos(pi/6) = sqrt(3)/2
    (&ONE_EIGHTH, &SQRT_TWO_HALF, false),       // cos(pi/4) = sqrt(2)/2
    (&ONE_SIXTH, &ONE_HALF, false),             // cos(pi/3) = 1/2
    (&ONE_FOURTH, &ZERO, false),                // cos(pi/2) = 0
    (&ONE_THIRD, &ONE_HALF, true),              // cos(2pi/3) = -1/2
    (&THREE_EIGHTS, &SQRT_TWO_HALF, true),      // cos(3pi/4) = -sqrt(2)/2
    (&FIVE_TWELFTHS, &SQRT_THREE_HALF, true),   // cos(5pi/6) = -sqrt(3)/2
    (&ONE_HALF, &ONE, true),                    // cos(pi) = -1
    (&SEVEN_TWELFTHS, &SQRT_THREE_HALF, true),  // cos(7pi/6) = -sqrt(3)/2
    (&FIVE_EIGHTHS, &SQRT_TWO_HALF, true),      // cos(5pi/4) = -sqrt(2)/2
    (&TWO_THIRDS, &ONE_HALF, true),             // cos(4pi/3) = -1/2
    (&THREE_FOURTHS, &ZERO, false),             // cos(3pi/2) = 0
    (&FIVE_SIXTHS, &ONE_HALF, false),           // cos(5pi/3) = 1/2
    (&SEVEN_EIGHTHS, &SQRT_TWO_HALF, false),    // cos(7pi/4) = sqrt(2)/2
    (&ELEVEN_TWELFTHS, &SQRT_THREE_HALF, false), // cos(11pi/6) = sqrt(3)/2
]));

/// Tangent at every constructible angle where it is defined, keyed by fraction of a turn.
///
/// `pi/2` and `3pi/2` have no entry; the poles fall through the lookup untouched.
pub static TAN_TABLE: Lazy<HashMap<&Expr, TrigOut>> = Lazy::new(|| table([
    (&ZERO, &ZERO, false),                      // tan(0) = 0
    (&ONE_TWELFTH, &SQRT_THREE_THIRD, false),   // tan(pi/6) = sqrt(3)/3
    (&ONE_EIGHTH, &ONE, false),                 // tan(pi/4) = 1
    (&ONE_SIXTH, &SQRT_THREE, false),           // tan(pi/3) = sqrt(3)
    (&ONE_THIRD, &SQRT_THREE, true),            // tan(2pi/3) = -sqrt(3)
    (&THREE_EIGHTS, &ONE, true),                // tan(3pi/4) = -1
    (&FIVE_TWELFTHS, &SQRT_THREE_THIRD, true),  // tan(5pi/6) = -sqrt(3)/3
    (&ONE_HALF, &ZERO, false),                  // tan(pi) = 0
    (&SEVEN_TWELFTHS, &SQRT_THREE_THIRD, false), // tan(7pi/6) = sqrt(3)/3
    (&FIVE_EIGHTHS, &ONE, false),               // tan(5pi/4) = 1
    (&TWO_THIRDS, &SQRT_THREE, false),          // tan(4pi/3) = sqrt(3)
    (&FIVE_SIXTHS, &SQRT_THREE, true),          // tan(5pi/3) = -sqrt(3)
    (&SEVEN_EIGHTHS, &ONE, true),               // tan(7pi/4) = -1
    (&ELEVEN_TWELFTHS, &SQRT_THREE_THIRD, true), // tan(11pi/6) = -sqrt(3)/3
]));
