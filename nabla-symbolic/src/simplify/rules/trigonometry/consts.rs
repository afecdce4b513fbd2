//! Exact angles and values the trigonometric rules look up.

use crate::expr::Expr;
use once_cell::sync::Lazy;

fn frac(numerator: i32, denominator: i32) -> Expr {
    Expr::fraction(Expr::integer(numerator), Expr::integer(denominator))
}

/// The number one, wrapped in an [`Expr`].
pub static ONE: Lazy<Expr> = Lazy::new(Expr::one);

/// The number 1/2, wrapped in an [`Expr`].
pub static ONE_HALF: Lazy<Expr> = Lazy::new(|| frac(1, 2));

/// The number zero, wrapped in an [`Expr`].
pub static ZERO: Lazy<Expr> = Lazy::new(Expr::zero);

/// The constructible angles, written as fractions of a full turn.
///
/// Sine and cosine of these angles have closed forms built from square roots, which makes an
/// exact lookup table possible. Angles are keyed after dividing by `2pi`, so each key is a
/// plain rational between 0 and 1 and `pi` never appears in a key.
///
/// `0` and `pi` rad are deliberately absent here; the [`ZERO`] and [`ONE_HALF`] constants
/// above serve as their keys. Whole turns are normalized to `0` before lookup.
pub mod input {
    use super::*;

    /// pi/6 rad (30 deg), stored as 1/12 of a turn
    pub static ONE_TWELFTH: Lazy<Expr> = Lazy::new(|| frac(1, 12));

    /// pi/4 rad (45 deg), stored as 1/8 of a turn
    pub static ONE_EIGHTH: Lazy<Expr> = Lazy::new(|| frac(1, 8));

    /// pi/3 rad (60 deg), stored as 1/6 of a turn
    pub static ONE_SIXTH: Lazy<Expr> = Lazy::new(|| frac(1, 6));

    /// pi/2 rad (90 deg), stored as 1/4 of a turn
    pub static ONE_FOURTH: Lazy<Expr> = Lazy::new(|| frac(1, 4));

    /// 2pi/3 rad (120 deg), stored as 1/3 of a turn
    pub static ONE_THIRD: Lazy<Expr> = Lazy::new(|| frac(1, 3));

    /// 3pi/4 rad (135 deg), stored as 3/8 of a turn
    pub static THREE_EIGHTS: Lazy<Expr> = Lazy::new(|| frac(3, 8));

    /// 5pi/6 rad (150 deg), stored as 5/12 of a turn
    pub static FIVE_TWELFTHS: Lazy<Expr> = Lazy::new(|| frac(5, 12));

    // below the x axis from here on

    /// 7pi/6 rad (210 deg), stored as 7/12 of a turn
    pub static SEVEN_TWELFTHS: Lazy<Expr> = Lazy::new(|| frac(7, 12));

    /// 5pi/4 rad (225 deg), stored as 5/8 of a turn
    pub static FIVE_EIGHTHS: Lazy<Expr> = Lazy::new(|| frac(5, 8));

    /// 4pi/3 rad (240 deg), stored as 2/3 of a turn
    pub static TWO_THIRDS: Lazy<Expr> = Lazy::new(|| frac(2, 3));

    /// 3pi/2 rad (270 deg), stored as 3/4 of a turn
    pub static THREE_FOURTHS: Lazy<Expr> = Lazy::new(|| frac(3, 4));

    /// 5pi/3 rad (300 deg), stored as 5/6 of a turn
    pub static FIVE_SIXTHS: Lazy<Expr> = Lazy::new(|| frac(5, 6));

    /// 7pi/4 rad (315 deg), stored as 7/8 of a turn
    pub static SEVEN_EIGHTHS: Lazy<Expr> = Lazy::new(|| frac(7, 8));

    /// 11pi/6 rad (330 deg), stored as 11/12 of a turn
    pub static ELEVEN_TWELFTHS: Lazy<Expr> = Lazy::new(|| frac(11, 12));
}

/// The closed-form values sine and cosine take at the constructible angles.
///
/// `0`, `1/2`, and `1` are deliberately absent here; the [`ZERO`], [`ONE_HALF`], and [`ONE`]
/// constants above serve in their place.
pub mod output {
    use super::*;

    fn root_over(radicand: i32, denominator: i32) -> Expr {
        Expr::fraction(Expr::integer(radicand).sqrt(), Expr::integer(denominator))
    }

    /// sqrt(2)/2
    pub static SQRT_TWO_HALF: Lazy<Expr> = Lazy::new(|| root_over(2, 2));

    /// sqrt(3)/2
    pub static SQRT_THREE_HALF: Lazy<Expr> = Lazy::new(|| root_over(3, 2));

    /// sqrt(3)/3
    pub static SQRT_THREE_THIRD: Lazy<Expr> = Lazy::new(|| root_over(3, 3));

    /// sqrt(3)
    pub static SQRT_THREE: Lazy<Expr> = Lazy::new(|| Expr::integer(3).sqrt());
}
