use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::{Div, Mul};

/// The physical dimension of a quantity, stored as exact integer powers of the base quantities.
///
/// Two quantities can be added or compared only if their dimensions are equal; multiplying or
/// dividing quantities adds or subtracts the corresponding powers. [`Dimension`] implements
/// [`Mul`] and [`Div`] with exactly those semantics, and common derived dimensions are provided
/// as associated constants.
///
/// The base quantities are length `L`, mass `M`, time `T`, electric current `I`, thermodynamic
/// temperature `Θ`, and plane angle `A`. Angle is tracked as a base quantity of its own so that
/// angular coordinates stay distinct from plain dimensionless ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// The power of length.
    length: i8,

    /// The power of mass.
    mass: i8,

    /// The power of time.
    time: i8,

    /// The power of electric current.
    current: i8,

    /// The power of thermodynamic temperature.
    temperature: i8,

    /// The power of plane angle.
    angle: i8,
}

impl Dimension {
    /// A pure number; every base power is zero.
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0, 0);

    /// Plane angle. Distinct from [`DIMENSIONLESS`](Self::DIMENSIONLESS).
    pub const ANGLE: Self = Self::new(0, 0, 0, 0, 0, 1);

    /// Length, `L`.
    pub const LENGTH: Self = Self::new(1, 0, 0, 0, 0, 0);

    /// Mass, `M`.
    pub const MASS: Self = Self::new(0, 1, 0, 0, 0, 0);

    /// Time, `T`.
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0, 0);

    /// Electric current, `I`.
    pub const CURRENT: Self = Self::new(0, 0, 0, 1, 0, 0);

    /// Thermodynamic temperature, `Θ`.
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 1, 0);

    /// Area, `L^2`.
    pub const AREA: Self = Self::new(2, 0, 0, 0, 0, 0);

    /// Volume, `L^3`.
    pub const VOLUME: Self = Self::new(3, 0, 0, 0, 0, 0);

    /// Velocity, `L T^-1`.
    pub const VELOCITY: Self = Self::new(1, 0, -1, 0, 0, 0);

    /// Acceleration, `L T^-2`.
    pub const ACCELERATION: Self = Self::new(1, 0, -2, 0, 0, 0);

    /// Momentum, `M L T^-1`.
    pub const MOMENTUM: Self = Self::new(1, 1, -1, 0, 0, 0);

    /// Force, `M L T^-2`.
    pub const FORCE: Self = Self::new(1, 1, -2, 0, 0, 0);

    /// Energy, `M L^2 T^-2`.
    pub const ENERGY: Self = Self::new(2, 1, -2, 0, 0, 0);

    /// Power, `M L^2 T^-3`.
    pub const POWER: Self = Self::new(2, 1, -3, 0, 0, 0);

    /// Pressure, `M L^-1 T^-2`.
    pub const PRESSURE: Self = Self::new(-1, 1, -2, 0, 0, 0);

    /// Frequency, `T^-1`.
    pub const FREQUENCY: Self = Self::new(0, 0, -1, 0, 0, 0);

    /// Electric charge, `I T`.
    pub const CHARGE: Self = Self::new(0, 0, 1, 1, 0, 0);

    /// Angular velocity, `A T^-1`.
    pub const ANGULAR_VELOCITY: Self = Self::new(0, 0, -1, 0, 0, 1);

    /// Creates a dimension with the given powers of length, mass, time, current, temperature,
    /// and angle, in that order.
    pub const fn new(
        length: i8,
        mass: i8,
        time: i8,
        current: i8,
        temperature: i8,
        angle: i8,
    ) -> Self {
        Self { length, mass, time, current, temperature, angle }
    }

    /// Raises every base power to the given integer power.
    pub const fn powi(self, n: i8) -> Self {
        Self {
            length: self.length * n,
            mass: self.mass * n,
            time: self.time * n,
            current: self.current * n,
            temperature: self.temperature * n,
            angle: self.angle * n,
        }
    }

    /// Returns true if every base power is zero, **including** the angle power.
    pub const fn is_dimensionless(self) -> bool {
        self.length == 0
            && self.mass == 0
            && self.time == 0
            && self.current == 0
            && self.temperature == 0
            && self.angle == 0
    }

    /// The powers paired with their display symbols, in display order.
    fn powers(self) -> [(char, i8); 6] {
        [
            ('L', self.length),
            ('M', self.mass),
            ('T', self.time),
            ('I', self.current),
            ('Θ', self.temperature),
            ('A', self.angle),
        ]
    }
}

/// Multiplying two quantities adds their base powers.
impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            length: self.length + rhs.length,
            mass: self.mass + rhs.mass,
            time: self.time + rhs.time,
            current: self.current + rhs.current,
            temperature: self.temperature + rhs.temperature,
            angle: self.angle + rhs.angle,
        }
    }
}

/// Dividing two quantities subtracts their base powers.
impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.powi(-1)
    }
}

/// Formats the dimension as space-separated base symbols with their powers, e.g. `L T^-2` for
/// acceleration. The dimensionless dimension is formatted as `1`.
impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        let mut first = true;
        for (symbol, power) in self.powers() {
            if power == 0 {
                continue;
            }

            if !first {
                write!(f, " ")?;
            }
            first = false;

            write!(f, "{}", symbol)?;
            if power != 1 {
                write!(f, "^{}", power)?;
            }
        }

        Ok(())
    }
}

/// Error returned when an operation combines two quantities of incompatible dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// The dimension the operation required.
    pub expected: Dimension,

    /// The dimension that was actually supplied.
    pub found: Dimension,

    /// A short description of the operand, used in the error message.
    pub context: String,
}

impl DimensionMismatch {
    /// Creates a new mismatch error for the operand described by `context`.
    pub fn new(expected: Dimension, found: Dimension, context: impl Into<String>) -> Self {
        Self { expected, found, context: context.into() }
    }
}

impl Display for DimensionMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "dimension mismatch in {}: expected `{}`, found `{}`",
            self.context, self.expected, self.found
        )
    }
}

impl Error for DimensionMismatch {}
