//! The expression tree that every symbolic routine in this crate manipulates.
//!
//! There is no surface syntax behind [`Expr`]. Expressions are assembled with the constructors
//! on [`Expr`] and the standard arithmetic operators, and sums and products keep themselves
//! flattened as they are built: `x + (y + z)` becomes one [`Expr::Add`] holding `x`, `y`, and
//! `z` as siblings.
//!
//! # Strict equality
//!
//! Deciding whether two expressions denote the same mathematical object is intractable in
//! general. `x^2 + 2x + 1` and `(x + 1)^2` name the same polynomial, but discovering that
//! takes exactly the kind of rewriting an equality check is supposed to gate, so rewriting in
//! terms of full mathematical equality is circular. The comparisons in this crate settle for
//! **strict equality**, a conservative subset of mathematical equality:
//!
//! - Both expressions are the same variant.
//! - Two [`Expr::Primary`]s hold equal values.
//! - Two [`Expr::Add`]s or two [`Expr::Mul`]s hold strictly equal children, in any order.
//! - Two [`Expr::Exp`]s have strictly equal bases and strictly equal exponents.
//!
//! Strict equality never reports a false positive and needs no simplification to compute, so
//! the simplifier can lean on it to decide which terms and factors merge. The [`PartialEq`]
//! impl for [`Expr`] is strict equality, not mathematical equality.

mod iter;

use crate::primitive::int;
use iter::ExprIter;
use rug::{Float, Integer};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};
use super::simplify::fraction::make_fraction;

/// An atomic operand: a number, a variable, or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An arbitrary-precision integer.
    Integer(Integer),

    /// An arbitrary-precision floating-point number.
    Float(Float),

    /// A variable, such as `x` or `theta`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `dot(a, b)`.
    Call(String, Vec<Expr>),
}

/// Floats hash through [`rug::float::OrdFloat`], their total-order view. Hashing agrees with
/// equality because no constructor in this crate produces a `NaN` or a negative zero.
impl std::hash::Hash for Primary {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => int.hash(state),
            Self::Float(float) => float.as_ord().hash(state),
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            },
        }
    }
}

/// Valid for the same reason hashing is: `NaN`, the one float that breaks reflexivity, never
/// occurs in an expression.
impl Eq for Primary {}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num.to_f64()),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Numeric primaries of the same kind fold immediately on addition; every other pairing defers
/// to an [`Expr::Add`]. An [`Integer`] plus a [`Float`] stays symbolic rather than silently
/// promoting.
impl Add for Primary {
    type Output = Expr;

    fn add(self, rhs: Self) -> Self::Output {
        use Primary::{Float, Integer};
        match (self, rhs) {
            (Integer(lhs), Integer(rhs)) => Expr::Primary(Integer(lhs + rhs)),
            (Float(lhs), Float(rhs)) => Expr::Primary(Float(lhs + rhs)),
            (lhs, rhs) => Expr::Add(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// The multiplicative twin of the [`Add`] impl: same-kind numbers fold, every other pairing
/// becomes an [`Expr::Mul`].
impl Mul for Primary {
    type Output = Expr;

    fn mul(self, rhs: Self) -> Self::Output {
        use Primary::{Float, Integer};
        match (self, rhs) {
            (Integer(lhs), Integer(rhs)) => Expr::Primary(Integer(lhs * rhs)),
            (Float(lhs), Float(rhs)) => Expr::Primary(Float(lhs * rhs)),
            (lhs, rhs) => Expr::Mul(vec![Expr::Primary(lhs), Expr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression stored with flattened sums and products.
///
/// `x + (y + z)` is a single [`Expr::Add`] with three children. Equality between expressions is
/// strict equality; the [module documentation](self) explains what that means and why.
#[derive(Debug, Clone, Eq, Hash)]
pub enum Expr {
    /// An atomic operand.
    Primary(Primary),

    /// A flattened sum of two or more terms.
    Add(Vec<Expr>),

    /// A flattened product of two or more factors.
    Mul(Vec<Expr>),

    /// A base raised to an exponent.
    Exp(Box<Expr>, Box<Expr>),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", term)?;
                }
                Ok(())
            },
            Self::Mul(factors) => {
                for (i, factor) in factors.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    self.fmt_operand(factor, f)?;
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                self.fmt_operand(base, f)?;
                write!(f, "^")?;
                self.fmt_operand(exp, f)
            },
        }
    }
}

impl Expr {
    /// Creates an expression representing the integer 0.
    pub fn zero() -> Self {
        Self::Primary(Primary::Integer(int(0)))
    }

    /// Creates an expression representing the integer 1.
    pub fn one() -> Self {
        Self::Primary(Primary::Integer(int(1)))
    }

    /// Creates an expression representing the given integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// Creates an expression representing the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates an expression representing a call to the given function.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates an expression representing the exact fraction `numerator / denominator`, stored
    /// as `numerator * denominator^-1`.
    pub fn fraction(numerator: Expr, denominator: Expr) -> Self {
        make_fraction(numerator, denominator)
    }

    /// Binding strength of the node, used only for parenthesization. Higher binds tighter;
    /// primaries never need parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add(_) => 0,
            Self::Mul(_) => 1,
            Self::Exp(..) => 2,
            Self::Primary(_) => 3,
        }
    }

    /// Compares binding strength with another node.
    pub(crate) fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// Writes one child of this node, parenthesized when the child binds more loosely than the
    /// node itself.
    fn fmt_operand(&self, operand: &Expr, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if operand.cmp_precedence(self) == Ordering::Less {
            write!(f, "({})", operand)
        } else {
            write!(f, "{}", operand)
        }
    }

    /// A reference to the inner integer, if the expression is one.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// The inner integer by value, if the expression is one.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Whether the expression is a bare [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is the integer 0 or the float 0.0.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(int)) => int.is_zero(),
            Self::Primary(Primary::Float(float)) => float.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the integer 1.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Primary(Primary::Integer(int)) => *int == 1,
            _ => false,
        }
    }

    /// Returns true if the expression is an integer raised to the power of -1, which is how
    /// this crate stores the reciprocal part of a fraction.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// A reference to the denominator, if the expression is an integer raised to the power
    /// of -1.
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        let Self::Exp(base, exp) = self else { return None };
        if *exp.as_integer()? == -1 {
            base.as_integer()
        } else {
            None
        }
    }

    /// The denominator by value, if the expression is an integer raised to the power of -1.
    pub fn into_integer_recip(self) -> Option<Integer> {
        let Self::Exp(base, exp) = self else { return None };
        if *exp.as_integer()? == -1 {
            base.into_integer()
        } else {
            None
        }
    }

    /// Whether the expression is a bare [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// The symbol name, if the expression is a lone symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// The name and arguments of the call, if the expression is one.
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns true if the given symbol appears anywhere in the expression tree.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter()
            .any(|node| node.as_symbol() == Some(name))
    }

    /// Collapses degenerate sums and products.
    ///
    /// Rule application can leave behind an [`Expr::Add`] or [`Expr::Mul`] with zero or one
    /// children. An empty list becomes the identity of its operation and a singleton becomes
    /// the child itself; everything else passes through untouched.
    pub(crate) fn downgrade(self) -> Self {
        let (mut items, identity, rebuild): (Vec<Expr>, Expr, fn(Vec<Expr>) -> Expr) =
            match self {
                Self::Add(terms) => (terms, Self::zero(), Self::Add),
                Self::Mul(factors) => (factors, Self::one(), Self::Mul),
                other => return other,
            };
        match items.len() {
            0 => identity,
            1 => items.remove(0),
            _ => rebuild(items),
        }
    }

    /// The square root of this expression, stored as a power of one half. No simplification is
    /// done.
    pub fn sqrt(self) -> Self {
        let half = Self::fraction(Self::one(), Self::integer(2));
        Self::Exp(Box::new(self), Box::new(half))
    }

    /// An iterator over every node of the tree in left-to-right post-order, children before
    /// their parent.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

/// Strict equality. Children of [`Expr::Add`] and [`Expr::Mul`] compare without regard to
/// order; every other variant compares structurally. The [module documentation](self) explains
/// why equality here is deliberately conservative.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                unordered_eq(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

fn unordered_eq(lhs: &[Expr], rhs: &[Expr]) -> bool {
    lhs.len() == rhs.len() && lhs.iter().all(|item| rhs.contains(item))
}

/// Addition builds an [`Expr::Add`] without simplifying, except that operands which are
/// themselves sums contribute their terms directly, keeping the list flat, and numeric
/// primaries fold through the [`Primary`] impl.
impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), rhs) => {
                match rhs {
                    Self::Add(more) => terms.extend(more),
                    single => terms.push(single),
                }
                Self::Add(terms)
            },
            (lhs, Self::Add(mut terms)) => {
                terms.push(lhs);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// In-place counterpart of [`Add`] that reuses the allocation behind `self` where it can.
impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs += rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs += rhs;
            },
            (Self::Add(terms), Self::Add(more)) => terms.extend(more),
            (Self::Add(terms), single) => terms.push(single),
            (slot, rhs) => {
                let lhs = std::mem::replace(slot, Self::zero());
                *slot = lhs + rhs;
            },
        }
    }
}

/// Subtraction is sugar for `lhs + (-1 * rhs)`.
impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs.neg()
    }
}

/// Multiplication builds an [`Expr::Mul`] without simplifying, except that operands which are
/// themselves products contribute their factors directly, keeping the list flat, and numeric
/// primaries fold through the [`Primary`] impl.
impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), rhs) => {
                match rhs {
                    Self::Mul(more) => factors.extend(more),
                    single => factors.push(single),
                }
                Self::Mul(factors)
            },
            (lhs, Self::Mul(mut factors)) => {
                factors.push(lhs);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// In-place counterpart of [`Mul`] that reuses the allocation behind `self` where it can.
impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Mul(factors), Self::Mul(more)) => factors.extend(more),
            (Self::Mul(factors), single) => factors.push(single),
            (slot, rhs) => {
                let lhs = std::mem::replace(slot, Self::one());
                *slot = lhs * rhs;
            },
        }
    }
}

/// Division is sugar for `lhs * rhs^-1`, stored exactly that way.
impl Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        make_fraction(self, rhs)
    }
}

/// Negation folds into numeric primaries and prepends a `-1` factor everywhere else.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(num)) => Self::Primary(Primary::Integer(-num)),
            Self::Primary(Primary::Float(num)) => Self::Primary(Primary::Float(-num)),
            other => Self::integer(-1) * other,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn strict_equality() {
        let a = Expr::integer(2) * (sym("x") + (sym("y") - Expr::integer(5)));
        let b = (sym("y") - Expr::integer(5) + sym("x")) * Expr::integer(2);
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        // `b` is an expanded version of `a`
        let a = Expr::integer(2) * (sym("x") + (sym("y") - Expr::integer(5)));
        let b = Expr::integer(2) * sym("x") + Expr::integer(2) * sym("y") - Expr::integer(10);
        assert_ne!(a, b);
    }

    #[test]
    fn flattening() {
        let expr = sym("x") + (sym("y") + (sym("z") + sym("w")));
        assert_eq!(expr, Expr::Add(vec![
            sym("x"),
            sym("y"),
            sym("z"),
            sym("w"),
        ]));
    }

    #[test]
    fn sub_becomes_neg_term() {
        let expr = sym("x") - sym("y");
        assert_eq!(expr, Expr::Add(vec![
            sym("x"),
            Expr::Mul(vec![
                Expr::integer(-1),
                sym("y"),
            ]),
        ]));
    }

    #[test]
    fn div_becomes_recip_factor() {
        let expr = sym("x") / Expr::integer(5);
        assert_eq!(expr, Expr::Mul(vec![
            sym("x"),
            Expr::Exp(
                Box::new(Expr::integer(5)),
                Box::new(Expr::integer(-1)),
            ),
        ]));
    }

    #[test]
    fn downgrade_add() {
        let zero = Expr::Add(Vec::new()).downgrade();
        assert_eq!(zero, Expr::zero());

        let single = Expr::Add(vec![sym("x")]).downgrade();
        assert_eq!(single, sym("x"));
    }

    #[test]
    fn downgrade_mul() {
        let one = Expr::Mul(Vec::new()).downgrade();
        assert_eq!(one, Expr::one());

        let single = Expr::Mul(vec![sym("x")]).downgrade();
        assert_eq!(single, sym("x"));
    }

    #[test]
    fn contains() {
        let expr = Expr::call("sin", vec![sym("theta")]) * sym("r");
        assert!(expr.contains_symbol("theta"));
        assert!(expr.contains_symbol("r"));
        assert!(!expr.contains_symbol("phi"));
    }

    #[test]
    fn fmt_expr() {
        let expr = (sym("x") + sym("y")) * Expr::integer(3);
        assert_eq!(expr.to_string(), "(x + y) * 3");
    }

    #[test]
    fn fmt_expr_2() {
        let expr = Expr::Exp(
            Box::new(sym("x") + Expr::one()),
            Box::new(Expr::integer(2)),
        ) + Expr::call("cos", vec![sym("phi")]);
        assert_eq!(expr.to_string(), "(x + 1)^2 + cos(phi)");
    }
}
