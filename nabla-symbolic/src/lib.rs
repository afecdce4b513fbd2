//! Exact symbolic expressions and the algebra to manipulate them.
//!
//! # Representation
//!
//! An expression is a tree of [`Expr`] nodes assembled through constructors and the standard
//! arithmetic operators. Sums and products are **flattened**: `a + (b + c)` becomes a single
//! [`Expr::Add`] holding the three children `a`, `b`, and `c` rather than a nested pair.
//!
//! Flattening pays off during rewriting. Combining like terms (`a + a = 2a`) or like factors
//! only requires scanning the children of one node; there are no tree rotations needed to line
//! the operands up first.
//!
//! ```
//! use nabla_symbolic::expr::Expr;
//!
//! let a = Expr::symbol("a");
//! let b = Expr::symbol("b");
//! let c = Expr::symbol("c");
//! assert_eq!(a.clone() + (b.clone() + c.clone()), Expr::Add(vec![a, b, c]));
//! ```
//!
//! All numbers are arbitrary-precision [`rug`] values; integer and rational arithmetic never
//! rounds, at any magnitude.
//!
//! # Simplification
//!
//! [`simplify()`] drives an expression toward a canonical form by applying the rewrite rules in
//! [`simplify::rules`] over and over until none of them fires. Each rule maps an expression to
//! an [`Option<Expr>`] carrying the replacement when the rule applies.
//!
//! Canonical here means the cheapest shape the rules can reach, measured roughly by the number
//! of nodes: `y + y + y` gives way to `3y`, one term instead of three. The rule set covers like
//! terms and factors, distribution, powers, exact special-angle trigonometry, and extraction of
//! perfect powers from roots.
//!
//! ```
//! use nabla_symbolic::expr::{Expr, Primary};
//! use nabla_symbolic::primitive::int;
//! use nabla_symbolic::simplify;
//!
//! let y = Expr::symbol("y");
//! let simplified = simplify(&(y.clone() + y.clone() + y.clone()));
//!
//! // y + y + y = 3y
//! assert_eq!(simplified, Expr::Mul(vec![
//!     Expr::Primary(Primary::Integer(int(3))),
//!     Expr::symbol("y"),
//! ]));
//! ```
//!
//! # Calculus
//!
//! The [`derivative`](derivative::derivative) and [`integrate`](integrate::integrate) functions
//! provide symbolic differentiation and (limited) symbolic integration, [`solve`](solve::solve)
//! solves polynomial equations of degree at most two, and [`eval::as_float`] evaluates an
//! expression numerically.

pub mod consts;
pub mod derivative;
pub mod eval;
pub mod expr;
pub mod integrate;
pub mod primitive;
pub mod simplify;
pub mod solve;
pub mod substitute;

pub use expr::Expr;
pub use simplify::simplify;
