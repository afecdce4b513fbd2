//! Expression simplification.
//!
//! [`simplify`] reduces an expression by running every rewrite rule over every node, pass after
//! pass, until a full pass changes nothing.
//!
//! The rules push expressions toward a canonical sum-of-products form: sums and products stay
//! flat, numeric fractions are reduced, like terms and factors are combined, squared cosines are
//! rewritten in terms of sines, and perfect powers are pulled out of roots. Deterministic
//! canonical forms are what make the strict-equality checks used elsewhere in this crate
//! effective.

pub mod fraction;
pub mod rules;

use crate::expr::{Expr, Primary};

/// Simplifies `slot` in place, reporting whether anything changed.
fn simplify_in_place(slot: &mut Expr) -> bool {
    let (simplified, changed) = inner_simplify(slot);
    *slot = simplified;
    changed
}

/// Simplifies every expression in the slice, reporting whether any of them changed.
fn simplify_each(items: &mut [Expr]) -> bool {
    let mut changed = false;
    for item in items.iter_mut() {
        changed |= simplify_in_place(item);
    }
    changed
}

/// One node of the simplification loop: rewrites the root until stable, recursing into children
/// each pass.
fn inner_simplify(expr: &Expr) -> (Expr, bool) {
    let mut expr = expr.clone();
    let mut ever_changed = false;

    loop {
        let mut pass_changed = false;

        if let Some(rewritten) = rules::all(&expr) {
            expr = rewritten;
            pass_changed = true;
        }

        // rules can leave behind a sum or product with fewer than two children
        if matches!(&expr, Expr::Add(items) | Expr::Mul(items) if items.len() < 2) {
            expr = expr.downgrade();
            pass_changed = true;
        }

        pass_changed |= match expr {
            Expr::Primary(Primary::Call(_, ref mut args)) => simplify_each(args),
            Expr::Primary(_) => return (expr, ever_changed || pass_changed),
            Expr::Add(ref mut children) | Expr::Mul(ref mut children) => simplify_each(children),
            Expr::Exp(ref mut base, ref mut exponent) => {
                // no short-circuit, both sides get simplified
                simplify_in_place(base) | simplify_in_place(exponent)
            },
        };

        ever_changed |= pass_changed;
        if !pass_changed {
            break;
        }
    }

    (expr, ever_changed)
}

/// Simplifies the given expression to its canonical form.
pub fn simplify(expr: &Expr) -> Expr {
    inner_simplify(expr).0
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn pow(base: Expr, exp: i64) -> Expr {
        Expr::Exp(Box::new(base), Box::new(Expr::integer(exp)))
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        let expr = Expr::zero()
            + Expr::zero() * (Expr::integer(3) * sym("x") + Expr::integer(5) * pow(sym("b"), 2))
            + Expr::zero()
            + Expr::integer(3) * sym("a");
        assert_eq!(simplify(&expr), Expr::Mul(vec![
            sym("a"),
            Expr::integer(3),
        ]));
    }

    #[test]
    fn multiply_rules() {
        let expr = Expr::zero()
            * (Expr::integer(3) * sym("x") + Expr::integer(5) * pow(sym("b"), 2))
            * Expr::one()
            * (Expr::integer(3) * sym("a"));
        assert_eq!(simplify(&expr), Expr::zero());
    }

    #[test]
    fn multiply_rules_2() {
        // also tests add_zero
        let inner = Expr::one() + (pow(sym("x"), 2) + Expr::integer(5) * sym("x") + Expr::integer(6)) * Expr::zero();
        let expr = Expr::one() * Expr::integer(3) * Expr::one() * inner * Expr::one();
        assert_eq!(simplify(&expr), Expr::integer(3));
    }

    #[test]
    fn combine_like_terms() {
        let expr = Expr::integer(2) * sym("a") + Expr::integer(3) * sym("a") + sym("b");
        assert_eq!(simplify(&expr), Expr::Add(vec![
            Expr::Mul(vec![Expr::integer(5), sym("a")]),
            sym("b"),
        ]));
    }

    #[test]
    fn cancelling_terms() {
        let expr = Expr::integer(2) * sym("a") + sym("b") - Expr::integer(2) * sym("a");
        assert_eq!(simplify(&expr), sym("b"));
    }

    #[test]
    fn combine_like_factors() {
        let expr = sym("a") * sym("b") * pow(sym("a"), 3) * pow(sym("c"), 2)
            * pow(sym("d"), 2) * pow(sym("a"), 2) * pow(sym("b"), 4) * pow(sym("d"), 2);
        assert_eq!(simplify(&expr), Expr::Mul(vec![
            pow(sym("a"), 6),
            pow(sym("b"), 5),
            pow(sym("c"), 2),
            pow(sym("d"), 4),
        ]));
    }

    #[test]
    fn power_rules() {
        let expr = Expr::Exp(
            Box::new(Expr::Exp(Box::new(Expr::one()), Box::new(Expr::zero()))),
            Box::new(sym("x") + sym("y")),
        );
        assert_eq!(simplify(&expr), Expr::one());

        let expr = Expr::Exp(
            Box::new(Expr::Exp(Box::new(Expr::zero()), Box::new(Expr::one()))),
            Box::new(Expr::zero()),
        );
        assert_eq!(simplify(&expr), Expr::one());
    }

    #[test]
    fn negative_integer_power() {
        let expr = pow(Expr::integer(2), -2);
        assert_eq!(simplify(&expr), pow(Expr::integer(4), -1));
    }

    #[test]
    fn fraction_arithmetic() {
        let expr = Expr::fraction(Expr::one(), Expr::integer(2))
            + Expr::fraction(Expr::one(), Expr::integer(3));
        assert_eq!(simplify(&expr), Expr::fraction(Expr::integer(5), Expr::integer(6)));
    }

    #[test]
    fn reduce_fraction() {
        // the reduced numerator 1 is removed entirely, leaving the bare reciprocal
        let expr = Expr::fraction(Expr::integer(3), Expr::integer(12));
        assert_eq!(simplify(&expr), pow(Expr::integer(4), -1));
    }

    #[test]
    fn trig_special_angles() {
        let half_pi = sym("pi") / Expr::integer(2);
        assert_eq!(simplify(&Expr::call("sin", vec![half_pi])), Expr::one());

        assert_eq!(simplify(&Expr::call("cos", vec![sym("pi")])), Expr::integer(-1));

        let sixth_pi = sym("pi") / Expr::integer(6);
        assert_eq!(
            simplify(&Expr::call("sin", vec![sixth_pi])),
            pow(Expr::integer(2), -1),
        );

        let quarter_pi = sym("pi") / Expr::integer(4);
        assert_eq!(simplify(&Expr::call("tan", vec![quarter_pi])), Expr::one());

        // angles with no closed form are left alone
        assert_eq!(
            simplify(&Expr::call("sin", vec![sym("theta")])),
            Expr::call("sin", vec![sym("theta")]),
        );
    }

    #[test]
    fn pythagorean_identity() {
        let expr = pow(Expr::call("sin", vec![sym("x")]), 2)
            + pow(Expr::call("cos", vec![sym("x")]), 2);
        assert_eq!(simplify(&expr), Expr::one());
    }

    #[test]
    fn sqrt_perfect_square() {
        assert_eq!(simplify(&Expr::call("sqrt", vec![Expr::integer(4)])), Expr::integer(2));
        assert_eq!(simplify(&Expr::call("sqrt", vec![pow(sym("x"), 2)])), sym("x"));
    }

    #[test]
    fn sqrt_of_zero_and_one() {
        assert_eq!(simplify(&Expr::call("sqrt", vec![Expr::zero()])), Expr::zero());
        assert_eq!(simplify(&Expr::call("sqrt", vec![Expr::one()])), Expr::one());
    }

    #[test]
    fn scale_factor_collapse() {
        // |d/dphi (rho cos(phi), rho sin(phi))| = rho, the cylindrical scale factor
        let sum = pow(sym("rho"), 2) * pow(Expr::call("sin", vec![sym("phi")]), 2)
            + pow(sym("rho"), 2) * pow(Expr::call("cos", vec![sym("phi")]), 2);
        assert_eq!(simplify(&Expr::call("sqrt", vec![sum])), sym("rho"));
    }
}
