//! Rules that pull perfect powers out of square, cube, and higher roots.

use crate::primitive::int;
use crate::expr::{Expr, Primary};
use crate::simplify::rules::do_call;
use rug::Integer;
use std::collections::HashMap;

/// Returns the prime factorization of the given integer.
///
/// A negative input contributes a factor of -1 with multiplicity 1.
fn prime_factorization(mut n: Integer) -> HashMap<Integer, usize> {
    let mut factors = HashMap::new();
    if n < 0 {
        factors.insert(int(-1), 1);
        n = -n;
    }

    let mut divisor = int(2);
    while divisor <= n {
        while int(&n % &divisor) == 0 {
            *factors.entry(divisor.clone()).or_insert(0) += 1;
            n /= &divisor;
        }
        divisor += 1;
    }

    factors
}

fn power(base: Expr, exponent: usize) -> Expr {
    Expr::Exp(
        Box::new(base),
        Box::new(Expr::Primary(Primary::Integer(Integer::from(exponent)))),
    )
}

/// General simplification function for roots.
///
/// Counts how many times each base appears inside the root, expanding integers into their
/// prime factorizations, then moves every base that appears a multiple of `root` times outside
/// of the root. Bases raised to anything but a nonnegative integer are treated as opaque.
fn do_root(expr: &Expr, root: usize) -> Option<Expr> {
    // 0 and 1 have empty prime factorizations; every root maps them to themselves
    if let Some(n) = expr.as_integer() {
        if *n == 0 || *n == 1 {
            return Some(Expr::Primary(Primary::Integer(n.clone())));
        }
    }

    let factors = match expr {
        Expr::Mul(factors) => factors.clone(),
        other => vec![other.clone()],
    };

    // multiplicity of every base under the root
    let mut counts: HashMap<Expr, usize> = HashMap::new();
    for factor in factors {
        match factor {
            Expr::Primary(Primary::Integer(n)) => {
                for (prime, count) in prime_factorization(n) {
                    *counts.entry(Expr::Primary(Primary::Integer(prime))).or_insert(0) += count;
                }
            },
            Expr::Exp(base, exp) => match exp.as_integer().and_then(|n| n.to_usize()) {
                Some(count) => *counts.entry(*base).or_insert(0) += count,
                None => *counts.entry(Expr::Exp(base, exp)).or_insert(0) += 1,
            },
            other => *counts.entry(other).or_insert(0) += 1,
        }
    }

    // whole multiples of `root` leave the radicand, the remainders stay behind
    let mut outside = Vec::new();
    let mut inside = Vec::new();
    for (base, count) in counts {
        if count / root > 0 {
            outside.push(power(base.clone(), count / root));
        }
        if count % root > 0 {
            inside.push(power(base, count % root));
        }
    }

    if outside.is_empty() {
        return None;
    }
    if inside.is_empty() {
        return Some(Expr::Mul(outside));
    }

    let remaining = Expr::Mul(inside).downgrade();
    let call = match root {
        2 => Expr::call("sqrt", vec![remaining]),
        3 => Expr::call("cbrt", vec![remaining]),
        n => Expr::call("root", vec![remaining, Expr::integer(n)]),
    };
    Some(Expr::Mul(outside) * call)
}

/// `sqrt(x^2) = x`, `x >= 0`
fn sqrt(expr: &Expr) -> Option<Expr> {
    do_call(expr, "sqrt", |args| {
        do_root(args.first()?, 2)
    })
}

/// `cbrt(x^3) = x`
fn cbrt(expr: &Expr) -> Option<Expr> {
    do_call(expr, "cbrt", |args| {
        do_root(args.first()?, 3)
    })
}

/// `root(x^y, y) = x`
fn root(expr: &Expr) -> Option<Expr> {
    do_call(expr, "root", |args| {
        let y = args.get(1)?.as_integer()?;
        do_root(args.first()?, y.to_usize()?)
    })
}

/// Applies all root rules.
///
/// Pulling factors out of a root can grow the expression rather than shrink it, but the moved
/// factors are what lets the power and multiplication rules fire on the next pass.
pub fn all(expr: &Expr) -> Option<Expr> {
    sqrt(expr)
        .or_else(|| cbrt(expr))
        .or_else(|| root(expr))
}
