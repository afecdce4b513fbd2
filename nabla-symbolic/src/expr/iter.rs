use super::{Expr, Primary};

/// Iterative left-to-right post-order traversal over an expression tree.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the node on top of the stack and records it as the most recently emitted one.
    fn emit(&mut self) -> Option<&'a Expr> {
        let node = self.stack.pop()?;
        self.last_visited = Some(node);
        Some(node)
    }

    /// Returns true if `expr` is the node emitted by the previous call to `next`, by address.
    fn just_emitted(&self, expr: &Expr) -> bool {
        self.last_visited.is_some_and(|last| std::ptr::eq(last, expr))
    }
}

/// The children of a node that holds a list of them, in left-to-right order.
fn child_list(node: &Expr) -> &[Expr] {
    match node {
        Expr::Primary(Primary::Call(_, args)) => args,
        Expr::Primary(_) => &[],
        Expr::Add(terms) => terms,
        Expr::Mul(factors) => factors,
        Expr::Exp(..) => &[],
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.stack.last()?;
            match node {
                // a node is emitted once its rightmost child was, so seeing the exponent
                // again means the whole power is done
                Expr::Exp(base, exp) => {
                    if self.just_emitted(exp) {
                        return self.emit();
                    }
                    self.stack.push(exp);
                    self.stack.push(base);
                },
                _ => {
                    let children = child_list(node);
                    match children.last() {
                        None => return self.emit(),
                        Some(last) if self.just_emitted(last) => return self.emit(),
                        Some(_) => self.stack.extend(children.iter().rev()),
                    }
                },
            }
        }
    }
}
