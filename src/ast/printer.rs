//! Prints expression trees in a fully parenthesized prefix form.

use super::Expr;

/// Renders `-123 * (45.67)` as `(* (- 123) (group 45.67))`
#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Binary { left, operator, right } => {
                self.parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()])
            }
            Expr::Grouping(inner) => self.parenthesize("group", &[inner.as_ref()]),
            Expr::Literal(value) => value.to_string(),
            Expr::Unary { operator, right } => self.parenthesize(&operator.lexeme, &[right.as_ref()]),
        }
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::from("(");
        out.push_str(name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&self.print(expr));
        }
        out.push(')');
        out
    }
}
