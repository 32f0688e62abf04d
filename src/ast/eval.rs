use crate::lexer::operators::Operator;

use super::{expressions::Expr, node::ExprRef};

/// Folds an integer constant expression, `None` when it is not constant.
///
/// Only literals, `+ - * / % ^` and unary `+ -` are folded. Division by zero
/// and overflow are not constant either.
pub fn eval_const_expr(expr: &ExprRef) -> Option<i64> {
    match &*expr.get() {
        Expr::Value(value) => {
            let constant = value.constant.borrow();
            if constant.type_id().is_integer() {
                Some(constant.get_integer_value())
            } else {
                None
            }
        }
        Expr::Op(op) => {
            let lhs = eval_const_expr(op.lhs.as_ref()?)?;

            let Some(rhs) = &op.rhs else {
                return match op.op {
                    Operator::Plus => Some(lhs),
                    Operator::Minus => lhs.checked_neg(),
                    _ => None,
                };
            };
            let rhs = eval_const_expr(rhs)?;

            match op.op {
                Operator::Add => lhs.checked_add(rhs),
                Operator::Sub => lhs.checked_sub(rhs),
                Operator::Mul => lhs.checked_mul(rhs),
                Operator::Div => lhs.checked_div(rhs),
                Operator::Mod => lhs.checked_rem(rhs),
                Operator::Pow => lhs.checked_pow(u32::try_from(rhs).ok()?),
                _ => None,
            }
        }
        _ => None,
    }
}
