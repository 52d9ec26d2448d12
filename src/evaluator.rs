//! Tree-walking evaluation of parsed rules.
//!
//! `and`, `or` and comparison chains stop evaluating operands as soon as the outcome is
//! known, so a variable that only appears in a skipped branch never needs a binding.

use crate::error::{Result, RuleError};
use crate::expr::{ArithmeticOp, ComparisonOp, Expr, LogicalOp};
use crate::value::{Context, Value};

/// Evaluate an expression against the variable bindings in `context`.
pub fn evaluate(expr: &Expr, context: &dyn Context) -> Result<Value> {
    match expr {
        Expr::Operand { operand, span } => operand.resolve(context, span),
        Expr::Grouping { expr, .. } => evaluate(expr, context),
        Expr::Not { expr, .. } => Ok(Value::Bool(!evaluate(expr, context)?.truthy())),
        Expr::Logical { operator, operands } => evaluate_logical(*operator, operands, context),
        Expr::Comparison { operands, operators } => evaluate_comparison(operands, operators, context),
        Expr::Arithmetic { operands, operators } => evaluate_arithmetic(operands, operators, context),
    }
}

fn evaluate_logical(operator: LogicalOp, operands: &[Expr], context: &dyn Context) -> Result<Value> {
    // `and` stops at the first false operand, `or` at the first true one
    let decisive = match operator {
        LogicalOp::And => false,
        LogicalOp::Or => true,
    };
    for operand in operands {
        if evaluate(operand, context)?.truthy() == decisive {
            return Ok(Value::Bool(decisive));
        }
    }
    Ok(Value::Bool(!decisive))
}

fn evaluate_comparison(operands: &[Expr], operators: &[ComparisonOp], context: &dyn Context) -> Result<Value> {
    let Some((first, rest)) = operands.split_first() else {
        return Ok(Value::Bool(true));
    };
    let mut previous = evaluate(first, context)?;
    for (operator, operand) in operators.iter().zip(rest) {
        let current = evaluate(operand, context)?;
        if !compare(*operator, previous, current) {
            return Ok(Value::Bool(false));
        }
        previous = current;
    }
    Ok(Value::Bool(true))
}

fn compare(operator: ComparisonOp, left: Value, right: Value) -> bool {
    let (a, b) = (left.as_number(), right.as_number());
    match operator {
        ComparisonOp::Lt => a < b,
        ComparisonOp::Le => a <= b,
        ComparisonOp::Gt => a > b,
        ComparisonOp::Ge => a >= b,
        ComparisonOp::Eq => a == b,
        ComparisonOp::Ne => a != b,
    }
}

fn evaluate_arithmetic(operands: &[Expr], operators: &[ArithmeticOp], context: &dyn Context) -> Result<Value> {
    let Some((first, rest)) = operands.split_first() else {
        return Ok(Value::Number(0.0));
    };
    let mut total = evaluate(first, context)?.as_number();
    for (operator, operand) in operators.iter().zip(rest) {
        let value = evaluate(operand, context)?.as_number();
        total = match operator {
            ArithmeticOp::Mul => total * value,
            ArithmeticOp::Div => {
                if value == 0.0 {
                    return Err(RuleError::DivisionByZero { span: operand.span() });
                }
                total / value
            }
            ArithmeticOp::Add => total + value,
            ArithmeticOp::Sub => total - value,
        };
    }
    Ok(Value::Number(total))
}
