use std::fmt;
use std::ops::Range;

use crate::operand::Operand;

/// Syntax tree of a rule.
///
/// Runs of operators with the same precedence are kept flat: `operands` holds every
/// operand of the run in reading order and `operators[i]` sits between `operands[i]`
/// and `operands[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Grouping {
        expr: Box<Expr>,
        span: Range<usize>,
    },
    Logical {
        operator: LogicalOp,
        operands: Vec<Expr>,
    },
    Not {
        expr: Box<Expr>,
        span: Range<usize>,
    },
    Comparison {
        operands: Vec<Expr>,
        operators: Vec<ComparisonOp>,
    },
    Arithmetic {
        operands: Vec<Expr>,
        operators: Vec<ArithmeticOp>,
    },
    Operand {
        operand: Operand,
        span: Range<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ArithmeticOp {
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
}

/// `=` and `==` both parse to `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ComparisonOp {
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LogicalOp {
    #[strum(to_string = "and")]
    And,
    #[strum(to_string = "or")]
    Or,
}

impl Expr {
    /// Byte range of the rule text this node was parsed from.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Grouping { span, .. } | Expr::Not { span, .. } | Expr::Operand { span, .. } => span.clone(),
            Expr::Logical { operands, .. }
            | Expr::Comparison { operands, .. }
            | Expr::Arithmetic { operands, .. } => match (operands.first(), operands.last()) {
                (Some(first), Some(last)) => first.span().start..last.span().end,
                _ => 0..0,
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Grouping { expr, .. } => write!(f, "({})", expr),
            Expr::Not { expr, .. } => write!(f, "not {}", expr),
            Expr::Operand { operand, .. } => write!(f, "{}", operand),
            Expr::Logical { operator, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", operator)?;
                    }
                    write!(f, "{}", operand)?;
                }
                Ok(())
            }
            Expr::Comparison { operands, operators } => write_run(f, operands, operators),
            Expr::Arithmetic { operands, operators } => write_run(f, operands, operators),
        }
    }
}

fn write_run<O: fmt::Display>(f: &mut fmt::Formatter<'_>, operands: &[Expr], operators: &[O]) -> fmt::Result {
    let mut operands = operands.iter();
    if let Some(first) = operands.next() {
        write!(f, "{}", first)?;
    }
    for (operator, operand) in operators.iter().zip(operands) {
        write!(f, " {} {}", operator, operand)?;
    }
    Ok(())
}
