use std::fmt;
use std::ops::Range;

use crate::error::{Result, RuleError};
use crate::scanner::Token;
use crate::token_type::TokenType;
use crate::value::{Context, Value};
use crate::vocabulary::Vocabulary;

/// A leaf of the expression tree.
///
/// Literals are converted when the rule is parsed. Variables stay unresolved until the
/// tree is evaluated, so one parsed rule can be checked against many contexts.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Variable(String),
}

impl Operand {
    pub fn from_token(token: &Token, vocabulary: &Vocabulary) -> Result<Operand> {
        match token.variant {
            TokenType::Number => {
                // digit runs always parse; very long ones saturate to large floats
                let number = token.lexeme.parse::<f64>().map_err(|_| RuleError::Syntax {
                    message: "Invalid number".to_string(),
                    fragment: token.lexeme.clone(),
                    span: token.span.clone(),
                    line: token.line,
                    column: token.column,
                })?;
                Ok(Operand::Literal(Value::Number(number)))
            }
            TokenType::True => Ok(Operand::Literal(Value::Bool(true))),
            TokenType::False => Ok(Operand::Literal(Value::Bool(false))),
            TokenType::Identifier => match vocabulary.resolve(&token.lexeme) {
                Some(name) => Ok(Operand::Variable(name.to_string())),
                None => Err(RuleError::UnknownVariable {
                    name: token.lexeme.clone(),
                    span: token.span.clone(),
                }),
            },
            _ => Err(RuleError::Syntax {
                message: "Expected operand".to_string(),
                fragment: token.lexeme.clone(),
                span: token.span.clone(),
                line: token.line,
                column: token.column,
            }),
        }
    }

    /// Returns the literal, or looks the variable up in `context`.
    pub fn resolve(&self, context: &dyn Context, span: &Range<usize>) -> Result<Value> {
        match self {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) => context.lookup(name).ok_or_else(|| RuleError::UnknownVariable {
                name: name.clone(),
                span: span.clone(),
            }),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Variable(name) => write!(f, "{}", name),
        }
    }
}
