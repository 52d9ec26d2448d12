use std::fmt;

use crate::error::Result;
use crate::evaluator;
use crate::expr::Expr;
use crate::parser::{self, DEFAULT_MAX_DEPTH};
use crate::value::{Context, Value};
use crate::vocabulary::Vocabulary;

/// A parsed rule: its source text and syntax tree.
///
/// Variables in the tree are looked up only when the rule is evaluated, so a parsed rule
/// can be evaluated against any number of contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    source: String,
    expr: Expr,
}

impl Rule {
    pub fn parse(source: &str, vocabulary: &Vocabulary) -> Result<Rule> {
        Self::parse_with_depth(source, vocabulary, DEFAULT_MAX_DEPTH)
    }

    pub fn parse_with_depth(source: &str, vocabulary: &Vocabulary, max_depth: usize) -> Result<Rule> {
        let expr = parser::parse(source, vocabulary, max_depth)?;
        Ok(Rule { source: source.to_string(), expr })
    }

    /// Evaluates the rule to its raw value, e.g. `14` for `2+3*4`.
    pub fn evaluate(&self, context: &dyn Context) -> Result<Value> {
        evaluator::evaluate(&self.expr, context)
    }

    /// Evaluates the rule to a verdict: numbers are true when non-zero.
    pub fn check(&self, context: &dyn Context) -> Result<bool> {
        self.evaluate(context).map(Value::truthy)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
