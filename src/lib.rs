//! A small rule language for decision predicates over named numeric facts.
//!
//! Rules combine integer and boolean literals, variables, arithmetic (`* / + -`),
//! chained comparisons (`1 < days < 30`) and boolean logic (`not`, `and`, `or`):
//!
//! ```
//! use std::collections::HashMap;
//! use rule_parser::Value;
//!
//! let facts: HashMap<&str, Value> =
//!     HashMap::from([("followers_count", Value::from(2)), ("days", Value::from(400))]);
//! assert!(rule_parser::evaluate("(followers_count < 5) or (days < 180)", &facts));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod operand;
pub mod parser;
pub mod rule;
pub mod scanner;
pub mod token_type;
pub mod value;
pub mod vocabulary;

pub use config::{EngineConfig, DEFAULT_RULE};
pub use engine::{Decision, Outcome, RuleEngine};
pub use error::RuleError;
pub use rule::Rule;
pub use value::{Context, Value};
pub use vocabulary::Vocabulary;

/// Evaluates `rule` against `context` with the default engine.
///
/// Never fails: if the rule cannot be parsed or evaluated, the result of
/// [`DEFAULT_RULE`] on the same context is returned instead.
pub fn evaluate(rule: &str, context: &impl Context) -> bool {
    RuleEngine::default().evaluate(rule, context)
}
