use tracing::{debug, error, warn};

use crate::config::EngineConfig;
use crate::error::{Result, RuleError};
use crate::rule::Rule;
use crate::value::Context;
use crate::vocabulary::Vocabulary;

/// Turns a rule string and a set of facts into a verdict, falling back to the configured
/// default rule whenever the given rule cannot be parsed or evaluated.
///
/// Rules are re-parsed on every call, so an updated rule string takes effect at once.
/// The engine holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: EngineConfig,
    vocabulary: Vocabulary,
}

/// How a verdict was reached.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The caller's rule was evaluated.
    Rule,
    /// The caller's rule failed and the default rule decided.
    Fallback { error: RuleError },
    /// Both rules failed; the verdict is `false`.
    Defect { error: RuleError, default_error: RuleError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub verdict: bool,
    pub outcome: Outcome,
}

impl RuleEngine {
    /// Builds an engine, checking that the configured default rule parses.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let vocabulary = config.vocabulary();
        Rule::parse_with_depth(&config.default_rule, &vocabulary, config.max_depth)?;
        Ok(RuleEngine { config, vocabulary })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parses `source` with this engine's vocabulary and nesting limit.
    pub fn parse(&self, source: &str) -> Result<Rule> {
        Rule::parse_with_depth(source, &self.vocabulary, self.config.max_depth)
    }

    /// Evaluates `rule` against `context`. Never fails: see [`RuleEngine::decide`].
    pub fn evaluate(&self, rule: &str, context: &impl Context) -> bool {
        self.decide(rule, context).verdict
    }

    /// Evaluates `rule` against `context`, reporting whether the default rule had to step in.
    pub fn decide(&self, rule: &str, context: &impl Context) -> Decision {
        let error = match self.run(rule, context) {
            Ok(verdict) => {
                debug!(rule, verdict, "rule evaluated");
                return Decision { verdict, outcome: Outcome::Rule };
            }
            Err(error) => error,
        };

        warn!(rule, %error, default_rule = %self.config.default_rule, "rule failed, using default rule");
        debug!("\n{}", error.report(rule));

        match self.run(&self.config.default_rule, context) {
            Ok(verdict) => {
                debug!(verdict, "default rule evaluated");
                Decision { verdict, outcome: Outcome::Fallback { error } }
            }
            Err(default_error) => {
                error!(
                    default_rule = %self.config.default_rule,
                    error = %default_error,
                    "default rule failed"
                );
                Decision { verdict: false, outcome: Outcome::Defect { error, default_error } }
            }
        }
    }

    fn run(&self, source: &str, context: &dyn Context) -> Result<bool> {
        self.parse(source)?.check(context)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        let vocabulary = config.vocabulary();
        RuleEngine { config, vocabulary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RULE;
    use crate::value::Value;
    use std::collections::HashMap;

    fn facts(followers: i64, days: i64) -> HashMap<&'static str, Value> {
        HashMap::from([("followers_count", Value::from(followers)), ("days", Value::from(days))])
    }

    #[test]
    fn test_rule_path() {
        let engine = RuleEngine::default();
        let decision = engine.decide("followers_count > 10", &facts(50, 400));
        assert_eq!(decision, Decision { verdict: true, outcome: Outcome::Rule });
    }

    #[test]
    fn test_fallback_on_syntax_error() {
        let engine = RuleEngine::default();
        let decision = engine.decide("not a valid ((( rule", &facts(2, 10));
        assert!(decision.verdict);
        assert!(matches!(decision.outcome, Outcome::Fallback { error: RuleError::Syntax { .. } }));
    }

    #[test]
    fn test_fallback_on_missing_fact() {
        let engine = RuleEngine::default();
        let decision = engine.decide("tweet_count > 100", &facts(50, 400));
        assert!(!decision.verdict);
        assert!(matches!(
            decision.outcome,
            Outcome::Fallback { error: RuleError::UnknownVariable { ref name, .. } } if name == "tweet_count"
        ));
    }

    #[test]
    fn test_fallback_on_division_by_zero() {
        let engine = RuleEngine::default();
        let decision = engine.decide("followers_count / (days - 400) > 1", &facts(2, 400));
        assert!(decision.verdict);
        assert!(matches!(decision.outcome, Outcome::Fallback { error: RuleError::DivisionByZero { .. } }));
    }

    #[test]
    fn test_defect_when_default_rule_fails() {
        let engine = RuleEngine::default();
        let context: HashMap<&str, Value> = HashMap::new();
        let decision = engine.decide("karma", &context);
        assert!(!decision.verdict);
        assert!(matches!(decision.outcome, Outcome::Defect { .. }));
    }

    #[test]
    fn test_custom_config() {
        let config = EngineConfig {
            default_rule: "score >= 10".to_string(),
            vocabulary: vec!["score".to_string()],
            max_depth: 4,
        };
        let engine = RuleEngine::with_config(config).unwrap();
        let context: HashMap<&str, Value> = HashMap::from([("score", Value::from(12))]);

        assert!(!engine.evaluate("SCORE < 3", &context));
        // 'days' is not in this vocabulary, so the default rule decides
        assert!(engine.evaluate("days < 3", &context));
        // five levels of parentheses exceed the limit
        let decision = engine.decide("(((((score)))))", &context);
        assert!(matches!(decision.outcome, Outcome::Fallback { .. }));
    }

    #[test]
    fn test_with_config_rejects_broken_default() {
        let config = EngineConfig { default_rule: "days <".to_string(), ..EngineConfig::default() };
        assert!(matches!(RuleEngine::with_config(config), Err(RuleError::Syntax { .. })));

        let config = EngineConfig { default_rule: DEFAULT_RULE.to_string(), ..EngineConfig::default() };
        assert!(RuleEngine::with_config(config).is_ok());
    }
}
