use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::thread;

use rule_parser::{evaluate, Outcome, Rule, RuleEngine, Value, Vocabulary, DEFAULT_RULE};

fn facts(pairs: &[(&str, i64)]) -> HashMap<String, Value> {
    pairs.iter().map(|(name, value)| (name.to_string(), Value::from(*value))).collect()
}

fn value_of(source: &str) -> Value {
    let empty: HashMap<String, Value> = HashMap::new();
    Rule::parse(source, &Vocabulary::default())
        .and_then(|rule| rule.evaluate(&empty))
        .unwrap_or_else(|e| panic!("{} failed: {}", source, e))
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(value_of("2+3*4"), Value::Number(14.0));
    assert_eq!(value_of("(2+3)*4"), Value::Number(20.0));
}

#[test]
fn chained_comparison() {
    assert_eq!(value_of("2 <= 3 <= 1"), Value::Bool(false));
    assert_eq!(value_of("1 < 2 < 3"), Value::Bool(true));
}

#[test]
fn unary_binding() {
    assert_eq!(value_of("not False and True"), Value::Bool(true));
    assert_eq!(value_of("not (False and True)"), Value::Bool(true));
}

#[test]
fn keywords_ignore_case() {
    assert_eq!(value_of("TRUE and not FALSE"), Value::Bool(true));
    assert!(evaluate("TRUE and not FALSE", &facts(&[])));
}

#[test]
fn default_rule_round_trip() {
    assert!(evaluate(DEFAULT_RULE, &facts(&[("followers_count", 2), ("days", 400)])));
    assert!(!evaluate(DEFAULT_RULE, &facts(&[("followers_count", 50), ("days", 400)])));
}

#[test]
fn invalid_rule_falls_back_to_default() {
    let context = facts(&[("followers_count", 2), ("days", 10)]);
    let expected = evaluate(DEFAULT_RULE, &context);
    assert!(expected);
    assert_eq!(evaluate("not a valid ((( rule", &context), expected);

    let decision = RuleEngine::default().decide("not a valid ((( rule", &context);
    assert!(matches!(decision.outcome, Outcome::Fallback { .. }));
}

#[test]
fn fallback_uses_the_same_context() {
    let context = facts(&[("followers_count", 50), ("days", 400)]);
    assert!(!evaluate("days >", &context));
    assert!(!evaluate("unknown_name > 1", &context));
}

#[test]
fn repeated_calls_agree() {
    let context = facts(&[("followers_count", 7), ("days", 179), ("tweet_count", 3)]);
    let rules = [
        "followers_count < 10 and tweet_count > 2",
        "1 < tweet_count < followers_count",
        "not (days < 180)",
        "broken (",
    ];
    for rule in rules {
        let first = evaluate(rule, &context);
        for _ in 0..5 {
            assert_eq!(evaluate(rule, &context), first, "{}", rule);
        }
    }
}

#[test]
fn short_circuit_skips_unbound_branches() {
    let context = facts(&[("followers_count", 50), ("days", 400)]);
    let engine = RuleEngine::default();

    let decision = engine.decide("days > 365 or media_count > 10", &context);
    assert_eq!((decision.verdict, decision.outcome), (true, Outcome::Rule));

    let decision = engine.decide("days < 30 and media_count > 10", &context);
    assert_eq!((decision.verdict, decision.outcome), (false, Outcome::Rule));

    let decision = engine.decide("days > 365 and media_count > 10", &context);
    assert!(matches!(decision.outcome, Outcome::Fallback { .. }));
}

#[test]
fn vocabulary_is_case_insensitive() {
    let context = facts(&[("favourites_count", 0), ("following_count", 3000)]);
    assert!(evaluate("Favourites_Count == 0 && FOLLOWING_COUNT > 2000", &context));
}

#[test]
fn other_context_types() {
    let ordered: BTreeMap<&str, Value> = BTreeMap::from([("days", Value::from(10)), ("followers_count", Value::from(100))]);
    assert!(evaluate("days < 30", &ordered));

    let flags: HashMap<&str, Value> = HashMap::from([("v", Value::Bool(true)), ("days", Value::from(9))]);
    assert!(evaluate("v and days * 2 >= 18", &flags));
}

#[test]
fn parsed_rule_serves_many_contexts() {
    let rule = Rule::parse("followers_count * 10 < following_count", &Vocabulary::default()).unwrap();
    let spammy = facts(&[("followers_count", 3), ("following_count", 4000)]);
    let normal = facts(&[("followers_count", 300), ("following_count", 400)]);
    assert_eq!(rule.check(&spammy), Ok(true));
    assert_eq!(rule.check(&normal), Ok(false));
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(RuleEngine::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let context = facts(&[("followers_count", i), ("days", 400)]);
                engine.evaluate("followers_count < 2", &context)
            })
        })
        .collect();
    let verdicts: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(verdicts, vec![true, true, false, false]);
}
