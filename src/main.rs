use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use rule_parser::{Outcome, RuleEngine, Value};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: rule-check <rule> [name=value ...]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<_> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2)
    }

    let facts = match parse_bindings(&args[2..]) {
        Ok(facts) => facts,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2)
        }
    };

    if run(&RuleEngine::default(), &args[1], &facts) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Parses and evaluates `source`, printing the parsed rule and the verdict. Problems with
/// the rule are printed as diagnostics. Returns false if the rule itself did not hold up.
pub fn run(engine: &RuleEngine, source: &str, facts: &HashMap<String, Value>) -> bool {
    let rule = match engine.parse(source) {
        Ok(rule) => rule,
        Err(error) => {
            error.print(source);
            return false
        }
    };
    println!("rule: {}", rule);

    let decision = engine.decide(source, facts);
    match &decision.outcome {
        Outcome::Rule => {
            println!("verdict: {}", decision.verdict);
            true
        }
        Outcome::Fallback { error } => {
            error.print(source);
            println!("verdict (default rule): {}", decision.verdict);
            false
        }
        Outcome::Defect { error, default_error } => {
            error.print(source);
            default_error.print(&engine.config().default_rule);
            false
        }
    }
}

fn parse_bindings(args: &[String]) -> Result<HashMap<String, Value>, String> {
    args.iter().map(|arg| parse_binding(arg)).collect()
}

/// Parses `name=value`, where value is `true`, `false` or a number.
fn parse_binding(arg: &str) -> Result<(String, Value), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("Expected name=value, got '{}'", arg))?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() {
        return Err(format!("Missing variable name in '{}'", arg))
    }

    let value = if value.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        value
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| format!("Invalid value for '{}': '{}'", name, value))?
    };
    Ok((name.to_string(), value))
}
