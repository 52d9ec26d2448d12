use serde::Deserialize;

use crate::parser::DEFAULT_MAX_DEPTH;
use crate::vocabulary::{Vocabulary, DEFAULT_VARIABLES};

/// Rule substituted whenever a caller's rule cannot be parsed or evaluated.
pub const DEFAULT_RULE: &str = "(followers_count < 5) or (days < 180)";

/// Engine settings, usually deserialized from the calling application's own config file.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_rule: String,
    pub vocabulary: Vec<String>,
    pub max_depth: usize,
}

impl EngineConfig {
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.vocabulary.iter().cloned())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_rule: DEFAULT_RULE.to_string(),
            vocabulary: DEFAULT_VARIABLES.iter().map(|name| name.to_string()).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
