//! JSON parsing with one best-effort repair pass.
//!
//! The repair rules are blind global regex substitutions. They fix the usual
//! model mistakes (bare keys, single quotes, trailing commas, missing commas
//! between objects) but can also rewrite text inside string values, e.g. a
//! URL `"https://x"` gains quotes around `https`. Callers get either a clean
//! parse or a `GameError::Parse`, never a guarantee that repaired values are
//! what the model meant.

use crate::error::GameError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Rewrites malformed JSON text ahead of a second parse attempt.
pub trait Repair {
    fn repair(&self, text: &str) -> String;
}

/// The default rule set, applied in order.
pub struct RegexRepair {
    rules: Vec<(Regex, &'static str)>,
}

static DEFAULT_RULES: LazyLock<RegexRepair> = LazyLock::new(RegexRepair::new);

impl RegexRepair {
    pub fn new() -> Self {
        let rule = |pattern: &str, replacement: &'static str| {
            (Regex::new(pattern).expect("regex"), replacement)
        };
        Self {
            rules: vec![
                // bare keys
                rule(r"(\w+):", r#""${1}":"#),
                // single-quoted strings
                rule(r"'([^']*)'", r#""${1}""#),
                // trailing commas
                rule(r",(\s*[}\]])", "${1}"),
                // adjacent objects
                rule(r"\}(\s*)\{", "},${1}{"),
            ],
        }
    }

    pub fn shared() -> &'static RegexRepair {
        &DEFAULT_RULES
    }
}

impl Default for RegexRepair {
    fn default() -> Self {
        Self::new()
    }
}

impl Repair for RegexRepair {
    fn repair(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, *replacement).into_owned()
            })
    }
}

/// Parses `text` as a JSON object with the default repair rules.
pub fn parse_object(text: &str) -> Result<Map<String, Value>, GameError> {
    parse_object_with(text, RegexRepair::shared())
}

/// Strict parse, then exactly one retry on the repaired text. A failure
/// reports the first parser error and the head of the original text.
pub fn parse_object_with(text: &str, repairer: &dyn Repair) -> Result<Map<String, Value>, GameError> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(first) => {
            log::error!("JSON parsing failed: {first}");
            log::debug!("Problematic text (first 500 chars): {}", GameError::excerpt(text));

            let fixed = repairer.repair(text);
            serde_json::from_str::<Value>(&fixed).map_err(|_| GameError::Parse {
                message: first.to_string(),
                excerpt: GameError::excerpt(text),
            })?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(GameError::Parse {
            message: format!("expected a JSON object, found {}", kind_of(&other)),
            excerpt: GameError::excerpt(text),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
