use regex::Regex;
use std::sync::LazyLock;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

const CHATTY_PREFIXES: [&str; 7] = [
    "Here's the JSON:",
    "Here is the JSON:",
    "JSON:",
    "Response:",
    "Game:",
    "```json",
    "```",
];

const CHATTY_SUFFIXES: [&str; 4] = ["```", "End of JSON", "That's it!", "Hope this helps!"];

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[a-zA-Z]*\n?").expect("regex"));
static CLOSING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n?```$").expect("regex"));

/// Strips code fences and conversational wrapping from a model reply so
/// that what remains should be a bare JSON literal. Never fails.
pub fn clean_reply(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(JSON_FENCE) {
        text = strip_closing_fence(rest);
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        text = strip_closing_fence(rest);
    }

    // Each entry is tried once, in order.
    for prefix in CHATTY_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim();
        }
    }
    for suffix in CHATTY_SUFFIXES {
        if let Some(rest) = text.strip_suffix(suffix) {
            text = rest.trim();
        }
    }

    let text = OPENING_FENCE.replace(text, "");
    CLOSING_FENCE.replace(&text, "").into_owned()
}

fn strip_closing_fence(text: &str) -> &str {
    let text = text.trim();
    text.strip_suffix(FENCE).unwrap_or(text).trim()
}
