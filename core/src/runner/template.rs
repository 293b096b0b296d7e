//! Named-slot shell templates for the terminal relay.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

pub const SLOT_TOOL: &str = "tool";
pub const SLOT_SCOPE: &str = "scope";
pub const SLOT_OUTPUT: &str = "output";

const KNOWN_SLOTS: [&str; 3] = [SLOT_TOOL, SLOT_SCOPE, SLOT_OUTPUT];

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static SLOT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Escape a string for use inside a double-quoted shell word.
pub fn escape_for_shell(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '$' => result.push_str("\\$"),
            '`' => result.push_str("\\`"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

/// One double-quoted shell word.
pub fn quote(arg: &str) -> String {
    format!("\"{}\"", escape_for_shell(arg))
}

/// Quotes each argument and joins them with spaces.
pub fn quote_all<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|a| quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    source: String,
}

impl CommandTemplate {
    /// Only `${tool}`, `${scope}` and `${output}` are accepted, and
    /// `${output}` must appear or the transcript would never be written.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut has_output = false;
        for caps in SLOT_PATTERN.captures_iter(source) {
            let name = &caps[1];
            if !KNOWN_SLOTS.contains(&name) {
                return Err(ConfigError::Invalid(format!(
                    "unknown slot ${{{name}}} in terminal template"
                )));
            }
            has_output |= name == SLOT_OUTPUT;
        }
        if !has_output {
            return Err(ConfigError::Invalid(
                "terminal template must contain ${output}".to_string(),
            ));
        }
        Ok(Self {
            source: source.to_string(),
        })
    }

    /// Substitutes slot values verbatim; callers quote them first.
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        SLOT_PATTERN
            .replace_all(&self.source, |caps: &regex::Captures| {
                values
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}
