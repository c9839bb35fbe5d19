//! Flag pattern construction.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Built-in flag shapes, tried in order at each position.
pub const BUILTIN_PATTERNS: &[&str] = &[
    r"flag\{[^}]+\}",
    r"ctf\{[^}]+\}",
    r"picoCTF\{[^}]+\}",
    r"HTB\{[^}]+\}",
    r"THM\{[^}]+\}",
    r"DEAD\{[^}]+\}",
    r"KEY\{[^}]+\}",
    r"SEC\{[^}]+\}",
    // generic PREFIX{...}
    r"[A-Za-z0-9_]{2,20}\{[^}]{3,}\}",
];

/// Errors raised while compiling flag patterns.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid custom flag pattern {pattern:?}: {source}")]
    InvalidCustomPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to compile built-in flag patterns: {0}")]
    Builtin(#[source] regex::Error),
}

/// Compiled, case-insensitive alternation of flag shapes.
///
/// A custom pattern is appended as one more alternative; the built-in
/// shapes stay active.
#[derive(Debug, Clone)]
pub struct FlagPattern {
    regex: Regex,
    custom: Option<String>,
}

impl FlagPattern {
    /// Builds the built-in alternation.
    pub fn builtin() -> Result<Self, PatternError> {
        let regex = compile(BUILTIN_PATTERNS.iter().copied()).map_err(PatternError::Builtin)?;
        Ok(Self {
            regex,
            custom: None,
        })
    }

    /// Builds the built-in alternation plus `custom`, if given.
    ///
    /// A custom pattern that does not compile is retried once with its
    /// braces escaped, so shell-friendly forms like `myctf{.*}` work.
    pub fn new(custom: Option<&str>) -> Result<Self, PatternError> {
        let Some(custom) = custom else {
            return Self::builtin();
        };

        let regex = match compile_with(custom) {
            Ok(regex) => regex,
            Err(first) => {
                let escaped = escape_braces(custom);
                if escaped == custom {
                    return Err(invalid(custom, first));
                }
                tracing::debug!(pattern = custom, %escaped, "Retrying custom pattern with literal braces");
                compile_with(&escaped).map_err(|_| invalid(custom, first))?
            }
        };

        Ok(Self {
            regex,
            custom: Some(custom.to_string()),
        })
    }

    /// Returns the custom alternative, if any.
    pub fn custom(&self) -> Option<&str> {
        self.custom.as_deref()
    }

    /// Returns the compiled expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

fn compile<'a>(alternatives: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let joined = alternatives
        .map(|alt| format!("(?:{})", alt))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&joined).case_insensitive(true).build()
}

fn compile_with(custom: &str) -> Result<Regex, regex::Error> {
    // Reject a bad custom pattern on its own before it is wrapped, so an
    // unbalanced group cannot pair up with the surrounding alternation.
    Regex::new(custom)?;
    compile(BUILTIN_PATTERNS.iter().copied().chain(std::iter::once(custom)))
}

fn escape_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut escaped = false;
    for c in pattern.chars() {
        if !escaped && (c == '{' || c == '}') {
            out.push('\\');
        }
        escaped = !escaped && c == '\\';
        out.push(c);
    }
    out
}

fn invalid(pattern: &str, source: regex::Error) -> PatternError {
    PatternError::InvalidCustomPattern {
        pattern: pattern.to_string(),
        source,
    }
}
