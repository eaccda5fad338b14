//! Anchored prefix/suffix matching
//!
//! [`PatternSpec`] is what the user wrote; [`FixMatcher`] is what evaluates at
//! classification time. A literal is escaped and anchored; a regex must already
//! carry its anchor.
//!
//! # Naming: Spec vs Matcher
//!
//! - [`PatternSpec`] = config-level specification (literal or regex source)
//! - [`FixMatcher`] = compiled runtime engine (one `regex::Regex`)

use crate::{ConfigError, MAX_PATTERN_LENGTH, MAX_REGEX_PATTERN_LENGTH};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// Which end of the string a pattern is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixKind {
    /// Anchored to the start (`^`).
    Prefix,
    /// Anchored to the end (`$`).
    Suffix,
}

impl fmt::Display for FixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => f.write_str("prefix"),
            Self::Suffix => f.write_str("suffix"),
        }
    }
}

/// A prefix or suffix pattern from user configuration.
///
/// # Example
///
/// ```
/// use fixset::{FixKind, FixMatcher, PatternSpec};
///
/// let literal = FixMatcher::compile(&PatternSpec::literal("a."), FixKind::Prefix).unwrap();
/// assert!(literal.is_match("a.b"));
/// assert!(!literal.is_match("ab")); // `.` is escaped
///
/// let regex = FixMatcher::compile(&PatternSpec::regex(r"=(.+?)=$"), FixKind::Suffix).unwrap();
/// assert_eq!(regex.strip("name=eq="), "name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSpec {
    /// Matched literally; metacharacters are escaped.
    Literal(String),
    /// Regex source (Rust `regex` syntax). Must be anchored for its kind.
    Regex(String),
}

impl PatternSpec {
    /// Create a literal pattern.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a regex pattern.
    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex(source.into())
    }

    /// Returns the pattern text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(v) | Self::Regex(v) => v,
        }
    }
}

impl From<&str> for PatternSpec {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for PatternSpec {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Regex> for PatternSpec {
    fn from(value: Regex) -> Self {
        Self::Regex(value.as_str().to_string())
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "Literal(\"{v}\")"),
            Self::Regex(v) => write!(f, "Regex(\"{v}\")"),
        }
    }
}

/// Compiled, anchored prefix or suffix matcher.
///
/// Matching uses RE2 semantics from the `regex` crate: linear time, no backtracking.
#[derive(Debug, Clone)]
pub struct FixMatcher {
    kind: FixKind,
    regex: Regex,
}

impl FixMatcher {
    /// Compile a pattern for the given end of the string.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnanchoredPrefix`] / [`ConfigError::UnanchoredSuffix`] if a
    ///   regex lacks the anchor its kind requires.
    /// - [`ConfigError::InvalidPattern`] if the regex does not compile.
    /// - [`ConfigError::PatternTooLong`] if the pattern exceeds the length limits.
    pub fn compile(spec: &PatternSpec, kind: FixKind) -> Result<Self, ConfigError> {
        let source = match spec {
            PatternSpec::Literal(value) => {
                check_len(value, MAX_PATTERN_LENGTH)?;
                let escaped = regex::escape(value);
                match kind {
                    FixKind::Prefix => format!("^{escaped}"),
                    FixKind::Suffix => format!("{escaped}$"),
                }
            }
            PatternSpec::Regex(source) => {
                check_len(source, MAX_REGEX_PATTERN_LENGTH)?;
                match kind {
                    FixKind::Prefix if !source.starts_with('^') => {
                        return Err(ConfigError::UnanchoredPrefix(source.clone()));
                    }
                    FixKind::Suffix if !source.ends_with('$') => {
                        return Err(ConfigError::UnanchoredSuffix(source.clone()));
                    }
                    _ => source.clone(),
                }
            }
        };

        let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
            pattern: spec.as_str().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { kind, regex })
    }

    /// Returns which end of the string this matcher is anchored to.
    #[must_use]
    pub fn kind(&self) -> FixKind {
        self.kind
    }

    /// Returns the compiled regex source (always anchored).
    #[must_use]
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern occurs in `input`.
    #[must_use]
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Remove the first occurrence of the pattern from `input`.
    ///
    /// Returns `input` unchanged if the pattern does not occur.
    #[must_use]
    pub fn strip<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.regex.replace(input, "")
    }
}

fn check_len(pattern: &str, max: usize) -> Result<(), ConfigError> {
    if pattern.len() > max {
        return Err(ConfigError::PatternTooLong {
            len: pattern.len(),
            max,
        });
    }
    Ok(())
}

/// Name of `element` with matched fixes stripped, or `None` if no fix matched.
///
/// The first matching prefix and the first matching suffix are picked
/// independently, in configuration order. The prefix is stripped first, then the
/// suffix is stripped from the already-modified name.
#[must_use]
pub fn strip_fixes(
    element: &str,
    prefixes: Option<&[FixMatcher]>,
    suffixes: Option<&[FixMatcher]>,
    replace_prefix: bool,
    replace_suffix: bool,
) -> Option<String> {
    let prefix = prefixes.and_then(|ms| ms.iter().find(|m| m.is_match(element)));
    let suffix = suffixes.and_then(|ms| ms.iter().find(|m| m.is_match(element)));

    if prefix.is_none() && suffix.is_none() {
        return None;
    }

    let mut name = Cow::Borrowed(element);
    if let Some(prefix) = prefix.filter(|_| replace_prefix) {
        name = Cow::Owned(prefix.strip(&name).into_owned());
    }
    if let Some(suffix) = suffix.filter(|_| replace_suffix) {
        name = Cow::Owned(suffix.strip(&name).into_owned());
    }
    Some(name.into_owned())
}
