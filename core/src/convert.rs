//! Normalization of scalar-or-collection values into canonical sequences.
//!
//! Config fields accept a single value, an ordered collection, or nothing.
//! [`OneOrMany`] carries the first two explicitly; absence is `Option::None`
//! at the field. Everything is flattened to a `Vec` (or `HashSet`) once, at
//! construction, so classification never branches on input shape.

use crate::{ConversionError, PatternSpec};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// A single value or an ordered collection of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    /// One value.
    One(T),
    /// Many values, in configuration order.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into the canonical ordered sequence.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(v) => vec![v],
            Self::Many(vs) => vs,
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(vs) => vs.len(),
        }
    }

    /// Whether this is an empty collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().collect())
    }
}

// ── Exact-match strings ─────────────────────────────────────────────────────

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        values.into_iter().map(str::to_string).collect()
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
    fn from(values: [&str; N]) -> Self {
        values.into_iter().map(str::to_string).collect()
    }
}

impl From<HashSet<String>> for OneOrMany<String> {
    fn from(values: HashSet<String>) -> Self {
        values.into_iter().collect()
    }
}

impl From<BTreeSet<String>> for OneOrMany<String> {
    fn from(values: BTreeSet<String>) -> Self {
        values.into_iter().collect()
    }
}

// ── Patterns ────────────────────────────────────────────────────────────────

impl From<&str> for OneOrMany<PatternSpec> {
    fn from(value: &str) -> Self {
        Self::One(value.into())
    }
}

impl From<String> for OneOrMany<PatternSpec> {
    fn from(value: String) -> Self {
        Self::One(value.into())
    }
}

impl From<PatternSpec> for OneOrMany<PatternSpec> {
    fn from(value: PatternSpec) -> Self {
        Self::One(value)
    }
}

impl From<regex::Regex> for OneOrMany<PatternSpec> {
    fn from(value: regex::Regex) -> Self {
        Self::One(value.into())
    }
}

impl From<Vec<PatternSpec>> for OneOrMany<PatternSpec> {
    fn from(values: Vec<PatternSpec>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for OneOrMany<PatternSpec> {
    fn from(values: Vec<&str>) -> Self {
        values.into_iter().map(PatternSpec::from).collect()
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany<PatternSpec> {
    fn from(values: [&str; N]) -> Self {
        values.into_iter().map(PatternSpec::from).collect()
    }
}

/// Collect exact-match strings into a set.
#[must_use]
pub fn to_set(values: OneOrMany<String>) -> HashSet<String> {
    values.into_vec().into_iter().collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSON document model
// ═══════════════════════════════════════════════════════════════════════════════

const STRINGS: &str = "a string or an array of strings";
const PATTERNS: &str = "a string, a {\"regex\": ...} object, or an array of them";

/// Normalize a JSON value into exact-match strings.
///
/// Accepts a string or an array of strings.
///
/// # Errors
///
/// Returns [`ConversionError::UnexpectedType`] for any other shape.
pub fn strings_from_value(value: &Value) -> Result<OneOrMany<String>, ConversionError> {
    match value {
        Value::String(s) => Ok(OneOrMany::One(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(unexpected(STRINGS, other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(OneOrMany::Many),
        other => Err(unexpected(STRINGS, other)),
    }
}

/// Normalize a JSON value into prefix/suffix patterns.
///
/// Accepts a string (literal), `{"regex": "<source>"}`, or an array mixing both.
///
/// # Errors
///
/// Returns [`ConversionError::UnexpectedType`] for any other shape.
pub fn patterns_from_value(value: &Value) -> Result<OneOrMany<PatternSpec>, ConversionError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(pattern_from_value)
            .collect::<Result<Vec<_>, _>>()
            .map(OneOrMany::Many),
        other => pattern_from_value(other).map(OneOrMany::One),
    }
}

fn pattern_from_value(value: &Value) -> Result<PatternSpec, ConversionError> {
    match value {
        Value::String(s) => Ok(PatternSpec::Literal(s.clone())),
        Value::Object(map) if map.len() == 1 => match map.get("regex") {
            Some(Value::String(source)) => Ok(PatternSpec::Regex(source.clone())),
            _ => Err(unexpected(PATTERNS, value)),
        },
        other => Err(unexpected(PATTERNS, other)),
    }
}

fn unexpected(expected: &'static str, found: &Value) -> ConversionError {
    ConversionError::UnexpectedType {
        expected,
        found: json_type(found),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
