//! Config types for rule construction.
//!
//! These types mirror the runtime types but carry user input as written.
//! They can be built in code (builder methods) or loaded from a JSON/YAML
//! document, which is validated against a closed schema.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Constructor |
//! |-------------|-------------|-------------|
//! | [`RuleConfig`] | [`Rule`](crate::Rule) | `Rule::new()` |
//! | [`FixSetConfig`] | [`FixSet`](crate::FixSet) | `FixSet::new()` |
//!
//! # Document format
//!
//! ```yaml
//! include:
//!   prefixes: a                  # string, {regex: ...}, or a list of them
//!   exceptPrefixes: [aaaa]
//!   replacePrefix: true
//! exclude:
//!   suffixes: { regex: "==(.+?)=$" }
//!   elements: [id, version]      # string or list of strings
//! ```

use crate::convert::json_type;
use crate::{patterns_from_value, strings_from_value, ConfigError, OneOrMany, PatternSpec};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Configuration for a [`Rule`](crate::Rule).
///
/// Every field is optional. A field set to an empty list is *present*: an empty
/// `prefixes` list matches nothing, whereas an absent one is not consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// Exact strings covered by the rule.
    pub elements: Option<OneOrMany<String>>,
    /// Exact strings never covered by the rule.
    pub except: Option<OneOrMany<String>>,
    /// Strings starting with one of these are covered.
    pub prefixes: Option<OneOrMany<PatternSpec>>,
    /// Strings ending with one of these are covered.
    pub suffixes: Option<OneOrMany<PatternSpec>>,
    /// Strings starting with one of these are not covered.
    pub except_prefixes: Option<OneOrMany<PatternSpec>>,
    /// Strings ending with one of these are not covered.
    pub except_suffixes: Option<OneOrMany<PatternSpec>>,
    /// Strip a matched prefix from the returned name (default: false).
    pub replace_prefix: Option<bool>,
    /// Strip a matched suffix from the returned name (default: false).
    pub replace_suffix: Option<bool>,
}

impl RuleConfig {
    const FIELDS: &'static [&'static str] = &[
        "elements",
        "except",
        "prefixes",
        "suffixes",
        "exceptPrefixes",
        "exceptSuffixes",
        "replacePrefix",
        "replaceSuffix",
    ];

    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set the exact elements.
    #[must_use]
    pub fn elements(mut self, values: impl Into<OneOrMany<String>>) -> Self {
        self.elements = Some(values.into());
        self
    }

    /// Set the exact exceptions.
    #[must_use]
    pub fn except(mut self, values: impl Into<OneOrMany<String>>) -> Self {
        self.except = Some(values.into());
        self
    }

    /// Set the prefixes.
    #[must_use]
    pub fn prefixes(mut self, values: impl Into<OneOrMany<PatternSpec>>) -> Self {
        self.prefixes = Some(values.into());
        self
    }

    /// Set the suffixes.
    #[must_use]
    pub fn suffixes(mut self, values: impl Into<OneOrMany<PatternSpec>>) -> Self {
        self.suffixes = Some(values.into());
        self
    }

    /// Set the exception prefixes.
    #[must_use]
    pub fn except_prefixes(mut self, values: impl Into<OneOrMany<PatternSpec>>) -> Self {
        self.except_prefixes = Some(values.into());
        self
    }

    /// Set the exception suffixes.
    #[must_use]
    pub fn except_suffixes(mut self, values: impl Into<OneOrMany<PatternSpec>>) -> Self {
        self.except_suffixes = Some(values.into());
        self
    }

    /// Strip matched prefixes by default.
    #[must_use]
    pub fn replace_prefix(mut self, replace: bool) -> Self {
        self.replace_prefix = Some(replace);
        self
    }

    /// Strip matched suffixes by default.
    #[must_use]
    pub fn replace_suffix(mut self, replace: bool) -> Self {
        self.replace_suffix = Some(replace);
        self
    }

    /// Validate and convert a JSON document.
    ///
    /// `scope` prefixes field paths in error messages (e.g. `"include"`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] if `value` is not an object,
    /// [`ConfigError::UnknownField`] for keys outside the schema, and
    /// [`ConfigError::Conversion`] / [`ConfigError::InvalidField`] for values of
    /// the wrong shape. `null` values count as omitted.
    pub fn from_value(value: &Value, scope: &str) -> Result<Self, ConfigError> {
        let map = expect_object(value, scope)?;
        reject_unknown(map, Self::FIELDS, scope)?;

        let strings = |key: &str| {
            present(map, key)
                .map(|v| {
                    strings_from_value(v).map_err(|source| ConfigError::Conversion {
                        field: path(scope, key),
                        source,
                    })
                })
                .transpose()
        };
        let patterns = |key: &str| {
            present(map, key)
                .map(|v| {
                    patterns_from_value(v).map_err(|source| ConfigError::Conversion {
                        field: path(scope, key),
                        source,
                    })
                })
                .transpose()
        };
        let flag = |key: &str| {
            present(map, key)
                .map(|v| {
                    v.as_bool().ok_or_else(|| ConfigError::InvalidField {
                        field: path(scope, key),
                        reason: format!("must be a boolean, found {}", json_type(v)),
                    })
                })
                .transpose()
        };

        Ok(Self {
            elements: strings("elements")?,
            except: strings("except")?,
            prefixes: patterns("prefixes")?,
            suffixes: patterns("suffixes")?,
            except_prefixes: patterns("exceptPrefixes")?,
            except_suffixes: patterns("exceptSuffixes")?,
            replace_prefix: flag("replacePrefix")?,
            replace_suffix: flag("replaceSuffix")?,
        })
    }
}

impl<'de> Deserialize<'de> for RuleConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value, "").map_err(serde::de::Error::custom)
    }
}

/// Configuration for a [`FixSet`](crate::FixSet).
///
/// An `include` or `exclude` that is absent or empty builds no rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixSetConfig {
    /// Rule for included elements.
    pub include: Option<RuleConfig>,
    /// Rule for excluded elements.
    pub exclude: Option<RuleConfig>,
}

impl FixSetConfig {
    const FIELDS: &'static [&'static str] = &["include", "exclude"];

    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the include rule.
    #[must_use]
    pub fn include(mut self, rule: RuleConfig) -> Self {
        self.include = Some(rule);
        self
    }

    /// Set the exclude rule.
    #[must_use]
    pub fn exclude(mut self, rule: RuleConfig) -> Self {
        self.exclude = Some(rule);
        self
    }

    /// Validate and convert a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending field if the document
    /// does not fit the schema.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let map = expect_object(value, "")?;
        reject_unknown(map, Self::FIELDS, "")?;

        let rule = |key: &str| {
            present(map, key)
                .map(|v| RuleConfig::from_value(v, key))
                .transpose()
        };

        Ok(Self {
            include: rule("include")?,
            exclude: rule("exclude")?,
        })
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, otherwise as [`Self::from_value`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML, otherwise as [`Self::from_value`].
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }
}

impl<'de> Deserialize<'de> for FixSetConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Schema helpers
// ═══════════════════════════════════════════════════════════════════════════════

fn path(scope: &str, key: &str) -> String {
    if scope.is_empty() {
        key.to_string()
    } else {
        format!("{scope}.{key}")
    }
}

fn expect_object<'a>(value: &'a Value, scope: &str) -> Result<&'a Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| ConfigError::InvalidField {
        field: if scope.is_empty() {
            "config".to_string()
        } else {
            scope.to_string()
        },
        reason: format!("must be an object, found {}", json_type(value)),
    })
}

fn reject_unknown(
    map: &Map<String, Value>,
    allowed: &[&str],
    scope: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(ConfigError::UnknownField {
            field: path(scope, key),
        }),
        None => Ok(()),
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}
