//! `FixSet` — include/exclude composition
//!
//! Combines an optional include [`Rule`] and an optional exclude [`Rule`] into a
//! single covered / not-covered decision. Exclusion is a veto; when both rules
//! permit the element, the include rule's name wins.

use crate::{
    ClassifyTrace, ConfigError, Decision, FixSetConfig, Rule, RuleConfig, RuleMatch, RuleTrace,
    StripOptions,
};
use tracing::{debug, trace};

/// Include and exclude rules evaluated together.
///
/// Immutable after construction; classification is a pure function of the
/// element and the per-call [`StripOptions`].
///
/// # Example
///
/// ```
/// use fixset::prelude::*;
///
/// let set = FixSet::from_json(r#"{
///     "include": { "suffixes": {"regex": "=(.+?)=$"}, "exceptSuffixes": "=forbidden=",
///                  "replacePrefix": true, "replaceSuffix": true },
///     "exclude": { "suffixes": {"regex": "==(.+?)=$"}, "exceptSuffixes": "==include=",
///                  "replacePrefix": true, "replaceSuffix": true }
/// }"#).unwrap();
///
/// assert_eq!(set.classify("name=eq="), Some("name".to_string()));
/// assert_eq!(set.classify("name==include="), Some("name".to_string()));
/// assert_eq!(set.classify("name==other="), None);
/// assert_eq!(set.classify("name=forbidden="), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixSet {
    include: Option<Rule>,
    exclude: Option<Rule>,
}

impl FixSet {
    /// Build a fix set. Absent or empty rule configs build no rule.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either rule fails to compile.
    pub fn new(config: FixSetConfig) -> Result<Self, ConfigError> {
        let set = Self {
            include: build_rule(config.include)?,
            exclude: build_rule(config.exclude)?,
        };

        debug!(
            include = set.include.is_some(),
            exclude = set.exclude.is_some(),
            "built fix set"
        );

        Ok(set)
    }

    /// Parse, validate and build from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the document is malformed, does not fit the
    /// schema, or contains an invalid pattern.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(FixSetConfig::from_json(json)?)
    }

    /// Parse, validate and build from a YAML document.
    ///
    /// # Errors
    ///
    /// As [`Self::from_json`].
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::new(FixSetConfig::from_yaml(yaml)?)
    }

    /// The include rule, if configured.
    #[must_use]
    pub fn include(&self) -> Option<&Rule> {
        self.include.as_ref()
    }

    /// The exclude rule, if configured.
    #[must_use]
    pub fn exclude(&self) -> Option<&Rule> {
        self.exclude.as_ref()
    }

    /// Name of `element` if covered, `None` otherwise.
    #[must_use]
    pub fn classify(&self, element: &str) -> Option<String> {
        self.classify_with_trace(element, StripOptions::default()).result
    }

    /// As [`Self::classify`], overriding both rules' stripping flags for this call.
    #[must_use]
    pub fn classify_with(&self, element: &str, options: StripOptions) -> Option<String> {
        self.classify_with_trace(element, options).result
    }

    /// Whether `element` is covered, using the construction-time stripping flags.
    #[must_use]
    pub fn covered(&self, element: &str) -> bool {
        self.classify(element).is_some()
    }

    /// Classify `element` and report how each rule and the precedence table decided.
    #[must_use]
    pub fn classify_with_trace(&self, element: &str, options: StripOptions) -> ClassifyTrace {
        // Both rules run whenever configured; no short-circuit.
        let exclude = self
            .exclude
            .as_ref()
            .map(|r| r.classify_with_trace(element, options));
        let include = self
            .include
            .as_ref()
            .map(|r| r.classify_with_trace(element, options));

        let (decision, result) = decide(element, include.as_ref(), exclude.as_ref());
        trace!(element, %decision, "classified element");

        ClassifyTrace {
            element: element.to_string(),
            include,
            exclude,
            decision,
            result,
        }
    }
}

fn build_rule(config: Option<RuleConfig>) -> Result<Option<Rule>, ConfigError> {
    config
        .filter(|c| !c.is_empty())
        .map(Rule::new)
        .transpose()
}

/// Exclusion decides rejection; inclusion decides the name.
fn decide(
    element: &str,
    include: Option<&RuleTrace>,
    exclude: Option<&RuleTrace>,
) -> (Decision, Option<String>) {
    match (include.map(|t| &t.outcome), exclude.map(|t| &t.outcome)) {
        (_, Some(RuleMatch { matched: true, .. })) => (Decision::Excluded, None),
        (Some(RuleMatch { matched: false, .. }), _) => (Decision::NotIncluded, None),
        (Some(inc), _) => (Decision::Included, Some(inc.name.clone())),
        (None, Some(exc)) => (Decision::NotExcluded, Some(exc.name.clone())),
        (None, None) => (Decision::Unfiltered, Some(element.to_string())),
    }
}
