//! `Rule` — single-rule classifier
//!
//! A rule owns one set of criteria and answers "is this element matched, and
//! under which name?". Resolution order is fixed:
//!
//! 1. `except` — exact exceptions, checked before everything else
//! 2. `elements` — exact matches, never stripped
//! 3. exception prefixes/suffixes — only decide when one of them matches
//! 4. prefixes/suffixes — decide whenever configured
//! 5. nothing configured — match everything

use crate::pattern::strip_fixes;
use crate::{
    to_set, ConfigError, FixKind, FixMatcher, OneOrMany, PatternSpec, Resolution, RuleConfig,
    RuleTrace,
};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of classifying one element against a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Whether the element satisfies the rule.
    pub matched: bool,
    /// The element, with matched fixes stripped if stripping applied.
    pub name: String,
}

impl RuleMatch {
    /// A positive outcome under `name`.
    pub fn matched(name: impl Into<String>) -> Self {
        Self {
            matched: true,
            name: name.into(),
        }
    }

    /// A negative outcome under `name`.
    pub fn unmatched(name: impl Into<String>) -> Self {
        Self {
            matched: false,
            name: name.into(),
        }
    }
}

/// Per-call overrides of a rule's stripping flags.
///
/// `None` falls back to the flag given at construction.
///
/// ```
/// use fixset::StripOptions;
///
/// let keep = StripOptions::new().replace_prefix(false).replace_suffix(false);
/// assert_eq!(keep, StripOptions::keep_fixes());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripOptions {
    /// Override for stripping a matched prefix.
    pub replace_prefix: Option<bool>,
    /// Override for stripping a matched suffix.
    pub replace_suffix: Option<bool>,
}

impl StripOptions {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Never strip, whatever the rule says.
    #[must_use]
    pub fn keep_fixes() -> Self {
        Self {
            replace_prefix: Some(false),
            replace_suffix: Some(false),
        }
    }

    /// Override prefix stripping.
    #[must_use]
    pub fn replace_prefix(mut self, replace: bool) -> Self {
        self.replace_prefix = Some(replace);
        self
    }

    /// Override suffix stripping.
    #[must_use]
    pub fn replace_suffix(mut self, replace: bool) -> Self {
        self.replace_suffix = Some(replace);
        self
    }
}

/// A single naming rule.
///
/// Immutable after construction, so a `Rule` can be shared across threads and
/// classified concurrently.
///
/// # Example
///
/// ```
/// use fixset::{Rule, RuleConfig, RuleMatch};
///
/// let rule = Rule::new(
///     RuleConfig::new().prefixes("a").replace_prefix(true).replace_suffix(true),
/// )
/// .unwrap();
///
/// assert_eq!(rule.classify("abc"), RuleMatch::matched("bc"));
/// assert_eq!(rule.classify("a"), RuleMatch::matched(""));
/// assert_eq!(rule.classify("ba"), RuleMatch::unmatched("ba"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rule {
    elements: Option<HashSet<String>>,
    except: Option<HashSet<String>>,
    prefixes: Option<Vec<FixMatcher>>,
    suffixes: Option<Vec<FixMatcher>>,
    except_prefixes: Option<Vec<FixMatcher>>,
    except_suffixes: Option<Vec<FixMatcher>>,
    replace_prefix: bool,
    replace_suffix: bool,
}

impl Rule {
    /// Build a rule, compiling every prefix and suffix pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any pattern is unanchored, invalid or too long.
    pub fn new(config: RuleConfig) -> Result<Self, ConfigError> {
        let rule = Self {
            elements: config.elements.map(to_set),
            except: config.except.map(to_set),
            prefixes: compile_all(config.prefixes, FixKind::Prefix)?,
            suffixes: compile_all(config.suffixes, FixKind::Suffix)?,
            except_prefixes: compile_all(config.except_prefixes, FixKind::Prefix)?,
            except_suffixes: compile_all(config.except_suffixes, FixKind::Suffix)?,
            replace_prefix: config.replace_prefix.unwrap_or(false),
            replace_suffix: config.replace_suffix.unwrap_or(false),
        };

        debug!(
            elements = rule.elements.as_ref().map_or(0, HashSet::len),
            except = rule.except.as_ref().map_or(0, HashSet::len),
            prefixes = rule.prefixes.as_ref().map_or(0, Vec::len),
            suffixes = rule.suffixes.as_ref().map_or(0, Vec::len),
            except_prefixes = rule.except_prefixes.as_ref().map_or(0, Vec::len),
            except_suffixes = rule.except_suffixes.as_ref().map_or(0, Vec::len),
            replace_prefix = rule.replace_prefix,
            replace_suffix = rule.replace_suffix,
            "compiled rule"
        );

        Ok(rule)
    }

    /// Classify `element` using the construction-time stripping flags.
    #[must_use]
    pub fn classify(&self, element: &str) -> RuleMatch {
        self.resolve(element, StripOptions::default()).outcome
    }

    /// Classify `element`, overriding the stripping flags for this call only.
    #[must_use]
    pub fn classify_with(&self, element: &str, options: StripOptions) -> RuleMatch {
        self.resolve(element, options).outcome
    }

    /// Classify `element` and report which step decided it.
    #[must_use]
    pub fn classify_with_trace(&self, element: &str, options: StripOptions) -> RuleTrace {
        self.resolve(element, options)
    }

    /// Whether stripping a matched prefix is on by default.
    #[must_use]
    pub fn replaces_prefix(&self) -> bool {
        self.replace_prefix
    }

    /// Whether stripping a matched suffix is on by default.
    #[must_use]
    pub fn replaces_suffix(&self) -> bool {
        self.replace_suffix
    }

    fn resolve(&self, element: &str, options: StripOptions) -> RuleTrace {
        let replace_prefix = options.replace_prefix.unwrap_or(self.replace_prefix);
        let replace_suffix = options.replace_suffix.unwrap_or(self.replace_suffix);

        if self.except.as_ref().is_some_and(|s| s.contains(element)) {
            return trace(Resolution::Except, RuleMatch::unmatched(element));
        }

        if self.elements.as_ref().is_some_and(|s| s.contains(element)) {
            return trace(Resolution::Element, RuleMatch::matched(element));
        }

        // Exceptions only decide on a hit; a miss falls through to the positive criteria.
        if self.except_prefixes.is_some() || self.except_suffixes.is_some() {
            if let Some(name) = strip_fixes(
                element,
                self.except_prefixes.as_deref(),
                self.except_suffixes.as_deref(),
                replace_prefix,
                replace_suffix,
            ) {
                return trace(Resolution::ExceptFix, RuleMatch::unmatched(name));
            }
        }

        if self.prefixes.is_some() || self.suffixes.is_some() {
            return match strip_fixes(
                element,
                self.prefixes.as_deref(),
                self.suffixes.as_deref(),
                replace_prefix,
                replace_suffix,
            ) {
                Some(name) => trace(Resolution::Fix, RuleMatch::matched(name)),
                None => trace(Resolution::NoFix, RuleMatch::unmatched(element)),
            };
        }

        trace(Resolution::Default, RuleMatch::matched(element))
    }
}

fn trace(resolution: Resolution, outcome: RuleMatch) -> RuleTrace {
    RuleTrace {
        resolution,
        outcome,
    }
}

fn compile_all(
    specs: Option<OneOrMany<PatternSpec>>,
    kind: FixKind,
) -> Result<Option<Vec<FixMatcher>>, ConfigError> {
    specs
        .map(|specs| {
            specs
                .into_vec()
                .iter()
                .map(|spec| FixMatcher::compile(spec, kind))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}
