//! fixset - naming rules with prefix/suffix stripping and include/exclude composition
//!
//! Decides whether a string identifier is covered by a set of naming rules and,
//! optionally, returns the identifier with its matched prefix or suffix removed.
//!
//! # Architecture
//!
//! - [`FixMatcher`] — Compiled, anchored prefix or suffix pattern
//! - [`Rule`] — One set of criteria: elements, exceptions, prefixes, suffixes
//! - [`FixSet`] — Include rule + exclude rule with exclusion-veto precedence
//! - [`RuleConfig`] / [`FixSetConfig`] — Validated construction input (JSON/YAML or builder)
//!
//! # Key Design Insights
//!
//! 1. **Resolution order is load-bearing**: `except` beats `elements`, which beats
//!    exception prefixes/suffixes, which beat positive prefixes/suffixes.
//!
//! 2. **Exclusion decides, inclusion names**: an element matched by the exclude rule is
//!    never covered; when both rules permit it, the include rule's stripped name wins.
//!
//! 3. **Compile once**: every pattern is escaped, anchored and compiled at construction.
//!    Classification never fails and never mutates state.
//!
//! # Example
//!
//! ```
//! use fixset::prelude::*;
//!
//! let set = FixSet::new(
//!     FixSetConfig::new()
//!         .include(RuleConfig::new().prefixes("a").except_prefixes("aaaa").replace_prefix(true))
//!         .exclude(RuleConfig::new().prefixes("aa").except_prefixes("aaa").replace_prefix(true)),
//! )
//! .unwrap();
//!
//! assert_eq!(set.classify("aAge"), Some("Age".to_string()));
//! assert_eq!(set.classify("aaaAge"), Some("aaAge".to_string()));
//! assert_eq!(set.classify("aaAge"), None);
//! assert!(!set.covered("aaaaAge"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod convert;
mod fix_set;
mod pattern;
mod rule;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::{FixSetConfig, RuleConfig};
pub use convert::{patterns_from_value, strings_from_value, to_set, OneOrMany};
pub use fix_set::FixSet;
pub use pattern::{strip_fixes, FixKind, FixMatcher, PatternSpec};
pub use rule::{Rule, RuleMatch, StripOptions};
pub use trace::{ClassifyTrace, Decision, Resolution, RuleTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use fixset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        ConfigError,
        ConversionError,
        // Core types
        FixKind,
        FixMatcher,
        FixSet,
        // Config types
        FixSetConfig,
        OneOrMany,
        PatternSpec,
        Rule,
        RuleConfig,
        RuleMatch,
        StripOptions,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length for literal prefix/suffix patterns.
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex prefix/suffix patterns.
///
/// Shorter limit than [`MAX_PATTERN_LENGTH`] because regex compilation cost
/// scales faster than literal matching.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule construction and config validation.
///
/// These errors are raised at construction time, never during classification.
/// Fix the configuration and reconstruct the rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A prefix regex does not begin with `^`.
    #[error("prefix regular expression \"{0}\" must begin with \"^\"")]
    UnanchoredPrefix(String),

    /// A suffix regex does not end with `$`.
    #[error("suffix regular expression \"{0}\" must end with \"$\"")]
    UnanchoredSuffix(String),

    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A pattern exceeds [`MAX_PATTERN_LENGTH`] or [`MAX_REGEX_PATTERN_LENGTH`].
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// The config document has a key the schema does not know.
    #[error("\"{field}\" is not allowed")]
    UnknownField {
        /// Dotted path of the offending key (e.g. `include.xxx`).
        field: String,
    },

    /// A config value has the wrong shape.
    #[error("\"{field}\" {reason}")]
    InvalidField {
        /// Dotted path of the offending key.
        field: String,
        /// What was expected.
        reason: String,
    },

    /// A scalar-or-list value could not be normalized.
    #[error("\"{field}\": {source}")]
    Conversion {
        /// Dotted path of the offending key.
        field: String,
        /// The normalization failure.
        #[source]
        source: ConversionError,
    },

    /// The config document is not well-formed JSON/YAML.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Errors from normalizing a scalar-or-collection value into canonical form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The value is neither an accepted scalar nor a collection of them.
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        /// Accepted shapes.
        expected: &'static str,
        /// JSON type actually found.
        found: &'static str,
    },
}
