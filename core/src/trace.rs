//! Classification trace types for debugging rule behavior.
//!
//! Trace types mirror the runtime types ([`Rule`](crate::Rule),
//! [`FixSet`](crate::FixSet)) but capture which step decided the outcome.
//! Use `classify_with_trace()` to see the full decision path.
//!
//! # Example
//!
//! ```
//! use fixset::prelude::*;
//! use fixset::{Decision, Resolution};
//!
//! let set = FixSet::new(
//!     FixSetConfig::new().exclude(RuleConfig::new().prefixes("aa").except_prefixes("aaa")),
//! )
//! .unwrap();
//!
//! let trace = set.classify_with_trace("aaAge", StripOptions::default());
//! assert_eq!(trace.decision, Decision::Excluded);
//! assert_eq!(trace.exclude.unwrap().resolution, Resolution::Fix);
//! assert_eq!(trace.result, None);
//! ```

use crate::RuleMatch;
use std::fmt;

/// Which step of a [`Rule`](crate::Rule) decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Listed in `except`: not matched.
    Except,
    /// Listed in `elements`: matched, name unchanged.
    Element,
    /// An exception prefix or suffix matched: not matched.
    ExceptFix,
    /// A prefix or suffix matched: matched.
    Fix,
    /// Prefixes or suffixes are configured but none matched: not matched.
    NoFix,
    /// No positive criteria configured: matched.
    Default,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Except => "except",
            Self::Element => "element",
            Self::ExceptFix => "except-fix",
            Self::Fix => "fix",
            Self::NoFix => "no-fix",
            Self::Default => "default",
        };
        f.write_str(s)
    }
}

/// Trace of a single [`Rule`](crate::Rule) classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// The step that decided the outcome.
    pub resolution: Resolution,
    /// The outcome itself.
    pub outcome: RuleMatch,
}

/// Which row of the include/exclude precedence table applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The exclude rule matched: not covered.
    Excluded,
    /// The include rule did not match: not covered.
    NotIncluded,
    /// The include rule matched: covered under the include rule's name.
    Included,
    /// Only an exclude rule exists and it did not match: covered under its name.
    NotExcluded,
    /// No rules configured: covered, name unchanged.
    Unfiltered,
}

impl Decision {
    /// Whether the element is covered.
    #[must_use]
    pub fn is_covered(self) -> bool {
        matches!(self, Self::Included | Self::NotExcluded | Self::Unfiltered)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Excluded => "excluded",
            Self::NotIncluded => "not-included",
            Self::Included => "included",
            Self::NotExcluded => "not-excluded",
            Self::Unfiltered => "unfiltered",
        };
        f.write_str(s)
    }
}

/// Trace of a [`FixSet`](crate::FixSet) classification.
///
/// Both rules are evaluated whenever they are configured, so both traces are
/// present even when the exclude rule alone decided the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyTrace {
    /// The classified element.
    pub element: String,
    /// Include rule trace, if an include rule is configured.
    pub include: Option<RuleTrace>,
    /// Exclude rule trace, if an exclude rule is configured.
    pub exclude: Option<RuleTrace>,
    /// The precedence row that applied.
    pub decision: Decision,
    /// Final name, or `None` when not covered.
    pub result: Option<String>,
}

impl fmt::Display for ClassifyTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.element, self.decision)?;
        if let Some(name) = &self.result {
            write!(f, " as {name:?}")?;
        }
        for (label, trace) in [("include", &self.include), ("exclude", &self.exclude)] {
            if let Some(t) = trace {
                write!(
                    f,
                    " [{label}: {} matched={}]",
                    t.resolution, t.outcome.matched
                )?;
            }
        }
        Ok(())
    }
}
