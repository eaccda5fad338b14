//! Fix set conformance fixture runner
//!
//! Loads YAML fixtures and runs them against [`FixSet`].
//!
//! ```yaml
//! name: include_exclude
//! description: Include rule names, exclude rule decides
//! config:
//!   include: { prefixes: a, replacePrefix: true }
//!   exclude: { prefixes: aa }
//! cases:
//!   - element: aAge
//!     expect: Age
//!   - element: aaAge
//!     expect: null          # not covered
//! ```
//!
//! A fixture with `expect_error: true` must fail to build; `error_contains`
//! checks the message.

use fixset::{ConfigError, FixSet, FixSetConfig, StripOptions};
use serde::Deserialize;

/// A complete fix set fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw config document, validated when the fixture is built.
    #[serde(default = "empty_config")]
    pub config: serde_json::Value,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default)]
    pub expect_error: bool,
    #[serde(default)]
    pub error_contains: Option<String>,
}

fn empty_config() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Per-call stripping overrides.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OptionsConfig {
    #[serde(default)]
    pub replace_prefix: Option<bool>,
    #[serde(default)]
    pub replace_suffix: Option<bool>,
}

impl From<OptionsConfig> for StripOptions {
    fn from(config: OptionsConfig) -> Self {
        StripOptions {
            replace_prefix: config.replace_prefix,
            replace_suffix: config.replace_suffix,
        }
    }
}

/// Test case: `expect` is the covered name, or `null` for not covered.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub element: String,
    #[serde(default)]
    pub expect: Option<String>,
    #[serde(default)]
    pub options: Option<OptionsConfig>,
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub element: String,
    pub passed: bool,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Validate the config document and build the fix set.
    pub fn build(&self) -> Result<FixSet, ConfigError> {
        FixSet::new(FixSetConfig::from_value(&self.config)?)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Result<Vec<CaseResult>, ConfigError> {
        let set = self.build()?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let options = case.options.map(StripOptions::from).unwrap_or_default();
                let actual = set.classify_with(&case.element, options);
                CaseResult {
                    element: case.element.clone(),
                    passed: actual == case.expect && set.covered(&case.element) == actual.is_some(),
                    expected: case.expect.clone(),
                    actual,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        if self.expect_error {
            let err = match self.build() {
                Ok(_) => panic!("Fixture '{}' expected a config error", self.name),
                Err(e) => e.to_string(),
            };
            if let Some(needle) = &self.error_contains {
                assert!(
                    err.contains(needle.as_str()),
                    "Fixture '{}': error {err:?} does not contain {needle:?}",
                    self.name
                );
            }
            return;
        }

        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' element {:?} failed: expected {:?}, got {:?}",
                self.name, result.element, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_runs_inline_fixture() {
        let yaml = r#"
name: inline
config:
  include: { prefixes: a, replacePrefix: true }
cases:
  - element: abc
    expect: bc
  - element: abc
    options: { replacePrefix: false }
    expect: abc
  - element: b
    expect: null
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.cases.len(), 3);
        assert!(fixture.run().unwrap().iter().all(|r| r.passed));
    }

    #[test]
    fn missing_config_means_no_rules() {
        let fixture = Fixture::from_yaml("name: bare\ncases:\n  - element: x\n    expect: x\n").unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn error_fixture() {
        let yaml = "name: bad\nconfig: { xxx: 3 }\nexpect_error: true\nerror_contains: '\"xxx\"'\n";
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert!(fixture.build().is_err());
        fixture.run_and_assert();
    }

    #[test]
    fn multi_document() {
        let yaml = "name: one\n---\nname: two\n";
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].name, "two");
    }
}
