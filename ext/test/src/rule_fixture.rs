//! Single-rule fixture runner
//!
//! ```yaml
//! name: prefix_only
//! rule: { prefixes: a, replacePrefix: true, replaceSuffix: true }
//! cases:
//!   - { element: abc, matched: true, name: bc }
//!   - { element: ba, matched: false, name: ba }
//! ```

use crate::fixture::OptionsConfig;
use fixset::{ConfigError, Rule, RuleConfig, RuleMatch, StripOptions};
use serde::Deserialize;

/// A single-rule fixture.
#[derive(Debug, Deserialize)]
pub struct RuleFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw rule document, validated when the fixture is built.
    pub rule: serde_json::Value,
    pub cases: Vec<RuleCase>,
}

/// Expected `{matched, name}` for one element.
#[derive(Debug, Deserialize)]
pub struct RuleCase {
    pub element: String,
    pub matched: bool,
    pub name: String,
    #[serde(default)]
    pub options: Option<OptionsConfig>,
}

impl RuleFixture {
    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Validate the rule document and build the rule.
    pub fn build(&self) -> Result<Rule, ConfigError> {
        Rule::new(RuleConfig::from_value(&self.rule, "rule")?)
    }

    /// Run all cases and panic on first failure
    pub fn run_and_assert(&self) {
        let rule = self
            .build()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to build: {e}", self.name));

        for case in &self.cases {
            let options = case.options.map(StripOptions::from).unwrap_or_default();
            let actual = rule.classify_with(&case.element, options);
            let expected = RuleMatch {
                matched: case.matched,
                name: case.name.clone(),
            };
            assert_eq!(
                actual, expected,
                "Fixture '{}' element {:?}",
                self.name, case.element
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_inline_fixture() {
        let yaml = r#"
name: suffix_only
rule: { suffixes: "=", replaceSuffix: true }
cases:
  - { element: "A=", matched: true, name: A }
  - { element: aaa, matched: false, name: aaa }
  - { element: "A=", matched: true, name: "A=", options: { replaceSuffix: false } }
"#;
        let fixtures = RuleFixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 1);
        fixtures[0].run_and_assert();
    }

    #[test]
    fn invalid_rule_reports_scoped_field() {
        let yaml = "name: bad\nrule: { prefix: a }\ncases: []\n";
        let fixtures = RuleFixture::from_yaml_multi(yaml).unwrap();
        let err = fixtures[0].build().unwrap_err();
        assert_eq!(err.to_string(), r#""rule.prefix" is not allowed"#);
    }
}
