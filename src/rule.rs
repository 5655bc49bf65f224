//! Uniform rule views.
//!
//! This module defines the [`RuleRecord`] trait, the uniform read-only view
//! the exporter takes of one active rule, together with the two concrete
//! source shapes that implement it: [`ProfileRule`] (a rule read from a
//! design-time quality profile) and [`ScanRule`] (a rule handed over by a
//! runtime scan). The two shapes share no base type; they only share the
//! capability of exposing a module path, a severity, a rule key, an optional
//! template key and a parameter map.
//!
//! Wrapping a rule behind the view never fails: absent severity, template
//! key or parameters are represented as `None` or an empty map, not as
//! errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Uniform, immutable view over one configured rule.
///
/// The exporter only ever talks to rules through this trait, so both source
/// shapes can be fed to the same grouping and rendering code. Implementations
/// are pure accessors with no side effects.
pub trait RuleRecord {
    /// Slash-separated placement of the rule in the output module tree,
    /// e.g. `"Checker/TreeWalker/EmptyBlockCheck"`.
    fn module_path(&self) -> &str;

    /// Configured severity, if any.
    fn severity(&self) -> Option<&str>;

    /// Stable identifier of this rule instance.
    fn rule_key(&self) -> &str;

    /// Key of the rule template this instance was derived from, if it is a
    /// template instantiation.
    fn template_key(&self) -> Option<&str>;

    /// Configured parameters. Keys are unique; iteration is in ascending
    /// key order.
    fn parameters(&self) -> &BTreeMap<String, String>;
}

/// An active rule as stored in a design-time quality profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileRule {
    /// Placement of the rule in the output module tree.
    pub config_key: String,

    /// Stable identifier of this rule instance.
    pub rule_key: String,

    /// Configured severity, if any.
    #[serde(default)]
    pub severity: Option<String>,

    /// Template this rule was instantiated from, for template rules.
    #[serde(default)]
    pub template_key: Option<String>,

    /// Configured parameter values, keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl RuleRecord for ProfileRule {
    fn module_path(&self) -> &str {
        &self.config_key
    }

    fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    fn rule_key(&self) -> &str {
        &self.rule_key
    }

    fn template_key(&self) -> Option<&str> {
        self.template_key.as_deref()
    }

    fn parameters(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// An active rule as handed over by a runtime scan.
///
/// Same capability as [`ProfileRule`] with the field names the scan side
/// uses: the placement is called an internal key and the template reference
/// a template rule key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRule {
    /// Placement of the rule in the output module tree.
    pub internal_key: String,

    /// Stable identifier of this rule instance.
    pub rule_key: String,

    /// Configured severity, if any.
    #[serde(default)]
    pub severity: Option<String>,

    /// Template this rule was instantiated from, for template rules.
    #[serde(default)]
    pub template_rule_key: Option<String>,

    /// Configured parameter values, keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl RuleRecord for ScanRule {
    fn module_path(&self) -> &str {
        &self.internal_key
    }

    fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    fn rule_key(&self) -> &str {
        &self.rule_key
    }

    fn template_key(&self) -> Option<&str> {
        self.template_rule_key.as_deref()
    }

    fn parameters(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_rule(config_key: &str) -> ProfileRule {
        ProfileRule {
            config_key: config_key.to_string(),
            rule_key: "com.example.rule".to_string(),
            severity: Some("warning".to_string()),
            template_key: None,
            params: BTreeMap::new(),
        }
    }

    #[test]
    fn test_profile_rule_exposes_module_path_and_key() {
        let rule = profile_rule("Checker/TreeWalker/EmptyBlockCheck");
        assert_eq!(rule.module_path(), "Checker/TreeWalker/EmptyBlockCheck");
        assert_eq!(rule.rule_key(), "com.example.rule");
        assert_eq!(rule.severity(), Some("warning"));
        assert_eq!(rule.template_key(), None);
        assert!(rule.parameters().is_empty());
    }

    #[test]
    fn test_scan_rule_exposes_the_same_view() {
        let mut params = BTreeMap::new();
        params.insert("max".to_string(), "10".to_string());
        let rule = ScanRule {
            internal_key: "Checker/SomeCheck".to_string(),
            rule_key: "instance-1".to_string(),
            severity: None,
            template_rule_key: Some("com.example.template".to_string()),
            params,
        };
        assert_eq!(rule.module_path(), "Checker/SomeCheck");
        assert_eq!(rule.severity(), None);
        assert_eq!(rule.template_key(), Some("com.example.template"));
        assert_eq!(rule.parameters().get("max").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_absent_optional_fields_deserialize_to_empty_views() {
        let rule: ProfileRule = serde_json::from_str(
            r#"{"config_key": "Checker/TreeWalker/A", "rule_key": "a"}"#,
        )
        .expect("minimal rule should deserialize");
        assert_eq!(rule.severity(), None);
        assert_eq!(rule.template_key(), None);
        assert!(rule.parameters().is_empty());
    }

    #[test]
    fn test_parameters_iterate_in_ascending_key_order() {
        let mut params = BTreeMap::new();
        params.insert("zeta".to_string(), "1".to_string());
        params.insert("alpha".to_string(), "2".to_string());
        params.insert("mid".to_string(), "3".to_string());
        let rule = ProfileRule {
            params,
            ..profile_rule("Checker/TreeWalker/A")
        };
        let keys: Vec<&str> = rule.parameters().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_both_shapes_can_be_used_through_the_trait_object() {
        let profile = profile_rule("Checker/TreeWalker/A");
        let scan = ScanRule {
            internal_key: "Checker/B".to_string(),
            rule_key: "b".to_string(),
            severity: None,
            template_rule_key: None,
            params: BTreeMap::new(),
        };
        let views: Vec<&dyn RuleRecord> = vec![&profile, &scan];
        let paths: Vec<&str> = views.iter().map(|v| v.module_path()).collect();
        assert_eq!(paths, vec!["Checker/TreeWalker/A", "Checker/B"]);
    }
}
