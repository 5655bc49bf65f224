//! Checkstyle configuration document generation.
//!
//! # Overview
//!
//! This module renders a collection of active rules into the XML
//! configuration document Checkstyle consumes. Generation is a single
//! linear pass over two structural buckets: rules placed directly under the
//! root `Checker` module and rules placed inside the `TreeWalker` wrapper,
//! identified by the reserved [`TREE_WALKER_PREFIX`](crate::group::TREE_WALKER_PREFIX)
//! on their module path.
//!
//! Module and property names and values are XML-escaped; the two filter
//! fragments from the settings are spliced in verbatim. The settings source
//! is trusted to supply well-formed XML there, so the fragments are not
//! re-escaped (escaping them would double-encode entities downstream).
//!
//! # Usage
//!
//! ```rust
//! use checkgen_core::config::ExportSettings;
//! use checkgen_core::export::ConfigExporter;
//! use checkgen_core::profile::Profile;
//!
//! let settings = ExportSettings::default().with_tab_width("4");
//! let exporter = ConfigExporter::new(&settings);
//! let mut out = Vec::new();
//! exporter.export_profile(&Profile::new("Sonar way"), &mut out)?;
//! # Ok::<(), checkgen_core::error::ExportError>(())
//! ```

use crate::config::ExportSettings;
use crate::error::{ExportError, Result};
use crate::group::{ModuleGroups, group_by_module_path, is_tree_walker, sorted_module_paths};
use crate::profile::Profile;
use crate::rule::{RuleRecord, ScanRule};
use crate::summary::ExportSummary;
use std::io::Write;

/// Fixed document type declaration for Checkstyle configuration files.
pub const DOCTYPE_DECLARATION: &str =
    "<!DOCTYPE module PUBLIC \"-//Checkstyle//DTD Checkstyle Configuration 1.3//EN\" \
     \"https://checkstyle.org/dtds/configuration_1_3.dtd\">";

const CLOSE_MODULE: &str = "</module>";

/// Literal filter element whose presence in the checker filters enables the
/// suppress-warnings holder marker inside `TreeWalker`.
const SUPPRESS_WARNINGS_FILTER: &str = "<module name=\"SuppressWarningsFilter\" />";

/// Renders active rules into a Checkstyle configuration document.
///
/// The exporter borrows a read-only settings lookup; every export call
/// builds its own groups from scratch, so one exporter can serve any number
/// of independent exports.
pub struct ConfigExporter<'a> {
    settings: &'a ExportSettings,
}

impl<'a> ConfigExporter<'a> {
    /// Creates an exporter over the given settings.
    #[must_use]
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self { settings }
    }

    /// Exports a design-time quality profile to the given sink.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Sink`] naming the profile if any write to the
    /// sink fails; the sink may already hold a partial document in that
    /// case.
    pub fn export_profile<W: Write>(&self, profile: &Profile, out: &mut W) -> Result<ExportSummary> {
        let views: Vec<&dyn RuleRecord> = profile
            .rules
            .iter()
            .map(|rule| rule as &dyn RuleRecord)
            .collect();
        self.export(&profile.name, &views, out)
    }

    /// Exports runtime scan rules to the given sink.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Sink`] if any write to the sink fails.
    pub fn export_scan_rules<W: Write>(
        &self,
        rules: &[ScanRule],
        out: &mut W,
    ) -> Result<ExportSummary> {
        let views: Vec<&dyn RuleRecord> = rules.iter().map(|rule| rule as &dyn RuleRecord).collect();
        self.export("active rules", &views, out)
    }

    fn export<W: Write>(
        &self,
        target: &str,
        rules: &[&dyn RuleRecord],
        out: &mut W,
    ) -> Result<ExportSummary> {
        let groups = group_by_module_path(rules);
        tracing::debug!(
            "Exporting '{}': {} rules in {} module groups",
            target,
            rules.len(),
            groups.len()
        );
        self.generate_xml(out, &groups)
            .map_err(|source| ExportError::sink(target, source))
    }

    fn generate_xml<W: Write>(
        &self,
        out: &mut W,
        groups: &ModuleGroups<'_>,
    ) -> std::io::Result<ExportSummary> {
        let mut summary = ExportSummary::default();
        append_header(out)?;
        self.append_tab_width(out)?;
        self.append_checker_filters(out)?;
        append_checker_modules(out, groups, &mut summary)?;
        self.append_tree_walker(out, groups, &mut summary)?;
        out.write_all(CLOSE_MODULE.as_bytes())?;
        Ok(summary)
    }

    fn append_tab_width<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        append_module_property(out, "tabWidth", self.settings.tab_width())
    }

    fn append_checker_filters<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        append_raw_fragment(out, self.settings.checker_filters())
    }

    fn append_tree_walker<W: Write>(
        &self,
        out: &mut W,
        groups: &ModuleGroups<'_>,
        summary: &mut ExportSummary,
    ) -> std::io::Result<()> {
        out.write_all(b"<module name=\"TreeWalker\">")?;
        if self.suppress_warnings_enabled() {
            out.write_all(b"<module name=\"SuppressWarningsHolder\"/>")?;
        }
        for path in sorted_module_paths(groups) {
            if !is_tree_walker(path) {
                continue;
            }
            if let Some(rules) = groups.get(path) {
                for rule in rules {
                    append_module(out, *rule)?;
                    summary.tree_walker_modules += 1;
                }
            }
        }
        append_raw_fragment(out, self.settings.tree_walker_filters())?;
        out.write_all(CLOSE_MODULE.as_bytes())?;
        Ok(())
    }

    fn suppress_warnings_enabled(&self) -> bool {
        self.settings
            .checker_filters()
            .is_some_and(|filters| filters.contains(SUPPRESS_WARNINGS_FILTER))
    }
}

fn append_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(
        out,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>{}<!-- Generated by Sonar --><module name=\"Checker\">",
        DOCTYPE_DECLARATION
    )
}

/// Direct children of `Checker`, in the group map's own iteration order.
/// Rules within a group keep input order; cross-group order is unspecified.
fn append_checker_modules<W: Write>(
    out: &mut W,
    groups: &ModuleGroups<'_>,
    summary: &mut ExportSummary,
) -> std::io::Result<()> {
    for (path, rules) in groups {
        if is_tree_walker(path) {
            continue;
        }
        for rule in rules {
            append_module(out, *rule)?;
            summary.checker_modules += 1;
        }
    }
    Ok(())
}

fn append_module<W: Write>(out: &mut W, rule: &dyn RuleRecord) -> std::io::Result<()> {
    let name = rule.module_path().rsplit('/').next().unwrap_or_default();
    write!(out, "<module name=\"{}\">", escape_xml(name))?;
    if rule.template_key().is_some_and(|key| !is_blank(key)) {
        // The instance id lets Checkstyle tell sibling instantiations of the
        // same templated module apart.
        append_module_property(out, "id", Some(rule.rule_key()))?;
    }
    append_module_property(out, "severity", rule.severity())?;
    for (name, value) in rule.parameters() {
        append_module_property(out, name, Some(value))?;
    }
    out.write_all(CLOSE_MODULE.as_bytes())?;
    Ok(())
}

fn append_module_property<W: Write>(
    out: &mut W,
    name: &str,
    value: Option<&str>,
) -> std::io::Result<()> {
    if let Some(value) = value.filter(|v| !is_blank(v)) {
        write!(
            out,
            "<property name=\"{}\" value=\"{}\"/>",
            escape_xml(name),
            escape_xml(value)
        )?;
    }
    Ok(())
}

/// Splices a caller-supplied filter fragment into the document verbatim.
/// Absent or blank fragments emit nothing.
fn append_raw_fragment<W: Write>(out: &mut W, fragment: Option<&str>) -> std::io::Result<()> {
    if let Some(fragment) = fragment.filter(|f| !is_blank(f)) {
        out.write_all(fragment.as_bytes())?;
    }
    Ok(())
}

/// Escapes special XML characters.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ProfileRule;
    use std::collections::BTreeMap;
    use std::io;

    const EMPTY_DOCUMENT: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
        <!DOCTYPE module PUBLIC \"-//Checkstyle//DTD Checkstyle Configuration 1.3//EN\" \
        \"https://checkstyle.org/dtds/configuration_1_3.dtd\">\
        <!-- Generated by Sonar --><module name=\"Checker\">\
        <module name=\"TreeWalker\"></module></module>";

    fn rule(config_key: &str, rule_key: &str) -> ProfileRule {
        ProfileRule {
            config_key: config_key.to_string(),
            rule_key: rule_key.to_string(),
            severity: Some("warning".to_string()),
            template_key: None,
            params: BTreeMap::new(),
        }
    }

    fn profile(rules: Vec<ProfileRule>) -> Profile {
        Profile {
            name: "Sonar way".to_string(),
            rules,
        }
    }

    fn render(profile: &Profile, settings: &ExportSettings) -> String {
        let mut out = Vec::new();
        ConfigExporter::new(settings)
            .export_profile(profile, &mut out)
            .expect("export should succeed into a Vec");
        String::from_utf8(out).expect("document should be valid UTF-8")
    }

    #[test]
    fn test_empty_profile_renders_the_exact_empty_document() {
        let xml = render(&profile(Vec::new()), &ExportSettings::default());
        assert_eq!(xml, EMPTY_DOCUMENT);
    }

    #[test]
    fn test_tab_width_is_emitted_right_after_the_root_module() {
        let settings = ExportSettings::default().with_tab_width("4");
        let xml = render(&profile(Vec::new()), &settings);
        assert!(xml.contains(
            "<module name=\"Checker\"><property name=\"tabWidth\" value=\"4\"/>"
        ));
    }

    #[test]
    fn test_blank_tab_width_is_omitted() {
        let settings = ExportSettings::default().with_tab_width("   ");
        let xml = render(&profile(Vec::new()), &settings);
        assert!(!xml.contains("tabWidth"));
    }

    #[test]
    fn test_checker_filters_are_spliced_verbatim() {
        let fragment = "<module name=\"SeverityMatchFilter\">\
            <property name=\"severity\" value=\"info\"/></module>";
        let settings = ExportSettings::default().with_checker_filters(fragment);
        let xml = render(&profile(Vec::new()), &settings);
        assert!(xml.contains(fragment));
        assert!(!xml.contains("&lt;module name=\"SeverityMatchFilter\""));
    }

    #[test]
    fn test_blank_checker_filters_emit_nothing() {
        let settings = ExportSettings::default().with_checker_filters("  ");
        let xml = render(&profile(Vec::new()), &settings);
        assert_eq!(xml, EMPTY_DOCUMENT);
    }

    #[test]
    fn test_tree_walker_filters_are_appended_before_the_wrapper_closes() {
        let fragment = "<module name=\"SuppressionCommentFilter\"/>";
        let settings = ExportSettings::default().with_tree_walker_filters(fragment);
        let xml = render(&profile(Vec::new()), &settings);
        assert!(xml.ends_with(&format!("{fragment}</module></module>")));
    }

    #[test]
    fn test_suppress_warnings_holder_is_the_first_child_of_tree_walker() {
        let settings = ExportSettings::default()
            .with_checker_filters("<module name=\"SuppressWarningsFilter\" />");
        let xml = render(&profile(Vec::new()), &settings);
        assert!(xml.contains(
            "<module name=\"TreeWalker\"><module name=\"SuppressWarningsHolder\"/>"
        ));
    }

    #[test]
    fn test_suppress_warnings_holder_requires_the_literal_fragment() {
        // A self-closing element without the space does not match.
        let settings =
            ExportSettings::default().with_checker_filters("<module name=\"SuppressWarningsFilter\"/>");
        let xml = render(&profile(Vec::new()), &settings);
        assert!(!xml.contains("SuppressWarningsHolder"));
    }

    #[test]
    fn test_checker_level_rules_render_before_the_tree_walker_wrapper() {
        let xml = render(
            &profile(vec![rule("Checker/FileLengthCheck", "file-length")]),
            &ExportSettings::default(),
        );
        let module_pos = xml
            .find("<module name=\"FileLengthCheck\">")
            .expect("checker-level module should be rendered");
        let walker_pos = xml
            .find("<module name=\"TreeWalker\">")
            .expect("wrapper should be rendered");
        assert!(module_pos < walker_pos);
    }

    #[test]
    fn test_tree_walker_groups_render_sorted_by_path_not_input_order() {
        let xml = render(
            &profile(vec![
                rule("Checker/TreeWalker/B", "b"),
                rule("Checker/TreeWalker/A", "a"),
            ]),
            &ExportSettings::default(),
        );
        let a = xml.find("<module name=\"A\">").expect("A should render");
        let b = xml.find("<module name=\"B\">").expect("B should render");
        assert!(a < b);
    }

    #[test]
    fn test_rules_within_a_group_keep_input_order() {
        let mut first = rule("Checker/TreeWalker/Regexp", "first");
        first.params.insert("format".to_string(), "one".to_string());
        let mut second = rule("Checker/TreeWalker/Regexp", "second");
        second.params.insert("format".to_string(), "two".to_string());

        let xml = render(&profile(vec![first, second]), &ExportSettings::default());
        let one = xml.find("value=\"one\"").expect("first rule should render");
        let two = xml.find("value=\"two\"").expect("second rule should render");
        assert!(one < two);
    }

    #[test]
    fn test_duplicate_rules_are_all_rendered() {
        let xml = render(
            &profile(vec![
                rule("Checker/TreeWalker/A", "same"),
                rule("Checker/TreeWalker/A", "same"),
            ]),
            &ExportSettings::default(),
        );
        assert_eq!(xml.matches("<module name=\"A\">").count(), 2);
    }

    #[test]
    fn test_template_rule_emits_id_before_severity() {
        let mut templated = rule("Checker/TreeWalker/Regexp", "my-instance");
        templated.template_key = Some("com.example.RegexpTemplate".to_string());

        let xml = render(&profile(vec![templated]), &ExportSettings::default());
        assert!(xml.contains(
            "<module name=\"Regexp\">\
             <property name=\"id\" value=\"my-instance\"/>\
             <property name=\"severity\" value=\"warning\"/>"
        ));
    }

    #[test]
    fn test_template_id_uses_the_rule_key_not_the_template_key() {
        let mut templated = rule("Checker/TreeWalker/Regexp", "my-instance");
        templated.template_key = Some("com.example.RegexpTemplate".to_string());

        let xml = render(&profile(vec![templated]), &ExportSettings::default());
        assert!(!xml.contains("com.example.RegexpTemplate"));
    }

    #[test]
    fn test_non_template_rule_emits_no_id_property() {
        let xml = render(
            &profile(vec![rule("Checker/TreeWalker/A", "plain")]),
            &ExportSettings::default(),
        );
        assert!(!xml.contains("name=\"id\""));
    }

    #[test]
    fn test_blank_severity_and_blank_params_are_suppressed() {
        let mut sparse = rule("Checker/TreeWalker/A", "sparse");
        sparse.severity = Some("  ".to_string());
        sparse.params.insert("empty".to_string(), String::new());
        sparse.params.insert("spaces".to_string(), "   ".to_string());
        sparse.params.insert("kept".to_string(), "yes".to_string());

        let xml = render(&profile(vec![sparse]), &ExportSettings::default());
        assert!(!xml.contains("severity"));
        assert!(!xml.contains("empty"));
        assert!(!xml.contains("spaces"));
        assert!(xml.contains("<property name=\"kept\" value=\"yes\"/>"));
    }

    #[test]
    fn test_params_render_in_ascending_name_order() {
        let mut ordered = rule("Checker/TreeWalker/A", "ordered");
        ordered.params.insert("zeta".to_string(), "1".to_string());
        ordered.params.insert("alpha".to_string(), "2".to_string());

        let xml = render(&profile(vec![ordered]), &ExportSettings::default());
        let alpha = xml.find("name=\"alpha\"").expect("alpha should render");
        let zeta = xml.find("name=\"zeta\"").expect("zeta should render");
        assert!(alpha < zeta);
    }

    #[test]
    fn test_module_names_and_property_values_are_escaped() {
        let mut odd = rule("Checker/TreeWalker/Weird<Name>", "odd");
        odd.params
            .insert("format".to_string(), "a < b && c \"quoted\"".to_string());

        let xml = render(&profile(vec![odd]), &ExportSettings::default());
        assert!(xml.contains("<module name=\"Weird&lt;Name&gt;\">"));
        assert!(xml.contains("value=\"a &lt; b &amp;&amp; c &quot;quoted&quot;\""));
    }

    #[test]
    fn test_escape_xml_handles_all_special_chars() {
        assert_eq!(escape_xml("&"), "&amp;");
        assert_eq!(escape_xml("<"), "&lt;");
        assert_eq!(escape_xml(">"), "&gt;");
        assert_eq!(escape_xml("\""), "&quot;");
        assert_eq!(escape_xml("'"), "&apos;");
        assert_eq!(escape_xml("normal text"), "normal text");
        assert_eq!(escape_xml("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn test_summary_counts_both_buckets() {
        let summary = ConfigExporter::new(&ExportSettings::default())
            .export_profile(
                &profile(vec![
                    rule("Checker/FileLengthCheck", "one"),
                    rule("Checker/TreeWalker/A", "two"),
                    rule("Checker/TreeWalker/B", "three"),
                ]),
                &mut Vec::new(),
            )
            .expect("export should succeed");
        assert_eq!(summary.checker_modules, 1);
        assert_eq!(summary.tree_walker_modules, 2);
        assert_eq!(summary.total(), 3);
    }

    /// Accepts the first `limit` bytes, then fails every write.
    struct FailingWriter {
        limit: usize,
        written: usize,
    }

    impl io::Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written + buf.len() > self.limit {
                return Err(io::Error::other("sink closed"));
            }
            self.written += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_on_the_footer_is_wrapped_and_names_the_profile() {
        let exported = render(&profile(Vec::new()), &ExportSettings::default());
        // Fail inside the closing tags at the very end of the document.
        let mut failing = FailingWriter {
            limit: exported.len() - 4,
            written: 0,
        };

        let err = ConfigExporter::new(&ExportSettings::default())
            .export_profile(&profile(Vec::new()), &mut failing)
            .expect_err("export into a failing sink should error");
        assert!(matches!(err, ExportError::Sink { .. }));
        assert!(format!("{err}").contains("Sonar way"));
    }

    #[test]
    fn test_scan_rule_export_names_the_fixed_target_on_failure() {
        let scan = ScanRule {
            internal_key: "Checker/TreeWalker/A".to_string(),
            rule_key: "a".to_string(),
            severity: None,
            template_rule_key: None,
            params: BTreeMap::new(),
        };
        let mut failing = FailingWriter {
            limit: 0,
            written: 0,
        };

        let err = ConfigExporter::new(&ExportSettings::default())
            .export_scan_rules(std::slice::from_ref(&scan), &mut failing)
            .expect_err("export into a failing sink should error");
        assert!(format!("{err}").contains("active rules"));
    }

    #[test]
    fn test_scan_rules_render_like_profile_rules() {
        let scan = ScanRule {
            internal_key: "Checker/TreeWalker/EmptyBlockCheck".to_string(),
            rule_key: "empty-block".to_string(),
            severity: Some("error".to_string()),
            template_rule_key: None,
            params: BTreeMap::new(),
        };
        let mut out = Vec::new();
        ConfigExporter::new(&ExportSettings::default())
            .export_scan_rules(&[scan], &mut out)
            .expect("export should succeed");
        let xml = String::from_utf8(out).expect("document should be valid UTF-8");
        assert!(xml.contains(
            "<module name=\"EmptyBlockCheck\"><property name=\"severity\" value=\"error\"/></module>"
        ));
    }
}
