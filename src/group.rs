//! Grouping of rules by their target module path.
//!
//! A single pass partitions the input rules into per-path buckets while
//! preserving input order inside each bucket. The map itself is unordered;
//! only the tree-walker buckets get a deterministic ordering, via
//! [`sorted_module_paths`], before rendering.

use crate::rule::RuleRecord;
use std::collections::HashMap;

/// Module paths with this prefix are rendered inside the `TreeWalker`
/// wrapper module; everything else becomes a direct child of `Checker`.
pub const TREE_WALKER_PREFIX: &str = "Checker/TreeWalker/";

/// Rules sharing a module path, keyed by that path.
pub type ModuleGroups<'a> = HashMap<String, Vec<&'a dyn RuleRecord>>;

/// Returns true if the module path places the rule in the tree-walking
/// phase. The prefix match is case-insensitive.
pub fn is_tree_walker(module_path: &str) -> bool {
    module_path
        .get(..TREE_WALKER_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TREE_WALKER_PREFIX))
}

/// Partitions rules by module path.
///
/// Appends each rule to the bucket keyed by its path, creating the bucket on
/// first occurrence. Nothing is deduplicated or merged: rules sharing a path
/// (even with identical keys) are all kept, in input order.
pub fn group_by_module_path<'a>(rules: &[&'a dyn RuleRecord]) -> ModuleGroups<'a> {
    let mut groups: ModuleGroups<'a> = HashMap::new();
    for rule in rules {
        groups
            .entry(rule.module_path().to_string())
            .or_default()
            .push(*rule);
    }
    groups
}

/// Returns every group key in ascending case-insensitive lexicographic
/// order.
///
/// The renderer uses this for the tree-walker bucket, where downstream
/// tooling is sensitive to module ordering.
pub fn sorted_module_paths<'a>(groups: &'a ModuleGroups<'_>) -> Vec<&'a str> {
    let mut paths: Vec<&str> = groups.keys().map(String::as_str).collect();
    paths.sort_by_key(|path| path.to_lowercase());
    paths
}
