//! CLI-friendly summary of a completed export.

/// Counters gathered while a document is generated.
///
/// Returned by the exporter on success so callers can report what was
/// written without re-parsing the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Modules rendered as direct children of `Checker`.
    pub checker_modules: usize,
    /// Modules rendered inside the `TreeWalker` wrapper.
    pub tree_walker_modules: usize,
}

impl ExportSummary {
    /// Total number of rule modules written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.checker_modules + self.tree_walker_modules
    }
}

/// Renders a single-line summary of an export.
///
/// This produces a minimal one-line output format suitable for logs and
/// pre-commit hooks.
///
/// # Example
///
/// ```rust
/// use checkgen_core::summary::{render_summary_line, ExportSummary};
///
/// let summary = ExportSummary { checker_modules: 1, tree_walker_modules: 4 };
/// assert_eq!(
///     render_summary_line(&summary),
///     "5 modules exported (1 checker-level, 4 tree-walker)"
/// );
/// ```
#[must_use]
pub fn render_summary_line(summary: &ExportSummary) -> String {
    let total = summary.total();
    format!(
        "{} module{} exported ({} checker-level, {} tree-walker)",
        total,
        if total == 1 { "" } else { "s" },
        summary.checker_modules,
        summary.tree_walker_modules,
    )
}
