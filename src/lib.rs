//! # Checkgen - Checkstyle configuration generation
//!
//! Checkgen is a CLI tool and library that turns a set of active rules,
//! exported from a quality profile, into the XML configuration document
//! consumed by the Checkstyle static-analysis tool. Rules are grouped by
//! their target location in the fixed two-level module hierarchy, emitted
//! as escaped XML nodes in a stable order, and combined with externally
//! supplied filter fragments and scalar settings.
//!
//! ## Architecture
//!
//! Checkgen is organized into several modules:
//!
//! - [`cli`] - Command-line argument parsing
//! - [`config`] - Configuration file loading and the export settings lookup
//! - [`error`] - Centralized error types for the crate
//! - [`rule`] - Uniform rule views over the two source shapes
//! - [`group`] - Partitioning of rules by module path
//! - [`export`] - Document generation
//! - [`profile`] - Profile and scan rule loading
//! - [`summary`] - Export counters and the CLI summary line
//!
//! ## Usage as a Library
//!
//! ```rust
//! use checkgen_core::{ConfigExporter, ExportSettings, Profile};
//!
//! # fn main() -> checkgen_core::error::Result<()> {
//! let settings = ExportSettings::default().with_tab_width("4");
//! let exporter = ConfigExporter::new(&settings);
//!
//! let mut document = Vec::new();
//! let summary = exporter.export_profile(&Profile::new("Sonar way"), &mut document)?;
//! assert_eq!(summary.total(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All functions that can fail return [`Result<T>`], which is a type alias
//! for `std::result::Result<T, ExportError>`. The generation pass itself has
//! exactly one failure mode, a sink write failure, which is wrapped into
//! [`error::ExportError::Sink`] naming the export that was in progress. See
//! the [`error`] module for details.

// Module declarations
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod group;
pub mod profile;
pub mod rule;
pub mod summary;

// Public API exports
pub use crate::cli::Cli;
pub use crate::export::{ConfigExporter, DOCTYPE_DECLARATION, escape_xml};
pub use crate::profile::{Profile, load_profile, load_scan_rules};
pub use crate::rule::{ProfileRule, RuleRecord, ScanRule};

// Config exports
pub use crate::config::{
    CheckgenConfig, ExportSection, ExportSettings, GeneralConfig, load_config,
    load_config_from_path, merge_export_args,
};

// Grouping exports
pub use crate::group::{ModuleGroups, TREE_WALKER_PREFIX, group_by_module_path, is_tree_walker};

// Error exports
pub use crate::error::{ExportError as Error, Result};

// Summary exports
pub use crate::summary::{ExportSummary, render_summary_line};
