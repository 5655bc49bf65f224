//! Quality profile and scan rule loading.
//!
//! A profile is the ordered collection of active rules the exporter turns
//! into a document, together with a display name that identifies a failed
//! export. Both JSON source shapes are supported: a design-time profile
//! (`Profile` with [`ProfileRule`] entries) and a plain array of runtime
//! [`ScanRule`] entries.

use crate::error::{ExportError, Result};
use crate::rule::{ProfileRule, ScanRule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named, ordered collection of active rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Display name of the profile; names the export operation in errors.
    pub name: String,

    /// Active rules in input order.
    #[serde(default)]
    pub rules: Vec<ProfileRule>,
}

impl Profile {
    /// Creates an empty profile with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }
}

/// Loads a design-time profile from a JSON file.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, or a `Profile` error
/// if it is not valid profile JSON.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .map_err(|e| ExportError::io_error_with_source("read profile", path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| {
        ExportError::profile_error_with_path(
            format!("Failed to parse profile JSON: {}", e),
            path.to_path_buf(),
        )
    })
}

/// Loads runtime scan rules from a JSON file containing an array of rules.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, or a `Profile` error
/// if it is not a valid rule array.
pub fn load_scan_rules(path: &Path) -> Result<Vec<ScanRule>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ExportError::io_error_with_source("read scan rules", path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| {
        ExportError::profile_error_with_path(
            format!("Failed to parse scan rule JSON: {}", e),
            path.to_path_buf(),
        )
    })
}
