//! Configuration constants and validation functions for the parser.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{ParserError, Result};

/// Fallback edition version when none can be derived from the filename.
pub const DEFAULT_VERSION: &str = "1.0";

/// Number of leading physical lines scanned for document header lines.
pub const HEADER_SCAN_LINES: usize = 5;

/// Fixed prefixes that mark document header lines.
///
/// Header lines carry provenance metadata (the rulebook title and its
/// revision date) and never open or continue a rule section.
pub const HEADER_PREFIXES: &[&str] = &["Comprehensive Rules", "Last Updated:", "Effective as of"];

/// Version pattern: dotted digit groups, e.g. "2.1" or "10.0.3".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*$").expect("valid regex"));

/// Filename version pattern: the first dotted number group in a file stem,
/// e.g. "rules-2.1.txt" carries edition "2.1".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FILENAME_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)+)").expect("valid regex"));

/// "Last Updated:" line pattern, matched anywhere in the source text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAST_UPDATED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Last Updated:\s*(.+)$").expect("valid regex"));

/// Validate an edition version string.
///
/// # Arguments
/// * `version` - The version string to validate
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(ParserError::InvalidVersion)` if invalid
///
/// # Examples
/// ```
/// use rulebook_parser::config::validate_version;
///
/// assert!(validate_version("2.1").is_ok());
/// assert!(validate_version("v2").is_err());
/// ```
pub fn validate_version(version: &str) -> Result<()> {
    if VERSION_PATTERN.is_match(version) {
        Ok(())
    } else {
        Err(ParserError::InvalidVersion(version.to_string()))
    }
}

/// Derive the edition version from a source filename.
///
/// Takes the first dotted number group in the file stem; returns `None`
/// when the stem carries no such group.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use rulebook_parser::config::version_from_filename;
///
/// assert_eq!(version_from_filename(Path::new("rules-2.1.txt")), Some("2.1".to_string()));
/// assert_eq!(version_from_filename(Path::new("rules.txt")), None);
/// ```
pub fn version_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    FILENAME_VERSION_PATTERN
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the revision date from a "Last Updated: ..." line in the text.
///
/// Returns an empty string when no such line exists; absence is never an
/// error.
pub fn extract_last_updated(text: &str) -> String {
    LAST_UPDATED_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Check whether a trimmed line is a document header line.
///
/// Only meaningful for lines within the first [`HEADER_SCAN_LINES`]
/// physical lines; the caller enforces the position bound.
pub fn is_header_line(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}
