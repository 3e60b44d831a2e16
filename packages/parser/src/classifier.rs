//! Per-line structural classification of rulebook text.
//!
//! The classifier judges one trimmed line at a time, independent of
//! surrounding context: does the line open a new rule section, at what
//! depth, with what identifier and heading text. Unrecognized input is
//! never an error; it simply classifies as continuation text.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::identifier::RuleIdentifier;

/// A line that opens a rule section: `400.1. Drawing is the act of ...`.
///
/// The identifier prefix is greedy: the full dotted path up to the
/// terminating period is consumed, so `103.1.` classifies as a subrule
/// rather than a partial match on `103.`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RULE_START_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{3}(?:\.(?:\d+|[a-z]+))*)\.(?:\s+(.*))?$").expect("valid regex")
});

/// Textual cross-reference: `See rule 346.` / `rule 103.1.a.` The keywords
/// match case-insensitively; identifier segments stay case-sensitive.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CROSS_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:(?:see\s+)?rule)\s+(\d{3}(?:\.(?:\d+|[a-z]+))*)\.").expect("valid regex")
});

/// The structural judgment for a line that opens a rule section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStart {
    /// The section's dotted identifier.
    pub identifier: RuleIdentifier,
    /// Heading text following the identifier delimiter, trimmed. Empty
    /// when the line carries only the identifier.
    pub heading: String,
}

/// Classify a line as a rule start, if it is one.
///
/// Returns `None` for continuation/body text, blank lines, and lines whose
/// identifier prefix violates the dotted grammar.
pub fn rule_start(line: &str) -> Option<RuleStart> {
    let caps = RULE_START_PATTERN.captures(line.trim())?;
    let identifier = RuleIdentifier::parse(caps.get(1)?.as_str())?;
    let heading = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(RuleStart {
        identifier,
        heading,
    })
}

/// Structural depth of a rule-start line, or `None` for continuation text.
pub fn detect_level(line: &str) -> Option<usize> {
    rule_start(line).map(|start| start.identifier.level())
}

/// The identifier opening a rule-start line, or `None` when the line has
/// no recognized identifier prefix.
pub fn extract_identifier(line: &str) -> Option<RuleIdentifier> {
    rule_start(line).map(|start| start.identifier)
}

/// Heading text following the identifier delimiter, trimmed.
///
/// Falls back to the full trimmed line when no identifier matches, so the
/// caller can always use the result as body text.
pub fn extract_heading_text(line: &str) -> String {
    match rule_start(line) {
        Some(start) => start.heading,
        None => line.trim().to_string(),
    }
}

/// Collect the identifiers textually referenced by a section body.
///
/// Scans for `(See )?rule <identifier>.` phrasing; each identifier is
/// reported once, in first-occurrence order, and re-validated against the
/// dotted grammar. Unrecognized phrasings are silently skipped.
pub fn extract_cross_references(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut references = Vec::new();

    for caps in CROSS_REFERENCE_PATTERN.captures_iter(text) {
        let Some(candidate) = caps.get(1) else {
            continue;
        };
        if RuleIdentifier::parse(candidate.as_str()).is_none() {
            continue;
        }
        if seen.insert(candidate.as_str()) {
            references.push(candidate.as_str().to_string());
        }
    }

    references
}
