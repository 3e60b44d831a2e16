//! Edition comparison.
//!
//! Compares two already-built documents and reports which section ids were
//! added, modified or removed between editions. Computed on demand, never
//! persisted.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder;
use crate::error::Result;
use crate::types::{RuleSection, RulesData};

/// Changed section ids between two rulebook editions.
///
/// The three lists are pairwise disjoint and, together with the unchanged
/// ids, partition the union of both editions' id sets. `added` and
/// `modified` follow the new edition's document order, `removed` the old
/// edition's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    pub old_version: String,
    pub new_version: String,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
}

impl VersionDiff {
    /// Compare two built documents.
    #[must_use]
    pub fn between(old: &RulesData, new: &RulesData) -> Self {
        let mut added = Vec::new();
        let mut modified = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for section in &new.sections {
            if !seen.insert(section.id.as_str()) {
                continue;
            }
            match (old.index.get(&section.id), new.index.get(&section.id)) {
                (None, _) => added.push(section.id.clone()),
                (Some(before), Some(after)) if section_changed(before, after) => {
                    modified.push(section.id.clone());
                }
                _ => {}
            }
        }

        let mut removed = Vec::new();
        let mut seen_removed: HashSet<&str> = HashSet::new();
        for section in &old.sections {
            if !seen_removed.insert(section.id.as_str()) {
                continue;
            }
            if !new.index.contains_key(&section.id) {
                removed.push(section.id.clone());
            }
        }

        Self {
            old_version: old.version.clone(),
            new_version: new.version.clone(),
            added,
            modified,
            removed,
        }
    }

    /// True when the two editions have identical section sets and content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// A section counts as modified when its content, title or ordered
/// cross-reference list differs between editions.
fn section_changed(before: &RuleSection, after: &RuleSection) -> bool {
    before.content != after.content
        || before.title != after.title
        || before.cross_refs != after.cross_refs
}

/// Parse two rulebook text files and compare them.
///
/// One whole-file read per side; a read failure on either side propagates
/// unchanged.
pub fn diff_files(old_path: &Path, new_path: &Path) -> Result<VersionDiff> {
    let old = builder::parse_file(old_path)?;
    let new = builder::parse_file(new_path)?;
    Ok(VersionDiff::between(&old, &new))
}
