//! Hierarchical document builder.
//!
//! Drives a single linear scan over the source lines, accumulating
//! multi-line section bodies, linking each section to its nearest observed
//! ancestor, resolving textual cross-references and assembling the indexed
//! document. Malformed lines degrade to continuation text; a source with no
//! recognized identifiers yields an empty document rather than an error.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::classifier;
use crate::config;
use crate::error::{ParserError, Result};
use crate::identifier::RuleIdentifier;
use crate::types::{RuleSection, RulesData};

/// Builds a [`RulesData`] document for one rulebook edition.
pub struct DocumentBuilder {
    version: String,
}

/// A section currently being accumulated.
struct PendingSection {
    identifier: RuleIdentifier,
    parent_id: Option<String>,
    lines: Vec<String>,
}

impl DocumentBuilder {
    /// Create a builder for the given edition version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Parse the full source text into a document.
    #[must_use]
    pub fn build(&self, text: &str) -> RulesData {
        let last_updated = config::extract_last_updated(text);

        let mut sections: Vec<RuleSection> = Vec::new();
        let mut registered: HashSet<String> = HashSet::new();
        let mut pending: Option<PendingSection> = None;

        for (line_number, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();

            if line_number < config::HEADER_SCAN_LINES && config::is_header_line(line) {
                continue;
            }

            if line.is_empty() {
                // Preserve intentional paragraph breaks inside a body
                if let Some(section) = pending.as_mut() {
                    section.lines.push(String::new());
                }
                continue;
            }

            if let Some(start) = classifier::rule_start(line) {
                if let Some(section) = pending.take() {
                    sections.push(self.finalize(section));
                }

                let parent_id = resolve_parent(&start.identifier, &registered);
                registered.insert(start.identifier.to_string());
                pending = Some(PendingSection {
                    identifier: start.identifier,
                    parent_id,
                    lines: vec![start.heading],
                });
            } else if let Some(section) = pending.as_mut() {
                section.lines.push(line.to_string());
            }
        }

        if let Some(section) = pending.take() {
            sections.push(self.finalize(section));
        }

        link_children(&mut sections);

        let mut index: BTreeMap<String, RuleSection> = BTreeMap::new();
        for section in &sections {
            if index.insert(section.id.clone(), section.clone()).is_some() {
                tracing::warn!(
                    id = %section.id,
                    "duplicate rule identifier, later definition wins in the index"
                );
            }
        }

        RulesData {
            version: self.version.clone(),
            last_updated,
            sections,
            index,
        }
    }

    /// Close an accumulated section: join the body, derive the title and
    /// collect cross-references.
    fn finalize(&self, pending: PendingSection) -> RuleSection {
        let content = pending.lines.join("\n").trim().to_string();
        let title = content.lines().next().unwrap_or_default().to_string();
        let cross_refs = classifier::extract_cross_references(&content);
        let id = pending.identifier.to_string();

        RuleSection {
            number: format!("{id}."),
            title,
            content,
            level: pending.identifier.level(),
            parent_id: pending.parent_id,
            children: Vec::new(),
            cross_refs,
            version: self.version.clone(),
            id,
        }
    }
}

/// Find the nearest ancestor that has actually appeared in the document.
///
/// Walks the identifier's dotted prefixes from longest to shortest, so a
/// section whose intermediate tier was elided in the source links to the
/// closest tier that does exist.
fn resolve_parent(identifier: &RuleIdentifier, registered: &HashSet<String>) -> Option<String> {
    identifier
        .ancestors()
        .into_iter()
        .find(|prefix| registered.contains(prefix))
}

/// Fill in `children` arrays from the `parent_id` links, preserving
/// document order. When an id occurs twice, the later occurrence receives
/// the children, matching the index's later-wins rule.
fn link_children(sections: &mut [RuleSection]) {
    let position: HashMap<String, usize> = sections
        .iter()
        .enumerate()
        .map(|(i, section)| (section.id.clone(), i))
        .collect();

    let links: Vec<(usize, String)> = sections
        .iter()
        .filter_map(|section| {
            let parent = section.parent_id.as_ref()?;
            position
                .get(parent)
                .map(|&parent_index| (parent_index, section.id.clone()))
        })
        .collect();

    for (parent_index, child_id) in links {
        sections[parent_index].children.push(child_id);
    }
}

/// Parse source text into a document for the given edition version.
#[must_use]
pub fn parse_document(text: &str, version: &str) -> RulesData {
    DocumentBuilder::new(version).build(text)
}

/// Parse a rulebook text file.
///
/// The edition version is derived from the filename
/// (see [`config::version_from_filename`]), falling back to
/// [`config::DEFAULT_VERSION`]. Reading the file is the only fallible
/// step.
pub fn parse_file(path: &Path) -> Result<RulesData> {
    let text = fs::read_to_string(path).map_err(|source| ParserError::SourceRead {
        path: path.display().to_string(),
        source,
    })?;

    let version = config::version_from_filename(path)
        .unwrap_or_else(|| config::DEFAULT_VERSION.to_string());

    Ok(DocumentBuilder::new(version).build(&text))
}
