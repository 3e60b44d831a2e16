//! Core data types for parsed rulebooks.
//!
//! A parsed rulebook is a flat, document-ordered list of [`RuleSection`]s
//! plus an id index. Field names serialize in camelCase because the
//! document is consumed by a JavaScript frontend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One identified, addressable unit of rulebook text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSection {
    /// Canonical dotted identifier (e.g. "103.1.b.2"). Unique across the
    /// document; doubles as sort key and URL slug.
    pub id: String,

    /// Display form: the identifier plus a trailing period ("103.1.b.2.").
    pub number: String,

    /// First line of the body; equals the full content for heading-only
    /// sections.
    pub title: String,

    /// Full body text. Sub-rule lines that were not promoted to their own
    /// section remain embedded here.
    pub content: String,

    /// Structural depth, 0 = top-level section.
    pub level: usize,

    /// Nearest ancestor's id; absent for top-level sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Direct child ids, document order.
    #[serde(default)]
    pub children: Vec<String>,

    /// Ids this section's content textually references. Entries are not
    /// guaranteed to resolve; dangling references are filtered by readers.
    #[serde(default)]
    pub cross_refs: Vec<String>,

    /// Rulebook edition this section belongs to.
    pub version: String,
}

/// A complete parsed rulebook edition: the parse result and the unit of
/// persistence and exchange.
///
/// Immutable after construction; rebuilding the full document is the only
/// way to change it, so it can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesData {
    /// Rulebook edition.
    pub version: String,

    /// Revision date as printed in the source text; empty when absent.
    pub last_updated: String,

    /// All sections, document order.
    pub sections: Vec<RuleSection>,

    /// Id to section mapping for direct lookup. A `BTreeMap` keeps the
    /// serialized form deterministic.
    pub index: BTreeMap<String, RuleSection>,
}

impl RulesData {
    /// Load a document from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// All top-level sections, document order.
    #[must_use]
    pub fn top_level_sections(&self) -> Vec<&RuleSection> {
        self.sections.iter().filter(|s| s.level == 0).collect()
    }

    /// Look up a section by id.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&RuleSection> {
        self.index.get(id)
    }

    /// Direct children of a section, document order.
    ///
    /// Child ids that fail to resolve through the index are silently
    /// dropped; an unknown `id` yields an empty list.
    #[must_use]
    pub fn child_sections(&self, id: &str) -> Vec<&RuleSection> {
        self.section(id)
            .map(|section| {
                section
                    .children
                    .iter()
                    .filter_map(|child| self.index.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sections whose content references `id` (backlink query).
    #[must_use]
    pub fn referencing_sections(&self, id: &str) -> Vec<&RuleSection> {
        self.sections
            .iter()
            .filter(|section| section.cross_refs.iter().any(|r| r == id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, level: usize, parent: Option<&str>) -> RuleSection {
        RuleSection {
            id: id.to_string(),
            number: format!("{id}."),
            title: format!("Title of {id}"),
            content: format!("Content of {id}"),
            level,
            parent_id: parent.map(String::from),
            children: Vec::new(),
            cross_refs: Vec::new(),
            version: "2.1".to_string(),
        }
    }

    fn sample_data() -> RulesData {
        let mut root = section("400", 0, None);
        root.children = vec!["400.1".to_string()];
        let mut sub = section("400.1", 1, Some("400"));
        sub.children = vec!["400.1.a".to_string(), "400.1.zz".to_string()];
        sub.cross_refs = vec!["601".to_string()];
        let detail = section("400.1.a", 2, Some("400.1"));

        let sections = vec![root, sub, detail];
        let index = sections
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect();
        RulesData {
            version: "2.1".to_string(),
            last_updated: "March 3, 2025".to_string(),
            sections,
            index,
        }
    }

    #[test]
    fn test_top_level_sections() {
        let data = sample_data();
        let top: Vec<&str> = data
            .top_level_sections()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(top, vec!["400"]);
    }

    #[test]
    fn test_section_lookup() {
        let data = sample_data();
        assert_eq!(data.section("400.1").map(|s| s.level), Some(1));
        assert!(data.section("999").is_none());
    }

    #[test]
    fn test_child_sections_drop_unresolvable_ids() {
        let data = sample_data();
        // "400.1.zz" is listed as a child but never defined
        let children: Vec<&str> = data
            .child_sections("400.1")
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(children, vec!["400.1.a"]);
    }

    #[test]
    fn test_child_sections_of_unknown_id() {
        let data = sample_data();
        assert!(data.child_sections("999").is_empty());
    }

    #[test]
    fn test_referencing_sections() {
        let data = sample_data();
        let referencing: Vec<&str> = data
            .referencing_sections("601")
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(referencing, vec!["400.1"]);
        assert!(data.referencing_sections("400").is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let data = sample_data();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("lastUpdated").is_some());
        let first = &value["sections"][1];
        assert!(first.get("parentId").is_some());
        assert!(first.get("crossRefs").is_some());
        // Top-level sections omit the absent parent entirely
        assert!(value["sections"][0].get("parentId").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample_data();
        let json = serde_json::to_string(&data).unwrap();
        let restored = RulesData::from_json_str(&json).unwrap();
        assert_eq!(restored, data);
    }
}
