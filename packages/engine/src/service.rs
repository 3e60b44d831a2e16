//! Service layer over loaded rulebook editions.
//!
//! `RulesService` owns the parsed documents, keyed by edition version, and
//! exposes the read-only query surface the presentation layer consumes:
//! top-level listing, id lookup, child and backlink resolution, text
//! search, and edition comparison. Documents are immutable once loaded, so
//! the service hands out borrows freely.
//!
//! # Example
//!
//! ```
//! use rulebook_engine::RulesService;
//! use rulebook_parser::{json::generate_json, parse_document};
//!
//! let data = parse_document("100. General\n100.1. These rules apply.", "2.1");
//! let json = generate_json(&data).unwrap();
//!
//! let mut service = RulesService::new();
//! let version = service.load_document(&json).unwrap();
//! assert_eq!(version, "2.1");
//!
//! let top = service.top_level_sections("2.1").unwrap();
//! assert_eq!(top.len(), 1);
//! ```

use std::collections::HashMap;
use std::path::Path;

use rulebook_parser::{RuleSection, RulesData, VersionDiff};

use crate::error::{EngineError, Result};
use crate::search::{search_sections, SearchResult};

/// Read-only query service over loaded rulebook editions.
#[derive(Debug, Default)]
pub struct RulesService {
    documents: HashMap<String, RulesData>,
}

impl RulesService {
    /// Create a new empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Load a parsed document from its JSON form.
    ///
    /// Returns the edition version, which keys all subsequent queries.
    /// Loading the same edition again replaces the previous document.
    pub fn load_document(&mut self, json: &str) -> Result<String> {
        let data = RulesData::from_json_str(json)?;
        if data.version.is_empty() {
            return Err(EngineError::LoadError(
                "document has no edition version".to_string(),
            ));
        }

        let version = data.version.clone();
        if self.documents.insert(version.clone(), data).is_some() {
            tracing::debug!(version = %version, "replacing loaded rulebook edition");
        }

        Ok(version)
    }

    /// Load a document from a JSON file on disk.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let json = std::fs::read_to_string(path)?;
        self.load_document(&json)
    }

    /// The loaded document for an edition.
    pub fn document(&self, version: &str) -> Result<&RulesData> {
        self.documents
            .get(version)
            .ok_or_else(|| EngineError::UnknownVersion(version.to_string()))
    }

    /// All loaded edition versions, sorted.
    #[must_use]
    pub fn list_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self.documents.keys().cloned().collect();
        versions.sort();
        versions
    }

    /// Check whether an edition is loaded.
    #[must_use]
    pub fn has_version(&self, version: &str) -> bool {
        self.documents.contains_key(version)
    }

    /// Remove a loaded edition. Returns `true` if it was loaded.
    pub fn unload(&mut self, version: &str) -> bool {
        self.documents.remove(version).is_some()
    }

    /// Number of loaded editions.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Top-level sections of an edition, document order.
    pub fn top_level_sections(&self, version: &str) -> Result<Vec<&RuleSection>> {
        Ok(self.document(version)?.top_level_sections())
    }

    /// Look up a section by id. `Ok(None)` when the edition is loaded but
    /// the id is not defined.
    pub fn section(&self, version: &str, id: &str) -> Result<Option<&RuleSection>> {
        Ok(self.document(version)?.section(id))
    }

    /// Direct children of a section, document order.
    pub fn child_sections(&self, version: &str, id: &str) -> Result<Vec<&RuleSection>> {
        Ok(self.document(version)?.child_sections(id))
    }

    /// Sections whose content references `id`.
    pub fn referencing_sections(&self, version: &str, id: &str) -> Result<Vec<&RuleSection>> {
        Ok(self.document(version)?.referencing_sections(id))
    }

    /// Search an edition's sections for a query string.
    pub fn search(&self, version: &str, query: &str) -> Result<Vec<SearchResult<'_>>> {
        Ok(search_sections(self.document(version)?, query))
    }

    /// Compare two loaded editions.
    pub fn compare(&self, old_version: &str, new_version: &str) -> Result<VersionDiff> {
        Ok(VersionDiff::between(
            self.document(old_version)?,
            self.document(new_version)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_parser::{json::generate_json, parse_document};

    fn load_edition(service: &mut RulesService, text: &str, version: &str) -> String {
        let data = parse_document(text, version);
        let json = generate_json(&data).unwrap();
        service.load_document(&json).unwrap()
    }

    #[test]
    fn test_service_starts_empty() {
        let service = RulesService::new();
        assert_eq!(service.document_count(), 0);
        assert!(service.list_versions().is_empty());
        assert!(!service.has_version("2.1"));
    }

    #[test]
    fn test_load_and_query() {
        let mut service = RulesService::new();
        let version = load_edition(
            &mut service,
            "100. General\n100.1. These rules apply.\n",
            "2.1",
        );
        assert_eq!(version, "2.1");
        assert!(service.has_version("2.1"));

        let top = service.top_level_sections("2.1").unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, "100");

        let section = service.section("2.1", "100.1").unwrap().unwrap();
        assert_eq!(section.parent_id.as_deref(), Some("100"));

        assert!(service.section("2.1", "999").unwrap().is_none());
    }

    #[test]
    fn test_unknown_version_is_an_error() {
        let service = RulesService::new();
        let err = service.document("3.0").unwrap_err();
        assert!(matches!(err, EngineError::UnknownVersion(v) if v == "3.0"));
    }

    #[test]
    fn test_load_rejects_versionless_document() {
        let mut service = RulesService::new();
        let data = parse_document("100. General\n", "");
        let json = generate_json(&data).unwrap();
        assert!(matches!(
            service.load_document(&json),
            Err(EngineError::LoadError(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut service = RulesService::new();
        assert!(matches!(
            service.load_document("{not json"),
            Err(EngineError::Parser(_))
        ));
    }

    #[test]
    fn test_reload_replaces_edition() {
        let mut service = RulesService::new();
        load_edition(&mut service, "100. General\n", "2.1");
        load_edition(&mut service, "100. General\n200. Combat\n", "2.1");

        assert_eq!(service.document_count(), 1);
        assert_eq!(service.top_level_sections("2.1").unwrap().len(), 2);
    }

    #[test]
    fn test_unload() {
        let mut service = RulesService::new();
        load_edition(&mut service, "100. General\n", "2.1");

        assert!(service.unload("2.1"));
        assert!(!service.unload("2.1"));
        assert!(!service.has_version("2.1"));
    }

    #[test]
    fn test_list_versions_sorted() {
        let mut service = RulesService::new();
        load_edition(&mut service, "100. General\n", "2.2");
        load_edition(&mut service, "100. General\n", "2.1");
        assert_eq!(service.list_versions(), vec!["2.1", "2.2"]);
    }

    #[test]
    fn test_compare_editions() {
        let mut service = RulesService::new();
        load_edition(&mut service, "100. General\n100.1. Old body.\n", "2.1");
        load_edition(&mut service, "100. General\n100.1. New body.\n", "2.2");

        let diff = service.compare("2.1", "2.2").unwrap();
        assert_eq!(diff.modified, vec!["100.1"]);
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());

        assert!(service.compare("2.1", "9.9").is_err());
    }
}
