//! Rulebook Parser - Convert numbered rulebook text into an indexed section tree.
//!
//! This crate turns the flat, numbered text of a tabletop game's
//! comprehensive rulebook into a navigable tree of rule sections with
//! parent/child links, cross-reference lists and an id index, and compares
//! two parsed editions for upgrades.
//!
//! # Example
//!
//! ```
//! use rulebook_parser::parse_document;
//!
//! let data = parse_document("100. General\n\n100.1. These rules apply.", "2.1");
//! assert_eq!(data.sections.len(), 2);
//! assert_eq!(
//!     data.section("100.1").and_then(|s| s.parent_id.as_deref()),
//!     Some("100")
//! );
//! ```
//!
//! # Architecture
//!
//! The parser is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`identifier`]: Typed dotted rule identifiers
//! - [`classifier`]: Per-line structural classification
//! - [`types`]: Core data types and the read-only query surface
//! - [`builder`]: The accumulating document builder
//! - [`diff`]: Edition comparison
//! - [`json`]: JSON output generation
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod builder;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod identifier;
pub mod json;
pub mod types;

// Re-export main functions
pub use builder::{parse_document, parse_file, DocumentBuilder};

// Re-export commonly used items
pub use config::{validate_version, DEFAULT_VERSION};
pub use diff::{diff_files, VersionDiff};
pub use error::{ParserError, Result};
pub use identifier::{RuleIdentifier, Segment, SegmentKind};
pub use types::{RuleSection, RulesData};
