//! Rulebook Engine
//!
//! Read-only query service over parsed rulebook documents. This library
//! provides functionality for:
//! - Loading parsed rulebook editions (JSON) produced by `rulebook-parser`
//! - Navigating the section tree (top-level listing, id lookup, children,
//!   backlinks)
//! - Field-weighted text search with match offsets
//! - Comparing two loaded editions
//!
//! # Example
//!
//! ```ignore
//! use rulebook_engine::RulesService;
//!
//! let mut service = RulesService::new();
//! service.load_file("data/rules-2.1.json".as_ref())?;
//!
//! let section = service.section("2.1", "103.1")?;
//! let backlinks = service.referencing_sections("2.1", "103.1")?;
//! let hits = service.search("2.1", "draw")?;
//! ```

pub mod error;
pub mod search;
pub mod service;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
pub use error::{EngineError, Result};
pub use search::{search_sections, SearchField, SearchMatch, SearchResult};
pub use service::RulesService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
