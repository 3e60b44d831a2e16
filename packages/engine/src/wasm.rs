//! WASM bindings for the rulebook engine
//!
//! This module lets the browser frontend drive [`RulesService`] directly.
//! It is feature-gated behind the `wasm` feature flag.
//!
//! # Key Constraints
//!
//! - **No filesystem access in WASM**: documents must be passed as JSON
//!   strings via `loadDocument()`
//! - **Efficient serialization**: uses `serde-wasm-bindgen` for Rust <->
//!   JavaScript conversion
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { WasmRules } from 'rulebook-engine';
//!
//! await init();
//! const rules = new WasmRules();
//!
//! const response = await fetch('/data/rules-2.1.json');
//! const version = rules.loadDocument(await response.text());
//!
//! const top = rules.topLevelSections(version);
//! const section = rules.getSection(version, '103.1');
//! const hits = rules.search(version, 'draw');
//! ```

use wasm_bindgen::prelude::*;

use crate::error::EngineError;
use crate::service::RulesService;

/// Maximum document JSON size to prevent DoS (8 MB)
const MAX_JSON_SIZE: usize = 8_000_000;

/// Maximum number of editions that can be loaded
const MAX_LOADED_EDITIONS: usize = 16;

/// Helper to create consistent error JsValues
fn wasm_error(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        wasm_error(&err.to_string())
    }
}

/// WASM-compatible rulebook query service.
#[wasm_bindgen]
pub struct WasmRules {
    service: RulesService,
}

#[wasm_bindgen]
impl WasmRules {
    /// Create a new empty instance.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            service: RulesService::new(),
        }
    }

    /// Load a parsed rulebook edition from a JSON string.
    ///
    /// Returns the edition version used for subsequent queries.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, json: &str) -> Result<String, JsValue> {
        if json.len() > MAX_JSON_SIZE {
            return Err(wasm_error("document exceeds maximum size (8 MB)"));
        }
        if self.service.document_count() >= MAX_LOADED_EDITIONS {
            return Err(wasm_error("maximum number of loaded editions reached (16)"));
        }

        Ok(self.service.load_document(json)?)
    }

    /// All loaded edition versions, sorted.
    #[wasm_bindgen(js_name = listVersions)]
    pub fn list_versions(&self) -> Vec<String> {
        self.service.list_versions()
    }

    /// Check if an edition is loaded.
    #[wasm_bindgen(js_name = hasVersion)]
    pub fn has_version(&self, version: &str) -> bool {
        self.service.has_version(version)
    }

    /// Remove a loaded edition. Returns `true` if it was loaded.
    #[wasm_bindgen(js_name = unloadDocument)]
    pub fn unload_document(&mut self, version: &str) -> bool {
        self.service.unload(version)
    }

    /// Number of loaded editions.
    #[wasm_bindgen(js_name = documentCount)]
    pub fn document_count(&self) -> usize {
        self.service.document_count()
    }

    /// Look up a section by id; `undefined` when the id is not defined in
    /// the edition.
    #[wasm_bindgen(js_name = getSection)]
    pub fn get_section(&self, version: &str, id: &str) -> Result<JsValue, JsValue> {
        match self.service.section(version, id)? {
            Some(section) => serde_wasm_bindgen::to_value(section)
                .map_err(|e| wasm_error(&format!("Failed to serialize section: {e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Top-level sections of an edition, document order.
    #[wasm_bindgen(js_name = topLevelSections)]
    pub fn top_level_sections(&self, version: &str) -> Result<JsValue, JsValue> {
        let sections = self.service.top_level_sections(version)?;
        serde_wasm_bindgen::to_value(&sections)
            .map_err(|e| wasm_error(&format!("Failed to serialize sections: {e}")))
    }

    /// Direct children of a section, document order.
    #[wasm_bindgen(js_name = childSections)]
    pub fn child_sections(&self, version: &str, id: &str) -> Result<JsValue, JsValue> {
        let sections = self.service.child_sections(version, id)?;
        serde_wasm_bindgen::to_value(&sections)
            .map_err(|e| wasm_error(&format!("Failed to serialize sections: {e}")))
    }

    /// Sections whose content references the given id.
    #[wasm_bindgen(js_name = referencingSections)]
    pub fn referencing_sections(&self, version: &str, id: &str) -> Result<JsValue, JsValue> {
        let sections = self.service.referencing_sections(version, id)?;
        serde_wasm_bindgen::to_value(&sections)
            .map_err(|e| wasm_error(&format!("Failed to serialize sections: {e}")))
    }

    /// Search an edition for a query string.
    pub fn search(&self, version: &str, query: &str) -> Result<JsValue, JsValue> {
        let results = self.service.search(version, query)?;
        serde_wasm_bindgen::to_value(&results)
            .map_err(|e| wasm_error(&format!("Failed to serialize results: {e}")))
    }

    /// Compare two loaded editions.
    pub fn compare(&self, old_version: &str, new_version: &str) -> Result<JsValue, JsValue> {
        let diff = self.service.compare(old_version, new_version)?;
        serde_wasm_bindgen::to_value(&diff)
            .map_err(|e| wasm_error(&format!("Failed to serialize diff: {e}")))
    }

    /// Get the engine version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl Default for WasmRules {
    fn default() -> Self {
        Self::new()
    }
}
