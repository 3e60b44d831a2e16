//! JSON writer for parsed rulebook documents.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::RulesData;

/// Generate the JSON document for a parsed rulebook.
///
/// Pretty-printed with a trailing newline; key order is deterministic, so
/// re-parsing the same source yields byte-identical output.
pub fn generate_json(data: &RulesData) -> Result<String> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}

/// Save a parsed rulebook as a JSON file named `rules-{version}.json`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then
/// renames. This ensures partial writes don't corrupt existing files on
/// crash.
///
/// # Arguments
/// * `data` - The document to save
/// * `output_base` - Base directory for output (default: "data/")
///
/// # Returns
/// Path to the saved file
pub fn save_json(data: &RulesData, output_base: Option<&Path>) -> Result<PathBuf> {
    let output_base = output_base.unwrap_or(Path::new("data"));
    fs::create_dir_all(output_base)?;

    let output_file = output_base.join(format!("rules-{}.json", data.version));
    let temp_file = output_base.join(format!(".rules-{}.json.tmp", data.version));

    let content = generate_json(data)?;

    // Write to temp file first, then sync and rename for atomicity
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    // Atomic rename (on most filesystems)
    fs::rename(&temp_file, &output_file)?;

    Ok(output_file)
}
