//! Field-weighted text search over a parsed rulebook.
//!
//! Case-insensitive substring search across section numbers, titles and
//! content. A hit in the number outranks any amount of title hits, and a
//! title hit outranks content hits, so looking up "103.1" or "draw"
//! surfaces the section a reader most likely means. Match positions are
//! byte offsets into the original field text, with a snippet of
//! surrounding context for result rendering.

use regex::Regex;
use serde::Serialize;

use rulebook_parser::{RuleSection, RulesData};

/// Score contribution of a match in the section number.
const NUMBER_WEIGHT: u32 = 100;

/// Score contribution per match in the section title.
const TITLE_WEIGHT: u32 = 10;

/// Score contribution per match in the section content.
const CONTENT_WEIGHT: u32 = 1;

/// Context kept on each side of a match snippet, in bytes.
const SNIPPET_CONTEXT: usize = 40;

/// Upper bound on reported matches per section.
const MAX_MATCHES_PER_SECTION: usize = 8;

/// The section field a match was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Number,
    Title,
    Content,
}

/// One occurrence of the query inside a section field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub field: SearchField,
    /// Byte offset of the match start in the field text.
    pub start: usize,
    /// Byte offset of the match end in the field text.
    pub end: usize,
    /// The match with surrounding context.
    pub snippet: String,
}

/// A matching section with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
    pub section: &'a RuleSection,
    pub score: u32,
    pub matches: Vec<SearchMatch>,
}

/// Search a document for a query string.
///
/// Results are sorted by descending score; ties keep document order. An
/// empty or whitespace-only query yields no results.
#[must_use]
pub fn search_sections<'a>(data: &'a RulesData, query: &str) -> Vec<SearchResult<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    // Escaped literal pattern, so match offsets land in the original text
    let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(query))) else {
        return Vec::new();
    };

    let mut results: Vec<SearchResult<'a>> = Vec::new();

    for section in &data.sections {
        let mut score = 0;
        let mut matches = Vec::new();

        collect_matches(
            &pattern,
            SearchField::Number,
            &section.number,
            NUMBER_WEIGHT,
            &mut score,
            &mut matches,
        );
        collect_matches(
            &pattern,
            SearchField::Title,
            &section.title,
            TITLE_WEIGHT,
            &mut score,
            &mut matches,
        );
        collect_matches(
            &pattern,
            SearchField::Content,
            &section.content,
            CONTENT_WEIGHT,
            &mut score,
            &mut matches,
        );

        if score > 0 {
            results.push(SearchResult {
                section,
                score,
                matches,
            });
        }
    }

    // Stable sort keeps ties in document order
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

/// Record every occurrence of the pattern in one field.
fn collect_matches(
    pattern: &Regex,
    field: SearchField,
    text: &str,
    weight: u32,
    score: &mut u32,
    matches: &mut Vec<SearchMatch>,
) {
    for found in pattern.find_iter(text) {
        *score += weight;
        if matches.len() < MAX_MATCHES_PER_SECTION {
            matches.push(SearchMatch {
                field,
                start: found.start(),
                end: found.end(),
                snippet: snippet_around(text, found.start(), found.end()),
            });
        }
    }
}

/// Extract the match with up to [`SNIPPET_CONTEXT`] bytes of context on
/// each side, clamped to char boundaries.
fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let mut from = start.saturating_sub(SNIPPET_CONTEXT);
    while from > 0 && !text.is_char_boundary(from) {
        from -= 1;
    }

    let mut to = usize::min(end + SNIPPET_CONTEXT, text.len());
    while to < text.len() && !text.is_char_boundary(to) {
        to += 1;
    }

    text[from..to].to_string()
}
