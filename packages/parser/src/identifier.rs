//! Dotted rule identifiers.
//!
//! A rule identifier is a dotted path such as `103`, `103.1`, `103.1.a` or
//! `103.1.a.2`: a three-digit section group followed by segments that
//! strictly alternate between numbers and lowercase letters. The segment
//! count determines the section's structural depth, so level detection and
//! parent lookup never re-inspect the raw text.

use std::fmt;

/// The lexical class of one identifier segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// ASCII digits (`103`, `1`, `12`).
    Numeric,
    /// Lowercase ASCII letters (`a`, `bb`).
    Alpha,
}

/// One `.`-separated identifier segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
}

/// A parsed dotted rule identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleIdentifier {
    segments: Vec<Segment>,
}

impl RuleIdentifier {
    /// Parse a dotted identifier (without trailing period).
    ///
    /// The first segment must be exactly three digits; subsequent segments
    /// alternate numeric and lowercase-alpha, starting numeric. Returns
    /// `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = Vec::new();

        for (position, part) in text.split('.').enumerate() {
            if part.is_empty() {
                return None;
            }

            let expected = if position <= 1 {
                SegmentKind::Numeric
            } else if position % 2 == 0 {
                SegmentKind::Alpha
            } else {
                SegmentKind::Numeric
            };

            let kind = match expected {
                SegmentKind::Numeric if part.bytes().all(|b| b.is_ascii_digit()) => {
                    if position == 0 && part.len() != 3 {
                        return None;
                    }
                    SegmentKind::Numeric
                }
                SegmentKind::Alpha if part.bytes().all(|b| b.is_ascii_lowercase()) => {
                    SegmentKind::Alpha
                }
                _ => return None,
            };

            segments.push(Segment {
                kind,
                value: part.to_string(),
            });
        }

        if segments.is_empty() {
            return None;
        }

        Some(Self { segments })
    }

    /// Structural depth: 0 for a top-level section, +1 per nesting tier.
    #[must_use]
    pub fn level(&self) -> usize {
        self.segments.len() - 1
    }

    /// The parsed segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Successively shorter dotted prefixes, longest first.
    ///
    /// `103.1.a` yields `103.1` then `103`. Used to find the nearest
    /// ancestor that actually appears in the document.
    #[must_use]
    pub fn ancestors(&self) -> Vec<String> {
        (1..self.segments.len())
            .rev()
            .map(|len| {
                self.segments[..len]
                    .iter()
                    .map(|segment| segment.value.as_str())
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .collect()
    }
}

impl fmt::Display for RuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", segment.value)?;
            first = false;
        }
        Ok(())
    }
}
