//! Marker tokenizer: raw file text to an ordered sequence of marker events.
//!
//! Recognizes `[START <name>]` and `[END <name>]` anywhere in a line,
//! regardless of the surrounding comment syntax. Matching is line-scoped and
//! preserves left-to-right order within a line. Tag names are trimmed but
//! otherwise kept verbatim - no case-folding, no whitespace normalization -
//! because two tags differing only in case or spacing are distinct and the
//! downstream ambiguity pass exists to surface exactly that kind of hazard.

use lazy_static::lazy_static;
use regex::Regex;

use super::{MarkerEvent, MarkerKind};

lazy_static! {
    /// Matches either marker form. The name group is everything up to the
    /// closing bracket; trimming happens after capture so `[START  a b ]`
    /// yields the tag "a b".
    static ref MARKER_PATTERN: Regex =
        Regex::new(r"\[(START|END)\s+([^\]]+)\]").unwrap();
}

/// Extract all marker events from a file's text content, in file order.
///
/// Pure function: identical input always yields the identical event
/// sequence. Bracket content that is not exactly a `START`/`END` keyword
/// followed by a non-empty name is ignored.
pub fn tokenize(file: &str, content: &str) -> Vec<MarkerEvent> {
    let mut events = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_number = line_idx + 1;

        for caps in MARKER_PATTERN.captures_iter(line) {
            let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let tag = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

            // A name that trims to nothing is not a marker.
            if tag.is_empty() {
                continue;
            }

            let kind = match keyword {
                "START" => MarkerKind::Start,
                "END" => MarkerKind::End,
                _ => continue,
            };

            events.push(MarkerEvent {
                kind,
                tag: tag.to_string(),
                line: line_number,
                file: file.to_string(),
            });
        }
    }

    events
}
