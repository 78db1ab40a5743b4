//! Core types for scan results.

use serde::{Deserialize, Serialize};

/// Severity levels for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Whether a marker opens or closes a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    End,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerKind::Start => write!(f, "START"),
            MarkerKind::End => write!(f, "END"),
        }
    }
}

/// One occurrence of a `[START tag]` or `[END tag]` marker in a file.
///
/// Events for a single file are totally ordered by line number, and by
/// left-to-right position when multiple markers share a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub kind: MarkerKind,
    /// Tag name, trimmed but otherwise verbatim. Tags differing only in
    /// case or embedded whitespace are distinct.
    pub tag: String,
    /// 1-based line number within the file.
    pub line: usize,
    pub file: String,
}

/// A region opened while another region was still open.
///
/// `outer` is a snapshot of the enclosing frame at the moment `inner`
/// opened; later stack mutation does not alter it. `depth` counts all
/// simultaneously open regions including the outer one, so it is always >= 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedPair {
    pub outer: MarkerEvent,
    pub inner: MarkerEvent,
    pub depth: usize,
}

/// A pairing defect found while validating one file's marker sequence.
///
/// These are findings, not failures: a file full of them still scans to
/// completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralError {
    /// An END with no open START on the stack.
    #[error("[END {tag}] at line {line} has no matching [START {tag}]")]
    UnmatchedEnd { tag: String, line: usize },
    /// An END whose tag differs from the innermost open region.
    #[error("[END {got_tag}] at line {end_line} closes [START {expected_tag}] opened at line {start_line}")]
    MismatchedEnd {
        expected_tag: String,
        got_tag: String,
        start_line: usize,
        end_line: usize,
    },
    /// A START still open when the file ends.
    #[error("[START {tag}] at line {line} is never closed")]
    UnclosedStart { tag: String, line: usize },
}

impl StructuralError {
    /// Line the finding anchors to, for sorting and display.
    pub fn line(&self) -> usize {
        match self {
            StructuralError::UnmatchedEnd { line, .. } => *line,
            StructuralError::MismatchedEnd { end_line, .. } => *end_line,
            StructuralError::UnclosedStart { line, .. } => *line,
        }
    }

    pub fn rule(&self) -> &'static str {
        match self {
            StructuralError::UnmatchedEnd { .. } => "unmatched_end",
            StructuralError::MismatchedEnd { .. } => "mismatched_end",
            StructuralError::UnclosedStart { .. } => "unclosed_start",
        }
    }
}

/// One tag name that is a proper substring of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstringPair {
    pub substring: String,
    pub superstring: String,
}

/// All collisions for one tag, ranked by how many tags contain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityGroup {
    /// The tag that matches inside other tags.
    pub substring: String,
    /// Every distinct tag that contains `substring`, sorted.
    pub superstrings: Vec<String>,
    /// Files where `substring` itself occurs, sorted. A tag in multiple
    /// files is not an error, only a locating aid.
    pub files: Vec<String>,
}

impl AmbiguityGroup {
    /// Number of tags this tag collides with.
    pub fn collision_count(&self) -> usize {
        self.superstrings.len()
    }

    /// Flatten the group back into individual pairs.
    pub fn pairs(&self) -> impl Iterator<Item = SubstringPair> + '_ {
        self.superstrings.iter().map(|sup| SubstringPair {
            substring: self.substring.clone(),
            superstring: sup.clone(),
        })
    }
}

/// Scan results for a single file containing at least one marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub events: Vec<MarkerEvent>,
    pub nested_pairs: Vec<NestedPair>,
    pub errors: Vec<StructuralError>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Aggregate results for a whole tree: per-file reports plus the global
/// substring-ambiguity pass. The terminal artifact handed to presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeReport {
    /// Reports for files with markers, sorted by path.
    pub files: Vec<FileReport>,
    /// Substring collisions across the whole tree, most ambiguous first.
    pub ambiguities: Vec<AmbiguityGroup>,
    /// Number of files scanned.
    pub scanned: usize,
    /// Files skipped as unreadable or non-text.
    pub skipped: usize,
}

impl TreeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total structural errors across all files.
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }

    /// Total substring collision pairs.
    pub fn ambiguity_count(&self) -> usize {
        self.ambiguities.iter().map(|g| g.collision_count()).sum()
    }

    /// Total nested-pair observations.
    pub fn nested_count(&self) -> usize {
        self.files.iter().map(|f| f.nested_pairs.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.has_errors())
    }

    pub fn has_ambiguities(&self) -> bool {
        !self.ambiguities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: MarkerKind, tag: &str, line: usize) -> MarkerEvent {
        MarkerEvent {
            kind,
            tag: tag.to_string(),
            line,
            file: "sample.txt".to_string(),
        }
    }

    #[test]
    fn test_structural_error_display() {
        let err = StructuralError::UnmatchedEnd {
            tag: "setup".to_string(),
            line: 7,
        };
        assert_eq!(
            err.to_string(),
            "[END setup] at line 7 has no matching [START setup]"
        );

        let err = StructuralError::MismatchedEnd {
            expected_tag: "outer".to_string(),
            got_tag: "inner".to_string(),
            start_line: 2,
            end_line: 9,
        };
        assert_eq!(
            err.to_string(),
            "[END inner] at line 9 closes [START outer] opened at line 2"
        );
        assert_eq!(err.line(), 9);
        assert_eq!(err.rule(), "mismatched_end");
    }

    #[test]
    fn test_tree_report_counts() {
        let mut report = TreeReport::new();
        report.files.push(FileReport {
            file: "a.txt".to_string(),
            events: vec![event(MarkerKind::End, "x", 1)],
            nested_pairs: vec![],
            errors: vec![StructuralError::UnmatchedEnd {
                tag: "x".to_string(),
                line: 1,
            }],
        });
        report.ambiguities.push(AmbiguityGroup {
            substring: "foo".to_string(),
            superstrings: vec!["foo_bar".to_string(), "foo_baz".to_string()],
            files: vec!["a.txt".to_string()],
        });
        report.scanned = 3;

        assert_eq!(report.error_count(), 1);
        assert_eq!(report.ambiguity_count(), 2);
        assert!(report.has_errors());
        assert!(report.has_ambiguities());
    }

    #[test]
    fn test_ambiguity_group_pairs() {
        let group = AmbiguityGroup {
            substring: "io".to_string(),
            superstrings: vec!["io_setup".to_string(), "region_io".to_string()],
            files: vec![],
        };
        let pairs: Vec<_> = group.pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs
            .iter()
            .all(|p| p.substring == "io" && p.superstring.contains("io")));
    }
}
