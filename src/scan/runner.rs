//! Scan runner that orchestrates per-file analysis and tree-wide aggregation.
//!
//! Each file's tokenization and nesting validation is an independent
//! computation over its own text with its own stack, so files run in
//! parallel via rayon. The substring-ambiguity pass is a synchronization
//! barrier: it needs the tag census from every file before it can run.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::ambiguity::{self, TagCensus};
use super::{nesting, tokenizer, FileReport, TreeReport};

/// What scanning a single path produced.
enum FileOutcome {
    /// File had at least one marker.
    Markers(FileReport),
    /// Readable text, no markers. Counted but reported nowhere.
    Clean,
    /// Unreadable or not valid UTF-8. Contributes zero events.
    Skipped,
}

/// Executes the scan pipeline against a set of files.
pub struct Runner {
    base_dir: PathBuf,
}

impl Runner {
    /// Create a runner rooted at `base_dir`; reported file paths are
    /// relative to it.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Scan all files and assemble the tree-wide report.
    ///
    /// I/O failures never escape the per-file boundary: a file that cannot
    /// be read or decoded is counted as skipped and the scan continues.
    pub fn run(&self, files: &[PathBuf]) -> TreeReport {
        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|path| self.scan_file(path))
            .collect();

        let mut report = TreeReport::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Markers(file_report) => {
                    report.scanned += 1;
                    report.files.push(file_report);
                }
                FileOutcome::Clean => report.scanned += 1,
                FileOutcome::Skipped => report.skipped += 1,
            }
        }

        // Deterministic output regardless of rayon scheduling.
        report.files.sort_by(|a, b| a.file.cmp(&b.file));

        report.ambiguities = ambiguity::detect(&tag_census(&report.files));
        report
    }

    /// Tokenize and validate a single file.
    fn scan_file(&self, path: &Path) -> FileOutcome {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(_) => return FileOutcome::Skipped,
        };
        let content = match String::from_utf8(bytes) {
            Ok(c) => c,
            Err(_) => return FileOutcome::Skipped,
        };

        let rel_path = self.relative_name(path);
        let events = tokenizer::tokenize(&rel_path, &content);
        if events.is_empty() {
            return FileOutcome::Clean;
        }

        let outcome = nesting::validate(&events);
        FileOutcome::Markers(FileReport {
            file: rel_path,
            events,
            nested_pairs: outcome.nested_pairs,
            errors: outcome.errors,
        })
    }

    fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Build the tree-wide census of distinct tags and their files.
pub fn tag_census(files: &[FileReport]) -> TagCensus {
    let mut census = TagCensus::new();
    for report in files {
        for event in &report.events {
            census
                .entry(event.tag.clone())
                .or_default()
                .insert(report.file.clone());
        }
    }
    census
}
