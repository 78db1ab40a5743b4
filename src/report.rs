//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::scan::{AmbiguityGroup, FileReport, Severity, TreeReport};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub root: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub error_count: usize,
    pub ambiguity_count: usize,
    pub files: Vec<JsonFileReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguities: Vec<JsonAmbiguity>,
}

/// Per-file findings.
#[derive(Serialize, Deserialize)]
pub struct JsonFileReport {
    pub file: String,
    pub marker_count: usize,
    pub errors: Vec<JsonFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_regions: Vec<JsonNestedRegion>,
}

/// A single structural finding.
#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub rule: String,
    pub severity: String,
    pub line: usize,
    pub message: String,
}

/// A nested-region observation.
#[derive(Serialize, Deserialize)]
pub struct JsonNestedRegion {
    pub outer_tag: String,
    pub outer_line: usize,
    pub inner_tag: String,
    pub inner_line: usize,
    pub depth: usize,
}

/// A substring collision group.
#[derive(Serialize, Deserialize)]
pub struct JsonAmbiguity {
    pub tag: String,
    pub collides_with: Vec<String>,
    pub files: Vec<String>,
}

/// Write results in JSON format to stdout.
pub fn write_json(root: &str, report: &TreeReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json_report(root, report))?;
    println!("{}", json);
    Ok(())
}

/// Build the serializable report structure.
pub fn to_json_report(root: &str, report: &TreeReport) -> JsonReport {
    let files = report
        .files
        .iter()
        .map(|f| JsonFileReport {
            file: f.file.clone(),
            marker_count: f.events.len(),
            errors: f
                .errors
                .iter()
                .map(|e| JsonFinding {
                    rule: e.rule().to_string(),
                    severity: Severity::Error.to_string(),
                    line: e.line(),
                    message: e.to_string(),
                })
                .collect(),
            nested_regions: f
                .nested_pairs
                .iter()
                .map(|p| JsonNestedRegion {
                    outer_tag: p.outer.tag.clone(),
                    outer_line: p.outer.line,
                    inner_tag: p.inner.tag.clone(),
                    inner_line: p.inner.line,
                    depth: p.depth,
                })
                .collect(),
        })
        .collect();

    let ambiguities = report
        .ambiguities
        .iter()
        .map(|g| JsonAmbiguity {
            tag: g.substring.clone(),
            collides_with: g.superstrings.clone(),
            files: g.files.clone(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        root: root.to_string(),
        files_scanned: report.scanned,
        files_skipped: report.skipped,
        error_count: report.error_count(),
        ambiguity_count: report.ambiguity_count(),
        files,
        ambiguities,
    }
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
///
/// With `quiet`, files whose markers produced no findings are omitted.
pub fn write_pretty(root: &str, report: &TreeReport, quiet: bool) {
    // Header
    println!();
    print!("  ");
    print!("{}", "snipcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", root);
    print!("  {}", "Files:    ".dimmed());
    print!("{} scanned", report.scanned);
    if report.skipped > 0 {
        print!("{}", format!(", {} skipped", report.skipped).dimmed());
    }
    println!();
    println!();

    for file in &report.files {
        write_file_report(file, quiet);
    }

    if !report.ambiguities.is_empty() {
        write_ambiguities(&report.ambiguities);
        println!();
    }

    write_summary(report);
    println!();
}

fn write_file_report(file: &FileReport, quiet: bool) {
    if quiet && file.errors.is_empty() && file.nested_pairs.is_empty() {
        return;
    }

    print!("  {}", file.file.blue());
    println!("{}", format!(" ({} markers)", file.events.len()).dimmed());

    for error in &file.errors {
        write_severity_tag(&Severity::Error);
        print!("{:<16}", error.rule().dimmed());
        println!("{}", format!(":{}", error.line()).dimmed());
        println!("          {}", error);
    }

    for pair in &file.nested_pairs {
        write_severity_tag(&Severity::Info);
        print!("{:<16}", "nested_region".dimmed());
        println!("{}", format!(":{}", pair.inner.line).dimmed());
        println!(
            "          [START {}] opens inside [START {}] at depth {}",
            pair.inner.tag, pair.outer.tag, pair.depth
        );
    }

    println!();
}

fn write_ambiguities(groups: &[AmbiguityGroup]) {
    println!("  {} ({}):", "Ambiguous tags".bold(), groups.len());
    println!();

    for group in groups {
        write_severity_tag(&Severity::Warning);
        print!("{}", group.substring.bold());
        let plural = if group.collision_count() != 1 { "s" } else { "" };
        println!(
            "{}",
            format!(
                " is a substring of {} other tag{}",
                group.collision_count(),
                plural
            )
            .dimmed()
        );
        println!("          contains it: {}", group.superstrings.join(", "));
        if !group.files.is_empty() {
            println!(
                "          {}",
                format!("defined in: {}", group.files.join(", ")).dimmed()
            );
        }
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_summary(report: &TreeReport) {
    let errors = report.error_count();

    if errors == 0 {
        print!("  {}", "✓ PASS".green());
    } else {
        print!("  {}", "✗ FAIL".red());
    }

    print!("  ");
    write_count("error", errors, |s| s.red().to_string());
    print!("  ");
    write_count("ambiguous tag", report.ambiguities.len(), |s| {
        s.yellow().to_string()
    });
    print!("  ");
    write_count("nested region", report.nested_count(), |s| s.to_string());
    println!();
}

fn write_count(noun: &str, count: usize, color: impl Fn(&str) -> String) {
    let plural = if count != 1 { "s" } else { "" };
    let text = format!("{} {}{}", count, noun, plural);
    if count > 0 {
        print!("{}", color(&text));
    } else {
        print!("{}", text.dimmed());
    }
}
