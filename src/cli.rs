//! Command-line interface for snipcheck.

use clap::{Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::report;
use crate::scan::{tag_census, Runner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into. Hidden directories are skipped
/// separately.
const EXCLUDED_DIRS: &[&str] = &[
    "target",
    "node_modules",
    "vendor",
    "dist",
    "build",
    "__pycache__",
];

/// Snippet region linter - detect broken [START]/[END] marker pairing.
///
/// Snipcheck scans a tree of source files for paired snippet region markers
/// embedded in comments and reports the structural problems plain text
/// search cannot see: improper nesting, unmatched or unclosed regions, and
/// tag names that are substrings of other tag names.
#[derive(Parser)]
#[command(name = "snipcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a tree for marker pairing problems
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
    /// List every distinct tag with its occurrences
    Tags(TagsArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to scan (file or directory, default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Glob patterns for paths to exclude (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Also fail the scan when ambiguous tag names are found
    #[arg(long)]
    pub strict: bool,

    /// Omit files whose markers produced no findings from pretty output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the tags command.
#[derive(Parser)]
pub struct TagsArgs {
    /// Path to scan (file or directory, default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Glob patterns for paths to exclude (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

/// Build a glob set from user exclusion patterns.
fn build_exclude_set(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?;
        builder.add(glob);
    }
    Ok(Some(builder.build()?))
}

/// Collect every regular file under the root.
///
/// Skips hidden directories and conventional build/dependency directories.
/// No extension filtering: markers legitimately appear in any text file, so
/// binary detection happens at read time instead.
fn collect_files(root: &Path, exclude: Option<&GlobSet>) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is never filtered, whatever its name.
            if !e.file_type().is_dir() || e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !EXCLUDED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(set) = exclude {
            let rel = path.strip_prefix(root).unwrap_or(path);
            if set.is_match(rel) {
                continue;
            }
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Resolve the scan root and collect its files.
fn resolve_and_collect(
    path: &Path,
    exclude_patterns: &[String],
) -> anyhow::Result<(PathBuf, Vec<PathBuf>)> {
    let abs_path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("cannot access path {:?}: {}", path, e))?;

    let metadata = std::fs::metadata(&abs_path)?;
    let exclude = build_exclude_set(exclude_patterns)?;

    let files = if metadata.is_dir() {
        collect_files(&abs_path, exclude.as_ref())?
    } else {
        vec![abs_path.clone()]
    };

    Ok((abs_path, files))
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (abs_path, files) = match resolve_and_collect(&args.path, &args.exclude) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let base_dir = if abs_path.is_dir() {
        abs_path.clone()
    } else {
        abs_path.parent().unwrap_or(&abs_path).to_path_buf()
    };

    let result = Runner::new(&base_dir).run(&files);

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &result)?,
        _ => report::write_pretty(&path_str, &result, args.quiet),
    }

    let failed = result.has_errors() || (args.strict && result.has_ambiguities());
    if failed {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the tags command.
pub fn run_tags(args: &TagsArgs) -> anyhow::Result<i32> {
    let (abs_path, files) = match resolve_and_collect(&args.path, &args.exclude) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let base_dir = if abs_path.is_dir() {
        abs_path.clone()
    } else {
        abs_path.parent().unwrap_or(&abs_path).to_path_buf()
    };

    let result = Runner::new(&base_dir).run(&files);
    let census = tag_census(&result.files);

    if census.is_empty() {
        println!("No tags found");
        return Ok(EXIT_SUCCESS);
    }

    for (tag, tag_files) in &census {
        let occurrences: usize = result
            .files
            .iter()
            .flat_map(|f| &f.events)
            .filter(|e| &e.tag == tag)
            .count();
        let plural = if occurrences != 1 { "s" } else { "" };
        println!("{}  ({} marker{})", tag, occurrences, plural);
        for file in tag_files {
            println!("    {}", file);
        }
    }

    Ok(EXIT_SUCCESS)
}
