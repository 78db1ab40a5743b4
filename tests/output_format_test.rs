//! Tests for JSON output schema stability.
//!
//! Downstream tooling parses the JSON report, so field names and shapes
//! must not drift.

use std::path::PathBuf;

use snipcheck::report::to_json_report;
use snipcheck::scan::Runner;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn run_and_get_json() -> serde_json::Value {
    let testdata = testdata_path();

    let mut files: Vec<PathBuf> = std::fs::read_dir(&testdata)
        .expect("should read testdata dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let report = Runner::new(&testdata).run(&files);
    let json = to_json_report("testdata", &report);
    serde_json::to_value(&json).expect("report should serialize")
}

#[test]
fn test_json_top_level_fields() {
    let value = run_and_get_json();

    assert!(value["version"].is_string());
    assert_eq!(value["root"], "testdata");
    assert_eq!(value["files_scanned"], 8);
    assert_eq!(value["files_skipped"], 1);
    assert_eq!(value["error_count"], 3);
    assert_eq!(value["ambiguity_count"], 3);
    assert!(value["files"].is_array());
    assert!(value["ambiguities"].is_array());
}

#[test]
fn test_json_file_entries() {
    let value = run_and_get_json();
    let files = value["files"].as_array().expect("files should be an array");

    assert_eq!(files.len(), 7);
    for file in files {
        assert!(file["file"].is_string());
        assert!(file["marker_count"].as_u64().unwrap() >= 1);
        assert!(file["errors"].is_array());
    }
}

#[test]
fn test_json_finding_shape() {
    let value = run_and_get_json();
    let files = value["files"].as_array().unwrap();

    let unmatched = files
        .iter()
        .find(|f| f["file"] == "unmatched.py")
        .expect("unmatched.py should be present");
    let finding = &unmatched["errors"][0];

    assert_eq!(finding["rule"], "unmatched_end");
    assert_eq!(finding["severity"], "error");
    assert_eq!(finding["line"], 4);
    assert!(finding["message"]
        .as_str()
        .unwrap()
        .contains("phantom_region"));
}

#[test]
fn test_json_nested_region_shape() {
    let value = run_and_get_json();
    let files = value["files"].as_array().unwrap();

    let nested = files
        .iter()
        .find(|f| f["file"] == "nested.md")
        .expect("nested.md should be present");
    let region = &nested["nested_regions"][0];

    assert_eq!(region["outer_tag"], "full_example");
    assert_eq!(region["inner_tag"], "client_setup");
    assert_eq!(region["depth"], 2);
    assert!(region["outer_line"].as_u64().unwrap() < region["inner_line"].as_u64().unwrap());
}

#[test]
fn test_json_ambiguity_shape() {
    let value = run_and_get_json();
    let groups = value["ambiguities"].as_array().unwrap();

    assert_eq!(groups.len(), 3);
    // Ranked by collision count, ties by tag name.
    assert_eq!(groups[0]["tag"], "auth");
    assert_eq!(groups[0]["collides_with"][0], "auth_retry");
    assert_eq!(groups[0]["files"][0], "ambiguous_a.rs");
}

#[test]
fn test_json_round_trips() {
    let value = run_and_get_json();
    let text = serde_json::to_string(&value).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, reparsed);
}
