//! Integration test: checked-in conformance fixtures
//!
//! Validates that:
//! 1. Every fixture file under tests/conformance/fixtures parses.
//! 2. Every case names a supported function and a known mode.
//! 3. Every case passes through the C boundary in strict and hardened mode.
//! 4. The artifact index covers every fixture file.
//!
//! Run: cargo test -p ncstr-harness --test conformance_fixture_pipeline_test

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ncstr_harness::execute::SUPPORTED_FUNCTIONS;
use ncstr_harness::fixtures::{fixture_files, load_fixture_sets};
use ncstr_harness::structured_log::ArtifactIndex;
use ncstr_harness::verify::VerificationSummary;
use ncstr_harness::TestRunner;

fn fixture_dir() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/conformance/fixtures")
}

#[test]
fn fixture_files_parse() {
    let sets = load_fixture_sets(&fixture_dir()).expect("fixtures should load");
    assert!(sets.len() >= 3, "expected at least three fixture families");
    for set in &sets {
        assert_eq!(set.version, "v1", "{}: unexpected version", set.family);
        assert!(!set.cases.is_empty(), "{}: no cases", set.family);
    }
}

#[test]
fn cases_are_well_formed() {
    let sets = load_fixture_sets(&fixture_dir()).unwrap();
    let mut names = HashSet::new();
    for case in sets.iter().flat_map(|s| s.cases.iter()) {
        assert!(
            SUPPORTED_FUNCTIONS.contains(&case.function.as_str()),
            "{}: unsupported function {}",
            case.name,
            case.function
        );
        assert!(
            matches!(case.mode.as_str(), "strict" | "hardened" | "both"),
            "{}: unknown mode {}",
            case.name,
            case.mode
        );
        assert!(names.insert(case.name.clone()), "duplicate case {}", case.name);
    }
}

#[test]
fn every_function_is_covered() {
    let sets = load_fixture_sets(&fixture_dir()).unwrap();
    let covered: HashSet<&str> = sets
        .iter()
        .flat_map(|s| s.cases.iter())
        .map(|c| c.function.as_str())
        .collect();
    for function in SUPPORTED_FUNCTIONS {
        assert!(covered.contains(function), "no fixture covers {function}");
    }
}

#[test]
fn all_cases_pass_in_both_modes() {
    let sets = load_fixture_sets(&fixture_dir()).unwrap();
    let mut results = Vec::new();
    for mode in ["strict", "hardened"] {
        let runner = TestRunner::new("pipeline-test", mode);
        for set in &sets {
            results.extend(runner.run(set).expect("mode should be supported"));
        }
    }
    let summary = VerificationSummary::from_results(results);
    let failures: Vec<String> = summary
        .results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| format!("{}: expected {} got {}", r.case_name, r.expected, r.actual))
        .collect();
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
    assert!(summary.all_passed());
}

#[test]
fn artifact_index_covers_fixture_files() {
    let files = fixture_files(&fixture_dir()).unwrap();
    let mut index = ArtifactIndex::new("pipeline-test");
    for path in &files {
        index.add_file(path, "fixture").expect("fixture should hash");
    }
    let json: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
    let artifacts = json["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), files.len());
    for artifact in artifacts {
        let digest = artifact["sha256"].as_str().unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
