//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested (`strlen`, `substr`, ...).
    pub function: String,
    /// Contract reference for reports.
    pub contract: String,
    /// Input parameters.
    pub inputs: serde_json::Value,
    /// Expected output, rendered the way the executor renders it.
    pub expected_output: String,
    /// Runtime mode this case applies to: `strict`, `hardened` or `both`.
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// All `*.json` files directly inside `dir`, sorted by name.
pub fn fixture_files(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Err(HarnessError::NoFixtures(dir.display().to_string()));
    }
    files.sort();
    Ok(files)
}

/// Load every fixture set in `dir`, or the single file if `path` is a file.
pub fn load_fixture_sets(path: &Path) -> Result<Vec<FixtureSet>, HarnessError> {
    if path.is_file() {
        return Ok(vec![FixtureSet::from_file(path)?]);
    }
    fixture_files(path)?
        .iter()
        .map(|file| FixtureSet::from_file(file))
        .collect()
}
