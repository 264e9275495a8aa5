//! Per-case verdicts and their aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Verdict for one fixture case in one runtime mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Case name, suffixed with the mode for `both` cases.
    pub case_name: String,
    /// `nc_*` function exercised, without the prefix.
    pub function: String,
    pub contract: String,
    pub passed: bool,
    pub expected: String,
    /// Output observed at the C boundary.
    pub actual: String,
    /// Line diff and parity notes; absent for clean passes.
    pub diff: Option<String>,
    /// Heal the boundary applied (e.g. `return_safe_default` for a null buffer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing_action: Option<String>,
}

/// Pass/fail counts for one function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionTally {
    pub passed: usize,
    pub failed: usize,
}

/// All verdicts of a run plus their counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Cases answered with a heal instead of the plain C behaviour.
    pub healed: usize,
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let healed = results
            .iter()
            .filter(|r| r.healing_action.is_some())
            .count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            healed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Counts per function, ordered by name.
    #[must_use]
    pub fn by_function(&self) -> BTreeMap<&str, FunctionTally> {
        let mut tallies: BTreeMap<&str, FunctionTally> = BTreeMap::new();
        for r in &self.results {
            let tally = tallies.entry(r.function.as_str()).or_default();
            if r.passed {
                tally.passed += 1;
            } else {
                tally.failed += 1;
            }
        }
        tallies
    }
}
