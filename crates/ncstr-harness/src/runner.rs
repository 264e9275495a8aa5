//! Test execution engine.

use ncstr_membrane::SafetyLevel;
use ncstr_membrane::config::set_safety_level;

use crate::diff;
use crate::error::HarnessError;
use crate::execute::execute_fixture_case;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (strict or hardened).
    pub mode: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    /// Pin the process runtime mode to this runner's mode.
    pub fn activate(&self) -> Result<SafetyLevel, HarnessError> {
        let level = match self.mode.to_ascii_lowercase().as_str() {
            "strict" => SafetyLevel::Strict,
            "hardened" => SafetyLevel::Hardened,
            _ => return Err(HarnessError::UnsupportedMode(self.mode.clone())),
        };
        set_safety_level(level);
        Ok(level)
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Result<Vec<VerificationResult>, HarnessError> {
        self.activate()?;
        Ok(fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(&self.mode, &case.mode))
            .map(|case| {
                let CaseOutcome {
                    actual,
                    diff,
                    healing_action,
                } = execute_case(case);
                let case_name = if case.mode.eq_ignore_ascii_case("both") {
                    format!("{} [{}]", case.name, self.mode)
                } else {
                    case.name.clone()
                };
                VerificationResult {
                    case_name,
                    function: case.function.clone(),
                    contract: case.contract.clone(),
                    passed: actual.as_ref().is_ok_and(|out| *out == case.expected_output),
                    expected: case.expected_output.clone(),
                    actual: actual.unwrap_or_else(|unsupported| unsupported),
                    diff,
                    healing_action: healing_action.map(str::to_string),
                }
            })
            .collect())
    }
}

fn mode_matches(active_mode: &str, case_mode: &str) -> bool {
    let active = active_mode.to_ascii_lowercase();
    let case = case_mode.to_ascii_lowercase();
    case == active || case == "both"
}

/// What one case produced at the C boundary.
struct CaseOutcome {
    /// ABI output; `Err` when the case could not run or lost core parity.
    actual: Result<String, String>,
    diff: Option<String>,
    healing_action: Option<&'static str>,
}

/// A core/ABI disagreement fails the case even if the ABI output matches.
fn execute_case(case: &FixtureCase) -> CaseOutcome {
    match execute_fixture_case(&case.function, &case.inputs) {
        Ok(run) => {
            let parity = run.parity();
            let mut notes = Vec::new();
            if !parity {
                notes.push(format!(
                    "core parity mismatch: abi={}, core={}",
                    run.impl_output,
                    run.core_output.as_deref().unwrap_or("-")
                ));
            }

            let diff_out = if run.impl_output != case.expected_output {
                let mut rendered = diff::render_diff(&case.expected_output, &run.impl_output);
                for note in &notes {
                    rendered.push_str(note);
                    rendered.push('\n');
                }
                Some(rendered)
            } else if !notes.is_empty() {
                Some(notes.join("\n"))
            } else {
                None
            };

            CaseOutcome {
                actual: if parity {
                    Ok(run.impl_output)
                } else {
                    Err(run.impl_output)
                },
                diff: diff_out,
                healing_action: run.healing_action,
            }
        }
        Err(err) => {
            let actual = format!("unsupported:{err}");
            CaseOutcome {
                diff: Some(diff::render_diff(&case.expected_output, &actual)),
                actual: Err(actual),
                healing_action: None,
            }
        }
    }
}
