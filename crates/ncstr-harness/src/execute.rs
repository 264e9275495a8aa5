//! Differential execution of a single fixture case.
//!
//! A case runs through the `extern "C"` boundary (the behaviour C callers
//! observe) and, where the inputs are expressible there, through the safe
//! core as well. The ABI output is the one compared against fixtures; a
//! disagreement with the core is reported as a parity failure.
//!
//! String inputs are either JSON strings (UTF-8 text, NUL appended), arrays
//! of byte values (NUL appended if missing), or `null` for a null pointer.

use serde_json::Value;

use ncstr_core::{num, string};
use ncstr_membrane::HealingAction;

use crate::abi_exec;
use crate::error::HarnessError;

/// Result of executing one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureExecution {
    /// Output observed through the C boundary.
    pub impl_output: String,
    /// Output of the safe core, when the inputs are valid there.
    pub core_output: Option<String>,
    /// Extra context for reports (e.g. why the core was skipped).
    pub note: Option<String>,
    /// Heal the C boundary applied to this call, if any.
    pub healing_action: Option<&'static str>,
}

impl FixtureExecution {
    /// True when the core either agrees or was not applicable.
    #[must_use]
    pub fn parity(&self) -> bool {
        self.core_output
            .as_ref()
            .is_none_or(|core| *core == self.impl_output)
    }
}

/// Functions accepted by [`execute_fixture_case`].
pub const SUPPORTED_FUNCTIONS: &[&str] = &[
    "strlen", "strncmp", "strnstr", "substr", "count", "numlen", "clamp",
];

/// Execute `function` with JSON `inputs`.
pub fn execute_fixture_case(
    function: &str,
    inputs: &Value,
) -> Result<FixtureExecution, HarnessError> {
    match function {
        "strlen" => {
            let s = buffer(inputs, "s")?;
            Ok(differential(
                abi_exec::strlen(s.as_deref()).to_string(),
                s.as_deref().map(|s| string::strlen(s).to_string()),
            ))
        }
        "strncmp" => {
            let s1 = buffer(inputs, "s1")?;
            let s2 = buffer(inputs, "s2")?;
            let n = unsigned(inputs, "n")?;
            let core = match (s1.as_deref(), s2.as_deref()) {
                (Some(a), Some(b)) => Some(string::strncmp(a, b, n).to_string()),
                _ => None,
            };
            Ok(differential(
                abi_exec::strncmp(s1.as_deref(), s2.as_deref(), n).to_string(),
                core,
            ))
        }
        "strnstr" => {
            let big = buffer(inputs, "big")?;
            let little = buffer(inputs, "little")?;
            let len = unsigned(inputs, "len")?;
            let core = match (big.as_deref(), little.as_deref()) {
                (Some(b), Some(l)) => Some(render_index(string::strnstr(b, l, len))),
                _ => None,
            };
            Ok(differential(
                render_index(abi_exec::strnstr(big.as_deref(), little.as_deref(), len)),
                core,
            ))
        }
        "substr" => {
            let s = buffer(inputs, "s")?;
            let start = unsigned(inputs, "start")?;
            let start = u32::try_from(start).map_err(|_| HarnessError::InvalidInput {
                key: "start".to_string(),
                reason: format!("{start} does not fit an unsigned int"),
            })?;
            let len = unsigned(inputs, "len")?;
            // The core reports the absent source itself, so it always runs.
            let core = string::substr(s.as_deref(), start as usize, len).map(|mut out| {
                out.pop();
                out
            });
            Ok(differential(
                render_bytes(abi_exec::substr(s.as_deref(), start, len).as_deref()),
                Some(render_bytes(core.as_deref())),
            ))
        }
        "count" => {
            let s = buffer(inputs, "s")?;
            let c = byte(inputs, "c")?;
            Ok(differential(
                abi_exec::count(s.as_deref(), c).to_string(),
                s.as_deref().map(|s| string::count(s, c).to_string()),
            ))
        }
        "numlen" => {
            let n = int(inputs, "n")?;
            Ok(differential(
                abi_exec::numlen(n).to_string(),
                Some(num::numlen(n).to_string()),
            ))
        }
        "clamp" => {
            let n = int(inputs, "n")?;
            let min = int(inputs, "min")?;
            let max = int(inputs, "max")?;
            Ok(differential(
                abi_exec::clamp(n, min, max).to_string(),
                Some(num::clamp(n, min, max).to_string()),
            ))
        }
        other => Err(HarnessError::UnsupportedFunction(other.to_string())),
    }
}

/// A missing core output means a null buffer reached a read-only entry
/// point, which the boundary answers with its safe default.
fn differential(impl_output: String, core_output: Option<String>) -> FixtureExecution {
    let null_input = core_output.is_none();
    FixtureExecution {
        impl_output,
        core_output,
        note: null_input.then(|| "null argument: core path not applicable".to_string()),
        healing_action: null_input.then(|| HealingAction::ReturnSafeDefault.name()),
    }
}

/// Render an optional byte string as a JSON string literal or `null`.
#[must_use]
pub fn render_bytes(bytes: Option<&[u8]>) -> String {
    match bytes {
        Some(b) => Value::String(String::from_utf8_lossy(b).into_owned()).to_string(),
        None => "null".to_string(),
    }
}

fn render_index(idx: Option<usize>) -> String {
    idx.map_or_else(|| "null".to_string(), |i| i.to_string())
}

fn input<'a>(inputs: &'a Value, key: &str) -> Result<&'a Value, HarnessError> {
    inputs
        .get(key)
        .ok_or_else(|| HarnessError::MissingInput(key.to_string()))
}

fn invalid(key: &str, reason: impl Into<String>) -> HarnessError {
    HarnessError::InvalidInput {
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Decode a NUL-terminated buffer; `Ok(None)` means a null pointer.
fn buffer(inputs: &Value, key: &str) -> Result<Option<Vec<u8>>, HarnessError> {
    let mut bytes = match input(inputs, key)? {
        Value::Null => return Ok(None),
        Value::String(text) => text.as_bytes().to_vec(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| invalid(key, format!("{item} is not a byte value")))
            })
            .collect::<Result<Vec<u8>, _>>()?,
        other => {
            return Err(invalid(
                key,
                format!("expected string, byte array or null, got {other}"),
            ));
        }
    };
    if bytes.last() != Some(&0) {
        bytes.push(0);
    }
    Ok(Some(bytes))
}

fn unsigned(inputs: &Value, key: &str) -> Result<usize, HarnessError> {
    let value = input(inputs, key)?;
    value
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| invalid(key, format!("{value} is not an unsigned integer")))
}

fn int(inputs: &Value, key: &str) -> Result<i32, HarnessError> {
    let value = input(inputs, key)?;
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| invalid(key, format!("{value} is not a 32-bit integer")))
}

/// A single character: a one-byte string or a numeric byte value.
fn byte(inputs: &Value, key: &str) -> Result<u8, HarnessError> {
    match input(inputs, key)? {
        Value::String(text) if text.len() == 1 => Ok(text.as_bytes()[0]),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| invalid(key, format!("{n} is not a byte value"))),
        other => Err(invalid(key, format!("expected one character, got {other}"))),
    }
}
