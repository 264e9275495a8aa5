//! Runtime mode configuration.
//!
//! The runtime mode is set via the `NCSTR_MODE` environment variable:
//! - `strict` (default): C behavior for everything C defines. Null buffers
//!   get a safe default, but frees are passed straight to the allocator.
//! - `hardened`: the membrane also refuses frees of pointers it did not hand
//!   out and frees it has already seen, recording each refusal.
//! - `off`: no validation. Pure passthrough for benchmarking baseline only,
//!   reachable through the API but never through the environment.

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable holding the runtime mode.
pub const MODE_ENV_VAR: &str = "NCSTR_MODE";

/// Runtime operating mode for the membrane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// C-compatible behavior with null-buffer defaults.
    #[default]
    Strict,
    /// Strict plus ownership checks on `nc_free`.
    Hardened,
    /// No validation.
    Off,
}

impl SafetyLevel {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "strict" | "default" | "abi" => Self::Strict,
            "hardened" | "repair" | "full" => Self::Hardened,
            "off" | "none" | "disabled" => Self::Off,
            _ => Self::Strict,
        }
    }

    /// Stable lowercase name, as accepted by [`SafetyLevel::from_str_loose`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
            Self::Off => "off",
        }
    }

    /// Returns true if the membrane should apply healing actions.
    #[must_use]
    pub const fn heals_enabled(self) -> bool {
        matches!(self, Self::Hardened)
    }

    /// Returns true if validation is active.
    #[must_use]
    pub const fn validation_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

// Atomic cache: 0=unresolved, 1=Strict, 2=Hardened, 3=Off.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(0);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_STRICT: u8 = 1;
const LEVEL_HARDENED: u8 = 2;
const LEVEL_OFF: u8 = 3;

fn parse_runtime_mode_env(raw: &str) -> SafetyLevel {
    match SafetyLevel::from_str_loose(raw) {
        // `Off` stays an API-only baseline.
        SafetyLevel::Off => SafetyLevel::Strict,
        level => level,
    }
}

fn level_to_u8(level: SafetyLevel) -> u8 {
    match level {
        SafetyLevel::Strict => LEVEL_STRICT,
        SafetyLevel::Hardened => LEVEL_HARDENED,
        SafetyLevel::Off => LEVEL_OFF,
    }
}

fn u8_to_level(v: u8) -> SafetyLevel {
    match v {
        LEVEL_HARDENED => SafetyLevel::Hardened,
        LEVEL_OFF => SafetyLevel::Off,
        _ => SafetyLevel::Strict,
    }
}

/// Get the configured safety level (reads env var on first call, caches thereafter).
#[must_use]
pub fn safety_level() -> SafetyLevel {
    let cached = CACHED_LEVEL.load(Ordering::Acquire);
    if cached != LEVEL_UNRESOLVED {
        return u8_to_level(cached);
    }

    let level = std::env::var(MODE_ENV_VAR)
        .map(|v| parse_runtime_mode_env(&v))
        .unwrap_or_default();
    // First resolver wins; a racing thread reads the same environment.
    match CACHED_LEVEL.compare_exchange(
        LEVEL_UNRESOLVED,
        level_to_u8(level),
        Ordering::AcqRel,
        Ordering::Acquire,
    ) {
        Ok(_) => level,
        Err(existing) => u8_to_level(existing),
    }
}

/// Override the cached safety level for the rest of the process.
///
/// Used by the harness and benchmarks to pin a mode, including `Off`.
pub fn set_safety_level(level: SafetyLevel) {
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
}
