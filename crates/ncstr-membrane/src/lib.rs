//! Safety membrane for the ncstr C boundary.
//!
//! Sits between the `extern "C"` entry points in `ncstr-abi` and the safe
//! implementations in `ncstr-core`. It decides how invalid inputs (null
//! buffers, foreign or repeated frees) are handled and keeps count of every
//! repair it applies.
//!
//! # Architecture
//!
//! - **Configuration** (`config`): runtime safety level from `NCSTR_MODE`
//! - **Self-healing engine** (`heal`): deterministic repair actions and counters
//! - **Allocation registry** (`registry`): ownership of buffers handed out by `nc_substr`

#![deny(unsafe_code)]

pub mod config;
pub mod heal;
pub mod registry;

pub use config::{SafetyLevel, safety_level};
pub use heal::{HealingAction, HealingPolicy, global_healing_policy};
pub use registry::{AllocationRegistry, ReleaseResult, global_registry};
