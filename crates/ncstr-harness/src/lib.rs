//! Conformance testing harness for ncstr.
//!
//! This crate provides:
//! - Fixture loading: JSON reference cases per function family
//! - Differential execution: every case runs through both the safe core and
//!   the `extern "C"` boundary, and the two must agree
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured JSONL logging with a SHA-256 artifact index

#![deny(unsafe_code)]

pub mod abi_exec;
pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
