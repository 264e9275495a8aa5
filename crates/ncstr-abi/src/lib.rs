//! # ncstr-abi
//!
//! `extern "C"` boundary layer for ncstr.
//!
//! This crate produces a `cdylib` exposing the `nc_*` functions with their C
//! signatures. Each entry point converts raw pointers into slices, consults
//! the membrane for null buffers and frees, and delegates to `ncstr-core`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> Membrane checks -> Core impl -> return
//! ```
//!
//! Null buffers handed to the read-only functions return a safe default, and
//! the heal is recorded while validation is on. In **hardened** mode `nc_free` additionally ignores
//! pointers it did not allocate and pointers it already released.

pub mod malloc_abi;
pub mod num_abi;
pub mod string_abi;

mod util;
