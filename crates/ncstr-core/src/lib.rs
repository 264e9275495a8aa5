//! # ncstr-core
//!
//! Safe Rust implementations of the ncstr utility library.
//!
//! Strings are modelled as `&[u8]` slices holding NUL-terminated C strings:
//! the first `0x00` byte marks the logical end, and a slice with no NUL ends
//! at its last byte. No `unsafe` code is permitted at the crate level; the
//! raw-pointer boundary lives in `ncstr-abi`.

#![deny(unsafe_code)]

pub mod num;
pub mod string;
