//! Safe wrappers that drive the `extern "C"` entry points from Rust.
//!
//! Buffers passed in here are always NUL-terminated by the fixture decoder;
//! `None` stands for a null pointer.

#![allow(unsafe_code)]

use std::ffi::{CStr, c_char, c_void};
use std::ptr;

use ncstr_abi::malloc_abi::nc_free;
use ncstr_abi::num_abi::{nc_clamp, nc_numlen};
use ncstr_abi::string_abi::{nc_count, nc_strlen, nc_strncmp, nc_strnstr, nc_substr};

fn ptr_of(buf: Option<&[u8]>) -> *const c_char {
    debug_assert!(buf.is_none_or(|b| b.contains(&0)), "unterminated buffer");
    buf.map_or(ptr::null(), |b| b.as_ptr().cast())
}

pub fn strlen(s: Option<&[u8]>) -> usize {
    // SAFETY: null or NUL-terminated.
    unsafe { nc_strlen(ptr_of(s)) }
}

pub fn strncmp(s1: Option<&[u8]>, s2: Option<&[u8]>, n: usize) -> i32 {
    // SAFETY: null or NUL-terminated.
    unsafe { nc_strncmp(ptr_of(s1), ptr_of(s2), n) }
}

pub fn strnstr(big: Option<&[u8]>, little: Option<&[u8]>, len: usize) -> Option<usize> {
    let base = ptr_of(big);
    // SAFETY: null or NUL-terminated.
    let found = unsafe { nc_strnstr(base, ptr_of(little), len) };
    if found.is_null() {
        None
    } else {
        Some(found as usize - base as usize)
    }
}

/// Runs `nc_substr`, copies the result out and releases it with `nc_free`.
pub fn substr(s: Option<&[u8]>, start: u32, len: usize) -> Option<Vec<u8>> {
    // SAFETY: null or NUL-terminated.
    let out = unsafe { nc_substr(ptr_of(s), start, len) };
    if out.is_null() {
        return None;
    }
    // SAFETY: `nc_substr` returns a NUL-terminated buffer we own.
    let bytes = unsafe { CStr::from_ptr(out) }.to_bytes().to_vec();
    // SAFETY: `out` came from `nc_substr` and is released exactly once.
    unsafe { nc_free(out.cast::<c_void>()) };
    Some(bytes)
}

pub fn count(s: Option<&[u8]>, c: u8) -> i32 {
    // SAFETY: null or NUL-terminated.
    unsafe { nc_count(ptr_of(s), c as c_char) }
}

pub fn numlen(n: i32) -> i32 {
    nc_numlen(n)
}

pub fn clamp(n: i32, min: i32, max: i32) -> i32 {
    nc_clamp(n, min, max)
}
