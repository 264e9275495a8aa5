//! ABI layer for the `nc_str` functions.
//!
//! Each function is an `extern "C"` entry point that:
//! 1. Sends null buffer arguments through the membrane (safe default + heal record)
//! 2. Borrows the C strings as bounded slices
//! 3. Delegates to `ncstr-core` safe implementations

use std::ffi::{c_char, c_int, c_uint};

use ncstr_core::string::{count, strncmp, strnstr, substr::substr_len};
use ncstr_membrane::{global_healing_policy, safety_level};

use crate::malloc_abi::alloc_tracked;
use crate::util::{c_str_bytes, scan_c_string};

/// Returns true when the call must short-circuit with its safe default.
///
/// Null is always rejected; the heal is only recorded when validation is on.
#[inline]
fn reject_null(is_null: bool) -> bool {
    if !is_null {
        return false;
    }
    if safety_level().validation_enabled() {
        let policy = global_healing_policy();
        let action = policy.heal_null_buffer(true);
        policy.record(&action);
    }
    true
}

// ---------------------------------------------------------------------------
// nc_strlen
// ---------------------------------------------------------------------------

/// Computes the length of a NUL-terminated string.
///
/// A null `s` yields 0.
///
/// # Safety
///
/// `s` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_strlen(s: *const c_char) -> usize {
    if reject_null(s.is_null()) {
        return 0;
    }
    // SAFETY: caller guarantees a NUL-terminated string.
    let (len, _) = unsafe { scan_c_string(s, None) };
    len
}

// ---------------------------------------------------------------------------
// nc_strncmp
// ---------------------------------------------------------------------------

/// Compares at most `n` bytes of two strings.
///
/// Never reads beyond `n` bytes of either argument. A null argument yields 0.
///
/// # Safety
///
/// Each argument must be null or readable up to its NUL or `n` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_strncmp(s1: *const c_char, s2: *const c_char, n: usize) -> c_int {
    if reject_null(s1.is_null() || s2.is_null()) {
        return 0;
    }
    // SAFETY: bounded scans within the caller's guarantee.
    let (a, b) = unsafe { (c_str_bytes(s1, Some(n)), c_str_bytes(s2, Some(n))) };
    strncmp(a, b, n)
}

// ---------------------------------------------------------------------------
// nc_strnstr
// ---------------------------------------------------------------------------

/// Locates `little` within the first `len` bytes of `big`.
///
/// Returns a pointer into `big`, or null when not found or when either
/// argument is null.
///
/// # Safety
///
/// `big` must be readable up to its NUL or `len` bytes; `little` must be a
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_strnstr(
    big: *const c_char,
    little: *const c_char,
    len: usize,
) -> *mut c_char {
    if reject_null(big.is_null() || little.is_null()) {
        return std::ptr::null_mut();
    }
    // SAFETY: bounded scan of `big`, unbounded scan of terminated `little`.
    let (haystack, needle) = unsafe { (c_str_bytes(big, Some(len)), c_str_bytes(little, None)) };
    match strnstr(haystack, needle, len) {
        // SAFETY: `idx` lies within the scanned prefix of `big`.
        Some(idx) => unsafe { big.add(idx) }.cast_mut(),
        None => std::ptr::null_mut(),
    }
}

// ---------------------------------------------------------------------------
// nc_substr
// ---------------------------------------------------------------------------

/// Copies up to `len` bytes of `s` starting at `start` into a new buffer.
///
/// The result is NUL-terminated and owned by the caller, who releases it with
/// `nc_free`. A `start` beyond the string yields an empty string. Returns null
/// when `s` is null or the allocation fails.
///
/// # Safety
///
/// `s` must be null or point to a valid NUL-terminated string. The returned
/// buffer must be released with `nc_free` only; releasing it with plain
/// `free` leaves it registered as live.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_substr(s: *const c_char, start: c_uint, len: usize) -> *mut c_char {
    if s.is_null() {
        return std::ptr::null_mut();
    }
    // SAFETY: caller guarantees a NUL-terminated string.
    let src = unsafe { c_str_bytes(s, None) };
    let start = start as usize;
    let copy_len = substr_len(src, start, len);

    let out = alloc_tracked(copy_len + 1);
    if out.is_null() {
        return std::ptr::null_mut();
    }
    // SAFETY: `out` holds `copy_len + 1` freshly allocated bytes.
    let dst = unsafe { std::slice::from_raw_parts_mut(out, copy_len + 1) };
    if copy_len > 0 {
        dst[..copy_len].copy_from_slice(&src[start..start + copy_len]);
    }
    dst[copy_len] = 0;
    out.cast::<c_char>()
}

// ---------------------------------------------------------------------------
// nc_count
// ---------------------------------------------------------------------------

/// Counts occurrences of `c` in `s`. A null `s` yields 0.
///
/// # Safety
///
/// `s` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_count(s: *const c_char, c: c_char) -> c_int {
    if reject_null(s.is_null()) {
        return 0;
    }
    // SAFETY: caller guarantees a NUL-terminated string.
    let bytes = unsafe { c_str_bytes(s, None) };
    c_int::try_from(count(bytes, c as u8)).unwrap_or(c_int::MAX)
}
