//! Shared internal utilities for ABI adapters.

use std::ffi::c_char;

/// Scan a C string with an optional hard bound.
///
/// Returns `(len, terminated)` where:
/// - `len` is the byte length before the first NUL or before the bound.
/// - `terminated` indicates whether a NUL byte was observed.
///
/// # Safety
///
/// `ptr` must be valid to read up to the discovered length (and bound when given).
pub(crate) unsafe fn scan_c_string(ptr: *const c_char, bound: Option<usize>) -> (usize, bool) {
    match bound {
        Some(limit) => {
            for i in 0..limit {
                if unsafe { *ptr.add(i) } == 0 {
                    return (i, true);
                }
            }
            (limit, false)
        }
        None => {
            let mut i = 0usize;
            while unsafe { *ptr.add(i) } != 0 {
                i += 1;
            }
            (i, true)
        }
    }
}

/// Borrow the bytes of a C string, excluding the NUL, stopping at `bound`.
///
/// # Safety
///
/// Same contract as [`scan_c_string`]; the memory must also stay unchanged
/// for `'a`.
pub(crate) unsafe fn c_str_bytes<'a>(ptr: *const c_char, bound: Option<usize>) -> &'a [u8] {
    let (len, _) = unsafe { scan_c_string(ptr, bound) };
    // SAFETY: `len` bytes were just read successfully from `ptr`.
    unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) }
}
