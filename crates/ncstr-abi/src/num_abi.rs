//! ABI layer for the integer helpers. Pure delegates, no membrane involvement.

use std::ffi::c_int;

use ncstr_core::num;

/// Number of characters in the decimal form of `n`, sign included.
#[unsafe(no_mangle)]
pub extern "C" fn nc_numlen(n: c_int) -> c_int {
    // At most 11 for a 32-bit int.
    num::numlen(n) as c_int
}

/// Bounds `n` to `[min, max]`; the lower bound wins when they cross.
#[unsafe(no_mangle)]
pub extern "C" fn nc_clamp(n: c_int, min: c_int, max: c_int) -> c_int {
    num::clamp(n, min, max)
}
