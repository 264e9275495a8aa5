//! Scanning and comparison: strlen, strncmp, strnstr.
//!
//! Every function treats its input as a NUL-terminated byte string. Reads
//! past the end of a slice behave as if a NUL byte were there, so a slice
//! without a terminator is never over-read.

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. Scans `s` for the first `0x00` byte and returns
/// its index. If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

#[inline]
fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Compares at most `n` bytes of two NUL-terminated byte strings.
///
/// Equivalent to C `strncmp`. Stops at the first mismatch, at a shared
/// terminator, or after `n` bytes. The result is the difference of the first
/// mismatching bytes taken as unsigned values, or zero when no mismatch occurs
/// inside the bound.
pub fn strncmp(s1: &[u8], s2: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let a = byte_at(s1, i);
        let b = byte_at(s2, i);

        if a != b {
            return i32::from(a) - i32::from(b);
        }
        if a == 0 {
            return 0;
        }
    }
    0
}

/// Locates the NUL-terminated `little` within the first `len` bytes of `big`.
///
/// Equivalent to BSD `strnstr`. The search also stops at the terminator of
/// `big`, and a match must fit entirely inside the searched prefix. Returns
/// the index where `little` starts. An empty `little` matches at index 0.
pub fn strnstr(big: &[u8], little: &[u8], len: usize) -> Option<usize> {
    let little_len = strlen(little);
    if little_len == 0 {
        return Some(0);
    }

    let window = strlen(big).min(len);
    if little_len > window {
        return None;
    }

    let needle = &little[..little_len];
    big[..window]
        .windows(little_len)
        .position(|candidate| candidate == needle)
}
