//! Character occurrence counting.

use super::str::strlen;

/// Counts the bytes equal to `c` before the terminator of `s`.
///
/// The terminator itself is never counted, so `count(s, 0)` is always zero.
pub fn count(s: &[u8], c: u8) -> usize {
    s[..strlen(s)].iter().filter(|&&b| b == c).count()
}
