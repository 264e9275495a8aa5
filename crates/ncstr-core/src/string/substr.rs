//! Substring extraction into a freshly allocated, caller-owned buffer.

use super::str::strlen;

/// Number of bytes [`substr`] copies out of `s` for a given `start`/`len`.
///
/// Zero when `start` lies at or beyond the terminator.
#[must_use]
pub fn substr_len(s: &[u8], start: usize, len: usize) -> usize {
    let src_len = strlen(s);
    if start > src_len {
        return 0;
    }
    len.min(src_len - start)
}

/// Copies up to `len` bytes of `s`, beginning at `start`, into a new buffer.
///
/// The returned buffer is always NUL-terminated and holds
/// `min(len, strlen(s) - start)` content bytes. A `start` past the end of the
/// string yields an allocated empty string (`[0]`) rather than a failure.
///
/// Returns `None` when `s` is absent or when the allocation cannot be
/// satisfied. Nothing is allocated for an absent source.
pub fn substr(s: Option<&[u8]>, start: usize, len: usize) -> Option<Vec<u8>> {
    let s = s?;
    let copy_len = substr_len(s, start, len);

    let mut out = Vec::new();
    out.try_reserve_exact(copy_len + 1).ok()?;
    if copy_len > 0 {
        out.extend_from_slice(&s[start..start + copy_len]);
    }
    out.push(0);
    Some(out)
}
