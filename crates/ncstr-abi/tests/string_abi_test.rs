//! C-boundary behaviour of the `nc_*` string entry points in strict mode.

use std::ffi::{CStr, c_char, c_void};
use std::ptr;

use ncstr_abi::malloc_abi::nc_free;
use ncstr_abi::string_abi::{nc_count, nc_strlen, nc_strncmp, nc_strnstr, nc_substr};
use ncstr_membrane::config::set_safety_level;
use ncstr_membrane::{SafetyLevel, global_healing_policy, global_registry};

fn strict() {
    set_safety_level(SafetyLevel::Strict);
}

fn cstr(bytes: &[u8]) -> *const c_char {
    assert_eq!(bytes.last(), Some(&0), "fixture must be NUL-terminated");
    bytes.as_ptr().cast()
}

/// Runs `nc_substr` and returns the copied string, releasing the buffer.
fn substr_owned(src: &[u8], start: u32, len: usize) -> Option<Vec<u8>> {
    let out = unsafe { nc_substr(cstr(src), start, len) };
    if out.is_null() {
        return None;
    }
    assert!(global_registry().lookup(out as usize).is_some());
    let copied = unsafe { CStr::from_ptr(out) }.to_bytes().to_vec();
    unsafe { nc_free(out.cast::<c_void>()) };
    Some(copied)
}

#[test]
fn strlen_counts_to_terminator() {
    strict();
    assert_eq!(unsafe { nc_strlen(cstr(b"hello\0")) }, 5);
    assert_eq!(unsafe { nc_strlen(cstr(b"\0")) }, 0);
}

#[test]
fn strncmp_respects_bound() {
    strict();
    assert_eq!(unsafe { nc_strncmp(cstr(b"abc\0"), cstr(b"abd\0"), 2) }, 0);
    assert_eq!(
        unsafe { nc_strncmp(cstr(b"abc\0"), cstr(b"abd\0"), 3) },
        i32::from(b'c') - i32::from(b'd')
    );
}

#[test]
fn strncmp_does_not_read_past_bound() {
    strict();
    // Neither buffer is terminated inside the first two bytes.
    let a = [b'x', b'y'];
    let b = [b'x', b'y'];
    assert_eq!(
        unsafe { nc_strncmp(a.as_ptr().cast(), b.as_ptr().cast(), 2) },
        0
    );
}

#[test]
fn strnstr_returns_pointer_into_haystack() {
    strict();
    let hay = b"hello world\0";
    let found = unsafe { nc_strnstr(cstr(hay), cstr(b"world\0"), 11) };
    assert_eq!(found as usize, hay.as_ptr() as usize + 6);
    let missing = unsafe { nc_strnstr(cstr(hay), cstr(b"world\0"), 8) };
    assert!(missing.is_null());
}

#[test]
fn substr_examples() {
    strict();
    assert_eq!(substr_owned(b"hello world\0", 6, 5).as_deref(), Some(&b"world"[..]));
    assert_eq!(substr_owned(b"hello\0", 2, 100).as_deref(), Some(&b"llo"[..]));
    assert_eq!(substr_owned(b"hello\0", 5, 3).as_deref(), Some(&b""[..]));
    assert_eq!(substr_owned(b"hello\0", 99, 3).as_deref(), Some(&b""[..]));
}

#[test]
fn substr_of_null_is_null() {
    strict();
    assert!(unsafe { nc_substr(ptr::null(), 0, 4) }.is_null());
}

#[test]
fn count_matches() {
    strict();
    assert_eq!(unsafe { nc_count(cstr(b"hello world\0"), b'o' as c_char) }, 2);
    assert_eq!(unsafe { nc_count(cstr(b"hello world\0"), 0) }, 0);
}

#[test]
fn null_buffers_return_safe_defaults() {
    strict();
    let before = global_healing_policy().snapshot().safe_defaults;
    assert_eq!(unsafe { nc_strlen(ptr::null()) }, 0);
    assert_eq!(unsafe { nc_strncmp(ptr::null(), cstr(b"a\0"), 1) }, 0);
    assert_eq!(unsafe { nc_count(ptr::null(), b'a' as c_char) }, 0);
    assert!(unsafe { nc_strnstr(cstr(b"a\0"), ptr::null(), 1) }.is_null());
    let after = global_healing_policy().snapshot().safe_defaults;
    assert!(after >= before + 4);
}

#[test]
fn strict_free_accepts_foreign_malloc_pointer() {
    strict();
    let raw = unsafe { libc::malloc(8) };
    assert!(!raw.is_null());
    unsafe { nc_free(raw) };
    unsafe { nc_free(ptr::null_mut()) };
}
