//! Null-buffer safe defaults outside strict mode.
//!
//! `Off` returns the same defaults as the validating modes but records
//! nothing; hardened records a `ReturnSafeDefault` heal per rejected call.

use std::ffi::c_char;
use std::ptr;
use std::sync::{Mutex, MutexGuard};

use ncstr_abi::string_abi::{nc_count, nc_strlen, nc_strncmp, nc_strnstr};
use ncstr_membrane::config::set_safety_level;
use ncstr_membrane::{SafetyLevel, global_healing_policy};

// The safety level is process-global.
static SERIAL: Mutex<()> = Mutex::new(());

fn pinned(level: SafetyLevel) -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    set_safety_level(level);
    guard
}

/// Calls every read-only entry point with a null buffer and checks the defaults.
fn call_with_nulls() {
    let a = b"a\0".as_ptr().cast::<c_char>();
    assert_eq!(unsafe { nc_strlen(ptr::null()) }, 0);
    assert_eq!(unsafe { nc_strncmp(ptr::null(), a, 1) }, 0);
    assert_eq!(unsafe { nc_strncmp(a, ptr::null(), 1) }, 0);
    assert_eq!(unsafe { nc_count(ptr::null(), b'a' as c_char) }, 0);
    assert!(unsafe { nc_strnstr(a, ptr::null(), 1) }.is_null());
    assert!(unsafe { nc_strnstr(ptr::null(), a, 1) }.is_null());
}

#[test]
fn off_mode_returns_defaults_without_recording() {
    let _serial = pinned(SafetyLevel::Off);
    let before = global_healing_policy().snapshot();
    call_with_nulls();
    let after = global_healing_policy().snapshot();
    assert_eq!(after.safe_defaults, before.safe_defaults);
    assert_eq!(after.total_heals, before.total_heals);
}

#[test]
fn hardened_mode_records_each_null_default() {
    let _serial = pinned(SafetyLevel::Hardened);
    let before = global_healing_policy().snapshot().safe_defaults;
    call_with_nulls();
    let after = global_healing_policy().snapshot().safe_defaults;
    assert_eq!(after - before, 6);
}

#[test]
fn non_null_arguments_are_not_healed() {
    let _serial = pinned(SafetyLevel::Hardened);
    let before = global_healing_policy().snapshot().safe_defaults;
    assert_eq!(unsafe { nc_strlen(b"abc\0".as_ptr().cast()) }, 3);
    assert_eq!(global_healing_policy().snapshot().safe_defaults, before);
}
