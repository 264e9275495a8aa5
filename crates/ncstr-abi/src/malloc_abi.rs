//! Allocation and release of buffers crossing the C boundary.
//!
//! Buffers are obtained from the system `malloc` and must be released with
//! `nc_free`. While the membrane validates, every buffer is registered so
//! `nc_free` can tell its own pointers apart. A buffer handed to plain `free`
//! stays registered as live, and a later `nc_free` of that address would
//! release it a second time; hardened mode only tracks releases made through
//! `nc_free`.

use std::ffi::c_void;

use ncstr_membrane::{
    HealingAction, ReleaseResult, global_healing_policy, global_registry, safety_level,
};

/// Allocate `size` bytes and register them with the membrane.
///
/// Returns null when the allocator fails.
pub(crate) fn alloc_tracked(size: usize) -> *mut u8 {
    // SAFETY: malloc has no preconditions; the result is checked for null.
    let ptr = unsafe { libc::malloc(size.max(1)) }.cast::<u8>();
    if ptr.is_null() {
        return ptr;
    }
    if safety_level().validation_enabled() {
        global_registry().register(ptr as usize, size);
    }
    ptr
}

/// Releases a buffer returned by `nc_substr`.
///
/// Null is a no-op. In hardened mode, pointers that were never handed out or
/// were already released are ignored and counted instead of reaching `free`.
///
/// # Safety
///
/// In strict mode `ptr` must be null or a live pointer from the C allocator.
/// In every mode, a buffer from `nc_substr` must not have been passed to
/// plain `free` before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nc_free(ptr: *mut c_void) {
    if ptr.is_null() {
        return;
    }

    let mode = safety_level();
    if mode.validation_enabled() {
        let action = match global_registry().release(ptr as usize) {
            ReleaseResult::Released { .. } => HealingAction::None,
            ReleaseResult::DoubleFree => HealingAction::IgnoreDoubleFree,
            ReleaseResult::ForeignPointer => HealingAction::IgnoreForeignFree,
        };
        if mode.heals_enabled() && action.is_heal() {
            global_healing_policy().record(&action);
            return;
        }
    }

    // SAFETY: caller contract (strict) or registry confirmed ownership (hardened).
    unsafe { libc::free(ptr) };
}
