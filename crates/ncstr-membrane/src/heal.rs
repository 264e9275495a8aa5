//! Self-healing policy engine.
//!
//! When the membrane detects an invalid call, it applies a deterministic
//! healing action instead of invoking undefined behavior, and counts it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Actions the membrane can take to heal an unsafe operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealingAction {
    /// Return a safe default value instead of performing the operation.
    ReturnSafeDefault,
    /// Silently ignore a double-free (already freed pointer).
    IgnoreDoubleFree,
    /// Silently ignore a free of a pointer we don't own.
    IgnoreForeignFree,
    /// No healing needed; the operation is valid.
    None,
}

impl HealingAction {
    /// Returns true if this action represents an actual healing (not None).
    #[must_use]
    pub const fn is_heal(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable name used in structured logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReturnSafeDefault => "return_safe_default",
            Self::IgnoreDoubleFree => "ignore_double_free",
            Self::IgnoreForeignFree => "ignore_foreign_free",
            Self::None => "none",
        }
    }
}

/// Point-in-time copy of the healing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealingSnapshot {
    pub total_heals: u64,
    pub safe_defaults: u64,
    pub double_frees: u64,
    pub foreign_frees: u64,
}

/// Policy engine that records which healing actions were applied.
pub struct HealingPolicy {
    /// Total heals applied.
    pub total_heals: AtomicU64,
    /// Safe defaults returned.
    pub safe_defaults: AtomicU64,
    /// Double frees ignored.
    pub double_frees: AtomicU64,
    /// Foreign frees ignored.
    pub foreign_frees: AtomicU64,
}

impl HealingPolicy {
    /// Create a new policy with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_heals: AtomicU64::new(0),
            safe_defaults: AtomicU64::new(0),
            double_frees: AtomicU64::new(0),
            foreign_frees: AtomicU64::new(0),
        }
    }

    /// Record a healing action.
    pub fn record(&self, action: &HealingAction) {
        if action.is_heal() {
            self.total_heals.fetch_add(1, Ordering::Relaxed);
        }

        match action {
            HealingAction::ReturnSafeDefault => {
                self.safe_defaults.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::IgnoreDoubleFree => {
                self.double_frees.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::IgnoreForeignFree => {
                self.foreign_frees.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::None => {}
        }
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> HealingSnapshot {
        HealingSnapshot {
            total_heals: self.total_heals.load(Ordering::Relaxed),
            safe_defaults: self.safe_defaults.load(Ordering::Relaxed),
            double_frees: self.double_frees.load(Ordering::Relaxed),
            foreign_frees: self.foreign_frees.load(Ordering::Relaxed),
        }
    }

    /// Decide healing for a buffer argument that may be null.
    #[must_use]
    pub fn heal_null_buffer(&self, is_null: bool) -> HealingAction {
        if is_null {
            HealingAction::ReturnSafeDefault
        } else {
            HealingAction::None
        }
    }
}

impl Default for HealingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Global healing policy instance.
static GLOBAL_POLICY: HealingPolicy = HealingPolicy::new();

/// Access the global healing policy.
#[must_use]
pub fn global_healing_policy() -> &'static HealingPolicy {
    &GLOBAL_POLICY
}
