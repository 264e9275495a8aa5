//! Ownership registry for buffers handed out across the C boundary.
//!
//! Every buffer returned by `nc_substr` is registered by address together
//! with its size. Releasing moves the address into a bounded quarantine so a
//! second release of the same address is recognised as a double free rather
//! than a foreign pointer.
//!
//! Thread-safe via sharded `parking_lot::Mutex`.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

/// Maximum quarantine entry count per shard.
const QUARANTINE_MAX_ENTRIES: usize = 1024;

/// Number of shards for registry locks (power of 2).
const NUM_SHARDS: usize = 16;

/// Outcome of [`AllocationRegistry::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseResult {
    /// The address was live and is now quarantined.
    Released { size: usize },
    /// The address was already released.
    DoubleFree,
    /// The address was never registered.
    ForeignPointer,
}

#[derive(Default)]
struct RegistryShard {
    live: HashMap<usize, usize>,
    quarantine: VecDeque<usize>,
}

/// Thread-safe map of live allocations.
pub struct AllocationRegistry {
    shards: Box<[Mutex<RegistryShard>]>,
}

impl AllocationRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        let shards: Vec<Mutex<RegistryShard>> = (0..NUM_SHARDS)
            .map(|_| Mutex::new(RegistryShard::default()))
            .collect();
        Self {
            shards: shards.into_boxed_slice(),
        }
    }

    /// Record a live allocation of `size` bytes at `addr`.
    ///
    /// An address the allocator recycled is taken out of quarantine.
    pub fn register(&self, addr: usize, size: usize) {
        let mut shard = self.shards[shard_for(addr)].lock();
        shard.quarantine.retain(|&a| a != addr);
        shard.live.insert(addr, size);
    }

    /// Drop a live allocation, quarantining its address.
    pub fn release(&self, addr: usize) -> ReleaseResult {
        let mut shard = self.shards[shard_for(addr)].lock();

        if let Some(size) = shard.live.remove(&addr) {
            shard.quarantine.push_back(addr);
            while shard.quarantine.len() > QUARANTINE_MAX_ENTRIES {
                shard.quarantine.pop_front();
            }
            return ReleaseResult::Released { size };
        }

        if shard.quarantine.contains(&addr) {
            ReleaseResult::DoubleFree
        } else {
            ReleaseResult::ForeignPointer
        }
    }

    /// Size of the live allocation starting at `addr`.
    #[must_use]
    pub fn lookup(&self, addr: usize) -> Option<usize> {
        self.shards[shard_for(addr)].lock().live.get(&addr).copied()
    }

    /// Number of live allocations across all shards.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.shards.iter().map(|s| s.lock().live.len()).sum()
    }
}

impl Default for AllocationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn shard_for(addr: usize) -> usize {
    // Low bits are alignment padding.
    (addr >> 4) % NUM_SHARDS
}

/// Process-wide registry used by the ABI layer.
#[must_use]
pub fn global_registry() -> &'static AllocationRegistry {
    static REGISTRY: OnceLock<AllocationRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AllocationRegistry::new)
}
