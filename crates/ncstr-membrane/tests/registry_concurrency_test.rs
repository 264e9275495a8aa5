//! Registry behaviour under concurrent register/release traffic.

use std::sync::Arc;
use std::thread;

use ncstr_membrane::{AllocationRegistry, ReleaseResult};

#[test]
fn concurrent_threads_keep_disjoint_bookkeeping() {
    let registry = Arc::new(AllocationRegistry::new());
    let threads = 8usize;
    let per_thread = 500usize;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let addr = 0x1000_0000 + (t * per_thread + i) * 16;
                    registry.register(addr, i + 1);
                }
                for i in (0..per_thread).step_by(2) {
                    let addr = 0x1000_0000 + (t * per_thread + i) * 16;
                    assert_eq!(
                        registry.release(addr),
                        ReleaseResult::Released { size: i + 1 }
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_eq!(registry.live_count(), threads * per_thread / 2);
    assert_eq!(registry.lookup(0x1000_0000 + 16), Some(2));
    assert_eq!(registry.lookup(0x1000_0000), None);
}
