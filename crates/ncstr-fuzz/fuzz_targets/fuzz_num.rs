#![no_main]
use libfuzzer_sys::fuzz_target;

use ncstr_core::num::{clamp, numlen};

fuzz_target!(|data: [i32; 3]| {
    let [n, min, max] = data;

    assert_eq!(numlen(n), n.to_string().len());

    let clamped = clamp(n, min, max);
    if min <= max {
        assert!((min..=max).contains(&clamped));
        if (min..=max).contains(&n) {
            assert_eq!(clamped, n);
        }
    } else {
        // Inverted bounds: the lower bound is checked first.
        assert_eq!(clamped, if n < min { min } else { max });
    }
});
