#![no_main]
use libfuzzer_sys::fuzz_target;

use ncstr_core::string::{count, strlen, strncmp, strnstr, substr};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First two bytes steer the bounds; the rest splits into two strings.
    let bound = usize::from(data[0]);
    let c = data[1];
    let body = &data[2..];
    let split = body.len() / 2;
    let mut a = body[..split].to_vec();
    let mut b = body[split..].to_vec();
    a.push(0);
    b.push(0);

    let len_a = strlen(&a);
    assert!(len_a < a.len());
    assert_eq!(a[len_a], 0);

    let ab = strncmp(&a, &b, bound);
    let ba = strncmp(&b, &a, bound);
    assert_eq!(ab.signum(), -ba.signum());
    assert_eq!(strncmp(&a, &a, bound), 0);

    assert!(count(&a, c) <= len_a);
    assert_eq!(count(&a, 0), 0);

    if let Some(idx) = strnstr(&a, &b, bound) {
        let needle = strlen(&b);
        assert!(idx + needle <= bound.min(len_a));
        assert_eq!(&a[idx..idx + needle], &b[..needle]);
    }

    let out = substr(Some(&a), bound, usize::from(c)).expect("small allocation");
    assert_eq!(out.last(), Some(&0));
    let copied = out.len() - 1;
    assert!(copied <= usize::from(c));
    if copied > 0 {
        assert_eq!(&out[..copied], &a[bound..bound + copied]);
    }
});
