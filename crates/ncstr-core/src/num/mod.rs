//! Integer helpers: decimal width and clamping.

/// Returns how many characters the base-10 form of `n` occupies.
///
/// A leading `-` counts for negative values. The magnitude is taken in `i64`,
/// so `i32::MIN` is handled without overflow and yields 11.
pub fn numlen(n: i32) -> usize {
    let mut size = 1;
    let mut num = i64::from(n);
    if num < 0 {
        num = -num;
        size += 1;
    }
    while num >= 10 {
        num /= 10;
        size += 1;
    }
    size
}

/// Bounds `n` to `[min, max]`.
///
/// Unlike [`i32::clamp`] this never panics: when `min > max` the lower bound
/// is checked first and wins.
pub fn clamp(n: i32, min: i32, max: i32) -> i32 {
    if n < min {
        min
    } else if n > max {
        max
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numlen_small() {
        assert_eq!(numlen(0), 1);
        assert_eq!(numlen(7), 1);
        assert_eq!(numlen(-5), 2);
    }

    #[test]
    fn test_numlen_powers_of_ten() {
        assert_eq!(numlen(9), 1);
        assert_eq!(numlen(10), 2);
        assert_eq!(numlen(99), 2);
        assert_eq!(numlen(100), 3);
        assert_eq!(numlen(-100), 4);
    }

    #[test]
    fn test_numlen_extremes() {
        assert_eq!(numlen(i32::MAX), 10);
        assert_eq!(numlen(i32::MIN), 11);
    }

    #[test]
    fn test_numlen_matches_formatting() {
        for n in [-1_000_001, -42, -1, 1, 12, 999, 1000, 123_456_789] {
            assert_eq!(numlen(n), n.to_string().len(), "n={n}");
        }
    }

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(42, 0, 10), 10);
    }

    #[test]
    fn test_clamp_inverted_bounds() {
        assert_eq!(clamp(5, 10, 0), 10);
        assert_eq!(clamp(20, 10, 0), 0);
    }
}
