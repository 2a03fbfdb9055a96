//! Free-number search over an integer range

use std::collections::HashSet;

/// Smallest integer in `[min_value, max_value)` that is not in `used`.
///
/// The upper bound is exclusive: `max_value` itself is never returned.
/// Values of `used` outside the range and duplicates are ignored.
/// Returns `None` when every integer in the range is taken (or the range is empty).
///
/// ```
/// use netbox_helpers::find_next_free_number;
///
/// assert_eq!(find_next_free_number([10, 11, 12], 10, 20), Some(13));
/// assert_eq!(find_next_free_number(10..20, 10, 20), None);
/// ```
#[must_use]
pub fn find_next_free_number<I>(used: I, min_value: u64, max_value: u64) -> Option<u64>
where
    I: IntoIterator<Item = u64>,
{
    let range = min_value..max_value;
    let used: HashSet<u64> = used.into_iter().filter(|n| range.contains(n)).collect();
    range.clone().find(|n| !used.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_used_returns_min() {
        assert_eq!(find_next_free_number(Vec::new(), 10, 20), Some(10));
    }

    #[test]
    fn test_skips_leading_used_values() {
        assert_eq!(find_next_free_number(vec![10, 11, 12], 10, 20), Some(13));
    }

    #[test]
    fn test_full_range_is_exhausted() {
        assert_eq!(find_next_free_number(10..20, 10, 20), None);
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        // 19 taken, 20 is outside [10, 20)
        assert_eq!(find_next_free_number(10..=19, 10, 20), None);
        assert_eq!(find_next_free_number(10..19, 10, 20), Some(19));
    }

    #[test]
    fn test_out_of_range_and_duplicate_values_are_ignored() {
        let used = vec![1, 5, 10, 10, 11, 11, 25, 1000];
        assert_eq!(find_next_free_number(used, 10, 20), Some(12));
    }

    #[test]
    fn test_gap_in_the_middle() {
        assert_eq!(find_next_free_number(vec![64512, 64513, 64515], 64512, 65534), Some(64514));
    }

    #[test]
    fn test_empty_or_inverted_range() {
        assert_eq!(find_next_free_number(Vec::new(), 10, 10), None);
        assert_eq!(find_next_free_number(Vec::new(), 20, 10), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the result is free, inside the range, and nothing smaller is free.
            #[test]
            fn result_is_the_minimum_free_value(
                used in proptest::collection::vec(0u64..64, 0..80),
                min in 0u64..40,
                span in 1u64..40,
            ) {
                let max = min + span;
                match find_next_free_number(used.iter().copied(), min, max) {
                    Some(v) => {
                        prop_assert!(min <= v && v < max);
                        prop_assert!(!used.contains(&v));
                        prop_assert!((min..v).all(|n| used.contains(&n)));
                    }
                    None => prop_assert!((min..max).all(|n| used.contains(&n))),
                }
            }
        }
    }
}
