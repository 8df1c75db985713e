/// Returns the lower median of `values` using in-place quickselect.
///
/// On return the element at index `(n - 1) / 2` holds the median, every element
/// before it is `<=` the median and every element after it is `>=` the median. The
/// relative order of the other elements is unspecified.
///
/// The pivot is the median of the low, middle and high elements of the active
/// range, which also serve as sentinels for the inner scans. Expected running time is
/// linear; adversarial input can drive it to quadratic.
///
/// Returns `None` for an empty slice. Values must not be NaN.
pub fn median_quick_select(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut low = 0;
    let mut high = values.len() - 1;
    let median = high / 2;

    loop {
        if high <= low {
            return Some(values[median]);
        }

        if high == low + 1 {
            if values[low] > values[high] {
                values.swap(low, high);
            }
            return Some(values[median]);
        }

        // Order low/middle/high so that values[low] holds their median and
        // values[high] is at least as large.
        let middle = low + (high - low) / 2;
        if values[middle] > values[high] {
            values.swap(middle, high);
        }
        if values[low] > values[high] {
            values.swap(low, high);
        }
        if values[middle] > values[low] {
            values.swap(middle, low);
        }

        // The smallest of the three now sits at low + 1.
        values.swap(middle, low + 1);

        let pivot = values[low];
        let mut ll = low + 1;
        let mut hh = high;
        loop {
            ll += 1;
            while pivot > values[ll] {
                ll += 1;
            }
            hh -= 1;
            while values[hh] > pivot {
                hh -= 1;
            }
            if hh < ll {
                break;
            }
            values.swap(ll, hh);
        }

        values.swap(low, hh);

        if hh <= median {
            low = ll;
        }
        if hh >= median {
            high = hh - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted_lower_median(values: &[f64]) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted[(sorted.len() - 1) / 2]
    }

    fn assert_partitioned_around_median(values: &[f64], median: f64) {
        let slot = (values.len() - 1) / 2;
        assert_eq!(values[slot], median);
        assert!(values[..slot].iter().all(|&v| v <= median));
        assert!(values[slot + 1..].iter().all(|&v| v >= median));
    }

    #[test]
    fn empty_slice_has_no_median() {
        assert_eq!(median_quick_select(&mut []), None);
    }

    #[test]
    fn single_element_is_its_own_median() {
        assert_eq!(median_quick_select(&mut [4.5]), Some(4.5));
    }

    #[test]
    fn two_elements_return_the_smaller() {
        let mut values = [9.0, -1.0];
        assert_eq!(median_quick_select(&mut values), Some(-1.0));
        assert_eq!(values, [-1.0, 9.0]);
    }

    #[test]
    fn odd_length_returns_true_median() {
        let mut values = [5.0, 1.0, 4.0, 2.0, 3.0];
        assert_eq!(median_quick_select(&mut values), Some(3.0));
        assert_partitioned_around_median(&values, 3.0);
    }

    #[test]
    fn even_length_returns_lower_median() {
        let mut values = [8.0, 2.0, 6.0, 4.0];
        assert_eq!(median_quick_select(&mut values), Some(4.0));
        assert_partitioned_around_median(&values, 4.0);
    }

    #[test]
    fn handles_many_duplicates() {
        let mut values = [1.0, 1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 1.0];
        assert_eq!(median_quick_select(&mut values), Some(1.0));
        assert_partitioned_around_median(&values, 1.0);

        let mut constant = [3.25; 17];
        assert_eq!(median_quick_select(&mut constant), Some(3.25));
    }

    #[test]
    fn handles_sorted_and_reversed_input() {
        let mut ascending: Vec<f64> = (0..101).map(f64::from).collect();
        assert_eq!(median_quick_select(&mut ascending), Some(50.0));

        let mut descending: Vec<f64> = (0..100).rev().map(f64::from).collect();
        assert_eq!(median_quick_select(&mut descending), Some(49.0));
        assert_partitioned_around_median(&descending, 49.0);
    }

    #[test]
    fn matches_sorting_on_random_input() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in 1..200 {
            let original: Vec<f64> = (0..len)
                .map(|_| (rng.gen_range(-50.0..50.0_f64) * 4.0).round() / 4.0)
                .collect();
            let expected = sorted_lower_median(&original);

            let mut values = original.clone();
            let median = median_quick_select(&mut values).unwrap();
            assert_eq!(median, expected, "length {}", len);
            assert_partitioned_around_median(&values, median);

            let mut permuted = values.clone();
            let mut reference = original.clone();
            permuted.sort_by(|a, b| a.total_cmp(b));
            reference.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(permuted, reference, "selection must only permute");
        }
    }
}
