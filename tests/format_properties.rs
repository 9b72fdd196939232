//! Property tests for the unit formatters

use parse_insight::format::{format_bytes, format_count, format_duration};
use proptest::prelude::*;

proptest! {
    #[test]
    fn count_keeps_every_integer_digit(n in 0u64..(1u64 << 53)) {
        let formatted = format_count(n as f64).unwrap();
        let digits: String = formatted.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(digits, n.to_string());
    }

    #[test]
    fn count_groups_by_three(n in 1_000u64..(1u64 << 53)) {
        let formatted = format_count(n as f64).unwrap();
        for group in formatted.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn duration_picks_one_unit(ns in 0.0f64..1.0e12) {
        let formatted = format_duration(ns).unwrap();
        let unit = formatted.rsplit(' ').next().unwrap();
        prop_assert!(["ns", "μs", "ms", "s"].contains(&unit));
    }

    #[test]
    fn bytes_below_one_terabyte_format(bytes in 1.0f64..1_099_511_627_776.0) {
        let formatted = format_bytes(bytes).unwrap();
        let (value, unit) = formatted.split_once(' ').unwrap();
        prop_assert!(["B", "KB", "MB", "GB"].contains(&unit));
        let value: f64 = value.parse().unwrap();
        // Rounding to two decimals can reach 1024.00 but never beyond
        prop_assert!(value <= 1_024.0);
    }

    #[test]
    fn negative_inputs_are_rejected(v in -1.0e12f64..-0.001) {
        prop_assert!(format_duration(v).is_err());
        prop_assert!(format_bytes(v).is_err());
    }
}
