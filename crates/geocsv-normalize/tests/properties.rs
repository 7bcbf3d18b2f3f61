//! Property tests for the streaming normalizer.
//!
//! The closed form under test: with original converted totals t_1..t_n in a
//! single group and cumulative sums c_i, the emitted total for row i is
//! t_i - (c_i - 100) when c_i > 100 and t_i unchanged otherwise, because the
//! accumulator is never corrected and the whole excess lands on the current
//! row.

use geocsv_model::{Geography, RowRecord, TotalValue};
use geocsv_normalize::AddTo100;
use proptest::prelude::*;

fn count_row(code: &str, leaf: usize, value: i64) -> RowRecord {
    RowRecord {
        geography: Geography::new("ward", code),
        dimensions: vec![format!("leaf-{leaf}")],
        total: TotalValue::Count(value),
    }
}

proptest! {
    #[test]
    fn emitted_totals_match_the_closed_form(values in prop::collection::vec(0i64..=120, 1..12)) {
        let mut normalizer = AddTo100::new();
        let mut cumulative = 0i64;
        for (i, &value) in values.iter().enumerate() {
            let mut row = count_row("1", i, value);
            normalizer.adjust(&mut row);
            cumulative += value;
            let expected = if cumulative > 100 {
                value - (cumulative - 100)
            } else {
                value
            };
            prop_assert_eq!(row.total, TotalValue::Count(expected));
        }
    }

    #[test]
    fn groups_never_interfere(values in prop::collection::vec(0i64..=120, 1..12)) {
        // Run the same sequence through one normalizer twice, interleaved
        // across two wards. Both wards must see identical adjustments.
        let mut shared = AddTo100::new();
        let mut solo = AddTo100::new();
        for (i, &value) in values.iter().enumerate() {
            let mut ward_one = count_row("1", i, value);
            let mut ward_two = count_row("2", i, value);
            let mut reference = count_row("1", i, value);
            shared.adjust(&mut ward_one);
            shared.adjust(&mut ward_two);
            solo.adjust(&mut reference);
            prop_assert_eq!(ward_one.total, reference.total);
            prop_assert_eq!(ward_two.total, reference.total);
        }
        prop_assert_eq!(shared.group_count(), 2 * solo.group_count());
    }

    #[test]
    fn missing_rows_are_transparent(values in prop::collection::vec(0i64..=120, 1..8)) {
        let mut with_gaps = AddTo100::new();
        let mut without = AddTo100::new();
        for (i, &value) in values.iter().enumerate() {
            let mut gap = RowRecord {
                geography: Geography::new("ward", "1"),
                dimensions: vec![format!("leaf-{i}")],
                total: TotalValue::Missing,
            };
            prop_assert_eq!(with_gaps.adjust(&mut gap), None);

            let mut a = count_row("1", i, value);
            let mut b = count_row("1", i, value);
            with_gaps.adjust(&mut a);
            without.adjust(&mut b);
            prop_assert_eq!(a.total, b.total);
        }
    }
}
