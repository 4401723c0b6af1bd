//! Property tests for series arithmetic, date lookup and report assembly.

mod common;

use approx::assert_relative_eq;
use common::*;
use inflation_tracker::domain::dataset::Dataset;
use inflation_tracker::domain::date_index::resolve;
use inflation_tracker::domain::date_label::MonthYear;
use inflation_tracker::domain::report::{ComparisonReport, Selection};
use inflation_tracker::domain::series_math::{
    cagr_pct, rebase, reference_curve, total_change_pct,
};
use proptest::prelude::*;

fn positive_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1000.0, 2..max_len)
}

/// A series plus an ordered (start, end) pair of indices into it.
fn series_with_window() -> impl Strategy<Value = (Vec<f64>, usize, usize)> {
    positive_series(40).prop_flat_map(|values| {
        let len = values.len();
        (Just(values), 0..len, 0..len).prop_map(|(v, a, b)| (v, a.min(b), a.max(b)))
    })
}

fn dataset_of(values: &[f64]) -> Dataset {
    Dataset::from_parts(
        monthly_labels(1, 2020, values.len()),
        vec![make_item("All-items (avg.)", "All-items", values)],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rebase_is_zero_at_base((values, start, _) in series_with_window()) {
        prop_assert_eq!(rebase(&values, start)[start], 0.0);
    }

    #[test]
    fn total_change_matches_rebased_window((values, start, end) in series_with_window()) {
        let total = total_change_pct(&values, start, end);
        prop_assert_eq!(total, rebase(&values, start)[end]);
        prop_assert_eq!(total, rebase(&values[start..], 0)[end - start]);
    }

    #[test]
    fn reference_curve_starts_at_zero_and_rises(len in 1usize..240, rate in 0.01f64..20.0) {
        let curve = reference_curve(len, rate);
        prop_assert_eq!(curve.len(), len);
        prop_assert_eq!(curve[0], 0.0);
        for pair in curve.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn cagr_compounds_back_to_total(start in 1.0f64..500.0, end in 1.0f64..500.0, years in 0.25f64..30.0) {
        let rate = cagr_pct(start, end, years);
        let compounded = start * (1.0 + rate / 100.0).powf(years);
        assert_relative_eq!(compounded, end, max_relative = 1e-9);
    }

    #[test]
    fn months_after_ceiling_always_resolve(values in positive_series(30), ahead in 1i32..600) {
        let ds = dataset_of(&values);
        let ceiling = ds.ceiling().unwrap();
        let total = ceiling.year * 12 + ceiling.month as i32 + ahead;
        let requested = MonthYear::new((total % 12) as u32, total / 12);

        prop_assert_eq!(resolve(requested.month, requested.year, &ds), Some(values.len() - 1));
    }

    #[test]
    fn report_rows_agree_with_series_math((values, start, end) in series_with_window()) {
        let ds = dataset_of(&values);
        let labels = ds.dates().to_vec();
        let month_of = |i: usize| {
            let date = inflation_tracker::domain::date_label::parse_label(&labels[i]).unwrap();
            MonthYear::from_date(date)
        };
        let sel = Selection::new(month_of(start), month_of(end)).with_item(0, 0);
        let report = ComparisonReport::build(&ds, &sel).unwrap();

        prop_assert_eq!(report.start_index, start);
        prop_assert_eq!(report.end_index, end);
        prop_assert_eq!(report.rows[0].rebased.len(), end - start + 1);
        prop_assert_eq!(report.reference_curve.len(), end - start + 1);
        prop_assert_eq!(report.rows[0].total_change_pct, Some(total_change_pct(&values, start, end)));
    }
}
