//! Percentage-change arithmetic over price index series.
//!
//! All functions are pure. `NaN` is the "no data" sentinel: a missing, zero or
//! degenerate input yields `NaN` rather than a plausible-looking number.

use crate::domain::date_label::parse_label;
use crate::domain::date_label::MonthYear;

/// Annual rate of the reference curve, in percent.
pub const DEFAULT_ANNUAL_RATE_PCT: f64 = 2.0;

const MONTHS_PER_YEAR: f64 = 12.0;

/// `(v / values[base_index] - 1) * 100` for every value.
///
/// Every entry is `NaN` if the base is zero, `NaN` or out of range.
pub fn rebase(values: &[f64], base_index: usize) -> Vec<f64> {
    let base = match values.get(base_index) {
        Some(&b) if b != 0.0 && b.is_finite() => b,
        _ => return vec![f64::NAN; values.len()],
    };
    values.iter().map(|v| (v / base - 1.0) * 100.0).collect()
}

/// Percentage change from `values[start_idx]` to `values[end_idx]`.
pub fn total_change_pct(values: &[f64], start_idx: usize, end_idx: usize) -> f64 {
    match (values.get(start_idx), values.get(end_idx)) {
        (Some(&start), Some(&end)) => change_pct(start, end),
        _ => f64::NAN,
    }
}

/// Whole months between two axis labels, ignoring the day.
pub fn months_between(start_label: &str, end_label: &str) -> Option<i32> {
    let start = MonthYear::from_date(parse_label(start_label)?);
    let end = MonthYear::from_date(parse_label(end_label)?);
    Some(start.months_until(&end))
}

/// Compound annual growth rate, in percent.
///
/// `NaN` when `years` is zero: a zero-length window has no annual rate.
pub fn cagr_pct(start_value: f64, end_value: f64, years: f64) -> f64 {
    if years == 0.0 || start_value == 0.0 {
        return f64::NAN;
    }
    ((end_value / start_value).powf(1.0 / years) - 1.0) * 100.0
}

/// Cumulative growth at a constant annual rate, sampled monthly.
///
/// Entry `i` is `((1 + r)^(1/12))^i - 1`, in percent; entry 0 is exactly 0.
pub fn reference_curve(length_in_months: usize, annual_rate_pct: f64) -> Vec<f64> {
    let monthly_factor = (1.0 + annual_rate_pct / 100.0).powf(1.0 / MONTHS_PER_YEAR);
    (0..length_in_months)
        .map(|i| (monthly_factor.powi(i as i32) - 1.0) * 100.0)
        .collect()
}

/// Total change, in percent, of `years` of growth at `annual_rate_pct`
/// compounded annually.
pub fn target_change_pct(years: f64, annual_rate_pct: f64) -> f64 {
    ((1.0 + annual_rate_pct / 100.0).powf(years) - 1.0) * 100.0
}

/// How far, in percent, the actual end value sits above (positive) or below
/// (negative) the end value implied by steady growth at `annual_rate_pct`.
pub fn target_vs_actual_differential_pct(
    base_value: f64,
    total_change_pct: f64,
    years: f64,
    annual_rate_pct: f64,
) -> f64 {
    let actual_end = base_value * (1.0 + total_change_pct / 100.0);
    let target_end = base_value * (1.0 + target_change_pct(years, annual_rate_pct) / 100.0);
    if target_end == 0.0 {
        return f64::NAN;
    }
    (actual_end - target_end) / target_end * 100.0
}

fn change_pct(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        return f64::NAN;
    }
    (end / start - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn rebase_is_zero_at_base() {
        let values = [100.0, 102.0, 104.0, 110.0];
        let rebased = rebase(&values, 0);

        assert_eq!(rebased[0], 0.0);
        assert_relative_eq!(rebased[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(rebased[2], 4.0, epsilon = 1e-9);
        assert_relative_eq!(rebased[3], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn rebase_on_interior_base() {
        let rebased = rebase(&[50.0, 100.0, 150.0], 1);
        assert_relative_eq!(rebased[0], -50.0, epsilon = 1e-9);
        assert_eq!(rebased[1], 0.0);
        assert_relative_eq!(rebased[2], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn rebase_degenerate_base_is_all_nan() {
        assert!(rebase(&[0.0, 1.0, 2.0], 0).iter().all(|v| v.is_nan()));
        assert!(rebase(&[f64::NAN, 1.0], 0).iter().all(|v| v.is_nan()));
        assert!(rebase(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
        assert!(rebase(&[], 0).is_empty());
    }

    #[test]
    fn rebase_propagates_nan_values() {
        let rebased = rebase(&[100.0, f64::NAN, 120.0], 0);
        assert_eq!(rebased[0], 0.0);
        assert!(rebased[1].is_nan());
        assert_relative_eq!(rebased[2], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn total_change_matches_rebased_window() {
        let values = [100.0, 102.0, 104.0, 110.0];
        assert_relative_eq!(total_change_pct(&values, 0, 3), 10.0, epsilon = 1e-9);
        assert_eq!(total_change_pct(&values, 1, 3), rebase(&values[1..], 0)[2]);
    }

    #[test]
    fn total_change_out_of_range_or_zero_start_is_nan() {
        assert!(total_change_pct(&[1.0, 2.0], 0, 2).is_nan());
        assert!(total_change_pct(&[0.0, 2.0], 0, 1).is_nan());
        assert!(total_change_pct(&[f64::NAN, 2.0], 0, 1).is_nan());
    }

    #[test]
    fn months_between_ignores_day() {
        assert_eq!(months_between("12/01/2019", "3/01/2020"), Some(3));
        assert_eq!(months_between("1/15/2020", "1/01/2021"), Some(12));
        assert_eq!(months_between("1/01/2020", "1/01/2020"), Some(0));
        assert_eq!(months_between("junk", "1/01/2020"), None);
    }

    #[test]
    fn cagr_sanity() {
        assert_relative_eq!(cagr_pct(100.0, 121.0, 2.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(cagr_pct(100.0, 100.0, 5.0), 0.0, epsilon = 1e-12);
        assert!(cagr_pct(100.0, 90.0, 1.0) < 0.0);
    }

    #[test]
    fn cagr_zero_years_is_nan() {
        assert!(cagr_pct(100.0, 110.0, 0.0).is_nan());
        assert!(cagr_pct(0.0, 110.0, 1.0).is_nan());
        assert!(cagr_pct(f64::NAN, 110.0, 1.0).is_nan());
    }

    #[test]
    fn reference_curve_starts_at_zero_and_reaches_rate_after_a_year() {
        let curve = reference_curve(25, DEFAULT_ANNUAL_RATE_PCT);

        assert_eq!(curve.len(), 25);
        assert_eq!(curve[0], 0.0);
        assert_relative_eq!(curve[12], 2.0, epsilon = 1e-9);
        assert_relative_eq!(curve[24], 4.04, epsilon = 1e-9);
        assert!(curve.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn reference_curve_empty_window() {
        assert!(reference_curve(0, DEFAULT_ANNUAL_RATE_PCT).is_empty());
    }

    #[test]
    fn target_change_compounds_annually() {
        assert_relative_eq!(target_change_pct(2.0, 2.0), 4.04, epsilon = 1e-9);
        assert_eq!(target_change_pct(0.0, 2.0), 0.0);
    }

    #[test]
    fn differential_against_reference() {
        // 10% over 2 years vs 4.04% target: 110 / 104.04 - 1.
        let diff = target_vs_actual_differential_pct(100.0, 10.0, 2.0, 2.0);
        assert_relative_eq!(diff, (110.0 / 104.04 - 1.0) * 100.0, epsilon = 1e-9);

        // Exactly on target.
        let diff = target_vs_actual_differential_pct(250.0, 4.04, 2.0, 2.0);
        assert_abs_diff_eq!(diff, 0.0, epsilon = 1e-9);

        // Below target.
        assert!(target_vs_actual_differential_pct(100.0, 1.0, 2.0, 2.0) < 0.0);
    }

    #[test]
    fn differential_degenerate_base_is_nan() {
        assert!(target_vs_actual_differential_pct(0.0, 10.0, 2.0, 2.0).is_nan());
        assert!(target_vs_actual_differential_pct(f64::NAN, 10.0, 2.0, 2.0).is_nan());
        assert!(target_vs_actual_differential_pct(100.0, f64::NAN, 2.0, 2.0).is_nan());
    }
}
