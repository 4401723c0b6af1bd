//! Map a (month, year) selection onto the dataset's date axis.

use crate::domain::dataset::Dataset;
use crate::domain::date_label::MonthYear;

/// Position of the first-of-month label for `month` (0-11) of `year`.
///
/// Requests strictly after the dataset's ceiling are clamped to the ceiling
/// month. When the ceiling month itself has no column the clamp falls back to
/// the last index, so a clamped request on a non-empty axis always resolves.
///
/// `None` means the month has no label on the axis and cannot be rendered.
pub fn resolve(month: u32, year: i32, dataset: &Dataset) -> Option<usize> {
    let requested = MonthYear::new(month, year);

    match dataset.ceiling() {
        Some(ceiling) if requested > ceiling => {
            log::debug!("clamping {} to ceiling {}", requested, ceiling);
            find(ceiling, dataset).or_else(|| dataset.date_count().checked_sub(1))
        }
        _ => find(requested, dataset),
    }
}

fn find(target: MonthYear, dataset: &Dataset) -> Option<usize> {
    let day = target.first_day()?;
    dataset.parsed_dates().iter().position(|d| *d == Some(day))
}
