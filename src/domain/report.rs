//! Comparison report: per-item change rows, the reference curve and the
//! illustrative basket for one date window.
//!
//! Numeric results cross this boundary as `Option<f64>`; `None` is "no data".
//! `NaN` and infinities produced by [`series_math`] never leave the module.

use crate::domain::dataset::{Dataset, Item};
use crate::domain::date_index::resolve;
use crate::domain::date_label::MonthYear;
use crate::domain::error::InvalidRangeError;
use crate::domain::series_math::{
    self, cagr_pct, rebase, reference_curve, target_change_pct, target_vs_actual_differential_pct,
    total_change_pct, DEFAULT_ANNUAL_RATE_PCT,
};
use serde::Serialize;

/// Number of item slots a selection holds.
pub const MAX_CHOSEN_ITEMS: usize = 5;

/// Notional spend used by the illustrative example.
pub const DEFAULT_BASKET: f64 = 1000.0;

/// A date window plus up to [`MAX_CHOSEN_ITEMS`] item slots.
///
/// Slots hold indices into [`Dataset::items`]; empty slots are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub start: MonthYear,
    pub end: MonthYear,
    pub chosen_items: [Option<usize>; MAX_CHOSEN_ITEMS],
}

impl Selection {
    pub fn new(start: MonthYear, end: MonthYear) -> Self {
        Self {
            start,
            end,
            chosen_items: [None; MAX_CHOSEN_ITEMS],
        }
    }

    /// Put `item` in `slot`. Slots past the last are ignored.
    pub fn with_item(mut self, slot: usize, item: usize) -> Self {
        match self.chosen_items.get_mut(slot) {
            Some(s) => *s = Some(item),
            None => log::warn!("ignoring item {} for slot {}", item, slot),
        }
        self
    }

    /// Fill slots in order from `items`, ignoring anything past the last slot.
    pub fn with_items(self, items: &[usize]) -> Self {
        items
            .iter()
            .enumerate()
            .fold(self, |sel, (slot, &item)| sel.with_item(slot, item))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    pub annual_rate_pct: f64,
    pub basket: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            annual_rate_pct: DEFAULT_ANNUAL_RATE_PCT,
            basket: DEFAULT_BASKET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Zero-based slot the item was chosen in.
    pub slot: usize,
    pub item_name: String,
    pub annualized_change_pct: Option<f64>,
    pub total_change_pct: Option<f64>,
    pub target_differential_pct: Option<f64>,
    /// Change since the window start, one entry per month in the window.
    pub rebased: Vec<Option<f64>>,
}

impl ComparisonRow {
    pub fn has_data(&self) -> bool {
        self.total_change_pct.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
    Unchanged,
}

impl Direction {
    fn of(difference_pct: f64) -> Self {
        if difference_pct > 0.0 {
            Direction::Higher
        } else if difference_pct < 0.0 {
            Direction::Lower
        } else {
            Direction::Unchanged
        }
    }
}

/// What a fixed basket bought at the window start costs at the end, against
/// what it would cost under the reference rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IllustrativeExample {
    pub item_name: String,
    pub basket: f64,
    pub actual_cost: f64,
    pub target_cost: f64,
    pub total_change_pct: f64,
    pub annualized_change_pct: Option<f64>,
    /// `(actual - target) / target`, in percent.
    pub difference_pct: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub start_index: usize,
    pub end_index: usize,
    pub date_window_labels: Vec<String>,
    pub months: i32,
    pub years: f64,
    pub annual_rate_pct: f64,
    pub reference_curve: Vec<f64>,
    pub rows: Vec<ComparisonRow>,
    pub illustrative_example: Option<IllustrativeExample>,
}

impl ComparisonReport {
    /// Build with the default 2% reference rate and a 1000-unit basket.
    pub fn build(dataset: &Dataset, selection: &Selection) -> Result<Self, InvalidRangeError> {
        Self::build_with(dataset, selection, &ReportOptions::default())
    }

    pub fn build_with(
        dataset: &Dataset,
        selection: &Selection,
        options: &ReportOptions,
    ) -> Result<Self, InvalidRangeError> {
        let (start, end) = resolve_window(dataset, selection)?;
        let dates = dataset.dates();

        let months = series_math::months_between(&dates[start], &dates[end])
            .unwrap_or((end - start) as i32);
        let years = f64::from(months) / 12.0;
        if years == 0.0 {
            log::debug!("zero-length window at index {}, annualized figures omitted", start);
        }

        let rows: Vec<ComparisonRow> = selection
            .chosen_items
            .iter()
            .enumerate()
            .filter_map(|(slot, chosen)| chosen.map(|index| (slot, index)))
            .filter_map(|(slot, index)| match dataset.item(index) {
                Some(item) => Some(compute_row(slot, item, start, end, years, options)),
                None => {
                    log::warn!("slot {} refers to unknown item {}", slot, index);
                    None
                }
            })
            .collect();

        let illustrative_example = rows
            .first()
            .and_then(|row| illustrate(row, years, options));

        Ok(Self {
            start_index: start,
            end_index: end,
            date_window_labels: dates[start..=end].to_vec(),
            months,
            years,
            annual_rate_pct: options.annual_rate_pct,
            reference_curve: reference_curve(end - start + 1, options.annual_rate_pct),
            rows,
            illustrative_example,
        })
    }

    pub fn start_label(&self) -> &str {
        self.date_window_labels.first().map_or("", String::as_str)
    }

    pub fn end_label(&self) -> &str {
        self.date_window_labels.last().map_or("", String::as_str)
    }
}

fn resolve_window(
    dataset: &Dataset,
    selection: &Selection,
) -> Result<(usize, usize), InvalidRangeError> {
    let start = resolve(selection.start.month, selection.start.year, dataset).ok_or(
        InvalidRangeError::UnknownStart {
            requested: selection.start,
        },
    )?;
    let end = resolve(selection.end.month, selection.end.year, dataset).ok_or(
        InvalidRangeError::UnknownEnd {
            requested: selection.end,
        },
    )?;

    let last = dataset.date_count().saturating_sub(1);
    let (start, end) = (start.min(last), end.min(last));

    if end < start {
        return Err(InvalidRangeError::Inverted { start, end });
    }
    Ok((start, end))
}

fn compute_row(
    slot: usize,
    item: &Item,
    start: usize,
    end: usize,
    years: f64,
    options: &ReportOptions,
) -> ComparisonRow {
    let base = item.values[start];
    let total = total_change_pct(&item.values, start, end);
    let annualized = cagr_pct(base, item.values[end], years);
    let differential =
        target_vs_actual_differential_pct(base, total, years, options.annual_rate_pct);

    ComparisonRow {
        slot,
        item_name: item.name.clone(),
        annualized_change_pct: finite(annualized),
        total_change_pct: finite(total),
        target_differential_pct: finite(differential),
        rebased: rebase(&item.values[start..=end], 0)
            .into_iter()
            .map(finite)
            .collect(),
    }
}

fn illustrate(row: &ComparisonRow, years: f64, options: &ReportOptions) -> Option<IllustrativeExample> {
    let total = row.total_change_pct?;
    let target = target_change_pct(years, options.annual_rate_pct);

    let actual_cost = options.basket * (1.0 + total / 100.0);
    let target_cost = options.basket * (1.0 + target / 100.0);
    let difference_pct = finite((actual_cost - target_cost) / target_cost * 100.0)?;

    Some(IllustrativeExample {
        item_name: row.item_name.clone(),
        basket: options.basket,
        actual_cost,
        target_cost,
        total_change_pct: total,
        annualized_change_pct: finite(cagr_pct(options.basket, actual_cost, years)),
        difference_pct,
        direction: Direction::of(difference_pct),
    })
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
