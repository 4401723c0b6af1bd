//! Month/year handling for the `M/D/YYYY` date axis.
//!
//! Every label on the axis is the first of its month. Months are zero-based
//! in [`MonthYear`] (0 = January) and one-based in the on-disk labels.

use chrono::{Datelike, NaiveDate};
use std::fmt;

const LABEL_FORMAT: &str = "%m/%d/%Y";

/// A calendar month. `month` is zero-based.
///
/// Field order matters: the derived `Ord` compares year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    /// First day of the month, or `None` if `month` is outside 0-11.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// The axis label for this month, e.g. `12/01/2019`.
    pub fn label(&self) -> String {
        format!("{}/01/{}", self.month + 1, self.year)
    }

    /// Parse `YYYY-MM` (one-based month), as used in config files and on the
    /// command line.
    pub fn parse_iso(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        let year: i32 = year.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::new(month - 1, year))
    }

    /// Whole months from `self` to `other`; negative if `other` is earlier.
    pub fn months_until(&self, other: &MonthYear) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

/// Parse an axis label such as `1/01/2020` or `01/01/2020`.
pub fn parse_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), LABEL_FORMAT).ok()
}

/// `12/01/2019` -> `Dec-2019`. Unparseable labels are returned unchanged.
pub fn short_label(label: &str) -> String {
    match parse_label(label) {
        Some(date) => date.format("%b-%Y").to_string(),
        None => label.to_string(),
    }
}
