//! Price index dataset and the delimited-text parser that builds it.
//!
//! Layout of the source resource:
//!
//! ```text
//! name,category,12/01/2019,1/01/2020,...
//! All-items (avg.),All-items,100,102,...
//! ```
//!
//! Columns 0 and 1 label each row; the remaining header columns are the date
//! axis shared by every item. A cell that is not a number becomes `NaN` and
//! is reported downstream as "no data".

use crate::domain::date_label::{parse_label, MonthYear};
use crate::domain::error::ParseError;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Number of leading label columns (name, category) on every row.
const LABEL_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub category: String,
    /// One value per date label. `NaN` marks a missing or malformed cell.
    pub values: Vec<f64>,
}

/// Items sharing a category, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    /// `(item index, item)` pairs.
    pub items: Vec<(usize, &'a Item)>,
}

/// Immutable dataset: date axis, items in source row order, and the ceiling
/// (latest known month) used to clamp selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dates: Vec<String>,
    parsed_dates: Vec<Option<NaiveDate>>,
    items: Vec<Item>,
    ceiling: Option<MonthYear>,
}

impl Dataset {
    /// Parse the raw delimited resource. Bytes that are not valid UTF-8 are
    /// reported as [`ParseError::Malformed`] with the offending line.
    pub fn parse<R: AsRef<[u8]>>(raw: R) -> Result<Self, ParseError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(raw.as_ref());

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ParseError::Malformed {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        if records.len() < 2 {
            return Err(ParseError::TooFewRows {
                rows: records.len(),
            });
        }

        let header = &records[0];
        if header.len() < LABEL_COLUMNS + 1 {
            return Err(ParseError::TooFewColumns {
                columns: header.len(),
            });
        }

        let dates: Vec<String> = header
            .iter()
            .skip(LABEL_COLUMNS)
            .map(str::to_string)
            .collect();

        let mut items = Vec::with_capacity(records.len() - 1);
        for (row, record) in records.iter().enumerate().skip(1) {
            if record.len() <= 1 {
                log::debug!("skipping row {} with {} column(s)", row, record.len());
                continue;
            }
            items.push(Item {
                name: record.get(0).unwrap_or_default().to_string(),
                category: record.get(1).unwrap_or_default().to_string(),
                values: record.iter().skip(LABEL_COLUMNS).map(parse_value).collect(),
            });
        }

        let dataset = Self::from_parts(dates, items);
        log::info!(
            "parsed {} items over {} dates (ceiling {})",
            dataset.items.len(),
            dataset.dates.len(),
            dataset
                .ceiling
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".into()),
        );
        Ok(dataset)
    }

    /// Assemble a dataset from already-split parts.
    ///
    /// Value series are padded with `NaN` or truncated so that every item has
    /// exactly one value per date. The ceiling defaults to the latest date
    /// label that parses.
    pub fn from_parts(dates: Vec<String>, mut items: Vec<Item>) -> Self {
        let parsed_dates: Vec<Option<NaiveDate>> = dates.iter().map(|d| parse_label(d)).collect();

        for item in &mut items {
            if item.values.len() != dates.len() {
                log::warn!(
                    "item '{}' has {} values for {} dates",
                    item.name,
                    item.values.len(),
                    dates.len()
                );
                item.values.resize(dates.len(), f64::NAN);
            }
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                log::warn!("duplicate item name '{}', lookups use the first", item.name);
            }
        }

        let ceiling = parsed_dates
            .iter()
            .flatten()
            .max()
            .map(|d| MonthYear::from_date(*d));

        Self {
            dates,
            parsed_dates,
            items,
            ceiling,
        }
    }

    /// Replace the ceiling with a configured value.
    pub fn with_ceiling(mut self, ceiling: MonthYear) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn parsed_dates(&self) -> &[Option<NaiveDate>] {
        &self.parsed_dates
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn ceiling(&self) -> Option<MonthYear> {
        self.ceiling
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Index of the first item named `name`.
    pub fn find_item(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Items grouped by category, categories in order of first appearance.
    pub fn items_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for (index, item) in self.items.iter().enumerate() {
            let pos = *positions.entry(item.category.as_str()).or_insert_with(|| {
                groups.push(CategoryGroup {
                    category: item.category.as_str(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
            groups[pos].items.push((index, item));
        }

        groups
    }
}

fn parse_value(cell: &str) -> f64 {
    cell.parse::<f64>().unwrap_or(f64::NAN)
}
