#![allow(dead_code)]

use inflation_tracker::domain::dataset::{Dataset, Item};
use inflation_tracker::domain::error::TrackerError;
use inflation_tracker::ports::source_port::SourcePort;
use std::cell::Cell;
use std::io::Write;

/// Four months of a small index: the worked example plus a gap and a zero base.
pub const SAMPLE_CSV: &str = "\
name,category,12/01/2019,1/01/2020,2/01/2020,3/01/2020
All-items (avg.),All-items,100,102,104,110
Food (avg.),Food,100,101,x,103
Bread,Food,,51,52,53
Shelter (avg.),Shelter,200,204,206,210
Free transit,Transportation,0,0,1,1
";

pub struct MockSourcePort {
    pub raw: Option<String>,
    pub loads: Cell<usize>,
}

impl MockSourcePort {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: Some(raw.to_string()),
            loads: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            raw: None,
            loads: Cell::new(0),
        }
    }
}

impl SourcePort for MockSourcePort {
    fn load_raw(&self) -> Result<Vec<u8>, TrackerError> {
        self.loads.set(self.loads.get() + 1);
        self.raw.clone().map(String::into_bytes).ok_or_else(|| TrackerError::Source {
            path: self.describe(),
            reason: "unavailable".into(),
        })
    }

    fn describe(&self) -> String {
        "mock source".into()
    }
}

pub fn sample_dataset() -> Dataset {
    Dataset::parse(SAMPLE_CSV).unwrap()
}

pub fn make_item(name: &str, category: &str, values: &[f64]) -> Item {
    Item {
        name: name.to_string(),
        category: category.to_string(),
        values: values.to_vec(),
    }
}

/// Monthly labels starting at `first_month` (1-based) of `first_year`.
pub fn monthly_labels(first_month: u32, first_year: i32, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let zero_based = first_month - 1 + i as u32;
            let month = zero_based % 12 + 1;
            let year = first_year + (zero_based / 12) as i32;
            format!("{}/01/{}", month, year)
        })
        .collect()
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    write_temp_bytes(content.as_bytes(), suffix)
}

pub fn write_temp_bytes(content: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
