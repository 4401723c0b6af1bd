//! Markdown report adapter implementing ReportPort.
//!
//! Renders the summary line, the change table and the illustrative basket
//! narrative. All display rounding happens here; the domain hands over full
//! precision.

use crate::domain::date_label::short_label;
use crate::domain::error::TrackerError;
use crate::domain::report::{ComparisonReport, ComparisonRow, Direction, IllustrativeExample};
use crate::ports::report_port::ReportPort;

const NO_DATA: &str = "no data";

#[derive(Debug, Default)]
pub struct MarkdownReportAdapter;

impl ReportPort for MarkdownReportAdapter {
    fn render(&self, report: &ComparisonReport) -> Result<String, TrackerError> {
        Ok(render_markdown(report))
    }
}

pub fn render_markdown(report: &ComparisonReport) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(report));
    out.push_str("\n\n");
    out.push_str(&render_change_table(report));
    if let Some(example) = &report.illustrative_example {
        out.push('\n');
        out.push_str(&render_example(report, example));
    }
    out
}

pub fn render_summary(report: &ComparisonReport) -> String {
    format!(
        "Across the time period of {} to {} ({} years), the price change for each item was:",
        short_label(report.start_label()),
        short_label(report.end_label()),
        format_years(report.years),
    )
}

pub fn render_change_table(report: &ComparisonReport) -> String {
    let mut out = format!(
        "| Item | Average Annual % Change | Total % Change | Price Difference vs. {}% Annual Inflation |\n",
        format_rate(report.annual_rate_pct)
    );
    out.push_str("|---|---:|---:|---:|\n");

    if report.rows.is_empty() {
        out.push_str("| _No items selected_ | | | |\n");
        return out;
    }

    for row in &report.rows {
        out.push_str(&format_row(row));
    }
    out
}

fn format_row(row: &ComparisonRow) -> String {
    format!(
        "| {} | {} | {} | {} |\n",
        row.item_name.replace('|', "\\|"),
        row.annualized_change_pct.map_or_else(|| NO_DATA.to_string(), format_pct),
        row.total_change_pct.map_or_else(|| NO_DATA.to_string(), format_pct),
        row.target_differential_pct
            .map_or_else(|| NO_DATA.to_string(), format_signed_pct),
    )
}

pub fn render_example(report: &ComparisonReport, example: &IllustrativeExample) -> String {
    let start = short_label(report.start_label());
    let end = short_label(report.end_label());
    let rate = format_rate(report.annual_rate_pct);
    let change_word = if example.total_change_pct < 0.0 {
        "decrease"
    } else {
        "increase"
    };
    let per_year = example
        .annualized_change_pct
        .map_or_else(|| NO_DATA.to_string(), format_pct);

    let mut out = format!("### Illustrative example for item: {}\n\n", example.item_name);
    out.push_str(&format!(
        "- If you spent {} in {}, as of {} that same purchase would now cost {}, a total {} of {} ({} per year).\n",
        format_currency(example.basket),
        start,
        end,
        format_currency(example.actual_cost),
        change_word,
        format_pct(example.total_change_pct.abs()),
        per_year,
    ));
    out.push_str(&format!(
        "- However, if inflation had been {}% per year over this time period, the cost would be {} instead.\n",
        rate,
        format_currency(example.target_cost),
    ));
    let verdict = match example.direction {
        Direction::Higher => format!(
            "{} higher than they should be",
            format_pct(example.difference_pct.abs())
        ),
        Direction::Lower => format!(
            "{} lower than they should be",
            format_pct(example.difference_pct.abs())
        ),
        Direction::Unchanged => "exactly where they should be".to_string(),
    };
    out.push_str(&format!(
        "- Therefore, actual prices are {}, versus a scenario with annual inflation of {}%.\n",
        verdict, rate,
    ));
    out
}

/// One decimal place, as in the table cells.
pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Like [`format_pct`] with a leading `+` on positive values.
pub fn format_signed_pct(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format_pct(value)
    }
}

/// Years rounded to one decimal, without a trailing `.0`.
pub fn format_years(years: f64) -> String {
    let rounded = (years * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn format_rate(rate: f64) -> String {
    format_years(rate)
}

/// Whole dollars with thousands separators, e.g. `$1,150`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
