//! JSON report adapter implementing ReportPort.
//!
//! Output is the structured report as handed to a browser front end; "no
//! data" values serialize as `null`.

use crate::domain::error::TrackerError;
use crate::domain::report::ComparisonReport;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &ComparisonReport) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(report).map_err(|e| TrackerError::Report {
            reason: format!("failed to serialize report: {}", e),
        })
    }
}
