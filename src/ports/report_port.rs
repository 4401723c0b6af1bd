//! Report output port trait.

use std::fs;
use std::path::Path;

use crate::domain::error::TrackerError;
use crate::domain::report::ComparisonReport;

/// Port for rendering and writing comparison reports.
pub trait ReportPort {
    fn render(&self, report: &ComparisonReport) -> Result<String, TrackerError>;

    /// Default implementation: renders and writes the result to `output_path`.
    fn write(&self, report: &ComparisonReport, output_path: &Path) -> Result<(), TrackerError> {
        let content = self.render(report)?;
        fs::write(output_path, content).map_err(|e| TrackerError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}
