//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod file_source_adapter;
pub mod json_report_adapter;
pub mod markdown_report_adapter;
pub mod svg_chart_adapter;
