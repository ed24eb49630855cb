//! Roster mutation and report export.

pub mod report_service;
pub mod roster_service;

pub use report_service::{Report, ReportExporter, ReportLayout, ReportPage, ReportRow};
pub use roster_service::RosterStore;
