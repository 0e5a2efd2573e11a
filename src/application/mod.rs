pub mod dashboard;
pub mod watcher;

pub use dashboard::{Dashboard, DashboardError, ReportOutcome, SourceReport};
pub use watcher::ReportWatcher;
