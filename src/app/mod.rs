pub mod modes;
pub mod report;

pub use modes::{run_mode, RunMode};
pub use report::AuditReport;
