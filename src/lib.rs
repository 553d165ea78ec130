pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AutoApprove, JsonCatalogStore, StdinPrompt};
pub use app::{run_mode, AuditReport, RunMode};
pub use config::{CatalogTables, ReconcileConfig};
pub use crate::core::{ReconcileEngine, ReconcilePlan, ReconcileReport};
pub use domain::model::{CatalogEntry, ChangeSet, ContentType, Emotion};
pub use utils::error::{LinkError, Result};
