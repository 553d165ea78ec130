pub mod describe;
pub mod engine;
pub mod enricher;
pub mod html;
pub mod liveness;
pub mod plan;
pub mod selector;
pub mod youtube;

pub use engine::{CommitOutcome, ReconcileEngine, ReconcileReport, ReconcileStats};
pub use enricher::{MetadataEnricher, MetadataSource};
pub use liveness::LivenessChecker;
pub use plan::{EntryScope, LivenessStrategy, ReconcilePlan};
pub use selector::{ReplacementSelector, Selection};
