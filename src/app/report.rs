use crate::app::modes::RunMode;
use crate::core::engine::{ReconcileReport, ReconcileStats};
use crate::domain::model::ChangeSet;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// --report 輸出的稽核紀錄
#[derive(Debug, Serialize)]
pub struct AuditReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub mode: RunMode,
    pub stats: &'a ReconcileStats,
    pub changes: &'a ChangeSet,
}

impl<'a> AuditReport<'a> {
    pub fn new(mode: RunMode, report: &'a ReconcileReport) -> Self {
        Self {
            generated_at: Utc::now(),
            mode,
            stats: &report.stats,
            changes: &report.changes,
        }
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(&path, data)?;
        tracing::info!("📄 Report written to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ChangeReason, ChangeRecord, ContentType, Emotion, EntrySnapshot,
    };
    use tempfile::TempDir;

    fn snapshot(url: &str) -> EntrySnapshot {
        EntrySnapshot {
            url: url.to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let mut changes = ChangeSet::new();
        changes.push(ChangeRecord {
            id: "1".to_string(),
            index: 0,
            emotion: Emotion::Happy,
            content_type: ContentType::Video,
            reason: ChangeReason::DeadLink,
            before: snapshot("https://dead.example/x"),
            after: snapshot("https://www.youtube.com/watch?v=ZbZSe6N_BXs"),
        });
        let report = ReconcileReport {
            entries: Vec::new(),
            changes,
            stats: ReconcileStats {
                examined: 1,
                dead: 1,
                replaced: 1,
                ..ReconcileStats::default()
            },
            outcomes: Vec::new(),
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        AuditReport::new(RunMode::CheckAll, &report).write_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["mode"], "check-all");
        assert_eq!(value["stats"]["replaced"], 1);
        assert_eq!(value["changes"][0]["reason"], "dead-link");
        assert_eq!(value["changes"][0]["type"], "video");
        assert_eq!(
            value["changes"][0]["after"]["url"],
            "https://www.youtube.com/watch?v=ZbZSe6N_BXs"
        );
        assert!(value["generated_at"].is_string());
    }
}
