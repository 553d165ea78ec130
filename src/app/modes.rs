use crate::core::engine::{ReconcileEngine, ReconcileReport};
use crate::core::plan::ReconcilePlan;
use crate::domain::ports::CatalogStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一個引擎、幾種不同的執行計畫
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// 探測所有連結
    CheckAll,
    /// 替換重複的網址
    Duplicates,
    /// 只檢查文章
    Articles,
    /// 透過 oEmbed 檢查影片
    Videos,
    /// 重新抓取標題與描述
    Metadata,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::CheckAll => "check-all",
            RunMode::Duplicates => "duplicates",
            RunMode::Articles => "articles",
            RunMode::Videos => "videos",
            RunMode::Metadata => "metadata",
        }
    }

    /// metadata 模式不走連結檢查，回傳 None
    pub fn plan(&self) -> Option<ReconcilePlan> {
        match self {
            RunMode::CheckAll => Some(ReconcilePlan::check_all()),
            RunMode::Duplicates => Some(ReconcilePlan::duplicates()),
            RunMode::Articles => Some(ReconcilePlan::articles()),
            RunMode::Videos => Some(ReconcilePlan::videos()),
            RunMode::Metadata => None,
        }
    }

    pub fn confirmation_question(&self) -> &'static str {
        match self {
            RunMode::Metadata => "Do you want to update the catalog with the refreshed metadata?",
            RunMode::Duplicates => "Do you want to replace the duplicate URLs?",
            _ => "Do you want to replace the broken links?",
        }
    }

    pub fn nothing_changed_message(&self) -> &'static str {
        match self {
            RunMode::Duplicates => "No duplicate URLs found!",
            RunMode::Metadata => "All metadata is up to date!",
            _ => "All URLs are working correctly!",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub async fn run_mode<S: CatalogStore>(
    engine: &mut ReconcileEngine<S>,
    mode: RunMode,
) -> Result<ReconcileReport> {
    tracing::info!("🚀 Running {} pass", mode);
    match mode.plan() {
        Some(plan) => engine.reconcile(&plan).await,
        None => engine.refresh_metadata().await,
    }
}
