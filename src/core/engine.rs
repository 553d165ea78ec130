use crate::config::tables::{PhraseBook, ReplacementPools};
use crate::config::toml_config::{MissingPoolPolicy, ReconcileConfig};
use crate::core::enricher::MetadataEnricher;
use crate::core::liveness::{DomainCache, LivenessChecker, ProbeOutcome, ProbeSource};
use crate::core::plan::{LivenessStrategy, ReconcilePlan};
use crate::core::selector::ReplacementSelector;
use crate::domain::model::{CatalogEntry, ChangeReason, ChangeRecord, ChangeSet};
use crate::domain::ports::{CatalogStore, ConfirmGate};
use crate::utils::error::{LinkError, Result};
use crate::utils::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// 單一項目在一輪處理後的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryState {
    Untested,
    Alive,
    Dead,
    Replaced,
    /// Dead 但沒有可用的替換，保留原網址
    LeftBroken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOutcome {
    pub index: usize,
    pub id: String,
    pub state: EntryState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub examined: usize,
    pub alive: usize,
    pub dead: usize,
    pub replaced: usize,
    pub left_broken: usize,
    pub refreshed: usize,
    /// 實際發出的網路探測
    pub probes: usize,
    /// 由網域快取直接判定、未發出請求
    pub cache_hits: usize,
    /// 網址無法探測，直接視為 Dead
    pub unprobeable: usize,
}

/// 一輪處理的結果：更新後的完整目錄與變更清單
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub entries: Vec<CatalogEntry>,
    pub changes: ChangeSet,
    pub stats: ReconcileStats,
    pub outcomes: Vec<EntryOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    NothingToWrite,
    DryRun,
    Written,
}

pub struct ReconcileEngine<S: CatalogStore> {
    store: S,
    checker: LivenessChecker,
    selector: ReplacementSelector,
    enricher: MetadataEnricher,
    config: ReconcileConfig,
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl<S: CatalogStore> ReconcileEngine<S> {
    pub fn new(
        store: S,
        config: ReconcileConfig,
        pools: Arc<ReplacementPools>,
        phrases: Arc<PhraseBook>,
    ) -> Result<Self> {
        let checker = LivenessChecker::new(config.probe.clone())?;
        let enricher = MetadataEnricher::new(&config.enrich, pools.clone(), phrases)?;
        let selector = ReplacementSelector::new(pools);
        Ok(Self::with_parts(store, checker, selector, enricher, config))
    }

    pub fn with_parts(
        store: S,
        checker: LivenessChecker,
        selector: ReplacementSelector,
        enricher: MetadataEnricher,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            store,
            checker,
            selector,
            enricher,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn domain_cache(&self) -> &DomainCache {
        self.checker.cache()
    }

    /// 依計畫檢查並替換壞掉的連結，不寫檔
    pub async fn reconcile(&mut self, plan: &ReconcilePlan) -> Result<ReconcileReport> {
        self.checker.reset();

        let mut entries = self.store.load().await?;
        let targets = plan.scope.select(&entries);
        let mut used_urls: HashSet<String> = entries.iter().map(|e| e.url.clone()).collect();

        let mut changes = ChangeSet::new();
        let mut stats = ReconcileStats::default();
        let mut outcomes = Vec::with_capacity(targets.len());
        let mut progress = ProgressReporter::new(
            plan.label(),
            targets.len(),
            self.config.run.progress_interval,
        );

        tracing::info!(
            "🔍 Checking {} of {} entries in {}",
            targets.len(),
            entries.len(),
            self.store.location()
        );

        for index in targets {
            stats.examined += 1;

            let alive = if plan.assume_dead {
                false
            } else {
                let outcome = self.probe_entry(&entries[index].url, plan.liveness).await;
                match outcome.source {
                    ProbeSource::Network => {
                        stats.probes += 1;
                        pace(self.config.probe.delay()).await;
                    }
                    ProbeSource::Cache => stats.cache_hits += 1,
                    ProbeSource::Skipped => stats.unprobeable += 1,
                }
                outcome.verdict.is_alive()
            };
            progress.tick();

            if alive {
                stats.alive += 1;
                outcomes.push(EntryOutcome {
                    index,
                    id: entries[index].id.clone(),
                    state: EntryState::Alive,
                });
                continue;
            }

            stats.dead += 1;
            let entry = &entries[index];
            tracing::warn!(
                "❌ {} {} link: {} - {}",
                entry.emotion,
                entry.content_type,
                entry.title,
                entry.url
            );

            let Some(replacement) = self.replacement_for(entry, &used_urls) else {
                stats.left_broken += 1;
                outcomes.push(EntryOutcome {
                    index,
                    id: entry.id.clone(),
                    state: EntryState::LeftBroken,
                });
                continue;
            };

            let metadata = self
                .enricher
                .enrich(&replacement, entry.content_type, entry.emotion)
                .await;

            let entry = &mut entries[index];
            let before = entry.snapshot();
            entry.url = replacement.clone();
            if let Some(metadata) = metadata {
                if !metadata.title.trim().is_empty() {
                    entry.title = metadata.title;
                }
                entry.description = metadata.description;
            }
            used_urls.insert(replacement);

            let record = ChangeRecord {
                id: entry.id.clone(),
                index,
                emotion: entry.emotion,
                content_type: entry.content_type,
                reason: plan.change_reason(),
                before,
                after: entry.snapshot(),
            };
            log_change(&record);
            changes.push(record);

            stats.replaced += 1;
            outcomes.push(EntryOutcome {
                index,
                id: entry.id.clone(),
                state: EntryState::Replaced,
            });

            pace(self.config.enrich.delay()).await;
        }

        tracing::info!(
            "Finished {} {}: {} alive, {} dead, {} replaced, {} left broken",
            stats.examined,
            plan.label(),
            stats.alive,
            stats.dead,
            stats.replaced,
            stats.left_broken
        );

        Ok(ReconcileReport {
            entries,
            changes,
            stats,
            outcomes,
        })
    }

    /// 以目前網址重新抓取標題與描述，不探測、不換網址
    pub async fn refresh_metadata(&mut self) -> Result<ReconcileReport> {
        let mut entries = self.store.load().await?;
        let targets: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.content_type.is_enrichable())
            .map(|(index, _)| index)
            .collect();

        let mut changes = ChangeSet::new();
        let mut stats = ReconcileStats::default();
        let mut outcomes = Vec::with_capacity(targets.len());
        let mut progress = ProgressReporter::new(
            "entries",
            targets.len(),
            self.config.run.progress_interval,
        );

        tracing::info!("📝 Refreshing metadata for {} entries", targets.len());

        for index in targets {
            stats.examined += 1;
            let entry = &entries[index];
            let metadata = self
                .enricher
                .enrich(&entry.url, entry.content_type, entry.emotion)
                .await;
            pace(self.config.enrich.delay()).await;
            progress.tick();

            let entry = &mut entries[index];
            outcomes.push(EntryOutcome {
                index,
                id: entry.id.clone(),
                state: EntryState::Untested,
            });

            let Some(metadata) = metadata else {
                continue;
            };

            let before = entry.snapshot();
            if !metadata.title.trim().is_empty() && metadata.title != entry.title {
                entry.title = metadata.title;
            }
            if metadata.description != entry.description {
                entry.description = metadata.description;
            }
            let after = entry.snapshot();
            if after == before {
                continue;
            }

            let record = ChangeRecord {
                id: entry.id.clone(),
                index,
                emotion: entry.emotion,
                content_type: entry.content_type,
                reason: ChangeReason::MetadataRefresh,
                before,
                after,
            };
            log_change(&record);
            changes.push(record);
            stats.refreshed += 1;
        }

        Ok(ReconcileReport {
            entries,
            changes,
            stats,
            outcomes,
        })
    }

    /// 有變更、非 dry run 且確認通過時才寫入，且只寫一次
    pub async fn commit(
        &self,
        report: &ReconcileReport,
        gate: &dyn ConfirmGate,
        dry_run: bool,
    ) -> Result<CommitOutcome> {
        if report.changes.is_empty() {
            tracing::debug!("No changes, leaving {} untouched", self.store.location());
            return Ok(CommitOutcome::NothingToWrite);
        }

        if dry_run {
            tracing::info!(
                "🔍 DRY RUN - {} changes not written to {}",
                report.changes.len(),
                self.store.location()
            );
            return Ok(CommitOutcome::DryRun);
        }

        if !gate.confirm(&report.changes) {
            return Err(LinkError::Aborted {
                message: "Update cancelled.".to_string(),
            });
        }

        self.store.save(&report.entries).await?;
        tracing::info!(
            "💾 Saved {} changes to {}",
            report.changes.len(),
            self.store.location()
        );
        Ok(CommitOutcome::Written)
    }

    async fn probe_entry(&mut self, url: &str, strategy: LivenessStrategy) -> ProbeOutcome {
        match strategy {
            LivenessStrategy::Url => self.checker.check(url).await,
            LivenessStrategy::VideoEmbed => {
                self.checker
                    .check_video(url, &self.config.enrich.oembed_endpoint)
                    .await
            }
        }
    }

    fn replacement_for(&self, entry: &CatalogEntry, used_urls: &HashSet<String>) -> Option<String> {
        let selection = self
            .selector
            .select(entry.emotion, entry.content_type, used_urls);

        if selection.is_fallback() {
            match self.config.run.missing_pool {
                MissingPoolPolicy::LeaveBroken => {
                    tracing::warn!(
                        "⚠️ No replacement pool for {}/{}, leaving {} in place",
                        entry.emotion,
                        entry.content_type,
                        entry.url
                    );
                    return None;
                }
                MissingPoolPolicy::Fallback => {
                    tracing::warn!(
                        "⚠️ No replacement pool for {}/{}, using generic fallback",
                        entry.emotion,
                        entry.content_type
                    );
                }
            }
        }

        let replacement = selection.into_url();
        if replacement == entry.url {
            tracing::warn!(
                "⚠️ Replacement for {} is the same URL, leaving it in place",
                entry.url
            );
            return None;
        }
        Some(replacement)
    }
}

fn log_change(record: &ChangeRecord) {
    tracing::info!(
        "🔄 [{}] {} {} ({:?})",
        record.index,
        record.emotion,
        record.content_type,
        record.reason
    );
    if record.url_changed() {
        tracing::info!("   Old URL: {}", record.before.url);
        tracing::info!("   New URL: {}", record.after.url);
    }
    if record.before.title != record.after.title {
        tracing::info!("   Old title: {}", record.before.title);
        tracing::info!("   New title: {}", record.after.title);
    }
    if record.before.description != record.after.description {
        tracing::info!("   New description: {}", record.after.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prompt::AutoApprove;
    use crate::adapters::storage::JsonCatalogStore;
    use crate::config::tables::Candidate;
    use crate::domain::model::{ContentType, Emotion};
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct Decline {
        asked: Cell<usize>,
    }

    impl ConfirmGate for Decline {
        fn confirm(&self, _changes: &ChangeSet) -> bool {
            self.asked.set(self.asked.get() + 1);
            false
        }
    }

    fn entry(id: &str, url: &str, emotion: Emotion, content_type: ContentType) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            url: url.to_string(),
            content_type,
            emotion,
            extra: Default::default(),
        }
    }

    async fn store_with(dir: &TempDir, entries: &[CatalogEntry]) -> JsonCatalogStore {
        let store = JsonCatalogStore::new(dir.path().join("ContentData.json"));
        store.save(entries).await.unwrap();
        store
    }

    fn test_config() -> ReconcileConfig {
        let mut config = ReconcileConfig::default().without_delays();
        config.probe.head_timeout_seconds = 2;
        config.probe.get_timeout_seconds = 2;
        config.enrich.timeout_seconds = 2;
        config.enrich.article_timeout_seconds = 2;
        config
    }

    fn engine(
        store: JsonCatalogStore,
        pools: ReplacementPools,
        config: ReconcileConfig,
    ) -> ReconcileEngine<JsonCatalogStore> {
        ReconcileEngine::new(
            store,
            config,
            Arc::new(pools),
            Arc::new(PhraseBook::default()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_all_alive_leaves_file_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD);
            then.status(200);
        });

        let dir = TempDir::new().unwrap();
        let entries = vec![
            entry("1", &server.url("/a"), Emotion::Happy, ContentType::Video),
            entry("2", &server.url("/b"), Emotion::Sad, ContentType::Article),
        ];
        let store = store_with(&dir, &entries).await;
        let before = std::fs::read(store.path()).unwrap();

        let pools = ReplacementPools::new("https://fallback.example/");
        let mut engine = engine(store, pools, test_config());
        let report = engine.reconcile(&ReconcilePlan::check_all()).await.unwrap();

        assert!(report.changes.is_empty());
        assert_eq!(report.stats.alive, 2);
        let outcome = engine.commit(&report, &AutoApprove, false).await.unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToWrite);
        assert_eq!(std::fs::read(engine.store().path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_dead_entry_replaced_with_first_unused_candidate() {
        let server = MockServer::start();
        let dead_head = server.mock(|when, then| {
            when.method(HEAD).path("/x");
            then.status(404);
        });
        let dead_get = server.mock(|when, then| {
            when.method(GET).path("/x");
            then.status(404);
        });

        let dir = TempDir::new().unwrap();
        let entries = vec![
            entry("1", &server.url("/x"), Emotion::Happy, ContentType::Video),
            entry(
                "2",
                "https://www.youtube.com/watch?v=AAAAAAAAAAA",
                Emotion::Happy,
                ContentType::Quote,
            ),
        ];
        let store = store_with(&dir, &entries).await;

        let pools = ReplacementPools::new("https://fallback.example/").with_pool(
            Emotion::Happy,
            ContentType::Video,
            vec![
                Candidate::url("https://www.youtube.com/watch?v=AAAAAAAAAAA"),
                Candidate::curated(
                    "https://vimeo.com/76979871",
                    "Curated title",
                    "Curated description",
                ),
            ],
        );
        // 只檢查影片，避免去探測真實網址
        let mut engine = engine(store, pools, test_config());
        let plan = ReconcilePlan {
            scope: crate::core::plan::EntryScope::Type(ContentType::Video),
            ..ReconcilePlan::check_all()
        };
        let report = engine.reconcile(&plan).await.unwrap();

        dead_head.assert_hits(1);
        dead_get.assert_hits(1);
        assert_eq!(report.changes.len(), 1);

        let record = &report.changes.records()[0];
        assert_eq!(record.id, "1");
        assert_eq!(record.reason, ChangeReason::DeadLink);
        assert_eq!(record.after.url, "https://vimeo.com/76979871");
        assert_eq!(record.after.title, "Curated title");
        assert_eq!(record.after.description, "Curated description");
        assert_eq!(report.outcomes[0].state, EntryState::Replaced);

        assert_eq!(
            engine.commit(&report, &AutoApprove, false).await.unwrap(),
            CommitOutcome::Written
        );
        let saved = engine.store().load().await.unwrap();
        assert_eq!(saved[0].url, "https://vimeo.com/76979871");
        assert_eq!(saved[1], entries[1]);
    }

    #[tokio::test]
    async fn test_title_kept_when_enricher_has_nothing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/x");
            then.status(404);
        });

        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[entry("1", &server.url("/x"), Emotion::Sad, ContentType::Song)],
        )
        .await;
        let pools = ReplacementPools::new("https://fallback.example/").with_pool(
            Emotion::Sad,
            ContentType::Song,
            vec![Candidate::url("https://music.example/track/1")],
        );

        let mut engine = engine(store, pools, test_config());
        let report = engine.reconcile(&ReconcilePlan::check_all()).await.unwrap();

        let record = &report.changes.records()[0];
        assert_eq!(record.after.url, "https://music.example/track/1");
        assert_eq!(record.after.title, "T");
        assert_eq!(record.after.description, "D");
    }

    #[tokio::test]
    async fn test_duplicates_replace_later_occurrences_without_probing() {
        let server = MockServer::start();
        let any_request = server.mock(|when, then| {
            when.path("/a");
            then.status(200);
        });

        let dir = TempDir::new().unwrap();
        let shared = server.url("/a");
        let store = store_with(
            &dir,
            &[
                entry("1", &shared, Emotion::Happy, ContentType::Song),
                entry("2", &shared, Emotion::Happy, ContentType::Song),
            ],
        )
        .await;
        let pools = ReplacementPools::new("https://fallback.example/").with_pool(
            Emotion::Happy,
            ContentType::Song,
            vec![Candidate::url("https://music.example/happy")],
        );

        let mut engine = engine(store, pools, test_config());
        let report = engine.reconcile(&ReconcilePlan::duplicates()).await.unwrap();

        any_request.assert_hits(0);
        assert_eq!(report.entries[0].url, shared);
        assert_eq!(report.entries[1].url, "https://music.example/happy");
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes.records()[0].reason, ChangeReason::Duplicate);
        assert_eq!(report.stats.probes, 0);
    }

    #[tokio::test]
    async fn test_missing_pool_uses_fallback_or_leaves_broken() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/q");
            then.status(500);
        });

        let dir = TempDir::new().unwrap();
        let entries = [entry("1", &server.url("/q"), Emotion::Sleepy, ContentType::Quote)];
        let store = store_with(&dir, &entries).await;
        let mut engine_fallback = engine(
            store.clone(),
            ReplacementPools::new("https://fallback.example/generic"),
            test_config(),
        );
        let report = engine_fallback.reconcile(&ReconcilePlan::check_all()).await.unwrap();
        assert_eq!(report.entries[0].url, "https://fallback.example/generic");

        let mut config = test_config();
        config.run.missing_pool = MissingPoolPolicy::LeaveBroken;
        let pools = ReplacementPools::new("https://fallback.example/generic");
        let mut engine_broken = engine(store, pools, config);
        let report = engine_broken.reconcile(&ReconcilePlan::check_all()).await.unwrap();
        assert!(report.changes.is_empty());
        assert_eq!(report.stats.left_broken, 1);
        assert_eq!(report.outcomes[0].state, EntryState::LeftBroken);
    }

    #[tokio::test]
    async fn test_shared_bad_domain_probed_once() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.path("/one");
            then.status(404);
        });
        let second = server.mock(|when, then| {
            when.path("/two");
            then.status(200);
        });

        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[
                entry("1", &server.url("/one"), Emotion::Sleepy, ContentType::Quote),
                entry("2", &server.url("/two"), Emotion::Sleepy, ContentType::Quote),
            ],
        )
        .await;

        let mut config = test_config();
        config.run.missing_pool = MissingPoolPolicy::LeaveBroken;
        let mut engine = engine(store, ReplacementPools::new("https://fallback.example/"), config);
        let report = engine.reconcile(&ReconcilePlan::check_all()).await.unwrap();

        first.assert_hits(2);
        second.assert_hits(0);
        assert_eq!(report.stats.dead, 2);
        assert_eq!(report.stats.probes, 1);
        assert_eq!(report.stats.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_declined_and_dry_run_do_not_write() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/x");
            then.status(404);
        });

        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[entry("1", &server.url("/x"), Emotion::Happy, ContentType::Article)],
        )
        .await;
        let before = std::fs::read(store.path()).unwrap();
        let pools = ReplacementPools::new("https://fallback.example/").with_pool(
            Emotion::Happy,
            ContentType::Article,
            vec![Candidate::url("http://127.0.0.1:1/article")],
        );

        let mut engine = engine(store, pools, test_config());
        let report = engine.reconcile(&ReconcilePlan::articles()).await.unwrap();
        assert_eq!(report.changes.len(), 1);

        assert_eq!(
            engine.commit(&report, &AutoApprove, true).await.unwrap(),
            CommitOutcome::DryRun
        );

        let gate = Decline { asked: Cell::new(0) };
        let err = engine.commit(&report, &gate, false).await.unwrap_err();
        assert!(matches!(err, LinkError::Aborted { .. }));
        assert_eq!(gate.asked.get(), 1);
        assert_eq!(std::fs::read(engine.store().path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_refresh_metadata_updates_articles() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/article");
            then.status(200).body(
                r#"<html><head><meta name="description" content="Fresh words. More."></head>
<body><h1>Fresh Title</h1></body></html>"#,
            );
        });

        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[
                entry("1", &server.url("/article"), Emotion::Happy, ContentType::Article),
                entry("2", "https://quotes.example/tag/happy", Emotion::Happy, ContentType::Quote),
            ],
        )
        .await;

        let pools = ReplacementPools::new("https://fallback.example/");
        let mut engine = engine(store, pools, test_config());
        let report = engine.refresh_metadata().await.unwrap();

        assert_eq!(report.stats.examined, 1);
        assert_eq!(report.changes.len(), 1);
        let record = &report.changes.records()[0];
        assert_eq!(record.reason, ChangeReason::MetadataRefresh);
        assert!(!record.url_changed());
        assert_eq!(record.after.title, "Fresh Title");
        assert!(record.after.description.starts_with("Fresh words. This article "));
    }

    #[tokio::test]
    async fn test_invalid_catalog_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ContentData.json");
        std::fs::write(&path, "[{\"id\": \"1\"}]").unwrap();

        let mut engine = engine(
            JsonCatalogStore::new(path),
            ReplacementPools::new("https://fallback.example/"),
            test_config(),
        );
        let err = engine.reconcile(&ReconcilePlan::check_all()).await.unwrap_err();
        assert!(matches!(err, LinkError::Catalog { .. }));
    }

    #[tokio::test]
    async fn test_dead_entry_already_on_fallback_is_not_rewritten() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/generic");
            then.status(503);
        });

        let dir = TempDir::new().unwrap();
        let fallback = server.url("/generic");
        let store = store_with(
            &dir,
            &[entry("1", &fallback, Emotion::Lost, ContentType::Quote)],
        )
        .await;
        let before = std::fs::read(store.path()).unwrap();

        let mut engine = engine(store, ReplacementPools::new(fallback.clone()), test_config());
        let report = engine.reconcile(&ReconcilePlan::check_all()).await.unwrap();

        assert!(report.changes.is_empty());
        assert_eq!(report.stats.dead, 1);
        assert_eq!(report.stats.left_broken, 1);
        assert_eq!(report.outcomes[0].state, EntryState::LeftBroken);
        assert_eq!(
            engine.commit(&report, &AutoApprove, false).await.unwrap(),
            CommitOutcome::NothingToWrite
        );
        assert_eq!(std::fs::read(engine.store().path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_video_without_id_counts_as_unprobeable() {
        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            &[entry("1", "https://example.com/", Emotion::Happy, ContentType::Video)],
        )
        .await;

        let mut config = test_config();
        config.run.missing_pool = MissingPoolPolicy::LeaveBroken;
        let pools = ReplacementPools::new("https://fallback.example/");
        let mut engine = engine(store, pools, config);
        let report = engine.reconcile(&ReconcilePlan::videos()).await.unwrap();

        assert_eq!(report.stats.dead, 1);
        assert_eq!(report.stats.unprobeable, 1);
        assert_eq!(report.stats.cache_hits, 0);
        assert_eq!(report.stats.probes, 0);
    }
}
