use crate::domain::model::{CatalogEntry, ChangeReason, ContentType};
use std::collections::HashSet;

/// 這一輪要處理哪些項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryScope {
    All,
    Type(ContentType),
    /// 網址已在前面出現過的項目（第一次出現的保留不動）
    Duplicates,
}

impl EntryScope {
    /// 依目錄順序回傳符合範圍的索引
    pub fn select(&self, entries: &[CatalogEntry]) -> Vec<usize> {
        match self {
            EntryScope::All => (0..entries.len()).collect(),
            EntryScope::Type(content_type) => entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.content_type == *content_type)
                .map(|(index, _)| index)
                .collect(),
            EntryScope::Duplicates => duplicate_indices(entries),
        }
    }
}

/// quote 共用標籤頁，不算重複
fn duplicate_indices(entries: &[CatalogEntry]) -> Vec<usize> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.content_type == ContentType::Quote {
            continue;
        }
        if !seen.insert(entry.url.as_str()) {
            duplicates.push(index);
        }
    }

    duplicates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessStrategy {
    /// HEAD/GET 探測，使用網域快取
    Url,
    /// 透過 oEmbed 端點確認影片，不使用網域快取
    VideoEmbed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub scope: EntryScope,
    /// 範圍內的項目直接視為 Dead，不做探測
    pub assume_dead: bool,
    pub liveness: LivenessStrategy,
}

impl ReconcilePlan {
    pub fn check_all() -> Self {
        Self {
            scope: EntryScope::All,
            assume_dead: false,
            liveness: LivenessStrategy::Url,
        }
    }

    pub fn duplicates() -> Self {
        Self {
            scope: EntryScope::Duplicates,
            assume_dead: true,
            liveness: LivenessStrategy::Url,
        }
    }

    pub fn articles() -> Self {
        Self {
            scope: EntryScope::Type(ContentType::Article),
            assume_dead: false,
            liveness: LivenessStrategy::Url,
        }
    }

    pub fn videos() -> Self {
        Self {
            scope: EntryScope::Type(ContentType::Video),
            assume_dead: false,
            liveness: LivenessStrategy::VideoEmbed,
        }
    }

    pub fn change_reason(&self) -> ChangeReason {
        match self.scope {
            EntryScope::Duplicates => ChangeReason::Duplicate,
            _ => ChangeReason::DeadLink,
        }
    }

    /// 進度訊息中的單位名稱
    pub fn label(&self) -> &'static str {
        match self.scope {
            EntryScope::All => "URLs",
            EntryScope::Type(ContentType::Article) => "articles",
            EntryScope::Type(ContentType::Video) => "videos",
            EntryScope::Type(ContentType::Song) => "songs",
            EntryScope::Type(ContentType::Quote) => "quotes",
            EntryScope::Duplicates => "duplicates",
        }
    }
}
