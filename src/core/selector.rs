use crate::config::tables::ReplacementPools;
use crate::domain::model::{ContentType, Emotion};
use std::collections::HashSet;
use std::sync::Arc;

/// 選出的替換網址與其來源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 清單中第一個尚未使用的候選
    Pooled(String),
    /// 清單用盡，在第一個候選後加上 dup 參數
    Disambiguated(String),
    /// 沒有對應清單，使用通用備援網址
    Fallback(String),
}

impl Selection {
    pub fn url(&self) -> &str {
        match self {
            Selection::Pooled(url)
            | Selection::Disambiguated(url)
            | Selection::Fallback(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            Selection::Pooled(url)
            | Selection::Disambiguated(url)
            | Selection::Fallback(url) => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Selection::Fallback(_))
    }
}

/// 純函式選擇器：相同輸入永遠得到相同結果，不做任何 I/O
#[derive(Debug, Clone)]
pub struct ReplacementSelector {
    pools: Arc<ReplacementPools>,
}

impl ReplacementSelector {
    pub fn new(pools: Arc<ReplacementPools>) -> Self {
        Self { pools }
    }

    pub fn pools(&self) -> &ReplacementPools {
        &self.pools
    }

    pub fn select(
        &self,
        emotion: Emotion,
        content_type: ContentType,
        used_urls: &HashSet<String>,
    ) -> Selection {
        let Some(candidates) = self.pools.candidates(emotion, content_type) else {
            return Selection::Fallback(self.pools.fallback_url().to_string());
        };

        if let Some(candidate) = candidates.iter().find(|c| !used_urls.contains(&c.url)) {
            return Selection::Pooled(candidate.url.clone());
        }

        Selection::Disambiguated(unused_dup_variant(&candidates[0].url, used_urls))
    }
}

fn with_dup_marker(url: &str, counter: usize) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}dup={}", url, separator, counter)
}

/// 從 used_urls 的數量開始遞增，直到得到尚未使用的網址
fn unused_dup_variant(url: &str, used_urls: &HashSet<String>) -> String {
    (used_urls.len()..)
        .map(|counter| with_dup_marker(url, counter))
        .find(|candidate| !used_urls.contains(candidate))
        .unwrap_or_else(|| with_dup_marker(url, usize::MAX))
}
