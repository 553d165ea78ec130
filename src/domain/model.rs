use crate::utils::error::{LinkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Scared,
    Romantic,
    Relaxed,
    Lost,
    Stressed,
    Sleepy,
}

impl Emotion {
    pub const ALL: [Emotion; 9] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Scared,
        Emotion::Romantic,
        Emotion::Relaxed,
        Emotion::Lost,
        Emotion::Stressed,
        Emotion::Sleepy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Scared => "scared",
            Emotion::Romantic => "romantic",
            Emotion::Relaxed => "relaxed",
            Emotion::Lost => "lost",
            Emotion::Stressed => "stressed",
            Emotion::Sleepy => "sleepy",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        Emotion::ALL
            .iter()
            .copied()
            .find(|emotion| emotion.as_str() == s)
            .ok_or_else(|| LinkError::InvalidConfigValue {
                field: "emotion".to_string(),
                value: s.to_string(),
                reason: "Unknown emotion".to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Song,
    Quote,
    Article,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Song => "song",
            ContentType::Quote => "quote",
            ContentType::Article => "article",
        }
    }

    /// 是否有可抓取的遠端詮釋資料
    pub fn is_enrichable(&self) -> bool {
        !matches!(self, ContentType::Quote)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 目錄中的一筆推薦內容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub emotion: Emotion,
    /// 保留未知欄位，重寫時不遺失
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogEntry {
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            url: self.url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// 對 URL 探測的結論
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Alive,
    Dead,
}

impl Verdict {
    pub fn is_alive(&self) -> bool {
        matches!(self, Verdict::Alive)
    }
}

/// Enricher 產出的顯示用詮釋資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub url: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeReason {
    DeadLink,
    Duplicate,
    MetadataRefresh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: String,
    pub index: usize,
    pub emotion: Emotion,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub reason: ChangeReason,
    pub before: EntrySnapshot,
    pub after: EntrySnapshot,
}

impl ChangeRecord {
    pub fn url_changed(&self) -> bool {
        self.before.url != self.after.url
    }
}

/// 一次 reconcile 產生的所有變更，依處理順序排列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    records: Vec<ChangeRecord>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_roundtrip_keeps_unknown_fields() {
        let raw = r#"{"id":"1","title":"T","description":"D","url":"https://a.example/x","type":"video","emotion":"happy","featured":true}"#;
        let entry: CatalogEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.content_type, ContentType::Video);
        assert_eq!(entry.emotion, Emotion::Happy);
        assert_eq!(entry.extra.get("featured"), Some(&serde_json::Value::Bool(true)));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["type"], "video");
        assert_eq!(back["featured"], true);
    }

    #[test]
    fn test_entry_missing_url_is_rejected() {
        let raw = r#"{"id":"1","title":"T","description":"D","type":"video","emotion":"happy"}"#;
        assert!(serde_json::from_str::<CatalogEntry>(raw).is_err());
    }

    #[test]
    fn test_unknown_emotion_is_rejected() {
        let raw = r#"{"id":"1","title":"T","description":"D","url":"u","type":"video","emotion":"bored"}"#;
        assert!(serde_json::from_str::<CatalogEntry>(raw).is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Emotion::Stressed.to_string(), "stressed");
        assert_eq!(ContentType::Article.to_string(), "article");
        assert!(!ContentType::Quote.is_enrichable());
    }
}
