use crate::domain::model::{ContentType, Emotion};
use crate::utils::error::{LinkError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

/// 內建的替換清單與描述片語
pub const DEFAULT_TABLES: &str = include_str!("../../config/tables.toml");

const BUILTIN_DEFAULT_PHRASE: &str = "complements your current mood";

/// tables.toml 的原始結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTables {
    pub fallback_url: String,
    #[serde(default)]
    pub default_phrases: Vec<String>,
    #[serde(default)]
    pub phrases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub pools: Vec<PoolDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolDefinition {
    pub emotion: Emotion,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub candidates: Vec<Candidate>,
}

/// 替換候選。影片可附帶人工整理的標題與描述。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Candidate {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
        }
    }

    pub fn curated(url: impl Into<String>, title: &str, description: &str) -> Self {
        Self {
            url: url.into(),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        }
    }
}

impl CatalogTables {
    /// 從 TOML 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LinkError::ConfigParse {
            source_name: "tables".to_string(),
            message: e.to_string(),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TABLES)
    }

    /// 驗證後轉成執行期使用的唯讀結構
    pub fn into_runtime(self) -> Result<(ReplacementPools, PhraseBook)> {
        self.validate()?;

        let mut pools = ReplacementPools::new(self.fallback_url);
        for definition in self.pools {
            let key = (definition.emotion, definition.content_type);
            if pools.pools.contains_key(&key) {
                return Err(LinkError::InvalidConfigValue {
                    field: "pools".to_string(),
                    value: format!("{}/{}", key.0, key.1),
                    reason: "Pool defined more than once".to_string(),
                });
            }
            pools.pools.insert(key, definition.candidates);
        }

        let mut book = PhraseBook::new(self.default_phrases);
        for (name, phrases) in self.phrases {
            book = book.with_phrases(name.parse()?, phrases);
        }

        Ok((pools, book))
    }
}

impl Validate for CatalogTables {
    fn validate(&self) -> Result<()> {
        validate_url("tables.fallback_url", &self.fallback_url)?;

        for definition in &self.pools {
            for candidate in &definition.candidates {
                let field = format!("pools.{}.{}", definition.emotion, definition.content_type);
                validate_url(&field, &candidate.url)?;
            }
        }

        for (name, phrases) in &self.phrases {
            Emotion::from_str(name)?;
            for phrase in phrases {
                validate_non_empty_string(&format!("phrases.{}", name), phrase)?;
            }
        }

        Ok(())
    }
}

/// (emotion, type) 對應的替換清單，執行期間唯讀
#[derive(Debug, Clone)]
pub struct ReplacementPools {
    pools: HashMap<(Emotion, ContentType), Vec<Candidate>>,
    fallback_url: String,
}

impl ReplacementPools {
    pub fn new(fallback_url: impl Into<String>) -> Self {
        Self {
            pools: HashMap::new(),
            fallback_url: fallback_url.into(),
        }
    }

    pub fn with_pool(
        mut self,
        emotion: Emotion,
        content_type: ContentType,
        candidates: Vec<Candidate>,
    ) -> Self {
        self.pools.insert((emotion, content_type), candidates);
        self
    }

    /// 沒有設定或清單為空時回傳 None
    pub fn candidates(&self, emotion: Emotion, content_type: ContentType) -> Option<&[Candidate]> {
        self.pools
            .get(&(emotion, content_type))
            .map(Vec::as_slice)
            .filter(|candidates| !candidates.is_empty())
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// 找出附帶人工標題的候選
    pub fn curated(&self, url: &str) -> Option<&Candidate> {
        self.pools
            .values()
            .flatten()
            .find(|candidate| candidate.url == url && candidate.title.is_some())
    }

    pub fn pair_count(&self) -> usize {
        self.pools.len()
    }
}

/// 每種情緒的描述片語
#[derive(Debug, Clone)]
pub struct PhraseBook {
    phrases: HashMap<Emotion, Vec<String>>,
    default_phrases: Vec<String>,
}

impl PhraseBook {
    pub fn new(default_phrases: Vec<String>) -> Self {
        let default_phrases = if default_phrases.is_empty() {
            vec![BUILTIN_DEFAULT_PHRASE.to_string()]
        } else {
            default_phrases
        };
        Self {
            phrases: HashMap::new(),
            default_phrases,
        }
    }

    pub fn with_phrases(mut self, emotion: Emotion, phrases: Vec<String>) -> Self {
        if !phrases.is_empty() {
            self.phrases.insert(emotion, phrases);
        }
        self
    }

    /// 永遠回傳非空清單
    pub fn phrases_for(&self, emotion: Emotion) -> &[String] {
        self.phrases
            .get(&emotion)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_phrases)
    }
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
