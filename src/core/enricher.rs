use crate::config::tables::{PhraseBook, ReplacementPools};
use crate::config::toml_config::EnrichSettings;
use crate::core::describe::{compose_description, RawMetadata};
use crate::core::html::{truncate_chars, HtmlPage};
use crate::core::youtube;
use crate::domain::model::{ContentType, Emotion, Metadata};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const ARTICLE_TITLE_LIMIT: usize = 100;
const ARTICLE_DESCRIPTION_LIMIT: usize = 200;
const ARTIST_SEPARATOR: char = '·';

/// 某種內容類型的詮釋資料來源。失敗一律回傳 None，不丟錯。
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn accepts(&self, url: &str) -> bool;
    async fn fetch(&self, url: &str) -> Option<RawMetadata>;
}

fn host_contains(url: &str, needle: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .map(|host| host.contains(needle))
        .unwrap_or(false)
}

/// 以 GET 取得頁面內容，只接受 200
async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> Option<String> {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Error getting metadata for {}: {}", url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!("Metadata request to {} returned {}", url, response.status());
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!("Error reading page {}: {}", url, e);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
}

/// YouTube oEmbed 端點
pub struct OEmbedVideoSource {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl OEmbedVideoSource {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MetadataSource for OEmbedVideoSource {
    fn name(&self) -> &'static str {
        "oembed"
    }

    fn accepts(&self, url: &str) -> bool {
        youtube::is_youtube_host(url)
    }

    async fn fetch(&self, url: &str) -> Option<RawMetadata> {
        let video_id = youtube::extract_video_id(url)?;
        let embed_url = youtube::oembed_url(&self.endpoint, &video_id)?;

        let response = match self.client.get(&embed_url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Error getting video metadata for {}: {}", url, e);
                return None;
            }
        };
        if response.status() != StatusCode::OK {
            tracing::debug!("oEmbed for {} returned {}", url, response.status());
            return None;
        }

        let data: OEmbedResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Invalid oEmbed response for {}: {}", url, e);
                return None;
            }
        };

        Some(RawMetadata {
            title: data.title.unwrap_or_default(),
            creator: data.author_name,
            summary: None,
        })
    }
}

/// 歌曲頁面的 og:title / og:description
pub struct SongPageSource {
    client: Client,
    timeout: Duration,
}

impl SongPageSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

/// og:description 形如 "Artist · Song · 2013"，取分隔符前的部分
pub fn artist_from_description(description: &str) -> Option<String> {
    if !description.contains(ARTIST_SEPARATOR) {
        return None;
    }
    description
        .split(ARTIST_SEPARATOR)
        .next()
        .map(str::trim)
        .filter(|artist| !artist.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MetadataSource for SongPageSource {
    fn name(&self) -> &'static str {
        "song-page"
    }

    fn accepts(&self, url: &str) -> bool {
        host_contains(url, "spotify.com")
    }

    async fn fetch(&self, url: &str) -> Option<RawMetadata> {
        let body = fetch_page(&self.client, url, self.timeout).await?;
        let page = HtmlPage::parse(&body);

        let title = page.meta_property("og:title")?;
        let creator = page
            .meta_property("og:description")
            .and_then(|description| artist_from_description(&description));

        Some(RawMetadata {
            title,
            creator,
            summary: None,
        })
    }
}

/// 一般文章頁面
pub struct ArticlePageSource {
    client: Client,
    timeout: Duration,
}

impl ArticlePageSource {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

/// 依優先順序找標題與描述
pub fn article_metadata(page: &HtmlPage<'_>) -> Option<RawMetadata> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let title = non_empty(page.first_heading())
        .or_else(|| non_empty(page.meta_property("og:title")))
        .or_else(|| non_empty(page.document_title()))?;

    let description = non_empty(page.meta_name("description"))
        .or_else(|| non_empty(page.meta_property("og:description")))
        .or_else(|| non_empty(page.first_paragraph()));

    Some(RawMetadata {
        title: truncate_chars(&title, ARTICLE_TITLE_LIMIT),
        creator: None,
        summary: description.map(|d| truncate_chars(&d, ARTICLE_DESCRIPTION_LIMIT)),
    })
}

#[async_trait]
impl MetadataSource for ArticlePageSource {
    fn name(&self) -> &'static str {
        "article-page"
    }

    fn accepts(&self, _url: &str) -> bool {
        true
    }

    async fn fetch(&self, url: &str) -> Option<RawMetadata> {
        let body = fetch_page(&self.client, url, self.timeout).await?;
        article_metadata(&HtmlPage::parse(&body))
    }
}

/// 依內容類型取得標題並組出描述
pub struct MetadataEnricher {
    video: Box<dyn MetadataSource>,
    song: Box<dyn MetadataSource>,
    article: Box<dyn MetadataSource>,
    pools: Arc<ReplacementPools>,
    phrases: Arc<PhraseBook>,
}

impl MetadataEnricher {
    pub fn new(
        settings: &EnrichSettings,
        pools: Arc<ReplacementPools>,
        phrases: Arc<PhraseBook>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&settings.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        if let Ok(value) = HeaderValue::from_str(&settings.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self::with_sources(
            Box::new(OEmbedVideoSource::new(
                client.clone(),
                settings.oembed_endpoint.clone(),
                settings.timeout(),
            )),
            Box::new(SongPageSource::new(client.clone(), settings.timeout())),
            Box::new(ArticlePageSource::new(client, settings.article_timeout())),
            pools,
            phrases,
        ))
    }

    pub fn with_sources(
        video: Box<dyn MetadataSource>,
        song: Box<dyn MetadataSource>,
        article: Box<dyn MetadataSource>,
        pools: Arc<ReplacementPools>,
        phrases: Arc<PhraseBook>,
    ) -> Self {
        Self {
            video,
            song,
            article,
            pools,
            phrases,
        }
    }

    fn source_for(&self, content_type: ContentType) -> Option<&dyn MetadataSource> {
        match content_type {
            ContentType::Video => Some(self.video.as_ref()),
            ContentType::Song => Some(self.song.as_ref()),
            ContentType::Article => Some(self.article.as_ref()),
            ContentType::Quote => None,
        }
    }

    /// 盡力取得詮釋資料；沒有結果時回傳 None，呼叫端保留原值
    pub async fn enrich(
        &self,
        url: &str,
        content_type: ContentType,
        emotion: Emotion,
    ) -> Option<Metadata> {
        let source = self.source_for(content_type)?;

        let fetched = if source.accepts(url) {
            source.fetch(url).await
        } else {
            tracing::debug!("{} does not handle {}", source.name(), url);
            None
        };

        match fetched {
            Some(raw) if !raw.title.trim().is_empty() => Some(Metadata {
                description: compose_description(&self.phrases, &raw, emotion, content_type),
                title: raw.title,
            }),
            _ => self.curated(url, content_type, emotion),
        }
    }

    /// 替換清單中人工整理的標題與描述
    fn curated(&self, url: &str, content_type: ContentType, emotion: Emotion) -> Option<Metadata> {
        let candidate = self.pools.curated(url)?;
        let title = candidate.title.clone()?;
        let description = match &candidate.description {
            Some(description) => description.clone(),
            None => compose_description(
                &self.phrases,
                &RawMetadata::titled(title.clone()),
                emotion,
                content_type,
            ),
        };
        tracing::debug!("Using curated metadata for {}", url);
        Some(Metadata { title, description })
    }
}
