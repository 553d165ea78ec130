use crate::config::toml_config::ProbeSettings;
use crate::core::youtube;
use crate::domain::model::Verdict;
use crate::utils::error::Result;
use reqwest::Client;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainVerdict {
    KnownGood,
    KnownBad,
}

impl From<Verdict> for DomainVerdict {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Alive => DomainVerdict::KnownGood,
            Verdict::Dead => DomainVerdict::KnownBad,
        }
    }
}

/// 單次執行內的網域判定快取，不會持久化
#[derive(Debug, Default)]
pub struct DomainCache {
    verdicts: HashMap<String, DomainVerdict>,
}

impl DomainCache {
    pub fn get(&self, domain: &str) -> Option<DomainVerdict> {
        self.verdicts.get(domain).copied()
    }

    pub fn record(&mut self, domain: String, verdict: Verdict) {
        self.verdicts.insert(domain, verdict.into());
    }

    pub fn clear(&mut self) {
        self.verdicts.clear();
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn is_known_bad(&self, domain: &str) -> bool {
        self.get(domain) == Some(DomainVerdict::KnownBad)
    }
}

/// 網址的 authority（主機加上明確指定的 port）
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeSource {
    Network,
    Cache,
    /// 網址本身無法探測（例如取不到影片 ID）
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub verdict: Verdict,
    pub source: ProbeSource,
}

impl ProbeOutcome {
    fn network(verdict: Verdict) -> Self {
        Self {
            verdict,
            source: ProbeSource::Network,
        }
    }

    fn cached(verdict: Verdict) -> Self {
        Self {
            verdict,
            source: ProbeSource::Cache,
        }
    }

    fn skipped(verdict: Verdict) -> Self {
        Self {
            verdict,
            source: ProbeSource::Skipped,
        }
    }

    /// 是否真的發出了網路請求（呼叫端據此決定是否延遲）
    pub fn hit_network(&self) -> bool {
        self.source == ProbeSource::Network
    }
}

pub struct LivenessChecker {
    client: Client,
    settings: ProbeSettings,
    cache: DomainCache,
}

impl LivenessChecker {
    pub fn new(settings: ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            settings,
            cache: DomainCache::default(),
        })
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    pub fn cache(&self) -> &DomainCache {
        &self.cache
    }

    /// 每次執行開始時清空網域快取
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// 先查網域快取，沒有結論才發出探測，並記錄結果
    pub async fn check(&mut self, url: &str) -> ProbeOutcome {
        let domain = domain_of(url);

        if let Some(domain) = &domain {
            match self.cache.get(domain) {
                Some(DomainVerdict::KnownBad) => {
                    tracing::debug!("Skipping {} (domain {} already failed)", url, domain);
                    return ProbeOutcome::cached(Verdict::Dead);
                }
                Some(DomainVerdict::KnownGood) if self.settings.trust_known_good_domains => {
                    return ProbeOutcome::cached(Verdict::Alive);
                }
                _ => {}
            }
        }

        let verdict = self.probe(url).await;
        if let Some(domain) = domain {
            self.cache.record(domain, verdict);
        }
        ProbeOutcome::network(verdict)
    }

    /// 以 oEmbed 端點判斷影片是否仍可觀看，不使用網域快取
    pub async fn check_video(&self, url: &str, oembed_endpoint: &str) -> ProbeOutcome {
        let Some(video_id) = youtube::extract_video_id(url) else {
            tracing::warn!("No video id in {}", url);
            return ProbeOutcome::skipped(Verdict::Dead);
        };
        let Some(embed_url) = youtube::oembed_url(oembed_endpoint, &video_id) else {
            tracing::warn!("Invalid oEmbed endpoint {}", oembed_endpoint);
            return ProbeOutcome::skipped(Verdict::Dead);
        };
        ProbeOutcome::network(self.probe(&embed_url).await)
    }

    /// HEAD 失敗（>= 400 或連線錯誤）時改用 GET 再試一次
    pub async fn probe(&self, url: &str) -> Verdict {
        match self
            .client
            .head(url)
            .timeout(self.settings.head_timeout())
            .send()
            .await
        {
            Ok(response) if response.status().as_u16() < 400 => return Verdict::Alive,
            Ok(response) => {
                tracing::debug!("HEAD {} returned {}, retrying with GET", url, response.status());
            }
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}, retrying with GET", url, e);
            }
        }

        // 只看狀態碼，不讀取內容
        match self
            .client
            .get(url)
            .timeout(self.settings.get_timeout())
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                drop(response);
                if status.as_u16() < 400 {
                    Verdict::Alive
                } else {
                    tracing::warn!("Error {} for URL: {}", status.as_u16(), url);
                    Verdict::Dead
                }
            }
            Err(e) => {
                tracing::warn!("Error checking URL {}: {}", url, e);
                Verdict::Dead
            }
        }
    }
}
