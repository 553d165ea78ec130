use crate::utils::error::{LinkError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const LIVENESS_USER_AGENT: &str = "Mozilla/5.0 (compatible; URLChecker/1.0)";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";
pub const YOUTUBE_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// 執行設定，所有欄位皆有預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub probe: ProbeSettings,
    pub enrich: EnrichSettings,
    pub run: RunSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub user_agent: String,
    pub head_timeout_seconds: u64,
    pub get_timeout_seconds: u64,
    /// 每次實際發出探測後的禮貌延遲
    pub delay_ms: u64,
    /// 已判定正常的網域直接視為 Alive
    pub trust_known_good_domains: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            user_agent: LIVENESS_USER_AGENT.to_string(),
            head_timeout_seconds: 10,
            get_timeout_seconds: 10,
            delay_ms: 500,
            trust_known_good_domains: true,
        }
    }
}

impl ProbeSettings {
    pub fn head_timeout(&self) -> Duration {
        Duration::from_secs(self.head_timeout_seconds)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.get_timeout_seconds)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichSettings {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    pub article_timeout_seconds: u64,
    pub oembed_endpoint: String,
    /// 每次替換或抓取詮釋資料後的延遲
    pub delay_ms: u64,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_seconds: 10,
            article_timeout_seconds: 15,
            oembed_endpoint: YOUTUBE_OEMBED_ENDPOINT.to_string(),
            delay_ms: 1000,
        }
    }
}

impl EnrichSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn article_timeout(&self) -> Duration {
        Duration::from_secs(self.article_timeout_seconds)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// 找不到 (emotion, type) 替換清單時的處理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPoolPolicy {
    /// 使用通用的備援網址
    #[default]
    Fallback,
    /// 保留原本的壞連結並記錄警告
    LeaveBroken,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub progress_interval: usize,
    pub missing_pool: MissingPoolPolicy,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            progress_interval: 20,
            missing_pool: MissingPoolPolicy::Fallback,
        }
    }
}

impl ReconcileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LinkError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LinkError::ConfigParse {
            source_name: "settings".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${USER_AGENT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LinkError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 測試用：關閉所有延遲
    pub fn without_delays(mut self) -> Self {
        self.probe.delay_ms = 0;
        self.enrich.delay_ms = 0;
        self
    }
}

impl Validate for ReconcileConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("probe.user_agent", &self.probe.user_agent)?;
        validate_range("probe.head_timeout_seconds", self.probe.head_timeout_seconds, 1, 60)?;
        validate_range("probe.get_timeout_seconds", self.probe.get_timeout_seconds, 1, 60)?;

        validate_non_empty_string("enrich.user_agent", &self.enrich.user_agent)?;
        validate_range("enrich.timeout_seconds", self.enrich.timeout_seconds, 1, 60)?;
        validate_range(
            "enrich.article_timeout_seconds",
            self.enrich.article_timeout_seconds,
            1,
            60,
        )?;
        validate_url("enrich.oembed_endpoint", &self.enrich.oembed_endpoint)?;

        validate_positive_number("run.progress_interval", self.run.progress_interval, 1)?;

        Ok(())
    }
}
