use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&?/]+)",
        r"youtube\.com/watch.*[?&]v=([^&?/]+)",
        r"(?:v=|/)([0-9A-Za-z_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// 從常見的 YouTube 網址格式取出影片 ID
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// oEmbed 查詢網址，例如 `{endpoint}?url=https://www.youtube.com/watch?v=ID&format=json`
pub fn oembed_url(endpoint: &str, video_id: &str) -> Option<String> {
    Url::parse_with_params(endpoint, &[("url", watch_url(video_id).as_str()), ("format", "json")])
        .ok()
        .map(String::from)
}

pub fn is_youtube_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .map(|host| host.contains("youtube.com") || host.contains("youtu.be"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_from_known_shapes() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=ZbZSe6N_BXs").as_deref(),
            Some("ZbZSe6N_BXs")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/2Vv-BfVoq4g?t=10").as_deref(),
            Some("2Vv-BfVoq4g")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/lJJT00wqlOo").as_deref(),
            Some("lJJT00wqlOo")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=uCD-qMfBWDM")
                .as_deref(),
            Some("uCD-qMfBWDM")
        );
    }

    #[test]
    fn test_extract_video_id_no_match() {
        assert_eq!(extract_video_id("https://example.com/"), None);
        assert_eq!(extract_video_id("not a url"), None);
    }

    #[test]
    fn test_oembed_url_encodes_inner_url() {
        let url = oembed_url("https://www.youtube.com/oembed", "ZbZSe6N_BXs").unwrap();
        assert_eq!(
            url,
            "https://www.youtube.com/oembed?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DZbZSe6N_BXs&format=json"
        );
        assert!(oembed_url("nonsense", "x").is_none());
    }

    #[test]
    fn test_is_youtube_host() {
        assert!(is_youtube_host("https://www.youtube.com/watch?v=ZbZSe6N_BXs"));
        assert!(is_youtube_host("https://youtu.be/ZbZSe6N_BXs"));
        assert!(!is_youtube_host("https://open.spotify.com/track/x"));
    }

    #[test]
    fn test_all_video_id_patterns_compile() {
        assert_eq!(VIDEO_ID_PATTERNS.len(), 3);
    }
}
