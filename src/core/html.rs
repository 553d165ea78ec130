//! 以正規表達式從 HTML 取出標題與描述，盡力而為，不做完整解析。

use regex::{Captures, Regex};
use std::sync::LazyLock;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").unwrap());
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").unwrap());
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,9});").unwrap()
});

/// 解析後的頁面，只保留 meta 標籤與原始文字
pub struct HtmlPage<'a> {
    source: &'a str,
    metas: Vec<Vec<(String, String)>>,
}

impl<'a> HtmlPage<'a> {
    pub fn parse(source: &'a str) -> Self {
        let metas: Vec<Vec<(String, String)>> = META_TAG
            .find_iter(source)
            .map(|tag| {
                ATTRIBUTE
                    .captures_iter(tag.as_str())
                    .filter_map(|caps| {
                        let name = caps.get(1)?.as_str().to_ascii_lowercase();
                        let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
                        Some((name, decode_entities(value)))
                    })
                    .collect()
            })
            .collect();

        Self { source, metas }
    }

    /// `<meta property="og:title" content="...">` 這類標籤的 content
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.meta_content("property", property)
    }

    /// `<meta name="description" content="...">`
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.meta_content("name", name)
    }

    fn meta_content(&self, key: &str, wanted: &str) -> Option<String> {
        self.metas.iter().find_map(|attributes| {
            let matches = attributes
                .iter()
                .any(|(name, value)| name == key && value.eq_ignore_ascii_case(wanted));
            if !matches {
                return None;
            }
            attributes
                .iter()
                .find(|(name, _)| name == "content")
                .map(|(_, value)| value.trim().to_string())
        })
    }

    pub fn first_heading(&self) -> Option<String> {
        first_text(&H1, self.source)
    }

    pub fn document_title(&self) -> Option<String> {
        first_text(&TITLE, self.source)
    }

    pub fn first_paragraph(&self) -> Option<String> {
        first_text(&PARAGRAPH, self.source)
    }
}

fn first_text(re: &Regex, source: &str) -> Option<String> {
    let inner = re.captures(source)?.get(1)?.as_str();
    Some(element_text(inner))
}

/// 去掉標籤、解碼實體並壓縮空白
pub fn element_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "middot" => '·',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201D}',
        "ldquo" => '\u{201C}',
        "sbquo" => '\u{201A}',
        "bdquo" => '\u{201E}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        "eacute" => 'é',
        "egrave" => 'è',
        "aacute" => 'á',
        "agrave" => 'à',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "uuml" => 'ü',
        "ouml" => 'ö',
        "auml" => 'ä',
        "ccedil" => 'ç',
        _ => return None,
    };
    Some(c)
}

fn numeric_entity(reference: &str) -> Option<char> {
    let code = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => reference.parse().ok()?,
    };
    char::from_u32(code)
}

/// 單次掃描解碼數字實體與常見的具名實體，無法辨識的原樣保留
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let reference = &caps[1];
            let decoded = match reference.strip_prefix('#') {
                Some(number) => numeric_entity(number),
                None => named_entity(reference),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// 依字元（非位元組）截斷
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<!doctype html>
<html><head>
  <title>Coping With Sadness | Example Mind</title>
  <meta charset="utf-8">
  <meta name="description" content="Sadness is a normal emotion. Here is how to cope.">
  <meta content='Coping With Sadness' property='og:title' />
  <meta property="og:description" content="OG description &amp; more">
</head>
<body>
  <h1 class="headline">  Coping <em>With</em>
     Sadness </h1>
  <article><p>First <a href="#">paragraph</a> text.</p><p>Second.</p></article>
</body></html>"##;

    #[test]
    fn test_meta_lookup_is_attribute_order_independent() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.meta_property("og:title").as_deref(), Some("Coping With Sadness"));
        assert_eq!(
            page.meta_property("og:description").as_deref(),
            Some("OG description & more")
        );
        assert_eq!(
            page.meta_name("description").as_deref(),
            Some("Sadness is a normal emotion. Here is how to cope.")
        );
        assert_eq!(page.meta_name("keywords"), None);
    }

    #[test]
    fn test_element_text() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.first_heading().as_deref(), Some("Coping With Sadness"));
        assert_eq!(
            page.document_title().as_deref(),
            Some("Coping With Sadness | Example Mind")
        );
        assert_eq!(page.first_paragraph().as_deref(), Some("First paragraph text."));
    }

    #[test]
    fn test_missing_elements() {
        let page = HtmlPage::parse("<html><body>nothing here</body></html>");
        assert_eq!(page.first_heading(), None);
        assert_eq!(page.document_title(), None);
        assert_eq!(page.meta_property("og:title"), None);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_decodes_numeric_and_named_entities() {
        let page = HtmlPage::parse("<h1>Don&#8217;t Panic &mdash; It&rsquo;s OK&hellip;</h1>");
        assert_eq!(
            page.first_heading().as_deref(),
            Some("Don\u{2019}t Panic \u{2014} It\u{2019}s OK\u{2026}")
        );
        assert_eq!(decode_entities("caf&#xE9; &#39;x&#39;"), "café 'x'");
        assert_eq!(decode_entities("&amp;lt; stays literal"), "&lt; stays literal");
        assert_eq!(decode_entities("&bogus; &#xFFFFFF;"), "&bogus; &#xFFFFFF;");
    }
}
