use crate::config::tables::PhraseBook;
use crate::domain::model::{ContentType, Emotion};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// 從遠端抓到、尚未組成描述的原始資料
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: String,
    /// 影片作者或歌曲歌手
    pub creator: Option<String>,
    /// 文章摘要
    pub summary: Option<String>,
}

impl RawMetadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// 依標題挑選片語；只需在同一行程內穩定
pub fn phrase_index(title: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    (hasher.finish() % len as u64) as usize
}

pub fn choose_phrase<'a>(book: &'a PhraseBook, emotion: Emotion, title: &str) -> &'a str {
    let phrases = book.phrases_for(emotion);
    phrases
        .get(phrase_index(title, phrases.len()))
        .map(String::as_str)
        .unwrap_or_default()
}

/// 組出帶有情緒色彩的描述
pub fn compose_description(
    book: &PhraseBook,
    raw: &RawMetadata,
    emotion: Emotion,
    content_type: ContentType,
) -> String {
    let phrase = choose_phrase(book, emotion, &raw.title);
    let creator = raw.creator.as_deref().filter(|c| !c.is_empty());

    match content_type {
        ContentType::Video => match creator {
            Some(author) => format!(
                "{} by {} - This video {} and is perfect for when you're feeling {}.",
                raw.title, author, phrase, emotion
            ),
            None => format!(
                "{} - This video {} and is perfect for when you're feeling {}.",
                raw.title, phrase, emotion
            ),
        },
        ContentType::Song => match creator {
            Some(artist) => format!(
                "{} by {} - This song {} and resonates with your {} mood.",
                raw.title, artist, phrase, emotion
            ),
            None => format!(
                "{} - This music {} and resonates with your {} mood.",
                raw.title, phrase, emotion
            ),
        },
        ContentType::Article => match raw.summary.as_deref().filter(|s| !s.is_empty()) {
            Some(summary) => format!(
                "{}. This article {} when you're feeling {}.",
                first_sentence(summary),
                phrase,
                emotion
            ),
            None => format!(
                "An insightful article that {} when you're feeling {}.",
                phrase, emotion
            ),
        },
        ContentType::Quote => format!("Content that {} when you're feeling {}.", phrase, emotion),
    }
}

fn first_sentence(text: &str) -> &str {
    text.split('.').next().unwrap_or(text)
}
