//! Client-side selections over an already-fetched article list.
//!
//! Homepage sections pick their articles from the same list: a flag on the
//! article opts it into a placement, and each placement has a fallback for
//! lists where nobody set the flag.
use serde_json::Value;

use crate::ArticleSummary;

/// Maximum number of results returned by [`search`] when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

const HOME_CATEGORY: &str = "Home";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Trending,
    Hot,
    VideoSpotlight,
    AudioPick,
}

impl Placement {
    pub fn flag(self) -> &'static str {
        match self {
            Placement::Trending => "isTrending",
            Placement::Hot => "isHot",
            Placement::VideoSpotlight => "isVideoSpotlight",
            Placement::AudioPick => "isAudioPick",
        }
    }

    pub fn limit(self) -> usize {
        match self {
            Placement::Trending => 6,
            Placement::Hot => 5,
            Placement::VideoSpotlight => 3,
            Placement::AudioPick => 8,
        }
    }
}

/// Articles for `placement`: flagged ones first, otherwise the fallback rule.
pub fn pick(items: &[ArticleSummary], placement: Placement) -> Vec<&ArticleSummary> {
    let limit = placement.limit();
    let flagged: Vec<_> = items
        .iter()
        .filter(|article| article.flag(placement.flag()))
        .take(limit)
        .collect();
    if !flagged.is_empty() {
        return flagged;
    }

    match placement {
        Placement::Trending | Placement::AudioPick => items.iter().take(limit).collect(),
        Placement::Hot => by_section(items, "news2")
            .into_iter()
            .chain(by_section(items, "news3"))
            .take(limit)
            .collect(),
        Placement::VideoSpotlight => items
            .iter()
            .filter(|article| has_video_sublink(article))
            .take(limit)
            .collect(),
    }
}

pub fn by_section<'a>(items: &'a [ArticleSummary], section: &str) -> Vec<&'a ArticleSummary> {
    items
        .iter()
        .filter(|article| article.section() == Some(section))
        .collect()
}

/// `None` and the home category select everything.
pub fn by_category<'a>(
    items: &'a [ArticleSummary],
    category: Option<&str>,
) -> Vec<&'a ArticleSummary> {
    match category {
        None | Some(HOME_CATEGORY) => items.iter().collect(),
        Some(category) => items
            .iter()
            .filter(|article| article.category() == Some(category))
            .collect(),
    }
}

/// Case-insensitive substring match on title or summary. A blank query
/// matches nothing; otherwise the query is matched as typed, spaces included.
pub fn search<'a, I>(items: I, query: &str, limit: usize) -> Vec<&'a ArticleSummary>
where
    I: IntoIterator<Item = &'a ArticleSummary>,
{
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let matches = |text: Option<&str>| {
        text.map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    items
        .into_iter()
        .filter(|article| matches(article.title()) || matches(article.summary()))
        .take(limit)
        .collect()
}

/// Shortens `text` to `len` characters and marks the cut with an ellipsis.
pub fn truncate(text: &str, len: usize) -> String {
    if text.chars().count() <= len {
        return text.to_string();
    }
    let cut: String = text.chars().take(len).collect();
    format!("{}…", cut.trim())
}

fn has_video_sublink(article: &ArticleSummary) -> bool {
    article
        .fields
        .get("subLinks")
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .any(|link| link.get("isVideo").and_then(Value::as_bool) == Some(true))
        })
        .unwrap_or(false)
}
