use feed_core::curate::{by_category, search, truncate, DEFAULT_SEARCH_LIMIT};
use feed_core::{ArticleSummary, FeedView, FetchStatus};

const SUMMARY_LEN: usize = 120;
const UNTITLED: &str = "(untitled)";

/// Client-side narrowing applied to the fetched list before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

pub fn render(view: &FeedView, filter: &ListFilter) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "== {} | page {} | {} articles ==",
        view.section.as_deref().unwrap_or("all sections"),
        view.current_page,
        view.items.len()
    ));

    let mut visible = by_category(&view.items, filter.category.as_deref());
    if let Some(query) = filter.search.as_deref() {
        visible = search(visible, query, DEFAULT_SEARCH_LIMIT);
    }

    for (index, article) in visible.iter().enumerate() {
        lines.extend(render_row(index + 1, article));
    }

    match view.status {
        FetchStatus::Idle => {}
        FetchStatus::LoadingInitial => lines.push("Loading articles...".to_string()),
        FetchStatus::LoadingMore => lines.push("Loading more...".to_string()),
        FetchStatus::Error => lines.push(format!(
            "Error: {}",
            view.error.as_deref().unwrap_or("failed to fetch articles")
        )),
        FetchStatus::Ready if view.items.is_empty() => {
            lines.push("No articles found.".to_string())
        }
        FetchStatus::Ready if !view.has_more => lines.push("(end of feed)".to_string()),
        FetchStatus::Ready => {}
    }
    lines
}

pub fn render_article(article: &ArticleSummary) -> Vec<String> {
    let mut lines = vec![
        format!("# {}", article.title().unwrap_or(UNTITLED)),
        format!("id: {}  route: /article/{}", article.id, article.route_key()),
    ];
    if let Some(section) = article.section() {
        lines.push(format!("section: {section}"));
    }
    if article.flag("is_live") {
        lines.push("LIVE".to_string());
    }
    if let Some(summary) = article.summary() {
        lines.push(String::new());
        lines.push(summary.to_string());
    }
    if let Some(content) = article.str_field("content") {
        lines.push(String::new());
        lines.push(content.to_string());
    }
    lines
}

fn render_row(position: usize, article: &ArticleSummary) -> Vec<String> {
    let section = article
        .section()
        .map(|section| format!("[{section}] "))
        .unwrap_or_default();
    let mut lines = vec![format!(
        "{position:>3}. {section}{}",
        article.title().unwrap_or(UNTITLED)
    )];
    if let Some(summary) = article.summary() {
        lines.push(format!("     {}", truncate(summary, SUMMARY_LEN)));
    }
    lines
}
