use crate::{ArticleSummary, FetchStatus};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedView {
    pub items: Vec<ArticleSummary>,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub has_more: bool,
    pub current_page: u32,
    pub section: Option<String>,
    pub sentinel_observed: bool,
    pub dirty: bool,
}

impl FeedView {
    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            FetchStatus::LoadingInitial | FetchStatus::LoadingMore
        )
    }
}
