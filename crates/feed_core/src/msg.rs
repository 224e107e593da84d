use crate::{ArticleSummary, LoadError, PageRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The owning view became active; loads page 1.
    Mounted,
    /// The owning view went away. Late responses are dropped from here on.
    Unmounted,
    /// Explicit page fetch; `append` selects append vs. replace.
    FetchPage { page: u32, append: bool },
    /// Ask for the page after the current one.
    LoadMore,
    /// Replace the server-side section filter and reload from page 1.
    SectionChanged(Option<String>),
    /// Intersection ratio of the trailing sentinel, 0.0 to 1.0.
    SentinelVisibility { ratio: f32 },
    /// Engine result for a previously issued request.
    PageFetched {
        request: PageRequest,
        result: Result<Vec<ArticleSummary>, LoadError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
