use crate::view_model::FeedView;
use crate::{ArticleSummary, LoadError, PageRequest};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Minimum intersection ratio at which the sentinel counts as visible.
pub const SENTINEL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    pub page_size: u32,
    pub section: Option<String>,
    pub infinite_scroll: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            section: None,
            infinite_scroll: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
    Error,
    Ready,
}

/// Page state for one view. Created when the view mounts and dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    page_size: u32,
    infinite_scroll: bool,
    items: Vec<ArticleSummary>,
    current_page: u32,
    section: Option<String>,
    has_more: bool,
    status: FetchStatus,
    error: Option<LoadError>,
    generation: u64,
    in_flight: Option<PageRequest>,
    reload_pending: bool,
    started: bool,
    active: bool,
    observing_sentinel: bool,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedOptions::default())
    }
}

impl FeedState {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            page_size: options.page_size.max(1),
            infinite_scroll: options.infinite_scroll,
            items: Vec::new(),
            current_page: 0,
            section: options.section,
            has_more: true,
            status: FetchStatus::Idle,
            error: None,
            generation: 0,
            in_flight: None,
            reload_pending: false,
            started: false,
            active: true,
            observing_sentinel: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> FeedView {
        FeedView {
            items: self.items.clone(),
            status: self.status,
            error: self.error.as_ref().map(ToString::to_string),
            has_more: self.has_more,
            current_page: self.current_page,
            section: self.section.clone(),
            sentinel_observed: self.observing_sentinel,
            dirty: self.dirty,
        }
    }

    pub fn items(&self) -> &[ArticleSummary] {
        &self.items
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn in_flight(&self) -> Option<&PageRequest> {
        self.in_flight.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn infinite_scroll(&self) -> bool {
        self.infinite_scroll
    }

    pub(crate) fn observing_sentinel(&self) -> bool {
        self.observing_sentinel
    }

    pub(crate) fn can_load_more(&self) -> bool {
        self.active && self.in_flight.is_none() && self.has_more
    }

    /// Returns `false` if the view was already started or has gone away.
    pub(crate) fn start(&mut self) -> bool {
        if self.started || !self.active {
            return false;
        }
        self.started = true;
        true
    }

    pub(crate) fn start_observing(&mut self) {
        self.observing_sentinel = true;
        self.mark_dirty();
    }

    /// Returns whether an observer was actually running.
    pub(crate) fn deactivate(&mut self) -> bool {
        self.active = false;
        self.reload_pending = false;
        let was_observing = self.observing_sentinel;
        self.observing_sentinel = false;
        self.mark_dirty();
        was_observing
    }

    /// Marks a request as in flight and returns it. Callers check
    /// [`FeedState::in_flight`] first; only one request exists at a time.
    pub(crate) fn begin_request(&mut self, page: u32, append: bool) -> PageRequest {
        let request = PageRequest {
            generation: self.generation,
            page,
            limit: self.page_size,
            section: self.section.clone(),
            append,
        };
        self.status = if append {
            FetchStatus::LoadingMore
        } else {
            FetchStatus::LoadingInitial
        };
        self.error = None;
        self.in_flight = Some(request.clone());
        self.mark_dirty();
        request
    }

    /// Clears the in-flight guard if `request` is the one being waited on.
    pub(crate) fn finish_request(&mut self, request: &PageRequest) -> bool {
        if self.in_flight.as_ref() != Some(request) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub(crate) fn apply_page(&mut self, request: &PageRequest, articles: Vec<ArticleSummary>) {
        self.has_more = articles.len() >= request.limit as usize;
        if request.append {
            self.items.extend(articles);
        } else {
            self.items = articles;
        }
        self.current_page = request.page;
        self.status = FetchStatus::Ready;
        self.mark_dirty();
    }

    /// Records a failed fetch. Items, page and `has_more` are left as they were.
    pub(crate) fn apply_failure(&mut self, error: LoadError) {
        self.error = Some(error);
        self.status = FetchStatus::Error;
        self.mark_dirty();
    }

    /// Starts a new generation under `section` with an empty list.
    pub(crate) fn reset_for_section(&mut self, section: Option<String>) {
        self.section = section;
        self.generation += 1;
        self.items.clear();
        self.current_page = 0;
        self.has_more = true;
        self.error = None;
        self.status = FetchStatus::LoadingInitial;
        self.mark_dirty();
    }

    pub(crate) fn queue_reload(&mut self) {
        self.reload_pending = true;
    }

    pub(crate) fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
