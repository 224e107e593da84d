use crate::{ArticleSummary, Effect, FeedState, LoadError, Msg, PageRequest, SENTINEL_THRESHOLD};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if !state.start() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if state.infinite_scroll() {
                state.start_observing();
                effects.push(Effect::ObserveSentinel);
            }
            effects.extend(fetch_page(&mut state, 1, false));
            effects
        }
        Msg::Unmounted => {
            if !state.is_active() {
                return (state, Vec::new());
            }
            if state.deactivate() {
                vec![Effect::DisconnectSentinel]
            } else {
                Vec::new()
            }
        }
        Msg::FetchPage { page, append } => fetch_page(&mut state, page.max(1), append),
        Msg::LoadMore => load_more(&mut state),
        Msg::SectionChanged(section) => {
            if !state.is_active() {
                return (state, Vec::new());
            }
            state.reset_for_section(section);
            if state.in_flight().is_some() {
                // The running request now belongs to an old generation; page 1
                // goes out once its response has been dropped.
                state.queue_reload();
                Vec::new()
            } else {
                fetch_page(&mut state, 1, false)
            }
        }
        Msg::SentinelVisibility { ratio } => {
            let visible_enough = ratio >= SENTINEL_THRESHOLD;
            if !state.observing_sentinel() || !visible_enough {
                return (state, Vec::new());
            }
            load_more(&mut state)
        }
        Msg::PageFetched { request, result } => apply_response(&mut state, request, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_page(state: &mut FeedState, page: u32, append: bool) -> Vec<Effect> {
    if !state.is_active() || state.in_flight().is_some() {
        return Vec::new();
    }
    vec![Effect::FetchPage(state.begin_request(page, append))]
}

fn load_more(state: &mut FeedState) -> Vec<Effect> {
    if !state.can_load_more() {
        return Vec::new();
    }
    let next_page = state.current_page() + 1;
    fetch_page(state, next_page, true)
}

fn apply_response(
    state: &mut FeedState,
    request: PageRequest,
    result: Result<Vec<ArticleSummary>, LoadError>,
) -> Vec<Effect> {
    if !state.finish_request(&request) {
        return Vec::new();
    }
    if !state.is_active() {
        return Vec::new();
    }
    if request.generation != state.generation() {
        return if state.take_reload() {
            fetch_page(state, 1, false)
        } else {
            Vec::new()
        };
    }

    match result {
        Ok(articles) => state.apply_page(&request, articles),
        Err(error) => state.apply_failure(error),
    }
    Vec::new()
}
