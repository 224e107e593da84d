use anyhow::{bail, Context};
use feed_core::{update, FeedState, FeedView, Msg};
use feed_engine::{EngineEvent, EngineHandle};
use feed_logging::{feed_info, feed_warn};

use crate::cli::ListArgs;
use crate::config::FeedConfig;
use crate::effects::EffectRunner;
use crate::render::{render, render_article, ListFilter};

/// One mounted article list: the state machine plus the runner that carries
/// out its effects.
struct ListSession {
    state: FeedState,
    runner: EffectRunner,
    filter: ListFilter,
}

impl ListSession {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = view_to_print(&mut state);
        self.state = state;
        self.runner.run(effects);
        if let Some(view) = view {
            for line in render(&view, &self.filter) {
                println!("{line}");
            }
        }
    }

    fn settled(&self) -> bool {
        self.state.in_flight().is_none()
    }
}

/// The view worth printing after an update, if any. Loading markers only
/// matter to an interactive view, and an unmounted list has already been
/// printed.
fn view_to_print(state: &mut FeedState) -> Option<FeedView> {
    if !state.consume_dirty() || !state.is_active() {
        return None;
    }
    let view = state.view();
    (!view.is_loading()).then_some(view)
}

pub fn run_list(config: &FeedConfig, args: &ListArgs) -> anyhow::Result<()> {
    let engine = EngineHandle::new(config.fetch_settings()).context("starting engine")?;
    let mut session = ListSession {
        state: FeedState::new(config.feed_options()),
        runner: EffectRunner::new(engine),
        filter: ListFilter {
            category: args.category.clone(),
            search: args.search.clone(),
        },
    };
    let deadline = config.response_deadline();
    let mut scrolls_left = args.scroll;

    session.dispatch(Msg::Mounted);
    loop {
        while !session.settled() {
            match session.runner.next_msg(deadline) {
                Some(msg) => session.dispatch(msg),
                None => {
                    feed_warn!("no response within {:?}; giving up", deadline);
                    session.dispatch(Msg::Unmounted);
                    bail!("article API did not answer within {:?}", deadline);
                }
            }
        }

        if scrolls_left == 0 || !session.state.has_more() || session.state.error().is_some() {
            break;
        }
        scrolls_left -= 1;

        if session.runner.sentinel_observed() {
            // Scroll the sentinel out of view and back in.
            session.dispatch(Msg::SentinelVisibility { ratio: 0.0 });
            session.dispatch(Msg::SentinelVisibility { ratio: 1.0 });
        } else {
            session.dispatch(Msg::LoadMore);
        }
    }

    session.dispatch(Msg::Unmounted);
    feed_info!(
        "list finished with {} articles over {} pages",
        session.state.items().len(),
        session.state.current_page()
    );
    Ok(())
}

pub fn run_show(config: &FeedConfig, key: &str) -> anyhow::Result<()> {
    let engine = EngineHandle::new(config.fetch_settings()).context("starting engine")?;
    engine.fetch_article(key);

    let deadline = config.response_deadline();
    // The slug fallback may take a second round trip.
    match engine.recv_timeout(deadline * 2) {
        Some(EngineEvent::ArticleFetched { result, .. }) => match result? {
            Some(article) => {
                for line in render_article(&article) {
                    println!("{line}");
                }
                Ok(())
            }
            None => bail!("article {key:?} not found"),
        },
        Some(EngineEvent::PageFetched { .. }) => bail!("unexpected page result"),
        None => bail!("article API did not answer within {:?}", deadline * 2),
    }
}
