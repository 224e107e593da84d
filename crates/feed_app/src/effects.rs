use std::time::Duration;

use feed_core::{Effect, LoadError, Msg};
use feed_engine::{EngineEvent, EngineHandle};
use feed_logging::{feed_debug, feed_info, feed_warn};

/// Carries core effects out against the engine and turns engine events back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    sentinel_observed: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            sentinel_observed: false,
        }
    }

    pub fn sentinel_observed(&self) -> bool {
        self.sentinel_observed
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    feed_info!(
                        "FetchPage page={} limit={} section={:?} append={} generation={}",
                        request.page,
                        request.limit,
                        request.section,
                        request.append,
                        request.generation
                    );
                    self.engine.fetch_page(request);
                }
                Effect::ObserveSentinel => {
                    feed_debug!("sentinel observer attached");
                    self.sentinel_observed = true;
                }
                Effect::DisconnectSentinel => {
                    feed_debug!("sentinel observer disconnected");
                    self.sentinel_observed = false;
                }
            }
        }
    }

    /// Waits up to `timeout` for the next page result.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        match self.engine.recv_timeout(timeout)? {
            EngineEvent::PageFetched { request, result } => {
                if let Err(err) = &result {
                    feed_warn!("page {} failed: {}", request.page, err);
                }
                Some(Msg::PageFetched {
                    request,
                    result: result.map_err(LoadError::from),
                })
            }
            EngineEvent::ArticleFetched { key, .. } => {
                feed_warn!("unexpected article result for {} while paging", key);
                Some(Msg::NoOp)
            }
        }
    }
}
