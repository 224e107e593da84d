use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use feed_core::PageRequest;
use feed_logging::feed_debug;

use crate::fetch::{ArticleSource, FetchSettings, ReqwestArticleSource};
use crate::{EngineEvent, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchPage(PageRequest),
    FetchArticle(String),
}

/// Runs article requests on a background runtime and hands results back
/// through a channel, so the UI thread never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let source = ReqwestArticleSource::new(settings)?;
        Self::with_source(Arc::new(source))
    }

    pub fn with_source(source: Arc<dyn ArticleSource>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
            feed_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, request: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage(request));
    }

    pub fn fetch_article(&self, key: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchArticle(key.into()));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn ArticleSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage(request) => {
            let result = source.fetch_page(&request).await;
            EngineEvent::PageFetched { request, result }
        }
        EngineCommand::FetchArticle(key) => {
            let result = source.fetch_article(&key).await;
            EngineEvent::ArticleFetched { key, result }
        }
    };
    let _ = event_tx.send(event);
}
