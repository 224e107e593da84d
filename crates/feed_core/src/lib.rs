//! Feed core: pure paging state machine and view-model helpers.
mod article;
pub mod curate;
mod effect;
mod error;
mod msg;
mod state;
mod update;
mod view_model;

pub use article::{ArticleId, ArticleSummary};
pub use effect::{Effect, PageRequest};
pub use error::{LoadError, LoadErrorKind};
pub use msg::Msg;
pub use state::{FeedOptions, FeedState, FetchStatus, DEFAULT_PAGE_SIZE, SENTINEL_THRESHOLD};
pub use update::update;
pub use view_model::FeedView;
