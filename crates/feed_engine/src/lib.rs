//! Feed engine: article API client and background request execution.
mod engine;
mod fetch;
mod normalize;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{ArticleSource, FetchSettings, ReqwestArticleSource, DEFAULT_BASE_URL};
pub use normalize::{normalize_article, normalize_page};
pub use types::{EngineEvent, FailureKind, FetchError};
