use std::fmt;

use feed_core::{ArticleSummary, LoadError, LoadErrorKind, PageRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PageFetched {
        request: PageRequest,
        result: Result<Vec<ArticleSummary>, FetchError>,
    },
    ArticleFetched {
        key: String,
        result: Result<Option<ArticleSummary>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnexpectedContentType { content_type: Option<String> },
    /// Valid JSON, but neither a list of articles nor a wrapped one.
    UnexpectedShape,
    MalformedJson,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnexpectedContentType {
                content_type: Some(content_type),
            } => write!(f, "unexpected content type {content_type}"),
            FailureKind::UnexpectedContentType { content_type: None } => {
                write!(f, "missing content type")
            }
            FailureKind::UnexpectedShape => write!(f, "unexpected response shape"),
            FailureKind::MalformedJson => write!(f, "malformed json"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Folds the engine's failure detail into the three kinds the feed shows.
impl From<FetchError> for LoadError {
    fn from(err: FetchError) -> Self {
        let kind = match err.kind {
            FailureKind::HttpStatus(status) => LoadErrorKind::Http(status),
            FailureKind::UnexpectedContentType { .. } | FailureKind::UnexpectedShape => {
                LoadErrorKind::UnexpectedContentType
            }
            FailureKind::InvalidUrl
            | FailureKind::Timeout
            | FailureKind::TooLarge { .. }
            | FailureKind::MalformedJson
            | FailureKind::Network => LoadErrorKind::Network,
        };
        LoadError::new(kind, err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_fold_into_load_error_kinds() {
        let cases = [
            (FailureKind::HttpStatus(502), LoadErrorKind::Http(502)),
            (FailureKind::Timeout, LoadErrorKind::Network),
            (FailureKind::MalformedJson, LoadErrorKind::Network),
            (
                FailureKind::UnexpectedContentType {
                    content_type: Some("text/html".to_string()),
                },
                LoadErrorKind::UnexpectedContentType,
            ),
            (FailureKind::UnexpectedShape, LoadErrorKind::UnexpectedContentType),
        ];

        for (kind, expected) in cases {
            let load: LoadError = FetchError::new(kind, "boom").into();
            assert_eq!(load.kind, expected);
            assert_eq!(load.message, "boom");
        }
    }
}
