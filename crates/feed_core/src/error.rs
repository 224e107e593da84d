use std::fmt;

/// Why a page could not be loaded, as shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Network, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Transport failure, timeout, or a body that is not valid JSON.
    Network,
    /// Non-2xx status.
    Http(u16),
    /// Non-JSON content type, or JSON of neither accepted shape. Points at a
    /// misconfigured endpoint rather than a transient fault.
    UnexpectedContentType,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::Network => write!(f, "network error"),
            LoadErrorKind::Http(status) => write!(f, "http error (status {status})"),
            LoadErrorKind::UnexpectedContentType => write!(f, "unexpected content type"),
        }
    }
}
