use std::fmt;
use std::path::PathBuf;

use crate::persist::PersistError;

/// One event on a running deploy stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// A decoded chunk of build output.
    Chunk(String),
    /// The stream terminated; emitted exactly once per request.
    Closed { result: Result<(), StreamError> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub kind: StreamFailureKind,
    pub message: String,
}

impl StreamError {
    pub(crate) fn new(kind: StreamFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
}

impl fmt::Display for StreamFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFailureKind::InvalidUrl => write!(f, "invalid url"),
            StreamFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            StreamFailureKind::Timeout => write!(f, "timeout"),
            StreamFailureKind::Network => write!(f, "network error"),
        }
    }
}

/// What the browser saw after a single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationOutcome {
    pub ok: bool,
    /// Rendered page content, used for the "404 Not Found" marker check.
    pub content: String,
}

/// Terminal state of one capture run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(PathBuf),
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("browser error: {0}")]
    Browser(String),
    #[error("output path has no usable file name: {0}")]
    InvalidOutputPath(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
