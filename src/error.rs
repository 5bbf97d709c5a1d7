//! Error types for the digest pipeline.
//!
//! Every error is terminal. The binary prints the chain once and exits nonzero.

/// Longest payload excerpt carried in a diagnostic.
const EXCERPT_LEN: usize = 256;

/// Coarse classification used for the final diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    Config,
    Fetch,
    Decode,
    Shape,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("story count must be between {min} and {max}, got {got}")]
    CountOutOfRange {
        got: String,
        min: usize,
        max: usize,
    },

    #[error("story count must be a number, got {0:?}")]
    CountNotNumeric(String),

    #[error("{key} must be a positive integer, got {value:?}")]
    NotPositive { key: &'static str, value: String },

    #[error("{key} must contain an {{id}} placeholder, got {value:?}")]
    MissingIdPlaceholder { key: &'static str, value: String },
}

impl ConfigError {
    pub(crate) fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("failed to initialize the http client")]
    ClientInit(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} exceeds the {limit} byte limit")]
    ResponseTooLarge { url: String, limit: usize },
}

/// Malformed JSON, with the position serde_json reported and a slice of the payload.
#[derive(Debug, thiserror::Error)]
#[error("{message}:\n{excerpt}")]
pub(crate) struct DecodeError {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) excerpt: String,
}

impl DecodeError {
    pub(crate) fn new(err: &serde_json::Error, payload: &[u8]) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
            excerpt: excerpt(payload),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    #[error("could not retrieve top stories")]
    ListFetch {
        #[source]
        source: FetchError,
    },

    #[error("failed to parse top stories from {url}")]
    ListParse {
        url: String,
        #[source]
        source: DecodeError,
    },

    #[error("unexpected top stories document from {url}: {reason}:\n{excerpt}")]
    ListShape {
        url: String,
        reason: String,
        excerpt: String,
    },

    #[error("could not retrieve story {id}")]
    ItemFetch {
        id: i64,
        #[source]
        source: FetchError,
    },

    #[error("failed to parse story {id} from {url}")]
    ItemParse {
        id: i64,
        url: String,
        #[source]
        source: DecodeError,
    },

    #[error("story {id} from {url} is not a json object:\n{excerpt}")]
    ItemShape {
        id: i64,
        url: String,
        excerpt: String,
    },
}

impl PipelineError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::ListFetch { .. } | PipelineError::ItemFetch { .. } => ErrorKind::Fetch,
            PipelineError::ListParse { .. } | PipelineError::ItemParse { .. } => {
                ErrorKind::Decode
            }
            PipelineError::ListShape { .. } | PipelineError::ItemShape { .. } => ErrorKind::Shape,
        }
    }
}

/// Lossy, truncated view of a response body for diagnostics.
pub(crate) fn excerpt(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}
