//! Core error types for flames-core.
//!
//! Startup document loading is the only fallible path that matters to the
//! stage machine. Audio, prefetch and FX failures have their own small error
//! types so capability implementations can report them, but the core only
//! logs and drops them.

use thiserror::Error;

/// Core error type for flames-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Startup document loading failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Document validation problems
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors raised while fetching or parsing the two startup documents.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading a document from the local asset directory failed
    #[error("Failed to read {document}: {source}")]
    Read {
        document: String,
        #[source]
        source: std::io::Error,
    },

    /// Fetching a document over HTTP failed
    #[error("Failed to fetch {document}: {source}")]
    Fetch {
        document: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Failed to fetch {document}: HTTP {status}")]
    Status { document: String, status: u16 },

    /// The document is not valid JSON for its schema
    #[error("Failed to parse {document}: {source}")]
    Parse {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// The asset root could not be turned into a document URL
    #[error("Invalid asset location '{location}': {message}")]
    InvalidSource { location: String, message: String },
}

/// Errors reported by an audio surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Playback was refused (e.g. no user gesture, muted output)
    #[error("Playback blocked: {0}")]
    Blocked(String),

    /// The sound resource is missing or unreadable
    #[error("Sound unavailable: {0}")]
    Unavailable(String),
}

/// Errors reported by a particle renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// The renderer could not place a particle
    #[error("Particle spawn failed: {0}")]
    SpawnFailed(String),
}

/// Problems found in a question bank. These never stop the quiz from running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A question with fewer than two answer options
    #[error("{pool}[{index}] has {count} option(s); at least 2 expected")]
    TooFewOptions {
        pool: String,
        index: usize,
        count: usize,
    },

    /// `correctIndex` does not point into `options`
    #[error("{pool}[{index}] correctIndex {correct_index} out of bounds (options: {len})")]
    CorrectIndexOutOfBounds {
        pool: String,
        index: usize,
        correct_index: usize,
        len: usize,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
