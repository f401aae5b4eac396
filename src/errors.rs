use std::path::PathBuf;

use thiserror::Error;

/// Configuration the window arithmetic cannot work with. Raised at
/// construction so nothing downstream divides by zero.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("item height must be a positive number, got {0}")]
    ItemHeight(f64),

    #[error("viewport height must be a non-negative number, got {0}")]
    ViewportHeight(f64),

    #[error("window item count must be greater than zero")]
    WindowItemCount,

    #[error("quarter divisor must be greater than zero")]
    QuarterDivisor,

    #[error("up lookahead factor must be a positive number, got {0}")]
    LookaheadFactor(f64),
}

/// Errors reported by a data source while serving a fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source could not serve the query.
    #[error("data source failed: {0}")]
    Source(String),

    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O error reading `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in `{path}`: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<String> for FetchError {
    fn from(s: String) -> Self {
        FetchError::Source(s)
    }
}

/// Errors surfaced by [`VirtualList`](crate::app::VirtualList) to its host.
#[derive(Error, Debug)]
pub enum VirtualListError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not count rows: {0}")]
    Count(#[source] FetchError),

    /// The fetch for `start..end` failed; the window itself is still valid.
    #[error("fetch for rows {start}..{end} failed: {source}")]
    Fetch {
        start: usize,
        end: usize,
        #[source]
        source: FetchError,
    },
}

/// Errors reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error on settings file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}
