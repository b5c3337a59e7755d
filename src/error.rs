use thiserror::Error;

/// Errors raised by the host: files, config, logging and the event source
#[derive(Error, Debug)]
pub enum DingError {
    #[error("Failed to read/write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to set up logging: {0}")]
    Logging(String),

    #[error("Terminal event source closed")]
    EventSourceClosed,
}

pub type Result<T, E = DingError> = std::result::Result<T, E>;
