use thiserror::Error;

use crate::feed::FeedError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Data format error: {0}")]
    DataFormatError(String),

    /// A visualization references a symbol with no known trading pair.
    #[error("Paire introuvable pour {0}")]
    MissingPair(String),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Text shown inline in a widget. Configuration problems are not retried automatically.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::MissingPair(_) => self.to_string(),
            EngineError::Feed(feed) => feed.user_message(),
            other => {
                tracing::debug!(error = ?other, "Mapping engine error to user message");
                "Erreur de chargement".to_string()
            }
        }
    }
}
