use std::path::PathBuf;

use thiserror::Error;

use crate::floor::FloorIndex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate floor index {index} in registry")]
    DuplicateFloorIndex { index: FloorIndex },

    #[error("duplicate floor token {token:?} in registry")]
    DuplicateFloorToken { token: String },

    #[error("floor {index} has an empty token")]
    EmptyFloorToken { index: FloorIndex },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("unknown floor {index}")]
    UnknownFloor { index: FloorIndex },

    #[error("no path available")]
    NoPath,

    #[error("routing unavailable: {message}")]
    RoutingUnavailable { message: String },
}

impl Error {
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn routing_unavailable(message: impl Into<String>) -> Self {
        Self::RoutingUnavailable {
            message: message.into(),
        }
    }

    /// Whether the caller may retry with new endpoints or a later request.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoPath | Self::RoutingUnavailable { .. })
    }
}
