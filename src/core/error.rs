use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsdeckError {
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("cache key collision for domain '{domain}': stored params {stored}, requested {requested}")]
    CacheKeyCollision {
        domain: &'static str,
        stored: String,
        requested: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("channel '{0}' not present in series bundle")]
    ChannelNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("async task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("channel send error")]
    ChannelSend,
}

/// Result type alias for opsdeck operations.
pub type Result<T> = std::result::Result<T, OpsdeckError>;

impl OpsdeckError {
    /// Creates a new invalid-parameter error.
    pub fn invalid_parameter<S: Into<String>>(name: &'static str, message: S) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new render error.
    pub fn render<S: Into<String>>(msg: S) -> Self {
        Self::Render(msg.into())
    }

    /// Returns true if this error is recoverable.
    ///
    /// A cache key collision is an integrity error: the key derivation is
    /// broken at construction time and retrying cannot fix it.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Render(_) | Self::ChannelSend => true,
            Self::CacheKeyCollision { .. } => false,
            _ => false,
        }
    }

    /// Returns the error category for metrics/logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "validation",
            Self::CacheKeyCollision { .. } => "integrity",
            Self::Config(_) => "config",
            Self::Render(_) => "render",
            Self::ChannelNotFound(_) => "not_found",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Join(_) => "async",
            Self::ChannelSend => "channel",
        }
    }
}
