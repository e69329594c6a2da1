use thiserror::Error;

/// Typed error hierarchy for navigator.
///
/// Use at module boundaries (config loading, registry construction, channel delivery).
/// Internal/leaf functions can continue using `anyhow::Result`; the `Internal` variant
/// allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration error: {0}")]
    Registration(String),

    /// Transport failure that may clear up on its own (network, timeouts).
    #[error("Channel error: {channel}: {message}")]
    Channel { channel: String, message: String },

    /// The channel refused the message itself; sending it again cannot help.
    #[error("Rejected by {channel}: {message}")]
    Rejected { channel: String, message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using `NavigatorError`.
pub type NavigatorResult<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    /// Whether this error is transient and the operation could be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Channel { .. } | Self::Internal(_) => true,
            Self::Config(_) | Self::Registration(_) | Self::Rejected { .. } => false,
        }
    }
}
