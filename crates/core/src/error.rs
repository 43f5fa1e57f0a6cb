/// Result alias that carries the custom [`RingTimerError`] type.
pub type Result<T> = std::result::Result<T, RingTimerError>;

/// Common error type for the core crate.
///
/// Timer operations themselves never fail; errors only surface at the edges
/// where configuration is read or sound cues are resolved.
#[derive(Debug, thiserror::Error)]
pub enum RingTimerError {
    /// Failure from an outside facility, such as installing a signal handler.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration could not be parsed or serialised.
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
    /// Configuration parsed but describes something that cannot be built.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A ring references a sound cue that was never registered.
    #[error("unknown sound cue `{0}` referenced by ring")]
    UnknownSound(String),
}

impl RingTimerError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}
