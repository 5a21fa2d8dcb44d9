/// Result alias that carries the custom [`DemoError`] type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Common error type for the core crate.
///
/// The engines themselves are total; errors only surface at the edges where
/// configuration is loaded, selectors are parsed, or frames are written out.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Free-form message for failures that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// A value supplied by the caller could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration or output JSON could not be (de)serialised.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl DemoError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn invalid<T: Into<String>>(msg: T) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<&str> for DemoError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for DemoError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
