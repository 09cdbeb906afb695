//! Error types for the marking model.

/// Result type alias for markset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a [`MarkedModel`](crate::model::MarkedModel).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// More than one record was passed to a single-selection model.
    ///
    /// This is a caller contract violation; the model state is left untouched.
    #[error("Cannot pass multiple values into MarkedModel with single-value mode (got {count})")]
    MultipleValuesInSingleSelection { count: usize },

    /// A record did not carry a usable key.
    #[error("Record has no usable key field '{field}'")]
    MissingKey { field: String },

    /// TOML configuration could not be parsed.
    #[error("Invalid TOML configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// JSON could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a missing-key error.
    pub fn missing_key(field: impl Into<String>) -> Self {
        Self::MissingKey {
            field: field.into(),
        }
    }

    /// Whether this is the invalid-argument error raised by single-selection
    /// models.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::MultipleValuesInSingleSelection { .. })
    }
}
