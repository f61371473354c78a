//! Error types for batch construction.

use thiserror::Error;

/// Main error type for batch construction.
///
/// Every variant aborts the build; no partial batch is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// The mint intent failed validation.
    #[error("Invalid mint intent: {message}")]
    InvalidIntent { message: String },

    /// The builder configuration can never produce a valid batch.
    #[error("Invalid batch configuration: {message}")]
    InvalidConfig { message: String },

    /// The mint planner rejected the request (sold out, contract revert, ...).
    #[error("Mint unavailable: {message}")]
    MintUnavailable { message: String },

    /// The quote service could not price or build the swap.
    #[error("Quote unavailable: {message}")]
    QuoteUnavailable { message: String },

    /// The upstream approval transaction is not a standard token approval.
    #[error("Malformed approval transaction: {message}")]
    MalformedApproval { message: String },

    /// Calldata could not be ABI-encoded or decoded.
    #[error("Calldata codec error: {0}")]
    Codec(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl BatchError {
    /// Shorthand for [`BatchError::InvalidIntent`].
    pub fn invalid_intent(message: impl Into<String>) -> Self {
        BatchError::InvalidIntent { message: message.into() }
    }

    /// Shorthand for [`BatchError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        BatchError::InvalidConfig { message: message.into() }
    }

    /// Shorthand for [`BatchError::MintUnavailable`].
    pub fn mint_unavailable(message: impl Into<String>) -> Self {
        BatchError::MintUnavailable { message: message.into() }
    }

    /// Shorthand for [`BatchError::QuoteUnavailable`].
    pub fn quote_unavailable(message: impl Into<String>) -> Self {
        BatchError::QuoteUnavailable { message: message.into() }
    }

    /// Shorthand for [`BatchError::MalformedApproval`].
    pub fn malformed_approval(message: impl Into<String>) -> Self {
        BatchError::MalformedApproval { message: message.into() }
    }

    /// Returns true if the failure came from an upstream service and the
    /// caller may reasonably try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BatchError::MintUnavailable { .. } | BatchError::QuoteUnavailable { .. }
        )
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BatchError::InvalidIntent { .. } => "invalid_intent",
            BatchError::InvalidConfig { .. } => "invalid_config",
            BatchError::MintUnavailable { .. } => "mint_unavailable",
            BatchError::QuoteUnavailable { .. } => "quote_unavailable",
            BatchError::MalformedApproval { .. } => "malformed_approval",
            BatchError::Codec(_) => "codec",
            BatchError::SerializationError(_) => "serialization",
        }
    }
}

/// Convenience Result type for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;

impl From<serde_json::Error> for BatchError {
    fn from(err: serde_json::Error) -> Self {
        BatchError::SerializationError(err.to_string())
    }
}
