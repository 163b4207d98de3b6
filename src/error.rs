//! Error types for streaming chat completion operations.
//!
//! The main error type is [`LlmError`], which covers all failure modes of the
//! orchestrator:
//! - Unknown provider id (not present in the registry)
//! - Unavailable provider (no credential configured)
//! - Non-success HTTP responses (status and body preserved)
//! - Network-level request failures
//! - Configuration problems (duplicate registrations, bad header values)
//!
//! A malformed stream frame is deliberately NOT an error: it is recovered
//! locally inside the parser and dropped. Nothing in this crate retries;
//! retry policy, if any, belongs to the caller.
//!
//! # Result Type
//!
//! Use [`LlmResult<T>`] as a convenient alias for `Result<T, LlmError>`:
//!
//! ```rust
//! use stream_llm::LlmResult;
//!
//! fn my_function() -> LlmResult<String> {
//!     Ok("Success".to_string())
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
///
/// Use [`LlmError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (LLM providers, network issues).
    External,

    /// Client errors (unknown provider, missing credential, configuration).
    ///
    /// The caller made a mistake that they can fix.
    Client,
}

/// Severity level for logging and alerting decisions.
///
/// Use [`LlmError::severity()`] to get the severity for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed but system is stable.
    Error,

    /// Unexpected but recoverable situation.
    Warning,
}

// ============================================================================
// LLM Error types
// ============================================================================

/// Convenient result type for streaming chat operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur during streaming chat completion operations.
///
/// Each variant includes relevant context and can be:
/// - Categorized via [`category()`](Self::category)
/// - Assessed for severity via [`severity()`](Self::severity)
/// - Converted to user-friendly messages via [`user_message()`](Self::user_message)
///
/// # Creating Errors
///
/// Use the constructor methods which automatically log the error:
///
/// ```rust
/// use stream_llm::LlmError;
///
/// let err = LlmError::provider_not_found("acme-ai");
/// let err = LlmError::http_error(429, "rate limited");
/// ```
///
/// None of these errors is retried anywhere in this crate. Cancellation is
/// not an error at all: an aborted stream ends silently with `Ok(())`.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The requested provider id is not present in the registry.
    ///
    /// Surfaced to the caller before any I/O happens.
    #[error("Provider not found: {provider}")]
    ProviderNotFound {
        /// The provider id that was requested.
        provider: String,
    },

    /// The provider is registered but not usable.
    ///
    /// By default this means no non-empty bearer token exists in the
    /// provider's credential store. Surfaced before any network call.
    #[error("Provider not available: {provider}")]
    ProviderUnavailable {
        /// The provider id that failed the availability check.
        provider: String,
    },

    /// The provider returned a non-success HTTP status.
    ///
    /// The response body is preserved verbatim for diagnosis. The error
    /// propagates to the caller unconditionally; no retry is attempted.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text, as returned by the provider.
        body: String,
    },

    /// The HTTP request could not be issued or the stream broke mid-read.
    ///
    /// Covers connection failures, TLS errors, and transport-level stream
    /// errors. Check the source error for the underlying cause.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Registry or client configuration is invalid.
    ///
    /// Common causes:
    /// - Duplicate provider id during registration
    /// - A header builder produced a value that is not a valid header
    /// - Operation requested for a provider that does not support it
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

impl LlmError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProviderNotFound { .. } => ErrorCategory::Client,
            Self::ProviderUnavailable { .. } => ErrorCategory::Client,
            Self::Http { .. } => ErrorCategory::External,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
        }
    }

    /// Get the error severity for logging and alerting.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ProviderNotFound { .. } => ErrorSeverity::Error,
            Self::ProviderUnavailable { .. } => ErrorSeverity::Warning,
            Self::Http { .. } => ErrorSeverity::Error,
            Self::RequestFailed { .. } => ErrorSeverity::Error,
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to a user-friendly message suitable for display.
    ///
    /// Returns a message that's safe to show to end users - technical
    /// details and internal information are stripped or generalized.
    pub fn user_message(&self) -> String {
        match self {
            Self::ProviderNotFound { .. } => {
                "The requested AI provider is not supported".to_string()
            }
            Self::ProviderUnavailable { provider } => {
                format!("Provider {provider} is not configured. Please add an API key")
            }
            Self::Http { status, .. } => {
                format!("The AI service returned an error (HTTP {status}). Please try again")
            }
            Self::RequestFailed { .. } => {
                "Unable to communicate with AI service. Please try again".to_string()
            }
            Self::ConfigurationError { .. } => {
                "AI service configuration issue. Please check your settings".to_string()
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // These methods automatically log the error at the appropriate level.
    // Use them instead of constructing variants directly.

    /// Create a provider-not-found error (logs at ERROR level).
    pub fn provider_not_found(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "provider_not_found",
            "Unknown LLM provider requested"
        );
        Self::ProviderNotFound { provider }
    }

    /// Create a provider-unavailable error (logs at WARN level).
    pub fn provider_unavailable(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_warn!(
            provider = %provider,
            error_type = "provider_unavailable",
            "LLM provider failed availability check"
        );
        Self::ProviderUnavailable { provider }
    }

    /// Create an HTTP error from a non-success response (logs at ERROR level).
    pub fn http_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        log_error!(
            status = status,
            error_type = "http_error",
            body_len = body.len(),
            "LLM provider returned non-success status"
        );
        Self::Http { status, body }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "LLM request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "LLM configuration validation failed"
        );
        Self::ConfigurationError { message }
    }
}
