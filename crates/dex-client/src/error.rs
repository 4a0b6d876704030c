//! Error types for the dex-client crate.
//!
//! - [`ApiError`]: a single request failed (network, status, or body)
//! - [`LoadError`]: a catalog load or pipeline stage failed
//! - [`StageFailure`]: which detail stage failed, and why
//!
//! # Retry Strategy
//!
//! Nothing is retried automatically. [`LoadError::is_retryable`] tells a
//! caller whether offering a retry makes sense: transport failures and
//! server-side statuses are transient, everything else is permanent.

use std::fmt;

/// A single HTTP request failed.
///
/// Messages are carried as strings so that in-process [`PokeApi`]
/// implementations can produce the same errors as the HTTP client.
///
/// [`PokeApi`]: crate::PokeApi
///
/// # Examples
///
/// ```
/// use dex_client::ApiError;
///
/// let err = ApiError::status("https://pokeapi.co/api/v2/pokemon/0", 404);
/// assert!(err.is_not_found());
/// assert!(err.to_string().contains("404"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },
}

impl ApiError {
    /// Creates a new [`ApiError::Transport`] error.
    #[inline]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new [`ApiError::Status`] error.
    #[inline]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a new [`ApiError::Parse`] error.
    #[inline]
    pub fn parse(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for a 404 response.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns `true` if repeating the request could succeed.
    #[inline]
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Parse { .. } => false,
        }
    }

    /// The URL of the failed request.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}

/// A catalog load or pipeline stage failed.
///
/// # Examples
///
/// ```
/// use dex_client::{ApiError, LoadError};
///
/// let err = LoadError::from(ApiError::transport("https://pokeapi.co", "connection reset"));
/// assert!(err.is_retryable());
///
/// let err = LoadError::malformed("pokemon/25", "expected 6 stats, found 5");
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A record decoded but did not have the expected shape.
    #[error("malformed record {resource}: {reason}")]
    Malformed {
        /// Name or URL of the offending record.
        resource: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The load was cancelled before it finished.
    #[error("load cancelled")]
    Cancelled,
}

impl LoadError {
    /// Creates a new [`LoadError::Malformed`] error.
    #[inline]
    pub fn malformed(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if running the load again could succeed.
    #[inline]
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_retryable(),
            Self::Malformed { .. } => false,
            Self::Cancelled => true,
        }
    }

    /// Returns `true` for [`LoadError::Cancelled`].
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the requested record does not exist.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_not_found())
    }
}

/// A stage of the detail pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailStage {
    /// The entity record (`/pokemon/{id}`).
    Entity,
    /// The species record.
    Species,
    /// The evolution chain.
    Evolution,
}

impl DetailStage {
    /// Lowercase stage name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Species => "species",
            Self::Evolution => "evolution",
        }
    }
}

impl fmt::Display for DetailStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a detail stage produced no value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageFailure {
    /// The stage ran and failed.
    #[error("{stage} stage failed: {error}")]
    Failed {
        /// Stage that failed.
        stage: DetailStage,
        /// Underlying error.
        #[source]
        error: LoadError,
    },

    /// The stage could not run because an earlier stage failed.
    #[error("{stage} stage skipped: {by} stage failed")]
    Blocked {
        /// Stage that was skipped.
        stage: DetailStage,
        /// Earlier stage whose failure blocked it.
        by: DetailStage,
    },
}

impl StageFailure {
    /// Creates a new [`StageFailure::Failed`].
    #[inline]
    pub fn failed(stage: DetailStage, error: impl Into<LoadError>) -> Self {
        Self::Failed {
            stage,
            error: error.into(),
        }
    }

    /// The stage this failure belongs to.
    #[inline]
    #[must_use]
    pub const fn stage(&self) -> DetailStage {
        match self {
            Self::Failed { stage, .. } | Self::Blocked { stage, .. } => *stage,
        }
    }

    /// The underlying error, if the stage actually ran.
    #[must_use]
    pub const fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Blocked { .. } => None,
        }
    }
}
