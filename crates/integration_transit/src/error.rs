//! Transit error types

use std::fmt;

use thiserror::Error;

/// Which resolver stage failed to match a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Route label lookup
    Route,
    /// Direction name lookup
    Direction,
    /// Stop description lookup
    Stop,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route => write!(f, "route"),
            Self::Direction => write!(f, "direction"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Errors that can occur while resolving the next departure
#[derive(Debug, Error)]
pub enum TransitError {
    /// No candidate matched the user's query
    #[error("no {kind} found that matches {query}")]
    NotFound {
        /// The resolver stage that failed
        kind: LookupKind,
        /// The query text exactly as supplied
        query: String,
    },

    /// A service alert marks the stop as closed
    #[error("the stop is closed due to {0}")]
    StopClosed(String),

    /// The stop is open but has nothing scheduled
    #[error("no upcoming departures for this route")]
    NoDepartures,

    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The transit service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Failed to parse response from transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No provider is registered under the requested name
    #[error("Unknown transit provider: {0}")]
    UnknownProvider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TransitError {
    pub(crate) fn not_found(kind: LookupKind, query: &str) -> Self {
        Self::NotFound {
            kind,
            query: query.to_string(),
        }
    }

    /// Returns true if a resolver stage found no match
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the failure happened below the decision logic
    /// (network, HTTP status or response decoding)
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::ParseError(_)
        )
    }
}
