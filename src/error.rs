// src/error.rs
// =============================================================================
// Failure kinds for a repository fetch.
//
// Every failure is terminal for the request that produced it. The widget
// turns them into an inline error message; none of them escape the widget.
//
// Rust concepts:
// - thiserror: derive Display/Error for an enum instead of writing them by hand
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// Why a repository listing could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connect, TLS, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with an error status
    #[error("{message}")]
    Application { status: StatusCode, message: String },

    /// The server answered with success but the body was not a repository list
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// The HTTP client itself could not be configured
    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// The text shown to the user in place of results.
    ///
    /// Application errors show the server's message verbatim ("Not Found").
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when the request never reached a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message is terse ("error sending request"),
        // so append the innermost cause when there is one
        let mut description = err.to_string();
        let mut source = std::error::Error::source(&err);
        let mut innermost = None;
        while let Some(cause) = source {
            innermost = Some(cause.to_string());
            source = std::error::Error::source(cause);
        }
        if let Some(cause) = innermost {
            description = format!("{description}: {cause}");
        }
        FetchError::Transport(description)
    }
}
