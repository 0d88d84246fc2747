//! Errors returned by the OmniDimension client.

use thiserror::Error;

/// Errors that can occur while talking to the OmniDimension API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OmniDimError {
    /// No API key was resolved when the client was built
    #[error("OmniDimension API key not found. Set OMNIDIM_API_KEY or store a key with `set-key`.")]
    MissingApiKey,

    /// The API answered with a non-success status
    #[error("OmniDimension API error ({status}): {message}")]
    Http { status: u16, message: String },

    /// The request never produced a usable response
    #[error("Network error: {0}")]
    Transport(String),

    /// A success body did not match the requested shape
    #[error("Failed to parse API response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for OmniDimError {
    fn from(e: reqwest::Error) -> Self {
        OmniDimError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OmniDimError>;
