//! Locale parsing error types.

use thiserror::Error;

/// Errors raised when a string does not name a supported locale component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// Not a two or three letter lowercase language code.
    #[error("invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    /// Not one of the supported script designators.
    #[error("invalid script code: {0:?}")]
    InvalidScriptCode(String),

    /// Not an alpha-2 or numeric region code.
    #[error("invalid region code: {0:?}")]
    InvalidRegionCode(String),

    /// Locale identifier with unexpected structure.
    #[error("invalid locale identifier: {0:?}")]
    InvalidIdentifier(String),
}
