//! Style definition error types

use swatch_css::CssError;
use thiserror::Error;

/// Style definition result type
pub type StyleResult<T> = Result<T, StyleError>;

/// Style definition errors
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Invalid class prefix '{prefix}': {reason}")]
    InvalidPrefix {
        prefix: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Css(#[from] CssError),
}
