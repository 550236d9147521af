use phrase::PhraseError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by index construction and lookup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid phrase: {0}")]
    Phrase(#[from] PhraseError),

    #[error("text source exceeds {} lines", u32::MAX)]
    LineOverflow,
}
