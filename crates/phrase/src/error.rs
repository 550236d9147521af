use thiserror::Error;

/// Errors that can occur while building a phrase set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhraseError {
    #[error("phrase is empty; similarity against an empty phrase is undefined")]
    EmptyPhrase,
}
