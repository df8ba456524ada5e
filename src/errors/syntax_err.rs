use thiserror::Error;

/// Failure while scanning raw text into tokens.
///
/// Positions are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    #[error("invalid number `{literal}` at position {position}")]
    InvalidNumber { literal: String, position: usize },
    #[error("unexpected character `{found}` at position {position}")]
    UnknownCharacter { found: char, position: usize },
}

impl TokenError {
    pub fn position(&self) -> usize {
        match self {
            TokenError::InvalidNumber { position, .. }
            | TokenError::UnknownCharacter { position, .. } => *position,
        }
    }
}
