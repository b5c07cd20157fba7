//! Error types for identifier parsing and the storage boundary.

use thiserror::Error;

/// Errors that can occur when parsing or validating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The identifier string is empty.
    #[error("identifier cannot be empty")]
    Empty,

    /// The identifier has the wrong length.
    #[error("invalid identifier length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The identifier contains a character outside its alphabet.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// The UUID portion of the identifier is invalid.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }
}

/// Errors surfaced by the storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code violated the store's uniqueness constraint.
    #[error("short code already in use")]
    ShortCodeTaken,

    /// Every regeneration attempt collided with an existing short code.
    #[error("gave up after {attempts} short code collisions")]
    ShortCodeExhausted { attempts: usize },

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true if this error indicates a short code collision.
    pub fn is_collision(&self) -> bool {
        matches!(self, StoreError::ShortCodeTaken)
    }
}
