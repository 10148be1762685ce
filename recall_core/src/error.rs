//! Error types for the recall_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for recall_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Deck file does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A card with this term is already in the deck
    #[error("card \"{0}\" already exists")]
    DuplicateTerm(String),

    /// Another card already carries this definition
    #[error("definition \"{0}\" already exists")]
    DuplicateDefinition(String),

    /// No card with this term in the deck
    #[error("card \"{0}\" does not exist")]
    CardNotFound(String),

    /// Quiz requested on a deck with no cards
    #[error("the deck has no cards")]
    EmptyDeck,

    /// Question count input was not a non-negative integer
    #[error("invalid question count: {0:?}")]
    InvalidCount(String),
}
