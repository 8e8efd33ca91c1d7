//! Error handling module for statdeck
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.
//!
//! Note that the animation engines themselves never construct errors: a
//! counter with an unparseable target, a reveal with a malformed attribute,
//! or a missing modal target all degrade to "do nothing". These types cover
//! the outer shell only (file loading, terminal setup, state persistence).

#![allow(dead_code)] // Error variants and helpers are available for future use

use thiserror::Error;

/// Main error type for statdeck
#[derive(Error, Debug)]
pub enum DeckError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Page document errors (loading, parsing, validation)
    #[error("Page error: {0}")]
    Page(String),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// State errors (form-state store, invalid state)
    #[error("State error: {0}")]
    State(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for statdeck operations
pub type Result<T> = std::result::Result<T, DeckError>;

// Convenient error constructors
impl DeckError {
    /// Create a page error
    pub fn page(msg: impl Into<String>) -> Self {
        Self::Page(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Helper function to create general errors (for backward compatibility)
pub fn general_error(msg: impl Into<String>) -> DeckError {
    DeckError::General(msg.into())
}
