//! error.rs
//!
//! The two fatal error categories from the spec's error handling design
//! (resolution warnings are diagnostics, not errors — see
//! `diagnostics.rs`): [`ParseError`] for rule strings that do not match
//! the grammar, and [`RegistrationError`] for programmer errors raised
//! while assembling a [`crate::registry::FunctionRegistry`].

use thiserror::Error;

/// A rule string failed to parse. Fatal to the current `parse` call — no
/// date is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    /// Byte offset into the rule string where parsing failed.
    pub position: usize,
    /// A human-readable description, including what was expected.
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            position,
            message: message.into(),
        }
    }

    pub fn expected(position: usize, expected: &str, found: impl std::fmt::Display) -> Self {
        ParseError::new(position, format!("expected {expected}, found {found}"))
    }
}

/// A producer was registered incorrectly. These are programmer errors: they
/// are raised at registration time, never while evaluating a registry or a
/// rule, and are not meant to be recovered from at runtime.
///
/// The tagged `Producer` enum (`registry.rs`) makes an unrecognized kind
/// marker unrepresentable, so the only producer-registration error this
/// crate can actually raise is a malformed name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{name:?} is not a valid date-table name ([A-Za-z]([-_.]?[A-Za-z0-9])*)")]
    InvalidName { name: String },
}
