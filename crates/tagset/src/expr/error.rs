//! Error types for the expression parser.

use thiserror::Error;

/// A specialized `Result` type for expression parsing operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors that can occur while tokenizing or parsing a tag expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExprError {
    /// The expression is empty.
    #[error("tag expression is empty")]
    EmptyExpression,

    /// A character that is not part of the expression grammar.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// The byte offset (0-indexed) where the character was found.
        position: usize,
    },

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token: {token}")]
    UnexpectedToken {
        /// The unexpected token that was encountered.
        token: String,
    },

    /// The expression ended where a tag name or group was expected.
    #[error("unexpected end of expression")]
    UnexpectedEndOfInput,

    /// An opening parenthesis was never closed.
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,
}

impl ExprError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        ExprError::UnexpectedToken {
            token: token.into(),
        }
    }

    /// Creates an unexpected character error.
    pub fn unexpected_character(character: char, position: usize) -> Self {
        ExprError::UnexpectedCharacter {
            character,
            position,
        }
    }
}
