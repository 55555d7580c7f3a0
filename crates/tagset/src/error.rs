//! Crate-level error types.

use thiserror::Error;

use crate::expr::ExprError;
use crate::ident::IdentError;

/// A specialized `Result` type for tagging operations.
pub type TagResult<T> = std::result::Result<T, TagError>;

/// Errors produced while defining tags or evaluating tag expressions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    /// A tag name normalized to an empty identifier.
    #[error(transparent)]
    Ident(#[from] IdentError),

    /// The expression text failed to parse.
    #[error("invalid tag expression: {0}")]
    Expression(#[from] ExprError),

    /// Expression evaluation resolved a referenced tag to an empty set.
    ///
    /// Referencing a tag with no members is almost certainly a typo or an
    /// unpopulated tag, so it fails at variable resolution. A composite
    /// expression may still legitimately produce an empty result from
    /// non-empty operands.
    #[error("{}", format_empty_tag(name, suggestion.as_deref()))]
    EmptyTag {
        /// The tag name as written in the expression.
        name: String,
        /// A close registered name, when one exists.
        suggestion: Option<String>,
    },

    /// A composite tag's expression refers back to itself.
    #[error("circular tag expression involving '{name}'")]
    CircularExpression {
        /// The tag name where the cycle was detected.
        name: String,
    },
}

/// Formats the empty-tag message, optionally including a suggestion.
fn format_empty_tag(name: &str, suggestion: Option<&str>) -> String {
    let base = format!("tag '{name}' doesn't match anything");
    match suggestion {
        Some(similar) => format!("{base}. Did you mean '{similar}'?"),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tag_display_without_suggestion() {
        let err = TagError::EmptyTag {
            name: "staging".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "tag 'staging' doesn't match anything");
    }

    #[test]
    fn test_empty_tag_display_with_suggestion() {
        let err = TagError::EmptyTag {
            name: "webserver".to_string(),
            suggestion: Some("webservers".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "tag 'webserver' doesn't match anything. Did you mean 'webservers'?"
        );
    }

    #[test]
    fn test_expression_error_wraps_parse_failure() {
        let err = TagError::from(ExprError::UnexpectedEndOfInput);
        assert_eq!(
            err.to_string(),
            "invalid tag expression: unexpected end of expression"
        );
    }
}
