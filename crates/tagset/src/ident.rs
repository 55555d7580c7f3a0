//! Tag name normalization.
//!
//! User supplied tag names are free-form text ("Web servers!", "42"). The
//! engine stores and compares them through identifiers generated by
//! [`generate_id`], which come in two forms: a collapsed form used as the
//! registry key (so "Foo Bar" and "foo-bar" collide) and a readable form
//! attached to the tag for display and composition.

use thiserror::Error;

/// Error returned when nothing remains of a tag name after normalization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("nothing remains of '{input}' after normalization")]
pub struct IdentError {
    /// The input string that could not be normalized.
    pub input: String,
}

/// Generates a safe identifier from a user provided string.
///
/// The input is lower-cased and every maximal run of characters outside
/// `[a-z0-9]` is replaced: with nothing when `normalized` is `true` (the
/// canonical form used for comparison and as a registry key), or with a
/// single underscore when `normalized` is `false` (a form that preserves
/// some readability). Leading and trailing underscores are stripped, and an
/// underscore is prepended when the result would start with a digit.
///
/// # Errors
///
/// Returns [`IdentError`] when nothing remains of the input after
/// normalization.
///
/// # Example
///
/// ```
/// use tagset_rs::generate_id;
///
/// assert_eq!(generate_id("Any user-defined string", false).unwrap(), "any_user_defined_string");
/// assert_eq!(generate_id("Any user-defined string", true).unwrap(), "anyuserdefinedstring");
/// assert_eq!(generate_id("42", true).unwrap(), "_42");
/// ```
pub fn generate_id(value: &str, normalized: bool) -> Result<String, IdentError> {
    let mut id = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            id.push(c);
            in_run = false;
        } else {
            if !in_run && !normalized {
                id.push('_');
            }
            in_run = true;
        }
    }

    let id = id.trim_matches('_');
    if id.is_empty() {
        return Err(IdentError {
            input: value.to_string(),
        });
    }

    // Identifiers must not start with a digit.
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        Ok(format!("_{id}"))
    } else {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_readable() {
        assert_eq!(
            generate_id("Some random name!", false).unwrap(),
            "some_random_name"
        );
    }

    #[test]
    fn test_generate_id_normalized() {
        assert_eq!(
            generate_id("Some random name!", true).unwrap(),
            "somerandomname"
        );
    }

    #[test]
    fn test_generate_id_leading_digit() {
        assert_eq!(generate_id("42", false).unwrap(), "_42");
        assert_eq!(generate_id("42", true).unwrap(), "_42");
    }

    #[test]
    fn test_generate_id_empty_input_fails() {
        assert!(generate_id("", true).is_err());
        assert!(generate_id("", false).is_err());
    }

    #[test]
    fn test_generate_id_only_punctuation_fails() {
        let err = generate_id("!!!", true).unwrap_err();
        assert_eq!(err.input, "!!!");
    }

    #[test]
    fn test_generate_id_collapsed_names_collide() {
        assert_eq!(
            generate_id("Foo Bar", true).unwrap(),
            generate_id("foo-bar", true).unwrap()
        );
    }

    #[test]
    fn test_generate_id_strips_edge_underscores() {
        assert_eq!(generate_id("__tag__", false).unwrap(), "tag");
        assert_eq!(generate_id("  spaced  ", false).unwrap(), "spaced");
    }

    #[test]
    fn test_generate_id_collapses_separator_runs() {
        assert_eq!(generate_id("a - b -- c", false).unwrap(), "a_b_c");
    }
}
