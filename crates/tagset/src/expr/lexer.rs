//! Lexer (tokenizer) for tag expressions.

use std::iter::Peekable;
use std::str::Chars;

use super::ast::SetOp;
use super::error::{ExprError, ExprResult};

/// A token in a tag expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprToken {
    /// A tag name (a run of alphanumerics and underscores).
    Ident(String),

    /// A set operator (`&`, `|`, `-` or `^`).
    Op(SetOp),

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: ExprToken,
    /// The byte position (0-indexed) where the token starts.
    pub position: usize,
}

/// Lexer for tokenizing tag expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads an identifier (alphanumerics and underscores).
    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(&c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        ident
    }

    /// Returns the next token with its position, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::UnexpectedCharacter`] for characters outside the
    /// expression grammar.
    pub fn next_token(&mut self) -> ExprResult<Option<PositionedToken>> {
        self.skip_whitespace();

        let Some(&c) = self.peek() else {
            return Ok(None);
        };
        let token_start = self.position;

        let token = match c {
            '&' => {
                self.next_char();
                ExprToken::Op(SetOp::Intersection)
            }
            '|' => {
                self.next_char();
                ExprToken::Op(SetOp::Union)
            }
            '-' => {
                self.next_char();
                ExprToken::Op(SetOp::Difference)
            }
            '^' => {
                self.next_char();
                ExprToken::Op(SetOp::SymmetricDifference)
            }
            '(' => {
                self.next_char();
                ExprToken::OpenParen
            }
            ')' => {
                self.next_char();
                ExprToken::CloseParen
            }
            _ if c.is_alphanumeric() || c == '_' => ExprToken::Ident(self.read_identifier()),
            _ => {
                return Err(ExprError::unexpected_character(c, token_start));
            }
        };

        Ok(Some(PositionedToken {
            token,
            position: token_start,
        }))
    }

    /// Collects all tokens into a vector.
    pub fn tokenize(mut self) -> ExprResult<Vec<PositionedToken>> {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token()? {
            tokens.push(positioned_token);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<ExprToken> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }

    #[test]
    fn test_tokenize_identifier() {
        assert_eq!(tokens("webservers"), vec![ExprToken::Ident("webservers".to_string())]);
    }

    #[test]
    fn test_tokenize_identifier_with_underscores_and_digits() {
        assert_eq!(tokens("_42"), vec![ExprToken::Ident("_42".to_string())]);
        assert_eq!(
            tokens("rack_3_servers"),
            vec![ExprToken::Ident("rack_3_servers".to_string())]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            tokens("a & b"),
            vec![
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::Intersection),
                ExprToken::Ident("b".to_string()),
            ]
        );
        assert_eq!(
            tokens("a | b"),
            vec![
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::Union),
                ExprToken::Ident("b".to_string()),
            ]
        );
        assert_eq!(
            tokens("a - b"),
            vec![
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::Difference),
                ExprToken::Ident("b".to_string()),
            ]
        );
        assert_eq!(
            tokens("a ^ b"),
            vec![
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::SymmetricDifference),
                ExprToken::Ident("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_operators_without_whitespace() {
        assert_eq!(
            tokens("a&b"),
            vec![
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::Intersection),
                ExprToken::Ident("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_parentheses() {
        assert_eq!(
            tokens("(a | b) & c"),
            vec![
                ExprToken::OpenParen,
                ExprToken::Ident("a".to_string()),
                ExprToken::Op(SetOp::Union),
                ExprToken::Ident("b".to_string()),
                ExprToken::CloseParen,
                ExprToken::Op(SetOp::Intersection),
                ExprToken::Ident("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_positions() {
        let positioned = Lexer::new("a | b").tokenize().unwrap();
        let positions: Vec<usize> = positioned.iter().map(|pt| pt.position).collect();
        assert_eq!(positions, vec![0, 2, 4]);
    }

    #[test]
    fn test_tokenize_unexpected_character() {
        let err = Lexer::new("a + b").tokenize().unwrap_err();
        assert_eq!(
            err,
            ExprError::UnexpectedCharacter {
                character: '+',
                position: 2,
            }
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert_eq!(tokens(""), Vec::new());
        assert_eq!(tokens("   "), Vec::new());
    }
}
