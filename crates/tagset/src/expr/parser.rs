//! Recursive descent parser for tag expressions.

use super::ast::{Expr, SetOp};
use super::error::{ExprError, ExprResult};
use super::lexer::{ExprToken, Lexer, PositionedToken};

/// Parser for tag expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= term (("&" | "|" | "-" | "^") term)*
/// term       ::= IDENT | "(" expression ")"
/// IDENT      ::= [alphanumeric or "_"]+
/// ```
///
/// All four set operators share a single precedence level and associate
/// left to right; parentheses group explicitly. Identifiers are raw tag
/// names — resolution against the registry (including normalization)
/// happens at evaluation time, not here.
///
/// # Example
///
/// ```
/// use tagset_rs::expr::{Expr, ExprParser, SetOp};
///
/// let expr = ExprParser::parse("staging | production").unwrap();
/// assert!(matches!(expr, Expr::Binary { op: SetOp::Union, .. }));
/// ```
pub struct ExprParser {
    tokens: Vec<PositionedToken>,
    position: usize,
}

impl ExprParser {
    /// Parses a tag expression string into an [`Expr`] AST.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::EmptyExpression`] if the input contains no
    /// tokens, [`ExprError::UnexpectedCharacter`] for characters outside the
    /// grammar, [`ExprError::UnexpectedToken`] / [`ExprError::UnexpectedEndOfInput`]
    /// for malformed expressions, and [`ExprError::UnclosedParenthesis`]
    /// when parentheses are not balanced.
    pub fn parse(input: &str) -> ExprResult<Expr> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ExprError::EmptyExpression);
        }

        let tokens = Lexer::new(trimmed).tokenize()?;
        if tokens.is_empty() {
            return Err(ExprError::EmptyExpression);
        }

        let mut parser = Self {
            tokens,
            position: 0,
        };
        let expr = parser.parse_expression()?;

        // Check that we consumed all tokens.
        if let Some(remaining) = parser.peek() {
            return Err(ExprError::unexpected_token(describe(&remaining.token)));
        }

        Ok(expr)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&PositionedToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<ExprToken> {
        let token = self.tokens.get(self.position).map(|pt| pt.token.clone());
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Returns the operator at the current position, if any.
    fn peek_operator(&self) -> Option<SetOp> {
        match self.peek().map(|pt| &pt.token) {
            Some(ExprToken::Op(op)) => Some(*op),
            _ => None,
        }
    }

    /// Parses a chain of terms: `term (op term)*`, left-associative.
    fn parse_expression(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.peek_operator() {
            self.advance(); // consume the operator
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parses a term: an identifier or a parenthesized expression.
    fn parse_term(&mut self) -> ExprResult<Expr> {
        let token = self.advance().ok_or(ExprError::UnexpectedEndOfInput)?;

        match token {
            ExprToken::Ident(name) => Ok(Expr::Tag(name)),

            ExprToken::OpenParen => {
                let inner = self.parse_expression()?;
                match self.advance() {
                    Some(ExprToken::CloseParen) => Ok(inner),
                    _ => Err(ExprError::UnclosedParenthesis),
                }
            }

            ExprToken::Op(op) => Err(ExprError::unexpected_token(op.symbol().to_string())),
            ExprToken::CloseParen => Err(ExprError::unexpected_token(")")),
        }
    }
}

/// Describes a token for error messages.
fn describe(token: &ExprToken) -> String {
    match token {
        ExprToken::Ident(name) => name.clone(),
        ExprToken::Op(op) => op.symbol().to_string(),
        ExprToken::OpenParen => "(".to_string(),
        ExprToken::CloseParen => ")".to_string(),
    }
}
