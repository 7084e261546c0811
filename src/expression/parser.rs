// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Recursive-descent parser for combiner expressions.
//!
//! Operator precedence, tightest first: `&`, `~`, `|`. All operators are left-associative.

use super::lexer::{lex, Token, TokenKind};
use super::selector::{NumericSelector, Selector};
use super::{Expression, ExpressionError};

/// Token cursor over a lexed expression.
struct Parser {
    /// The token stream.
    tokens: Vec<Token>,
    /// Index of the next unconsumed token.
    position: usize,
    /// Total source length, used as the offset for end-of-input errors.
    source_len: usize,
}

/// Parse an expression source string into an [`Expression`].
pub(super) fn parse(input: &str) -> Result<Expression, ExpressionError> {
    let tokens = lex(input)?;
    let mut parser = Parser {
        tokens,
        position: 0,
        source_len: input.len(),
    };
    let expression = parser.or_expr()?;
    if let Some(token) = parser.peek() {
        return Err(ExpressionError::new(token.offset, "unexpected token"));
    }
    if !matches!(
        expression,
        Expression::And(..) | Expression::Or(..) | Expression::Diff(..)
    ) {
        return Err(ExpressionError::new(
            0,
            "expression contains no operator",
        ));
    }
    Ok(expression)
}

impl Parser {
    /// The next unconsumed token, if any.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Consume and return the next token.
    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    /// Consume the next token if it matches the given kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == *kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// `or_expr := diff_expr ( '|' diff_expr )*`
    fn or_expr(&mut self) -> Result<Expression, ExpressionError> {
        let mut expression = self.diff_expr()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.diff_expr()?;
            expression = Expression::Or(expression.into(), rhs.into());
        }
        Ok(expression)
    }

    /// `diff_expr := and_expr ( '~' and_expr )*`
    fn diff_expr(&mut self) -> Result<Expression, ExpressionError> {
        let mut expression = self.and_expr()?;
        while self.eat(&TokenKind::Diff) {
            let rhs = self.and_expr()?;
            expression = Expression::Diff(expression.into(), rhs.into());
        }
        Ok(expression)
    }

    /// `and_expr := atom ( '&' atom )*`
    fn and_expr(&mut self) -> Result<Expression, ExpressionError> {
        let mut expression = self.atom()?;
        while self.eat(&TokenKind::And) {
            let rhs = self.atom()?;
            expression = Expression::And(expression.into(), rhs.into());
        }
        Ok(expression)
    }

    /// `atom := '(' expr ')' | selector | tag_literal`
    fn atom(&mut self) -> Result<Expression, ExpressionError> {
        let Some(token) = self.advance() else {
            return Err(ExpressionError::new(self.source_len, "expected operand"));
        };
        match token.kind {
            TokenKind::LParen => {
                let expression = self.or_expr()?;
                if !self.eat(&TokenKind::RParen) {
                    let offset = self.peek().map_or(self.source_len, |token| token.offset);
                    return Err(ExpressionError::new(offset, "expected ')'"));
                }
                Ok(expression)
            }
            TokenKind::Brace(content) => {
                Selector::parse(&content, token.offset).map(Expression::Selector)
            }
            TokenKind::Bracket(content) => {
                NumericSelector::parse(&content, token.offset).map(Expression::Numeric)
            }
            TokenKind::Tag(name) => Ok(Expression::Tag {
                wildcard: name.contains('*'),
                name,
            }),
            TokenKind::And | TokenKind::Or | TokenKind::Diff | TokenKind::RParen => Err(
                ExpressionError::new(token.offset, "expected operand"),
            ),
        }
    }
}
