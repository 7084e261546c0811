// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Expression tokenizer.

use super::ExpressionError;

/// Characters that cannot appear inside a tag literal.
///
/// `*` is deliberately absent: outside selector payloads it is part of the tag literal and marks
/// it as a wildcard.
const RESERVED: [char; 9] = ['&', '|', '~', '(', ')', '{', '}', '[', ']'];

/// A token's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TokenKind {
    /// The `&` operator.
    And,
    /// The `|` operator.
    Or,
    /// The `~` operator.
    Diff,
    /// An opening parenthesis.
    LParen,
    /// A closing parenthesis.
    RParen,
    /// A `{…}` selector with its raw inner text (inner spaces preserved).
    Brace(String),
    /// A `[…]` selector with its raw inner text.
    Bracket(String),
    /// A tag literal, trimmed.
    Tag(String),
}

/// A token together with the byte offset of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Token {
    /// The token payload.
    pub(super) kind: TokenKind,
    /// Byte offset into the expression source.
    pub(super) offset: usize,
}

impl Token {
    /// Create a token.
    fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Scan the delimited text following an opening `{` or `[`.
///
/// Returns the inner text and the position one past the closing delimiter.
fn scan_delimited(
    input: &str,
    open_offset: usize,
    close: char,
) -> Result<(String, usize), ExpressionError> {
    let inner_start = open_offset + 1;
    match input[inner_start..].find(close) {
        Some(position) => {
            let inner = &input[inner_start..inner_start + position];
            Ok((inner.to_string(), inner_start + position + 1))
        }
        None => Err(ExpressionError::new(
            open_offset,
            format!("unmatched {:?}", &input[open_offset..=open_offset]),
        )),
    }
}

/// Tokenize an expression in a single pass.
pub(super) fn lex(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut position = 0;
    while position < input.len() {
        let rest = &input[position..];
        let c = rest.chars().next().expect("non-empty remainder");
        match c {
            '&' => {
                tokens.push(Token::new(TokenKind::And, position));
                position += 1;
            }
            '|' => {
                tokens.push(Token::new(TokenKind::Or, position));
                position += 1;
            }
            '~' => {
                tokens.push(Token::new(TokenKind::Diff, position));
                position += 1;
            }
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, position));
                position += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, position));
                position += 1;
            }
            '{' => {
                let (inner, next) = scan_delimited(input, position, '}')?;
                tokens.push(Token::new(TokenKind::Brace(inner), position));
                position = next;
            }
            '[' => {
                let (inner, next) = scan_delimited(input, position, ']')?;
                tokens.push(Token::new(TokenKind::Bracket(inner), position));
                position = next;
            }
            '}' | ']' => {
                return Err(ExpressionError::new(position, format!("unmatched {c:?}")));
            }
            _ => {
                let end = rest
                    .find(RESERVED)
                    .map_or(input.len(), |found| position + found);
                let raw = &input[position..end];
                let name = raw.trim();
                if !name.is_empty() {
                    let leading = raw.len() - raw.trim_start().len();
                    tokens.push(Token::new(
                        TokenKind::Tag(name.to_string()),
                        position + leading,
                    ));
                }
                position = end;
            }
        }
    }
    Ok(tokens)
}
