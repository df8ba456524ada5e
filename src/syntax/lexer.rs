use std::{iter::Peekable, str::CharIndices};

use tracing::trace;

use crate::{
    errors::TokenError,
    syntax::tokens::{Delimiter, Spanned, SpannedTok, Token},
};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

/// Scans `source` into spanned tokens.
pub fn tokenize(source: &str) -> Result<Vec<SpannedTok>, TokenError> {
    Lexer::new(source).tokenize()
}

/// Parses a decimal literal made of digits and at most one dot.
///
/// Used for infix literals and for the words of postfix text.
pub fn parse_number(literal: &str, position: usize) -> Result<f64, TokenError> {
    let invalid = || TokenError::InvalidNumber {
        literal: literal.to_string(),
        position,
    };
    if literal.matches('.').count() > 1 {
        return Err(invalid());
    }
    match literal.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(invalid()),
    }
}

pub(crate) fn is_num_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<SpannedTok>, TokenError> {
        let mut tokens: Vec<SpannedTok> = vec![];
        while let Some((pos, char)) = self.next() {
            match char {
                c if is_num_char(c) => tokens.push(self.num(pos, pos)?),
                '-' if expects_operand(&tokens) => tokens.push(self.negative_num(pos)?),
                '(' | ')' | '+' | '-' | '*' | '/' => tokens.push(SpannedTok {
                    span: pos..pos + 1,
                    elem: Token::try_from(&self.source[pos..pos + 1]).map_err(|_| {
                        TokenError::UnknownCharacter {
                            found: char,
                            position: pos,
                        }
                    })?,
                }),
                c if c.is_whitespace() => (),
                c => {
                    return Err(TokenError::UnknownCharacter {
                        found: c,
                        position: pos,
                    })
                }
            }
        }
        trace!(count = tokens.len(), "tokenized");
        Ok(tokens)
    }

    /// `start` is where the token begins (the sign, if any), `digits` is the
    /// already consumed first character of the literal.
    fn num(&mut self, start: usize, digits: usize) -> Result<SpannedTok, TokenError> {
        let mut end = digits + 1;
        while let Some((pos, _)) = self.next_if(is_num_char) {
            end = pos + 1;
        }
        let value = parse_number(&self.source[digits..end], start)?;
        let value = if start == digits { value } else { -value };
        Ok(Spanned::new(Token::Num(value), start..end))
    }

    fn negative_num(&mut self, sign: usize) -> Result<SpannedTok, TokenError> {
        while self.next_if(char::is_whitespace).is_some() {}
        match self.next_if(is_num_char) {
            Some((digits, _)) => self.num(sign, digits),
            None => Err(TokenError::InvalidNumber {
                literal: "-".to_string(),
                position: sign,
            }),
        }
    }

    pub fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<(usize, char)> {
        if predicate(self.peek()?.1) {
            return self.next();
        }
        None
    }
    fn peek(&mut self) -> Option<&(usize, char)> {
        self.chars.peek()
    }
}
impl Iterator for Lexer<'_> {
    type Item = (usize, char);
    fn next(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }
}

/// A `-` seen here is a sign, not a subtraction.
fn expects_operand(tokens: &[SpannedTok]) -> bool {
    match tokens.last() {
        None => true,
        Some(Spanned { elem, .. }) => match elem {
            Token::Op(_) | Token::Delimiter(Delimiter::LParen) => true,
            Token::Num(_) | Token::Delimiter(Delimiter::RParen) => false,
        },
    }
}
