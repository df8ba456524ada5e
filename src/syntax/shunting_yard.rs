use std::{fmt, str::FromStr};

use tracing::{debug, trace};

use crate::{
    errors::{ConvertError, TokenError},
    syntax::{
        lexer::{is_num_char, parse_number, tokenize},
        tokens::{Delimiter, Spanned, SpannedTok, Token},
    },
};

/// Output queue of the shunting-yard: numbers and operators in evaluation order.
///
/// Displays as space-separated tokens and parses back from that form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Postfix {
    tokens: Vec<SpannedTok>,
}

impl Postfix {
    pub fn tokens(&self) -> &[SpannedTok] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = self.tokens.iter();
        if let Some(first) = tokens.next() {
            write!(f, "{}", first.elem)?;
        }
        for tok in tokens {
            write!(f, " {}", tok.elem)?;
        }
        Ok(())
    }
}

/// Reads whitespace-separated postfix words. Spans point into the postfix text.
impl FromStr for Postfix {
    type Err = ConvertError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = vec![];
        let mut rest = text;
        let mut offset = 0;
        loop {
            let trimmed = rest.trim_start();
            offset += rest.len() - trimmed.len();
            if trimmed.is_empty() {
                break;
            }
            let len = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            tokens.push(postfix_word(&trimmed[..len], offset)?);
            offset += len;
            rest = &trimmed[len..];
        }
        Ok(Postfix { tokens })
    }
}

fn postfix_word(word: &str, start: usize) -> Result<SpannedTok, ConvertError> {
    let span = start..start + word.len();
    match Token::try_from(word) {
        Ok(Token::Delimiter(_)) => Err(ConvertError::UnexpectedToken {
            found: word.to_string(),
            position: start,
        }),
        Ok(elem) => Ok(Spanned { elem, span }),
        Err(()) => {
            let digits = word.strip_prefix('-').unwrap_or(word);
            let sign = word.len() - digits.len();
            if let Some((i, found)) = digits.char_indices().find(|&(_, c)| !is_num_char(c)) {
                return Err(TokenError::UnknownCharacter {
                    found,
                    position: start + sign + i,
                }
                .into());
            }
            let value = parse_number(word, start)?;
            Ok(Spanned {
                elem: Token::Num(value),
                span,
            })
        }
    }
}

/// Tokenizes `source` and converts it to postfix.
///
/// Raw and already formatted text give the same postfix.
pub fn to_postfix(source: &str) -> Result<Postfix, ConvertError> {
    let tokens = tokenize(source)?;
    let postfix = convert(tokens)?;
    debug!(%source, %postfix, "converted to postfix");
    Ok(postfix)
}

/// Shunting-yard over an already scanned token sequence.
///
/// Besides balancing parentheses, operands and operators have to alternate:
/// anything showing up where the other kind was expected is rejected with
/// `ConvertError::UnexpectedToken`.
pub fn convert(tokens: Vec<SpannedTok>) -> Result<Postfix, ConvertError> {
    let mut output: Vec<SpannedTok> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<SpannedTok> = vec![];
    let mut expect_operand = true;
    let mut end = None;

    for tok in tokens {
        end = Some(tok.span.end);
        match tok.elem {
            Token::Num(_) => {
                if !expect_operand {
                    return Err(unexpected(&tok));
                }
                output.push(tok);
                expect_operand = false;
            }
            Token::Op(op) => {
                if expect_operand {
                    return Err(unexpected(&tok));
                }
                while let Some(Spanned {
                    elem: Token::Op(top),
                    ..
                }) = stack.last()
                {
                    if !top.has_bigger_prec(&op) {
                        break;
                    }
                    trace!(op = %top, "pop operator");
                    output.extend(stack.pop());
                }
                stack.push(tok);
                expect_operand = true;
            }
            Token::Delimiter(Delimiter::LParen) => {
                if !expect_operand {
                    return Err(unexpected(&tok));
                }
                stack.push(tok);
            }
            Token::Delimiter(Delimiter::RParen) => {
                let opened = stack
                    .iter()
                    .any(|top| top.elem == Token::Delimiter(Delimiter::LParen));
                if !opened {
                    return Err(ConvertError::UnbalancedParens {
                        position: tok.span.start,
                    });
                }
                if expect_operand {
                    return Err(unexpected(&tok));
                }
                loop {
                    match stack.pop() {
                        Some(Spanned {
                            elem: Token::Delimiter(Delimiter::LParen),
                            ..
                        }) => break,
                        Some(top) => output.push(top),
                        None => {
                            return Err(ConvertError::UnbalancedParens {
                                position: tok.span.start,
                            })
                        }
                    }
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        if let Token::Delimiter(_) = top.elem {
            return Err(ConvertError::UnbalancedParens {
                position: top.span.start,
            });
        }
        output.push(top);
    }

    match end {
        Some(position) if expect_operand => Err(ConvertError::UnexpectedToken {
            found: "end of input".to_string(),
            position,
        }),
        _ => Ok(Postfix { tokens: output }),
    }
}

fn unexpected(tok: &SpannedTok) -> ConvertError {
    ConvertError::UnexpectedToken {
        found: tok.elem.to_string(),
        position: tok.span.start,
    }
}
