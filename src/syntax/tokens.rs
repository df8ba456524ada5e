use std::fmt;

pub use crate::source_pos::{Span, Spanned};
pub use super::operators::Operator;

pub type SpannedTok = Spanned<Token>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token {
    Op(Operator),

    // Unary minus is already folded in here, so this can be negative.
    Num(f64),

    Delimiter(Delimiter),
}

impl<'a> TryFrom<&'a str> for Token {
    type Error = ();
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(match value {
            "(" | ")" => Token::Delimiter(Delimiter::try_from(value.chars().next().ok_or(())?)?),
            _ => match Operator::lookup(value) {
                Some(op) => Token::Op(op),
                None => return Err(()),
            },
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Op(op) => write!(f, "{}", op),
            // f64's Display is the shortest form that parses back to the same
            // value and never switches to exponent notation.
            Token::Num(n) => write!(f, "{}", n),
            Token::Delimiter(Delimiter::LParen) => f.write_str("("),
            Token::Delimiter(Delimiter::RParen) => f.write_str(")"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Delimiter {
    LParen,
    RParen,
}
impl TryFrom<char> for Delimiter {
    type Error = ();
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            '(' => Delimiter::LParen,
            ')' => Delimiter::RParen,
            _ => return Err(()),
        })
    }
}
