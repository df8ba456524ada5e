use tracing::debug;

use crate::{
    errors::TokenError,
    syntax::{
        lexer::tokenize,
        tokens::{Delimiter, SpannedTok, Token},
    },
};

/// Re-renders `source` with exactly one space between tokens, none after `(`
/// and none before `)`.
///
/// The token sequence itself is left untouched, so the result means the same
/// thing as the input and converts to the same postfix.
pub fn format_infix(source: &str) -> Result<String, TokenError> {
    let tokens = tokenize(source)?;
    let formatted = format_tokens(&tokens);
    debug!(%source, %formatted, "formatted infix");
    Ok(formatted)
}

pub fn format_tokens(tokens: &[SpannedTok]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    for tok in tokens {
        if let Some(prev) = prev {
            let tight = matches!(prev, Token::Delimiter(Delimiter::LParen))
                || matches!(tok.elem, Token::Delimiter(Delimiter::RParen));
            if !tight {
                out.push(' ');
            }
        }
        out.push_str(&tok.elem.to_string());
        prev = Some(&tok.elem);
    }
    out
}
