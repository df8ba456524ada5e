use thiserror::Error;

use super::syntax_err::TokenError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Lexical(#[from] TokenError),
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParens { position: usize },
    /// An operand where an operator was expected, or the other way around.
    #[error("unexpected `{found}` at position {position}")]
    UnexpectedToken { found: String, position: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Convert(ConvertError),
    #[error("division by zero at position {position}")]
    DivisionByZero { position: usize },
    #[error("malformed expression{}", at(.position))]
    MalformedExpression { position: Option<usize> },
    #[error("empty expression")]
    EmptyExpression,
    #[error("result out of range at position {position}")]
    Overflow { position: usize },
}

fn at(position: &Option<usize>) -> String {
    match position {
        Some(pos) => format!(" at position {}", pos),
        None => String::new(),
    }
}

// Misplaced operands and operators are reported the same way whether the
// converter or the operand stack notices them first.
impl From<ConvertError> for EvalError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::UnexpectedToken { position, .. } => EvalError::MalformedExpression {
                position: Some(position),
            },
            err => EvalError::Convert(err),
        }
    }
}

impl From<TokenError> for EvalError {
    fn from(err: TokenError) -> Self {
        EvalError::Convert(ConvertError::Lexical(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn misplaced_token_becomes_malformed() {
        let err: EvalError = ConvertError::UnexpectedToken {
            found: "+".into(),
            position: 4,
        }
        .into();
        assert_eq!(err, EvalError::MalformedExpression { position: Some(4) });
    }

    #[test]
    fn lexical_errors_keep_their_message() {
        let err: EvalError = TokenError::UnknownCharacter {
            found: 'x',
            position: 2,
        }
        .into();
        assert_eq!(err.to_string(), "unexpected character `x` at position 2");
        assert_eq!(
            EvalError::MalformedExpression { position: None }.to_string(),
            "malformed expression"
        );
    }
}
