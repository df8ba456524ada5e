//! Operand-stack evaluation of postfix token sequences.

use tracing::{debug, trace};

use crate::{
    errors::EvalError,
    syntax::{
        convert,
        operators::BinOp,
        tokenize,
        tokens::{SpannedTok, Token},
        Postfix,
    },
};

/// Evaluates infix text: tokenize, shunting-yard, then the operand stack.
///
/// Gives the same value for raw and formatted input.
pub fn calculate(source: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(source)?;
    let postfix = convert(tokens)?;
    let value = evaluate(&postfix)?;
    debug!(%source, %postfix, value, "calculated");
    Ok(value)
}

/// Evaluates whitespace-separated postfix text such as `4 7 2 / +`.
pub fn evaluate_postfix(text: &str) -> Result<f64, EvalError> {
    let postfix: Postfix = text.parse()?;
    let value = evaluate(&postfix)?;
    debug!(%postfix, value, "evaluated postfix");
    Ok(value)
}

pub fn evaluate(postfix: &Postfix) -> Result<f64, EvalError> {
    if postfix.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    let mut operands: Vec<f64> = Vec::with_capacity(postfix.len());
    for tok in postfix.tokens() {
        step(&mut operands, tok)?;
    }
    match operands.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::MalformedExpression { position: None }),
    }
}

fn step(operands: &mut Vec<f64>, tok: &SpannedTok) -> Result<(), EvalError> {
    let position = tok.span.start;
    let malformed = || EvalError::MalformedExpression {
        position: Some(position),
    };
    match tok.elem {
        Token::Num(n) => operands.push(n),
        Token::Op(op) => {
            // right operand sits on top
            let rhs = operands.pop().ok_or_else(malformed)?;
            let lhs = operands.pop().ok_or_else(malformed)?;
            if op.op == BinOp::Div && rhs == 0.0 {
                return Err(EvalError::DivisionByZero { position });
            }
            let value = op.op.apply(lhs, rhs);
            if !value.is_finite() {
                return Err(EvalError::Overflow { position });
            }
            trace!(lhs, %op, rhs, value, "apply");
            operands.push(value);
        }
        // convert and Postfix::from_str never emit delimiters
        Token::Delimiter(_) => return Err(malformed()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConvertError, TokenError};
    use pretty_assertions::assert_eq;

    fn calc(source: &str) -> f64 {
        calculate(source).unwrap_or_else(|e| panic!("calculate({:?}): {}", source, e))
    }

    #[test]
    fn precedence() {
        assert_eq!(calc("4 + 7 / 2"), 7.5);
        assert_eq!(calc("(4 + 7) / 2"), 5.5);
        assert_eq!(calc("2 + 3 * 4 - 6 / 3"), 12.0);
    }

    #[test]
    fn left_associativity() {
        assert_eq!(calc("10 - 3 - 2"), 5.0);
        assert_eq!(calc("16 / 4 / 2"), 2.0);
        assert_eq!(calc("8 / 4 * 2"), 4.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(calc("-4 + 7"), 3.0);
        assert_eq!(calc("3 * (-2)"), -6.0);
        assert_eq!(calc("5 - -5"), 10.0);
    }

    #[test]
    fn decimals_use_double_arithmetic() {
        assert_eq!(calc("0.1 + 0.2"), 0.1 + 0.2);
        assert_eq!(calc("1 / 3"), 1.0 / 3.0);
    }

    #[test]
    fn raw_and_formatted_agree() {
        let formatted = crate::syntax::format_infix("4+7/2").unwrap();
        assert_eq!(formatted, "4 + 7 / 2");
        assert_eq!(calc(&formatted), calc("4+7/2"));
    }

    #[test]
    fn unbalanced_parens() {
        assert_eq!(
            calculate("4 + (2 * 3"),
            Err(EvalError::Convert(ConvertError::UnbalancedParens {
                position: 4
            }))
        );
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            calculate("4 / 0"),
            Err(EvalError::DivisionByZero { position: 2 })
        );
        assert!(matches!(
            calculate("1 / (2 - 2)"),
            Err(EvalError::DivisionByZero { .. })
        ));
        assert!(matches!(
            calculate("1 / -0"),
            Err(EvalError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn consecutive_operators_are_malformed() {
        assert_eq!(
            calculate("4 + + 2"),
            Err(EvalError::MalformedExpression { position: Some(4) })
        );
        assert!(matches!(
            calculate("4 2"),
            Err(EvalError::MalformedExpression { .. })
        ));
        assert!(matches!(
            calculate("(4 +) 2"),
            Err(EvalError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn empty_expression() {
        assert_eq!(calculate(""), Err(EvalError::EmptyExpression));
        assert_eq!(calculate("   "), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn lexical_errors_surface() {
        assert_eq!(
            calculate("4 # 2"),
            Err(EvalError::Convert(ConvertError::Lexical(
                TokenError::UnknownCharacter {
                    found: '#',
                    position: 2,
                }
            )))
        );
    }

    #[test]
    fn overflow_is_reported() {
        let big = format!("1{}", "0".repeat(300));
        let source = format!("{} * {}", big, big);
        assert!(matches!(
            calculate(&source),
            Err(EvalError::Overflow { .. })
        ));
    }

    #[test]
    fn postfix_text_is_evaluated() {
        assert_eq!(evaluate_postfix("4 7 2 / +"), Ok(7.5));
        assert_eq!(evaluate_postfix("10 3 - 2 -"), Ok(5.0));
        assert_eq!(evaluate_postfix("3 -2 *"), Ok(-6.0));
    }

    #[test]
    fn postfix_stack_underflow_is_malformed() {
        assert_eq!(
            evaluate_postfix("4 +"),
            Err(EvalError::MalformedExpression { position: Some(2) })
        );
        assert_eq!(
            evaluate_postfix("1 2 3 +"),
            Err(EvalError::MalformedExpression { position: None })
        );
        assert_eq!(evaluate_postfix(""), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn postfix_division_by_zero() {
        assert_eq!(
            evaluate_postfix("1 0 /"),
            Err(EvalError::DivisionByZero { position: 4 })
        );
    }
}
