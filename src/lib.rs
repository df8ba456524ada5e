//! Infix arithmetic engine: formatting, shunting-yard conversion to postfix
//! and operand-stack evaluation over `+ - * /`, parentheses and decimal
//! literals with unary minus.
//!
//! ```
//! assert_eq!(rpn_calc::format_infix("4+7/2").unwrap(), "4 + 7 / 2");
//! assert_eq!(rpn_calc::to_postfix("4+7/2").unwrap().to_string(), "4 7 2 / +");
//! assert_eq!(rpn_calc::calculate("4+7/2").unwrap(), 7.5);
//! ```
//!
//! Every call is independent: stacks and queues live for one call only.

mod errors;
pub mod eval;
mod source_pos;
pub mod syntax;

pub use errors::{ConvertError, EvalError, TokenError};
pub use eval::{calculate, evaluate, evaluate_postfix};
pub use source_pos::{Span, Spanned};
pub use syntax::{format_infix, to_postfix, tokenize, Postfix, Token};
