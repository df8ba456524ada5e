pub mod formatter;

pub mod lexer;

pub mod operators;

pub mod shunting_yard;

pub mod tokens;

pub use formatter::*;
pub use lexer::*;
pub use shunting_yard::*;
pub use tokens::*;
