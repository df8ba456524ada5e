pub mod err;

pub mod syntax_err;

pub use err::*;
pub use syntax_err::*;
