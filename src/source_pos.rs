use std::ops::Range;

/// Byte range into the source text.
pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub elem: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(elem: T, span: Span) -> Self {
        Self { elem, span }
    }
}
