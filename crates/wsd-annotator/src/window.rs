//! Five-token neighbourhood around the token being annotated.

use wsd_types::IdiomPart;

use crate::token::{AnnotatedWord, TokenSequence};

/// Which neighbours a multiword span covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpanKind {
    /// two before, current
    ThreeLeft,
    /// one before, current, one after
    ThreeMiddle,
    /// current, two after
    ThreeRight,
    TwoLeft,
    TwoRight,
}

/// Consecutive parsed words that may form an idiom with the current token.
#[derive(Clone, Debug)]
pub struct IdiomSpan<'t> {
    pub kind: SpanKind,
    pub parts: Vec<IdiomPart<'t>>,
}

#[derive(Clone, Copy, Debug)]
pub struct Window<'t> {
    pub two_previous: Option<&'t AnnotatedWord>,
    pub previous: Option<&'t AnnotatedWord>,
    pub current: &'t AnnotatedWord,
    pub next: Option<&'t AnnotatedWord>,
    pub two_next: Option<&'t AnnotatedWord>,
}

impl<'t> Window<'t> {
    /// Window centred on `index`, or `None` when the index is out of range.
    pub fn at<S: TokenSequence + ?Sized>(tokens: &'t S, index: usize) -> Option<Self> {
        let current = tokens.token(index)?;
        let before = |offset: usize| index.checked_sub(offset).and_then(|i| tokens.token(i));
        let after = |offset: usize| index.checked_add(offset).and_then(|i| tokens.token(i));
        Some(Self {
            two_previous: before(2),
            previous: before(1),
            current,
            next: after(1),
            two_next: after(2),
        })
    }

    /// Multiword spans in lookup priority order: the three-word spans from
    /// left to right, then the two-word spans from left to right.
    ///
    /// A span is produced only when every word in it has a parse; nothing is
    /// produced when the current token itself is unparsed.
    pub fn idiom_spans(&self) -> Vec<IdiomSpan<'t>> {
        let Some(current) = self.current.idiom_part() else {
            return Vec::new();
        };
        let part = |word: Option<&'t AnnotatedWord>| word.and_then(AnnotatedWord::idiom_part);
        let two_previous = part(self.two_previous);
        let previous = part(self.previous);
        let next = part(self.next);
        let two_next = part(self.two_next);

        let mut spans = Vec::with_capacity(5);
        if let (Some(a), Some(b)) = (two_previous, previous) {
            spans.push(span(SpanKind::ThreeLeft, vec![a, b, current]));
        }
        if let (Some(a), Some(c)) = (previous, next) {
            spans.push(span(SpanKind::ThreeMiddle, vec![a, current, c]));
        }
        if let (Some(b), Some(c)) = (next, two_next) {
            spans.push(span(SpanKind::ThreeRight, vec![current, b, c]));
        }
        if let Some(a) = previous {
            spans.push(span(SpanKind::TwoLeft, vec![a, current]));
        }
        if let Some(b) = next {
            spans.push(span(SpanKind::TwoRight, vec![current, b]));
        }
        spans
    }
}

fn span(kind: SpanKind, parts: Vec<IdiomPart<'_>>) -> IdiomSpan<'_> {
    IdiomSpan { kind, parts }
}
