use wsd_types::{MorphologicalAnalyzer, SenseLexicon, Synset};

use crate::token::TokenSequence;
use crate::window::Window;

/// Candidate senses for the token at `index`.
///
/// Single-word senses of the current token come first, followed by the
/// senses of each multiword span in [`Window::idiom_spans`] order. Lists are
/// concatenated without deduplication across steps, and an unparsed or
/// out-of-range token yields nothing.
pub fn candidate_synsets<'l, L, M, S>(
    lexicon: &'l L,
    morph: &M,
    tokens: &S,
    index: usize,
) -> Vec<Synset<'l>>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
{
    match Window::at(tokens, index) {
        Some(window) => window_candidates(lexicon, morph, &window),
        None => Vec::new(),
    }
}

pub fn window_candidates<'l, L, M>(lexicon: &'l L, morph: &M, window: &Window<'_>) -> Vec<Synset<'l>>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
{
    let current = window.current;
    let Some(parse) = current.parse() else {
        return Vec::new();
    };
    let mut synsets = lexicon.synsets(&parse.root, parse, current.metamorphic_parse(), morph);
    for span in window.idiom_spans() {
        synsets.extend(lexicon.idiom_synsets(&span.parts, morph));
    }
    synsets
}
