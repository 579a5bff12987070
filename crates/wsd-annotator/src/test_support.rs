use wsd_types::{MorphologicalParse, Pos};
use wsd_wordnet::WordNet;

use crate::corpus::AnnotatedSentence;
use crate::token::AnnotatedWord;
use crate::tree::{EMPTY_CATEGORY, ParseTree};

pub(crate) const LEXICON: &str = include_str!("../tests/fixtures/lexicon/data.tur");

pub(crate) fn lexicon() -> WordNet {
    WordNet::from_bytes(LEXICON).expect("fixture lexicon parses")
}

/// Token with a single parse whose suffix is whatever follows `root` in `surface`.
pub(crate) fn word(surface: &str, root: &str, pos: Pos) -> AnnotatedWord {
    let suffix = surface.strip_prefix(root).unwrap_or_default();
    AnnotatedWord::new(surface).with_parse(MorphologicalParse::new(surface, root, pos, suffix), None)
}

pub(crate) fn punct(name: &str) -> AnnotatedWord {
    AnnotatedWord::new(name)
}

pub(crate) fn sentence(words: &[(&str, &str, Pos)]) -> AnnotatedSentence {
    AnnotatedSentence::new(
        words
            .iter()
            .map(|(surface, root, pos)| word(surface, root, *pos))
            .collect(),
    )
}

pub(crate) fn labels(sentence: &AnnotatedSentence) -> Vec<Option<&str>> {
    sentence.words.iter().map(AnnotatedWord::semantic).collect()
}

/// (S (NP (N eve)) (VP (-NONE- *pro*) (V gitti)) (PUNC .))
pub(crate) fn eve_gitti() -> ParseTree {
    let mut tree = ParseTree::new("S");
    let np = tree.add_child(0, "NP");
    tree.add_leaf(np, "N", word("eve", "ev", Pos::Noun));
    let vp = tree.add_child(0, "VP");
    let none = tree.add_child(vp, EMPTY_CATEGORY);
    tree.add_leaf(none, "*pro*", word("o", "o", Pos::Noun));
    tree.add_leaf(vp, "V", word("gitti", "git", Pos::Verb));
    tree.add_leaf(0, "PUNC", punct("."));
    tree
}
