//! Shared types for word-sense annotation over a Turkish WordNet.
//!
//! Lexicon records are exposed as borrowed views ([`Synset`], [`Literal`])
//! whose text points into whatever buffer the lexicon keeps; morphological
//! data ([`MorphologicalParse`], [`MetamorphicParse`]) is owned because it
//! travels with the annotated tokens.
//!
//! The two collaborator traits live here so that the lexicon, the analyzer
//! and the annotator can be built independently:
//! - [`SenseLexicon`] answers single-word and multiword sense queries.
//! - [`MorphologicalAnalyzer`] tells the lexicon under which citation
//!   spellings a parsed root may be listed.
//!
//! ```rust
//! use wsd_types::{Pos, to_lower_tr};
//!
//! assert_eq!(Pos::from_char('v'), Some(Pos::Verb));
//! assert_eq!(to_lower_tr("IRMAK"), "ırmak");
//! assert_eq!(to_lower_tr("İstanbul"), "istanbul");
//! ```

use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Part-of-speech marker as used by the dictionary files (`n`, `v`, `a`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Parse a POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the POS character used in `data.tur`.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }

    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// One segmentation of a surface word into a root and the inflection that was stripped.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MorphologicalParse {
    pub surface: String,
    pub root: String,
    pub pos: Pos,
    #[cfg_attr(feature = "serde", serde(default))]
    pub suffix: String,
}

impl MorphologicalParse {
    pub fn new(
        surface: impl Into<String>,
        root: impl Into<String>,
        pos: Pos,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            root: root.into(),
            pos,
            suffix: suffix.into(),
        }
    }

    pub fn is_verb(&self) -> bool {
        self.pos == Pos::Verb
    }
}

/// Alternate stem of a surface word plus the morphemes that follow it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetamorphicParse {
    pub stem: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub morphemes: Vec<String>,
}

impl MetamorphicParse {
    pub fn new(stem: impl Into<String>, morphemes: Vec<String>) -> Self {
        Self {
            stem: stem.into(),
            morphemes,
        }
    }
}

/// A literal spelling and its sense rank inside the synset it belongs to.
///
/// Rank 1 is the most frequent sense of the spelling. Multiword literals are
/// reported with single spaces between the words.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Literal<'a> {
    pub name: Cow<'a, str>,
    pub sense: u32,
    pub synset_id: &'a str,
}

/// Gloss split into its definition and quoted examples; `raw` keeps the original text.
#[derive(Clone, Debug)]
pub struct Gloss<'a> {
    pub raw: &'a str,
    pub definition: &'a str,
    pub examples: Vec<&'a str>,
}

/// Complete synset record as a borrowed view.
#[derive(Clone, Debug)]
pub struct Synset<'a> {
    pub id: &'a str,
    pub pos: Pos,
    pub literals: Vec<Literal<'a>>,
    pub gloss: Gloss<'a>,
}

impl<'a> Synset<'a> {
    pub fn definition(&self) -> &'a str {
        self.gloss.definition
    }

    /// First usage example, if the gloss has one.
    pub fn example(&self) -> Option<&'a str> {
        self.gloss.examples.first().copied()
    }
}

/// One word of a multiword span handed to the lexicon.
#[derive(Clone, Copy, Debug)]
pub struct IdiomPart<'t> {
    pub parse: &'t MorphologicalParse,
    pub meta: Option<&'t MetamorphicParse>,
}

impl<'t> IdiomPart<'t> {
    pub fn new(parse: &'t MorphologicalParse, meta: Option<&'t MetamorphicParse>) -> Self {
        Self { parse, meta }
    }
}

/// Morphological knowledge the lexicon needs while matching spellings.
pub trait MorphologicalAnalyzer {
    /// Dictionary spellings under which the root of `parse` may be listed.
    fn citation_forms(&self, parse: &MorphologicalParse) -> Vec<String>;
}

/// Sense inventory queried during candidate generation.
///
/// Every method returns an empty list when nothing matches.
pub trait SenseLexicon {
    /// Synsets reachable from a single word.
    fn synsets<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        word: &str,
        parse: &MorphologicalParse,
        meta: Option<&MetamorphicParse>,
        morph: &M,
    ) -> Vec<Synset<'_>>;

    /// Synsets whose literal spans the two or three given words.
    fn idiom_synsets<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        parts: &[IdiomPart<'_>],
        morph: &M,
    ) -> Vec<Synset<'_>>;

    /// Literal-level variant of [`SenseLexicon::idiom_synsets`].
    fn idiom_literals<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        parts: &[IdiomPart<'_>],
        morph: &M,
    ) -> Vec<Literal<'_>>;

    /// Literal-level variant of [`SenseLexicon::synsets`].
    fn literals<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        word: &str,
        parse: &MorphologicalParse,
        meta: Option<&MetamorphicParse>,
        morph: &M,
    ) -> Vec<Literal<'_>>;

    fn synset(&self, id: &str) -> Option<Synset<'_>>;
}

/// Lowercase with Turkish rules: `I` folds to `ı` and `İ` folds to `i`.
pub fn to_lower_tr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

/// Equality after Turkish lowercasing.
pub fn eq_fold_tr(a: &str, b: &str) -> bool {
    let mut left = a.chars().flat_map(fold_char);
    let mut right = b.chars().flat_map(fold_char);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => continue,
            _ => return false,
        }
    }
}

fn fold_char(c: char) -> FoldedChar {
    match c {
        'I' => FoldedChar::One(Some('ı')),
        'İ' => FoldedChar::One(Some('i')),
        other => FoldedChar::Many(other.to_lowercase()),
    }
}

enum FoldedChar {
    One(Option<char>),
    Many(std::char::ToLowercase),
}

impl Iterator for FoldedChar {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            FoldedChar::One(c) => c.take(),
            FoldedChar::Many(it) => it.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_dotted_and_dotless_i() {
        assert_eq!(to_lower_tr("IŞIK"), "ışık");
        assert_eq!(to_lower_tr("İNCİ"), "inci");
        assert_eq!(to_lower_tr("Kitap"), "kitap");
        assert_ne!(to_lower_tr("I"), "i");
    }

    #[test]
    fn compares_with_turkish_folding() {
        assert!(eq_fold_tr("Irmak", "ırmak"));
        assert!(eq_fold_tr("İzmir", "izmir"));
        assert!(eq_fold_tr("kapIsI", "kapısı"));
        assert!(!eq_fold_tr("Irmak", "irmak"));
        assert!(!eq_fold_tr("ev", "eve"));
        assert!(eq_fold_tr("", ""));
    }

    #[test]
    fn pos_round_trips_through_chars() {
        for pos in Pos::ALL {
            assert_eq!(Pos::from_char(pos.to_char()), Some(pos));
        }
        assert_eq!(Pos::from_char('x'), None);
    }
}
