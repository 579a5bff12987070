//! Sense-selection strategies.
//!
//! Every strategy makes one left-to-right pass over a token sequence and
//! reports whether anything changed, which decides if the container is saved.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use wsd_types::{MorphologicalAnalyzer, SenseLexicon};

use crate::token::TokenSequence;

pub mod lesk;
pub mod most_frequent;
pub mod random;
pub mod single_sense;

/// Outcome of one annotation pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PassReport {
    /// Tokens the pass looked at.
    pub inspected: usize,
    /// Tokens that received a sense label.
    pub labeled: usize,
    /// Whether the container should be persisted.
    pub modified: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MostFrequentVariant {
    /// Lowest sense rank under 50 among literals matching the root.
    #[default]
    Rank,
    /// Lowest-ranked literal, preferring multiword spans over the single word.
    IdiomLiteral,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SingleSenseVariant {
    /// `$`-joined senses of every constituent of an inflectional group.
    #[default]
    InflectionalGroups,
    /// First multiword span, then the word itself, with exactly one sense.
    IdiomWindow,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Strategy {
    #[default]
    Lesk,
    MostFrequent(MostFrequentVariant),
    Random,
    SingleSense(SingleSenseVariant),
}

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("unknown strategy {0:?}; expected one of: {list}", list = Strategy::NAMES.join(", "))]
    Unknown(String),
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Lesk,
        Strategy::MostFrequent(MostFrequentVariant::Rank),
        Strategy::MostFrequent(MostFrequentVariant::IdiomLiteral),
        Strategy::Random,
        Strategy::SingleSense(SingleSenseVariant::InflectionalGroups),
        Strategy::SingleSense(SingleSenseVariant::IdiomWindow),
    ];

    pub const NAMES: [&'static str; 6] = [
        "lesk",
        "most-frequent",
        "most-frequent-idiom",
        "random",
        "single-sense",
        "single-sense-idiom",
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Lesk => "lesk",
            Strategy::MostFrequent(MostFrequentVariant::Rank) => "most-frequent",
            Strategy::MostFrequent(MostFrequentVariant::IdiomLiteral) => "most-frequent-idiom",
            Strategy::Random => "random",
            Strategy::SingleSense(SingleSenseVariant::InflectionalGroups) => "single-sense",
            Strategy::SingleSense(SingleSenseVariant::IdiomWindow) => "single-sense-idiom",
        }
    }

    /// Run one pass over `tokens`, drawing tie-breaks from `rng`.
    pub fn label<L, M, S, R>(self, lexicon: &L, morph: &M, tokens: &mut S, rng: &mut R) -> PassReport
    where
        L: SenseLexicon,
        M: MorphologicalAnalyzer + ?Sized,
        S: TokenSequence + ?Sized,
        R: Rng,
    {
        match self {
            Strategy::Lesk => lesk::label(lexicon, morph, tokens, rng),
            Strategy::MostFrequent(MostFrequentVariant::Rank) => {
                most_frequent::label_by_rank(lexicon, morph, tokens)
            }
            Strategy::MostFrequent(MostFrequentVariant::IdiomLiteral) => {
                most_frequent::label_by_idiom_literal(lexicon, morph, tokens)
            }
            Strategy::Random => random::label(lexicon, morph, tokens, rng),
            Strategy::SingleSense(SingleSenseVariant::InflectionalGroups) => {
                single_sense::label_inflectional_groups(lexicon, morph, tokens)
            }
            Strategy::SingleSense(SingleSenseVariant::IdiomWindow) => {
                single_sense::label_idiom_window(lexicon, morph, tokens)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| StrategyError::Unknown(s.to_string()))
    }
}
