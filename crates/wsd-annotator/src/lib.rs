pub mod candidates;
pub mod corpus;
pub mod driver;
pub mod evaluation;
pub mod strategy;
pub mod token;
pub mod tree;
pub mod window;

#[cfg(test)]
mod test_support;

pub use candidates::candidate_synsets;
pub use corpus::{AnnotatedSentence, Corpus, CorpusError};
pub use driver::{AutoSemantic, DEFAULT_SEED};
pub use evaluation::Accuracy;
pub use strategy::{MostFrequentVariant, PassReport, SingleSenseVariant, Strategy, StrategyError};
pub use token::{AnnotatedWord, TokenSequence};
pub use tree::{ParseNode, ParseTree, TreeBank, TreeLeaves};
pub use window::{IdiomSpan, SpanKind, Window};
