//! Gloss-overlap disambiguation.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use wsd_types::{MorphologicalAnalyzer, SenseLexicon, Synset, eq_fold_tr};

use super::PassReport;
use crate::candidates::candidate_synsets;
use crate::token::TokenSequence;

/// Label every token with the candidate whose gloss shares the most words
/// with the sequence, breaking ties uniformly at random.
pub fn label<L, M, S, R>(lexicon: &L, morph: &M, tokens: &mut S, rng: &mut R) -> PassReport
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
    R: Rng,
{
    let context = tokens.context_words();
    let mut report = PassReport::default();
    for index in 0..tokens.len() {
        report.inspected += 1;
        let candidates = candidate_synsets(lexicon, morph, &*tokens, index);
        let scored: Vec<(usize, &Synset<'_>)> = candidates
            .iter()
            .map(|synset| (overlap(synset, &context), synset))
            .collect();
        let Some(best_score) = scored.iter().map(|(score, _)| *score).max() else {
            continue;
        };
        let best: Vec<&Synset<'_>> = scored
            .iter()
            .filter(|(score, _)| *score == best_score)
            .map(|(_, synset)| *synset)
            .collect();
        let Some(chosen) = best.choose(rng) else {
            continue;
        };
        debug!(
            "lesk: token {index} -> {} (overlap {best_score}, {} tied of {})",
            chosen.id,
            best.len(),
            candidates.len()
        );
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(chosen.id);
            report.labeled += 1;
        }
    }
    report.modified = report.labeled > 0;
    report
}

/// Pairwise count of definition and example words equal to context words,
/// compared case-insensitively under Turkish rules.
///
/// Repeats count on both sides: a gloss word present twice in the context
/// scores two.
pub fn overlap(synset: &Synset<'_>, context: &[String]) -> usize {
    let examples = synset.gloss.examples.iter().flat_map(|example| example.split_whitespace());
    synset
        .definition()
        .split_whitespace()
        .chain(examples)
        .map(|gloss_word| {
            context
                .iter()
                .filter(|word| eq_fold_tr(gloss_word, word))
                .count()
        })
        .sum()
}
