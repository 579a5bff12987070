//! Most-frequent-sense baselines driven by literal sense ranks.

use tracing::debug;
use wsd_types::{Literal, MorphologicalAnalyzer, SenseLexicon, Synset, to_lower_tr};

use super::PassReport;
use crate::candidates::candidate_synsets;
use crate::token::TokenSequence;
use crate::window::Window;

/// Sense ranks at or above this are never picked by rank.
pub const RANK_THRESHOLD: u32 = 50;

/// Label each token with the candidate holding the lowest-ranked literal
/// that starts with the token's root or ends with it as a separate word.
///
/// Always reports a modification.
pub fn label_by_rank<L, M, S>(lexicon: &L, morph: &M, tokens: &mut S) -> PassReport
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
{
    let mut report = PassReport::default();
    for index in 0..tokens.len() {
        report.inspected += 1;
        let Some(root) = tokens
            .token(index)
            .and_then(|token| token.parse())
            .map(|parse| to_lower_tr(&parse.root))
        else {
            continue;
        };
        let candidates = candidate_synsets(lexicon, morph, &*tokens, index);
        let Some(best) = most_frequent_synset(&candidates, &root) else {
            continue;
        };
        debug!("most-frequent: token {index} -> {}", best.id);
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(best.id);
            report.labeled += 1;
        }
    }
    report.modified = true;
    report
}

/// A lone candidate wins outright. Otherwise the first synset holding the
/// smallest literal rank below [`RANK_THRESHOLD`] among literals that start
/// with `root` or end with `" " + root`.
pub fn most_frequent_synset<'a, 'l>(candidates: &'a [Synset<'l>], root: &str) -> Option<&'a Synset<'l>> {
    if let [only] = candidates {
        return Some(only);
    }
    let root = to_lower_tr(root);
    let suffix = format!(" {root}");
    let mut min_sense = RANK_THRESHOLD;
    let mut best = None;
    for synset in candidates {
        for literal in &synset.literals {
            let name = to_lower_tr(&literal.name);
            if (name.starts_with(&root) || name.ends_with(&suffix)) && literal.sense < min_sense {
                min_sense = literal.sense;
                best = Some(synset);
            }
        }
    }
    best
}

/// Label unlabeled tokens with the lowest-ranked literal of the first
/// multiword span that has any, falling back to the token's own literals.
pub fn label_by_idiom_literal<L, M, S>(lexicon: &L, morph: &M, tokens: &mut S) -> PassReport
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
{
    let mut report = PassReport::default();
    for index in 0..tokens.len() {
        report.inspected += 1;
        let chosen = match Window::at(&*tokens, index) {
            Some(window) if window.current.semantic().is_none() => {
                idiom_literal_choice(lexicon, morph, &window)
            }
            _ => None,
        };
        let Some(id) = chosen else {
            continue;
        };
        debug!("most-frequent-idiom: token {index} -> {id}");
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(id);
            report.labeled += 1;
        }
    }
    report.modified = report.labeled > 0;
    report
}

fn idiom_literal_choice<L, M>(lexicon: &L, morph: &M, window: &Window<'_>) -> Option<String>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
{
    let parse = window.current.parse()?;
    for span in window.idiom_spans() {
        let literals = lexicon.idiom_literals(&span.parts, morph);
        if let Some(synset) = most_frequent_literal(lexicon, &literals) {
            return Some(synset.id.to_string());
        }
    }
    let literals = lexicon.literals(&parse.root, parse, window.current.metamorphic_parse(), morph);
    most_frequent_literal(lexicon, &literals).map(|synset| synset.id.to_string())
}

/// Synset of the lowest-ranked literal; a lone literal is taken whatever its rank.
pub fn most_frequent_literal<'l, L: SenseLexicon>(lexicon: &'l L, literals: &[Literal<'_>]) -> Option<Synset<'l>> {
    let id = match literals {
        [] => return None,
        [only] => only.synset_id,
        _ => literals.iter().min_by_key(|literal| literal.sense)?.synset_id,
    };
    lexicon.synset(id)
}
