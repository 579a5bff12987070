use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use wsd_types::{MorphologicalAnalyzer, SenseLexicon};

use super::PassReport;
use crate::candidates::candidate_synsets;
use crate::token::TokenSequence;

/// Label every token that has candidates with one of them chosen uniformly.
///
/// The pass always counts as a modification, even when no token had a
/// candidate.
pub fn label<L, M, S, R>(lexicon: &L, morph: &M, tokens: &mut S, rng: &mut R) -> PassReport
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
    R: Rng,
{
    let mut report = PassReport::default();
    for index in 0..tokens.len() {
        report.inspected += 1;
        let candidates = candidate_synsets(lexicon, morph, &*tokens, index);
        let Some(chosen) = candidates.choose(rng) else {
            continue;
        };
        debug!("random: token {index} -> {} of {}", chosen.id, candidates.len());
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(chosen.id);
            report.labeled += 1;
        }
    }
    report.modified = true;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedSentence;
    use crate::test_support::{lexicon, punct, sentence};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wsd_morph::Analyzer;
    use wsd_types::Pos;

    fn five_nouns() -> AnnotatedSentence {
        sentence(&[
            ("ev", "ev", Pos::Noun),
            ("göz", "göz", Pos::Noun),
            ("kitap", "kitap", Pos::Noun),
            ("okul", "okul", Pos::Noun),
            ("yüz", "yüz", Pos::Noun),
        ])
    }

    #[test]
    fn labels_every_token_with_one_of_its_candidates() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let mut s = five_nouns();
        let report = label(&wn, &morph, &mut s, &mut StdRng::seed_from_u64(1));
        assert_eq!(report.labeled, 5);
        assert!(report.modified);

        for index in 0..s.len() {
            let ids: Vec<&str> = candidate_synsets(&wn, &morph, &s, index)
                .iter()
                .map(|c| c.id)
                .collect();
            let chosen = s.words[index].semantic().unwrap();
            assert!(ids.contains(&chosen), "{chosen} not among {ids:?}");
        }
    }

    #[test]
    fn same_seed_same_labels() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let mut first = five_nouns();
        let mut second = five_nouns();
        label(&wn, &morph, &mut first, &mut StdRng::seed_from_u64(7));
        label(&wn, &morph, &mut second, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn reports_modified_without_candidates() {
        let wn = lexicon();
        let mut s = AnnotatedSentence::new(vec![punct(".")]);
        let report = label(&wn, &Analyzer::new(), &mut s, &mut StdRng::seed_from_u64(1));
        assert_eq!(report.labeled, 0);
        assert!(report.modified);
        assert!(s.words[0].semantic().is_none());
    }
}
