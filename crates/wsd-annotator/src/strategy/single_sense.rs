//! Label only where the lexicon leaves no choice.

use tracing::debug;
use wsd_types::{MorphologicalAnalyzer, SenseLexicon};

use super::PassReport;
use crate::token::{AnnotatedWord, TokenSequence};
use crate::window::Window;

/// Separator between constituent senses of an inflectional group label.
pub const SENSE_DELIMITER: &str = "$";

/// Largest inflectional group labelled as a whole.
pub const MAX_GROUP_WORDS: usize = 3;

/// Label tokens carrying an inflectional group of one to three words when
/// every constituent has exactly one sense; the label joins those senses
/// with [`SENSE_DELIMITER`].
pub fn label_inflectional_groups<L, M, S>(lexicon: &L, morph: &M, tokens: &mut S) -> PassReport
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
    S: TokenSequence + ?Sized,
{
    let mut report = PassReport::default();
    for index in 0..tokens.len() {
        report.inspected += 1;
        let label = tokens
            .token(index)
            .filter(|token| token.inflectional_group.is_some())
            .and_then(|token| composite_label(lexicon, morph, token));
        let Some(label) = label else {
            continue;
        };
        debug!("single-sense: token {index} -> {label}");
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(label);
            report.labeled += 1;
        }
    }
    report.modified = report.labeled > 0;
    report
}

fn composite_label<L, M>(lexicon: &L, morph: &M, token: &AnnotatedWord) -> Option<String>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
{
    let count = token.word_count();
    if !(1..=MAX_GROUP_WORDS).contains(&count) {
        return None;
    }
    let mut ids = Vec::with_capacity(count);
    for position in 0..count {
        let parse = token.parse_at(position)?;
        let senses = lexicon.synsets(&parse.root, parse, token.metamorphic_parse_at(position), morph);
        match senses.as_slice() {
            [only] => ids.push(only.id),
            _ => return None,
        }
    }
    Some(ids.join(SENSE_DELIMITER))
}

/// Label unlabeled parsed tokens from the first multiword span with exactly
/// one sense, otherwise from the token itself when it has exactly one sense.
pub fn label_idiom_window<L, M, S>(lexicon: &L, morph: &M, tokens: &mut S) -> PassReport
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
                unique_sense(lexicon, morph, &window)
            }
            _ => None,
        };
        let Some(id) = chosen else {
            continue;
        };
        debug!("single-sense-idiom: token {index} -> {id}");
        if let Some(token) = tokens.token_mut(index) {
            token.set_semantic(id);
            report.labeled += 1;
        }
    }
    report.modified = report.labeled > 0;
    report
}

fn unique_sense<L, M>(lexicon: &L, morph: &M, window: &Window<'_>) -> Option<String>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
{
    let parse = window.current.parse()?;
    for span in window.idiom_spans() {
        if let [only] = lexicon.idiom_synsets(&span.parts, morph).as_slice() {
            return Some(only.id.to_string());
        }
    }
    match lexicon
        .synsets(&parse.root, parse, window.current.metamorphic_parse(), morph)
        .as_slice()
    {
        [only] => Some(only.id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedSentence;
    use crate::test_support::{labels, lexicon, sentence, word};
    use wsd_morph::Analyzer;
    use wsd_types::{MorphologicalParse, Pos};

    fn group(name: &str, constituents: &[(&str, Pos)]) -> AnnotatedWord {
        constituents
            .iter()
            .fold(AnnotatedWord::new(name), |token, (root, pos)| {
                token.with_parse(MorphologicalParse::new(*root, *root, *pos, ""), None)
            })
            .with_inflectional_group(name)
    }

    #[test]
    fn joins_unique_constituent_senses() {
        let wn = lexicon();
        let mut s = AnnotatedSentence::new(vec![group(
            "kitapokumak",
            &[("kitap", Pos::Noun), ("oku", Pos::Verb)],
        )]);
        let report = label_inflectional_groups(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![Some("TUR10-0120$TUR10-0140")]);
        assert!(report.modified);
    }

    #[test]
    fn joins_three_constituent_group() {
        let wn = lexicon();
        let mut s = AnnotatedSentence::new(vec![group(
            "kitapokulokumak",
            &[("kitap", Pos::Noun), ("okul", Pos::Noun), ("oku", Pos::Verb)],
        )]);
        let report = label_inflectional_groups(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![Some("TUR10-0120$TUR10-0130$TUR10-0140")]);
        assert_eq!(report.labeled, 1);
    }

    #[test]
    fn any_ambiguous_constituent_blocks_the_label() {
        let wn = lexicon();
        let mut s = AnnotatedSentence::new(vec![
            group("kitapyüz", &[("kitap", Pos::Noun), ("yüz", Pos::Noun)]),
            group("masa", &[("masa", Pos::Noun)]),
        ]);
        let report = label_inflectional_groups(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![None, None]);
        assert!(!report.modified);
    }

    #[test]
    fn groups_outside_one_to_three_words_are_skipped() {
        let wn = lexicon();
        let four = [("kitap", Pos::Noun), ("okul", Pos::Noun), ("göz", Pos::Noun), ("kitap", Pos::Noun)];
        let mut s = AnnotatedSentence::new(vec![
            group("dört", &four),
            AnnotatedWord::new("boş").with_inflectional_group("boş"),
            word("kitap", "kitap", Pos::Noun),
        ]);
        label_inflectional_groups(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![None, None, None]);
    }

    #[test]
    fn idiom_window_prefers_unique_multiword_sense() {
        let wn = lexicon();
        let mut s = sentence(&[("göz", "göz", Pos::Noun), ("attı", "at", Pos::Verb)]);
        let report = label_idiom_window(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![Some("TUR10-0060"), Some("TUR10-0060")]);
        assert_eq!(report.labeled, 2);
    }

    #[test]
    fn idiom_window_needs_exactly_one_sense() {
        let wn = lexicon();
        let mut s = sentence(&[("yüz", "yüz", Pos::Noun)]);
        let report = label_idiom_window(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![None]);
        assert!(!report.modified);

        let mut s = sentence(&[("kitap", "kitap", Pos::Noun)]);
        label_idiom_window(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![Some("TUR10-0120")]);
    }

    #[test]
    fn idiom_window_keeps_existing_labels() {
        let wn = lexicon();
        let mut s = sentence(&[("kitap", "kitap", Pos::Noun)]);
        s.words[0].set_semantic("manual");
        let report = label_idiom_window(&wn, &Analyzer::new(), &mut s);
        assert_eq!(labels(&s), vec![Some("manual")]);
        assert_eq!(report.labeled, 0);
    }
}
