use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use wsd_types::{MorphologicalAnalyzer, SenseLexicon};

use crate::corpus::CorpusError;
use crate::strategy::{PassReport, Strategy};
use crate::token::TokenSequence;
use crate::tree::{ParseTree, TreeLeaves};

/// Seed each pass starts from unless configured otherwise.
pub const DEFAULT_SEED: u64 = 1;

/// Runs one strategy over sentences or tree leaves and persists what it changes.
///
/// Every pass draws its tie-breaks from a fresh generator seeded with the
/// same value, so annotating the same input twice gives the same labels.
pub struct AutoSemantic<'a, L, M: ?Sized> {
    lexicon: &'a L,
    morph: &'a M,
    strategy: Strategy,
    seed: u64,
}

impl<'a, L, M> AutoSemantic<'a, L, M>
where
    L: SenseLexicon,
    M: MorphologicalAnalyzer + ?Sized,
{
    pub fn new(lexicon: &'a L, morph: &'a M, strategy: Strategy) -> Self {
        Self {
            lexicon,
            morph,
            strategy,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Label `tokens` in memory without saving.
    pub fn auto_label_single_semantics<S>(&self, tokens: &mut S) -> PassReport
    where
        S: TokenSequence + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.auto_label_with_rng(tokens, &mut rng)
    }

    /// Label `tokens` drawing tie-breaks from a caller-owned generator.
    pub fn auto_label_with_rng<S, R>(&self, tokens: &mut S, rng: &mut R) -> PassReport
    where
        S: TokenSequence + ?Sized,
        R: Rng,
    {
        let report = self.strategy.label(self.lexicon, self.morph, tokens, rng);
        debug!(
            "{}: labeled {} of {} tokens",
            self.strategy, report.labeled, report.inspected
        );
        report
    }

    /// Label `tokens` and save their container when the pass changed it.
    pub fn auto_semantic<S>(&self, tokens: &mut S) -> Result<PassReport, CorpusError>
    where
        S: TokenSequence + ?Sized,
    {
        let report = self.auto_label_single_semantics(tokens);
        if report.modified {
            tokens.save()?;
        }
        Ok(report)
    }

    /// [`AutoSemantic::auto_semantic`] over the Turkish leaves of `tree`.
    pub fn auto_semantic_tree(&self, tree: &mut ParseTree) -> Result<PassReport, CorpusError> {
        let file = tree.file().map(|p| p.display().to_string());
        let mut leaves = TreeLeaves::new(tree);
        if leaves.is_empty() {
            warn!(
                "{}: no Turkish leaves to annotate",
                file.as_deref().unwrap_or("<in-memory tree>")
            );
        }
        let report = self.auto_semantic(&mut leaves)?;
        if let Some(file) = file {
            info!(
                "{file}: {} of {} leaves labeled{}",
                report.labeled,
                report.inspected,
                if report.modified { ", saved" } else { "" }
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::AnnotatedSentence;
    use crate::strategy::SingleSenseVariant;
    use crate::test_support::{eve_gitti, labels, lexicon, punct, sentence};
    use tempfile::tempdir;
    use wsd_morph::Analyzer;
    use wsd_types::Pos;

    #[test]
    fn repeated_passes_agree() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let annotator = AutoSemantic::new(&wn, &morph, Strategy::Random);
        let mut s = sentence(&[("yüz", "yüz", Pos::Noun), ("ev", "ev", Pos::Noun)]);
        annotator.auto_label_single_semantics(&mut s);
        let first = s.clone();
        annotator.auto_label_single_semantics(&mut s);
        assert_eq!(s, first);
    }

    #[test]
    fn saves_only_modified_sentences() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("yuz.json");
        sentence(&[("yüz", "yüz", Pos::Noun)]).write(&path).unwrap();

        let mut s = AnnotatedSentence::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let single = Strategy::SingleSense(SingleSenseVariant::IdiomWindow);
        let report = AutoSemantic::new(&wn, &morph, single).auto_semantic(&mut s).unwrap();
        assert!(!report.modified);
        assert!(!path.exists());

        let report = AutoSemantic::new(&wn, &morph, Strategy::Lesk).auto_semantic(&mut s).unwrap();
        assert!(report.modified);
        let saved = AnnotatedSentence::load(&path).unwrap();
        assert_eq!(labels(&saved), labels(&s));
        assert!(saved.words[0].semantic().is_some());
    }

    #[test]
    fn random_always_saves() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("punct.json");
        let mut s = AnnotatedSentence::new(vec![punct(".")]).with_file(&path);
        let report = AutoSemantic::new(&wn, &morph, Strategy::Random).auto_semantic(&mut s).unwrap();
        assert_eq!(report.labeled, 0);
        assert!(path.exists());
    }

    #[test]
    fn annotates_tree_leaves_and_saves_tree() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let mut tree = eve_gitti().with_file(&path);

        let report = AutoSemantic::new(&wn, &morph, Strategy::Lesk)
            .auto_semantic_tree(&mut tree)
            .unwrap();
        assert_eq!(report.inspected, 2);
        assert_eq!(report.labeled, 2);

        let saved = ParseTree::load(&path).unwrap();
        let leaf_labels: Vec<Option<&str>> = saved
            .turkish_leaves()
            .into_iter()
            .map(|id| saved.node(id).and_then(|n| n.word.as_ref()).and_then(|w| w.semantic()))
            .collect();
        assert_eq!(leaf_labels, vec![Some("TUR10-0020"), Some("TUR10-0030")]);
    }

    #[test]
    fn seed_is_configurable() {
        let wn = lexicon();
        let morph = Analyzer::new();
        let annotator = AutoSemantic::new(&wn, &morph, Strategy::Lesk).with_seed(42);
        assert_eq!(annotator.seed(), 42);
        assert_eq!(annotator.strategy(), Strategy::Lesk);
    }
}
