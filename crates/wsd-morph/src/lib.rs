//! Turkish root finding for sense lookup.
//!
//! A deliberately small analyzer: check exceptions, strip inflectional
//! suffixes, and verify candidates via a caller-provided existence predicate
//! over dictionary citation forms. It only depends on `wsd-types` and the
//! callback you supply, so any lexicon can back it.
//!
//! # How it works
//! 1. Emit the surface form if its citation form exists.
//! 2. Check exceptions (`*.exc` files).
//! 3. Strip POS-specific suffixes; when a vowel-initial suffix exposed a
//!    softened final consonant (`kitabı` → `kitab`) also try the hard one.
//! 4. Deduplicate while preserving provenance (`Surface`, `Exception`, `Rule`).
//!
//! Citation forms follow dictionary conventions: verbs are listed with the
//! infinitive suffix chosen by vowel harmony (`git` → `gitmek`,
//! `at` → `atmak`); everything else is listed under its root.
//!
//! # Example
//! ```no_run
//! use wsd_morph::Analyzer;
//! use wsd_types::Pos;
//! use wsd_wordnet::{LoadMode, WordNet};
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = "/path/to/dict";
//! let wn = WordNet::load_with_mode(dict, LoadMode::Mmap)?;
//! let morph = Analyzer::load(dict)?;
//! let exists = |pos, lemma: &str| wn.lemma_exists(pos, lemma);
//!
//! for cand in morph.roots_for(Pos::Verb, "gidiyor", exists) {
//!     println!("{:?}: {}", cand.source, cand.root);
//! }
//! # Ok(()) }
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wsd_types::{MetamorphicParse, MorphologicalAnalyzer, MorphologicalParse, Pos, to_lower_tr};

/// Where a candidate root originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A root candidate paired with its POS and provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RootCandidate<'a> {
    pub pos: Pos,
    pub root: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Suffix-stripping analyzer parameterised by caller-provided existence checks.
#[derive(Debug, Default)]
pub struct Analyzer {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Analyzer {
    /// Analyzer without exception lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load exception lists (`noun.exc`, `verb.exc`, `adj.exc`, `adv.exc`) from a dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        Ok(Self {
            exceptions: HashMap::from([
                (Pos::Noun, load_exc(dir.join("noun.exc"))?),
                (Pos::Verb, load_exc(dir.join("verb.exc"))?),
                (Pos::Adj, load_exc(dir.join("adj.exc"))?),
                (Pos::Adv, load_exc(dir.join("adv.exc"))?),
            ]),
        })
    }

    /// Generate roots for a surface form, returning provenance.
    ///
    /// `lemma_exists` receives the citation form of each candidate (for verbs
    /// the infinitive) and typically delegates to `WordNet::lemma_exists`.
    pub fn roots_for<'a, F>(
        &'a self,
        pos: Pos,
        surface: &str,
        lemma_exists: F,
    ) -> Vec<RootCandidate<'a>>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let mut seen: HashSet<Cow<'a, str>> = HashSet::new();
        let mut out: Vec<RootCandidate<'a>> = Vec::new();
        let norm_surface = normalize(surface);
        if norm_surface.is_empty() {
            return out;
        }

        if lemma_exists(pos, &citation_form(pos, &norm_surface)) {
            push_unique(
                &mut out,
                &mut seen,
                RootCandidate {
                    pos,
                    root: Cow::Owned(norm_surface.clone()),
                    source: CandidateSource::Surface,
                },
            );
        }

        if let Some(exc_map) = self.exceptions.get(&pos)
            && let Some(entries) = exc_map.get(&norm_surface)
        {
            for root in entries {
                if lemma_exists(pos, &citation_form(pos, root)) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        RootCandidate {
                            pos,
                            root: Cow::Borrowed(root.as_str()),
                            source: CandidateSource::Exception,
                        },
                    );
                }
            }
        }

        for &(suffix, replacement) in rules_for(pos) {
            let Some(stem) = apply_rule(&norm_surface, suffix, replacement) else {
                continue;
            };
            let hardened = if starts_with_vowel(suffix) {
                harden_final(&stem)
            } else {
                None
            };
            for candidate in std::iter::once(stem).chain(hardened) {
                if lemma_exists(pos, &citation_form(pos, &candidate)) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        RootCandidate {
                            pos,
                            root: Cow::Owned(candidate),
                            source: CandidateSource::Rule {
                                suffix,
                                replacement,
                            },
                        },
                    );
                }
            }
        }

        out
    }

    /// Analyze a surface word under every part of speech.
    ///
    /// Each hit becomes a morphological parse (root, POS, stripped suffix) and
    /// a metamorphic parse whose stem is the surface with the suffix removed
    /// but without consonant hardening.
    pub fn analyze<F>(
        &self,
        surface: &str,
        lemma_exists: F,
    ) -> Vec<(MorphologicalParse, MetamorphicParse)>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let norm_surface = normalize(surface);
        let mut out = Vec::new();
        for pos in Pos::ALL {
            for cand in self.roots_for(pos, surface, &lemma_exists) {
                let (stem, suffix) = match &cand.source {
                    CandidateSource::Rule { suffix, .. } => (
                        norm_surface.strip_suffix(*suffix).unwrap_or(&norm_surface),
                        *suffix,
                    ),
                    CandidateSource::Surface | CandidateSource::Exception => {
                        (norm_surface.as_str(), "")
                    }
                };
                let morphemes = if suffix.is_empty() {
                    Vec::new()
                } else {
                    vec![suffix.to_string()]
                };
                out.push((
                    MorphologicalParse::new(surface, cand.root.as_ref(), pos, suffix),
                    MetamorphicParse::new(stem, morphemes),
                ));
            }
        }
        out
    }
}

impl MorphologicalAnalyzer for Analyzer {
    fn citation_forms(&self, parse: &MorphologicalParse) -> Vec<String> {
        vec![citation_form(parse.pos, &normalize(&parse.root))]
    }
}

/// Dictionary spelling of `root`: the infinitive for verbs, the root otherwise.
pub fn citation_form(pos: Pos, root: &str) -> String {
    match pos {
        Pos::Verb => infinitive(root),
        Pos::Noun | Pos::Adj | Pos::Adv => root.to_string(),
    }
}

/// Append `-mak` after a back vowel and `-mek` otherwise.
pub fn infinitive(root: &str) -> String {
    let back = root
        .chars()
        .rev()
        .find(|c| is_vowel(*c))
        .is_some_and(|c| matches!(c, 'a' | 'ı' | 'o' | 'u'));
    if back {
        format!("{root}mak")
    } else {
        format!("{root}mek")
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'ı' | 'i' | 'o' | 'ö' | 'u' | 'ü')
}

fn starts_with_vowel(suffix: &str) -> bool {
    suffix.chars().next().is_some_and(is_vowel)
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => normalize(s),
            None => continue,
        };
        let roots: Vec<String> = parts.map(normalize).collect();
        if !roots.is_empty() {
            map.insert(surface, roots);
        }
    }
    Ok(map)
}

fn normalize(text: &str) -> String {
    to_lower_tr(text.trim())
}

fn push_unique<'a>(
    out: &mut Vec<RootCandidate<'a>>,
    seen: &mut HashSet<Cow<'a, str>>,
    candidate: RootCandidate<'a>,
) {
    if seen.insert(candidate.root.clone()) {
        out.push(candidate);
    }
}

fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Option<String> {
    let stem = surface.strip_suffix(suffix)?;
    // Single-letter roots are almost always false positives.
    if stem.chars().count() < 2 {
        return None;
    }
    Some(format!("{stem}{replacement}"))
}

/// Undo final-consonant softening (`kitab` → `kitap`, `gid` → `git`).
fn harden_final(stem: &str) -> Option<String> {
    let mut chars = stem.chars();
    let last = chars.next_back()?;
    let hard = match last {
        'b' => 'p',
        'c' => 'ç',
        'd' => 't',
        'g' | 'ğ' => 'k',
        _ => return None,
    };
    let mut out = chars.as_str().to_string();
    out.push(hard);
    Some(out)
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("lardan", ""),
            ("lerden", ""),
            ("larda", ""),
            ("lerde", ""),
            ("lara", ""),
            ("lere", ""),
            ("ları", ""),
            ("leri", ""),
            ("lar", ""),
            ("ler", ""),
            ("nın", ""),
            ("nin", ""),
            ("nun", ""),
            ("nün", ""),
            ("dan", ""),
            ("den", ""),
            ("tan", ""),
            ("ten", ""),
            ("da", ""),
            ("de", ""),
            ("ta", ""),
            ("te", ""),
            ("ya", ""),
            ("ye", ""),
            ("yı", ""),
            ("yi", ""),
            ("yu", ""),
            ("yü", ""),
            ("ın", ""),
            ("in", ""),
            ("un", ""),
            ("ün", ""),
            ("sı", ""),
            ("si", ""),
            ("su", ""),
            ("sü", ""),
            ("a", ""),
            ("e", ""),
            ("ı", ""),
            ("i", ""),
            ("u", ""),
            ("ü", ""),
        ],
        Pos::Verb => &[
            ("iyor", ""),
            ("ıyor", ""),
            ("uyor", ""),
            ("üyor", ""),
            ("yor", ""),
            ("yacak", ""),
            ("yecek", ""),
            ("acak", ""),
            ("ecek", ""),
            ("mış", ""),
            ("miş", ""),
            ("muş", ""),
            ("müş", ""),
            ("dı", ""),
            ("di", ""),
            ("du", ""),
            ("dü", ""),
            ("tı", ""),
            ("ti", ""),
            ("tu", ""),
            ("tü", ""),
            ("mak", ""),
            ("mek", ""),
            ("ar", ""),
            ("er", ""),
            ("ır", ""),
            ("ir", ""),
            ("ur", ""),
            ("ür", ""),
        ],
        Pos::Adj => &[("ca", ""), ("ce", ""), ("ça", ""), ("çe", "")],
        Pos::Adv => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_exists(targets: &[(&str, Pos)]) -> impl Fn(Pos, &str) -> bool {
        let set: HashSet<(Pos, String)> = targets
            .iter()
            .map(|(lemma, pos)| (*pos, normalize(lemma)))
            .collect();
        move |pos, lemma| set.contains(&(pos, normalize(lemma)))
    }

    #[test]
    fn uses_exceptions_and_rules() {
        let mut morph = Analyzer::new();
        morph.exceptions.insert(
            Pos::Verb,
            HashMap::from([("dedi".into(), vec!["de".into()])]),
        );

        let candidates = morph.roots_for(Pos::Verb, "dedi", fake_exists(&[("demek", Pos::Verb)]));
        assert_eq!(candidates.len(), 1);
        assert!(matches!(candidates[0].source, CandidateSource::Exception));
        assert_eq!(candidates[0].root, "de");
    }

    #[test]
    fn includes_surface_and_rule_hits() {
        let morph = Analyzer::new();
        let candidates = morph.roots_for(
            Pos::Noun,
            "kara",
            fake_exists(&[("kara", Pos::Noun), ("kar", Pos::Noun)]),
        );
        assert_eq!(candidates.len(), 2);
        assert!(matches!(candidates[0].source, CandidateSource::Surface));
        assert_eq!(candidates[1].root, "kar");
        assert!(matches!(
            candidates[1].source,
            CandidateSource::Rule { suffix: "a", .. }
        ));
    }

    #[test]
    fn hardens_softened_final_consonant() {
        let morph = Analyzer::new();
        let kitap = morph.roots_for(Pos::Noun, "kitabı", fake_exists(&[("kitap", Pos::Noun)]));
        assert_eq!(kitap.len(), 1);
        assert_eq!(kitap[0].root, "kitap");

        let git = morph.roots_for(Pos::Verb, "gidiyor", fake_exists(&[("gitmek", Pos::Verb)]));
        assert_eq!(git.len(), 1);
        assert_eq!(git[0].root, "git");
    }

    #[test]
    fn picks_infinitive_by_vowel_harmony() {
        assert_eq!(infinitive("git"), "gitmek");
        assert_eq!(infinitive("at"), "atmak");
        assert_eq!(infinitive("oku"), "okumak");
        assert_eq!(infinitive("gör"), "görmek");
        assert_eq!(citation_form(Pos::Noun, "ev"), "ev");

        let parse = MorphologicalParse::new("KOŞTU", "koş", Pos::Verb, "tu");
        assert_eq!(Analyzer::new().citation_forms(&parse), vec!["koşmak"]);
    }

    #[test]
    fn analyze_emits_parse_and_stem() {
        let morph = Analyzer::new();
        let parses = morph.analyze(
            "Eve",
            fake_exists(&[("ev", Pos::Noun), ("gitmek", Pos::Verb)]),
        );
        assert_eq!(parses.len(), 1);
        let (parse, meta) = &parses[0];
        assert_eq!(parse.surface, "Eve");
        assert_eq!(parse.root, "ev");
        assert_eq!(parse.pos, Pos::Noun);
        assert_eq!(parse.suffix, "e");
        assert_eq!(meta.stem, "ev");
        assert_eq!(meta.morphemes, vec!["e"]);

        assert!(morph.analyze(".", fake_exists(&[("ev", Pos::Noun)])).is_empty());
    }
}
