use std::env;
use std::path::PathBuf;

use wsd_morph::Analyzer;
use wsd_types::Pos;
use wsd_wordnet::{LoadMode, WordNet};

fn dict_dir() -> Option<PathBuf> {
    env::var("WORDNET_DIR").ok().map(PathBuf::from)
}

#[test]
fn resolves_demo_words_against_turkish_wordnet() {
    let Some(dir) = dict_dir() else {
        eprintln!("skipping: WORDNET_DIR not set");
        return;
    };
    let wn = WordNet::load_with_mode(&dir, LoadMode::Mmap).expect("load wordnet");
    let morph = Analyzer::load(&dir).expect("load morph");
    let exists = |pos, lemma: &str| wn.lemma_exists(pos, lemma);

    let gidiyor = morph.roots_for(Pos::Verb, "gidiyor", &exists);
    assert!(gidiyor.iter().any(|c| c.root == "git"));

    let evler = morph.roots_for(Pos::Noun, "evler", &exists);
    assert!(evler.iter().any(|c| c.root == "ev"));
}
