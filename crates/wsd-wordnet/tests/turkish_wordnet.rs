use std::env;
use std::path::PathBuf;

use wsd_wordnet::{LoadMode, WordNet};
use wsd_types::Pos;

fn dict_dir() -> Option<PathBuf> {
    env::var("WORDNET_DIR").ok().map(PathBuf::from)
}

#[test]
fn loads_full_turkish_wordnet() {
    let Some(dir) = dict_dir() else {
        eprintln!("skipping: WORDNET_DIR not set");
        return;
    };
    let wn = WordNet::load_with_mode(&dir, LoadMode::Mmap).expect("load turkish wordnet");

    assert!(wn.synset_count() > 10_000, "synsets too small");
    assert!(wn.literal_count() > 10_000, "literals too small");
    assert!(wn.lemma_exists(Pos::Noun, "ev"));
    assert!(wn.lemma_exists(Pos::Verb, "gitmek"));
}
