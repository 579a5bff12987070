use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wsd_types::Pos;
use wsd_wordnet::{LoadMode, WordNet};

fn main() -> Result<()> {
    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wsd-wordnet --example stats -- <path-to-dict-dir>")?;

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    let mut per_pos: HashMap<Pos, usize> = HashMap::new();
    let mut literal_count = 0usize;
    let mut multiword_count = 0usize;
    let mut example_count = 0usize;

    for syn in wn.iter_synsets() {
        *per_pos.entry(syn.pos).or_default() += 1;
        literal_count += syn.literals.len();
        multiword_count += syn
            .literals
            .iter()
            .filter(|l| l.name.contains(' '))
            .count();
        example_count += syn.gloss.examples.len();
    }

    println!("Dictionary: {}", dict_dir.display());
    println!("Synsets      : {}", wn.synset_count());
    for pos in Pos::ALL {
        println!("  {:<6}     : {}", pos.to_string(), per_pos.get(&pos).copied().unwrap_or(0));
    }
    println!("Literals     : {}", literal_count);
    println!("Spellings    : {}", wn.literal_count());
    println!("Multiword    : {}", multiword_count);
    println!("Examples     : {}", example_count);

    for (pos, lemma) in [(Pos::Noun, "ev"), (Pos::Verb, "gitmek")] {
        println!(
            "Lemma '{}' ({:?}) exists? {}",
            lemma,
            pos,
            wn.lemma_exists(pos, lemma)
        );
    }

    Ok(())
}
