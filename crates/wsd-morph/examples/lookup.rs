use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wsd_morph::Analyzer;
use wsd_types::Pos;
use wsd_wordnet::{LoadMode, WordNet};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(
        "usage: cargo run -p wsd-morph --example lookup -- <dict-dir> [--demo | <word>]",
    )?;
    let next = args.next();
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let demo_words: Vec<String> = match next.as_deref() {
        Some("--demo") => vec![
            "gitti".into(),
            "evlerden".into(),
            "kitabı".into(),
            "gidiyor".into(),
            "okuyacak".into(),
        ],
        Some(word) => vec![word.to_string()],
        None => bail!(
            "usage: cargo run -p wsd-morph --example lookup -- <dict-dir> [--demo | <word>]"
        ),
    };

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;
    let morph = Analyzer::load(&dict_dir)
        .with_context(|| format!("loading exceptions from {}", dict_dir.display()))?;

    println!("Dictionary: {}", dict_dir.display());

    for word in demo_words {
        println!("\nSurface: {}", word);
        for pos in Pos::ALL {
            let candidates = morph.roots_for(pos, &word, |p, lemma| wn.lemma_exists(p, lemma));
            if candidates.is_empty() {
                continue;
            }
            println!("  {:?}:", pos);
            for cand in candidates {
                println!("    {:<10} [{:?}]", cand.root, cand.source);
            }
        }
    }

    Ok(())
}
