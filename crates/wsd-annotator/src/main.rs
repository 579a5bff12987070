use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use wsd_annotator::{
    Accuracy, AnnotatedSentence, AutoSemantic, Corpus, DEFAULT_SEED, ParseTree, Strategy,
    TreeBank, TreeLeaves,
};
use wsd_morph::Analyzer;
use wsd_wordnet::{LoadMode, WordNet};

const DEFAULT_WORDNET_PATH: &str = "turkish_wordnet";
const DEFAULT_WORDNET_IMAGE_PATH: &str = "/app/wordnet";

type Annotator<'a> = AutoSemantic<'a, WordNet, Analyzer>;

/// Automatic word-sense annotation against a Turkish WordNet.
#[derive(Debug, Parser)]
#[command(name = "wsd-annotate", version)]
struct Cli {
    /// Directory holding data.tur and the optional *.exc files
    #[arg(long, env = "WORDNET_DIR", global = true)]
    wordnet_dir: Option<PathBuf>,
    /// How the sense inventory is read: mmap or owned
    #[arg(long, env = "WORDNET_LOAD_MODE", value_parser = parse_load_mode, default_value = "mmap", global = true)]
    wordnet_mode: LoadMode,
    #[arg(long, env = "WSD_STRATEGY", default_value_t = Strategy::Lesk, global = true)]
    strategy: Strategy,
    /// Seed every pass starts from
    #[arg(long, default_value_t = DEFAULT_SEED, global = true)]
    seed: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Annotate sentence files in place
    Sentences {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Annotate the Turkish leaves of parse-tree files in place
    Trees {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Analyze and annotate raw text, printing the sentence as JSON
    Text { text: String },
    /// Annotate a copy of a corpus in memory and score it against gold labels
    Evaluate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        gold: PathBuf,
        /// Directories hold parse trees instead of sentences
        #[arg(long)]
        trees: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let wordnet_path = cli.wordnet_dir.clone().unwrap_or_else(default_wordnet_path);
    info!(
        "using wordnet at {} (mode: {:?})",
        wordnet_path.display(),
        cli.wordnet_mode
    );
    info!("strategy: {} (seed {})", cli.strategy, cli.seed);

    let start = Instant::now();
    let wordnet = WordNet::load_with_mode(&wordnet_path, cli.wordnet_mode)
        .with_context(|| format!("loading wordnet from {}", wordnet_path.display()))?;
    let analyzer = Analyzer::load(&wordnet_path)?;
    info!(
        "wordnet loaded in {} ms ({} synsets, {} literals)",
        start.elapsed().as_millis(),
        wordnet.synset_count(),
        wordnet.literal_count()
    );

    let annotator = AutoSemantic::new(&wordnet, &analyzer, cli.strategy).with_seed(cli.seed);
    match cli.command {
        Command::Sentences { paths } => {
            for path in paths {
                let mut sentence = AnnotatedSentence::load(&path)?;
                if sentence.words.is_empty() {
                    warn!("{}: empty sentence", path.display());
                }
                let report = annotator.auto_semantic(&mut sentence)?;
                info!(
                    "{}: {} of {} words labeled{}",
                    path.display(),
                    report.labeled,
                    report.inspected,
                    if report.modified { ", saved" } else { "" }
                );
            }
        }
        Command::Trees { paths } => {
            for path in paths {
                let mut tree = ParseTree::load(&path)?;
                annotator.auto_semantic_tree(&mut tree)?;
            }
        }
        Command::Text { text } => {
            let mut sentence = AnnotatedSentence::from_text(&text, |surface| {
                analyzer.analyze(surface, |pos, lemma| wordnet.lemma_exists(pos, lemma))
            });
            annotator.auto_label_single_semantics(&mut sentence);
            println!("{}", serde_json::to_string_pretty(&sentence)?);
        }
        Command::Evaluate { input, gold, trees } => {
            let accuracy = if trees {
                evaluate_trees(&annotator, &input, &gold)?
            } else {
                evaluate_sentences(&annotator, &input, &gold)?
            };
            info!("accuracy {:.4}", accuracy.ratio());
            println!("{accuracy}");
        }
    }
    Ok(())
}

fn evaluate_sentences(annotator: &Annotator<'_>, input: &Path, gold: &Path) -> anyhow::Result<Accuracy> {
    let mut predicted = Corpus::load_dir(input)?;
    let gold_corpus = Corpus::load_dir(gold)?;
    if predicted.len() != gold_corpus.len() {
        bail!(
            "{} holds {} sentences but {} holds {}",
            input.display(),
            predicted.len(),
            gold.display(),
            gold_corpus.len()
        );
    }
    let mut accuracy = Accuracy::default();
    for (sentence, expected) in predicted.sentences_mut().iter_mut().zip(gold_corpus.sentences()) {
        annotator.auto_label_single_semantics(sentence);
        accuracy += Accuracy::compare(&*sentence, expected);
    }
    Ok(accuracy)
}

fn evaluate_trees(annotator: &Annotator<'_>, input: &Path, gold: &Path) -> anyhow::Result<Accuracy> {
    let mut predicted = TreeBank::load_dir(input)?;
    let mut gold_bank = TreeBank::load_dir(gold)?;
    if predicted.len() != gold_bank.len() {
        bail!(
            "{} holds {} trees but {} holds {}",
            input.display(),
            predicted.len(),
            gold.display(),
            gold_bank.len()
        );
    }
    let mut accuracy = Accuracy::default();
    for (tree, expected) in predicted.trees_mut().iter_mut().zip(gold_bank.trees_mut()) {
        let mut leaves = TreeLeaves::new(tree);
        annotator.auto_label_single_semantics(&mut leaves);
        accuracy += Accuracy::compare(&leaves, &TreeLeaves::new(expected));
    }
    Ok(accuracy)
}

fn default_wordnet_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_WORDNET_PATH);
    if local.exists() {
        return local;
    }
    PathBuf::from(DEFAULT_WORDNET_IMAGE_PATH)
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode {other:?}; expected mmap or owned")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
