//! Annotated sentences and directories of them on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wsd_types::{MetamorphicParse, MorphologicalParse};

use crate::token::{AnnotatedWord, TokenSequence};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed annotation file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CorpusError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    pub words: Vec<AnnotatedWord>,
    #[serde(skip)]
    file: Option<PathBuf>,
}

impl AnnotatedSentence {
    /// In-memory sentence; saving it is a no-op until a file is attached.
    pub fn new(words: Vec<AnnotatedWord>) -> Self {
        Self { words, file: None }
    }

    /// Split `text` on whitespace and attach every analysis `analyze` returns for each word.
    pub fn from_text<F>(text: &str, mut analyze: F) -> Self
    where
        F: FnMut(&str) -> Vec<(MorphologicalParse, MetamorphicParse)>,
    {
        let words = text
            .split_whitespace()
            .map(|surface| {
                analyze(surface)
                    .into_iter()
                    .fold(AnnotatedWord::new(surface), |word, (parse, meta)| {
                        word.with_parse(parse, Some(meta))
                    })
            })
            .collect();
        Self::new(words)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| CorpusError::io(path, e))?;
        let mut sentence: Self =
            serde_json::from_slice(&bytes).map_err(|e| CorpusError::json(path, e))?;
        sentence.file = Some(path.to_path_buf());
        Ok(sentence)
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), CorpusError> {
        write_json(path.as_ref(), self)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn word(&self, index: usize) -> Option<&AnnotatedWord> {
        self.words.get(index)
    }

    /// Surface forms joined by single spaces.
    pub fn to_words(&self) -> String {
        self.words
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TokenSequence for AnnotatedSentence {
    fn len(&self) -> usize {
        self.words.len()
    }

    fn token(&self, index: usize) -> Option<&AnnotatedWord> {
        self.words.get(index)
    }

    fn token_mut(&mut self, index: usize) -> Option<&mut AnnotatedWord> {
        self.words.get_mut(index)
    }

    fn context_words(&self) -> Vec<String> {
        self.to_words().split_whitespace().map(str::to_owned).collect()
    }

    fn save(&mut self) -> Result<(), CorpusError> {
        match &self.file {
            Some(path) => write_json(path, self),
            None => Ok(()),
        }
    }
}

/// Every sentence file of a directory, in file-name order.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    sentences: Vec<AnnotatedSentence>,
}

impl Corpus {
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let sentences = json_files(dir.as_ref())?
            .iter()
            .map(AnnotatedSentence::load)
            .collect::<Result<_, _>>()?;
        Ok(Self { sentences })
    }

    pub fn sentences(&self) -> &[AnnotatedSentence] {
        &self.sentences
    }

    pub fn sentences_mut(&mut self) -> &mut [AnnotatedSentence] {
        &mut self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

pub(crate) fn json_files(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let entries = fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CorpusError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CorpusError> {
    let mut json = serde_json::to_vec_pretty(value).map_err(|e| CorpusError::json(path, e))?;
    json.push(b'\n');
    fs::write(path, json).map_err(|e| CorpusError::io(path, e))
}
