//! Constituency trees whose leaves carry annotated words.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::corpus::{CorpusError, json_files, write_json};
use crate::token::{AnnotatedWord, TokenSequence};

/// Label of the parent of empty-category leaves.
pub const EMPTY_CATEGORY: &str = "-NONE-";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParseNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<AnnotatedWord>,
}

/// Arena of nodes; children refer to nodes by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
    #[serde(default)]
    root: usize,
    #[serde(skip)]
    file: Option<PathBuf>,
}

impl ParseTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![ParseNode {
                label: root_label.into(),
                children: Vec::new(),
                word: None,
            }],
            root: 0,
            file: None,
        }
    }

    /// Append an inner node under `parent` and return its index.
    pub fn add_child(&mut self, parent: usize, label: impl Into<String>) -> usize {
        self.push(parent, label.into(), None)
    }

    /// Append a leaf carrying `word` under `parent` and return its index.
    pub fn add_leaf(&mut self, parent: usize, label: impl Into<String>, word: AnnotatedWord) -> usize {
        self.push(parent, label.into(), Some(word))
    }

    fn push(&mut self, parent: usize, label: String, word: Option<AnnotatedWord>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ParseNode {
            label,
            children: Vec::new(),
            word,
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        id
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, id: usize) -> Option<&ParseNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| CorpusError::io(path, e))?;
        let mut tree: Self =
            serde_json::from_slice(&bytes).map_err(|e| CorpusError::json(path, e))?;
        tree.file = Some(path.to_path_buf());
        Ok(tree)
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

    /// Write back to the file the tree was loaded from; no-op for in-memory trees.
    pub fn save(&self) -> Result<(), CorpusError> {
        match &self.file {
            Some(path) => write_json(path, self),
            None => Ok(()),
        }
    }

    /// Leaves that carry a real Turkish word, in left-to-right order.
    ///
    /// Leaves under an empty category and punctuation-only leaves are left
    /// out. Dangling or repeated child indices are ignored.
    pub fn turkish_leaves(&self) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![(self.root, None::<usize>)];
        while let Some((id, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if std::mem::replace(&mut seen[id], true) {
                continue;
            }
            if node.children.is_empty() {
                if self.is_turkish_leaf(node, parent) {
                    leaves.push(id);
                }
                continue;
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, Some(id))));
        }
        leaves
    }

    fn is_turkish_leaf(&self, node: &ParseNode, parent: Option<usize>) -> bool {
        let Some(word) = &node.word else {
            return false;
        };
        let under_empty_category = parent
            .and_then(|p| self.nodes.get(p))
            .is_some_and(|p| p.label == EMPTY_CATEGORY);
        !under_empty_category && !word.is_punctuation()
    }

    fn word(&self, id: usize) -> Option<&AnnotatedWord> {
        self.nodes.get(id).and_then(|n| n.word.as_ref())
    }

    fn word_mut(&mut self, id: usize) -> Option<&mut AnnotatedWord> {
        self.nodes.get_mut(id).and_then(|n| n.word.as_mut())
    }
}

/// The Turkish leaves of a tree viewed as a token sequence.
///
/// Leaf membership is fixed when the view is created.
pub struct TreeLeaves<'a> {
    tree: &'a mut ParseTree,
    leaves: Vec<usize>,
}

impl<'a> TreeLeaves<'a> {
    pub fn new(tree: &'a mut ParseTree) -> Self {
        let leaves = tree.turkish_leaves();
        Self { tree, leaves }
    }

    pub fn node_ids(&self) -> &[usize] {
        &self.leaves
    }
}

impl TokenSequence for TreeLeaves<'_> {
    fn len(&self) -> usize {
        self.leaves.len()
    }

    fn token(&self, index: usize) -> Option<&AnnotatedWord> {
        self.leaves.get(index).and_then(|&id| self.tree.word(id))
    }

    fn token_mut(&mut self, index: usize) -> Option<&mut AnnotatedWord> {
        let id = *self.leaves.get(index)?;
        self.tree.word_mut(id)
    }

    fn context_words(&self) -> Vec<String> {
        self.leaves
            .iter()
            .filter_map(|&id| self.tree.word(id))
            .map(|w| w.name.clone())
            .collect()
    }

    fn save(&mut self) -> Result<(), CorpusError> {
        self.tree.save()
    }
}

/// Every tree file of a directory, in file-name order.
#[derive(Clone, Debug, Default)]
pub struct TreeBank {
    trees: Vec<ParseTree>,
}

impl TreeBank {
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let trees = json_files(dir.as_ref())?
            .iter()
            .map(ParseTree::load)
            .collect::<Result<_, _>>()?;
        Ok(Self { trees })
    }

    pub fn trees(&self) -> &[ParseTree] {
        &self.trees
    }

    pub fn trees_mut(&mut self) -> &mut [ParseTree] {
        &mut self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
