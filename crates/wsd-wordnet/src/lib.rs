//! Load a Turkish WordNet sense dictionary with zero-copy text.
//!
//! The dictionary is a single `data.tur` file, one synset per line:
//!
//! ```text
//! TUR10-0000010 n 1 ev 1 | insanların içinde yaşadığı yapı; "eve gitti"
//! TUR10-0000020 v 1 göz_atmak 1 | kısaca bakmak
//! ```
//!
//! Fields are the synset id, the POS character, the literal count (hex),
//! `literal sense` pairs and, after `|`, the gloss. Multiword literals use
//! `_` between words. Lines starting with whitespace are skipped.
//!
//! Callers choose between memory-mapped files or owned buffers at runtime
//! via [`LoadMode`]; [`WordNet::from_bytes`] builds a dictionary from memory.
//!
//! # Example
//! ```no_run
//! use wsd_types::{MorphologicalAnalyzer, MorphologicalParse, Pos, SenseLexicon};
//! use wsd_wordnet::{LoadMode, WordNet};
//!
//! struct RootOnly;
//! impl MorphologicalAnalyzer for RootOnly {
//!     fn citation_forms(&self, parse: &MorphologicalParse) -> Vec<String> {
//!         vec![parse.root.clone()]
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load_with_mode("/path/to/dict", LoadMode::Mmap)?;
//! let parse = MorphologicalParse::new("eve", "ev", Pos::Noun, "e");
//! for syn in wn.synsets("ev", &parse, None, &RootOnly) {
//!     println!("{}: {}", syn.id, syn.gloss.definition);
//! }
//! # Ok(()) }
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use wsd_types::{
    Gloss, IdiomPart, Literal, MetamorphicParse, MorphologicalAnalyzer, MorphologicalParse, Pos,
    SenseLexicon, Synset, to_lower_tr,
};

const DATA_FILE: &str = "data.tur";

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the dictionary (fast, zero-copy).
    Mmap,
    /// Read the dictionary into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TextRef {
    start: usize,
    len: usize,
}

struct LiteralData {
    text: TextRef,
    sense: u32,
}

struct GlossData {
    raw: TextRef,
    definition: TextRef,
    examples: Vec<TextRef>,
}

struct SynsetData {
    id: TextRef,
    pos: Pos,
    literals: Vec<LiteralData>,
    gloss: GlossData,
}

/// `(synset index, literal index)` pair pointing at one literal.
type LiteralSlot = (usize, usize);

/// In-memory view of a sense dictionary backed by mmap or an owned buffer.
pub struct WordNet {
    data: Buffer,
    synsets: Vec<SynsetData>,
    by_id: HashMap<String, usize>,
    literal_index: HashMap<String, Vec<LiteralSlot>>,
}

impl WordNet {
    /// Load from a directory containing `data.tur`, memory-mapping the file.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = dict_dir.as_ref().join(DATA_FILE);
        if !path.exists() {
            anyhow::bail!("missing required WordNet file: {}", path.display());
        }
        let data = load_file(path, mode)?;
        Self::from_buffer(data)
    }

    /// Build a dictionary from `data.tur` contents already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_buffer(Buffer::Owned(bytes.into()))
    }

    fn from_buffer(data: Buffer) -> Result<Self> {
        let synsets = parse_data(data.as_slice())?;

        let mut by_id = HashMap::with_capacity(synsets.len());
        let mut literal_index: HashMap<String, Vec<LiteralSlot>> = HashMap::new();
        let bytes = data.as_slice();
        for (syn_idx, syn) in synsets.iter().enumerate() {
            let id = slice_text(bytes, syn.id).to_string();
            if by_id.insert(id, syn_idx).is_some() {
                anyhow::bail!("duplicate synset id {}", slice_text(bytes, syn.id));
            }
            for (lit_idx, lit) in syn.literals.iter().enumerate() {
                literal_index
                    .entry(normalize_literal(slice_text(bytes, lit.text)))
                    .or_default()
                    .push((syn_idx, lit_idx));
            }
        }

        Ok(Self {
            data,
            synsets,
            by_id,
            literal_index,
        })
    }

    /// Check whether a spelling is listed as a literal of some synset with `pos`.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.literal_index
            .get(&normalize_literal(lemma))
            .is_some_and(|slots| slots.iter().any(|(s, _)| self.synsets[*s].pos == pos))
    }

    /// Fetch a `Synset` by id if loaded.
    pub fn get_synset(&self, id: &str) -> Option<Synset<'_>> {
        self.by_id
            .get(id)
            .map(|idx| self.make_synset_view(&self.synsets[*idx]))
    }

    /// Iterate over all synsets in dictionary order.
    pub fn iter_synsets(&self) -> impl Iterator<Item = Synset<'_>> + '_ {
        self.synsets.iter().map(|s| self.make_synset_view(s))
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Number of distinct literal spellings.
    pub fn literal_count(&self) -> usize {
        self.literal_index.len()
    }

    fn text(&self, r: TextRef) -> &str {
        slice_text(self.data.as_slice(), r)
    }

    fn make_literal(&self, (syn_idx, lit_idx): LiteralSlot) -> Literal<'_> {
        let syn = &self.synsets[syn_idx];
        let lit = &syn.literals[lit_idx];
        Literal {
            name: display_literal(self.text(lit.text)),
            sense: lit.sense,
            synset_id: self.text(syn.id),
        }
    }

    fn make_synset_view<'a>(&'a self, data: &'a SynsetData) -> Synset<'a> {
        let id = self.text(data.id);
        let literals = data
            .literals
            .iter()
            .map(|l| Literal {
                name: display_literal(self.text(l.text)),
                sense: l.sense,
                synset_id: id,
            })
            .collect();
        let gloss = Gloss {
            raw: self.text(data.gloss.raw),
            definition: self.text(data.gloss.definition),
            examples: data
                .gloss
                .examples
                .iter()
                .map(|r| self.text(*r))
                .collect(),
        };

        Synset {
            id,
            pos: data.pos,
            literals,
            gloss,
        }
    }

    fn slots_for(&self, spellings: &[String]) -> Vec<LiteralSlot> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for spelling in spellings {
            if let Some(slots) = self.literal_index.get(spelling) {
                for slot in slots {
                    if seen.insert(*slot) {
                        out.push(*slot);
                    }
                }
            }
        }
        out
    }

    fn synsets_for_slots(&self, slots: &[LiteralSlot]) -> Vec<Synset<'_>> {
        let mut seen = HashSet::new();
        slots
            .iter()
            .filter(|(syn_idx, _)| seen.insert(*syn_idx))
            .map(|(syn_idx, _)| self.make_synset_view(&self.synsets[*syn_idx]))
            .collect()
    }
}

impl SenseLexicon for WordNet {
    fn synsets<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        word: &str,
        parse: &MorphologicalParse,
        meta: Option<&MetamorphicParse>,
        morph: &M,
    ) -> Vec<Synset<'_>> {
        let slots = self.slots_for(&word_spellings(word, parse, meta, morph));
        self.synsets_for_slots(&slots)
    }

    fn idiom_synsets<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        parts: &[IdiomPart<'_>],
        morph: &M,
    ) -> Vec<Synset<'_>> {
        let slots = self.slots_for(&idiom_spellings(parts, morph));
        self.synsets_for_slots(&slots)
    }

    fn idiom_literals<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        parts: &[IdiomPart<'_>],
        morph: &M,
    ) -> Vec<Literal<'_>> {
        self.slots_for(&idiom_spellings(parts, morph))
            .into_iter()
            .map(|slot| self.make_literal(slot))
            .collect()
    }

    fn literals<M: MorphologicalAnalyzer + ?Sized>(
        &self,
        word: &str,
        parse: &MorphologicalParse,
        meta: Option<&MetamorphicParse>,
        morph: &M,
    ) -> Vec<Literal<'_>> {
        self.slots_for(&word_spellings(word, parse, meta, morph))
            .into_iter()
            .map(|slot| self.make_literal(slot))
            .collect()
    }

    fn synset(&self, id: &str) -> Option<Synset<'_>> {
        self.get_synset(id)
    }
}

/// Spellings tried for a single word: the word itself, its citation forms, the metamorphic stem.
fn word_spellings<M: MorphologicalAnalyzer + ?Sized>(
    word: &str,
    parse: &MorphologicalParse,
    meta: Option<&MetamorphicParse>,
    morph: &M,
) -> Vec<String> {
    let mut out = Vec::new();
    push_spelling(&mut out, word);
    for form in morph.citation_forms(parse) {
        push_spelling(&mut out, &form);
    }
    if let Some(meta) = meta {
        push_spelling(&mut out, &meta.stem);
    }
    out
}

/// Every joined spelling a two- or three-word span may be listed under.
///
/// Inner words contribute their root, metamorphic stem and surface form; the
/// final word additionally contributes its citation forms (first).
fn idiom_spellings<M: MorphologicalAnalyzer + ?Sized>(
    parts: &[IdiomPart<'_>],
    morph: &M,
) -> Vec<String> {
    if !(2..=3).contains(&parts.len()) {
        return Vec::new();
    }
    let last = parts.len() - 1;
    let mut combos = vec![String::new()];
    for (i, part) in parts.iter().enumerate() {
        let mut forms = Vec::new();
        if i == last {
            for form in morph.citation_forms(part.parse) {
                push_spelling(&mut forms, &form);
            }
        }
        push_spelling(&mut forms, &part.parse.root);
        if let Some(meta) = part.meta {
            push_spelling(&mut forms, &meta.stem);
        }
        push_spelling(&mut forms, &part.parse.surface);

        combos = combos
            .iter()
            .flat_map(|prefix| {
                forms.iter().map(move |form| {
                    if prefix.is_empty() {
                        form.clone()
                    } else {
                        format!("{prefix} {form}")
                    }
                })
            })
            .collect();
    }

    let mut seen = HashSet::new();
    combos.retain(|c| seen.insert(c.clone()));
    combos
}

fn push_spelling(out: &mut Vec<String>, raw: &str) {
    let key = normalize_literal(raw);
    if !key.is_empty() && !out.contains(&key) {
        out.push(key);
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_data(bytes: &[u8]) -> Result<Vec<SynsetData>> {
    let mut synsets = Vec::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{DATA_FILE}:{} invalid utf8", lineno + 1))?;
        let (left, gloss_part) = match line_str.split_once('|') {
            Some((l, r)) => (l.trim(), r.trim()),
            None => (line_str.trim(), ""),
        };

        let tokens: Vec<&str> = left.split_ascii_whitespace().collect();
        if tokens.len() < 3 {
            anyhow::bail!("{DATA_FILE}:{} malformed data line", lineno + 1);
        }

        let id = text_ref_str(bytes, tokens[0]);
        let pos = tokens[1]
            .chars()
            .next()
            .and_then(Pos::from_char)
            .ok_or_else(|| anyhow::anyhow!("{DATA_FILE}:{} invalid pos {}", lineno + 1, tokens[1]))?;
        let w_cnt = usize::from_str_radix(tokens[2], 16)
            .with_context(|| format!("{DATA_FILE}:{} w_cnt", lineno + 1))?;

        let mut idx = 3;
        let literals_end = w_cnt.checked_mul(2).and_then(|n| n.checked_add(idx));
        if literals_end.is_none_or(|end| end > tokens.len()) {
            anyhow::bail!("{DATA_FILE}:{} not enough literal/sense pairs", lineno + 1);
        }
        let mut literals = Vec::with_capacity(w_cnt);
        for _ in 0..w_cnt {
            let sense: u32 = tokens[idx + 1]
                .parse()
                .with_context(|| format!("{DATA_FILE}:{} sense", lineno + 1))?;
            literals.push(LiteralData {
                text: text_ref_str(bytes, tokens[idx]),
                sense,
            });
            idx += 2;
        }
        if tokens.len() > idx {
            anyhow::bail!("{DATA_FILE}:{} trailing tokens before gloss", lineno + 1);
        }

        synsets.push(SynsetData {
            id,
            pos,
            literals,
            gloss: parse_gloss(bytes, gloss_part),
        });
    }

    Ok(synsets)
}

fn parse_gloss(root: &[u8], gloss: &str) -> GlossData {
    let trimmed = gloss.trim();
    let gloss_raw = text_ref_str(root, trimmed);

    let mut examples = Vec::new();
    let mut in_quote = false;
    let mut quote_start: Option<usize> = None;
    let mut def_end = trimmed.len();
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '"' => {
                if in_quote {
                    if let Some(start) = quote_start.take()
                        && idx > start + 1
                    {
                        examples.push(text_ref_str(root, &trimmed[start + 1..idx]));
                    }
                } else {
                    quote_start = Some(idx);
                }
                in_quote = !in_quote;
            }
            ';' if !in_quote && def_end == trimmed.len() => {
                def_end = idx;
            }
            _ => {}
        }
    }

    GlossData {
        raw: gloss_raw,
        definition: text_ref_str(root, trimmed[..def_end].trim()),
        examples,
    }
}

fn text_ref_str(root: &[u8], token: &str) -> TextRef {
    if token.is_empty() {
        return TextRef { start: 0, len: 0 };
    }
    let start = token.as_ptr() as usize - root.as_ptr() as usize;
    TextRef {
        start,
        len: token.len(),
    }
}

fn slice_text(bytes: &[u8], r: TextRef) -> &str {
    let slice = &bytes[r.start..r.start + r.len];
    std::str::from_utf8(slice).expect("dictionary text is valid utf8")
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}

fn display_literal(text: &str) -> Cow<'_, str> {
    if text.contains('_') {
        Cow::Owned(text.replace('_', " "))
    } else {
        Cow::Borrowed(text)
    }
}

fn normalize_literal(text: &str) -> String {
    to_lower_tr(text.trim()).replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Infinitive;

    impl MorphologicalAnalyzer for Infinitive {
        fn citation_forms(&self, parse: &MorphologicalParse) -> Vec<String> {
            if parse.is_verb() {
                vec![format!("{}mek", parse.root)]
            } else {
                vec![parse.root.clone()]
            }
        }
    }

    const DATA: &str = "  license line\n\
        TUR10-1 n 1 ev 1 | konut; \"eve gitti\" \"ev sahibi\"\n\
        TUR10-2 n 2 ev 2 yuva 1 | aile ocağı\n\
        TUR10-3 v 1 gitmek 1 | bir yere yönelmek\n\
        TUR10-4 v 1 göz_atmak 1 | kısaca bakmak\n\
        TUR10-5 n 1 Irmak 1 | akarsu\n";

    #[test]
    fn parses_gloss_definition_and_examples() {
        let wn = WordNet::from_bytes(DATA).unwrap();
        let syn = wn.get_synset("TUR10-1").unwrap();
        assert_eq!(syn.pos, Pos::Noun);
        assert_eq!(syn.gloss.definition, "konut");
        assert_eq!(syn.gloss.examples, vec!["eve gitti", "ev sahibi"]);
        assert_eq!(syn.example(), Some("eve gitti"));
        assert!(syn.gloss.raw.starts_with("konut;"));
    }

    #[test]
    fn single_word_lookup_keeps_dictionary_order() {
        let wn = WordNet::from_bytes(DATA).unwrap();
        let parse = MorphologicalParse::new("eve", "ev", Pos::Noun, "e");
        let ids: Vec<_> = wn
            .synsets("ev", &parse, None, &Infinitive)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["TUR10-1", "TUR10-2"]);

        let literals = wn.literals("ev", &parse, None, &Infinitive);
        assert_eq!(literals.len(), 2);
        assert_eq!(literals[1].sense, 2);
        assert_eq!(literals[1].synset_id, "TUR10-2");
    }

    #[test]
    fn verbs_resolve_through_citation_forms() {
        let wn = WordNet::from_bytes(DATA).unwrap();
        let parse = MorphologicalParse::new("gitti", "git", Pos::Verb, "ti");
        let found = wn.synsets("git", &parse, None, &Infinitive);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "TUR10-3");
    }

    #[test]
    fn matches_multiword_literals() {
        let wn = WordNet::from_bytes(DATA).unwrap();
        let goz = MorphologicalParse::new("göz", "göz", Pos::Noun, "");
        let atti = MorphologicalParse::new("attı", "at", Pos::Verb, "tı");
        let parts = [IdiomPart::new(&goz, None), IdiomPart::new(&atti, None)];
        let synsets = wn.idiom_synsets(&parts, &Infinitive);
        assert_eq!(synsets.len(), 1);
        assert_eq!(synsets[0].literals[0].name, "göz atmak");

        let literals = wn.idiom_literals(&parts, &Infinitive);
        assert_eq!(literals.len(), 1);
        assert_eq!(literals[0].synset_id, "TUR10-4");

        assert!(wn.idiom_synsets(&parts[..1], &Infinitive).is_empty());
    }

    #[test]
    fn literal_keys_use_turkish_lowercase() {
        let wn = WordNet::from_bytes(DATA).unwrap();
        assert!(wn.lemma_exists(Pos::Noun, "ırmak"));
        assert!(wn.lemma_exists(Pos::Noun, "IRMAK"));
        assert!(!wn.lemma_exists(Pos::Noun, "irmak"));
        assert!(!wn.lemma_exists(Pos::Verb, "ev"));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(WordNet::from_bytes("TUR10-1 n 2 ev 1 | eksik").is_err());
        assert!(WordNet::from_bytes("TUR10-1 x 1 ev 1 | konut").is_err());
        assert!(WordNet::from_bytes("TUR10-1 n 1 ev bir | konut").is_err());
        assert!(WordNet::from_bytes("A n 1 ev 1 | x\nA n 1 ev 1 | y").is_err());
    }

    #[test]
    fn oversized_literal_count_is_an_error() {
        let err = WordNet::from_bytes("TUR10-1 n ffffffffffffffff ev 1 | konut")
            .err()
            .expect("literal count rejected");
        assert!(err.to_string().contains(":1 not enough literal/sense pairs"), "{err}");
        assert!(WordNet::from_bytes("TUR10-1 n 8000000000000000 ev 1 | konut").is_err());
    }
}
