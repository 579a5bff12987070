use serde::{Deserialize, Serialize};
use wsd_types::{IdiomPart, MetamorphicParse, MorphologicalParse};

use crate::corpus::CorpusError;

/// One word position of a sentence or one leaf of a parse tree.
///
/// `parses[i]` and `metamorphic_parses[i]` belong together. When
/// `inflectional_group` is present the parses are the constituent words
/// fused into this surface form, in order; otherwise the first parse is the
/// primary reading.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parses: Vec<MorphologicalParse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metamorphic_parses: Vec<MetamorphicParse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflectional_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<String>,
}

impl AnnotatedWord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a parse, keeping metamorphic parses aligned when one is given.
    pub fn with_parse(mut self, parse: MorphologicalParse, meta: Option<MetamorphicParse>) -> Self {
        self.parses.push(parse);
        if let Some(meta) = meta {
            self.metamorphic_parses.push(meta);
        }
        self
    }

    pub fn with_inflectional_group(mut self, group: impl Into<String>) -> Self {
        self.inflectional_group = Some(group.into());
        self
    }

    pub fn parse(&self) -> Option<&MorphologicalParse> {
        self.parses.first()
    }

    pub fn metamorphic_parse(&self) -> Option<&MetamorphicParse> {
        self.metamorphic_parses.first()
    }

    pub fn parse_at(&self, index: usize) -> Option<&MorphologicalParse> {
        self.parses.get(index)
    }

    pub fn metamorphic_parse_at(&self, index: usize) -> Option<&MetamorphicParse> {
        self.metamorphic_parses.get(index)
    }

    /// Number of words carried by this token (constituents of an inflectional group).
    pub fn word_count(&self) -> usize {
        self.parses.len()
    }

    pub fn semantic(&self) -> Option<&str> {
        self.semantic.as_deref()
    }

    pub fn set_semantic(&mut self, id: impl Into<String>) {
        self.semantic = Some(id.into());
    }

    /// The primary parse packaged for multiword lookups.
    pub fn idiom_part(&self) -> Option<IdiomPart<'_>> {
        self.parse()
            .map(|parse| IdiomPart::new(parse, self.metamorphic_parse()))
    }

    pub fn is_punctuation(&self) -> bool {
        !self.name.is_empty() && self.name.chars().all(|c| !c.is_alphanumeric())
    }
}

/// Ordered, positionally addressable view over annotated tokens.
///
/// Implemented by [`crate::AnnotatedSentence`] and by
/// [`crate::TreeLeaves`], so every strategy runs unchanged over both.
pub trait TokenSequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn token(&self, index: usize) -> Option<&AnnotatedWord>;

    fn token_mut(&mut self, index: usize) -> Option<&mut AnnotatedWord>;

    /// Surface words the overlap scorer compares glosses against.
    fn context_words(&self) -> Vec<String>;

    /// Persist the container the tokens came from.
    fn save(&mut self) -> Result<(), CorpusError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsd_types::Pos;

    #[test]
    fn primary_parse_is_first() {
        let word = AnnotatedWord::new("evde")
            .with_parse(
                MorphologicalParse::new("evde", "ev", Pos::Noun, "de"),
                Some(MetamorphicParse::new("ev", vec!["de".into()])),
            )
            .with_parse(MorphologicalParse::new("evde", "evde", Pos::Noun, ""), None);
        assert_eq!(word.parse().map(|p| p.root.as_str()), Some("ev"));
        assert_eq!(word.word_count(), 2);
        assert!(word.metamorphic_parse_at(1).is_none());
        let part = word.idiom_part().expect("parsed word");
        assert_eq!(part.meta.map(|m| m.stem.as_str()), Some("ev"));
    }

    #[test]
    fn detects_punctuation() {
        assert!(AnnotatedWord::new(".").is_punctuation());
        assert!(AnnotatedWord::new("...").is_punctuation());
        assert!(!AnnotatedWord::new("ev").is_punctuation());
        assert!(!AnnotatedWord::new("").is_punctuation());
    }

    #[test]
    fn omits_empty_fields_when_serialized() {
        let json = serde_json::to_string(&AnnotatedWord::new(".")).unwrap();
        assert_eq!(json, r#"{"name":"."}"#);
    }
}
