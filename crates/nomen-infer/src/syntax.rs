//! Syntax model capability (part-of-speech tags and noun chunks) and the
//! feature-name validator seam built on top of it.

use nomen_core::{DisambiguationContext, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Determiner,
    Adposition,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Tags that carry lexical content inside a noun phrase.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            Self::Noun | Self::ProperNoun | Self::Adjective | Self::Verb | Self::Numeral
        )
    }
}

/// One tagged token with its byte span in the analysed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub text: String,
    pub span: Span,
    pub pos: PartOfSpeech,
}

/// External linguistic model.
pub trait SyntaxAnalyzer: Send + Sync {
    /// Tag every token of `text`.
    fn tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Byte spans of the noun chunks of `text`.
    fn noun_chunks(&self, text: &str) -> Vec<Span>;
}

/// One of the two independent checks applied to a candidate occurrence.
pub trait FeatureNameValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, text: &str, ctx: &DisambiguationContext, span: &Span) -> bool;
}

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w'-]*|[^\w\s]").unwrap());

const DETERMINERS: &[&str] = &["a", "an", "the", "this", "that", "these", "those", "its"];
const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "near", "from", "to", "with", "by", "for", "into", "within", "inside",
];

/// Capitalization-based stand-in for a statistical syntax model.
///
/// Runs of capitalized words form the noun chunks, so a full personal name
/// ("George Hale") is one chunk while "Hale crater" is not.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapitalizationAnalyzer;

impl CapitalizationAnalyzer {
    fn classify(word: &str) -> PartOfSpeech {
        let lower = word.to_lowercase();
        if !word.chars().any(char::is_alphanumeric) {
            PartOfSpeech::Punctuation
        } else if DETERMINERS.contains(&lower.as_str()) {
            PartOfSpeech::Determiner
        } else if ADPOSITIONS.contains(&lower.as_str()) {
            PartOfSpeech::Adposition
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            PartOfSpeech::Numeral
        } else if lower.ends_with("-like") {
            PartOfSpeech::Adjective
        } else if word.chars().next().is_some_and(char::is_uppercase) {
            PartOfSpeech::ProperNoun
        } else {
            PartOfSpeech::Noun
        }
    }
}

impl SyntaxAnalyzer for CapitalizationAnalyzer {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        WORD_RE
            .find_iter(text)
            .map(|m| TaggedToken {
                text: m.as_str().to_string(),
                span: m.range(),
                pos: Self::classify(m.as_str()),
            })
            .collect()
    }

    fn noun_chunks(&self, text: &str) -> Vec<Span> {
        let mut chunks = Vec::new();
        let mut current: Option<Span> = None;
        for token in self.tag(text) {
            if token.pos == PartOfSpeech::ProperNoun {
                current = Some(match current {
                    Some(span) => span.start..token.span.end,
                    None => token.span,
                });
            } else if let Some(span) = current.take() {
                chunks.push(span);
            }
        }
        chunks.extend(current);
        chunks
    }
}
