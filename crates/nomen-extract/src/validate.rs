//! Phrase and role validation of a candidate occurrence.

use std::sync::Arc;

use nomen_core::{DisambiguationContext, Span};
use nomen_infer::{FeatureNameValidator, PartOfSpeech, SyntaxAnalyzer};
use tracing::debug;

use crate::tokens::{tokens_after, tokens_before};

fn overlaps(a: &Span, b: &Span) -> bool {
    a.start < b.end && b.start < a.end
}

/// Rejects occurrences used as adjectives ("a rayleigh-like profile", "Hale" as "hale").
pub struct RoleValidator {
    analyzer: Arc<dyn SyntaxAnalyzer>,
}

impl RoleValidator {
    pub fn new(analyzer: Arc<dyn SyntaxAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl FeatureNameValidator for RoleValidator {
    fn name(&self) -> &'static str {
        "role"
    }

    fn validate(&self, text: &str, _ctx: &DisambiguationContext, span: &Span) -> bool {
        !self
            .analyzer
            .tag(text)
            .iter()
            .any(|t| overlaps(&t.span, span) && t.pos == PartOfSpeech::Adjective)
    }
}

/// Rejects occurrences inside a noun phrase that carries another content word
/// besides the target and feature-type names (e.g. a person's full name).
pub struct PhraseValidator {
    analyzer: Arc<dyn SyntaxAnalyzer>,
}

impl PhraseValidator {
    pub fn new(analyzer: Arc<dyn SyntaxAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl FeatureNameValidator for PhraseValidator {
    fn name(&self) -> &'static str {
        "phrase"
    }

    fn validate(&self, text: &str, ctx: &DisambiguationContext, span: &Span) -> bool {
        let chunks = self.analyzer.noun_chunks(text);
        let Some(chunk) = chunks
            .iter()
            .find(|c| c.start <= span.start && span.end <= c.end)
        else {
            return true;
        };

        !self.analyzer.tag(text).iter().any(|t| {
            chunk.start <= t.span.start
                && t.span.end <= chunk.end
                && !overlaps(&t.span, span)
                && t.pos.is_content()
                && !ctx.is_own_context_term(t.text.trim_matches(|c: char| !c.is_alphanumeric()))
        })
    }
}

/// Runs both validators behind the minimum-context guard.
pub struct NameValidation {
    validators: [Arc<dyn FeatureNameValidator>; 2],
    min_context_tokens: usize,
}

impl NameValidation {
    pub fn new(
        role: Arc<dyn FeatureNameValidator>,
        phrase: Arc<dyn FeatureNameValidator>,
        min_context_tokens: usize,
    ) -> Self {
        Self {
            validators: [role, phrase],
            min_context_tokens,
        }
    }

    /// Role and phrase validators sharing one syntax model.
    pub fn with_analyzer(analyzer: Arc<dyn SyntaxAnalyzer>, min_context_tokens: usize) -> Self {
        Self::new(
            Arc::new(RoleValidator::new(analyzer.clone())),
            Arc::new(PhraseValidator::new(analyzer)),
            min_context_tokens,
        )
    }

    /// `usgs_term == false` is the non-planetary-candidate path and always passes.
    pub fn validate_feature_name(
        &self,
        text: &str,
        ctx: &DisambiguationContext,
        span: &Span,
        usgs_term: bool,
    ) -> bool {
        if !usgs_term {
            return true;
        }
        if text.get(span.clone()).is_none() {
            return false;
        }

        let min = self.min_context_tokens;
        if tokens_before(text, span.start, min).len() < min
            || tokens_after(text, span.end, min).len() < min
        {
            debug!("Too little context around occurrence at {:?}", span);
            return false;
        }

        for validator in &self.validators {
            if !validator.validate(text, ctx, span) {
                debug!("Occurrence at {:?} rejected by {} validator", span, validator.name());
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomen_infer::TaggedToken;

    /// Tags words from a fixed lexicon; chunks are the given word ranges.
    struct FakeAnalyzer {
        adjectives: Vec<&'static str>,
        proper: Vec<&'static str>,
        chunk_words: Vec<(&'static str, &'static str)>,
    }

    impl SyntaxAnalyzer for FakeAnalyzer {
        fn tag(&self, text: &str) -> Vec<TaggedToken> {
            crate::tokens::tokenize(text)
                .into_iter()
                .map(|t| {
                    let pos = if self.adjectives.iter().any(|a| *a == t.text) {
                        PartOfSpeech::Adjective
                    } else if self.proper.iter().any(|p| *p == t.text) {
                        PartOfSpeech::ProperNoun
                    } else if t.text == "the" || t.text == "a" {
                        PartOfSpeech::Determiner
                    } else {
                        PartOfSpeech::Noun
                    };
                    TaggedToken {
                        text: t.text.to_string(),
                        span: t.start..t.end,
                        pos,
                    }
                })
                .collect()
        }

        fn noun_chunks(&self, text: &str) -> Vec<Span> {
            self.chunk_words
                .iter()
                .filter_map(|(first, last)| {
                    let start = text.find(first)?;
                    let end = text[start..].find(last)? + start + last.len();
                    Some(start..end)
                })
                .collect()
        }
    }

    fn ctx() -> DisambiguationContext {
        DisambiguationContext::new("Hale", "crater", "craters", "Mars")
    }

    fn span_of(text: &str, word: &str) -> Span {
        let s = text.find(word).unwrap();
        s..s + word.len()
    }

    fn validation(analyzer: FakeAnalyzer) -> NameValidation {
        NameValidation::with_analyzer(Arc::new(analyzer), 4)
    }

    const TEXT: &str = "we studied layered deposits in the Hale crater floor near the southern rim";

    #[test]
    fn test_accepts_bare_feature_name() {
        let v = validation(FakeAnalyzer {
            adjectives: vec!["layered", "southern"],
            proper: vec!["Hale"],
            chunk_words: vec![("the Hale", "crater")],
        });
        assert!(v.validate_feature_name(TEXT, &ctx(), &span_of(TEXT, "Hale"), true));
    }

    #[test]
    fn test_rejects_adjectival_role() {
        let v = validation(FakeAnalyzer {
            adjectives: vec!["Hale"],
            proper: vec![],
            chunk_words: vec![],
        });
        assert!(!v.validate_feature_name(TEXT, &ctx(), &span_of(TEXT, "Hale"), true));
    }

    #[test]
    fn test_rejects_compound_name() {
        let text = "this was first described by George Hale in the report on solar fields";
        let v = validation(FakeAnalyzer {
            adjectives: vec!["solar"],
            proper: vec!["George", "Hale"],
            chunk_words: vec![("George", "Hale")],
        });
        assert!(!v.validate_feature_name(text, &ctx(), &span_of(text, "Hale"), true));
    }

    #[test]
    fn test_context_terms_inside_phrase_allowed() {
        let text = "images of the region show Mars Hale crater with gullies on its walls";
        let v = validation(FakeAnalyzer {
            adjectives: vec![],
            proper: vec!["Mars", "Hale"],
            chunk_words: vec![("Mars", "crater")],
        });
        assert!(v.validate_feature_name(text, &ctx(), &span_of(text, "Hale"), true));
    }

    #[test]
    fn test_insufficient_context_rejected() {
        let text = "in the Hale crater floor near the rim";
        let v = validation(FakeAnalyzer {
            adjectives: vec![],
            proper: vec![],
            chunk_words: vec![],
        });
        assert!(!v.validate_feature_name(text, &ctx(), &span_of(text, "Hale"), true));
        // the non-planetary path never consults the validators
        assert!(v.validate_feature_name(text, &ctx(), &span_of(text, "Hale"), false));
    }
}
