//! Named-entity relevance capability.

use nomen_core::Span;
use once_cell::sync::Lazy;
use regex::Regex;

/// Decides whether an occurrence inside an excerpt may be a celestial feature.
///
/// Implementations backed by an NER model reject spans tagged as citations,
/// references, or non-celestial entity types.
pub trait EntityRecognizer: Send + Sync {
    fn is_entity_acceptable(&self, excerpt: &str, span: &Span) -> bool;
}

// Author-year citation forms following the name: "et al.", ", 1998", "(1998a)",
// "and Jeans (1905)".
static CITATION_AFTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:et\s+al\b|,?\s*\(?\s*(?:1[6-9]|20)\d{2}[a-z]?\b|(?:and|&)\s+\p{Lu}[\p{L}\-]+\s*,?\s*\(?\s*(?:1[6-9]|20)\d{2})",
    )
    .unwrap()
});

// "(see Rayleigh", "[Rayleigh" and similar reference openers.
static CITATION_BEFORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\[|\bcf\.|\bsee)\s*$").unwrap());

/// Regex fallback that rejects author-year citations and bracketed references.
#[derive(Debug, Default, Clone, Copy)]
pub struct CitationHeuristicRecognizer;

impl EntityRecognizer for CitationHeuristicRecognizer {
    fn is_entity_acceptable(&self, excerpt: &str, span: &Span) -> bool {
        let (Some(before), Some(after)) = (excerpt.get(..span.start), excerpt.get(span.end..))
        else {
            return false;
        };
        !(CITATION_AFTER_RE.is_match(after) || CITATION_BEFORE_RE.is_match(before))
    }
}
