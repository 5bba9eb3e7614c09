//! Keyword extraction capability and a lexical fallback.

use std::collections::{HashMap, HashSet};

use nomen_core::{Document, KeywordSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword extraction over excerpts and whole documents.
///
/// An empty result is treated by the engine as a hard filter: the excerpt or
/// document it belongs to is dropped.
pub trait KeywordExtractor: Send + Sync {
    /// Regular keywords for one excerpt.
    fn extract_keywords(&self, excerpt: &str) -> KeywordSet;

    /// Keywords for a whole document under a positive or negative hypothesis.
    fn extract_keywords_from_document(
        &self,
        document: &Document,
        vocabulary: &[String],
        positive: bool,
    ) -> KeywordSet;

    /// Keywords drawn from the controlled astronomical-concept vocabulary.
    fn extract_special_keywords(&self, excerpt: &str) -> KeywordSet;
}

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "was", "were", "with", "that", "this", "these", "those",
        "from", "into", "onto", "over", "under", "than", "then", "there", "their", "they",
        "which", "while", "where", "when", "what", "who", "whom", "has", "have", "had", "been",
        "being", "also", "its", "our", "not", "but", "can", "may", "might", "could", "would",
        "should", "such", "both", "each", "other", "some", "more", "most", "less", "only",
        "very", "using", "used", "use", "between", "within", "about", "after", "before",
        "during", "however", "thus", "here", "all", "any", "one", "two", "three", "fig",
        "figure", "table", "see", "shown", "show", "shows", "et", "al", "via", "per", "due",
    ]
    .into_iter()
    .collect()
});

/// Default controlled vocabulary of astronomical / planetary concepts.
static SPECIAL_VOCABULARY: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "impact crater", "central peak", "crater floor", "crater rim", "ejecta",
        "ejecta blanket", "impact melt", "regolith", "basin", "rille", "mare", "highlands",
        "lava flow", "volcano", "caldera", "graben", "scarp", "wrinkle ridge", "dune field",
        "valley network", "outflow channel", "layered deposits", "albedo", "topography",
        "stratigraphy", "geologic map", "orbiter", "rover", "lander", "spectrometer",
        "hydrated minerals", "sedimentary", "crater counting", "surface age",
    ]
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}][\p{L}\p{N}\-]*").unwrap());

/// Frequency-ranked, stop-word-filtered lexical keyword extractor.
pub struct LexicalKeywordExtractor {
    max_keywords: usize,
    min_len: usize,
    special_vocabulary: Vec<(String, Regex)>,
}

impl LexicalKeywordExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self::with_vocabulary(
            max_keywords,
            SPECIAL_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Use a custom controlled vocabulary for special keywords.
    pub fn with_vocabulary(max_keywords: usize, vocabulary: Vec<String>) -> Self {
        let special_vocabulary = vocabulary
            .into_iter()
            .filter_map(|term| {
                let term = term.trim().to_lowercase();
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&term).replace(' ', r"\s+"));
                Regex::new(&pattern).ok().map(|re| (term, re))
            })
            .collect();
        Self {
            max_keywords,
            min_len: 3,
            special_vocabulary,
        }
    }

    /// Rank candidate words by frequency (ties alphabetical) and keep the top ones.
    fn ranked_words(&self, text: &str) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for m in WORD_RE.find_iter(text) {
            let word = m.as_str().trim_matches('-').to_lowercase();
            if word.chars().count() < self.min_len || STOPWORDS.contains(word.as_str()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.into_iter().map(|(w, _)| w).collect()
    }
}

impl Default for LexicalKeywordExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl KeywordExtractor for LexicalKeywordExtractor {
    fn extract_keywords(&self, excerpt: &str) -> KeywordSet {
        let words = self.ranked_words(excerpt);
        KeywordSet::regular(words.into_iter().take(self.max_keywords))
    }

    /// Positive hypothesis keeps only vocabulary terms (when a vocabulary is
    /// given); negative hypothesis removes them.
    fn extract_keywords_from_document(
        &self,
        document: &Document,
        vocabulary: &[String],
        positive: bool,
    ) -> KeywordSet {
        let vocab: HashSet<String> = vocabulary.iter().map(|v| v.to_lowercase()).collect();
        let text = format!(
            "{} {} {}",
            document.title,
            document.abstract_text.as_deref().unwrap_or(""),
            document.body.as_deref().unwrap_or("")
        );
        let words = self
            .ranked_words(&text)
            .into_iter()
            .filter(|w| {
                if positive {
                    vocab.is_empty() || vocab.contains(w)
                } else {
                    !vocab.contains(w)
                }
            })
            .take(self.max_keywords);
        KeywordSet::regular(words)
    }

    fn extract_special_keywords(&self, excerpt: &str) -> KeywordSet {
        KeywordSet::special(
            self.special_vocabulary
                .iter()
                .filter(|(_, re)| re.is_match(excerpt))
                .map(|(term, _)| term.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomen_core::KeywordClass;

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let extractor = LexicalKeywordExtractor::new(3);
        let kws = extractor.extract_keywords(
            "The crater floor of the crater shows layered ejecta and ejecta rays; crater walls.",
        );
        assert_eq!(kws.len(), 3);
        assert!(kws.contains("crater"));
        assert!(kws.contains("ejecta"));
        assert!(!kws.contains("the"));
    }

    #[test]
    fn test_special_keywords_use_vocabulary() {
        let extractor = LexicalKeywordExtractor::default();
        let kws = extractor.extract_special_keywords(
            "An Impact  Crater with a prominent central peak and ejecta blanket.",
        );
        assert_eq!(kws.class, KeywordClass::Special);
        assert!(kws.contains("impact crater"));
        assert!(kws.contains("central peak"));
        assert!(kws.contains("ejecta blanket"));
        assert!(!kws.contains("regolith"));
    }

    #[test]
    fn test_document_keywords_negative_hypothesis_drops_vocabulary() {
        let extractor = LexicalKeywordExtractor::default();
        let doc = Document::new("b")
            .with_title("Rayleigh scattering in aerosols")
            .with_abstract("Rayleigh scattering dominates aerosol optics.");
        let vocab = vec!["rayleigh".to_string()];
        let neg = extractor.extract_keywords_from_document(&doc, &vocab, false);
        assert!(!neg.contains("rayleigh"));
        assert!(neg.contains("scattering"));

        let pos = extractor.extract_keywords_from_document(&doc, &vocab, true);
        assert_eq!(pos.iter().collect::<Vec<_>>(), vec!["rayleigh"]);
    }
}
