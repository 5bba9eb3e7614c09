//! Document- and excerpt-level context relevance gates.

use nomen_core::{DisambiguationContext, Result};
use regex::Regex;
use tracing::debug;

use crate::lexicon::{synonym_pattern, synonyms, whole_word_pattern};

/// One competing context term with its precompiled matcher.
#[derive(Debug, Clone)]
struct ContextTerm {
    term: String,
    forms: Vec<String>,
    pattern: Regex,
}

impl ContextTerm {
    fn count(&self, text: &str, text_lower: &str) -> usize {
        // cheap pre-check before the regex scan
        if !self.forms.iter().any(|f| text_lower.contains(f.as_str())) {
            return 0;
        }
        self.pattern.find_iter(text).count()
    }
}

/// Relevance gates bound to one job's context.
#[derive(Debug, Clone)]
pub struct RelevanceFilters {
    target: String,
    own_terms: Vec<String>,
    competing: Vec<ContextTerm>,
    feature_type_re: Regex,
}

impl RelevanceFilters {
    pub fn new(ctx: &DisambiguationContext) -> Result<Self> {
        let competing = ctx
            .ambiguous_contexts
            .iter()
            .map(|term| {
                Ok(ContextTerm {
                    term: term.clone(),
                    forms: synonyms(term),
                    pattern: synonym_pattern(term)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let feature_type_re = whole_word_pattern(
            &[ctx.feature_type.clone(), ctx.feature_type_plural.clone()],
            true,
        )?;

        Ok(Self {
            target: ctx.target.clone(),
            own_terms: vec![
                ctx.target.clone(),
                ctx.feature_type.clone(),
                ctx.feature_type_plural.clone(),
            ],
            competing,
            feature_type_re,
        })
    }

    /// Per-term mention counts, in configured order.
    pub fn context_counts(&self, text: &str) -> Vec<(String, usize)> {
        let text_lower = text.to_lowercase();
        self.competing
            .iter()
            .map(|t| (t.term.clone(), t.count(text, &text_lower)))
            .collect()
    }

    /// Whether the document is about this job's body, judged by which
    /// competing context term dominates it.
    pub fn determine_celestial_body_relevance(&self, text: &str) -> bool {
        if self.competing.is_empty() {
            return true;
        }

        let mut counts = self.context_counts(text);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        if total == 0 {
            debug!("No competing context term mentioned; not relevant");
            return false;
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        let (top_term, top_count) = &counts[0];
        if counts.len() > 1 && counts[1].1 == *top_count {
            debug!("Context terms tied at {}/{}; deferring", top_count, total);
            return true;
        }

        let is_own = self
            .own_terms
            .iter()
            .any(|t| t.eq_ignore_ascii_case(top_term));
        // fraction > 1/n  <=>  count * n > total
        let above_baseline = top_count * counts.len() > total;
        debug!(
            "Dominant context term {} ({}/{}), own={}, above_baseline={}",
            top_term, top_count, total, is_own, above_baseline
        );
        is_own && above_baseline
    }

    /// True only when the text shows no trace of the planetary context.
    pub fn is_context_non_planetary(&self, text: &str) -> bool {
        !(text.contains(&self.target) || self.feature_type_re.is_match(text))
    }
}
