//! Excerpt window extraction around literal feature-name occurrences.

use std::collections::HashSet;

use nomen_core::{DisambiguationContext, Error, Result, Span};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::adjacency::{AdjacencyRules, AdjacencyVerdict};
use crate::lexicon::{flexible_whitespace, normalize_control_chars, whole_word_pattern};
use crate::tokens::{tokens_after, tokens_before};

/// Bounded context window around one occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcerptWindow {
    pub text: String,
    /// Occurrence span in the full document text.
    pub doc_span: Span,
    /// Occurrence span within `text`.
    pub window_span: Span,
    pub include: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<AdjacencyVerdict>,
}

impl ExcerptWindow {
    /// The occurrence as it appears inside the window.
    pub fn occurrence(&self) -> &str {
        self.text.get(self.window_span.clone()).unwrap_or("")
    }
}

/// Included, deduplicated windows of one document plus drop counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExcerptSelection {
    pub windows: Vec<ExcerptWindow>,
    /// Literal matches of the name, with or without context.
    pub occurrences: usize,
    /// Matches with at least one token on each side.
    pub candidates: usize,
    /// Candidates rejected by the adjacency heuristic or a longer name.
    pub excluded: usize,
    /// Included windows dropped as exact duplicates.
    pub duplicates: usize,
}

impl ExcerptSelection {
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Extracts excerpt windows for one job's feature name.
#[derive(Debug, Clone)]
pub struct ExcerptExtractor {
    name_re: Regex,
    longer_names: Option<Regex>,
    rules: AdjacencyRules,
    width: usize,
}

impl ExcerptExtractor {
    pub fn new(ctx: &DisambiguationContext, width: usize) -> Result<Self> {
        let name = ctx.feature_name.trim();
        let mut pattern = flexible_whitespace(name);
        if name.chars().next().is_some_and(char::is_alphanumeric) {
            pattern = format!(r"\b{}", pattern);
        }
        if name.chars().last().is_some_and(char::is_alphanumeric) {
            pattern = format!(r"{}\b", pattern);
        }
        let name_re = Regex::new(&pattern).map_err(|e| Error::Pattern(e.to_string()))?;

        let longer: Vec<String> = ctx
            .multi_token_names
            .iter()
            .filter(|n| n.contains(name) && n.trim() != name)
            .cloned()
            .collect();
        let longer_names = if longer.is_empty() {
            None
        } else {
            Some(whole_word_pattern(&longer, false)?)
        };

        Ok(Self {
            name_re,
            longer_names,
            rules: AdjacencyRules::for_context(ctx),
            width: width.max(1),
        })
    }

    /// Every occurrence with enough context, with its adjacency verdict.
    ///
    /// Window text is raw document text here; only selected windows are
    /// normalized.
    pub fn candidates(&self, text: &str) -> Vec<ExcerptWindow> {
        let longer_spans: Vec<Span> = self
            .longer_names
            .as_ref()
            .map(|re| re.find_iter(text).map(|m| m.range()).collect())
            .unwrap_or_default();

        let mut windows = Vec::new();
        for m in self.name_re.find_iter(text) {
            let before = tokens_before(text, m.start(), self.width);
            let after = tokens_after(text, m.end(), self.width);
            let (Some(first), Some(prev), Some(next), Some(last)) =
                (before.first(), before.last(), after.first(), after.last())
            else {
                continue;
            };

            let mut verdict = self.rules.evaluate(prev.text, next.text);
            if longer_spans
                .iter()
                .any(|s| s.start <= m.start() && m.end() <= s.end)
            {
                verdict.include = false;
            }

            windows.push(ExcerptWindow {
                text: text[first.start..last.end].to_string(),
                doc_span: m.range(),
                window_span: (m.start() - first.start)..(m.end() - first.start),
                include: verdict.include,
                verdict: Some(verdict),
            });
        }
        windows
    }

    /// Included windows, normalized and deduplicated in first-seen order.
    pub fn select_excerpts(&self, text: &str) -> ExcerptSelection {
        let occurrences = self.name_re.find_iter(text).count();
        let candidates = self.candidates(text);
        let mut selection = ExcerptSelection {
            occurrences,
            candidates: candidates.len(),
            ..Default::default()
        };

        let mut seen: HashSet<String> = HashSet::new();
        for window in candidates {
            if !window.include {
                selection.excluded += 1;
                continue;
            }
            let window = normalize_window(window);
            if !seen.insert(window.text.clone()) {
                selection.duplicates += 1;
                continue;
            }
            selection.windows.push(window);
        }

        debug!(
            "Excerpts: occurrences={}, candidates={}, excluded={}, duplicates={}, kept={}",
            selection.occurrences,
            selection.candidates,
            selection.excluded,
            selection.duplicates,
            selection.windows.len()
        );
        selection
    }
}

/// Normalize control characters and trim, keeping `window_span` on the occurrence.
fn normalize_window(window: ExcerptWindow) -> ExcerptWindow {
    let rel = window.window_span.clone();
    let prefix = normalize_control_chars(&window.text[..rel.start]);
    let name = normalize_control_chars(&window.text[rel.clone()]);
    let suffix = normalize_control_chars(&window.text[rel.end..]);
    let joined = format!("{}{}{}", prefix, name, suffix);

    let lead = joined.len() - joined.trim_start().len();
    let text = joined.trim().to_string();
    let start = prefix.len().saturating_sub(lead);
    let end = (start + name.len()).min(text.len());

    ExcerptWindow {
        text,
        window_span: start..end,
        ..window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(width: usize) -> ExcerptExtractor {
        let ctx = DisambiguationContext::new("Rayleigh", "crater", "craters", "Mars");
        ExcerptExtractor::new(&ctx, width).unwrap()
    }

    #[test]
    fn test_lowercase_neighbours_included() {
        let sel = extractor(64).select_excerpts("We mapped the Rayleigh crater floor in detail.");
        assert_eq!(sel.windows.len(), 1);
        let w = &sel.windows[0];
        assert!(w.include);
        assert_eq!(w.text, "We mapped the Rayleigh crater floor in detail.");
        assert_eq!(w.occurrence(), "Rayleigh");
        assert_eq!(w.doc_span, 14..22);
    }

    #[test]
    fn test_person_name_excluded() {
        let sel = extractor(64).select_excerpts("as noted by John Smith Rayleigh crater floor");
        assert!(sel.windows.is_empty());
        assert_eq!(sel.candidates, 1);
        assert_eq!(sel.excluded, 1);
    }

    #[test]
    fn test_possessive_and_numeric_following_excluded() {
        let ex = extractor(64);
        assert!(ex.select_excerpts("the Rayleigh's criterion holds").is_empty());
        assert!(ex.select_excerpts("the Rayleigh 2 number").is_empty());
        assert!(ex.select_excerpts("the Rayleigh-Taylor instability").is_empty());
    }

    #[test]
    fn test_missing_context_is_not_a_candidate() {
        let ex = extractor(64);
        let sel = ex.select_excerpts("Rayleigh crater");
        assert_eq!(sel.occurrences, 1);
        assert_eq!(sel.candidates, 0);
        assert!(sel.is_empty());
        assert!(ex.select_excerpts("in Rayleigh").is_empty());
        assert!(ex.select_excerpts("").is_empty());
    }

    #[test]
    fn test_window_width_bounds_tokens() {
        let sel = extractor(2).select_excerpts("a b c d the Rayleigh crater rim e f g");
        assert_eq!(sel.windows[0].text, "d the Rayleigh crater rim");
        assert_eq!(sel.windows[0].window_span, 6..14);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let text = "in the Rayleigh crater rim. x in the Rayleigh crater rim. y on the Rayleigh plains";
        let sel = extractor(2).select_excerpts(text);
        let texts: Vec<_> = sel.windows.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["in the Rayleigh crater rim.", "on the Rayleigh plains"]);
        assert_eq!(sel.duplicates, 1);
        assert_eq!(sel.windows[0].doc_span.start, 7);
    }

    #[test]
    fn test_control_chars_normalized() {
        let sel = extractor(64).select_excerpts("the\u{0}x  Rayleigh\tcrater\nrim");
        let w = &sel.windows[0];
        assert_eq!(w.text, "the\u{2400}x  Rayleigh crater rim");
        assert_eq!(w.occurrence(), "Rayleigh");
    }

    #[test]
    fn test_multi_token_name_flexible_whitespace() {
        let ctx = DisambiguationContext::new("Rayleigh B", "crater", "craters", "Mars");
        let ex = ExcerptExtractor::new(&ctx, 64).unwrap();
        let sel = ex.select_excerpts("inside the Rayleigh\n B crater floor");
        assert_eq!(sel.windows.len(), 1);
        assert_eq!(sel.windows[0].occurrence(), "Rayleigh  B");
    }

    #[test]
    fn test_longer_names_excluded() {
        let ctx = DisambiguationContext::new("Rayleigh", "crater", "craters", "Mars")
            .with_multi_token_names(vec!["Rayleigh b".into()]);
        let ex = ExcerptExtractor::new(&ctx, 64).unwrap();
        let sel = ex.select_excerpts("near the Rayleigh b rim and the Rayleigh crater floor");
        assert_eq!(sel.candidates, 2);
        assert_eq!(sel.windows.len(), 1);
        assert!(sel.windows[0].text.contains("Rayleigh crater"));
    }
}
