//! Relevance graph backend using petgraph.
//!
//! Nodes are keywords plus one sentinel node standing for the feature name.
//! Every keyword is linked to the sentinel with weight
//! `frequency x class weight`; keywords that co-occur in one evidence set are
//! linked with their raw pair count. A keyword set is scored by the mean
//! edge weight along each keyword's shortest (fewest-hop) path to the
//! sentinel.

use std::collections::HashMap;

use nomen_core::{round_significant, Evidence, KeywordClass, KeywordSet};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use tracing::info;

/// Single and pairwise keyword frequencies of one evidence class.
#[derive(Debug, Default)]
struct Frequencies {
    singles: HashMap<String, usize>,
    pairs: HashMap<(String, String), usize>,
}

impl Frequencies {
    fn count(sets: &[KeywordSet]) -> Self {
        let mut freq = Self::default();
        for set in sets {
            let keywords: Vec<&str> = set.iter().collect();
            for (i, a) in keywords.iter().enumerate() {
                *freq.singles.entry(a.to_string()).or_insert(0) += 1;
                for b in &keywords[i + 1..] {
                    *freq
                        .pairs
                        .entry((a.to_string(), b.to_string()))
                        .or_insert(0) += 1;
                }
            }
        }
        freq
    }

    /// Singles by descending frequency, ties alphabetical.
    fn ranked_singles(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.singles.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    fn sorted_pairs(&self) -> Vec<(&(String, String), usize)> {
        let mut pairs: Vec<_> = self.pairs.iter().map(|(k, v)| (k, *v)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

/// The built graph.
#[derive(Debug)]
struct KeywordGraph {
    graph: UnGraph<String, f64>,
    node_index: HashMap<String, NodeIndex>,
    sentinel: NodeIndex,
}

impl KeywordGraph {
    fn new(feature_name: &str) -> Self {
        let mut graph = UnGraph::new_undirected();
        let sentinel = graph.add_node(feature_name.to_string());
        Self {
            graph,
            node_index: HashMap::new(),
            sentinel,
        }
    }

    fn add_keywords(&mut self, freq: &Frequencies, class: KeywordClass) {
        for (keyword, count) in freq.ranked_singles() {
            let idx = match self.node_index.get(keyword) {
                Some(&idx) => idx,
                None => {
                    let idx = self.graph.add_node(keyword.to_string());
                    self.node_index.insert(keyword.to_string(), idx);
                    idx
                }
            };
            self.graph
                .update_edge(idx, self.sentinel, count as f64 * class.weight());
        }
    }

    fn add_pairs(&mut self, freq: &Frequencies) {
        for ((a, b), count) in freq.sorted_pairs() {
            if let (Some(&ia), Some(&ib)) = (self.node_index.get(a), self.node_index.get(b)) {
                self.graph.update_edge(ia, ib, count as f64);
            }
        }
    }

    fn query_path(&self, keyword: &str) -> f64 {
        let Some(&start) = self.node_index.get(&keyword.to_lowercase()) else {
            return 0.0;
        };
        let Some((_, path)) = astar(
            &self.graph,
            start,
            |n| n == self.sentinel,
            |_| 1usize,
            |_| 0,
        ) else {
            return 0.0;
        };

        let weights: Vec<f64> = path
            .windows(2)
            .filter_map(|w| self.graph.find_edge(w[0], w[1]))
            .map(|e| self.graph[e])
            .collect();
        if weights.is_empty() {
            0.0
        } else {
            weights.iter().sum::<f64>() / weights.len() as f64
        }
    }
}

/// Graph statistics.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub built: bool,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Relevance graph for one (feature, target, polarity).
///
/// `None` inside means no regular keyword evidence was ever collected, which
/// scores as `Evidence::NoEvidence` rather than zero.
#[derive(Debug)]
pub struct RelevanceGraph {
    inner: Option<KeywordGraph>,
    significant_digits: u32,
}

impl RelevanceGraph {
    /// Build from regular and special evidence sets.
    pub fn build(
        feature_name: &str,
        keyword_sets: &[KeywordSet],
        special_keyword_sets: &[KeywordSet],
        significant_digits: u32,
    ) -> Self {
        let regular = Frequencies::count(keyword_sets);
        if regular.singles.is_empty() {
            info!("No keyword evidence for {}; graph left unbuilt", feature_name);
            return Self::unbuilt(significant_digits);
        }
        let special = Frequencies::count(special_keyword_sets);

        let mut kg = KeywordGraph::new(feature_name);
        kg.add_keywords(&regular, KeywordClass::Regular);
        kg.add_keywords(&special, KeywordClass::Special);
        kg.add_pairs(&regular);
        kg.add_pairs(&special);

        let graph = Self {
            inner: Some(kg),
            significant_digits,
        };
        let stats = graph.stats();
        info!(
            "Built relevance graph for {}: {} nodes, {} edges",
            feature_name, stats.node_count, stats.edge_count
        );
        graph
    }

    /// A graph with no evidence behind it.
    pub fn unbuilt(significant_digits: u32) -> Self {
        Self {
            inner: None,
            significant_digits,
        }
    }

    pub fn is_built(&self) -> bool {
        self.inner.is_some()
    }

    /// Mean edge weight along the keyword's shortest path to the feature node;
    /// 0 when the keyword is absent or unreachable.
    pub fn query_path(&self, keyword: &str) -> f64 {
        self.inner.as_ref().map_or(0.0, |kg| kg.query_path(keyword))
    }

    /// Mean path score over the set, rounded; `NoEvidence` when unbuilt.
    pub fn score(&self, keywords: &KeywordSet) -> Evidence {
        if self.inner.is_none() {
            return Evidence::NoEvidence;
        }
        if keywords.is_empty() {
            return Evidence::Score(0.0);
        }
        let total: f64 = keywords.iter().map(|k| self.query_path(k)).sum();
        let mean = total / keywords.len() as f64;
        Evidence::Score(round_significant(mean, self.significant_digits))
    }

    /// Weight of the keyword→feature edge, if the keyword is a node.
    pub fn feature_edge_weight(&self, keyword: &str) -> Option<f64> {
        let kg = self.inner.as_ref()?;
        let idx = *kg.node_index.get(&keyword.to_lowercase())?;
        kg.graph.find_edge(idx, kg.sentinel).map(|e| kg.graph[e])
    }

    /// Weight of the co-occurrence edge between two keywords.
    pub fn pair_weight(&self, a: &str, b: &str) -> Option<f64> {
        let kg = self.inner.as_ref()?;
        let ia = *kg.node_index.get(&a.to_lowercase())?;
        let ib = *kg.node_index.get(&b.to_lowercase())?;
        kg.graph.find_edge(ia, ib).map(|e| kg.graph[e])
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        match &self.inner {
            Some(kg) => GraphStats {
                built: true,
                node_count: kg.graph.node_count(),
                edge_count: kg.graph.edge_count(),
            },
            None => GraphStats {
                built: false,
                node_count: 0,
                edge_count: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_graph() -> RelevanceGraph {
        let sets = vec![
            KeywordSet::regular(["crater", "ejecta"]),
            KeywordSet::regular(["crater", "rim"]),
            KeywordSet::regular(["crater", "ejecta", "dune"]),
            KeywordSet::regular(["mission"]),
            KeywordSet::regular(["orbit"]),
        ];
        let special = vec![KeywordSet::special(["impact crater"])];
        RelevanceGraph::build("Rayleigh", &sets, &special, 3)
    }

    #[test]
    fn test_feature_edge_weights() {
        let g = scenario_graph();
        assert_eq!(g.feature_edge_weight("crater"), Some(3.0));
        assert_eq!(g.feature_edge_weight("impact crater"), Some(2.0));
        assert_eq!(g.feature_edge_weight("ejecta"), Some(2.0));
        assert_eq!(g.feature_edge_weight("orbit"), Some(1.0));
    }

    #[test]
    fn test_pair_weights_are_raw_counts() {
        let g = scenario_graph();
        assert_eq!(g.pair_weight("crater", "ejecta"), Some(2.0));
        assert_eq!(g.pair_weight("ejecta", "dune"), Some(1.0));
        assert_eq!(g.pair_weight("crater", "orbit"), None);
    }

    #[test]
    fn test_score_single_keyword() {
        let g = scenario_graph();
        assert_eq!(g.score(&KeywordSet::regular(["crater"])), Evidence::Score(3.0));
        assert_eq!(g.score(&KeywordSet::regular(["Crater"])), Evidence::Score(3.0));
    }

    #[test]
    fn test_score_mean_with_unknown_keyword() {
        let g = scenario_graph();
        // (3 + 2 + 0) / 3
        assert_eq!(
            g.score(&KeywordSet::regular(["crater", "ejecta", "basalt"])),
            Evidence::Score(1.67)
        );
        assert_eq!(g.score(&KeywordSet::default()), Evidence::Score(0.0));
    }

    #[test]
    fn test_query_path_absent_keyword() {
        let g = scenario_graph();
        assert_eq!(g.query_path("basalt"), 0.0);
        assert_eq!(RelevanceGraph::unbuilt(3).query_path("crater"), 0.0);
    }

    #[test]
    fn test_unbuilt_scores_no_evidence() {
        let g = RelevanceGraph::build("Rayleigh", &[], &[KeywordSet::special(["ejecta"])], 3);
        assert!(!g.is_built());
        assert_eq!(g.score(&KeywordSet::regular(["ejecta"])), Evidence::NoEvidence);
        assert_eq!(g.score(&KeywordSet::default()), Evidence::NoEvidence);
        assert_eq!(g.score(&KeywordSet::default()).to_wire(), -1.0);

        let empty_sets = RelevanceGraph::build("Rayleigh", &[KeywordSet::default()], &[], 3);
        assert!(!empty_sets.is_built());
    }

    #[test]
    fn test_special_overrides_regular_feature_edge() {
        let g = RelevanceGraph::build(
            "Rayleigh",
            &[
                KeywordSet::regular(["ejecta"]),
                KeywordSet::regular(["ejecta"]),
                KeywordSet::regular(["ejecta"]),
            ],
            &[KeywordSet::special(["ejecta"])],
            3,
        );
        assert_eq!(g.feature_edge_weight("ejecta"), Some(2.0));
        assert_eq!(g.stats().node_count, 2);
        assert_eq!(g.stats().edge_count, 1);
    }
}
