//! Engine configuration: window width, rounding, acceptance thresholds.

use serde::{Deserialize, Serialize};

/// Acceptance thresholds for the seeding workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedingThresholds {
    /// Minimum mean excerpt probability.
    pub min_probability: f64,
    /// Minimum document-level paper relevance.
    pub min_paper_relevance: f64,
    /// Minimum fraction of windowed excerpts that must survive filtering.
    pub min_survival_ratio: f64,
}

impl Default for SeedingThresholds {
    fn default() -> Self {
        Self {
            min_probability: 0.5,
            min_paper_relevance: 0.6,
            min_survival_ratio: 0.5,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum tokens captured on each side of an occurrence.
    pub window_tokens: usize,
    /// Significant digits kept for knowledge-graph, probability and confidence scores.
    pub significant_digits: u32,
    /// Tokens required on each side of an occurrence before validators are consulted.
    pub min_context_tokens: usize,
    pub seeding: SeedingThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_tokens: 64,
            significant_digits: 3,
            min_context_tokens: 4,
            seeding: SeedingThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let window_tokens = env_parse("NOMEN_WINDOW_TOKENS").unwrap_or(defaults.window_tokens);
        let significant_digits =
            env_parse("NOMEN_SIGNIFICANT_DIGITS").unwrap_or(defaults.significant_digits);
        let min_context_tokens =
            env_parse("NOMEN_MIN_CONTEXT_TOKENS").unwrap_or(defaults.min_context_tokens);

        Self {
            window_tokens: window_tokens.max(1),
            significant_digits,
            min_context_tokens,
            seeding: defaults.seeding,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparsable {}={}", key, raw);
            None
        }
    }
}
