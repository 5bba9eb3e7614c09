//! Nomen Graph — keyword co-occurrence graph scored against the feature name.

pub mod relevance;

pub use relevance::{GraphStats, RelevanceGraph};
