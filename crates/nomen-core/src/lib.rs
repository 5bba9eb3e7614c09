//! Nomen Core — job context, document model, score types, configuration.

pub mod config;
pub mod context;
pub mod error;
pub mod numeric;
pub mod types;

pub use config::{EngineConfig, SeedingThresholds};
pub use context::{capitalize, DisambiguationContext, EntityLabel, LabelVocabulary};
pub use error::{Error, Result};
pub use numeric::{mean, round_significant};
pub use types::*;
