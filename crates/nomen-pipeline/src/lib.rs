//! Nomen Pipeline — turns documents into accepted evidence or labeled mentions.
//!
//! Two workflows share one screening chain (windows, entity check, name
//! validation, keywords):
//! - seeding collects positive or negative keyword evidence for a feature,
//!   keeping a document only when its scores pass the acceptance gate;
//! - classification scores new mentions against that evidence and asks the
//!   label classifier for one label per document.

pub mod classify;
pub mod collaborators;
pub mod fusion;
pub mod gate;
pub mod screening;
pub mod seeding;
pub mod types;

pub use classify::{ClassificationJob, EvidenceGraphs};
pub use collaborators::Collaborators;
pub use fusion::{fuse_document, relevance_ratio, DocumentFusion};
pub use gate::{GateDecision, SeedingGate};
pub use screening::{ScreenedDocument, ScreenedExcerpt, Screening};
pub use seeding::SeedingJob;
pub use types::*;
