//! Nomen Extract — locating feature-name occurrences and filtering their contexts.
//!
//! The extractor cuts a bounded window of tokens around every literal
//! occurrence of the feature name and drops windows whose neighbouring
//! tokens show the name is part of some other proper-noun phrase. The
//! filters then decide whether the document is about the right body and
//! whether the occurrence plays the role of a bare feature name.

pub mod adjacency;
pub mod excerpts;
pub mod filters;
pub mod lexicon;
pub mod tokens;
pub mod validate;

pub use adjacency::{AdjacencyRule, AdjacencyRules, AdjacencyVerdict, Side, TokenClass};
pub use excerpts::{ExcerptExtractor, ExcerptSelection, ExcerptWindow};
pub use filters::RelevanceFilters;
pub use validate::{NameValidation, PhraseValidator, RoleValidator};
