//! Nomen Infer — capabilities the engine consumes but does not own.
//!
//! Search backends, keyword extractors, the NER model, the syntax model,
//! the paper-relevance scorer, the local LLM and the label classifier are
//! all injected as trait objects. Each trait ships with a fallback that
//! honours the sentinel contract of its capability, so a job can run with
//! any subset of real models attached.

pub mod entities;
pub mod error;
pub mod keywords;
pub mod scorers;
pub mod source;
pub mod syntax;

pub use entities::{CitationHeuristicRecognizer, EntityRecognizer};
pub use error::InferError;
pub use keywords::{KeywordExtractor, LexicalKeywordExtractor};
pub use scorers::{
    ClassPrediction, CollectionRelevanceScorer, LabelClassifier, NoopLabelClassifier,
    NoopProbabilityScorer, ProbabilityScorer, RelevanceScorer,
};
pub use source::{DocumentSource, InMemorySource, SearchQuery};
pub use syntax::{
    CapitalizationAnalyzer, FeatureNameValidator, PartOfSpeech, SyntaxAnalyzer, TaggedToken,
};
