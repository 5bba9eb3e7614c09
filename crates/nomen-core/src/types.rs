//! Shared data model: documents, keyword sets, score bundles and sentinels.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Byte range of an occurrence within some text.
pub type Span = std::ops::Range<usize>;

/// A document supplied by the search collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub bibcode: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Source-collection tags (e.g. "astronomy", "earthscience").
    #[serde(default)]
    pub collections: HashSet<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub published: Option<NaiveDate>,
}

impl Document {
    pub fn new(bibcode: impl Into<String>) -> Self {
        Self {
            bibcode: bibcode.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    pub fn with_body(mut self, text: impl Into<String>) -> Self {
        self.body = Some(text.into());
        self
    }

    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Text searched for occurrences: the body, or the abstract when no body is available.
    pub fn full_text(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => body,
            _ => self.abstract_text.as_deref().unwrap_or(""),
        }
    }
}

/// Which vocabulary a keyword set was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordClass {
    #[default]
    Regular,
    /// Controlled astronomical-concept vocabulary.
    Special,
}

impl KeywordClass {
    /// Weight applied to keyword→feature edges in the relevance graph.
    pub fn weight(self) -> f64 {
        match self {
            Self::Regular => 1.0,
            Self::Special => 2.0,
        }
    }
}

/// Unordered set of lowercased keywords for one excerpt or document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    keywords: BTreeSet<String>,
    #[serde(default)]
    pub class: KeywordClass,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I, class: KeywordClass) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords, class }
    }

    pub fn regular<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(keywords, KeywordClass::Regular)
    }

    pub fn special<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(keywords, KeywordClass::Special)
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(&keyword.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

/// Knowledge-graph score with "no evidence was ever collected" kept apart from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    Score(f64),
    NoEvidence,
}

impl Evidence {
    /// Sentinel used on the wire for `NoEvidence`.
    pub const WIRE_NO_EVIDENCE: f64 = -1.0;

    pub fn to_wire(self) -> f64 {
        match self {
            Self::Score(s) => s,
            Self::NoEvidence => Self::WIRE_NO_EVIDENCE,
        }
    }

    pub fn score(self) -> Option<f64> {
        match self {
            Self::Score(s) => Some(s),
            Self::NoEvidence => None,
        }
    }
}

/// Output of the label/confidence classifier for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    Labeled { label: String, confidence: f64 },
    Undetermined,
}

impl Prediction {
    /// Sentinel confidence used on the wire for `Undetermined`.
    pub const WIRE_NO_CONFIDENCE: f64 = -1.0;

    /// `(label, confidence)` as persisted: `("", -1)` when undetermined.
    pub fn to_wire(&self) -> (String, f64) {
        match self {
            Self::Labeled { label, confidence } => (label.clone(), *confidence),
            Self::Undetermined => (String::new(), Self::WIRE_NO_CONFIDENCE),
        }
    }
}

/// Scores attached to one excerpt or document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_graph: Option<Evidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_relevance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
}

/// Direction of the evidence a seeding job collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}
