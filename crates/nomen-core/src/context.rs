//! Job-scoped disambiguation context.
//!
//! One `DisambiguationContext` parameterizes a whole seeding or
//! classification job. It is built (or loaded from a JSON job file) once,
//! validated, and only read afterwards.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One entry of the two-valued label vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLabel {
    pub label: String,
    /// Integer class emitted by the label classifier for this label.
    pub value: i64,
    /// The label meaning "this occurrence is the planetary feature".
    #[serde(default)]
    pub is_primary: bool,
}

/// Mapping between classifier class values and label strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVocabulary {
    pub labels: Vec<EntityLabel>,
}

impl LabelVocabulary {
    pub fn new(labels: Vec<EntityLabel>) -> Self {
        Self { labels }
    }

    /// Label string for a classifier class value.
    pub fn label_for(&self, value: i64) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.value == value)
            .map(|l| l.label.as_str())
    }

    /// The primary ("planetary") label.
    pub fn primary(&self) -> Option<&EntityLabel> {
        self.labels.iter().find(|l| l.is_primary)
    }

    fn validate(&self) -> Result<()> {
        if self.labels.len() != 2 {
            return Err(Error::Config(format!(
                "label vocabulary needs exactly 2 labels, got {}",
                self.labels.len()
            )));
        }
        if self.labels.iter().filter(|l| l.is_primary).count() != 1 {
            return Err(Error::Config(
                "label vocabulary needs exactly one primary label".into(),
            ));
        }
        if self.labels[0].value == self.labels[1].value {
            return Err(Error::Config("label values must differ".into()));
        }
        Ok(())
    }
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self {
            labels: vec![
                EntityLabel {
                    label: "planetary".into(),
                    value: 1,
                    is_primary: true,
                },
                EntityLabel {
                    label: "non planetary".into(),
                    value: 0,
                    is_primary: false,
                },
            ],
        }
    }
}

/// Immutable configuration of one disambiguation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisambiguationContext {
    /// Feature name under evaluation (e.g. "Rayleigh"). May be multi-token.
    pub feature_name: String,
    /// Feature type, singular (e.g. "Crater").
    pub feature_type: String,
    /// Feature type, plural (e.g. "Craters").
    pub feature_type_plural: String,
    /// Target body (e.g. "Mars").
    pub target: String,
    /// Competing context terms when the name is ambiguous across bodies.
    #[serde(default)]
    pub ambiguous_contexts: Vec<String>,
    /// Longer nomenclature names that contain this name (e.g. "Rayleigh B").
    #[serde(default)]
    pub multi_token_names: Vec<String>,
    #[serde(default)]
    pub labels: LabelVocabulary,
    /// Documents published after this instant are not considered.
    #[serde(default = "default_cutoff")]
    pub cutoff: DateTime<Utc>,
    /// Every target body known to the nomenclature.
    #[serde(default)]
    pub targets: Vec<String>,
}

fn default_cutoff() -> DateTime<Utc> {
    Utc::now()
}

impl DisambiguationContext {
    pub fn new(
        feature_name: impl Into<String>,
        feature_type: impl Into<String>,
        feature_type_plural: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            feature_name: feature_name.into(),
            feature_type: feature_type.into(),
            feature_type_plural: feature_type_plural.into(),
            target: target.into(),
            ambiguous_contexts: Vec::new(),
            multi_token_names: Vec::new(),
            labels: LabelVocabulary::default(),
            cutoff: default_cutoff(),
            targets: Vec::new(),
        }
    }

    pub fn with_ambiguous_contexts(mut self, contexts: Vec<String>) -> Self {
        self.ambiguous_contexts = contexts;
        self
    }

    pub fn with_multi_token_names(mut self, names: Vec<String>) -> Self {
        self.multi_token_names = names;
        self
    }

    pub fn with_labels(mut self, labels: LabelVocabulary) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_cutoff(mut self, cutoff: DateTime<Utc>) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    /// Load and validate a context from a JSON job file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let ctx: Self = serde_json::from_str(&raw)?;
        ctx.validate()?;
        Ok(ctx)
    }

    /// Check the invariants a job relies on.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("feature_name", &self.feature_name),
            ("feature_type", &self.feature_type),
            ("feature_type_plural", &self.feature_type_plural),
            ("target", &self.target),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", field)));
            }
        }
        if !self.targets.is_empty()
            && !self
                .targets
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&self.target))
        {
            return Err(Error::Config(format!(
                "target {} is not among the known targets",
                self.target
            )));
        }
        self.labels.validate()
    }

    /// True if `term` names this job's target or feature type (singular or plural).
    pub fn is_own_context_term(&self, term: &str) -> bool {
        term.eq_ignore_ascii_case(&self.target)
            || term.eq_ignore_ascii_case(&self.feature_type)
            || term.eq_ignore_ascii_case(&self.feature_type_plural)
    }

    /// Capitalized target and feature-type names, as they appear at the start of a word.
    pub fn capitalized_context_names(&self) -> Vec<String> {
        [&self.target, &self.feature_type, &self.feature_type_plural]
            .iter()
            .map(|s| capitalize(s))
            .collect()
    }

    /// Label string for the primary ("planetary") label, if configured.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.primary().map(|l| l.label.as_str())
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
