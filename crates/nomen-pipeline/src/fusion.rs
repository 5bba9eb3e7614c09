//! Score fusion for classification: relevance ratio per excerpt, document
//! means, and the label classifier call.

use nomen_core::{mean, round_significant, Evidence, LabelVocabulary, Prediction, ScoreBundle};
use nomen_infer::LabelClassifier;
use tracing::{debug, warn};

/// Share of positive evidence in the combined evidence of one keyword set.
///
/// A side whose graph was never built contributes zero; with neither graph
/// built there is no evidence at all.
pub fn relevance_ratio(
    positive: Evidence,
    negative: Evidence,
    significant_digits: u32,
) -> Evidence {
    if positive == Evidence::NoEvidence && negative == Evidence::NoEvidence {
        return Evidence::NoEvidence;
    }
    let p = positive.score().unwrap_or(0.0);
    let n = negative.score().unwrap_or(0.0);
    let total = p + n;
    if total == 0.0 {
        return Evidence::Score(0.0);
    }
    Evidence::Score(round_significant(p / total, significant_digits))
}

/// Document-level scores before the classifier call.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFusion {
    pub knowledge_graph: Evidence,
    pub paper_relevance: f64,
    pub probability: f64,
}

impl DocumentFusion {
    /// Average the per-excerpt ratios and probabilities. Any excerpt without
    /// evidence makes the whole document evidence-free.
    pub fn from_excerpts(
        ratios: &[Evidence],
        probabilities: &[f64],
        paper_relevance: f64,
        significant_digits: u32,
    ) -> Self {
        let scores: Option<Vec<f64>> = ratios.iter().map(|r| r.score()).collect();
        let knowledge_graph = match scores.as_deref().and_then(mean) {
            Some(m) => Evidence::Score(round_significant(m, significant_digits)),
            None => Evidence::NoEvidence,
        };
        let probability = mean(probabilities)
            .map(|m| round_significant(m, significant_digits))
            .unwrap_or(0.0);
        Self {
            knowledge_graph,
            paper_relevance,
            probability,
        }
    }

    /// Scores shared by every detail record of the document.
    pub fn bundle(&self, prediction: Prediction) -> ScoreBundle {
        ScoreBundle {
            knowledge_graph: Some(self.knowledge_graph),
            paper_relevance: Some(self.paper_relevance),
            probability: Some(self.probability),
            prediction: Some(prediction),
        }
    }
}

/// Ask the classifier for a label. Classifier failures and class values
/// outside the vocabulary yield `Prediction::Undetermined`.
pub fn fuse_document(
    fusion: &DocumentFusion,
    classifier: &dyn LabelClassifier,
    labels: &LabelVocabulary,
    significant_digits: u32,
) -> Prediction {
    let raw = match classifier.classify(
        fusion.knowledge_graph.to_wire(),
        fusion.paper_relevance,
        fusion.probability,
    ) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Label classifier failed: {}", e);
            return Prediction::Undetermined;
        }
    };

    match labels.label_for(raw.value) {
        Some(label) => {
            let confidence = round_significant(raw.confidence, significant_digits);
            debug!("Classified as {} ({})", label, confidence);
            Prediction::Labeled {
                label: label.to_string(),
                confidence,
            }
        }
        None => {
            warn!("Classifier returned unknown class value {}", raw.value);
            Prediction::Undetermined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomen_infer::{ClassPrediction, InferError, NoopLabelClassifier};

    struct FixedClassifier(i64, f64);

    impl LabelClassifier for FixedClassifier {
        fn classify(&self, _kg: f64, _rel: f64, _prob: f64) -> Result<ClassPrediction, InferError> {
            Ok(ClassPrediction {
                value: self.0,
                confidence: self.1,
            })
        }
    }

    #[test]
    fn test_relevance_ratio() {
        let r = relevance_ratio(Evidence::Score(3.0), Evidence::Score(1.0), 3);
        assert_eq!(r, Evidence::Score(0.75));

        let r = relevance_ratio(Evidence::Score(2.0), Evidence::Score(1.0), 3);
        assert_eq!(r, Evidence::Score(0.667));
    }

    #[test]
    fn test_relevance_ratio_missing_sides() {
        assert_eq!(
            relevance_ratio(Evidence::NoEvidence, Evidence::NoEvidence, 3),
            Evidence::NoEvidence
        );
        assert_eq!(
            relevance_ratio(Evidence::Score(2.0), Evidence::NoEvidence, 3),
            Evidence::Score(1.0)
        );
        assert_eq!(
            relevance_ratio(Evidence::NoEvidence, Evidence::Score(2.0), 3),
            Evidence::Score(0.0)
        );
        assert_eq!(
            relevance_ratio(Evidence::Score(0.0), Evidence::Score(0.0), 3),
            Evidence::Score(0.0)
        );
    }

    #[test]
    fn test_no_evidence_is_distinct_from_zero() {
        let fusion = DocumentFusion::from_excerpts(&[Evidence::NoEvidence], &[0.8], 0.7, 3);
        assert_eq!(fusion.knowledge_graph, Evidence::NoEvidence);
        assert_eq!(fusion.knowledge_graph.to_wire(), -1.0);

        let fusion = DocumentFusion::from_excerpts(&[Evidence::Score(0.0)], &[0.8], 0.7, 3);
        assert_eq!(fusion.knowledge_graph, Evidence::Score(0.0));
    }

    #[test]
    fn test_document_means() {
        let fusion = DocumentFusion::from_excerpts(
            &[Evidence::Score(0.5), Evidence::Score(1.0)],
            &[0.2, 0.3333],
            0.9,
            3,
        );
        assert_eq!(fusion.knowledge_graph, Evidence::Score(0.75));
        assert_eq!(fusion.probability, 0.267);
        assert_eq!(fusion.paper_relevance, 0.9);
    }

    #[test]
    fn test_classifier_failure_is_undetermined() {
        let fusion = DocumentFusion::from_excerpts(&[Evidence::Score(0.5)], &[0.5], 0.5, 3);
        let labels = LabelVocabulary::default();
        let prediction = fuse_document(&fusion, &NoopLabelClassifier, &labels, 3);
        assert_eq!(prediction, Prediction::Undetermined);
        assert_eq!(prediction.to_wire(), (String::new(), -1.0));
    }

    #[test]
    fn test_class_value_maps_to_label() {
        let fusion = DocumentFusion::from_excerpts(&[Evidence::Score(0.9)], &[0.9], 0.9, 3);
        let labels = LabelVocabulary::default();

        let prediction = fuse_document(&fusion, &FixedClassifier(1, 0.91234), &labels, 3);
        assert_eq!(
            prediction,
            Prediction::Labeled {
                label: "planetary".into(),
                confidence: 0.912
            }
        );

        let prediction = fuse_document(&fusion, &FixedClassifier(7, 0.9), &labels, 3);
        assert_eq!(prediction, Prediction::Undetermined);
    }
}
