//! Subcommand implementations. Each returns the JSON printed on stdout.

use std::path::Path;

use anyhow::Context;
use nomen_core::{DisambiguationContext, Document, EngineConfig, KeywordSet, Polarity};
use nomen_extract::{ExcerptExtractor, RelevanceFilters};
use nomen_graph::RelevanceGraph;
use nomen_infer::InMemorySource;
use nomen_pipeline::{Collaborators, EvidenceGraphs, SeedingJob};
use serde::Deserialize;
use serde_json::{json, Value};

/// Keyword evidence collected by earlier seeding runs.
#[derive(Debug, Default, Deserialize)]
pub struct EvidenceFile {
    #[serde(default)]
    pub positive: Vec<Vec<String>>,
    #[serde(default)]
    pub positive_special: Vec<Vec<String>>,
    #[serde(default)]
    pub negative: Vec<Vec<String>>,
    #[serde(default)]
    pub negative_special: Vec<Vec<String>>,
}

fn load_context(path: &Path) -> anyhow::Result<DisambiguationContext> {
    DisambiguationContext::from_json_file(path)
        .with_context(|| format!("Failed to load context from {}", path.display()))
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn excerpts(context: &Path, documents: &Path, config: &EngineConfig) -> anyhow::Result<Value> {
    let ctx = load_context(context)?;
    let documents: Vec<Document> = load_json(documents)?;
    let extractor = ExcerptExtractor::new(&ctx, config.window_tokens)?;
    let filters = RelevanceFilters::new(&ctx)?;

    let results: Vec<Value> = documents
        .iter()
        .map(|doc| {
            let text = doc.full_text();
            let selection = extractor.select_excerpts(text);
            json!({
                "bibcode": doc.bibcode,
                "relevant": filters.determine_celestial_body_relevance(text),
                "occurrences": selection.occurrences,
                "excluded": selection.excluded,
                "duplicates": selection.duplicates,
                "windows": selection.windows,
            })
        })
        .collect();
    Ok(Value::Array(results))
}

pub fn seed(
    polarity: Polarity,
    context: &Path,
    documents: &Path,
    config: &EngineConfig,
) -> anyhow::Result<Value> {
    let ctx = load_context(context)?;
    let documents: Vec<Document> = load_json(documents)?;
    let job = SeedingJob::new(ctx, config, Collaborators::fallback(), polarity)?;
    let output = job.run(&InMemorySource::new(documents))?;
    Ok(serde_json::to_value(output)?)
}

pub fn score(
    context: &Path,
    evidence: &Path,
    keywords: &[String],
    config: &EngineConfig,
) -> anyhow::Result<Value> {
    let ctx = load_context(context)?;
    let evidence: EvidenceFile = load_json(evidence)?;

    let build = |regular: &[Vec<String>], special: &[Vec<String>]| {
        let regular: Vec<KeywordSet> = regular.iter().map(KeywordSet::regular).collect();
        let special: Vec<KeywordSet> = special.iter().map(KeywordSet::special).collect();
        RelevanceGraph::build(&ctx.feature_name, &regular, &special, config.significant_digits)
    };
    let graphs = EvidenceGraphs::new(
        build(&evidence.positive, &evidence.positive_special),
        build(&evidence.negative, &evidence.negative_special),
        config.significant_digits,
    );

    let query = KeywordSet::regular(keywords);
    let no_special = KeywordSet::special(Vec::<String>::new());
    Ok(json!({
        "keywords": &query,
        "positive": graphs.positive.score(&query).to_wire(),
        "negative": graphs.negative.score(&query).to_wire(),
        "knowledge_graph_score": graphs.score(&query, &no_special).to_wire(),
    }))
}
