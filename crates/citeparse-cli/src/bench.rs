//! Benchmark pipeline: reads a manifest, extracts and scores every item concurrently.

use std::time::Instant;

use chrono::{DateTime, Utc};
use citeparse_core::{BenchmarkResult, CitationExtractionResult, LabelPrediction};
use citeparse_ner::CitationExtractor;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

/// A named set of documents with hand-authored ground truth.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ManifestItem>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestItem {
    pub name: String,
    pub correct: CitationExtractionResult,
    /// Per-chunk results already produced by an extraction backend.
    #[serde(default)]
    pub chunks: Vec<CitationExtractionResult>,
    /// Raw classifier output, extracted here and added to the chunk totals.
    #[serde(default)]
    pub tokens: Option<Vec<LabelPrediction>>,
}

impl ManifestItem {
    fn produced(&self, extractor: &CitationExtractor) -> CitationExtractionResult {
        let combined = CitationExtractionResult::combine(&self.chunks);
        match &self.tokens {
            Some(tokens) => combined.merge(&extractor.extract(tokens).to_result()),
            None => combined,
        }
    }
}

/// Written by `benchmark --report`.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub total_correct: u64,
    pub total_errors: u64,
    pub accuracy: Option<f64>,
    pub result: BenchmarkResult,
}

pub struct BenchStats {
    pub result: BenchmarkResult,
    pub elapsed_secs: f64,
}

impl BenchStats {
    pub fn report(&self) -> BenchReport {
        BenchReport {
            generated_at: Utc::now(),
            elapsed_secs: self.elapsed_secs,
            total_correct: self.result.total_correct(),
            total_errors: self.result.total_errors(),
            accuracy: self.result.accuracy(),
            result: self.result.clone(),
        }
    }
}

/// Score every manifest item. Items run as separate tasks; scores are
/// recorded in manifest order regardless of completion order.
pub async fn run_benchmark(
    manifest: Manifest,
    extractor: &CitationExtractor,
) -> anyhow::Result<BenchStats> {
    let start = Instant::now();
    let mut tasks = JoinSet::new();

    for (index, item) in manifest.items.into_iter().enumerate() {
        let extractor = extractor.clone();
        tasks.spawn(async move {
            let produced = item.produced(&extractor);
            (index, item.name, item.correct, produced)
        });
    }

    let mut scored = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        scored.push(joined?);
    }
    scored.sort_by_key(|(index, ..)| *index);

    let mut result = BenchmarkResult::new(manifest.name);
    for (_, name, correct, produced) in &scored {
        result.score(name.as_str(), correct, produced);
    }

    Ok(BenchStats {
        result,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn cases(pairs: &[(&str, u64)]) -> CitationExtractionResult {
        CitationExtractionResult::new(counts(pairs), BTreeMap::new())
    }

    fn starbucks_tokens() -> Vec<LabelPrediction> {
        [
            ("58", "B-VOLUME"),
            ("##8", "I-VOLUME"),
            ("F", "B-REPORTER"),
            (".", "I-REPORTER"),
            ("3d", "I-REPORTER"),
            ("97", "B-PAGE"),
            (",", "O"),
        ]
        .iter()
        .map(|(t, l)| LabelPrediction::new(*t, *l))
        .collect()
    }

    #[tokio::test]
    async fn scores_items_in_manifest_order() {
        let manifest = Manifest {
            name: "caselaw".into(),
            items: (0..8)
                .map(|i| ManifestItem {
                    name: format!("item-{i}"),
                    correct: cases(&[("1 U.S. 1", 2)]),
                    chunks: vec![cases(&[("1 U.S. 1", 1)]); i % 3],
                    tokens: None,
                })
                .collect(),
        };

        let stats = run_benchmark(manifest, &CitationExtractor::default())
            .await
            .unwrap();
        let labels: Vec<&str> = stats.result.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            (0..8).map(|i| format!("item-{i}")).collect::<Vec<_>>()
        );
        // chunk counts 0,1,2 → errors 2,1,0
        assert_eq!(stats.result.items[0].errors, 2);
        assert_eq!(stats.result.items[1].errors, 1);
        assert_eq!(stats.result.items[2].errors, 0);
    }

    #[tokio::test]
    async fn tokens_add_to_chunk_counts() {
        let manifest = Manifest {
            name: "mixed".into(),
            items: vec![ManifestItem {
                name: "starbucks".into(),
                correct: cases(&[("588 F.3d 97", 2)]),
                chunks: vec![cases(&[("588 F.3d 97", 1)])],
                tokens: Some(starbucks_tokens()),
            }],
        };

        let stats = run_benchmark(manifest, &CitationExtractor::default())
            .await
            .unwrap();
        let item = &stats.result.items[0];
        assert_eq!(item.correct, 2);
        assert_eq!(item.errors, 0);
        assert_eq!(stats.result.accuracy(), Some(1.0));
    }

    #[tokio::test]
    async fn empty_manifest() {
        let manifest: Manifest = serde_json::from_str(r#"{"name": "none"}"#).unwrap();
        let stats = run_benchmark(manifest, &CitationExtractor::default())
            .await
            .unwrap();
        assert!(stats.result.items.is_empty());
        assert_eq!(stats.report().accuracy, None);
    }

    #[test]
    fn report_serializes_timestamp() {
        let mut result = BenchmarkResult::new("r");
        result.add_result("a", 3, 1);
        let stats = BenchStats {
            result,
            elapsed_secs: 0.5,
        };
        let json = serde_json::to_value(stats.report()).unwrap();
        assert!(json["generated_at"].is_string());
        assert_eq!(json["total_correct"], 3);
        assert_eq!(json["accuracy"], 0.75);
        assert_eq!(json["result"]["items"][0]["label"], "a");
    }
}
