//! Scoring extraction output against hand-authored ground truth.
//!
//! Scoring is identical for both extraction backends. Only ground-truth keys
//! are inspected: citations present in the produced result but absent from
//! the ground truth are not penalised.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::citation::CitationKind;
use crate::extraction::CitationExtractionResult;

const KINDS: [CitationKind; 2] = [CitationKind::Caselaw, CitationKind::Statute];

/// Count-weighted errors of `produced` against `correct`.
///
/// For every ground-truth key, adds `|correct - produced|`, with an absent
/// produced key counting as zero.
pub fn error_count(correct: &CitationExtractionResult, produced: &CitationExtractionResult) -> u64 {
    KINDS
        .iter()
        .flat_map(|&kind| {
            correct
                .counts(kind)
                .iter()
                .map(move |(key, &expected)| expected.abs_diff(produced.count(kind, key)))
        })
        .fold(0, u64::saturating_add)
}

/// One error per ground-truth key that `produced` misses entirely.
///
/// A case with a produced count of zero is missing. A statute is missing only
/// when its key is absent, so an explicit zero still counts as present.
pub fn presence_error_count(
    correct: &CitationExtractionResult,
    produced: &CitationExtractionResult,
) -> u64 {
    KINDS
        .iter()
        .flat_map(|&kind| {
            correct
                .counts(kind)
                .keys()
                .filter(move |key| is_missing(produced, kind, key))
        })
        .count() as u64
}

fn is_missing(produced: &CitationExtractionResult, kind: CitationKind, key: &str) -> bool {
    match kind {
        CitationKind::Caselaw => produced.count(kind, key) == 0,
        CitationKind::Statute => !produced.counts(kind).contains_key(key),
    }
}

/// Ground-truth occurrences recovered: total expected minus errors, floored at zero.
pub fn correct_count(
    correct: &CitationExtractionResult,
    produced: &CitationExtractionResult,
) -> u64 {
    correct.total().saturating_sub(error_count(correct, produced))
}

/// Score for a single benchmark item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemScore {
    pub label: String,
    pub correct: u64,
    pub errors: u64,
}

impl ItemScore {
    /// `correct / (correct + errors)`, or `None` when both are zero.
    pub fn accuracy(&self) -> Option<f64> {
        accuracy(self.correct, self.errors)
    }
}

/// Accumulated scores for one extraction backend over a set of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub items: Vec<ItemScore>,
}

impl BenchmarkResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn add_result(&mut self, label: impl Into<String>, correct: u64, errors: u64) {
        self.items.push(ItemScore {
            label: label.into(),
            correct,
            errors,
        });
    }

    /// Score `produced` against `correct` and record it under `label`.
    pub fn score(
        &mut self,
        label: impl Into<String>,
        correct: &CitationExtractionResult,
        produced: &CitationExtractionResult,
    ) -> &ItemScore {
        let errors = error_count(correct, produced);
        let recovered = correct.total().saturating_sub(errors);
        self.add_result(label, recovered, errors);
        &self.items[self.items.len() - 1]
    }

    pub fn total_correct(&self) -> u64 {
        self.items.iter().map(|i| i.correct).fold(0, u64::saturating_add)
    }

    pub fn total_errors(&self) -> u64 {
        self.items.iter().map(|i| i.errors).fold(0, u64::saturating_add)
    }

    /// Overall accuracy across every item.
    pub fn accuracy(&self) -> Option<f64> {
        accuracy(self.total_correct(), self.total_errors())
    }

    pub fn log_individual_results(&self) {
        for item in &self.items {
            info!(
                benchmark = %self.name,
                item = %item.label,
                correct = item.correct,
                errors = item.errors,
                accuracy = item.accuracy().unwrap_or(0.0),
                "item result"
            );
        }
    }

    pub fn log_overall_results(&self) {
        info!(
            benchmark = %self.name,
            items = self.items.len(),
            correct = self.total_correct(),
            errors = self.total_errors(),
            accuracy = self.accuracy().unwrap_or(0.0),
            "overall result"
        );
    }
}

/// `correct / (correct + errors)`, or `None` when both are zero.
pub fn accuracy(correct: u64, errors: u64) -> Option<f64> {
    let total = correct as f64 + errors as f64;
    (total > 0.0).then(|| correct as f64 / total)
}
