//! Document-level citation extraction from classifier output.
//!
//! Runs grouping, aggregation and building over one token stream. A group
//! that cannot be built is recorded as skipped and never stops the rest of
//! the document from being processed.

use citeparse_core::{
    AggregatedEntity, AggregationConfig, Citation, CitationExtractionResult, EntityType, Tagged,
};
use tracing::{debug, warn};

use crate::builder::{Candidate, build_citation};
use crate::error::BuildError;
use crate::group::group_citations;

/// Why a candidate group produced no citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing left after aggregation.
    Empty,
    /// The group does not start with a caselaw or statute entity.
    Unrecognized(EntityType),
    /// A required field (the volume) is missing.
    Incomplete,
    /// A numeric field could not be parsed.
    Invalid(BuildError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    /// Position of the group within the document.
    pub index: usize,
    pub entities: Vec<AggregatedEntity>,
    pub reason: SkipReason,
}

/// Citations built from one document, plus the groups that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub citations: Vec<Citation>,
    pub skipped: Vec<SkippedGroup>,
}

impl Extraction {
    /// Occurrence counts keyed the same way as ground truth.
    pub fn to_result(&self) -> CitationExtractionResult {
        CitationExtractionResult::from_citations(&self.citations)
    }

    /// Number of candidate groups seen.
    pub fn group_count(&self) -> usize {
        self.citations.len() + self.skipped.len()
    }
}

/// Extracts citations from classifier token streams.
#[derive(Debug, Clone, Default)]
pub struct CitationExtractor {
    config: AggregationConfig,
}

impl CitationExtractor {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Extract every buildable citation from one document's tokens.
    pub fn extract<T: Tagged>(&self, tokens: &[T]) -> Extraction {
        let mut extraction = Extraction::default();

        for (index, entities) in group_citations(tokens, &self.config).into_iter().enumerate() {
            match build_group(&entities) {
                Ok(citation) => extraction.citations.push(citation),
                Err(reason) => {
                    match &reason {
                        SkipReason::Invalid(err) => {
                            warn!(group = index, %err, "citation group failed to build")
                        }
                        other => debug!(group = index, reason = ?other, "citation group skipped"),
                    }
                    extraction.skipped.push(SkippedGroup {
                        index,
                        entities,
                        reason,
                    });
                }
            }
        }

        debug!(
            citations = extraction.citations.len(),
            skipped = extraction.skipped.len(),
            "extracted citations"
        );
        extraction
    }

    /// Extract from several documents (or chunks of one document) and sum the counts.
    pub fn extract_counts<T: Tagged>(&self, documents: &[Vec<T>]) -> CitationExtractionResult {
        let per_doc: Vec<CitationExtractionResult> = documents
            .iter()
            .map(|doc| self.extract(doc).to_result())
            .collect();
        CitationExtractionResult::combine(&per_doc)
    }
}

/// Extract with the default configuration.
pub fn extract_citations<T: Tagged>(tokens: &[T]) -> Extraction {
    CitationExtractor::default().extract(tokens)
}

/// Only the citations, with skipped groups silently dropped.
pub fn citations<T: Tagged>(tokens: &[T], config: &AggregationConfig) -> Vec<Citation> {
    CitationExtractor::new(config.clone()).extract(tokens).citations
}

fn build_group(entities: &[AggregatedEntity]) -> Result<Citation, SkipReason> {
    let Some(first) = entities.first() else {
        return Err(SkipReason::Empty);
    };
    if Candidate::classify(entities).is_none() {
        return Err(SkipReason::Unrecognized(first.entity_type));
    }
    match build_citation(entities) {
        Ok(Some(citation)) => Ok(citation),
        Ok(None) => Err(SkipReason::Incomplete),
        Err(err) => Err(SkipReason::Invalid(err)),
    }
}
