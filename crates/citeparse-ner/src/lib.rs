//! Post-processing for citation token classifiers: BIO aggregation, citation
//! grouping, and typed record building.

mod aggregate;
mod builder;
mod error;
mod extractor;
mod group;

pub use aggregate::aggregate_entities;
pub use builder::{Candidate, build_caselaw, build_citation, build_statute};
pub use error::BuildError;
pub use extractor::{
    CitationExtractor, Extraction, SkipReason, SkippedGroup, citations, extract_citations,
};
pub use group::{group_citations, split_groups};
