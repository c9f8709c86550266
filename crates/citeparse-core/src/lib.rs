pub mod citation;
pub mod config;
pub mod extraction;
pub mod label;
pub mod scoring;

pub use citation::{
    CaselawCitation, Citation, CitationKind, CitationRecord, PinCite, StatuteCitation,
};
pub use config::{AggregationConfig, ConfigError};
pub use extraction::CitationExtractionResult;
pub use label::{
    AggregatedEntity, CITATION_START_TYPES, EntityType, LabelError, LabelPrediction, Tag, Tagged,
};
pub use scoring::{
    BenchmarkResult, ItemScore, accuracy, correct_count, error_count, presence_error_count,
};
