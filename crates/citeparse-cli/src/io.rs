//! JSON file I/O for token streams and extraction results.

use std::path::{Path, PathBuf};

use anyhow::Context;
use citeparse_core::{CitationExtractionResult, LabelPrediction};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

pub async fn read_tokens(path: &Path) -> anyhow::Result<Vec<LabelPrediction>> {
    read_json(path).await
}

/// Read every chunk result concurrently, preserving argument order.
pub async fn read_results(paths: &[PathBuf]) -> anyhow::Result<Vec<CitationExtractionResult>> {
    futures::future::try_join_all(paths.iter().map(|p| read_json(p))).await
}
