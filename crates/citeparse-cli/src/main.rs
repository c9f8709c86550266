mod bench;
mod display;
mod io;

use std::path::{Path, PathBuf};

use anyhow::Context;
use citeparse_core::{
    AggregationConfig, CitationExtractionResult, correct_count, error_count, presence_error_count,
};
use citeparse_ner::CitationExtractor;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "citeparse",
    version,
    about = "Legal citation extraction from token classifier output"
)]
struct Cli {
    /// Aggregation config (JSON).
    #[arg(long, global = true, env = "CITEPARSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build citations from a labelled token stream.
    Extract {
        tokens: PathBuf,
        /// Print only the counts, as an extraction result JSON.
        #[arg(long)]
        json: bool,
    },
    /// Sum the results of several chunks of one document.
    Combine {
        #[arg(required = true)]
        chunks: Vec<PathBuf>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Score a produced result against ground truth.
    Score {
        #[arg(long)]
        correct: PathBuf,
        #[arg(long)]
        produced: PathBuf,
        /// Also report ground-truth keys missing entirely.
        #[arg(long)]
        presence: bool,
    },
    /// Score every item of a benchmark manifest.
    Benchmark {
        manifest: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("citeparse v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;
    let extractor = CitationExtractor::new(config);

    match cli.command {
        Command::Extract { tokens, json } => cmd_extract(&extractor, &tokens, json).await,
        Command::Combine { chunks, output } => cmd_combine(&chunks, output.as_deref()).await,
        Command::Score {
            correct,
            produced,
            presence,
        } => cmd_score(&correct, &produced, presence).await,
        Command::Benchmark { manifest, report } => {
            cmd_benchmark(&extractor, &manifest, report.as_deref()).await
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AggregationConfig> {
    match path {
        Some(path) => {
            let config = AggregationConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                marker = %config.continuation_marker,
                "loaded config"
            );
            Ok(config)
        }
        None => Ok(AggregationConfig::default()),
    }
}

async fn cmd_extract(
    extractor: &CitationExtractor,
    path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let tokens = io::read_tokens(path).await?;
    tracing::info!(tokens = tokens.len(), path = %path.display(), "extracting");

    let extraction = extractor.extract(&tokens);
    let counts = extraction.to_result();
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        display::print_extraction(&extraction);
        println!();
        display::print_result(&counts);
    }
    Ok(())
}

async fn cmd_combine(chunks: &[PathBuf], output: Option<&Path>) -> anyhow::Result<()> {
    let results = io::read_results(chunks).await?;
    let combined = CitationExtractionResult::combine(&results);
    tracing::info!(chunks = results.len(), total = combined.total(), "combined");

    match output {
        Some(path) => {
            io::write_json(path, &combined).await?;
            eprintln!("Wrote {} citation(s) to {}", combined.total(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&combined)?),
    }
    Ok(())
}

async fn cmd_score(correct: &Path, produced: &Path, presence: bool) -> anyhow::Result<()> {
    let (truth, output) = tokio::try_join!(
        io::read_json::<CitationExtractionResult>(correct),
        io::read_json::<CitationExtractionResult>(produced),
    )?;

    let errors = error_count(&truth, &output);
    let recovered = correct_count(&truth, &output);
    let missing = presence.then(|| presence_error_count(&truth, &output));

    display::print_score(&produced.display().to_string(), recovered, errors, missing);
    Ok(())
}

async fn cmd_benchmark(
    extractor: &CitationExtractor,
    path: &Path,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    let manifest: bench::Manifest = io::read_json(path).await?;
    eprintln!("  Scoring {} item(s) from {}", manifest.items.len(), path.display());

    let stats = bench::run_benchmark(manifest, extractor).await?;
    stats.result.log_individual_results();
    stats.result.log_overall_results();
    display::print_benchmark(&stats.result, stats.elapsed_secs);

    if let Some(report_path) = report {
        io::write_json(report_path, &stats.report()).await?;
        eprintln!("  Wrote report to {}", report_path.display());
    }
    Ok(())
}
