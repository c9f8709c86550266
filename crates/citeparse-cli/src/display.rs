//! Human-readable output for extracted citations, counts and scores.

use citeparse_core::{
    BenchmarkResult, CaselawCitation, Citation, CitationExtractionResult, CitationKind,
    CitationRecord, StatuteCitation, accuracy,
};
use citeparse_ner::{Extraction, SkipReason};

const MAX_SKIPPED_ITEMS: usize = 10;

// ── Public API ──

/// Print every citation as a card, followed by a summary of skipped groups.
pub fn print_extraction(extraction: &Extraction) {
    for (i, citation) in extraction.citations.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_citation_card(citation);
    }
    if !extraction.citations.is_empty() {
        println!();
    }

    println!(
        "{} citation(s) from {} group(s), {} skipped",
        extraction.citations.len(),
        extraction.group_count(),
        extraction.skipped.len()
    );
    for skipped in extraction.skipped.iter().take(MAX_SKIPPED_ITEMS) {
        let text: Vec<&str> = skipped.entities.iter().map(|e| e.text.as_str()).collect();
        println!(
            "  #{:<4} {:<28} {}",
            skipped.index,
            skip_reason(&skipped.reason),
            text.join(" ")
        );
    }
    if extraction.skipped.len() > MAX_SKIPPED_ITEMS {
        println!(
            "  ... ({} more)",
            extraction.skipped.len() - MAX_SKIPPED_ITEMS
        );
    }
}

pub fn print_citation_card(citation: &Citation) {
    println!("=== {} ===", citation.full_text());
    match citation {
        Citation::Caselaw(c) => print_caselaw(c),
        Citation::Statute(s) => print_statute(s),
    }
}

/// Print per-kind counts, one key per line.
pub fn print_result(result: &CitationExtractionResult) {
    let kinds = [
        ("Cases", CitationKind::Caselaw),
        ("Statutes", CitationKind::Statute),
    ];
    for (header, kind) in kinds {
        let counts = result.counts(kind);
        if counts.is_empty() {
            continue;
        }
        println!("{header}");
        for (key, count) in counts {
            println!("  {:<40} {}", key, count);
        }
    }
    println!("{} citation(s) total", result.total());
}

pub fn print_score(label: &str, correct: u64, errors: u64, presence_errors: Option<u64>) {
    println!("{label}");
    field("correct", correct);
    field("errors", errors);
    if let Some(missing) = presence_errors {
        field("missing keys", missing);
    }
    field("accuracy", format_accuracy(accuracy(correct, errors)));
}

pub fn print_benchmark(result: &BenchmarkResult, elapsed_secs: f64) {
    println!("=== {} ===", result.name);
    for item in &result.items {
        println!(
            "  {:<26} {:>5} correct {:>5} errors  {}",
            item.label,
            item.correct,
            item.errors,
            format_accuracy(item.accuracy())
        );
    }
    println!();
    field("items", result.items.len());
    field("correct", result.total_correct());
    field("errors", result.total_errors());
    field("accuracy", format_accuracy(result.accuracy()));
    field("elapsed", format!("{elapsed_secs:.2}s"));
}

// ── Card sections ──

fn print_caselaw(c: &CaselawCitation) {
    println!("Caselaw");
    if !c.case_name.is_empty() {
        field("plaintiff", c.plaintiff());
        if let Some(defendant) = c.defendant() {
            field("defendant", defendant);
        }
    }
    field("volume", c.volume);
    field("reporter", &c.reporter);
    if let Some(page) = c.starting_page {
        field("starting page", page);
    }
    if let Some(pin) = &c.pin_cite {
        field("pin cite", pin);
    }
    if let Some(court) = &c.court {
        field("court", court);
    }
    if let Some(year) = c.year {
        field("year", year);
    }
    field("full", if c.is_full() { "yes" } else { "no" });
    field("guid", c.guid());
}

fn print_statute(s: &StatuteCitation) {
    println!("Statute");
    if let Some(title) = &s.title {
        field("title", title);
    }
    field("code", &s.code);
    if let Some(section) = &s.section {
        field("section", section);
    }
    if let Some(year) = s.year {
        field("year", year);
    }
}

// ── Helpers ──

fn field(name: &str, value: impl std::fmt::Display) {
    println!("  {:<26} {}", name, value);
}

fn skip_reason(reason: &SkipReason) -> String {
    match reason {
        SkipReason::Empty => "empty".to_string(),
        SkipReason::Unrecognized(ty) => format!("starts with {ty}"),
        SkipReason::Incomplete => "missing volume".to_string(),
        SkipReason::Invalid(err) => err.to_string(),
    }
}

fn format_accuracy(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(a) => format!("{:.1}%", a * 100.0),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_accuracy() {
        assert_eq!(format_accuracy(accuracy(3, 1)), "75.0%");
        assert_eq!(format_accuracy(accuracy(0, 0)), "n/a");
        assert_eq!(format_accuracy(Some(1.0)), "100.0%");
    }

    #[test]
    fn prints_counts_for_both_kinds() {
        let mut result = CitationExtractionResult::default();
        result.cases.insert("588 F.3d 97".into(), 2);
        result.statutes.insert("18 U.S.C. § 1001".into(), 1);
        print_result(&result);
        print_result(&CitationExtractionResult::default());
    }

    #[test]
    fn describes_skip_reasons() {
        assert_eq!(skip_reason(&SkipReason::Incomplete), "missing volume");
        assert_eq!(
            skip_reason(&SkipReason::Unrecognized(citeparse_core::EntityType::Court)),
            "starts with COURT"
        );
    }
}
