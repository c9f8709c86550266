//! Typed citation records.
//!
//! Each record has a human-readable [`full_text`](CitationRecord::full_text)
//! and a canonical [`guid`](CitationRecord::guid) used to deduplicate and
//! score citations regardless of their surface form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shared behaviour of caselaw and statute citations.
pub trait CitationRecord {
    /// Bluebook-like rendering of the citation.
    fn full_text(&self) -> String;

    /// Canonical identity key.
    fn guid(&self) -> String;
}

/// Which half of a [`CitationExtractionResult`](crate::CitationExtractionResult)
/// a citation counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    Caselaw,
    Statute,
}

impl CitationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Caselaw => "caselaw",
            Self::Statute => "statute",
        }
    }
}

/// A pin cite: a single page, or a page range when `end` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinCite {
    pub start: u32,
    pub end: Option<u32>,
}

impl fmt::Display for PinCite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

/// A citation to a reported case, e.g. `Starbucks Corp. v. Wolfe's Borough
/// Coffee, Inc., 588 F.3d 97, 114 (2d Cir. 2009)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaselawCitation {
    pub case_name: String,
    pub volume: u32,
    pub reporter: String,
    pub starting_page: Option<u32>,
    pub pin_cite: Option<PinCite>,
    pub court: Option<String>,
    pub year: Option<u32>,
}

impl CaselawCitation {
    /// A full citation names both parties and gives the starting page.
    pub fn is_full(&self) -> bool {
        self.starting_page.is_some()
            && (self.case_name.contains("v. ") || self.case_name.contains("v "))
    }

    /// The party before `v.`, or the whole name for `In re` style captions.
    pub fn plaintiff(&self) -> &str {
        self.case_name
            .split_once(" v. ")
            .map_or(self.case_name.as_str(), |(p, _)| p)
    }

    /// The party after `v.`, if the name has one.
    pub fn defendant(&self) -> Option<&str> {
        self.case_name.split_once(" v. ").map(|(_, d)| d)
    }

    fn parenthetical(&self) -> Option<String> {
        match (&self.court, self.year) {
            (Some(court), Some(year)) => Some(format!("({court} {year})")),
            (Some(court), None) => Some(format!("({court})")),
            (None, Some(year)) => Some(format!("({year})")),
            (None, None) => None,
        }
    }
}

impl CitationRecord for CaselawCitation {
    fn full_text(&self) -> String {
        let mut out = String::new();
        if !self.case_name.is_empty() {
            out.push_str(&self.case_name);
            out.push_str(", ");
        }
        out.push_str(&format!("{} {}", self.volume, self.reporter));
        if let Some(page) = self.starting_page {
            out.push_str(&format!(" {page}"));
        }
        if let Some(pin) = self.pin_cite {
            out.push_str(&format!(", {pin}"));
        }
        if let Some(paren) = self.parenthetical() {
            out.push(' ');
            out.push_str(&paren);
        }
        out
    }

    /// `"{volume} {reporter}[ {starting_page}]"`. Name, pin cite, court and
    /// year are left out so full and short forms of one opinion collapse.
    fn guid(&self) -> String {
        match self.starting_page {
            Some(page) => format!("{} {} {}", self.volume, self.reporter, page),
            None => format!("{} {}", self.volume, self.reporter),
        }
    }
}

/// A citation to a statute or rule, e.g. `18 U.S.C. § 1961(1)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteCitation {
    pub title: Option<String>,
    pub code: String,
    pub section: Option<String>,
    pub year: Option<u32>,
}

impl StatuteCitation {
    /// No code was tagged. Still a record, but usually noise.
    pub fn is_degenerate(&self) -> bool {
        self.code.is_empty()
    }
}

impl CitationRecord for StatuteCitation {
    fn full_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if let Some(title) = &self.title {
            parts.push(title);
        }
        if !self.code.is_empty() {
            parts.push(&self.code);
        }
        if let Some(section) = &self.section {
            parts.push("§");
            parts.push(section);
        }
        parts.join(" ")
    }

    fn guid(&self) -> String {
        self.full_text()
    }
}

/// A built citation of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Citation {
    Caselaw(CaselawCitation),
    Statute(StatuteCitation),
}

impl Citation {
    pub fn kind(&self) -> CitationKind {
        match self {
            Self::Caselaw(_) => CitationKind::Caselaw,
            Self::Statute(_) => CitationKind::Statute,
        }
    }

    pub fn as_caselaw(&self) -> Option<&CaselawCitation> {
        match self {
            Self::Caselaw(c) => Some(c),
            Self::Statute(_) => None,
        }
    }

    pub fn as_statute(&self) -> Option<&StatuteCitation> {
        match self {
            Self::Statute(s) => Some(s),
            Self::Caselaw(_) => None,
        }
    }
}

impl CitationRecord for Citation {
    fn full_text(&self) -> String {
        match self {
            Self::Caselaw(c) => c.full_text(),
            Self::Statute(s) => s.full_text(),
        }
    }

    fn guid(&self) -> String {
        match self {
            Self::Caselaw(c) => c.guid(),
            Self::Statute(s) => s.guid(),
        }
    }
}

impl From<CaselawCitation> for Citation {
    fn from(c: CaselawCitation) -> Self {
        Self::Caselaw(c)
    }
}

impl From<StatuteCitation> for Citation {
    fn from(s: StatuteCitation) -> Self {
        Self::Statute(s)
    }
}
