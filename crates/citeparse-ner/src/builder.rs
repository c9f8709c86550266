//! Building typed citation records from aggregated entity groups.
//!
//! The first entity of a group decides its kind: `CASE_NAME` or `VOLUME`
//! starts a caselaw citation, `TITLE`, `CODE` or `SECTION` a statute. Each
//! builder folds the group's entities into an accumulator, then checks the
//! fields it needs.

use citeparse_core::{
    AggregatedEntity, CaselawCitation, Citation, EntityType, PinCite, StatuteCitation,
};

use crate::error::BuildError;

/// A group whose kind has been decided by its first entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Caselaw(&'a [AggregatedEntity]),
    Statute(&'a [AggregatedEntity]),
}

impl<'a> Candidate<'a> {
    /// `None` for empty groups and groups led by a non-starting type.
    pub fn classify(group: &'a [AggregatedEntity]) -> Option<Self> {
        let first = group.first()?;
        match first.entity_type {
            EntityType::CaseName | EntityType::Volume => Some(Self::Caselaw(group)),
            EntityType::Title | EntityType::Code | EntityType::Section => {
                Some(Self::Statute(group))
            }
            EntityType::Reporter
            | EntityType::Page
            | EntityType::Pin
            | EntityType::Court
            | EntityType::Year
            | EntityType::Id
            | EntityType::Supra => None,
        }
    }

    /// `Ok(None)` when a caselaw group has no volume.
    pub fn build(self) -> Result<Option<Citation>, BuildError> {
        match self {
            Self::Caselaw(entities) => Ok(build_caselaw(entities)?.map(Citation::Caselaw)),
            Self::Statute(entities) => Ok(Some(Citation::Statute(build_statute(entities)?))),
        }
    }
}

/// Classify and build in one step.
pub fn build_citation(group: &[AggregatedEntity]) -> Result<Option<Citation>, BuildError> {
    match Candidate::classify(group) {
        Some(candidate) => candidate.build(),
        None => Ok(None),
    }
}

/// Build a caselaw citation; `Ok(None)` if no `VOLUME` was tagged.
pub fn build_caselaw(
    entities: &[AggregatedEntity],
) -> Result<Option<CaselawCitation>, BuildError> {
    let fields = entities
        .iter()
        .try_fold(CaselawFields::default(), CaselawFields::absorb)?;
    Ok(fields.finish())
}

/// Build a statute citation. Every field is optional, so this only fails on a bad year.
pub fn build_statute(entities: &[AggregatedEntity]) -> Result<StatuteCitation, BuildError> {
    let fields = entities
        .iter()
        .try_fold(StatuteFields::default(), StatuteFields::absorb)?;
    Ok(fields.finish())
}

#[derive(Default)]
struct CaselawFields {
    case_name: String,
    volume: Option<u32>,
    reporter: String,
    starting_page: Option<u32>,
    pin_cite: Option<PinCite>,
    court: Option<String>,
    year: Option<u32>,
}

impl CaselawFields {
    fn absorb(mut self, entity: &AggregatedEntity) -> Result<Self, BuildError> {
        let text = entity.text.trim();
        match entity.entity_type {
            EntityType::CaseName => append_spaced(&mut self.case_name, text),
            EntityType::Volume => self.volume = Some(parse_number(EntityType::Volume, text)?),
            EntityType::Reporter => self.reporter = text.to_string(),
            EntityType::Page => self.starting_page = Some(parse_number(EntityType::Page, text)?),
            EntityType::Pin => self.pin_cite = Some(parse_pin_cite(text)?),
            EntityType::Court => self.court = Some(text.to_string()),
            EntityType::Year => self.year = Some(parse_number(EntityType::Year, text)?),
            EntityType::Title
            | EntityType::Code
            | EntityType::Section
            | EntityType::Id
            | EntityType::Supra => {}
        }
        Ok(self)
    }

    fn finish(self) -> Option<CaselawCitation> {
        Some(CaselawCitation {
            case_name: self.case_name,
            volume: self.volume?,
            reporter: self.reporter,
            starting_page: self.starting_page,
            pin_cite: self.pin_cite,
            court: self.court,
            year: self.year,
        })
    }
}

#[derive(Default)]
struct StatuteFields {
    title: String,
    code: String,
    section: String,
    year: Option<u32>,
}

impl StatuteFields {
    fn absorb(mut self, entity: &AggregatedEntity) -> Result<Self, BuildError> {
        let text = entity.text.trim();
        match entity.entity_type {
            EntityType::Title => append_spaced(&mut self.title, text),
            EntityType::Code => append_spaced(&mut self.code, text),
            EntityType::Section => append_spaced(&mut self.section, text),
            EntityType::Year => self.year = Some(parse_number(EntityType::Year, text)?),
            EntityType::CaseName
            | EntityType::Volume
            | EntityType::Reporter
            | EntityType::Page
            | EntityType::Pin
            | EntityType::Court
            | EntityType::Id
            | EntityType::Supra => {}
        }
        Ok(self)
    }

    fn finish(self) -> StatuteCitation {
        StatuteCitation {
            title: non_empty(self.title),
            code: self.code,
            section: non_empty(self.section),
            year: self.year,
        }
    }
}

fn append_spaced(into: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !into.is_empty() {
        into.push(' ');
    }
    into.push_str(text);
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn parse_number(field: EntityType, text: &str) -> Result<u32, BuildError> {
    text.parse().map_err(|_| BuildError::InvalidNumber {
        field,
        text: text.to_string(),
    })
}

/// `"99"` → `99`, `"101-108"` → `101-108`. An en dash also separates a range.
fn parse_pin_cite(text: &str) -> Result<PinCite, BuildError> {
    let invalid = || BuildError::InvalidPinCite(text.to_string());
    match text.split_once(['-', '–']) {
        Some((start, end)) => Ok(PinCite {
            start: start.trim().parse().map_err(|_| invalid())?,
            end: Some(end.trim().parse().map_err(|_| invalid())?),
        }),
        None => Ok(PinCite {
            start: text.parse().map_err(|_| invalid())?,
            end: None,
        }),
    }
}
