//! BIO labels as emitted by the citation token classifier.
//!
//! A label is either `O` (outside any entity) or `B-<TYPE>` / `I-<TYPE>`,
//! where `<TYPE>` is one of the twelve [`EntityType`]s the classifier was
//! trained on. Anything else is malformed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix marking the first token of an entity span.
pub const BEGIN_PREFIX: &str = "B-";
/// Prefix marking a continuation token of an entity span.
pub const INSIDE_PREFIX: &str = "I-";
/// Label for tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// Entity types that open a new citation candidate when seen with a `B-` prefix.
pub const CITATION_START_TYPES: &[EntityType] = &[
    EntityType::Title,
    EntityType::Code,
    EntityType::Section,
    EntityType::CaseName,
    EntityType::Volume,
];

/// The closed set of entity types the classifier can tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    // Caselaw components.
    CaseName,
    Volume,
    Reporter,
    Page,
    Pin,
    Court,
    Year,
    // Statute components.
    Title,
    Code,
    Section,
    // Short-form cross references.
    Id,
    Supra,
}

impl EntityType {
    pub const ALL: [EntityType; 12] = [
        Self::CaseName,
        Self::Volume,
        Self::Reporter,
        Self::Page,
        Self::Pin,
        Self::Court,
        Self::Year,
        Self::Title,
        Self::Code,
        Self::Section,
        Self::Id,
        Self::Supra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaseName => "CASE_NAME",
            Self::Volume => "VOLUME",
            Self::Reporter => "REPORTER",
            Self::Page => "PAGE",
            Self::Pin => "PIN",
            Self::Court => "COURT",
            Self::Year => "YEAR",
            Self::Title => "TITLE",
            Self::Code => "CODE",
            Self::Section => "SECTION",
            Self::Id => "ID",
            Self::Supra => "SUPRA",
        }
    }

    /// Whether a `B-` tag of this type opens a new citation candidate.
    pub fn starts_citation(&self) -> bool {
        CITATION_START_TYPES.contains(self)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LabelError::UnknownType(s.to_string()))
    }
}

/// Why a label string could not be read as a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label {0:?} has no B-/I- prefix and is not \"O\"")]
    MissingPrefix(String),

    #[error("label {0:?} has an unknown prefix")]
    UnknownPrefix(String),

    #[error("unknown entity type {0:?}")]
    UnknownType(String),
}

/// A parsed BIO tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Begin(EntityType),
    Inside(EntityType),
    Outside,
}

impl Tag {
    /// Parse a raw label such as `B-CASE_NAME`, `I-PIN`, or `O`.
    pub fn parse(label: &str) -> Result<Self, LabelError> {
        if label == OUTSIDE {
            return Ok(Self::Outside);
        }
        if let Some(ty) = label.strip_prefix(BEGIN_PREFIX) {
            return Ok(Self::Begin(ty.parse()?));
        }
        if let Some(ty) = label.strip_prefix(INSIDE_PREFIX) {
            return Ok(Self::Inside(ty.parse()?));
        }
        match label.split_once('-') {
            Some(_) => Err(LabelError::UnknownPrefix(label.to_string())),
            None => Err(LabelError::MissingPrefix(label.to_string())),
        }
    }

    /// The entity type, for `B-` and `I-` tags.
    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            Self::Begin(t) | Self::Inside(t) => Some(*t),
            Self::Outside => None,
        }
    }

    /// Whether this tag opens a new citation candidate.
    pub fn starts_citation(&self) -> bool {
        matches!(self, Self::Begin(t) if t.starts_citation())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(t) => write!(f, "{BEGIN_PREFIX}{t}"),
            Self::Inside(t) => write!(f, "{INSIDE_PREFIX}{t}"),
            Self::Outside => f.write_str(OUTSIDE),
        }
    }
}

impl FromStr for Tag {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Anything carrying token text and a BIO tag.
///
/// Implemented by raw [`LabelPrediction`]s and by [`AggregatedEntity`]s (which
/// read as a `B-` tag of their type), so aggregation and grouping accept either.
pub trait Tagged {
    fn text(&self) -> &str;

    /// The tag, or an error when the underlying label is malformed.
    fn tag(&self) -> Result<Tag, LabelError>;
}

/// One sub-word token and the label the classifier assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPrediction {
    pub token: String,
    pub label: String,
}

impl LabelPrediction {
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for LabelPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.token, self.label)
    }
}

impl Tagged for LabelPrediction {
    fn text(&self) -> &str {
        &self.token
    }

    fn tag(&self) -> Result<Tag, LabelError> {
        Tag::parse(&self.label)
    }
}

/// A joined entity span with its BIO prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEntity {
    pub text: String,
    pub entity_type: EntityType,
}

impl AggregatedEntity {
    pub fn new(text: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            text: text.into(),
            entity_type,
        }
    }
}

impl Tagged for AggregatedEntity {
    fn text(&self) -> &str {
        &self.text
    }

    fn tag(&self) -> Result<Tag, LabelError> {
        Ok(Tag::Begin(self.entity_type))
    }
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn tag(&self) -> Result<Tag, LabelError> {
        (**self).tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_begin_inside_outside() {
        assert_eq!(Tag::parse("B-CASE_NAME"), Ok(Tag::Begin(EntityType::CaseName)));
        assert_eq!(Tag::parse("I-PIN"), Ok(Tag::Inside(EntityType::Pin)));
        assert_eq!(Tag::parse("O"), Ok(Tag::Outside));
    }

    #[test]
    fn display_round_trips_every_label() {
        for ty in EntityType::ALL {
            for tag in [Tag::Begin(ty), Tag::Inside(ty)] {
                assert_eq!(Tag::parse(&tag.to_string()), Ok(tag));
            }
        }
        assert_eq!(Tag::Outside.to_string(), "O");
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(
            Tag::parse("CASE_NAME"),
            Err(LabelError::MissingPrefix("CASE_NAME".into()))
        );
        assert_eq!(
            Tag::parse("E-YEAR"),
            Err(LabelError::UnknownPrefix("E-YEAR".into()))
        );
        assert_eq!(
            Tag::parse("B-JUDGE"),
            Err(LabelError::UnknownType("JUDGE".into()))
        );
        assert!(Tag::parse("o").is_err());
        assert!(Tag::parse("").is_err());
    }

    #[test]
    fn citation_start_types() {
        assert!(Tag::Begin(EntityType::Volume).starts_citation());
        assert!(Tag::Begin(EntityType::Title).starts_citation());
        assert!(!Tag::Inside(EntityType::Volume).starts_citation());
        assert!(!Tag::Begin(EntityType::Reporter).starts_citation());
        assert!(!Tag::Begin(EntityType::Supra).starts_citation());
        assert!(!Tag::Outside.starts_citation());
    }

    #[test]
    fn aggregated_entity_reads_as_begin() {
        let ent = AggregatedEntity::new("F.3d", EntityType::Reporter);
        assert_eq!(ent.tag(), Ok(Tag::Begin(EntityType::Reporter)));
        assert_eq!(ent.text(), "F.3d");
    }

    #[test]
    fn entity_type_serializes_as_label_text() {
        let json = serde_json::to_string(&EntityType::CaseName).unwrap();
        assert_eq!(json, "\"CASE_NAME\"");
        let back: EntityType = serde_json::from_str("\"SUPRA\"").unwrap();
        assert_eq!(back, EntityType::Supra);
    }

    #[test]
    fn label_prediction_json_shape() {
        let pred: LabelPrediction =
            serde_json::from_str(r###"{"token": "##d", "label": "I-REPORTER"}"###).unwrap();
        assert_eq!(pred, LabelPrediction::new("##d", "I-REPORTER"));
        assert_eq!(pred.to_string(), "##d: I-REPORTER");
    }
}
