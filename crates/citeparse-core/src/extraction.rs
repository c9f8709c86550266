//! Citation occurrence counts, per chunk or per document.
//!
//! Both extraction backends produce this shape: the LLM path emits it
//! directly per chunk, the token classifier path builds it from citations via
//! [`CitationExtractionResult::from_citations`]. Chunk results are combined
//! by summing counts per key, which is commutative and associative, so chunks
//! may be extracted in any order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::citation::{Citation, CitationKind, CitationRecord};

/// Citation key → occurrence count, for cases and statutes independently.
///
/// A key absent from a map counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationExtractionResult {
    #[serde(default)]
    pub cases: BTreeMap<String, u64>,
    #[serde(default)]
    pub statutes: BTreeMap<String, u64>,
}

impl CitationExtractionResult {
    pub fn new(cases: BTreeMap<String, u64>, statutes: BTreeMap<String, u64>) -> Self {
        Self { cases, statutes }
    }

    /// Count citations by key: cases by guid, statutes by full text.
    ///
    /// Degenerate statutes (no code) are not counted.
    pub fn from_citations<'a>(citations: impl IntoIterator<Item = &'a Citation>) -> Self {
        let mut result = Self::default();
        for citation in citations {
            match citation {
                Citation::Caselaw(c) => *result.cases.entry(c.guid()).or_insert(0) += 1,
                Citation::Statute(s) if !s.is_degenerate() => {
                    *result.statutes.entry(s.guid()).or_insert(0) += 1
                }
                Citation::Statute(_) => {}
            }
        }
        result
    }

    /// Sum any number of results into a new one.
    pub fn combine<'a>(results: impl IntoIterator<Item = &'a CitationExtractionResult>) -> Self {
        let mut combined = Self::default();
        for result in results {
            combined.absorb(result);
        }
        combined
    }

    /// Sum of `self` and `other`; neither is modified.
    pub fn merge(&self, other: &CitationExtractionResult) -> Self {
        let mut merged = self.clone();
        merged.absorb(other);
        merged
    }

    fn absorb(&mut self, other: &CitationExtractionResult) {
        add_counts(&mut self.cases, &other.cases);
        add_counts(&mut self.statutes, &other.statutes);
    }

    /// The count map for one citation kind.
    pub fn counts(&self, kind: CitationKind) -> &BTreeMap<String, u64> {
        match kind {
            CitationKind::Caselaw => &self.cases,
            CitationKind::Statute => &self.statutes,
        }
    }

    /// Occurrences of `key`, zero when absent.
    pub fn count(&self, kind: CitationKind, key: &str) -> u64 {
        self.counts(kind).get(key).copied().unwrap_or(0)
    }

    /// Total occurrences across both kinds, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.cases
            .values()
            .chain(self.statutes.values())
            .fold(0, |acc, &n| acc.saturating_add(n))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn add_counts(into: &mut BTreeMap<String, u64>, from: &BTreeMap<String, u64>) {
    for (key, &count) in from {
        let slot = into.entry(key.clone()).or_insert(0);
        *slot = slot.saturating_add(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::{CaselawCitation, StatuteCitation};

    fn result(cases: &[(&str, u64)], statutes: &[(&str, u64)]) -> CitationExtractionResult {
        CitationExtractionResult::new(
            cases.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            statutes.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    fn chunks() -> Vec<CitationExtractionResult> {
        vec![
            result(&[("588 F.3d 97", 1), ("604 F.2d 200", 1)], &[("15 U.S.C. § 1114", 1)]),
            result(&[("604 F.2d 200", 1)], &[]),
            result(&[("335 F.3d 141", 1)], &[("50 U.S.C. § 1806(g)", 3)]),
            result(&[], &[("15 U.S.C. § 1114", 2)]),
        ]
    }

    #[test]
    fn combine_sums_per_key() {
        let combined = CitationExtractionResult::combine(&chunks());
        assert_eq!(
            combined,
            result(
                &[("588 F.3d 97", 1), ("604 F.2d 200", 2), ("335 F.3d 141", 1)],
                &[("15 U.S.C. § 1114", 3), ("50 U.S.C. § 1806(g)", 3)],
            )
        );
        assert_eq!(combined.total(), 10);
    }

    #[test]
    fn combine_is_order_independent() {
        let forward = chunks();
        let expected = CitationExtractionResult::combine(&forward);

        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(CitationExtractionResult::combine(&reversed), expected);

        // Every rotation, too.
        for shift in 1..forward.len() {
            let mut rotated = forward.clone();
            rotated.rotate_left(shift);
            assert_eq!(CitationExtractionResult::combine(&rotated), expected);
        }
    }

    #[test]
    fn merge_is_associative_with_empty_identity() {
        let [a, b, c, _] = <[_; 4]>::try_from(chunks()).unwrap();
        let left = a.merge(&b).merge(&c);
        let right = a.merge(&b.merge(&c));
        assert_eq!(left, right);
        assert_eq!(a.merge(&CitationExtractionResult::default()), a);
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let a = result(&[("588 F.3d 97", 1)], &[]);
        let b = result(&[("588 F.3d 97", 2)], &[]);
        let merged = a.merge(&b);
        assert_eq!(merged.count(CitationKind::Caselaw, "588 F.3d 97"), 3);
        assert_eq!(a.count(CitationKind::Caselaw, "588 F.3d 97"), 1);
        assert_eq!(b.count(CitationKind::Caselaw, "588 F.3d 97"), 2);
    }

    #[test]
    fn huge_counts_saturate() {
        let chunks = [
            result(&[("588 F.3d 97", u64::MAX)], &[]),
            result(&[("588 F.3d 97", 1)], &[("18 U.S.C. § 1001", 5)]),
        ];
        let combined = CitationExtractionResult::combine(&chunks);
        assert_eq!(combined.cases["588 F.3d 97"], u64::MAX);
        assert_eq!(combined.statutes["18 U.S.C. § 1001"], 5);
        assert_eq!(combined.total(), u64::MAX);
    }

    #[test]
    fn combine_nothing_is_empty() {
        let combined = CitationExtractionResult::combine(std::iter::empty());
        assert!(combined.is_empty());
        assert_eq!(combined.count(CitationKind::Statute, "18 U.S.C. § 1001"), 0);
    }

    #[test]
    fn from_citations_keys_by_guid() {
        let full = CaselawCitation {
            case_name: "Starbucks Corp. v. Wolfe's Borough Coffee, Inc.".into(),
            volume: 588,
            reporter: "F.3d".into(),
            starting_page: Some(97),
            pin_cite: None,
            court: Some("2d Cir.".into()),
            year: Some(2009),
        };
        let short = CaselawCitation {
            case_name: "Starbucks".into(),
            court: None,
            year: None,
            ..full.clone()
        };
        let statute = StatuteCitation {
            title: Some("15".into()),
            code: "U.S.C.".into(),
            section: Some("1114".into()),
            year: None,
        };
        let citations: Vec<Citation> = vec![
            full.into(),
            short.into(),
            statute.into(),
            StatuteCitation::default().into(),
        ];

        let res = CitationExtractionResult::from_citations(&citations);
        assert_eq!(res, result(&[("588 F.3d 97", 2)], &[("15 U.S.C. § 1114", 1)]));
    }

    #[test]
    fn json_shape_with_missing_keys() {
        let res: CitationExtractionResult =
            serde_json::from_str(r#"{"cases": {"588 F.3d 97": 1}}"#).unwrap();
        assert_eq!(res.count(CitationKind::Caselaw, "588 F.3d 97"), 1);
        assert!(res.statutes.is_empty());

        let negative = serde_json::from_str::<CitationExtractionResult>(
            r#"{"cases": {"588 F.3d 97": -1}, "statutes": {}}"#,
        );
        assert!(negative.is_err(), "counts are never negative");
    }
}
