//! Splitting a tagged token stream into citation candidates.
//!
//! Every `B-` tag of a citation-start type (`TITLE`, `CODE`, `SECTION`,
//! `CASE_NAME`, `VOLUME`) opens a new candidate that runs up to the next one.
//! Tokens before the first start tag are prose and are dropped.

use citeparse_core::{AggregatedEntity, AggregationConfig, Tag, Tagged};

use crate::aggregate::aggregate_entities;

/// Contiguous candidate groups, each starting at its first non-`O` token.
pub fn split_groups<T: Tagged>(tokens: &[T]) -> Vec<&[T]> {
    let boundaries: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.tag().is_ok_and(|tag| tag.starts_citation()))
        .map(|(i, _)| i)
        .collect();

    boundaries
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = boundaries.get(n + 1).copied().unwrap_or(tokens.len());
            trim_leading_outside(&tokens[start..end])
        })
        .filter(|group| !group.is_empty())
        .collect()
}

/// Split `tokens` into candidates and aggregate each into entity spans.
pub fn group_citations<T: Tagged>(
    tokens: &[T],
    config: &AggregationConfig,
) -> Vec<Vec<AggregatedEntity>> {
    split_groups(tokens)
        .into_iter()
        .map(|group| aggregate_entities(group, config))
        .collect()
}

fn trim_leading_outside<T: Tagged>(group: &[T]) -> &[T] {
    let first = group
        .iter()
        .position(|t| !matches!(t.tag(), Ok(Tag::Outside)))
        .unwrap_or(group.len());
    &group[first..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeparse_core::{EntityType, LabelPrediction};

    fn preds(pairs: &[(&str, &str)]) -> Vec<LabelPrediction> {
        pairs
            .iter()
            .map(|(t, l)| LabelPrediction::new(*t, *l))
            .collect()
    }

    fn labels(group: &[LabelPrediction]) -> Vec<&str> {
        group.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn drops_leading_prose() {
        let tokens = preds(&[
            ("See", "O"),
            ("also", "O"),
            ("87", "B-VOLUME"),
            ("F", "B-REPORTER"),
        ]);
        let groups = split_groups(&tokens);
        assert_eq!(groups.len(), 1);
        assert_eq!(labels(groups[0]), vec!["B-VOLUME", "B-REPORTER"]);
    }

    #[test]
    fn no_start_tag_means_no_groups() {
        let tokens = preds(&[("at", "O"), ("99", "B-PIN"), ("(", "O"), ("2009", "B-YEAR")]);
        assert!(split_groups(&tokens).is_empty());
    }

    #[test]
    fn every_start_tag_opens_a_group() {
        let tokens = preds(&[
            ("Foo", "B-CASE_NAME"),
            (",", "O"),
            ("551", "B-VOLUME"),
            ("U.S.", "B-REPORTER"),
            ("877", "B-PAGE"),
            (";", "O"),
            ("18", "B-TITLE"),
            ("U.S.C.", "B-CODE"),
            ("1961", "B-SECTION"),
        ]);
        let groups = split_groups(&tokens);
        let shapes: Vec<Vec<&str>> = groups.iter().map(|g| labels(g)).collect();
        assert_eq!(
            shapes,
            vec![
                vec!["B-CASE_NAME", "O"],
                vec!["B-VOLUME", "B-REPORTER", "B-PAGE", "O"],
                vec!["B-TITLE"],
                vec!["B-CODE"],
                vec!["B-SECTION"],
            ]
        );
    }

    #[test]
    fn inside_start_type_does_not_split() {
        let tokens = preds(&[("58", "B-VOLUME"), ("##8", "I-VOLUME"), ("F", "B-REPORTER")]);
        assert_eq!(split_groups(&tokens).len(), 1);
    }

    #[test]
    fn trailing_group_kept() {
        let tokens = preds(&[("1", "B-VOLUME"), ("2", "B-VOLUME"), (".", "O")]);
        let groups = split_groups(&tokens);
        assert_eq!(groups.len(), 2);
        assert_eq!(labels(groups[1]), vec!["B-VOLUME", "O"]);
    }

    #[test]
    fn trims_leading_outside_tokens() {
        let tokens = preds(&[("O", "O"), ("x", "I-CASE_NAME")]);
        assert_eq!(trim_leading_outside(&tokens).len(), 1);
        assert!(trim_leading_outside(&preds(&[(".", "O")])).is_empty());
    }

    #[test]
    fn groups_are_aggregated() {
        let tokens = preds(&[
            ("[CLS]", "O"),
            ("58", "B-VOLUME"),
            ("##8", "I-VOLUME"),
            ("F", "B-REPORTER"),
            (".", "I-REPORTER"),
            ("3", "I-REPORTER"),
            ("##d", "I-REPORTER"),
            ("97", "B-PAGE"),
            ("[SEP]", "O"),
        ]);
        let groups = group_citations(&tokens, &AggregationConfig::default());
        assert_eq!(
            groups,
            vec![vec![
                AggregatedEntity::new("588", EntityType::Volume),
                AggregatedEntity::new("F.3d", EntityType::Reporter),
                AggregatedEntity::new("97", EntityType::Page),
            ]]
        );
    }

    #[test]
    fn accepts_aggregated_entities() {
        let entities = vec![
            AggregatedEntity::new("Foo v. Bar", EntityType::CaseName),
            AggregatedEntity::new("551", EntityType::Volume),
            AggregatedEntity::new("U.S.", EntityType::Reporter),
        ];
        let groups = group_citations(&entities, &AggregationConfig::default());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1][1].text, "U.S.");
    }
}
