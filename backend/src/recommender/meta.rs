//! Form metadata for the recommender: feature levels and numeric extents.

use std::collections::{BTreeMap, BTreeSet};

use common::project::{NumericField, ProjectRecord, TextField};
use common::recommender::{NumericExtent, RecommenderFeature, RsMeta};

use crate::recommender::model::funding_tags;

fn levels(dataset: &[ProjectRecord], field: TextField) -> Vec<String> {
    dataset
        .iter()
        .filter_map(|r| r.text(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn extent(values: impl Iterator<Item = f64>) -> NumericExtent {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<NumericExtent>, v| {
            Some(match acc {
                None => NumericExtent { min: v, max: v },
                Some(e) => NumericExtent { min: e.min.min(v), max: e.max.max(v) },
            })
        })
        .unwrap_or_default()
}

/// Choices for the preference form: categorical levels, numeric ranges and the
/// funding vocabulary.
pub fn build_rs_meta(dataset: &[ProjectRecord]) -> RsMeta {
    let categorical = BTreeMap::from([
        (RecommenderFeature::Country.key().to_string(), levels(dataset, TextField::Country)),
        (RecommenderFeature::Status.key().to_string(), levels(dataset, TextField::Status)),
        (RecommenderFeature::PreviousAreaType.key().to_string(), levels(dataset, TextField::PreviousAreaType)),
    ]);
    let numeric_ranges = BTreeMap::from([
        (
            RecommenderFeature::Duration.key().to_string(),
            extent(dataset.iter().filter_map(ProjectRecord::duration)),
        ),
        (
            RecommenderFeature::NbsArea.key().to_string(),
            extent(dataset.iter().filter_map(|r| r.number(NumericField::NbsArea))),
        ),
        (
            RecommenderFeature::TotalCost.key().to_string(),
            extent(dataset.iter().filter_map(|r| r.number(NumericField::TotalCost))),
        ),
    ]);
    let funding_tags = dataset
        .iter()
        .flat_map(funding_tags)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    RsMeta { categorical, numeric_ranges, funding_tags }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_lists_levels_ranges_and_tags() {
        let data = vec![
            ProjectRecord {
                country: Some("France".into()),
                status: Some("Ongoing".into()),
                total_cost: Some("500".into()),
                begin_year: Some("2012".into()),
                end_year: Some("2020".into()),
                sources_of_funding: Some("EU;City".into()),
                ..Default::default()
            },
            ProjectRecord {
                country: Some("Austria".into()),
                total_cost: Some("Unknown".into()),
                sources_of_funding: Some("unknown".into()),
                ..Default::default()
            },
        ];
        let meta = build_rs_meta(&data);
        assert_eq!(meta.categorical["country"], vec!["Austria", "France"]);
        assert_eq!(meta.categorical["status"], vec!["Ongoing"]);
        assert!(meta.categorical["previous_area_type"].is_empty());
        assert_eq!(meta.numeric_ranges["duration"], NumericExtent { min: 8.0, max: 8.0 });
        assert_eq!(meta.numeric_ranges["nbs_area"], NumericExtent { min: 0.0, max: 0.0 });
        assert_eq!(meta.funding_tags, vec!["City", "EU"]);
    }
}
