//! Selectable choices for each facet, derived from the dataset.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::filter_state::{FilterState, NumericRange};
use crate::project::{NumericField, ProjectRecord, TagField, TextField, UNKNOWN};

/// One selectable value with the number of records carrying it in the source subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub count: u64,
}

fn into_options(counts: BTreeMap<String, u64>) -> Vec<FacetOption> {
    counts.into_iter().map(|(value, count)| FacetOption { value, count }).collect()
}

/// Distinct values of a single-valued text field, sorted lexicographically.
///
/// Country only skips absent cells. City, previous area and funding also skip the
/// literal `Unknown` placeholder.
pub fn distinct_values<'a, I>(records: I, field: TextField) -> Vec<FacetOption>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let skip_unknown = !matches!(field, TextField::Country);
    let mut counts = BTreeMap::new();
    for value in records.into_iter().filter_map(|r| r.text(field)) {
        if skip_unknown && value == UNKNOWN {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    into_options(counts)
}

/// Union of every tag in a multi-tag field, sorted. A record counts once per tag.
pub fn distinct_tags<'a, I>(records: I, field: TagField) -> Vec<FacetOption>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        let tags = record.tags(field).collect::<BTreeSet<_>>();
        for tag in tags {
            *counts.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    into_options(counts)
}

/// Distinct whole-number years of a year field, ascending.
pub fn distinct_years<'a, I>(records: I, field: NumericField) -> Vec<i32>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.year(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `[min, max]` over the records whose field coerces to a number.
pub fn numeric_extent<'a, I>(records: I, field: NumericField) -> Option<NumericRange>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    records.into_iter().filter_map(|r| r.number(field)).fold(None, |acc, v| match acc {
        None => Some(NumericRange::new(v, v)),
        Some(range) => Some(NumericRange::new(range.min.min(v), range.max.max(v))),
    })
}

/// City choices depend on the current country selection: with no country selected
/// they cover the whole dataset, otherwise only records from the selected countries.
pub fn city_options(dataset: &[ProjectRecord], countries: &BTreeSet<String>) -> Vec<FacetOption> {
    if countries.is_empty() {
        return distinct_values(dataset, TextField::City);
    }
    distinct_values(
        dataset
            .iter()
            .filter(|r| r.country.as_deref().is_some_and(|c| countries.contains(c))),
        TextField::City,
    )
}

/// Every facet's choices at once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetOptions {
    pub countries: Vec<FacetOption>,
    pub cities: Vec<FacetOption>,
    pub start_years: Vec<i32>,
    pub end_years: Vec<i32>,
    pub nbs_area: Option<NumericRange>,
    pub previous_areas: Vec<FacetOption>,
    pub nbs_types: Vec<FacetOption>,
    pub total_cost: Option<NumericRange>,
    pub funding: Vec<FacetOption>,
    pub env_impacts: Vec<FacetOption>,
    pub econ_impacts: Vec<FacetOption>,
}

impl FacetOptions {
    pub fn build(dataset: &[ProjectRecord]) -> Self {
        Self {
            countries: distinct_values(dataset, TextField::Country),
            cities: distinct_values(dataset, TextField::City),
            start_years: distinct_years(dataset, NumericField::BeginYear),
            end_years: distinct_years(dataset, NumericField::EndYear),
            nbs_area: numeric_extent(dataset, NumericField::NbsArea),
            previous_areas: distinct_values(dataset, TextField::PreviousAreaType),
            nbs_types: distinct_tags(dataset, TagField::NbsType),
            total_cost: numeric_extent(dataset, NumericField::TotalCost),
            funding: distinct_values(dataset, TextField::SourcesOfFunding),
            env_impacts: distinct_tags(dataset, TagField::EnvironmentalImpacts),
            econ_impacts: distinct_tags(dataset, TagField::EconomicImpacts),
        }
    }

    /// Rebuilds the dependent city list after the country selection changed.
    pub fn refresh_cities(&mut self, dataset: &[ProjectRecord], state: &FilterState) {
        self.cities = city_options(dataset, &state.countries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: Option<&str>, city: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            country: country.map(String::from),
            city: city.map(String::from),
            ..Default::default()
        }
    }

    fn values(options: &[FacetOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn unknown_handling_differs_per_field() {
        let data = vec![
            record(Some("Unknown"), Some("Unknown")),
            record(Some("France"), Some("Paris")),
            record(None, None),
        ];
        // country keeps the literal placeholder, city drops it
        assert_eq!(values(&distinct_values(&data, TextField::Country)), vec!["France", "Unknown"]);
        assert_eq!(values(&distinct_values(&data, TextField::City)), vec!["Paris"]);
    }

    #[test]
    fn previous_area_and_funding_drop_unknown_and_missing() {
        let data = vec![
            ProjectRecord {
                previous_area_type: Some("Brownfield".into()),
                sources_of_funding: Some("EU funds".into()),
                ..Default::default()
            },
            ProjectRecord {
                previous_area_type: Some(UNKNOWN.into()),
                sources_of_funding: Some(UNKNOWN.into()),
                ..Default::default()
            },
            ProjectRecord::default(),
            ProjectRecord {
                previous_area_type: Some("Brownfield".into()),
                sources_of_funding: Some("Private sector".into()),
                ..Default::default()
            },
        ];
        let options = FacetOptions::build(&data);
        assert_eq!(options.previous_areas, vec![FacetOption { value: "Brownfield".into(), count: 2 }]);
        assert_eq!(values(&options.funding), vec!["EU funds", "Private sector"]);
    }

    #[test]
    fn unknown_tags_are_dropped_per_tag() {
        let data = vec![
            ProjectRecord { environmental_impacts: Some(UNKNOWN.into()), ..Default::default() },
            ProjectRecord { economic_impacts: Some("Tourism".into()), ..Default::default() },
            ProjectRecord::default(),
        ];
        let options = FacetOptions::build(&data);
        assert!(options.env_impacts.is_empty());
        assert_eq!(values(&options.econ_impacts), vec!["Tourism"]);
    }

    #[test]
    fn tags_are_unioned_and_counted_once_per_record() {
        let data = vec![
            ProjectRecord { nbs_type: Some("Park; Forest; Park".into()), ..Default::default() },
            ProjectRecord { nbs_type: Some("Park".into()), ..Default::default() },
            ProjectRecord { nbs_type: Some("Unknown".into()), ..Default::default() },
        ];
        let options = distinct_tags(&data, TagField::NbsType);
        assert_eq!(
            options,
            vec![
                FacetOption { value: "Forest".into(), count: 1 },
                FacetOption { value: "Park".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn extents_and_years_skip_non_numeric() {
        let data = vec![
            ProjectRecord { begin_year: Some("2019".into()), nbs_area: Some("40".into()), ..Default::default() },
            ProjectRecord { begin_year: Some("2012".into()), nbs_area: Some("Unknown".into()), ..Default::default() },
            ProjectRecord { begin_year: Some("2019".into()), nbs_area: Some("7.5".into()), ..Default::default() },
        ];
        assert_eq!(distinct_years(&data, NumericField::BeginYear), vec![2012, 2019]);
        assert_eq!(numeric_extent(&data, NumericField::NbsArea), Some(NumericRange::new(7.5, 40.0)));
        assert_eq!(numeric_extent(&data, NumericField::TotalCost), None);
    }

    #[test]
    fn city_options_follow_country_selection() {
        let data = vec![
            record(Some("France"), Some("Lyon")),
            record(Some("Germany"), Some("Berlin")),
            record(Some("France"), Some("Paris")),
        ];
        let france = BTreeSet::from(["France".to_string()]);
        assert_eq!(values(&city_options(&data, &france)), vec!["Lyon", "Paris"]);
        assert_eq!(values(&city_options(&data, &BTreeSet::new())), vec!["Berlin", "Lyon", "Paris"]);
    }
}
