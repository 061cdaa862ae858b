//! Recomputes the filtered subset of the dataset from the current filter state.
//!
//! Predicates are AND-combined and applied as sequential narrowing in a fixed order:
//! search, countries, cities, start year, end year, nbs area, previous area, nbs type,
//! total cost, funding, environmental impacts, economic impacts. Every pass keeps the
//! original row order.

use std::collections::BTreeSet;

use crate::filter_state::{FilterState, NumericRange};
use crate::project::{NumericField, ProjectRecord, TagField, UNKNOWN};

/// Filters `dataset` by `state`. Pure: the dataset is never modified.
pub fn apply<'a>(dataset: &'a [ProjectRecord], state: &FilterState) -> Vec<&'a ProjectRecord> {
    apply_indices(dataset, state).into_iter().map(|i| &dataset[i]).collect()
}

/// Same as [`apply`], returning positions into `dataset`.
pub fn apply_indices(dataset: &[ProjectRecord], state: &FilterState) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..dataset.len()).collect();
    let mut narrow = |pred: &dyn Fn(&ProjectRecord) -> bool| narrow_rows(&mut rows, dataset, pred);

    if !state.search.is_empty() {
        narrow(&|d| matches_search(d, &state.search));
    }
    if !state.countries.is_empty() {
        narrow(&|d| in_set(&state.countries, d.country.as_deref()));
    }
    if !state.cities.is_empty() {
        narrow(&|d| in_set(&state.cities, d.city.as_deref()));
    }
    if let Some(threshold) = state.start_year {
        narrow(&|d| d.number(NumericField::BeginYear).is_some_and(|y| y >= threshold as f64));
    }
    if let Some(threshold) = state.end_year {
        narrow(&|d| d.number(NumericField::EndYear).is_some_and(|y| y <= threshold as f64));
    }
    if let Some(range) = state.nbs_area.active() {
        narrow(&|d| in_range(range, d.number(NumericField::NbsArea)));
    }
    if !state.previous_area.is_empty() {
        narrow(&|d| in_set(&state.previous_area, d.previous_area_type.as_deref()));
    }
    if !state.nbs_type.is_empty() {
        narrow(&|d| any_tag(&state.nbs_type, d, TagField::NbsType));
    }
    if let Some(range) = state.total_cost.active() {
        narrow(&|d| in_range(range, d.number(NumericField::TotalCost)));
    }
    if !state.funding.is_empty() {
        narrow(&|d| matches_funding(&state.funding, d.sources_of_funding.as_deref()));
    }
    if !state.env_impacts.is_empty() {
        narrow(&|d| any_tag(&state.env_impacts, d, TagField::EnvironmentalImpacts));
    }
    if !state.econ_impacts.is_empty() {
        narrow(&|d| any_tag(&state.econ_impacts, d, TagField::EconomicImpacts));
    }

    rows
}

fn narrow_rows(rows: &mut Vec<usize>, dataset: &[ProjectRecord], pred: &dyn Fn(&ProjectRecord) -> bool) {
    rows.retain(|&i| pred(&dataset[i]));
}

/// Evaluates every predicate on a single record, without the narrowing passes.
pub fn matches(record: &ProjectRecord, state: &FilterState) -> bool {
    (state.search.is_empty() || matches_search(record, &state.search))
        && (state.countries.is_empty() || in_set(&state.countries, record.country.as_deref()))
        && (state.cities.is_empty() || in_set(&state.cities, record.city.as_deref()))
        && state.start_year.is_none_or(|t| {
            record.number(NumericField::BeginYear).is_some_and(|y| y >= t as f64)
        })
        && state.end_year.is_none_or(|t| {
            record.number(NumericField::EndYear).is_some_and(|y| y <= t as f64)
        })
        && state.nbs_area.active().is_none_or(|r| in_range(r, record.number(NumericField::NbsArea)))
        && (state.previous_area.is_empty()
            || in_set(&state.previous_area, record.previous_area_type.as_deref()))
        && (state.nbs_type.is_empty() || any_tag(&state.nbs_type, record, TagField::NbsType))
        && state.total_cost.active().is_none_or(|r| in_range(r, record.number(NumericField::TotalCost)))
        && (state.funding.is_empty()
            || matches_funding(&state.funding, record.sources_of_funding.as_deref()))
        && (state.env_impacts.is_empty()
            || any_tag(&state.env_impacts, record, TagField::EnvironmentalImpacts))
        && (state.econ_impacts.is_empty()
            || any_tag(&state.econ_impacts, record, TagField::EconomicImpacts))
}

fn matches_search(record: &ProjectRecord, needle: &str) -> bool {
    record.search_text().contains(needle)
}

// plain membership: a literal "Unknown" passes when the user selected it
fn in_set(accepted: &BTreeSet<String>, value: Option<&str>) -> bool {
    value.is_some_and(|v| accepted.contains(v))
}

// funding excludes the "Unknown" placeholder explicitly
fn matches_funding(accepted: &BTreeSet<String>, value: Option<&str>) -> bool {
    value.is_some_and(|v| v != UNKNOWN && accepted.contains(v))
}

// OR within the facet; records without tags are excluded
fn any_tag(accepted: &BTreeSet<String>, record: &ProjectRecord, field: TagField) -> bool {
    record.tags(field).any(|tag| accepted.contains(tag))
}

fn in_range(range: NumericRange, value: Option<f64>) -> bool {
    value.is_some_and(|v| range.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_state::FilterChange;

    fn project(name: &str) -> ProjectRecord {
        ProjectRecord { intervention_name: Some(name.to_string()), ..Default::default() }
    }

    fn names(rows: &[&ProjectRecord]) -> Vec<String> {
        rows.iter().map(|r| r.display_name().to_string()).collect()
    }

    fn sample() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord {
                country: Some("France".into()),
                city: Some("Lyon".into()),
                begin_year: Some("2012".into()),
                end_year: Some("2015".into()),
                nbs_area: Some("500".into()),
                total_cost: Some("100".into()),
                nbs_type: Some("Forest;Park".into()),
                previous_area_type: Some("Brownfield".into()),
                sources_of_funding: Some("Public local authority's budget".into()),
                environmental_impacts: Some("Air quality; Biodiversity".into()),
                ..project("Urban forest")
            },
            ProjectRecord {
                country: Some("Germany".into()),
                city: Some("Berlin".into()),
                begin_year: Some("Unknown".into()),
                end_year: Some("2020".into()),
                nbs_area: Some("n/a".into()),
                total_cost: Some("Unknown".into()),
                nbs_type: Some("Unknown".into()),
                previous_area_type: Some("Unknown".into()),
                sources_of_funding: Some("Unknown".into()),
                ..project("Rain garden")
            },
            ProjectRecord {
                country: Some("France".into()),
                city: Some("Paris".into()),
                begin_year: Some("2018".into()),
                end_year: Some("2019".into()),
                nbs_area: Some("1000".into()),
                total_cost: Some("300".into()),
                nbs_type: Some("Wetland".into()),
                economic_impacts: Some("Tourism".into()),
                ..project("Wetland park")
            },
        ]
    }

    fn state_with(changes: Vec<FilterChange>) -> FilterState {
        let mut state = FilterState::with_extents(
            Some(NumericRange::new(500.0, 1000.0)),
            Some(NumericRange::new(100.0, 300.0)),
        );
        for change in changes {
            state.apply(change);
        }
        state
    }

    #[test]
    fn unconstrained_state_keeps_everything_in_order() {
        let data = sample();
        let state = state_with(vec![]);
        let rows = apply(&data, &state);
        assert_eq!(names(&rows), vec!["Urban forest", "Rain garden", "Wetland park"]);
    }

    #[test]
    fn untouched_ranges_keep_non_numeric_rows() {
        // "n/a" area and "Unknown" cost only drop out once a slider is narrowed
        let data = sample();
        assert_eq!(apply(&data, &state_with(vec![])).len(), 3);
        let narrowed = state_with(vec![FilterChange::SetNbsAreaRange(0.0, 2000.0)]);
        assert_eq!(names(&apply(&data, &narrowed)), vec!["Urban forest", "Wetland park"]);
    }

    #[test]
    fn search_matches_concatenated_fields() {
        let data = sample();
        let state = state_with(vec![FilterChange::SetSearch("LYON".into())]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest"]);
        // substring across the joining space
        let state = state_with(vec![FilterChange::SetSearch("france paris".into())]);
        assert_eq!(names(&apply(&data, &state)), vec!["Wetland park"]);
    }

    #[test]
    fn non_numeric_years_never_pass_thresholds() {
        let data = sample();
        let state = state_with(vec![FilterChange::ToggleStartYear(1900)]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest", "Wetland park"]);
        let state = state_with(vec![FilterChange::ToggleEndYear(2019)]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest", "Wetland park"]);
        let state = state_with(vec![FilterChange::ToggleEndYear(2020)]);
        assert_eq!(apply(&data, &state).len(), 3);
    }

    #[test]
    fn multi_tag_is_or_within_facet() {
        let data = sample();
        let state = state_with(vec![FilterChange::ToggleNbsType("Park".into())]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest"]);
        let state = state_with(vec![
            FilterChange::ToggleNbsType("Park".into()),
            FilterChange::ToggleNbsType("Wetland".into()),
        ]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest", "Wetland park"]);
    }

    #[test]
    fn unknown_tags_are_excluded_even_if_selected() {
        let data = sample();
        let state = state_with(vec![FilterChange::ToggleNbsType(UNKNOWN.into())]);
        assert!(apply(&data, &state).is_empty());
    }

    #[test]
    fn funding_excludes_unknown_but_previous_area_does_not() {
        let data = sample();
        let state = state_with(vec![FilterChange::ToggleFunding(UNKNOWN.into())]);
        assert!(apply(&data, &state).is_empty());
        // previous area is plain membership: a selected literal "Unknown" matches
        let state = state_with(vec![FilterChange::TogglePreviousArea(UNKNOWN.into())]);
        assert_eq!(names(&apply(&data, &state)), vec!["Rain garden"]);
    }

    #[test]
    fn unknown_funding_never_matches_alongside_real_values() {
        let data = sample();
        let state = state_with(vec![
            FilterChange::ToggleFunding(UNKNOWN.into()),
            FilterChange::ToggleFunding("Public local authority's budget".into()),
        ]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest"]);
        assert!(!matches(&data[1], &state));
    }

    #[test]
    fn cost_range_is_inclusive_and_drops_non_numeric() {
        let data = sample();
        let state = state_with(vec![FilterChange::SetTotalCostRange(300.0, 100.5)]);
        assert_eq!(names(&apply(&data, &state)), vec!["Wetland park"]);
        let state = state_with(vec![FilterChange::SetTotalCostRange(100.0, 299.0)]);
        assert_eq!(names(&apply(&data, &state)), vec!["Urban forest"]);
    }

    #[test]
    fn impacts_facets_and_across() {
        let data = sample();
        let state = state_with(vec![
            FilterChange::ToggleEnvImpact("Biodiversity".into()),
            FilterChange::ToggleEconImpact("Tourism".into()),
        ]);
        assert!(apply(&data, &state).is_empty());
        let state = state_with(vec![FilterChange::ToggleEconImpact("Tourism".into())]);
        assert_eq!(names(&apply(&data, &state)), vec!["Wetland park"]);
    }

    #[test]
    fn sequential_narrowing_agrees_with_per_record_predicate() {
        let data = sample();
        let states = vec![
            state_with(vec![]),
            state_with(vec![FilterChange::ToggleCountry("France".into())]),
            state_with(vec![FilterChange::ToggleCity("Berlin".into())]),
            state_with(vec![FilterChange::SetNbsAreaRange(400.0, 600.0)]),
            state_with(vec![FilterChange::SetSearch("park".into()), FilterChange::ToggleStartYear(2013)]),
            state_with(vec![FilterChange::ToggleFunding("Public local authority's budget".into())]),
        ];
        for state in states {
            let narrowed = apply_indices(&data, &state);
            let direct: Vec<usize> = (0..data.len()).filter(|&i| matches(&data[i], &state)).collect();
            assert_eq!(narrowed, direct, "{state:?}");
        }
    }
}
