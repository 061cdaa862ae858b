//! Removable tags summarizing every active constraint.

use serde::Serialize;

use crate::filter_state::{FilterChange, FilterState, NumericRange};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveFilterTag {
    pub label: &'static str,
    pub value: String,
    /// Dispatching this removes exactly the constraint the tag stands for.
    pub removal: FilterChange,
}

impl ActiveFilterTag {
    fn new(label: &'static str, value: impl Into<String>, removal: FilterChange) -> Self {
        Self { label, value: value.into(), removal }
    }
}

fn range_text(range: NumericRange) -> String {
    format!("{} - {}", range.min, range.max)
}

/// Tags in panel order: search, countries, cities, years, area, previous area, type,
/// cost, funding, then impacts.
pub fn active_filters(state: &FilterState) -> Vec<ActiveFilterTag> {
    let mut tags = Vec::new();

    if !state.search.is_empty() {
        tags.push(ActiveFilterTag::new(
            "Search",
            format!("\"{}\"", state.search),
            FilterChange::SetSearch(String::new()),
        ));
    }
    for country in &state.countries {
        tags.push(ActiveFilterTag::new("Country", country, FilterChange::ToggleCountry(country.clone())));
    }
    for city in &state.cities {
        tags.push(ActiveFilterTag::new("City", city, FilterChange::ToggleCity(city.clone())));
    }
    if let Some(year) = state.start_year {
        tags.push(ActiveFilterTag::new("Start Year", year.to_string(), FilterChange::ClearStartYear));
    }
    if let Some(year) = state.end_year {
        tags.push(ActiveFilterTag::new("End Year", year.to_string(), FilterChange::ClearEndYear));
    }
    if let Some(range) = state.nbs_area.active() {
        tags.push(ActiveFilterTag::new("NbS Area m2", range_text(range), FilterChange::ResetNbsArea));
    }
    for area in &state.previous_area {
        tags.push(ActiveFilterTag::new(
            "Area before Implementation",
            area,
            FilterChange::TogglePreviousArea(area.clone()),
        ));
    }
    for nbs_type in &state.nbs_type {
        tags.push(ActiveFilterTag::new("NbS Type", nbs_type, FilterChange::ToggleNbsType(nbs_type.clone())));
    }
    if let Some(range) = state.total_cost.active() {
        tags.push(ActiveFilterTag::new("Total Cost", range_text(range), FilterChange::ResetTotalCost));
    }
    for funding in &state.funding {
        tags.push(ActiveFilterTag::new("Sources of Funding", funding, FilterChange::ToggleFunding(funding.clone())));
    }
    for impact in &state.env_impacts {
        tags.push(ActiveFilterTag::new(
            "Environmental Impacts",
            impact,
            FilterChange::ToggleEnvImpact(impact.clone()),
        ));
    }
    for impact in &state.econ_impacts {
        tags.push(ActiveFilterTag::new("Economic Impacts", impact, FilterChange::ToggleEconImpact(impact.clone())));
    }
    tags
}
