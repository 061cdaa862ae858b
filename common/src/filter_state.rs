//! Active facet constraints and the events that mutate them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Inclusive numeric interval. Construction through [`NumericRange::new`] never yields
/// an inverted range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Swaps the bounds when a slider drag left them crossed.
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A slider facet. `extent` is the dataset-wide `[min, max]` observed at load and
/// stands for "no constraint"; `selected` is the current slider position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeFilter {
    pub extent: Option<NumericRange>,
    pub selected: Option<NumericRange>,
}

impl RangeFilter {
    pub fn from_extent(extent: Option<NumericRange>) -> Self {
        Self { extent, selected: extent }
    }

    /// The constraint to apply, or `None` while the slider sits on the full extent.
    pub fn active(&self) -> Option<NumericRange> {
        match self.selected {
            Some(selected) if Some(selected) != self.extent => Some(selected),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    pub fn set(&mut self, a: f64, b: f64) {
        self.selected = Some(NumericRange::new(a, b));
    }

    pub fn reset(&mut self) {
        self.selected = self.extent;
    }

    /// Carries a saved slider onto a freshly computed `extent`. A saved slider that sat on
    /// its own extent follows the new one; crossed bounds are swapped and non-finite
    /// bounds drop the constraint.
    pub fn restored(self, extent: Option<NumericRange>) -> Self {
        let selected = self
            .active()
            .filter(|r| r.min.is_finite() && r.max.is_finite())
            .map(|r| NumericRange::new(r.min, r.max))
            .or(extent);
        Self { extent, selected }
    }
}

/// Current facet predicates. Empty sets, `None` thresholds, untouched ranges and an empty
/// search string all mean "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search: String,
    pub countries: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub nbs_area: RangeFilter,
    pub previous_area: BTreeSet<String>,
    pub nbs_type: BTreeSet<String>,
    pub total_cost: RangeFilter,
    pub funding: BTreeSet<String>,
    pub env_impacts: BTreeSet<String>,
    pub econ_impacts: BTreeSet<String>,
}

/// Every user interaction that changes the filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterChange {
    SetSearch(String),
    ToggleCountry(String),
    ToggleCity(String),
    /// Selecting the currently selected year clears it.
    ToggleStartYear(i32),
    ClearStartYear,
    ToggleEndYear(i32),
    ClearEndYear,
    SetNbsAreaRange(f64, f64),
    ResetNbsArea,
    TogglePreviousArea(String),
    ToggleNbsType(String),
    SetTotalCostRange(f64, f64),
    ResetTotalCost,
    ToggleFunding(String),
    ToggleEnvImpact(String),
    ToggleEconImpact(String),
    ClearAll,
}

impl FilterChange {
    /// Whether the change touches the country selection, which cascades into cities.
    pub fn affects_countries(&self) -> bool {
        matches!(self, FilterChange::ToggleCountry(_) | FilterChange::ClearAll)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn toggle_year(slot: &mut Option<i32>, year: i32) {
    if *slot == Some(year) {
        *slot = None;
    } else {
        *slot = Some(year);
    }
}

impl FilterState {
    /// Unconstrained state whose range facets sit on the given dataset extents.
    pub fn with_extents(nbs_area: Option<NumericRange>, total_cost: Option<NumericRange>) -> Self {
        Self {
            nbs_area: RangeFilter::from_extent(nbs_area),
            total_cost: RangeFilter::from_extent(total_cost),
            ..Default::default()
        }
    }

    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::SetSearch(text) => self.search = text.trim().to_lowercase(),
            FilterChange::ToggleCountry(country) => {
                toggle(&mut self.countries, country);
                self.cities.clear();
            }
            FilterChange::ToggleCity(city) => toggle(&mut self.cities, city),
            FilterChange::ToggleStartYear(year) => toggle_year(&mut self.start_year, year),
            FilterChange::ClearStartYear => self.start_year = None,
            FilterChange::ToggleEndYear(year) => toggle_year(&mut self.end_year, year),
            FilterChange::ClearEndYear => self.end_year = None,
            FilterChange::SetNbsAreaRange(a, b) => self.nbs_area.set(a, b),
            FilterChange::ResetNbsArea => self.nbs_area.reset(),
            FilterChange::TogglePreviousArea(area) => toggle(&mut self.previous_area, area),
            FilterChange::ToggleNbsType(tag) => toggle(&mut self.nbs_type, tag),
            FilterChange::SetTotalCostRange(a, b) => self.total_cost.set(a, b),
            FilterChange::ResetTotalCost => self.total_cost.reset(),
            FilterChange::ToggleFunding(funding) => toggle(&mut self.funding, funding),
            FilterChange::ToggleEnvImpact(tag) => toggle(&mut self.env_impacts, tag),
            FilterChange::ToggleEconImpact(tag) => toggle(&mut self.econ_impacts, tag),
            FilterChange::ClearAll => {
                *self = Self::with_extents(self.nbs_area.extent, self.total_cost.extent);
            }
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.countries.is_empty()
            && self.cities.is_empty()
            && self.start_year.is_none()
            && self.end_year.is_none()
            && !self.nbs_area.is_active()
            && self.previous_area.is_empty()
            && self.nbs_type.is_empty()
            && !self.total_cost.is_active()
            && self.funding.is_empty()
            && self.env_impacts.is_empty()
            && self.econ_impacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossed_slider_is_swapped() {
        let range = NumericRange::new(300.0, 150.0);
        assert_eq!(range, NumericRange { min: 150.0, max: 300.0 });
        assert!(range.contains(150.0));
        assert!(range.contains(300.0));
        assert!(!range.contains(300.5));
    }

    #[test]
    fn range_on_extent_is_inactive() {
        let mut filter = RangeFilter::from_extent(Some(NumericRange::new(0.0, 1000.0)));
        assert!(!filter.is_active());
        filter.set(1000.0, 10.0);
        assert_eq!(filter.active(), Some(NumericRange { min: 10.0, max: 1000.0 }));
        filter.set(0.0, 1000.0);
        assert!(!filter.is_active());
        filter.set(5.0, 6.0);
        filter.reset();
        assert!(!filter.is_active());
    }

    #[test]
    fn range_without_data_never_activates_by_default() {
        let filter = RangeFilter::from_extent(None);
        assert_eq!(filter.active(), None);
    }

    #[test]
    fn restored_range_is_normalized_against_new_extent() {
        let old = Some(NumericRange::new(0.0, 10.0));
        let new = Some(NumericRange::new(0.0, 20.0));
        let untouched = RangeFilter::from_extent(old).restored(new);
        assert_eq!(untouched, RangeFilter::from_extent(new));
        let crossed = RangeFilter { extent: old, selected: Some(NumericRange { min: 8.0, max: 2.0 }) };
        assert_eq!(crossed.restored(new).active(), Some(NumericRange { min: 2.0, max: 8.0 }));
        let broken = RangeFilter { extent: old, selected: Some(NumericRange { min: f64::NEG_INFINITY, max: 2.0 }) };
        assert!(!broken.restored(new).is_active());
    }

    #[test]
    fn toggling_country_clears_cities() {
        let mut state = FilterState::default();
        state.apply(FilterChange::ToggleCity("Paris".into()));
        state.apply(FilterChange::ToggleCountry("France".into()));
        assert!(state.cities.is_empty());
        assert!(state.countries.contains("France"));
        state.apply(FilterChange::ToggleCountry("France".into()));
        assert!(state.countries.is_empty());
    }

    #[test]
    fn selecting_same_year_twice_clears_it() {
        let mut state = FilterState::default();
        state.apply(FilterChange::ToggleStartYear(2015));
        assert_eq!(state.start_year, Some(2015));
        state.apply(FilterChange::ToggleStartYear(2018));
        assert_eq!(state.start_year, Some(2018));
        state.apply(FilterChange::ToggleStartYear(2018));
        assert_eq!(state.start_year, None);
    }

    #[test]
    fn search_is_normalized() {
        let mut state = FilterState::default();
        state.apply(FilterChange::SetSearch("  Green ROOF ".into()));
        assert_eq!(state.search, "green roof");
    }

    #[test]
    fn clear_all_keeps_extents() {
        let extent = Some(NumericRange::new(1.0, 9.0));
        let mut state = FilterState::with_extents(extent, None);
        state.apply(FilterChange::SetNbsAreaRange(2.0, 3.0));
        state.apply(FilterChange::ToggleFunding("EU".into()));
        assert!(!state.is_unconstrained());
        state.apply(FilterChange::ClearAll);
        assert!(state.is_unconstrained());
        assert_eq!(state.nbs_area.extent, extent);
    }
}
