//! Owned snapshots of one dashboard recompute, one per panel.

use common::aggregate::{
    COST_BINS, CostHistogram, CountryCount, TOP_COUNTRIES, YearCount, cost_histogram, country_counts,
    group_by_city, projects_by_year, results_header,
};
use common::dashboard::{DashboardView, ViewSink};
use common::project::{CityCoordinate, ProjectRecord};
use common::selection::CompareBar;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverviewData {
    pub revision: u64,
    pub countries: Vec<CountryCount>,
    pub histogram: Option<CostHistogram>,
    pub timeline: Vec<YearCount>,
}

impl ViewSink for OverviewData {
    fn render(&mut self, view: &DashboardView<'_>) {
        let records = view.records.iter().copied();
        *self = OverviewData {
            revision: view.revision,
            countries: country_counts(records.clone(), TOP_COUNTRIES),
            histogram: cost_histogram(records.clone(), COST_BINS),
            timeline: projects_by_year(records),
        };
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsData {
    pub revision: u64,
    pub header: String,
    pub records: Vec<ProjectRecord>,
    pub compare_bar: Option<CompareBar>,
}

impl ViewSink for ResultsData {
    fn render(&mut self, view: &DashboardView<'_>) {
        *self = ResultsData {
            revision: view.revision,
            header: results_header(view.records.len()),
            records: view.records.iter().map(|r| (*r).clone()).collect(),
            compare_bar: Some(view.compare_bar),
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapGlyph {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapData {
    pub revision: u64,
    pub glyphs: Vec<MapGlyph>,
}

/// Collects map glyphs against a fixed coordinate table.
pub struct MapSink<'c> {
    pub coordinates: &'c [CityCoordinate],
    pub data: MapData,
}

impl ViewSink for MapSink<'_> {
    fn render(&mut self, view: &DashboardView<'_>) {
        let glyphs = group_by_city(view.records.iter().copied(), self.coordinates)
            .into_iter()
            .map(|group| MapGlyph {
                city: group.city,
                country: group.country,
                latitude: group.latitude,
                longitude: group.longitude,
                projects: group.projects.into_iter().cloned().collect(),
            })
            .collect();
        self.data = MapData { revision: view.revision, glyphs };
    }
}

/// Every panel's data from the same recompute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSnapshot {
    pub overview: OverviewData,
    pub results: ResultsData,
    pub map: MapData,
}

#[cfg(test)]
mod tests {
    use common::dashboard::Dashboard;
    use common::filter_state::FilterChange;

    use super::*;

    fn project(name: &str, country: &str, city: &str, cost: &str) -> ProjectRecord {
        ProjectRecord {
            intervention_name: Some(name.into()),
            country: Some(country.into()),
            city: Some(city.into()),
            total_cost: Some(cost.into()),
            begin_year: Some("2018".into()),
            ..Default::default()
        }
    }

    #[test]
    fn every_panel_sees_the_same_subset() {
        let mut dashboard = Dashboard::load(vec![
            project("A", "France", "Lyon", "150"),
            project("B", "France", "Paris", "300"),
            project("C", "Germany", "Berlin", "870"),
        ]);
        dashboard.on_filter_changed(FilterChange::ToggleCountry("France".into()));
        let coordinates = vec![CityCoordinate {
            city: "Lyon".into(),
            country: "France".into(),
            latitude: 45.76,
            longitude: 4.83,
        }];

        let mut overview = OverviewData::default();
        let mut results = ResultsData::default();
        let mut map = MapSink { coordinates: &coordinates, data: MapData::default() };
        dashboard.fan_out(&mut [&mut overview, &mut results, &mut map]);

        assert_eq!(overview.revision, 1);
        assert_eq!(results.revision, 1);
        assert_eq!(map.data.revision, 1);
        assert_eq!(results.header, "2 Project(s)");
        assert_eq!(overview.countries.len(), 1);
        assert_eq!(overview.countries[0].count, 2);
        assert_eq!(overview.timeline.len(), 1);
        assert_eq!(map.data.glyphs.len(), 1);
        assert_eq!(map.data.glyphs[0].projects[0].display_name(), "A");
    }
}
