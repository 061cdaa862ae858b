//! Dashboard pages, plain and restored from a shared link.

use common::dashboard::Dashboard;
use common::filter_state::FilterState;
use common::project::{CityCoordinate, ProjectRecord};
use dioxus::prelude::*;

use crate::{
    api::dashboard_api::{list_city_coordinates, list_projects},
    components::{
        dashboard_components::{
            active_filter_bar::ActiveFilterBar, city_map::CityMap, compare_bar::CompareBarView,
            comparison_view::ComparisonView, facet_panel::FacetPanel, overview_strip::OverviewStrip,
            results_list::ResultsList,
        },
        error_boundary::ComponentErrorDisplay,
        suspend_boundary::SuspendWrapper,
    },
    data_definitions::{
        dashboard_context::DashboardContext,
        url_param::UrlParam,
        view_sinks::{DashboardSnapshot, MapData, MapSink, OverviewData, ResultsData},
    },
};

/// Dashboard over the whole dataset.
#[component]
pub fn DashboardPage() -> Element {
    rsx! {
        Title { "NbS Explorer" }
        SuspendWrapper {
            DashboardLoader { saved: None }
        }
    }
}

/// Dashboard opened from a shared link, with the link's filters applied.
#[component]
pub fn SharedDashboardPage(filters: UrlParam<FilterState>) -> Element {
    rsx! {
        Title { "NbS Explorer: shared view" }
        SuspendWrapper {
            DashboardLoader { saved: Some(filters.0.clone()) }
        }
    }
}

#[component]
fn DashboardLoader(saved: ReadSignal<Option<FilterState>>) -> Element {
    let projects = use_resource(list_projects);
    let coordinates = use_resource(list_city_coordinates);
    let projects = match projects.suspend()?.cloned() {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(p) => p,
    };
    let coordinates = match coordinates.suspend()?.cloned() {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(c) => c,
    };

    rsx! {
        DashboardRoot { projects, coordinates, saved: saved() }
    }
}

#[component]
fn DashboardRoot(
    projects: Vec<ProjectRecord>,
    coordinates: ReadSignal<Vec<CityCoordinate>>,
    saved: Option<FilterState>,
) -> Element {
    let dashboard = use_signal(move || match saved.clone() {
        Some(state) => Dashboard::restore(projects.clone(), state),
        None => Dashboard::load(projects.clone()),
    });
    use_context_provider(|| DashboardContext::new(dashboard));

    // one recompute feeds every panel
    let snapshot = use_memo(move || {
        let dashboard = dashboard.read();
        let coordinates = coordinates.read();
        let mut overview = OverviewData::default();
        let mut results = ResultsData::default();
        let mut map = MapSink { coordinates: &coordinates, data: MapData::default() };
        dashboard.fan_out(&mut [&mut overview, &mut results, &mut map]);
        DashboardSnapshot { overview, results, map: map.data }
    });
    let mut comparing = use_signal(|| false);

    let DashboardSnapshot { overview, results, map } = snapshot();
    let compare_bar = results.compare_bar.unwrap_or(dashboard.read().compare_bar());

    rsx! {
        div {
            id: "x-dashboard",
            style: "display: flex; flex-direction: row; width: 100%; height: 100%;",
            FacetPanel {}
            div {
                style: "flex-grow: 1; display: flex; flex-direction: column; min-width: 0; overflow-y: auto;",
                ActiveFilterBar {}
                OverviewStrip { overview }
                CityMap { map }
                if comparing() && compare_bar.visible {
                    ComparisonView { on_close: move |_| comparing.set(false) }
                }
                ResultsList { results }
                CompareBarView { bar: compare_bar, on_compare: move |_| comparing.set(true) }
            }
        }
    }
}
