//! The exploration dashboard state: dataset, filters, derived subset and comparison set.
//!
//! Every filter change recomputes the filtered subset from the full dataset and bumps
//! `revision`. Views read one [`DashboardView`] per revision so they never mix the
//! results of two recomputes.

use crate::active_filters::{ActiveFilterTag, active_filters};
use crate::facet_options::FacetOptions;
use crate::filter_engine;
use crate::filter_state::{FilterChange, FilterState};
use crate::project::ProjectRecord;
use crate::radar::{RadarMaxima, RadarSeries};
use crate::selection::{CompareBar, SelectionSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    dataset: Vec<ProjectRecord>,
    state: FilterState,
    filtered: Vec<usize>,
    options: FacetOptions,
    selection: SelectionSet,
    radar: RadarMaxima,
    revision: u64,
}

/// Snapshot handed to every view after a recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub revision: u64,
    pub records: Vec<&'a ProjectRecord>,
    pub compare_bar: CompareBar,
}

/// A consumer of the filtered subset: results list, charts, map.
pub trait ViewSink {
    fn render(&mut self, view: &DashboardView<'_>);
}

impl Dashboard {
    pub fn load(dataset: Vec<ProjectRecord>) -> Self {
        let options = FacetOptions::build(&dataset);
        let state = FilterState::with_extents(options.nbs_area, options.total_cost);
        let radar = RadarMaxima::compute(&dataset);
        let filtered = (0..dataset.len()).collect();
        tracing::info!(records = dataset.len(), "dashboard loaded");
        Self {
            dataset,
            state,
            filtered,
            options,
            selection: SelectionSet::new(),
            radar,
            revision: 0,
        }
    }

    /// Loads the dataset and applies a previously saved filter state. Range extents
    /// always come from the dataset, only narrowed slider positions are restored.
    pub fn restore(dataset: Vec<ProjectRecord>, saved: FilterState) -> Self {
        let mut dashboard = Self::load(dataset);
        let nbs_area = saved.nbs_area.restored(dashboard.state.nbs_area.extent);
        let total_cost = saved.total_cost.restored(dashboard.state.total_cost.extent);
        dashboard.state = FilterState { nbs_area, total_cost, ..saved };
        dashboard.options.refresh_cities(&dashboard.dataset, &dashboard.state);
        dashboard.filtered = filter_engine::apply_indices(&dashboard.dataset, &dashboard.state);
        dashboard
    }

    pub fn on_filter_changed(&mut self, change: FilterChange) {
        let cascades = change.affects_countries();
        self.state.apply(change);
        if cascades {
            self.options.refresh_cities(&self.dataset, &self.state);
        }
        self.filtered = filter_engine::apply_indices(&self.dataset, &self.state);
        self.revision += 1;
        tracing::debug!(revision = self.revision, filtered = self.filtered.len(), "filters recomputed");
    }

    pub fn dataset(&self) -> &[ProjectRecord] {
        &self.dataset
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> &FacetOptions {
        &self.options
    }

    pub fn radar_maxima(&self) -> &RadarMaxima {
        &self.radar
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn filtered(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.filtered.iter().map(|&i| &self.dataset[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilterTag> {
        active_filters(&self.state)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle_compare(&mut self, id: &str) -> CompareBar {
        self.selection.toggle(id)
    }

    pub fn clear_compare(&mut self) -> CompareBar {
        self.selection.clear()
    }

    pub fn compare_bar(&self) -> CompareBar {
        self.selection.compare_bar()
    }

    /// Selected records from the whole dataset, independent of the current filters.
    pub fn compared(&self) -> Vec<&ProjectRecord> {
        self.selection.materialize(&self.dataset)
    }

    pub fn radar_series(&self) -> Vec<RadarSeries> {
        self.compared().into_iter().map(|r| self.radar.series(r)).collect()
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            revision: self.revision,
            records: self.filtered().collect(),
            compare_bar: self.compare_bar(),
        }
    }

    pub fn fan_out(&self, sinks: &mut [&mut dyn ViewSink]) {
        let view = self.view();
        for sink in sinks.iter_mut() {
            sink.render(&view);
        }
    }
}
