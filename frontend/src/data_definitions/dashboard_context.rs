//! Shared dashboard store handed to components through context.

use common::dashboard::Dashboard;
use common::filter_state::FilterChange;
use dioxus::prelude::*;

/// The dashboard store and the events components may send it.
#[derive(Clone, Copy, PartialEq)]
pub struct DashboardContext {
    pub dashboard: Signal<Dashboard>,
    pub dispatch: Callback<FilterChange>,
    pub toggle_compare: Callback<String>,
    pub clear_compare: Callback<()>,
}

impl DashboardContext {
    pub fn new(mut dashboard: Signal<Dashboard>) -> Self {
        Self {
            dashboard,
            dispatch: Callback::new(move |change: FilterChange| {
                dashboard.write().on_filter_changed(change);
            }),
            toggle_compare: Callback::new(move |id: String| {
                dashboard.write().toggle_compare(&id);
            }),
            clear_compare: Callback::new(move |_: ()| {
                dashboard.write().clear_compare();
            }),
        }
    }
}
