use common::filter_state::FilterChange;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::MdClose, md_social_icons::MdShare}};

use crate::{data_definitions::dashboard_context::DashboardContext, routes::Route};

/// Removable tags for every active constraint, plus clear-all and a shareable link.
#[component]
pub fn ActiveFilterBar() -> Element {
    let ctx = use_context::<DashboardContext>();
    let dispatch = ctx.dispatch;
    let tags = ctx.dashboard.read().active_filters();
    let state = ctx.dashboard.read().state().clone();

    if tags.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-active-filters",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                align-items: center;
                gap: 6px;
                padding: 8px 12px;
            ",
            for tag in tags {
                span {
                    class: "chip chip-selected",
                    style: "display: inline-flex; align-items: center; gap: 4px;",
                    "{tag.label}: {tag.value}"
                    span {
                        style: "cursor: pointer; display: inline-flex;",
                        onclick: move |_| dispatch(tag.removal.clone()),
                        Icon { icon: MdClose, style: "width: 14px; height: 14px;" }
                    }
                }
            }
            button {
                onclick: move |_| dispatch(FilterChange::ClearAll),
                "Clear all"
            }
            Link {
                to: Route::shared_dashboard(state),
                span {
                    style: "display: inline-flex; align-items: center; gap: 4px;",
                    Icon { icon: MdShare, style: "width: 16px; height: 16px;" }
                    "Link to these filters"
                }
            }
        }
    }
}
