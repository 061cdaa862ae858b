//! Sticky bar listing the projects picked for comparison.

use common::selection::CompareBar;
use dioxus::prelude::*;

use crate::data_definitions::dashboard_context::DashboardContext;

#[component]
pub fn CompareBarView(bar: CompareBar, on_compare: Callback<()>) -> Element {
    let ctx = use_context::<DashboardContext>();
    if !bar.visible {
        return rsx! {};
    }

    rsx! {
        div {
            id: "x-compare-bar",
            style: "
                position: sticky;
                bottom: 0;
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                padding: 10px 16px;
                background-color: #1F3B2D;
                color: white;
            ",
            span { style: "flex-grow: 1;", "{bar.label()}" }
            button { onclick: move |_| on_compare.call(()), "Compare" }
            button { onclick: move |_| ctx.clear_compare.call(()), "Clear" }
        }
    }
}
