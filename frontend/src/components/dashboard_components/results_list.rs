//! Filtered project list with comparison checkboxes.

use common::aggregate::EMPTY_RESULTS_MESSAGE;
use common::project::{NumericField, ProjectRecord};
use common::recommender::format_number;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_maps_icons::MdPlace, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::data_definitions::{dashboard_context::DashboardContext, view_sinks::ResultsData};

#[component]
pub fn ResultsList(results: ReadSignal<ResultsData>) -> Element {
    let ResultsData { header, records, .. } = results.read().clone();

    rsx! {
        div {
            id: "x-results-list",
            style: "display: flex; flex-direction: column; gap: 4px; padding: 8px;",
            h3 { style: "margin: 4px 8px;", "{header}" }
            if records.is_empty() {
                p { style: "color: #888888; margin: 8px;", "{EMPTY_RESULTS_MESSAGE}" }
            }
            for (index, record) in records.into_iter().enumerate() {
                ResultCard { key: "{index}", record }
            }
        }
    }
}

#[component]
fn ResultCard(record: ProjectRecord) -> Element {
    let ctx = use_context::<DashboardContext>();
    let id = record.id().map(str::to_string);
    let checked = id.as_deref().is_some_and(|id| ctx.dashboard.read().selection().contains(id));
    let location = [record.city.as_deref(), record.country.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    let years = match (record.year(NumericField::BeginYear), record.year(NumericField::EndYear)) {
        (Some(b), Some(e)) => format!("{b} - {e}"),
        (Some(b), None) => format!("{b}"),
        _ => String::new(),
    };
    let cost = record.number(NumericField::TotalCost).map(|c| format!("{} €", format_number(c)));
    let border_color = if checked { "#2E7D4F99" } else { "#AAAAAA33" };

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: flex-start;
                gap: 10px;
                border: 2px solid {border_color};
                border-radius: 8px;
                padding: 10px 14px;
            ",
            if let Some(id) = id {
                span {
                    title: "Compare",
                    style: "cursor: pointer;",
                    onclick: move |_| ctx.toggle_compare.call(id.clone()),
                    if checked {
                        Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: #2E7D4F;" }
                    } else {
                        Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: #888888;" }
                    }
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 4px; flex-grow: 1;",
                span { style: "font-weight: bold; font-size: 16px;", "{record.display_name()}" }
                div {
                    style: "display: flex; flex-direction: row; align-items: center; gap: 8px; color: #555555; font-size: 14px;",
                    Icon { icon: MdPlace, style: "width: 16px; height: 16px;" }
                    span { "{location}" }
                    if !years.is_empty() {
                        span { "{years}" }
                    }
                    if let Some(cost) = cost {
                        span { "{cost}" }
                    }
                }
                if let Some(nbs_type) = record.nbs_type.as_deref() {
                    span { style: "color: #2E7D4F; font-size: 13px;", "{nbs_type}" }
                }
                if let Some(link) = record.link.as_deref() {
                    a { href: "{link}", target: "_blank", style: "font-size: 13px;", "Project page" }
                }
            }
        }
    }
}
