//! Side-by-side view of the compared projects with their radar ratios.

use common::project::{NumericField, ProjectRecord};
use common::radar::RadarSeries;
use common::recommender::format_number;
use dioxus::prelude::*;

use crate::data_definitions::dashboard_context::DashboardContext;

const SERIES_COLORS: [&str; 6] = ["#2E7D4F", "#1F77B4", "#FF7F0E", "#9467BD", "#D62728", "#8C564B"];

fn compared_fields(record: &ProjectRecord) -> Vec<(&'static str, String)> {
    let number = |field| record.number(field).map(format_number).unwrap_or_default();
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    vec![
        ("Country", text(&record.country)),
        ("City", text(&record.city)),
        ("Begin Year", number(NumericField::BeginYear)),
        ("End Year", number(NumericField::EndYear)),
        ("Status", text(&record.status)),
        ("NbS Area m2", number(NumericField::NbsArea)),
        ("Area before Implementation", text(&record.previous_area_type)),
        ("NbS Type", text(&record.nbs_type)),
        ("Total Cost", number(NumericField::TotalCost)),
        ("Sources of Funding", text(&record.sources_of_funding)),
    ]
}

#[component]
pub fn ComparisonView(on_close: Callback<()>) -> Element {
    let ctx = use_context::<DashboardContext>();
    let dashboard = ctx.dashboard.read();
    let compared: Vec<ProjectRecord> = dashboard.compared().into_iter().cloned().collect();
    let series = dashboard.radar_series();
    drop(dashboard);

    let rows: Vec<(&'static str, Vec<String>)> = match compared.first() {
        Some(first) => compared_fields(first)
            .into_iter()
            .enumerate()
            .map(|(i, (label, _))| (label, compared.iter().map(|r| compared_fields(r)[i].1.clone()).collect()))
            .collect(),
        None => Vec::new(),
    };

    rsx! {
        div {
            id: "x-comparison-view",
            style: "padding: 12px; border: 1px solid #DDDDDD; border-radius: 8px; margin: 8px;",
            div {
                style: "display: flex; flex-direction: row; align-items: center;",
                h3 { style: "flex-grow: 1;", "Comparison" }
                button { onclick: move |_| on_close.call(()), "Close" }
            }
            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        th {}
                        for (i, record) in compared.iter().enumerate() {
                            th { style: "color: {SERIES_COLORS[i % SERIES_COLORS.len()]}; text-align: left;", "{record.display_name()}" }
                        }
                    }
                }
                tbody {
                    for (label, values) in rows {
                        tr {
                            td { style: "font-weight: bold; padding: 4px;", "{label}" }
                            for value in values {
                                td { style: "padding: 4px;", "{value}" }
                            }
                        }
                    }
                }
            }
            RadarRatios { series }
        }
    }
}

/// Normalized axis ratios as horizontal bars, one group per axis.
#[component]
fn RadarRatios(series: Vec<RadarSeries>) -> Element {
    let Some(first) = series.first() else {
        return rsx! {};
    };
    let axes: Vec<_> = first.values.iter().map(|v| v.axis).collect();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px; margin-top: 12px;",
            for (axis_index, axis) in axes.into_iter().enumerate() {
                div {
                    span { style: "font-weight: bold;", "{axis.label()}" }
                    for (i, s) in series.iter().enumerate() {
                        RatioBar {
                            name: s.name.clone(),
                            color: SERIES_COLORS[i % SERIES_COLORS.len()],
                            ratio: s.values[axis_index].normalized,
                            raw: s.values[axis_index].raw,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RatioBar(name: String, color: &'static str, ratio: f64, raw: f64) -> Element {
    let width = (ratio.clamp(0.0, 1.0) * 100.0).round();
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px; font-size: 13px;",
            span { style: "width: 160px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{name}" }
            div {
                style: "flex-grow: 1; background-color: #EEEEEE; height: 10px; border-radius: 5px;",
                div { style: "width: {width}%; background-color: {color}; height: 10px; border-radius: 5px;" }
            }
            span { style: "width: 90px; text-align: right;", "{format_number(raw)}" }
        }
    }
}
