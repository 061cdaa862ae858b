//! Country bars, cost histogram and timeline over the filtered subset.

use common::aggregate::{CostHistogram, CountryCount, YearCount};
use common::filter_state::FilterChange;
use common::recommender::format_number;
use dioxus::prelude::*;

use crate::data_definitions::{dashboard_context::DashboardContext, view_sinks::OverviewData};

fn share(count: u64, max: u64) -> f64 {
    if max == 0 { 0.0 } else { (count as f64 / max as f64 * 100.0).round() }
}

#[component]
pub fn OverviewStrip(overview: ReadSignal<OverviewData>) -> Element {
    let OverviewData { countries, histogram, timeline, .. } = overview.read().clone();

    rsx! {
        div {
            id: "x-overview-strip",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                gap: 16px;
                padding: 8px;
            ",
            ChartCard { title: "Projects by Country", CountryBars { countries } }
            ChartCard { title: "Total Cost", CostBars { histogram } }
            ChartCard { title: "Projects by Start Year", Timeline { timeline } }
        }
    }
}

#[component]
fn ChartCard(title: String, children: Element) -> Element {
    rsx! {
        div {
            style: "
                flex: 1 1 300px;
                border: 1px solid #DDDDDD;
                border-radius: 8px;
                padding: 10px;
                max-height: 360px;
                overflow-y: auto;
            ",
            h4 { style: "margin: 0 0 8px 0;", "{title}" }
            {children}
        }
    }
}

#[component]
fn HorizontalBar(label: String, count: u64, max: u64, clickable: bool, on_select: Callback<()>) -> Element {
    let width = share(count, max);
    let cursor = if clickable { "pointer" } else { "default" };
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 6px; font-size: 13px; cursor: {cursor};",
            onclick: move |_| {
                if clickable {
                    on_select.call(());
                }
            },
            span { style: "width: 110px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{label}" }
            div {
                style: "flex-grow: 1;",
                div { style: "width: {width}%; min-width: 2px; background-color: #2E7D4F; height: 12px; border-radius: 3px;" }
            }
            span { style: "width: 36px; text-align: right;", "{count}" }
        }
    }
}

#[component]
fn CountryBars(countries: Vec<CountryCount>) -> Element {
    let ctx = use_context::<DashboardContext>();
    let max = countries.iter().map(|c| c.count).max().unwrap_or(0);

    rsx! {
        {countries.into_iter().map(|entry| {
            let country = entry.country.clone();
            rsx! {
                HorizontalBar {
                    key: "{entry.country}",
                    label: entry.country.clone(),
                    count: entry.count,
                    max,
                    clickable: !entry.is_other,
                    on_select: move |_| ctx.dispatch.call(FilterChange::ToggleCountry(country.clone())),
                }
            }
        })}
    }
}

#[component]
fn CostBars(histogram: Option<CostHistogram>) -> Element {
    let Some(histogram) = histogram else {
        return rsx! { span { style: "color: #888888;", "No cost data" } };
    };
    let max = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);

    rsx! {
        for bin in histogram.bins {
            HorizontalBar {
                label: format!("{} - {}", format_number(bin.x0), format_number(bin.x1)),
                count: bin.count,
                max,
                clickable: false,
                on_select: |_| {},
            }
        }
    }
}

#[component]
fn Timeline(timeline: Vec<YearCount>) -> Element {
    let max = timeline.iter().map(|y| y.count).max().unwrap_or(0);

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: flex-end; gap: 2px; height: 200px;",
            for entry in timeline {
                div {
                    key: "{entry.year}",
                    title: "{entry.year}: {entry.count}",
                    style: "flex: 1 1 0; display: flex; flex-direction: column; justify-content: flex-end; height: 100%;",
                    div { style: "height: {share(entry.count, max)}%; background-color: #1F77B4; min-height: 1px;" }
                    span { style: "font-size: 9px; writing-mode: vertical-rl;", "{entry.year}" }
                }
            }
        }
    }
}
