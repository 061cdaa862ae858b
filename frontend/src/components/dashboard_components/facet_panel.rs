//! Search box and facet widgets.

use std::collections::BTreeSet;

use common::facet_options::FacetOption;
use common::filter_state::{FilterChange, RangeFilter};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::{MdArrowDropDown, MdArrowDropUp}, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::data_definitions::dashboard_context::DashboardContext;

#[component]
pub fn FacetPanel() -> Element {
    let ctx = use_context::<DashboardContext>();
    let dispatch = ctx.dispatch;
    let options = ctx.dashboard.read().options().clone();
    let state = ctx.dashboard.read().state().clone();

    rsx! {
        div {
            id: "x-facet-panel",
            style: "
                display: flex;
                flex-direction: column;
                gap: 12px;
                width: 280px;
                min-width: 280px;
                padding: 12px;
                border-right: 1px solid #DDDDDD;
                overflow-y: auto;
            ",

            SearchBox { current: state.search.clone() }

            CheckboxFacet {
                title: "Country",
                options: options.countries,
                selected: state.countries,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleCountry(v)),
            }
            CheckboxFacet {
                title: "City",
                options: options.cities,
                selected: state.cities,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleCity(v)),
            }
            YearChips {
                title: "Start Year",
                years: options.start_years,
                selected: state.start_year,
                on_toggle: move |y: i32| dispatch(FilterChange::ToggleStartYear(y)),
                on_clear: move |_| dispatch(FilterChange::ClearStartYear),
            }
            YearChips {
                title: "End Year",
                years: options.end_years,
                selected: state.end_year,
                on_toggle: move |y: i32| dispatch(FilterChange::ToggleEndYear(y)),
                on_clear: move |_| dispatch(FilterChange::ClearEndYear),
            }
            RangeInputs {
                title: "NbS Area m2",
                filter: state.nbs_area,
                on_set: move |(a, b): (f64, f64)| dispatch(FilterChange::SetNbsAreaRange(a, b)),
                on_reset: move |_| dispatch(FilterChange::ResetNbsArea),
            }
            CheckboxFacet {
                title: "Area before Implementation",
                options: options.previous_areas,
                selected: state.previous_area,
                on_toggle: move |v: String| dispatch(FilterChange::TogglePreviousArea(v)),
            }
            CheckboxFacet {
                title: "NbS Type",
                options: options.nbs_types,
                selected: state.nbs_type,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleNbsType(v)),
            }
            RangeInputs {
                title: "Total Cost",
                filter: state.total_cost,
                on_set: move |(a, b): (f64, f64)| dispatch(FilterChange::SetTotalCostRange(a, b)),
                on_reset: move |_| dispatch(FilterChange::ResetTotalCost),
            }
            CheckboxFacet {
                title: "Sources of Funding",
                options: options.funding,
                selected: state.funding,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleFunding(v)),
            }
            CheckboxFacet {
                title: "Environmental Impacts",
                options: options.env_impacts,
                selected: state.env_impacts,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleEnvImpact(v)),
            }
            CheckboxFacet {
                title: "Economic Impacts",
                options: options.econ_impacts,
                selected: state.econ_impacts,
                on_toggle: move |v: String| dispatch(FilterChange::ToggleEconImpact(v)),
            }
        }
    }
}

#[component]
fn SearchBox(current: ReadSignal<String>) -> Element {
    let ctx = use_context::<DashboardContext>();
    // keeps what the user typed; the filter state only holds the normalized text
    let mut text = use_signal(|| current.peek().clone());
    use_effect(move || {
        let current = current();
        if text.peek().trim().to_lowercase() != current {
            text.set(current);
        }
    });

    rsx! {
        input {
            r#type: "search",
            placeholder: "Search projects",
            value: "{text}",
            style: "
                width: 100%;
                box-sizing: border-box;
                padding: 8px 12px;
                border: 1px solid #AAAAAA;
                border-radius: 6px;
                font-size: 16px;
            ",
            oninput: move |e: FormEvent| {
                text.set(e.value());
                ctx.dispatch.call(FilterChange::SetSearch(e.value()));
            },
        }
    }
}

#[component]
fn FacetSection(title: String, active: bool, children: Element) -> Element {
    let mut expanded = use_signal(|| false);
    let title_weight = if active { "bold" } else { "normal" };

    rsx! {
        div {
            style: "border-bottom: 1px solid #EEEEEE; padding-bottom: 6px;",
            div {
                style: "display: flex; flex-direction: row; align-items: center; cursor: pointer; font-weight: {title_weight};",
                onclick: move |_| expanded.toggle(),
                span { style: "flex-grow: 1;", "{title}" }
                if expanded() {
                    Icon { icon: MdArrowDropUp, style: "width: 20px; height: 20px;" }
                } else {
                    Icon { icon: MdArrowDropDown, style: "width: 20px; height: 20px;" }
                }
            }
            if expanded() {
                div {
                    style: "max-height: 240px; overflow-y: auto; padding: 4px 0;",
                    {children}
                }
            }
        }
    }
}

#[component]
fn CheckboxFacet(
    title: String,
    options: Vec<FacetOption>,
    selected: BTreeSet<String>,
    on_toggle: Callback<String>,
) -> Element {
    rsx! {
        FacetSection {
            title,
            active: !selected.is_empty(),
            if options.is_empty() {
                span { style: "color: #888888; font-size: 13px;", "No values" }
            }
            for option in options {
                CheckboxRow {
                    key: "{option.value}",
                    checked: selected.contains(&option.value),
                    on_toggle,
                    option: option.clone(),
                }
            }
        }
    }
}

#[component]
fn CheckboxRow(option: FacetOption, checked: bool, on_toggle: Callback<String>) -> Element {
    let value = option.value.clone();
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 6px; cursor: pointer; font-size: 14px;",
            onclick: move |_| on_toggle.call(value.clone()),
            if checked {
                Icon { icon: MdCheckBox, style: "width: 18px; height: 18px; color: #2E7D4F;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 18px; height: 18px; color: #888888;" }
            }
            span { style: "flex-grow: 1;", "{option.value}" }
            span { style: "color: #888888;", "{option.count}" }
        }
    }
}

fn chip_class(selected: bool) -> &'static str {
    if selected { "chip chip-selected" } else { "chip" }
}

#[component]
fn YearChips(
    title: String,
    years: Vec<i32>,
    selected: Option<i32>,
    on_toggle: Callback<i32>,
    on_clear: Callback<()>,
) -> Element {
    rsx! {
        FacetSection {
            title,
            active: selected.is_some(),
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 4px;",
                for year in years {
                    span {
                        key: "{year}",
                        class: chip_class(selected == Some(year)),
                        onclick: move |_| on_toggle.call(year),
                        "{year}"
                    }
                }
            }
            if selected.is_some() {
                button {
                    style: "margin-top: 6px;",
                    onclick: move |_| on_clear.call(()),
                    "Clear"
                }
            }
        }
    }
}

#[component]
fn RangeInputs(
    title: String,
    filter: RangeFilter,
    on_set: Callback<(f64, f64)>,
    on_reset: Callback<()>,
) -> Element {
    let Some(extent) = filter.extent else {
        return rsx! {
            FacetSection {
                title,
                active: false,
                span { style: "color: #888888; font-size: 13px;", "No numeric values" }
            }
        };
    };
    let current = filter.selected.unwrap_or(extent);

    rsx! {
        FacetSection {
            title,
            active: filter.is_active(),
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 6px;",
                input {
                    r#type: "number",
                    style: "width: 100px;",
                    min: "{extent.min}",
                    max: "{extent.max}",
                    value: "{current.min}",
                    onchange: move |e: FormEvent| {
                        if let Ok(min) = e.value().parse::<f64>() {
                            on_set.call((min, current.max));
                        }
                    },
                }
                span { "-" }
                input {
                    r#type: "number",
                    style: "width: 100px;",
                    min: "{extent.min}",
                    max: "{extent.max}",
                    value: "{current.max}",
                    onchange: move |e: FormEvent| {
                        if let Ok(max) = e.value().parse::<f64>() {
                            on_set.call((current.min, max));
                        }
                    },
                }
            }
            if filter.is_active() {
                button {
                    style: "margin-top: 6px;",
                    onclick: move |_| on_reset.call(()),
                    "Reset"
                }
            }
        }
    }
}
