//! Project locations on an equirectangular world outline.
//!
//! Each city is one glyph sized by its project count and split into slices by the
//! chosen metric column.

use std::f64::consts::PI;

use common::aggregate::category_breakdown;
use common::project::ProjectRecord;
use dioxus::prelude::*;

use crate::data_definitions::view_sinks::{MapData, MapGlyph};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 480.0;
const SLICE_COLORS: [&str; 8] = [
    "#2E7D4F", "#1F77B4", "#FF7F0E", "#9467BD", "#D62728", "#8C564B", "#E377C2", "#7F7F7F",
];

/// Columns a glyph can be split by.
pub const MAP_METRICS: [(&str, &str); 5] = [
    ("nbs_type", "NbS Type"),
    ("status", "Status"),
    ("previous_area_type", "Area before Implementation"),
    ("spatial_scale", "Spatial Scale"),
    ("sources_of_funding", "Sources of Funding"),
];

fn project(latitude: f64, longitude: f64) -> (f64, f64) {
    ((longitude + 180.0) / 360.0 * WIDTH, (90.0 - latitude) / 180.0 * HEIGHT)
}

fn glyph_radius(count: usize) -> f64 {
    4.0 + (count as f64).sqrt() * 3.0
}

/// SVG path for one pie slice between two angles, clockwise from twelve o'clock.
fn slice_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let point = |angle: f64| (cx + r * angle.sin(), cy - r * angle.cos());
    let (x0, y0) = point(start);
    let (x1, y1) = point(end);
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!("M {cx} {cy} L {x0} {y0} A {r} {r} 0 {large_arc} 1 {x1} {y1} Z")
}

#[derive(Debug, Clone, PartialEq)]
struct Slice {
    label: String,
    count: u64,
    color: &'static str,
    path: Option<String>,
}

fn slices(projects: &[ProjectRecord], metric: &str, cx: f64, cy: f64, r: f64) -> Vec<Slice> {
    let refs: Vec<&ProjectRecord> = projects.iter().collect();
    let breakdown = category_breakdown(&refs, metric);
    let total: u64 = breakdown.iter().map(|(_, c)| c).sum();
    let mut angle = 0.0;
    breakdown
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let sweep = count as f64 / total.max(1) as f64 * 2.0 * PI;
            // a full circle cannot be drawn as one arc
            let path = (count < total).then(|| slice_path(cx, cy, r, angle, angle + sweep));
            angle += sweep;
            Slice { label, count, color: SLICE_COLORS[i % SLICE_COLORS.len()], path }
        })
        .collect()
}

#[component]
pub fn CityMap(map: ReadSignal<MapData>) -> Element {
    let mut metric = use_signal(|| MAP_METRICS[0].0.to_string());
    let mut focused = use_signal(|| None::<(String, String)>);
    let MapData { glyphs, .. } = map.read().clone();
    let focused_glyph = focused
        .read()
        .as_ref()
        .and_then(|(city, country)| glyphs.iter().find(|g| &g.city == city && &g.country == country).cloned());

    rsx! {
        div {
            id: "x-city-map",
            style: "border: 1px solid #DDDDDD; border-radius: 8px; padding: 10px; margin: 8px;",
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 8px;",
                h4 { style: "margin: 0; flex-grow: 1;", "Projects by City" }
                select {
                    onchange: move |e: FormEvent| metric.set(e.value()),
                    for (key, label) in MAP_METRICS {
                        option { value: key, selected: metric() == key, "{label}" }
                    }
                }
            }
            svg {
                view_box: "0 0 {WIDTH} {HEIGHT}",
                style: "width: 100%; height: auto; background-color: #EAF2F8;",
                {glyphs.into_iter().map(|glyph| {
                    let key = format!("{}|||{}", glyph.city, glyph.country);
                    let id = (glyph.city.clone(), glyph.country.clone());
                    rsx! {
                        Glyph {
                            key: "{key}",
                            glyph,
                            metric: metric(),
                            on_select: move |_| focused.set(Some(id.clone())),
                        }
                    }
                })}
            }
            if let Some(glyph) = focused_glyph {
                GlyphLegend { glyph, metric: metric() }
            }
        }
    }
}

#[component]
fn Glyph(glyph: MapGlyph, metric: String, on_select: Callback<()>) -> Element {
    let (cx, cy) = project(glyph.latitude, glyph.longitude);
    let r = glyph_radius(glyph.projects.len());
    let parts = slices(&glyph.projects, &metric, cx, cy, r);
    let count = glyph.projects.len();

    rsx! {
        g {
            style: "cursor: pointer;",
            onclick: move |_| on_select.call(()),
            title { "{glyph.city}, {glyph.country}: {count}" }
            for part in parts {
                if let Some(outline) = part.path {
                    path { d: "{outline}", fill: part.color, stroke: "white", stroke_width: "0.5" }
                } else {
                    circle { cx: "{cx}", cy: "{cy}", r: "{r}", fill: part.color, stroke: "white", stroke_width: "0.5" }
                }
            }
        }
    }
}

#[component]
fn GlyphLegend(glyph: MapGlyph, metric: String) -> Element {
    let parts = slices(&glyph.projects, &metric, 0.0, 0.0, 1.0);
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 2px; margin-top: 8px; font-size: 13px;",
            span { style: "font-weight: bold;", "{glyph.city}, {glyph.country} ({glyph.projects.len()})" }
            for part in parts {
                div {
                    style: "display: flex; flex-direction: row; align-items: center; gap: 6px;",
                    span { style: "width: 10px; height: 10px; background-color: {part.color}; display: inline-block;" }
                    span { "{part.label}: {part.count}" }
                }
            }
        }
    }
}
