//! Preference inputs for the chosen recommender features.

use std::collections::BTreeMap;

use common::recommender::{FeatureKind, MAX_K, MIN_K, PreferenceValue, RecommenderFeature, RsMeta};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}};

#[component]
pub fn PreferenceForm(
    meta: ReadSignal<RsMeta>,
    features: Vec<RecommenderFeature>,
    preferences: Signal<BTreeMap<String, PreferenceValue>>,
) -> Element {
    rsx! {
        div {
            id: "x-rs-preferences",
            style: "display: flex; flex-direction: column; gap: 10px;",
            for feature in features {
                {match feature.kind() {
                    FeatureKind::Categorical => rsx! {
                        CategoricalInput {
                            key: "{feature}",
                            feature,
                            levels: meta.read().categorical.get(feature.key()).cloned().unwrap_or_default(),
                            preferences,
                        }
                    },
                    FeatureKind::Numeric => rsx! {
                        NumericInput { key: "{feature}", feature, meta, preferences }
                    },
                    FeatureKind::Multitag => rsx! {
                        TagInput {
                            key: "{feature}",
                            feature,
                            tags: meta.read().funding_tags.clone(),
                            preferences,
                        }
                    },
                }}
            }
        }
    }
}

#[component]
fn CategoricalInput(
    feature: RecommenderFeature,
    levels: Vec<String>,
    mut preferences: Signal<BTreeMap<String, PreferenceValue>>,
) -> Element {
    let current = preferences.read().get(feature.key()).and_then(PreferenceValue::as_level).unwrap_or_default();
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 2px;",
            "{feature.label()}"
            select {
                onchange: move |e: FormEvent| {
                    let value = e.value();
                    if value.is_empty() {
                        preferences.write().remove(feature.key());
                    } else {
                        preferences.write().insert(feature.key().to_string(), PreferenceValue::Text(value));
                    }
                },
                option { value: "", selected: current.is_empty(), "(optional)" }
                for level in levels {
                    option { selected: current == level, value: "{level}", "{level}" }
                }
            }
        }
    }
}

#[component]
fn NumericInput(
    feature: RecommenderFeature,
    meta: ReadSignal<RsMeta>,
    mut preferences: Signal<BTreeMap<String, PreferenceValue>>,
) -> Element {
    let range = meta.read().numeric_ranges.get(feature.key()).copied();
    let placeholder = range.map(|r| format!("min {} / max {}", r.min, r.max)).unwrap_or_default();
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 2px;",
            "{feature.label()} (optional)"
            input {
                r#type: "number",
                placeholder: "{placeholder}",
                min: range.map(|r| r.min.to_string()),
                max: range.map(|r| r.max.to_string()),
                oninput: move |e: FormEvent| {
                    match e.value().trim().parse::<f64>() {
                        Ok(value) if value.is_finite() => {
                            preferences.write().insert(feature.key().to_string(), PreferenceValue::Number(value));
                        }
                        _ => {
                            preferences.write().remove(feature.key());
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TagInput(
    feature: RecommenderFeature,
    tags: Vec<String>,
    mut preferences: Signal<BTreeMap<String, PreferenceValue>>,
) -> Element {
    let chosen = preferences.read().get(feature.key()).map(PreferenceValue::as_tags).unwrap_or_default();
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 2px;",
            span { "{feature.label()} (optional, multi-select)" }
            div {
                style: "max-height: 200px; overflow-y: auto;",
                for tag in tags {
                    TagRow {
                        key: "{tag}",
                        checked: chosen.contains(&tag),
                        tag: tag.clone(),
                        on_toggle: move |tag: String| {
                            let mut prefs = preferences.write();
                            let mut current = prefs.get(feature.key()).map(PreferenceValue::as_tags).unwrap_or_default();
                            if let Some(pos) = current.iter().position(|t| *t == tag) {
                                current.remove(pos);
                            } else {
                                current.push(tag);
                            }
                            if current.is_empty() {
                                prefs.remove(feature.key());
                            } else {
                                prefs.insert(feature.key().to_string(), PreferenceValue::Tags(current));
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn TagRow(tag: String, checked: bool, on_toggle: Callback<String>) -> Element {
    let value = tag.clone();
    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 6px; cursor: pointer; font-size: 14px;",
            onclick: move |_| on_toggle.call(value.clone()),
            if checked {
                Icon { icon: MdCheckBox, style: "width: 18px; height: 18px; color: #2E7D4F;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 18px; height: 18px; color: #888888;" }
            }
            span { "{tag}" }
        }
    }
}

#[component]
pub fn KSlider(mut k: Signal<i64>) -> Element {
    rsx! {
        label {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px;",
            "Number of recommendations"
            input {
                r#type: "range",
                min: "{MIN_K}",
                max: "{MAX_K}",
                value: "{k}",
                oninput: move |e: FormEvent| {
                    if let Ok(value) = e.value().parse::<i64>() {
                        k.set(value);
                    }
                },
            }
            span { "{k}" }
        }
    }
}
