//! Find projects similar to a set of stated preferences.

use std::collections::BTreeMap;

use common::recommender::{
    DEFAULT_K, PreferenceValue, RecommendRequest, RecommendationsView, RecommenderFeature, RequestGate, RsMeta,
};
use dioxus::{logger::tracing, prelude::*};

use crate::{
    api::dashboard_api::{recommend, recommender_meta},
    components::{
        error_boundary::ComponentErrorDisplay,
        recommender_components::{
            feature_chips::FeatureChips,
            preference_form::{KSlider, PreferenceForm},
            recommendation_cards::RecommendationCards,
        },
        suspend_boundary::SuspendWrapper,
    },
};

/// Request for the chosen features, carrying only their preferences.
fn build_request(
    features: &[RecommenderFeature],
    preferences: &BTreeMap<String, PreferenceValue>,
    k: i64,
) -> RecommendRequest {
    RecommendRequest {
        selected_features: features.iter().map(|f| f.key().to_string()).collect(),
        preferences: features
            .iter()
            .filter_map(|f| preferences.get(f.key()).map(|v| (f.key().to_string(), v.clone())))
            .collect(),
        k: Some(k),
    }
}

#[component]
pub fn RecommenderPage() -> Element {
    rsx! {
        Title { "NbS Recommender" }
        SuspendWrapper {
            RecommenderLoader {}
        }
    }
}

#[component]
fn RecommenderLoader() -> Element {
    let meta = use_resource(recommender_meta).suspend()?.cloned();
    let meta = match meta {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(m) => m,
    };
    rsx! {
        RecommenderRoot { meta }
    }
}

#[component]
fn RecommenderRoot(meta: ReadSignal<RsMeta>) -> Element {
    let selected = use_signal(Vec::<RecommenderFeature>::new);
    let preferences = use_signal(BTreeMap::<String, PreferenceValue>::new);
    let k = use_signal(|| DEFAULT_K as i64);
    let mut gate = use_signal(RequestGate::default);
    let mut view = use_signal(RecommendationsView::default);

    let run = move |_: MouseEvent| {
        let request = build_request(&selected.read(), &preferences.read(), k());
        let ticket = gate.write().issue();
        view.set(RecommendationsView::Loading);
        spawn(async move {
            let result = recommend(request).await.map_err(|e| {
                tracing::warn!("recommendation request failed: {:#?}", e);
                e.to_string()
            });
            view.write().settle(&gate.read(), ticket, result);
        });
    };

    rsx! {
        div {
            id: "x-recommender",
            style: "display: flex; flex-direction: column; gap: 16px; padding: 16px; max-width: 1100px;",
            h2 { style: "margin: 0;", "Recommender" }
            p {
                style: "color: #555555; margin: 0;",
                "Pick the features that matter, state your preferences and get the most similar projects."
            }
            FeatureChips { selected }
            PreferenceForm { meta, features: selected(), preferences }
            div {
                style: "display: flex; flex-direction: row; align-items: center; gap: 16px;",
                KSlider { k }
                button { onclick: run, "Recommend" }
            }
            RecommendationCards { view }
        }
    }
}
